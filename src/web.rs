//! HTTP surface of the vehicle map
//!
//! - GET /           - Map page with the current positions embedded for first paint
//! - GET /update_map - Current positions as `{"positions": [...]}`, polled by the page
//!
//! A failed feed fetch renders the page with no markers, and makes the poll
//! endpoint answer 502 so the page keeps what it already shows.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::api::FeedClient;
use crate::models::VehicleRecord;

const MAP_TEMPLATE: &str = include_str!("map.html");

/// Stockholm city centre
const MAP_CENTER: (f64, f64) = (59.3293, 18.0686);
const MAP_ZOOM: u8 = 12;

/// State shared across handlers
pub struct AppState {
    pub feed: FeedClient,
    pub poll_interval: Duration,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PositionsResponse {
    pub positions: Vec<VehicleRecord>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Render the map page with `positions` as its initial markers.
pub fn render_map_page(
    positions: &[VehicleRecord],
    poll_interval: Duration,
) -> serde_json::Result<String> {
    // Feed text must not be able to open or close markup inside the inline
    // script; JSON string escapes keep the data identical for the page
    let initial = serde_json::to_string(positions)?
        .replace('<', "\\u003c")
        .replace('>', "\\u003e")
        .replace('&', "\\u0026");

    // Positions go in last so feed text is never scanned for placeholders
    Ok(MAP_TEMPLATE
        .replace("__POLL_INTERVAL_MS__", &poll_interval.as_millis().to_string())
        .replace("__MAP_CENTER_LAT__", &MAP_CENTER.0.to_string())
        .replace("__MAP_CENTER_LNG__", &MAP_CENTER.1.to_string())
        .replace("__MAP_ZOOM__", &MAP_ZOOM.to_string())
        .replace("__INITIAL_POSITIONS__", &initial))
}

async fn index(State(state): State<Arc<AppState>>) -> Response {
    let positions = match state.feed.fetch_vehicle_positions().await {
        Ok(positions) => positions,
        Err(e) => {
            tracing::warn!(error = %e, "Rendering map without vehicles");
            Vec::new()
        }
    };

    match render_map_page(&positions, state.poll_interval) {
        Ok(page) => Html(page).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Failed to render map page");
            (StatusCode::INTERNAL_SERVER_ERROR, "Failed to render map page").into_response()
        }
    }
}

async fn update_map(State(state): State<Arc<AppState>>) -> Response {
    match state.feed.fetch_vehicle_positions().await {
        Ok(positions) => Json(PositionsResponse { positions }).into_response(),
        Err(e) => {
            tracing::warn!(error = %e, "Position refresh failed");
            (
                StatusCode::BAD_GATEWAY,
                Json(ErrorResponse {
                    error: e.to_string(),
                }),
            )
                .into_response()
        }
    }
}

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/update_map", get(update_map))
        .with_state(state)
}
