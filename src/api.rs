use bytes::Bytes;
use prost::Message;
use thiserror::Error;

use crate::config::FeedConfig;
use crate::gtfs_realtime::FeedMessage;
use crate::models::VehicleRecord;

/// The feed could not be turned into vehicle records.
///
/// Every variant means the same thing to a caller: nothing to show for this
/// cycle, try again on the next poll.
#[derive(Debug, Error)]
pub enum FeedError {
    #[error("feed unavailable: failed to create HTTP client: {0}")]
    Client(reqwest::Error),

    #[error("feed unavailable: {0}")]
    Request(#[from] reqwest::Error),

    #[error("feed unavailable: upstream returned {0}")]
    Status(reqwest::StatusCode),

    #[error("feed unavailable: upstream returned an empty body")]
    EmptyBody,

    #[error("feed unavailable: failed to decode protobuf message: {0}")]
    Decode(#[from] prost::DecodeError),
}

/// GTFS-RT vehicle positions client
///
/// Holds no feed state; every call fetches and decodes from scratch, so one
/// client can be shared by concurrent requests.
#[derive(Debug, Clone)]
pub struct FeedClient {
    client: reqwest::Client,
    url: String,
    api_key: Option<String>,
}

impl FeedClient {
    /// Create a new client with a bounded request timeout
    pub fn new(config: &FeedConfig) -> Result<Self, FeedError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(FeedError::Client)?;

        Ok(Self {
            client,
            url: config.url.clone(),
            api_key: config.api_key.clone(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Fetch the raw feed body
    pub async fn fetch_feed(&self) -> Result<Bytes, FeedError> {
        tracing::debug!(url = %self.url, "Fetching vehicle positions");

        let mut request = self.client.get(&self.url);
        if let Some(key) = &self.api_key {
            request = request.query(&[("key", key)]);
        }

        let response = request.send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FeedError::Status(status));
        }

        let bytes = response.bytes().await?;
        if bytes.is_empty() {
            return Err(FeedError::EmptyBody);
        }

        tracing::debug!(bytes = bytes.len(), "Received data from feed");
        Ok(bytes)
    }

    /// Decode a feed body and normalize its vehicles, in feed order.
    ///
    /// Entities without a vehicle or without a complete position are skipped.
    /// A body that does not decode fails as a whole.
    pub fn parse_feed(data: &[u8]) -> Result<Vec<VehicleRecord>, FeedError> {
        let feed = FeedMessage::decode(data)?;

        tracing::debug!(entities = feed.entity.len(), "Decoded protobuf feed");

        let mut positions = Vec::with_capacity(feed.entity.len());
        let mut skipped = 0usize;

        for entity in &feed.entity {
            let Some(vehicle) = &entity.vehicle else {
                continue;
            };

            match VehicleRecord::from_vehicle_position(vehicle) {
                Some(record) => positions.push(record),
                None => {
                    skipped += 1;
                    tracing::trace!(entity = %entity.id, "Vehicle without usable position");
                }
            }
        }

        tracing::info!(count = positions.len(), skipped, "Parsed vehicle positions");
        Ok(positions)
    }

    /// Fetch the feed and return the current vehicle records
    pub async fn fetch_vehicle_positions(&self) -> Result<Vec<VehicleRecord>, FeedError> {
        let data = self.fetch_feed().await?;
        Self::parse_feed(&data)
    }
}
