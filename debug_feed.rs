use anyhow::{Context, Result};
use prost::Message;
use vehicle_map::api::FeedClient;
use vehicle_map::config::Config;
use vehicle_map::gtfs_realtime::FeedMessage;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env().context("Failed to load configuration")?;
    let client = FeedClient::new(&config.feed).context("Failed to create feed client")?;

    println!("Fetching from: {}", client.url());
    let bytes = client.fetch_feed().await?;

    println!("Received {} bytes", bytes.len());

    let feed = FeedMessage::decode(&bytes[..]).context("Failed to decode protobuf message")?;

    println!("Feed header version: {:?}", feed.header.gtfs_realtime_version);
    println!("Feed timestamp: {:?}", feed.header.timestamp);
    println!("Number of entities: {}", feed.entity.len());

    for (i, entity) in feed.entity.iter().enumerate() {
        let Some(vehicle) = &entity.vehicle else {
            println!("[{i}] entity {}: no vehicle", entity.id);
            continue;
        };

        let trip = vehicle.trip.as_ref();
        let descriptor = vehicle.vehicle.as_ref();
        let position = vehicle.position.as_ref();

        println!("[{i}] entity {}", entity.id);
        println!(
            "    vehicle id={:?} label={:?} timestamp={:?}",
            descriptor.and_then(|d| d.id.as_deref()),
            descriptor.and_then(|d| d.label.as_deref()),
            vehicle.timestamp
        );
        println!(
            "    trip route={:?} trip={:?} direction={:?}",
            trip.and_then(|t| t.route_id.as_deref()),
            trip.and_then(|t| t.trip_id.as_deref()),
            trip.and_then(|t| t.direction_id)
        );
        match position {
            Some(p) => println!(
                "    position lat={:?} lng={:?} speed={:?} bearing={:?}",
                p.latitude, p.longitude, p.speed, p.bearing
            ),
            None => println!("    position: none"),
        }
    }

    let positions = FeedClient::parse_feed(&bytes)?;
    println!("\n{} of {} entities end up on the map:", positions.len(), feed.entity.len());
    for record in &positions {
        println!("  {}", record);
    }

    Ok(())
}
