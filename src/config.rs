use anyhow::{bail, Context, Result};
use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

/// SL (Stockholm) vehicle positions, published through Samtrafiken's open data portal
pub const DEFAULT_FEED_URL: &str =
    "https://opendata.samtrafiken.se/gtfs-rt-sweden/sl/VehiclePositionsSweden.pb";
const DEFAULT_TIMEOUT_SECS: u64 = 10;
const DEFAULT_BIND_ADDR: &str = "127.0.0.1:5000";
const DEFAULT_POLL_INTERVAL_MS: u64 = 4000;

/// Upstream feed settings handed to the feed client
#[derive(Debug, Clone)]
pub struct FeedConfig {
    pub url: String,
    /// Sent as the `key` query parameter when set
    pub api_key: Option<String>,
    pub timeout: Duration,
}

impl FeedConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            api_key: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self::new(DEFAULT_FEED_URL)
    }
}

/// Web server settings
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    /// How often the map page polls for fresh positions
    pub poll_interval: Duration,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub feed: FeedConfig,
    pub server: ServerConfig,
}

impl Config {
    /// Load configuration from the process environment.
    ///
    /// Reads `FEED_URL`, `FEED_API_KEY`, `FEED_TIMEOUT_SECS`, `BIND_ADDR` and
    /// `POLL_INTERVAL_MS`.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let url = lookup("FEED_URL").unwrap_or_else(|| DEFAULT_FEED_URL.to_string());
        let api_key = lookup("FEED_API_KEY").filter(|k| !k.is_empty());

        let timeout_secs: u64 = parse_or(&lookup, "FEED_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS)?;
        if timeout_secs == 0 {
            bail!("FEED_TIMEOUT_SECS must be greater than zero");
        }

        let bind_addr: SocketAddr = match lookup("BIND_ADDR") {
            Some(raw) => raw
                .parse()
                .with_context(|| format!("Invalid BIND_ADDR: {raw}"))?,
            None => DEFAULT_BIND_ADDR
                .parse()
                .context("Invalid default bind address")?,
        };

        let poll_ms: u64 = parse_or(&lookup, "POLL_INTERVAL_MS", DEFAULT_POLL_INTERVAL_MS)?;
        if poll_ms == 0 {
            bail!("POLL_INTERVAL_MS must be greater than zero");
        }

        Ok(Self {
            feed: FeedConfig {
                url,
                api_key,
                timeout: Duration::from_secs(timeout_secs),
            },
            server: ServerConfig {
                bind_addr,
                poll_interval: Duration::from_millis(poll_ms),
            },
        })
    }
}

fn parse_or<T>(lookup: &impl Fn(&str) -> Option<String>, name: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(name) {
        Some(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("Invalid {name}: {raw}")),
        None => Ok(default),
    }
}
