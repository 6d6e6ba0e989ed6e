use std::net::SocketAddr;
use std::time::Duration;

pub const DEFAULT_FEED_URL: &str = "http://css-tricks.com/feed";
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8080";
pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 20;

const FEED_URL_KEY: &str = "RSS_JSON_FEED_URL";
const BIND_ADDR_KEY: &str = "RSS_JSON_BIND_ADDR";
const FETCH_TIMEOUT_KEY: &str = "RSS_JSON_FETCH_TIMEOUT_SECS";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("feed url must not be empty")]
    EmptyFeedUrl,
    #[error("invalid bind address `{value}`: {source}")]
    BindAddr {
        value: String,
        source: std::net::AddrParseError,
    },
    #[error("invalid fetch timeout `{value}`: {source}")]
    FetchTimeout {
        value: String,
        source: std::num::ParseIntError,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub feed_url: String,
    pub bind_addr: SocketAddr,
    pub fetch_timeout: Duration,
}

impl AppConfig {
    pub fn new(feed_url: impl Into<String>) -> Result<Self, ConfigError> {
        let feed_url = feed_url.into();
        if feed_url.trim().is_empty() {
            return Err(ConfigError::EmptyFeedUrl);
        }
        Ok(Self {
            feed_url,
            bind_addr: parse_bind_addr(DEFAULT_BIND_ADDR)?,
            fetch_timeout: Duration::from_secs(DEFAULT_FETCH_TIMEOUT_SECS),
        })
    }

    /// Reads `.env.local` when present, then the `RSS_JSON_*` variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::from_filename(".env.local");
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let read = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let mut config = Self::new(read(FEED_URL_KEY).unwrap_or_else(|| DEFAULT_FEED_URL.to_string()))?;
        if let Some(value) = read(BIND_ADDR_KEY) {
            config.bind_addr = parse_bind_addr(&value)?;
        }
        if let Some(value) = read(FETCH_TIMEOUT_KEY) {
            let secs = value
                .trim()
                .parse::<u64>()
                .map_err(|source| ConfigError::FetchTimeout {
                    value: value.clone(),
                    source,
                })?;
            config.fetch_timeout = Duration::from_secs(secs);
        }
        Ok(config)
    }
}

fn parse_bind_addr(value: &str) -> Result<SocketAddr, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|source| ConfigError::BindAddr {
            value: value.to_string(),
            source,
        })
}
