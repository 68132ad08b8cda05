use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::time::Duration;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3592";
const DEFAULT_FEED_TIMEOUT_SECS: u64 = 5;
pub const DEFAULT_SEASON: i32 = 2019;
pub const DEFAULT_STREAM_TITLE: &str = "Jupiter Zone";

/// Values stamped onto every episode built from a feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EpisodeSettings {
    pub season: i32,
    pub stream_title: String,
}

impl Default for EpisodeSettings {
    fn default() -> Self {
        Self {
            season: DEFAULT_SEASON,
            stream_title: DEFAULT_STREAM_TITLE.to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: SocketAddr,
    pub feed_timeout: Duration,
    pub episodes: EpisodeSettings,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let bind_addr = get("ADDON_BIND_ADDR")
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string())
            .trim()
            .parse::<SocketAddr>()
            .context("ADDON_BIND_ADDR must be a socket address like 0.0.0.0:3592")?;

        let timeout_secs = match get("FEED_TIMEOUT_SECS") {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .context("FEED_TIMEOUT_SECS must be a whole number of seconds")?,
            None => DEFAULT_FEED_TIMEOUT_SECS,
        };
        if timeout_secs == 0 {
            anyhow::bail!("FEED_TIMEOUT_SECS must be greater than zero");
        }

        let season = match get("EPISODE_SEASON") {
            Some(raw) => raw
                .trim()
                .parse::<i32>()
                .context("EPISODE_SEASON must be an integer")?,
            None => DEFAULT_SEASON,
        };

        let stream_title = get("STREAM_TITLE").unwrap_or_else(|| DEFAULT_STREAM_TITLE.to_string());

        Ok(Self {
            bind_addr,
            feed_timeout: Duration::from_secs(timeout_secs),
            episodes: EpisodeSettings {
                season,
                stream_title,
            },
        })
    }
}
