use crate::error::RefreshError;
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Deserializer};
use std::time::Duration;
use tracing::debug;

/// Source of episode feeds. The HTTP client is the only production implementation.
#[async_trait]
pub trait FeedSource: Send + Sync {
    async fn fetch_feed(&self, url: &str) -> std::result::Result<FeedResponse, RefreshError>;
}

/// JSON Feed document as published by the show hosts. Items are newest first.
///
/// Publishers sometimes send `null` instead of omitting a field; both read as empty.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FeedResponse {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub items: Vec<FeedItem>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FeedItem {
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub url: String,
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(rename = "content_html", deserialize_with = "null_as_default")]
    pub html: String,
    #[serde(deserialize_with = "null_as_default")]
    pub date_published: String,
    #[serde(deserialize_with = "null_as_default")]
    pub attachments: Vec<FeedAttachment>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FeedAttachment {
    #[serde(deserialize_with = "null_as_default")]
    pub url: String,
    pub mime_type: Option<String>,
    pub size_in_bytes: Option<u64>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone)]
pub struct HttpFeedClient {
    client: Client,
}

impl HttpFeedClient {
    pub fn new(timeout: Duration) -> Result<Self> {
        let user_agent = format!("jupiter-addon/{}", env!("CARGO_PKG_VERSION"));
        let client = Client::builder()
            .connect_timeout(timeout.min(Duration::from_secs(5)))
            .timeout(timeout)
            .user_agent(user_agent)
            .build()
            .context("Failed to build feed HTTP client")?;
        Ok(Self { client })
    }
}

#[async_trait]
impl FeedSource for HttpFeedClient {
    async fn fetch_feed(&self, url: &str) -> std::result::Result<FeedResponse, RefreshError> {
        let fetch_err = |source| RefreshError::FeedFetch {
            url: url.to_string(),
            source,
        };
        let res = self.client.get(url).send().await.map_err(fetch_err)?;
        let status = res.status();
        if !status.is_success() {
            return Err(RefreshError::FeedStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        let body = res.bytes().await.map_err(fetch_err)?;
        debug!("Fetched {} bytes from {}", body.len(), url);
        parse_feed(url, &body)
    }
}

pub fn parse_feed(url: &str, body: &[u8]) -> std::result::Result<FeedResponse, RefreshError> {
    serde_json::from_slice(body).map_err(|source| RefreshError::FeedParse {
        url: url.to_string(),
        source,
    })
}
