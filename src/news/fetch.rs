use super::model::RawFeedItem;
use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use futures_util::StreamExt;
use reqwest::Client;
use serde_json::Value;
use std::{fs, path::PathBuf, time::Duration};
use url::Url;

/// Where raw feed records come from.
#[async_trait]
pub trait FeedSource: Send + Sync {
    async fn fetch_items(&self) -> Result<Vec<RawFeedItem>>;
}

/// Alpha Vantage `NEWS_SENTIMENT` endpoint.
pub struct AlphaVantageFeed {
    client: Client,
    endpoint: String,
    topics: String,
    api_key: String,
}

impl AlphaVantageFeed {
    pub fn new(endpoint: &str, topics: &str, api_key: &str) -> Result<Self> {
        let client = Client::builder()
            .user_agent("market-news/0.1")
            .gzip(true)
            .connect_timeout(Duration::from_secs(5))
            .timeout(Duration::from_secs(20))
            .build()?;
        Ok(Self {
            client,
            endpoint: endpoint.to_string(),
            topics: topics.to_string(),
            api_key: api_key.to_string(),
        })
    }

    pub fn request_url(&self) -> Result<Url> {
        Url::parse_with_params(
            &self.endpoint,
            &[
                ("function", "NEWS_SENTIMENT"),
                ("topics", self.topics.as_str()),
                ("apikey", self.api_key.as_str()),
            ],
        )
        .with_context(|| format!("invalid endpoint: {}", self.endpoint))
    }
}

#[async_trait]
impl FeedSource for AlphaVantageFeed {
    async fn fetch_items(&self) -> Result<Vec<RawFeedItem>> {
        let url = self.request_url()?;
        tracing::info!(endpoint = %self.endpoint, topics = %self.topics, "fetching news feed");
        let resp = self.client.get(url).send().await?.error_for_status()?;

        // Stream with a max size limit
        let mut stream = resp.bytes_stream();
        let mut buf: Vec<u8> = Vec::new();
        let max = max_feed_bytes();
        while let Some(chunk) = stream.next().await {
            let c = chunk.context("failed to read response body")?;
            if buf.len() + c.len() > max {
                return Err(anyhow!("feed too large (>{} bytes)", max));
            }
            buf.extend_from_slice(&c);
        }

        let items = parse_feed(&buf)?;
        tracing::info!(count = items.len(), "news feed fetched");
        Ok(items)
    }
}

/// A saved API response on disk, same shape as the upstream body.
pub struct FileFeed {
    path: PathBuf,
}

impl FileFeed {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl FeedSource for FileFeed {
    async fn fetch_items(&self) -> Result<Vec<RawFeedItem>> {
        let bytes = fs::read(&self.path)
            .with_context(|| format!("failed to read feed file: {}", self.path.display()))?;
        if bytes.len() > max_feed_bytes() {
            return Err(anyhow!("feed too large ({} bytes): {}", bytes.len(), self.path.display()));
        }
        let items = parse_feed(&bytes)?;
        tracing::info!(path = %self.path.display(), count = items.len(), "local feed loaded");
        Ok(items)
    }
}

/// Decode a response body. The body must be JSON; a missing or non-array
/// `feed` key (rate-limit notices, bad keys) yields no items.
pub fn parse_feed(body: &[u8]) -> Result<Vec<RawFeedItem>> {
    let v: Value = serde_json::from_slice(body).context("feed body is not valid JSON")?;
    let Some(entries) = v.get("feed").and_then(|x| x.as_array()) else {
        if let Some(note) = v.get("Information").or_else(|| v.get("Note")).and_then(|x| x.as_str()) {
            tracing::warn!(note, "upstream returned no feed");
        }
        return Ok(Vec::new());
    };
    Ok(entries.iter().map(RawFeedItem::from_value).collect())
}

fn max_feed_bytes() -> usize {
    // 5 MB cap
    5 * 1024 * 1024
}
