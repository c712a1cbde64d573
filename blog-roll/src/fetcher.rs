use crate::parser::FeedParser;
use crate::types::{AggregatorError, FeedFetcher, FetchConfig, RawFeed, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::time::{Duration, Instant};
use tracing::debug;
use url::Url;

/// `FeedFetcher` backed by an HTTP client and feed-rs.
pub struct HttpFeedFetcher {
    client: Client,
    config: FetchConfig,
}

impl HttpFeedFetcher {
    pub fn new(config: FetchConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .timeout(Duration::from_secs(config.timeout_seconds))
            .gzip(true)
            .deflate(true)
            .brotli(true)
            .redirect(reqwest::redirect::Policy::limited(config.max_redirects))
            .build()?;

        Ok(Self { client, config })
    }

    pub async fn fetch_feed(&self, url: &str) -> Result<RawFeed> {
        let parsed_url = Url::parse(url)?;
        if parsed_url.scheme() != "http" && parsed_url.scheme() != "https" {
            return Err(AggregatorError::Fetch(format!(
                "Unsupported URL scheme '{}'",
                parsed_url.scheme()
            )));
        }

        let start_time = Instant::now();
        let response = self.client.get(parsed_url).send().await?;
        let status = response.status();

        if !status.is_success() {
            return Err(AggregatorError::Fetch(format!(
                "HTTP {}: {}",
                status.as_u16(),
                status.canonical_reason().unwrap_or("Unknown")
            )));
        }

        let max_bytes = self.config.max_feed_size_mb * 1024 * 1024;
        if let Some(content_length) = response.content_length() {
            if content_length as usize > max_bytes {
                return Err(AggregatorError::Fetch(format!(
                    "Feed too large: {}MB",
                    content_length as usize / (1024 * 1024)
                )));
            }
        }

        let body = response.bytes().await?;
        if body.len() > max_bytes {
            return Err(AggregatorError::Fetch(format!(
                "Feed too large: {}MB",
                body.len() / (1024 * 1024)
            )));
        }

        debug!(
            "Fetched {} ({} bytes in {}ms)",
            url,
            body.len(),
            start_time.elapsed().as_millis()
        );

        FeedParser::parse_feed(&body)
    }
}

#[async_trait]
impl FeedFetcher for HttpFeedFetcher {
    async fn fetch(&self, url: &str) -> anyhow::Result<RawFeed> {
        Ok(self.fetch_feed(url).await?)
    }
}
