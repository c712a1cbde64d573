#![allow(dead_code)]

use async_trait::async_trait;
use blog_roll::{Article, Blog, BlogConfig, FeedFetcher, RawEntry, RawFeed};
use chrono::{DateTime, Duration, TimeZone, Utc};
use std::collections::HashMap;
use std::sync::{Mutex, Once};

static INIT: Once = Once::new();

pub fn init_tracing() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_test_writer()
            .try_init()
            .ok();
    });
}

/// Fixed reference time used instead of the wall clock.
pub fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 10, 1, 12, 0, 0).unwrap()
}

pub fn days_ago(days: i64) -> DateTime<Utc> {
    now() - Duration::days(days)
}

pub fn entry(title: &str, link: Option<&str>, published: DateTime<Utc>) -> RawEntry {
    RawEntry {
        title: Some(title.to_string()),
        link: link.map(str::to_string),
        published: Some(published),
        updated: None,
    }
}

pub fn article(title: &str, published_at: DateTime<Utc>) -> Article {
    Article {
        title: title.to_string(),
        published_at,
        link: Some(format!("https://blog.example/{}", title)),
        source_url: "https://blog.example/feed".to_string(),
        source_title: "Example".to_string(),
    }
}

pub fn blog_with(url: &str, articles: Vec<Article>) -> Blog {
    Blog::loaded(BlogConfig::new(url), url.to_string(), articles)
}

/// In-memory fetcher. URLs without a registered feed fail.
#[derive(Default)]
pub struct StubFetcher {
    feeds: HashMap<String, RawFeed>,
    calls: Mutex<Vec<String>>,
}

impl StubFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_feed(mut self, url: &str, feed: RawFeed) -> Self {
        self.feeds.insert(url.to_string(), feed);
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl FeedFetcher for StubFetcher {
    async fn fetch(&self, url: &str) -> anyhow::Result<RawFeed> {
        self.calls.lock().unwrap().push(url.to_string());
        tokio::task::yield_now().await;
        self.feeds
            .get(url)
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("connection refused: {}", url))
    }
}
