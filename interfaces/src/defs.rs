use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

// Object style note:
// The implementations of these traits are collaborators the core logic does
// not look inside. The feed side only sees a `RawFeed` or an error, the
// compile side only sees html text or an error, and rendering only sees text.

/// One item of a feed as the fetcher returned it, before normalization.
#[derive(Debug, Clone, Default)]
pub struct RawEntry {
    pub title: Option<String>,
    pub link: Option<String>,
    pub published: Option<DateTime<Utc>>,
    pub updated: Option<DateTime<Utc>>,
}

/// A fetched feed. Entries keep the order the feed listed them in.
#[derive(Debug, Clone, Default)]
pub struct RawFeed {
    pub title: Option<String>,
    pub entries: Vec<RawEntry>,
}

#[async_trait]
pub trait FeedFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<RawFeed>;
}

pub trait MarkdownConverter {
    fn convert(&self, markdown: &str) -> Result<String>;
}

pub trait TemplateRenderer {
    fn render(&self, template_name: &str, context: &serde_json::Value) -> Result<String>;
}
