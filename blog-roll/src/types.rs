use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub use interfaces::defs::{FeedFetcher, RawEntry, RawFeed, TemplateRenderer};

/// A normalized feed entry. Never changes after construction.
///
/// `source_url` and `source_title` are copied from the owning blog for
/// display only.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Article {
    pub title: String,
    pub published_at: DateTime<Utc>,
    pub link: Option<String>,
    pub source_url: String,
    pub source_title: String,
}

/// One configured feed, as read from the blog-roll file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlogConfig {
    pub url: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl BlogConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            tags: Vec::new(),
        }
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }
}

/// A configured feed together with the outcome of fetching it.
///
/// Either `error` is set and `articles`/`title` are empty, or `error` is
/// `None` and the fetch result is filled in.
#[derive(Debug, Clone, Serialize)]
pub struct Blog {
    pub url: String,
    pub tags: Vec<String>,
    pub title: String,
    pub articles: Vec<Article>,
    pub error: Option<String>,
}

impl Blog {
    pub fn loaded(config: BlogConfig, title: String, articles: Vec<Article>) -> Self {
        Self {
            url: config.url,
            tags: config.tags,
            title,
            articles,
            error: None,
        }
    }

    pub fn failed(config: BlogConfig, error: String) -> Self {
        Self {
            url: config.url,
            tags: config.tags,
            title: String::new(),
            articles: Vec::new(),
            error: Some(error),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

#[derive(Debug, Clone)]
pub struct FetchConfig {
    pub user_agent: String,
    pub timeout_seconds: u64,
    pub max_feed_size_mb: usize,
    pub max_redirects: usize,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            user_agent: concat!("blog-roll/", env!("CARGO_PKG_VERSION")).to_string(),
            timeout_seconds: 30,
            max_feed_size_mb: 10,
            max_redirects: 5,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AggregatorError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Fetch error: {0}")]
    Fetch(String),

    #[error("Malformed feed entry #{index}: {reason}")]
    EntryNormalization { index: usize, reason: String },

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Render error: {0}")]
    Render(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, AggregatorError>;
