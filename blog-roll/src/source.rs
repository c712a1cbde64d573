use crate::types::{AggregatorError, Article, Blog, BlogConfig, FeedFetcher, RawEntry, RawFeed, Result};
use chrono::{DateTime, Utc};
use tracing::{info, warn};

/// The timestamp an entry is ranked by.
///
/// Feeds that edit an article bump `updated` and leave `published` alone,
/// so `updated` wins whenever the entry carries one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryTimestamp {
    Updated(DateTime<Utc>),
    PublishedOnly(DateTime<Utc>),
}

impl EntryTimestamp {
    pub fn resolve(entry: &RawEntry) -> Option<Self> {
        match (entry.updated, entry.published) {
            (Some(updated), _) => Some(Self::Updated(updated)),
            (None, Some(published)) => Some(Self::PublishedOnly(published)),
            (None, None) => None,
        }
    }

    pub fn instant(&self) -> DateTime<Utc> {
        match *self {
            Self::Updated(t) | Self::PublishedOnly(t) => t,
        }
    }
}

/// Turns one raw entry into an `Article`. `index` is only used for the error.
pub fn normalize_entry(index: usize, entry: &RawEntry, source_url: &str, source_title: &str) -> Result<Article> {
    let title = entry.title.clone().ok_or_else(|| AggregatorError::EntryNormalization {
        index,
        reason: "entry has no title".to_string(),
    })?;

    let timestamp = EntryTimestamp::resolve(entry).ok_or_else(|| AggregatorError::EntryNormalization {
        index,
        reason: "entry has neither an updated nor a published timestamp".to_string(),
    })?;

    Ok(Article {
        title,
        published_at: timestamp.instant(),
        link: entry.link.clone(),
        source_url: source_url.to_string(),
        source_title: source_title.to_string(),
    })
}

/// Builds the loaded state of a blog from its fetched feed.
///
/// A single malformed entry fails the whole feed.
pub fn build_blog(config: BlogConfig, feed: RawFeed) -> Result<Blog> {
    let title = match feed.title {
        Some(title) if !title.trim().is_empty() => title,
        _ => config.url.clone(),
    };

    let articles = feed
        .entries
        .iter()
        .enumerate()
        .map(|(index, entry)| normalize_entry(index, entry, &config.url, &title))
        .collect::<Result<Vec<_>>>()?;

    Ok(Blog::loaded(config, title, articles))
}

/// Fetches one blog. Never fails: any error ends up in `Blog::error`.
pub async fn fetch_blog<F>(config: BlogConfig, fetcher: &F) -> Blog
where
    F: FeedFetcher + ?Sized,
{
    info!("parsing {}", config.url);

    let outcome = match fetcher.fetch(&config.url).await {
        Ok(feed) => build_blog(config.clone(), feed),
        Err(e) => Err(AggregatorError::Fetch(format!("{:#}", e))),
    };

    match outcome {
        Ok(blog) => blog,
        Err(e) => {
            warn!("failed {}: {}", config.url, e);
            Blog::failed(config, e.to_string())
        }
    }
}
