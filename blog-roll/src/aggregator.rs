use crate::selection::SelectionPolicy;
use crate::source::fetch_blog;
use crate::types::{Article, Blog, BlogConfig, FeedFetcher};
use chrono::{DateTime, Utc};
use futures::future::join_all;
use serde::Serialize;
use std::collections::HashSet;
use tracing::{info, warn};

/// Result of dropping repeated URLs from a configuration.
#[derive(Debug, Clone, Default)]
pub struct Deduplicated {
    pub kept: Vec<BlogConfig>,
    pub removed: Vec<BlogConfig>,
}

/// Keeps the first occurrence of every URL, in configuration order.
pub fn dedup_blogs(configs: Vec<BlogConfig>) -> Deduplicated {
    let mut seen = HashSet::new();
    let mut result = Deduplicated::default();

    for config in configs {
        if seen.insert(config.url.clone()) {
            result.kept.push(config);
        } else {
            warn!("removed duplicate: {}", config.url);
            result.removed.push(config);
        }
    }

    result
}

#[derive(Debug, Clone, Serialize)]
pub struct ArticleStats {
    pub shown: Vec<Article>,
    pub shown_count: usize,
    pub all_count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct FailedBlog {
    pub url: String,
    pub error: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct BlogStats {
    pub success: usize,
    pub all: usize,
    pub failed: Vec<FailedBlog>,
}

/// Everything the blog-roll page gets to see.
#[derive(Debug, Clone, Serialize)]
pub struct BlogRollSummary {
    pub articles: ArticleStats,
    pub blogs: BlogStats,
}

/// A deduplicated set of fetched blogs.
#[derive(Debug, Clone)]
pub struct BlogRoll {
    blogs: Vec<Blog>,
}

impl BlogRoll {
    /// Deduplicates `configs` and fetches every remaining blog concurrently.
    ///
    /// Returns once every fetch has settled; failed fetches are recorded on
    /// their blog.
    pub async fn load<F>(configs: Vec<BlogConfig>, fetcher: &F) -> Self
    where
        F: FeedFetcher + ?Sized,
    {
        let deduplicated = dedup_blogs(configs);

        info!("Fetching {} blogs", deduplicated.kept.len());
        let blogs = join_all(
            deduplicated
                .kept
                .into_iter()
                .map(|config| fetch_blog(config, fetcher)),
        )
        .await;

        let roll = Self { blogs };
        info!(
            "Fetched {}/{} blogs successfully",
            roll.success_count(),
            roll.blogs.len()
        );
        roll
    }

    pub fn from_blogs(blogs: Vec<Blog>) -> Self {
        Self { blogs }
    }

    pub fn blogs(&self) -> &[Blog] {
        &self.blogs
    }

    pub fn success_count(&self) -> usize {
        self.blogs.iter().filter(|blog| blog.is_ok()).count()
    }

    /// Articles fetched across all blogs, shown or not.
    pub fn all_article_count(&self) -> usize {
        self.blogs.iter().map(|blog| blog.articles.len()).sum()
    }

    /// Per-blog selection merged into one newest-first list.
    ///
    /// Articles without a link are dropped. Ties keep blog order, then feed
    /// order.
    pub fn shown_articles<'a>(&'a self, policy: &SelectionPolicy, now: DateTime<Utc>) -> Vec<&'a Article> {
        let mut shown: Vec<&Article> = self
            .blogs
            .iter()
            .flat_map(|blog| policy.select(blog, now))
            .filter(|article| article.link.is_some())
            .collect();

        shown.sort_by(|a, b| b.published_at.cmp(&a.published_at));
        shown
    }

    pub fn summary(&self, policy: &SelectionPolicy, now: DateTime<Utc>) -> BlogRollSummary {
        let shown: Vec<Article> = self
            .shown_articles(policy, now)
            .into_iter()
            .cloned()
            .collect();

        let failed = self
            .blogs
            .iter()
            .filter_map(|blog| {
                blog.error.as_ref().map(|error| FailedBlog {
                    url: blog.url.clone(),
                    error: error.clone(),
                })
            })
            .collect();

        BlogRollSummary {
            articles: ArticleStats {
                shown_count: shown.len(),
                shown,
                all_count: self.all_article_count(),
            },
            blogs: BlogStats {
                success: self.success_count(),
                all: self.blogs.len(),
                failed,
            },
        }
    }
}
