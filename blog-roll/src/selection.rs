use crate::types::{Article, Blog};
use chrono::{DateTime, Duration, Utc};
use serde::Deserialize;

/// How the number of recent articles is weighed against `window_cap`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WindowMode {
    /// `max(minimum, min(window_cap, relevant))`: very active feeds are
    /// capped at `window_cap`.
    #[default]
    AtMostCap,
    /// `max(minimum, max(window_cap, relevant))`: always at least
    /// `window_cap`, more when the feed is very active.
    AtLeastCap,
}

/// Picks the articles of one blog that are recent enough to show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionPolicy {
    pub minimum: usize,
    pub window_cap: usize,
    pub timeframe: Duration,
    pub mode: WindowMode,
}

impl Default for SelectionPolicy {
    fn default() -> Self {
        Self {
            minimum: 5,
            window_cap: 10,
            timeframe: Duration::days(31),
            mode: WindowMode::AtMostCap,
        }
    }
}

impl SelectionPolicy {
    pub fn with_mode(mut self, mode: WindowMode) -> Self {
        self.mode = mode;
        self
    }

    /// Number of articles to show for a blog with `relevant` recent articles.
    pub fn to_show(&self, relevant: usize) -> usize {
        let windowed = match self.mode {
            WindowMode::AtMostCap => self.window_cap.min(relevant),
            WindowMode::AtLeastCap => self.window_cap.max(relevant),
        };
        self.minimum.max(windowed)
    }

    /// Newest-first selection of `blog`'s articles, relative to `now`.
    ///
    /// Articles with equal timestamps keep their feed order. A failed blog
    /// has no articles and so selects nothing.
    pub fn select<'a>(&self, blog: &'a Blog, now: DateTime<Utc>) -> Vec<&'a Article> {
        let mut sorted: Vec<&Article> = blog.articles.iter().collect();
        sorted.sort_by(|a, b| b.published_at.cmp(&a.published_at));

        let relevant = sorted
            .iter()
            .filter(|article| now - article.published_at <= self.timeframe)
            .count();

        sorted.truncate(self.to_show(relevant));
        sorted
    }
}
