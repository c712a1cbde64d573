use crate::types::{AggregatorError, RawEntry, RawFeed, Result};
use feed_rs::parser;
use tracing::debug;

pub struct FeedParser;

impl FeedParser {
    /// Parses RSS, Atom or JSON Feed content into the raw feed model.
    pub fn parse_feed(content: &[u8]) -> Result<RawFeed> {
        debug!("Parsing feed content ({} bytes)", content.len());

        let feed = parser::parse(content)
            .map_err(|e| AggregatorError::Fetch(format!("Failed to parse feed: {}", e)))?;

        let title = feed.title.map(|t| t.content);
        let entries: Vec<RawEntry> = feed.entries.into_iter().map(Self::parse_entry).collect();

        debug!("Parsed feed with {} entries", entries.len());

        Ok(RawFeed { title, entries })
    }

    fn parse_entry(entry: feed_rs::model::Entry) -> RawEntry {
        RawEntry {
            title: entry.title.map(|t| t.content),
            link: entry.links.into_iter().next().map(|l| l.href),
            published: entry.published,
            updated: entry.updated,
        }
    }
}
