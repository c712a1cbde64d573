pub mod types;
pub mod parser;
pub mod fetcher;
pub mod source;
pub mod selection;
pub mod aggregator;
pub mod config;
pub mod render;

pub use types::*;
pub use parser::FeedParser;
pub use fetcher::HttpFeedFetcher;
pub use source::{build_blog, fetch_blog, normalize_entry, EntryTimestamp};
pub use selection::{SelectionPolicy, WindowMode};
pub use aggregator::{dedup_blogs, BlogRoll, BlogRollSummary, Deduplicated};
pub use config::{BlogRollConfig, SelectionConfig};
pub use render::{generate_blog_roll, GeneratedPages, MiniJinjaRenderer};
