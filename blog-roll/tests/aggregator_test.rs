mod common;

use async_trait::async_trait;
use blog_roll::{dedup_blogs, BlogConfig, BlogRoll, FeedFetcher, RawEntry, RawFeed, SelectionPolicy};
use common::{article, blog_with, days_ago, entry, init_tracing, now, StubFetcher};
use std::time::Duration;
use tokio::sync::Barrier;
use tracing::info;

const FEED_A: &str = "https://a.example/feed";
const FEED_B: &str = "https://b.example/feed";
const FEED_DOWN: &str = "https://down.example/feed";

fn feed(title: Option<&str>, entries: Vec<RawEntry>) -> RawFeed {
    RawFeed {
        title: title.map(str::to_string),
        entries,
    }
}

#[test]
fn test_dedup_keeps_first_occurrence() {
    init_tracing();

    let configs = vec![
        BlogConfig::new(FEED_A).with_tags(["first"]),
        BlogConfig::new(FEED_B),
        BlogConfig::new(FEED_A).with_tags(["second"]),
        BlogConfig::new(FEED_B),
        BlogConfig::new(FEED_A),
    ];

    let result = dedup_blogs(configs);
    let urls: Vec<&str> = result.kept.iter().map(|c| c.url.as_str()).collect();
    assert_eq!(urls, vec![FEED_A, FEED_B]);
    assert_eq!(result.kept[0].tags, vec!["first".to_string()]);
    assert_eq!(result.removed.len(), 3);
}

#[test]
fn test_dedup_is_byte_exact() {
    let configs = vec![
        BlogConfig::new("https://a.example/feed"),
        BlogConfig::new("https://a.example/feed/"),
        BlogConfig::new("HTTPS://a.example/feed"),
    ];
    assert_eq!(dedup_blogs(configs).kept.len(), 3);
}

#[tokio::test]
async fn test_identical_urls_fetch_once() {
    init_tracing();

    let fetcher = StubFetcher::new().with_feed(FEED_A, feed(Some("A"), vec![]));
    let configs = vec![
        BlogConfig::new("https://a.example/feed"),
        BlogConfig::new("https://a.example/feed"),
    ];

    let roll = BlogRoll::load(configs, &fetcher).await;
    assert_eq!(roll.blogs().len(), 1);
    assert_eq!(fetcher.calls(), vec![FEED_A.to_string()]);
}

#[tokio::test]
async fn test_failed_blog_is_isolated_and_counted() {
    init_tracing();

    let fetcher = StubFetcher::new()
        .with_feed(
            FEED_A,
            feed(
                Some("Blog A"),
                vec![
                    entry("a1", Some("https://a.example/1"), days_ago(1)),
                    entry("a2", Some("https://a.example/2"), days_ago(3)),
                ],
            ),
        )
        .with_feed(
            FEED_B,
            feed(None, vec![entry("b1", Some("https://b.example/1"), days_ago(2))]),
        );

    let configs = vec![
        BlogConfig::new(FEED_A),
        BlogConfig::new(FEED_DOWN),
        BlogConfig::new(FEED_B),
    ];

    let roll = BlogRoll::load(configs, &fetcher).await;
    let summary = roll.summary(&SelectionPolicy::default(), now());

    info!("Summary: {:?}", summary.blogs);

    assert_eq!(summary.blogs.all, 3);
    assert_eq!(summary.blogs.success, 2);
    let errors = roll.blogs().iter().filter(|b| b.error.is_some()).count();
    assert_eq!(summary.blogs.success + errors, summary.blogs.all);

    assert_eq!(summary.blogs.failed.len(), 1);
    assert_eq!(summary.blogs.failed[0].url, FEED_DOWN);
    assert!(summary.blogs.failed[0].error.contains("connection refused"));

    let down = &roll.blogs()[1];
    assert!(down.articles.is_empty());
    assert!(down.title.is_empty());

    // Untitled feeds fall back to their URL.
    assert_eq!(roll.blogs()[2].title, FEED_B);

    let shown: Vec<&str> = summary.articles.shown.iter().map(|a| a.title.as_str()).collect();
    assert_eq!(shown, vec!["a1", "b1", "a2"]);
    assert_eq!(summary.articles.shown_count, 3);
    assert_eq!(summary.articles.all_count, 3);
}

#[tokio::test]
async fn test_malformed_entry_fails_whole_blog() {
    init_tracing();

    let undated = RawEntry {
        title: Some("no date".to_string()),
        link: Some("https://a.example/x".to_string()),
        published: None,
        updated: None,
    };
    let fetcher = StubFetcher::new().with_feed(
        FEED_A,
        feed(Some("A"), vec![entry("fine", Some("https://a.example/1"), days_ago(1)), undated]),
    );

    let roll = BlogRoll::load(vec![BlogConfig::new(FEED_A)], &fetcher).await;
    let blog = &roll.blogs()[0];

    assert!(blog.error.as_deref().unwrap_or_default().contains("#1"));
    assert!(blog.articles.is_empty());
    assert_eq!(roll.success_count(), 0);
    assert_eq!(roll.all_article_count(), 0);
}

#[test]
fn test_shown_articles_drop_linkless_and_count_all() {
    let mut linkless = article("no-link", days_ago(1));
    linkless.link = None;

    let roll = BlogRoll::from_blogs(vec![
        blog_with(FEED_A, vec![linkless, article("a-old", days_ago(10))]),
        blog_with(FEED_B, vec![article("b-new", days_ago(2))]),
    ]);

    let summary = roll.summary(&SelectionPolicy::default(), now());
    let shown: Vec<&str> = summary.articles.shown.iter().map(|a| a.title.as_str()).collect();
    assert_eq!(shown, vec!["b-new", "a-old"]);
    assert_eq!(summary.articles.shown_count, 2);
    assert_eq!(summary.articles.all_count, 3);
}

#[test]
fn test_merged_order_is_stable_across_blogs() {
    let same = days_ago(4);
    let roll = BlogRoll::from_blogs(vec![
        blog_with(FEED_A, vec![article("a1", same), article("a2", same)]),
        blog_with(FEED_B, vec![article("b1", same), article("b-newest", days_ago(0))]),
    ]);

    let shown = roll.shown_articles(&SelectionPolicy::default(), now());
    let titles: Vec<&str> = shown.iter().map(|a| a.title.as_str()).collect();
    assert_eq!(titles, vec!["b-newest", "a1", "a2", "b1"]);

    for pair in shown.windows(2) {
        assert!(pair[0].published_at >= pair[1].published_at);
    }
}

#[test]
fn test_summary_serializes_for_templates() {
    let roll = BlogRoll::from_blogs(vec![blog_with(FEED_A, vec![article("a1", days_ago(1))])]);
    let value = serde_json::to_value(roll.summary(&SelectionPolicy::default(), now())).unwrap();

    assert_eq!(value["articles"]["shown_count"], 1);
    assert_eq!(value["articles"]["all_count"], 1);
    assert_eq!(value["blogs"]["success"], 1);
    assert_eq!(value["blogs"]["all"], 1);
    assert_eq!(value["articles"]["shown"][0]["title"], "a1");
}

/// Every fetch waits until all of them have started.
struct RendezvousFetcher {
    barrier: Barrier,
}

#[async_trait]
impl FeedFetcher for RendezvousFetcher {
    async fn fetch(&self, url: &str) -> anyhow::Result<RawFeed> {
        self.barrier.wait().await;
        Ok(RawFeed {
            title: Some(url.to_string()),
            entries: vec![entry("post", Some("https://x.example/1"), days_ago(1))],
        })
    }
}

#[tokio::test]
async fn test_fetches_run_concurrently() {
    init_tracing();

    let urls = ["https://a.example/feed", "https://b.example/feed", "https://c.example/feed"];
    let fetcher = RendezvousFetcher {
        barrier: Barrier::new(urls.len()),
    };
    let configs = urls.iter().map(|url| BlogConfig::new(*url)).collect();

    let roll = tokio::time::timeout(Duration::from_secs(5), BlogRoll::load(configs, &fetcher))
        .await
        .expect("fetches must be in flight at the same time");

    assert_eq!(roll.blogs().len(), 3);
    assert_eq!(roll.success_count(), 3);
    let order: Vec<&str> = roll.blogs().iter().map(|b| b.url.as_str()).collect();
    assert_eq!(order, urls.to_vec());
}
