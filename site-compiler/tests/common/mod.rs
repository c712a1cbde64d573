#![allow(dead_code)]

use interfaces::defs::MarkdownConverter;
use site_compiler::PulldownConverter;
use std::cell::Cell;
use std::fs::{self, File};
use std::path::Path;
use std::sync::Once;
use std::time::{Duration, SystemTime};

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

/// Wraps the real converter and counts how often it ran.
#[derive(Default)]
pub struct CountingConverter {
    inner: PulldownConverter,
    calls: Cell<usize>,
}

impl CountingConverter {
    pub fn calls(&self) -> usize {
        self.calls.get()
    }
}

impl MarkdownConverter for CountingConverter {
    fn convert(&self, markdown: &str) -> anyhow::Result<String> {
        self.calls.set(self.calls.get() + 1);
        self.inner.convert(markdown)
    }
}

/// Rejects any document containing `BROKEN`.
pub struct PickyConverter;

impl MarkdownConverter for PickyConverter {
    fn convert(&self, markdown: &str) -> anyhow::Result<String> {
        if markdown.contains("BROKEN") {
            anyhow::bail!("unbalanced markup");
        }
        PulldownConverter.convert(markdown)
    }
}

pub fn write(path: &Path, contents: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, contents).unwrap();
}

pub fn set_mtime(path: &Path, time: SystemTime) {
    File::options()
        .write(true)
        .open(path)
        .unwrap()
        .set_modified(time)
        .unwrap();
}

pub fn hours_ago(hours: u64) -> SystemTime {
    SystemTime::now() - Duration::from_secs(hours * 3600)
}

pub fn hours_ahead(hours: u64) -> SystemTime {
    SystemTime::now() + Duration::from_secs(hours * 3600)
}

/// Pins every file under `dir` to `time`.
pub fn age_tree(dir: &Path, time: SystemTime) {
    if dir.is_file() {
        set_mtime(dir, time);
        return;
    }
    for entry in fs::read_dir(dir).unwrap() {
        age_tree(&entry.unwrap().path(), time);
    }
}
