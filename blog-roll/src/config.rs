use crate::selection::{SelectionPolicy, WindowMode};
use crate::types::{AggregatorError, BlogConfig, Result};
use chrono::Duration;
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

/// The blog-roll file: `{"blogs": [{"url": ..., "tags": [...]}], "selection": {...}}`.
#[derive(Debug, Clone, Deserialize)]
pub struct BlogRollConfig {
    pub blogs: Vec<BlogConfig>,
    #[serde(default)]
    pub selection: SelectionConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SelectionConfig {
    pub minimum: usize,
    pub window_cap: usize,
    pub timeframe_days: i64,
    pub mode: WindowMode,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        let policy = SelectionPolicy::default();
        Self {
            minimum: policy.minimum,
            window_cap: policy.window_cap,
            timeframe_days: policy.timeframe.num_days(),
            mode: policy.mode,
        }
    }
}

impl TryFrom<&SelectionConfig> for SelectionPolicy {
    type Error = AggregatorError;

    fn try_from(config: &SelectionConfig) -> Result<Self> {
        if config.timeframe_days < 0 {
            return Err(AggregatorError::Configuration(
                "selection.timeframe_days must not be negative".to_string(),
            ));
        }

        let timeframe = Duration::try_days(config.timeframe_days).ok_or_else(|| {
            AggregatorError::Configuration(format!(
                "selection.timeframe_days is out of range: {}",
                config.timeframe_days
            ))
        })?;

        Ok(Self {
            minimum: config.minimum,
            window_cap: config.window_cap,
            timeframe,
            mode: config.mode,
        })
    }
}

impl BlogRollConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| AggregatorError::Configuration(format!("invalid blog roll: {}", e)))?;

        SelectionPolicy::try_from(&config.selection)?;

        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        debug!("Loading blog roll from {}", path.display());
        let json = std::fs::read_to_string(path).map_err(|e| {
            AggregatorError::Configuration(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::from_json(&json)
    }

    pub fn selection_policy(&self) -> Result<SelectionPolicy> {
        SelectionPolicy::try_from(&self.selection)
    }
}
