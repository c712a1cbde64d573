use crate::aggregator::{BlogRoll, BlogRollSummary};
use crate::config::BlogRollConfig;
use crate::types::{AggregatorError, FeedFetcher, Result, TemplateRenderer};
use chrono::{DateTime, Utc};
use minijinja::{AutoEscape, Environment};
use serde_json::json;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

pub const DEFAULT_TEMPLATES_DIR: &str = "meta/templates";
pub const BLOG_ROLL_TEMPLATE: &str = "blog_roll.jinja2";
pub const INDEX_TEMPLATE: &str = "index.jinja2";

/// `TemplateRenderer` that loads jinja templates from a directory.
pub struct MiniJinjaRenderer {
    env: Environment<'static>,
}

impl MiniJinjaRenderer {
    pub fn new(templates_dir: impl AsRef<Path>) -> Self {
        let mut env = Environment::new();
        env.set_loader(minijinja::path_loader(templates_dir.as_ref()));
        // Feed titles, links and errors come from remote servers.
        env.set_auto_escape_callback(|_| AutoEscape::Html);
        Self { env }
    }
}

impl TemplateRenderer for MiniJinjaRenderer {
    fn render(&self, template_name: &str, context: &serde_json::Value) -> anyhow::Result<String> {
        let template = self.env.get_template(template_name)?;
        Ok(template.render(context)?)
    }
}

/// Paths of the pages written by `generate_blog_roll`.
#[derive(Debug, Clone)]
pub struct GeneratedPages {
    pub blog_roll: PathBuf,
    pub index: PathBuf,
    pub summary: BlogRollSummary,
}

fn render_to_file<R>(renderer: &R, template_name: &str, context: &serde_json::Value, target: &Path) -> Result<()>
where
    R: TemplateRenderer + ?Sized,
{
    let output = renderer
        .render(template_name, context)
        .map_err(|e| AggregatorError::Render(format!("{}: {:#}", template_name, e)))?;
    fs::write(target, output)?;
    info!("Wrote {}", target.display());
    Ok(())
}

/// Reads the blog roll at `config_path`, fetches every blog and writes
/// `blog_roll.html` and `index.html` into `output_dir`.
///
/// A malformed configuration fails before anything is fetched.
pub async fn generate_blog_roll<F, R>(
    config_path: &Path,
    output_dir: &Path,
    fetcher: &F,
    renderer: &R,
    now: DateTime<Utc>,
) -> Result<GeneratedPages>
where
    F: FeedFetcher + ?Sized,
    R: TemplateRenderer + ?Sized,
{
    let config = BlogRollConfig::load(config_path)?;
    let policy = config.selection_policy()?;

    let roll = BlogRoll::load(config.blogs, fetcher).await;
    let summary = roll.summary(&policy, now);

    fs::create_dir_all(output_dir)?;

    let blog_roll = output_dir.join("blog_roll.html");
    let context = json!({ "blog_info": serde_json::to_value(&summary)? });
    render_to_file(renderer, BLOG_ROLL_TEMPLATE, &context, &blog_roll)?;

    let index = output_dir.join("index.html");
    render_to_file(renderer, INDEX_TEMPLATE, &json!({}), &index)?;

    Ok(GeneratedPages {
        blog_roll,
        index,
        summary,
    })
}
