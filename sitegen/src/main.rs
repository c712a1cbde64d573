mod cli;

use anyhow::{Context, Result};
use blog_roll::{generate_blog_roll, FetchConfig, HttpFeedFetcher, MiniJinjaRenderer};
use clap::Parser;
use cli::{Cli, Command};
use site_compiler::{CompilePipeline, PulldownConverter};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

fn init_logging(verbose: bool) {
    let default_directive = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Command::BlogRoll {
            config,
            templates,
            output_dir,
            timeout,
        } => {
            let fetch_config = FetchConfig {
                timeout_seconds: timeout,
                ..FetchConfig::default()
            };
            let fetcher = HttpFeedFetcher::new(fetch_config).context("Failed to create HTTP client")?;
            let renderer = MiniJinjaRenderer::new(&templates);

            let pages = generate_blog_roll(&config, &output_dir, &fetcher, &renderer, chrono::Utc::now())
                .await
                .with_context(|| format!("Failed to generate blog roll from {}", config.display()))?;

            info!(
                "Blog roll: {} articles shown of {}, {}/{} blogs fetched",
                pages.summary.articles.shown_count,
                pages.summary.articles.all_count,
                pages.summary.blogs.success,
                pages.summary.blogs.all
            );
        }
        Command::Compile { source, output, force } => {
            let pipeline = CompilePipeline::new(PulldownConverter).with_force(force);
            let report = pipeline
                .compile_all(&source, &output)
                .with_context(|| format!("Failed to compile {}", source.display()))?;

            for (path, error) in &report.failed {
                warn!("{}: {}", path.display(), error);
            }
        }
    }

    Ok(())
}
