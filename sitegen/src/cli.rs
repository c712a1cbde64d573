use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "sitegen", about = "Generate the blog roll and compile site content")]
pub struct Cli {
    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fetch every blog in a blog-roll file and render the blog-roll pages
    BlogRoll {
        /// Path to the blog-roll JSON file
        config: PathBuf,

        #[arg(long, default_value = "meta/templates")]
        templates: PathBuf,

        #[arg(long, default_value = "static")]
        output_dir: PathBuf,

        /// Per-feed timeout in seconds
        #[arg(long, default_value_t = 30)]
        timeout: u64,
    },

    /// Compile markdown content into html, skipping units that are up to date
    Compile {
        #[arg(long, default_value = "meta")]
        source: PathBuf,

        #[arg(long, default_value = "static/meta")]
        output: PathBuf,

        /// Rebuild every unit regardless of modification times
        #[arg(long)]
        force: bool,
    },
}
