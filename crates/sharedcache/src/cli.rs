//! CLI command definitions.

use clap::{Parser, Subcommand, ValueEnum};

/// Inspect and exercise the process-wide shared cache.
#[derive(Debug, Parser)]
#[command(name = "sharedcache")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format.
    #[arg(long, global = true, default_value = "pretty")]
    pub format: OutputFormat,

    /// Suppress non-essential output.
    #[arg(long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Raw JSON output.
    Json,
    /// Human-readable output.
    #[default]
    Pretty,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Walk through two handles sharing the same cache.
    Demo,
    /// Insert distinct keys from many threads and verify nothing was lost.
    Stress {
        /// Worker threads (defaults to SHAREDCACHE_THREADS).
        #[arg(long, short)]
        threads: Option<usize>,

        /// Keys per worker (defaults to SHAREDCACHE_KEYS_PER_THREAD).
        #[arg(long, short)]
        keys: Option<usize>,
    },
    /// Insert KEY=VALUE entries and print the resulting contents.
    ///
    /// VALUE is parsed as JSON when possible, otherwise stored as a string.
    Put {
        /// Entries as KEY=VALUE.
        #[arg(required = true)]
        entries: Vec<String>,
    },
    /// Print the cache contents.
    Render,
}
