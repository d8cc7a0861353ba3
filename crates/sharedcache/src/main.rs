//! sharedcache CLI entry point.

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use sharedcache::cli::{Cli, Commands};
use sharedcache::{commands, output, Config, SharedCache};

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::from_env();

    // Initialize tracing subscriber
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.log_filter.as_str().into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match cli.command {
        Commands::Demo => {
            let report = commands::run_demo().context("demo failed")?;
            println!("{}", output::format_demo(&report, cli.format));
        }
        Commands::Stress { threads, keys } => {
            let threads = threads.unwrap_or(config.threads);
            let keys = keys.unwrap_or(config.keys_per_thread);
            if !cli.quiet {
                eprintln!("Inserting {keys} keys from each of {threads} threads...");
            }
            let report = commands::run_stress(threads, keys)
                .with_context(|| format!("stress run with {threads} threads failed"))?;
            println!("{}", output::format_stress(&report, cli.format));
        }
        Commands::Put { entries } => {
            let contents = commands::run_put(&entries).context("put failed")?;
            println!("{}", output::format_contents(&contents, cli.format));
        }
        Commands::Render => {
            let cache = SharedCache::instance();
            if !cli.quiet && cache.is_empty() {
                eprintln!("Cache is empty; each invocation starts a new process.");
            }
            let contents = cache.snapshot();
            println!("{}", output::format_contents(&contents, cli.format));
        }
    }

    tracing::debug!(
        constructions = SharedCache::constructions(),
        "Shared cache done"
    );
    Ok(())
}
