//! nszu-watch CLI
//!
//! One invocation = one run; scheduling is left to cron or a systemd timer.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use nszu_watch::{
    config::Config,
    error::Result,
    fetch::HttpFetcher,
    ledger::Ledger,
    notify::TelegramNotifier,
    pipeline,
};

/// nszu-watch - NSZU document archive watcher
#[derive(Parser, Debug)]
#[command(
    name = "nszu-watch",
    version,
    about = "Watches the NSZU document archive and forwards new items to Telegram"
)]
struct Cli {
    /// Path to the configuration file
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run one watch cycle: fetch, extract, filter, send, record
    Run,

    /// Drop ledger records older than the retention window
    Prune {
        /// Override the configured retention window in days
        #[arg(long)]
        days: Option<u64>,
    },

    /// Show ledger statistics
    Stats,

    /// Validate the configuration file
    Validate,
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = Config::load_or_default(&cli.config);

    match cli.command {
        Command::Run => {
            config.validate()?;

            let fetcher = HttpFetcher::new(&config.fetch)?;
            let notifier = TelegramNotifier::new(&config.telegram)?;
            let mut ledger = Ledger::load(&config.ledger.path).await;

            let report = pipeline::run_watch(&fetcher, &notifier, &mut ledger, &config).await?;

            if report.items_new == 0 {
                log::info!("No new items; nothing sent.");
            }
        }

        Command::Prune { days } => {
            let days = days.unwrap_or(config.ledger.retention_days);
            let mut ledger = Ledger::load(&config.ledger.path).await;

            let removed = ledger.prune(chrono::Duration::days(days as i64)).await?;
            log::info!(
                "Pruned {} record(s) older than {} days; {} remain",
                removed,
                days,
                ledger.len()
            );
        }

        Command::Stats => {
            let ledger = Ledger::load(&config.ledger.path).await;
            let stats = ledger.stats().await;

            log::info!("Ledger file: {}", ledger.path().display());
            log::info!("Records: {}", stats.total_records);
            log::info!("File size: {} bytes", stats.file_size_bytes);
        }

        Command::Validate => {
            log::info!("Validating configuration...");
            config.validate()?;
            log::info!("✓ Config OK");
        }
    }

    log::info!("Done!");

    Ok(())
}
