//! monowatch - Monobank statement monitor
//!
//! Polls today's statement, pushes new transactions to a Telegram chat and
//! answers balance, rates and statement queries from allow-listed users.

mod config;

use clap::Parser;
use config::{AppConfig, ConfigError};
use monowatch_alerts::{CommandDispatcher, Notifier, NotifierConfig, TelegramBot};
use monowatch_feeds::{BankConfig, BankFeed, FeedError, MonobankClient};
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;
use tracing::{error, info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// monowatch CLI
#[derive(Parser, Debug)]
#[command(name = "monowatch")]
#[command(about = "Monobank statement notifications over Telegram", long_about = None)]
struct Args {
    /// Log level: trace, debug, info, warn, error
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Append-only activity log
    #[arg(long, default_value = "activity.log")]
    log_file: PathBuf,

    /// Monobank API base URL
    #[arg(long, default_value = BankConfig::DEFAULT_API_BASE)]
    api_base: String,
}

#[derive(Error, Debug)]
enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("Failed to build bank client: {0}")]
    Feed(#[from] FeedError),
}

/// Log to stdout and to the activity file. The returned guard flushes the file writer on drop.
fn init_logging(level: &str, log_file: &Path) -> std::io::Result<WorkerGuard> {
    let file = OpenOptions::new().create(true).append(true).open(log_file)?;
    let (file_writer, guard) = tracing_appender::non_blocking(file);

    let filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("info"));

    let stdout_layer = fmt::layer()
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact();

    let file_layer = fmt::layer()
        .with_writer(file_writer)
        .with_ansi(false)
        .with_target(false);

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(stdout_layer)
        .with(file_layer)
        .try_init();

    Ok(guard)
}

async fn run(args: Args) -> Result<(), StartupError> {
    let config = AppConfig::from_env()?;
    let guard = config.access_guard();
    info!(
        account = %config.account,
        chat_id = config.chat_id,
        allowed_users = guard.len(),
        api_base = %args.api_base,
        "Configuration loaded"
    );

    let bank = BankConfig::new(config.monobank_token.clone()).with_api_base(args.api_base);
    let feed: Arc<dyn BankFeed> = Arc::new(MonobankClient::new(bank)?);

    let dispatcher = CommandDispatcher::new(feed.clone(), guard, config.account.clone());
    let bot = Arc::new(TelegramBot::new(&config.telegram_token, config.chat_id, dispatcher));

    let notifier = Notifier::new(feed, bot.clone(), config.account.clone(), NotifierConfig::default());
    let notifier_handle = tokio::spawn(notifier.run());

    info!("Press Ctrl+C to stop...");
    bot.run().await;

    warn!("Shutdown signal received");
    notifier_handle.abort();
    Ok(())
}

#[tokio::main]
async fn main() {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    let args = Args::parse();

    let log_guard = match init_logging(&args.log_level, &args.log_file) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to open log file {}: {}", args.log_file.display(), e);
            std::process::exit(1);
        }
    };

    info!("🚀 monowatch starting...");

    if let Err(e) = run(args).await {
        error!(error = %e, "Startup failed");
        drop(log_guard);
        std::process::exit(1);
    }

    info!("👋 monowatch stopped");
}
