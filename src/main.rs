//! Helpdesk archiver.
//!
//! Archives completed tickets older than the configured retention period.

use std::sync::Arc;

use chrono::Duration;
use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt};

use helpdesk_core::config::AppConfig;
use helpdesk_core::error::AppError;
use helpdesk_core::traits::{Clock, SystemClock};
use helpdesk_database::{DatabasePool, PgTicketStore};
use helpdesk_service::LifecycleManager;

/// Archive completed helpdesk tickets
#[derive(Debug, Parser)]
#[command(name = "helpdesk-archiver", version, about, long_about = None)]
struct Args {
    /// Configuration environment (selects `config/{env}.toml`); defaults to
    /// `$HELPDESK_ENV`, then `development`
    #[arg(short, long)]
    env: Option<String>,

    /// Archive tickets completed more than this many days ago
    #[arg(long)]
    retention_days: Option<u32>,

    /// Maximum number of tickets to archive
    #[arg(long)]
    limit: Option<u32>,

    /// List the tickets that would be archived without archiving them
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    let env = args
        .env
        .clone()
        .or_else(|| std::env::var("HELPDESK_ENV").ok())
        .unwrap_or_else(|| "development".to_string());

    let config = match AppConfig::load(&env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(args, config).await {
        tracing::error!("Archiver error: {}", e);
        std::process::exit(1);
    }
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

async fn run(args: Args, config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting helpdesk archiver v{}", env!("CARGO_PKG_VERSION"));

    let db = DatabasePool::connect(&config.database).await?;
    if config.database.run_migrations {
        helpdesk_database::migration::run_migrations(db.pool()).await?;
    }

    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let store = Arc::new(PgTicketStore::new(db.pool().clone()));
    let manager = LifecycleManager::new(store, Arc::clone(&clock), config.lifecycle.clone());

    let retention_days = args.retention_days.unwrap_or(config.archive.retention_days);
    let limit = args.limit.unwrap_or(config.archive.batch_size);
    let cutoff = clock.now() - Duration::days(i64::from(retention_days));

    tracing::info!(
        cutoff = %cutoff,
        retention_days,
        limit,
        dry_run = args.dry_run,
        "Selecting completed tickets"
    );

    if args.dry_run {
        let ids = manager.find_archivable(cutoff, limit).await?;
        let ids: Vec<i64> = ids.into_iter().map(|id| id.get()).collect();
        println!("{}", serde_json::to_string_pretty(&ids)?);
    } else {
        let summary = manager.archive_completed_before(cutoff, limit).await?;
        println!("{}", serde_json::to_string_pretty(&summary)?);
    }

    db.close().await;
    Ok(())
}
