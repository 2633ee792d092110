//! Schema migrations embedded from the workspace `migrations/` directory.

use sqlx::PgPool;
use sqlx::migrate::Migrator;
use tracing::info;

use helpdesk_core::error::{AppError, ErrorKind};

/// The helpdesk schema. Also used by `#[sqlx::test]` to build each test
/// database.
pub static MIGRATOR: Migrator = sqlx::migrate!("../../migrations");

/// Apply every pending migration.
pub async fn run_migrations(pool: &PgPool) -> Result<(), AppError> {
    MIGRATOR.run(pool).await.map_err(|e| {
        AppError::with_source(ErrorKind::Database, "Failed to run migrations", e)
    })?;

    info!(
        migrations = MIGRATOR.iter().count(),
        "Helpdesk schema is up to date"
    );
    Ok(())
}
