use sqlx::{Pool, Postgres};
use tracing::info;

/// Apply pending migrations for the `companies` and `jobs` tables.
///
/// Already-applied migrations are tracked by sqlx, so repeated runs are no-ops.
pub async fn run_migrations(pool: &Pool<Postgres>) -> Result<(), sqlx::migrate::MigrateError> {
    info!("Running database migrations...");

    sqlx::migrate!("./migrations").run(pool).await?;

    info!("Database migrations completed successfully");
    Ok(())
}
