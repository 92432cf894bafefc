//! SQLite connection pool, migrations and health checks

use sqlx::{
    migrate::Migrator,
    sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions},
};
use std::{str::FromStr, time::Duration};
use thiserror::Error;

use crate::config::DatabaseConfig;

/// Embedded schema migrations from `migrations/`
pub static MIGRATOR: Migrator = sqlx::migrate!();

/// How long a connection waits on a locked database before failing.
const BUSY_TIMEOUT_SECS: u64 = 5;

#[derive(Error, Debug)]
pub enum DbError {
    #[error("Database query failed: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("Database migration failed: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),

    #[error("Database configuration error: {0}. Check DATABASE_URL and connection settings.")]
    Config(String),
}

pub type DbResult<T> = Result<T, DbError>;

fn connect_options(url: &str) -> DbResult<SqliteConnectOptions> {
    let options = SqliteConnectOptions::from_str(url)
        .map_err(|e| DbError::Config(format!("invalid database url '{}': {}", url, e)))?
        .create_if_missing(true)
        .foreign_keys(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(Duration::from_secs(BUSY_TIMEOUT_SECS));

    Ok(options)
}

pub async fn create_pool(config: &DatabaseConfig) -> DbResult<SqlitePool> {
    let pool = SqlitePoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(Duration::from_secs(config.connect_timeout_secs))
        .idle_timeout(Duration::from_secs(config.idle_timeout_secs))
        .connect_with(connect_options(&config.url)?)
        .await?;

    tracing::info!(
        max_connections = config.max_connections,
        min_connections = config.min_connections,
        "Database connection pool created"
    );

    Ok(pool)
}

/// Create missing tables. Safe to run on every start.
pub async fn run_migrations(pool: &SqlitePool) -> DbResult<()> {
    MIGRATOR.run(pool).await?;
    tracing::info!("Database migrations completed");
    Ok(())
}

pub async fn health_check(pool: &SqlitePool) -> DbResult<()> {
    sqlx::query("SELECT 1")
        .execute(pool)
        .await
        .map(|_| ())
        .map_err(DbError::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn memory_config() -> DatabaseConfig {
        DatabaseConfig {
            url: "sqlite::memory:".to_string(),
            max_connections: 1,
            min_connections: 1,
            connect_timeout_secs: 5,
            idle_timeout_secs: 600,
        }
    }

    #[test]
    fn test_connect_options_rejects_foreign_scheme() {
        assert!(matches!(
            connect_options("postgresql://localhost/smartforce"),
            Err(DbError::Config(_))
        ));
    }

    #[tokio::test]
    async fn test_pool_migrates_and_answers_health_check() {
        let pool = create_pool(&memory_config()).await.unwrap();
        run_migrations(&pool).await.unwrap();
        // Second run is a no-op.
        run_migrations(&pool).await.unwrap();

        health_check(&pool).await.unwrap();

        let tables: Vec<String> = sqlx::query_scalar(
            "SELECT name FROM sqlite_master WHERE type = 'table' AND name NOT LIKE '\\_%' ESCAPE '\\' ORDER BY name",
        )
        .fetch_all(&pool)
        .await
        .unwrap();

        for expected in [
            "exercises",
            "professors",
            "training_exercises",
            "training_registrations",
            "trainings",
            "users",
        ] {
            assert!(tables.iter().any(|t| t == expected), "missing table {}", expected);
        }
    }

    #[tokio::test]
    async fn test_foreign_keys_are_enforced() {
        let pool = create_pool(&memory_config()).await.unwrap();
        run_migrations(&pool).await.unwrap();

        let result = sqlx::query(
            "INSERT INTO trainings (name, user_id, professor_id, created_at, updated_at)
             VALUES ('Orphan', 99, 99, '2026-01-01T00:00:00Z', '2026-01-01T00:00:00Z')",
        )
        .execute(&pool)
        .await;

        let err = result.unwrap_err();
        let db_err = err.as_database_error().unwrap();
        assert!(db_err.is_foreign_key_violation());
    }
}
