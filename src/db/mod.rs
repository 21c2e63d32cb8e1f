//! SQLite storage for users and rides.

pub mod models;
pub mod repo;

use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::str::FromStr;

/// Opens the pool, creating the database file and its tables if missing.
pub async fn connect(
    database_url: &str,
    max_connections: u32,
) -> Result<SqlitePool, sqlx::Error> {
    tracing::info!("Opening SQLite database at: {}", database_url);

    let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect_with(options)
        .await?;

    repo::create_tables(&pool).await?;
    tracing::info!("Database schema ready");

    Ok(pool)
}

/// A single-connection in-memory database. Every connection to `:memory:`
/// gets its own database, so the pool must never open a second one.
#[cfg(test)]
pub(crate) async fn memory_pool() -> SqlitePool {
    let options = SqliteConnectOptions::from_str("sqlite::memory:").unwrap();
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await
        .unwrap();
    repo::create_tables(&pool).await.unwrap();
    pool
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_connect_creates_missing_file() {
        let path = std::env::temp_dir().join(format!("ride-backend-{}.db", std::process::id()));
        let _ = std::fs::remove_file(&path);
        let url = format!("sqlite://{}", path.display());

        let pool = connect(&url, 1).await.unwrap();
        assert!(path.exists());

        // Reconnecting to an existing file keeps the schema
        pool.close().await;
        let pool = connect(&url, 1).await.unwrap();
        let rides = repo::list_rides(&pool, 1, models::UserType::Rider).await.unwrap();
        assert!(rides.is_empty());

        pool.close().await;
        let _ = std::fs::remove_file(&path);
    }
}
