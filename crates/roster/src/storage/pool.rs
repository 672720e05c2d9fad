//! Database connection pool management.
//!
//! The pool is built once by the composition root and handed to every
//! record access implementation. It is the only shared mutable resource:
//! checkouts beyond `max_connections` wait until a connection is returned.

use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;

use crate::config::Config;

use super::schema;

/// Create a SQLite connection pool from configuration.
///
/// The database file is created if missing and foreign keys are enforced on
/// every connection, so deleting a user cascades to its profile.
pub async fn create_pool(config: &Config) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(&config.database_url)?
        .create_if_missing(true)
        .foreign_keys(true);

    SqlitePoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(config.acquire_timeout())
        .connect_with(options)
        .await
}

/// Create the tables if they do not exist yet.
pub async fn migrate(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query(schema::CREATE_TABLES).execute(pool).await?;
    Ok(())
}

/// Single-connection in-memory pool with the schema applied.
///
/// One connection means every checkout sees the same database, and a held
/// checkout starves every other caller.
#[cfg(test)]
pub async fn memory_pool() -> SqlitePool {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")
        .expect("valid in-memory url")
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await
        .expect("in-memory pool");

    migrate(&pool).await.expect("schema applied");
    pool
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn pool_acquires_connection() {
        let pool = memory_pool().await;

        let result: (i64,) = sqlx::query_as("SELECT 1")
            .fetch_one(&pool)
            .await
            .expect("query failed");

        assert_eq!(result.0, 1);
    }

    #[tokio::test]
    async fn migrate_is_idempotent() {
        let pool = memory_pool().await;

        migrate(&pool).await.expect("second migration");

        let tables: Vec<(String,)> = sqlx::query_as(
            "SELECT name FROM sqlite_master WHERE type = 'table' AND name IN ('users', 'profiles') ORDER BY name",
        )
        .fetch_all(&pool)
        .await
        .unwrap();
        assert_eq!(tables, vec![("profiles".to_string(),), ("users".to_string(),)]);
    }

    #[tokio::test]
    async fn checkout_beyond_bound_waits_for_release() {
        let pool = memory_pool().await;
        let held = pool.acquire().await.unwrap();

        let mut waiter = {
            let pool = pool.clone();
            tokio::spawn(async move {
                let result: (i64,) = sqlx::query_as("SELECT 2").fetch_one(&pool).await?;
                Ok::<_, sqlx::Error>(result.0)
            })
        };

        // Still blocked while the only connection is checked out
        let early = tokio::time::timeout(Duration::from_millis(100), &mut waiter).await;
        assert!(early.is_err());

        drop(held);

        let value = waiter.await.expect("task panicked").expect("query failed");
        assert_eq!(value, 2);
    }

    #[tokio::test]
    async fn create_pool_from_config() {
        let config = Config {
            database_url: "sqlite::memory:".to_string(),
            max_connections: 3,
            acquire_timeout_seconds: 5,
            page_size: roster_core::query::PageSize::DEFAULT,
        };

        let pool = create_pool(&config).await.expect("pool creation failed");

        assert_eq!(pool.options().get_max_connections(), 3);
    }
}
