//! Transaction completion shared by both record access implementations.

use roster_core::storage::Result;
use sqlx::{Sqlite, Transaction};

use super::error::map_sqlx_error;

/// Commits when `result` is `Ok`, rolls back otherwise.
///
/// The original error is returned even when the rollback itself fails; the
/// rollback failure is only logged.
pub async fn finish<T>(
    tx: Transaction<'_, Sqlite>,
    result: Result<T>,
    entity_type: &'static str,
) -> Result<T> {
    match result {
        Ok(value) => {
            tx.commit()
                .await
                .map_err(|e| map_sqlx_error(e, entity_type))?;
            Ok(value)
        }
        Err(err) => {
            if let Err(rollback_err) = tx.rollback().await {
                tracing::warn!(error = %rollback_err, entity_type, "Rollback failed");
            }
            Err(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::pool::memory_pool;
    use roster_core::storage::RepositoryError;

    async fn count_users(pool: &sqlx::SqlitePool) -> i64 {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users")
            .fetch_one(pool)
            .await
            .unwrap();
        count
    }

    #[tokio::test]
    async fn test_finish_commits_on_ok() {
        let pool = memory_pool().await;
        let mut tx = pool.begin().await.unwrap();
        sqlx::query("INSERT INTO users (name, age) VALUES ('Alice', 25)")
            .execute(&mut *tx)
            .await
            .unwrap();

        finish(tx, Ok(()), "User").await.unwrap();

        assert_eq!(count_users(&pool).await, 1);
    }

    #[tokio::test]
    async fn test_finish_rolls_back_on_err() {
        let pool = memory_pool().await;
        let mut tx = pool.begin().await.unwrap();
        sqlx::query("INSERT INTO users (name, age) VALUES ('Alice', 25)")
            .execute(&mut *tx)
            .await
            .unwrap();

        let result: Result<()> = Err(RepositoryError::QueryFailed("boom".to_string()));
        let err = finish(tx, result, "User").await.unwrap_err();

        assert_eq!(err, RepositoryError::QueryFailed("boom".to_string()));
        assert_eq!(count_users(&pool).await, 0);
    }
}
