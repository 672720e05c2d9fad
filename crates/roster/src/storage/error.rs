//! Driver error mapping.
//!
//! Maps `sqlx::Error` and `sea_query` errors to `RepositoryError` from
//! `roster_core::storage`, so both record access implementations report
//! failures with the same taxonomy.

use roster_core::storage::{ConstraintKind, RepositoryError};
use sqlx::error::ErrorKind;

/// Maps a sqlx error to a RepositoryError.
///
/// # Error Mapping
///
/// - UNIQUE / FOREIGN KEY / NOT NULL / CHECK failures → `ConstraintViolation`
/// - Pool and I/O failures → `ConnectionFailed`
/// - Column decoding failures → `Decode`
/// - `RowNotFound` → `NotFound`
/// - All other errors → `QueryFailed`
pub fn map_sqlx_error(err: sqlx::Error, entity_type: &'static str) -> RepositoryError {
    map_sqlx_error_with_id(err, entity_type, "unknown")
}

/// Maps a sqlx error with a known ID to a RepositoryError.
pub fn map_sqlx_error_with_id(
    err: sqlx::Error,
    entity_type: &'static str,
    id: impl ToString,
) -> RepositoryError {
    match err {
        sqlx::Error::Database(db_err) => {
            let kind = match db_err.kind() {
                ErrorKind::UniqueViolation => Some(ConstraintKind::Unique),
                ErrorKind::ForeignKeyViolation => Some(ConstraintKind::ForeignKey),
                ErrorKind::NotNullViolation => Some(ConstraintKind::NotNull),
                ErrorKind::CheckViolation => Some(ConstraintKind::Check),
                _ => None,
            };
            match kind {
                Some(kind) => RepositoryError::ConstraintViolation {
                    entity_type,
                    kind,
                    detail: db_err.message().to_string(),
                },
                None => RepositoryError::QueryFailed(db_err.to_string()),
            }
        }

        sqlx::Error::RowNotFound => RepositoryError::not_found(entity_type, id),

        sqlx::Error::PoolTimedOut
        | sqlx::Error::PoolClosed
        | sqlx::Error::WorkerCrashed
        | sqlx::Error::Io(_)
        | sqlx::Error::Tls(_)
        | sqlx::Error::Protocol(_) => RepositoryError::ConnectionFailed(err.to_string()),

        sqlx::Error::ColumnDecode { .. }
        | sqlx::Error::Decode(_)
        | sqlx::Error::ColumnNotFound(_)
        | sqlx::Error::ColumnIndexOutOfBounds { .. }
        | sqlx::Error::TypeNotFound { .. } => RepositoryError::Decode(err.to_string()),

        _ => RepositoryError::QueryFailed(err.to_string()),
    }
}

/// Maps a statement construction error from the mapped layer.
pub fn map_sea_query_error(err: sea_query::error::Error) -> RepositoryError {
    RepositoryError::QueryFailed(err.to_string())
}

/// Converts a stored age to the domain type, rejecting out-of-range values.
pub fn decode_age(age: i64) -> Result<u32, RepositoryError> {
    u32::try_from(age).map_err(|_| RepositoryError::Decode(format!("age out of range: {age}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::pool::memory_pool;

    #[test]
    fn test_row_not_found_maps_to_not_found_with_id() {
        let result = map_sqlx_error_with_id(sqlx::Error::RowNotFound, "User", 42);

        assert_eq!(result, RepositoryError::not_found("User", 42));
    }

    #[test]
    fn test_pool_timeout_maps_to_connection_failed() {
        let result = map_sqlx_error(sqlx::Error::PoolTimedOut, "User");

        assert!(matches!(result, RepositoryError::ConnectionFailed(_)));
    }

    #[test]
    fn test_column_not_found_maps_to_decode() {
        let result = map_sqlx_error(sqlx::Error::ColumnNotFound("age".to_string()), "User");

        assert!(matches!(result, RepositoryError::Decode(_)));
    }

    #[test]
    fn test_decode_age() {
        assert_eq!(decode_age(30), Ok(30));
        assert!(matches!(decode_age(-1), Err(RepositoryError::Decode(_))));
        assert!(matches!(
            decode_age(i64::from(u32::MAX) + 1),
            Err(RepositoryError::Decode(_))
        ));
    }

    #[tokio::test]
    async fn test_unique_constraint_maps_to_constraint_violation() {
        let pool = memory_pool().await;
        sqlx::query("INSERT INTO users (name, age) VALUES ('Alice', 25)")
            .execute(&pool)
            .await
            .unwrap();

        let err = sqlx::query("INSERT INTO users (name, age) VALUES ('Alice', 30)")
            .execute(&pool)
            .await
            .unwrap_err();

        match map_sqlx_error(err, "User") {
            RepositoryError::ConstraintViolation {
                entity_type,
                kind,
                detail,
            } => {
                assert_eq!(entity_type, "User");
                assert_eq!(kind, ConstraintKind::Unique);
                assert!(detail.contains("users.name"));
            }
            other => panic!("Expected ConstraintViolation, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_foreign_key_maps_to_constraint_violation() {
        let pool = memory_pool().await;

        let err = sqlx::query("INSERT INTO profiles (user_id, bio) VALUES (999, 'orphan')")
            .execute(&pool)
            .await
            .unwrap_err();

        assert!(matches!(
            map_sqlx_error(err, "Profile"),
            RepositoryError::ConstraintViolation {
                kind: ConstraintKind::ForeignKey,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_check_constraint_maps_to_constraint_violation() {
        let pool = memory_pool().await;

        let err = sqlx::query("INSERT INTO users (name, age) VALUES ('Neg', -1)")
            .execute(&pool)
            .await
            .unwrap_err();

        assert!(matches!(
            map_sqlx_error(err, "User"),
            RepositoryError::ConstraintViolation {
                kind: ConstraintKind::Check,
                ..
            }
        ));
    }
}
