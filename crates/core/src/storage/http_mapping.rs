//! Pure functions for mapping repository errors to HTTP responses.

use super::RepositoryError;

/// Maps a [`RepositoryError`] to an HTTP status code.
///
/// - `Validation` -> 400 (Bad Request)
/// - `NotFound` -> 404 (Not Found)
/// - `ConstraintViolation` -> 500 (Internal Server Error)
/// - `ConnectionFailed` -> 503 (Service Unavailable)
/// - `QueryFailed` -> 500 (Internal Server Error)
/// - `Decode` -> 500 (Internal Server Error)
///
/// # Examples
///
/// ```
/// use roster_core::storage::{RepositoryError, repository_error_to_status_code};
///
/// let error = RepositoryError::not_found("User", 42);
/// assert_eq!(repository_error_to_status_code(&error), 404);
/// ```
pub fn repository_error_to_status_code(error: &RepositoryError) -> u16 {
    match error {
        RepositoryError::Validation(_) => 400,
        RepositoryError::NotFound { .. } => 404,
        RepositoryError::ConstraintViolation { .. } => 500,
        RepositoryError::ConnectionFailed(_) => 503,
        RepositoryError::QueryFailed(_) => 500,
        RepositoryError::Decode(_) => 500,
    }
}

/// Stable machine-readable name for the error, used as the `error` field
/// of JSON error bodies.
pub fn repository_error_kind(error: &RepositoryError) -> &'static str {
    match error {
        RepositoryError::Validation(_) => "validation_error",
        RepositoryError::NotFound { .. } => "not_found",
        RepositoryError::ConstraintViolation { .. } => "constraint_violation",
        RepositoryError::ConnectionFailed(_) => "store_unavailable",
        RepositoryError::QueryFailed(_) | RepositoryError::Decode(_) => "internal_error",
    }
}
