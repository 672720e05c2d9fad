use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use roster_core::storage::{repository_error_kind, repository_error_to_status_code, RepositoryError};
use roster_core::ValidationError;

/// Handler error.
///
/// Repository and validation errors keep their status and kind; anything
/// else is an internal error.
pub struct AppError(pub anyhow::Error);

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: &'static str,
    message: String,
}

impl AppError {
    fn status_and_kind(&self) -> (StatusCode, &'static str) {
        if let Some(repo_error) = self.0.downcast_ref::<RepositoryError>() {
            let code = repository_error_to_status_code(repo_error);
            let status = StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
            (status, repository_error_kind(repo_error))
        } else if self.0.downcast_ref::<ValidationError>().is_some() {
            (StatusCode::BAD_REQUEST, "validation_error")
        } else {
            (StatusCode::INTERNAL_SERVER_ERROR, "internal_error")
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, kind) = self.status_and_kind();
        let message = self.0.to_string();

        if status.is_server_error() {
            if status == StatusCode::SERVICE_UNAVAILABLE {
                tracing::warn!(error = %message, kind, "Store unavailable");
            } else {
                tracing::error!(error = %message, kind, "Request failed");
            }
        } else {
            tracing::debug!(error = %message, kind, status = status.as_u16(), "Request rejected");
        }

        let body = Json(ErrorBody {
            error: kind,
            message,
        });

        (status, body).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;
    use roster_core::storage::ConstraintKind;

    async fn render(error: AppError) -> (StatusCode, serde_json::Value) {
        let response = error.into_response();
        let status = response.status();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[tokio::test]
    async fn test_not_found_body() {
        let (status, body) = render(RepositoryError::not_found("User", 7).into()).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "not_found");
        assert_eq!(body["message"], "User not found: 7");
    }

    #[tokio::test]
    async fn test_validation_error_is_bad_request() {
        let (status, body) =
            render(ValidationError::InvalidPage("abc".to_string()).into()).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "validation_error");
    }

    #[tokio::test]
    async fn test_constraint_violation_names_constraint() {
        let error = RepositoryError::ConstraintViolation {
            entity_type: "User",
            kind: ConstraintKind::Unique,
            detail: "UNIQUE constraint failed: users.name".to_string(),
        };

        let (status, body) = render(error.into()).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "constraint_violation");
        assert!(body["message"]
            .as_str()
            .unwrap()
            .contains("users.name"));
    }

    #[tokio::test]
    async fn test_connection_failed_is_service_unavailable() {
        let error = RepositoryError::ConnectionFailed("pool timed out".to_string());

        let (status, body) = render(error.into()).await;

        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["error"], "store_unavailable");
    }

    #[tokio::test]
    async fn test_other_errors_are_internal() {
        let (status, body) = render(anyhow::anyhow!("boom").into()).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "internal_error");
    }
}
