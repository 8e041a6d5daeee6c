/// Error types for the vidshare API
///
/// Every failure surfaces to clients as the structured envelope
/// `{status, message, errors}` with a stable numeric status. Database and
/// storage failures are logged server-side and redacted in the response.
use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};

/// Result type for vidshare operations
pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Missing or malformed required input
    #[error("{0}")]
    BadRequest(String),

    /// Acting user could not be resolved
    #[error("{0}")]
    Unauthorized(String),

    /// Authenticated but not the resource owner
    #[error("{0}")]
    Forbidden(String),

    /// Referenced entity does not exist
    #[error("{0}")]
    NotFound(String),

    /// Duplicate resource (unique constraint backstop)
    #[error("{0}")]
    Conflict(String),

    /// Data-store call failed
    #[error("database error: {0}")]
    Database(sqlx::Error),

    /// Object-storage call failed
    #[error("storage error: {0}")]
    Storage(String),

    /// Anything else
    #[error("{0}")]
    Internal(String),
}

impl AppError {
    /// Message safe to put in the response body. 500-class details stay in
    /// the logs.
    fn public_message(&self) -> String {
        match self {
            AppError::Database(_) => "database operation failed".to_string(),
            AppError::Storage(_) => "storage operation failed".to_string(),
            AppError::Internal(_) => "internal server error".to_string(),
            other => other.to_string(),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Database(_) | AppError::Storage(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();

        if status.is_server_error() {
            tracing::error!("request failed: {}", self);
        }

        HttpResponse::build(status).json(serde_json::json!({
            "status": status.as_u16(),
            "message": self.public_message(),
            "errors": [],
        }))
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        // Unique-constraint violations are client-visible conflicts, not
        // server faults.
        if let sqlx::Error::Database(db_err) = &err {
            if db_err.code().as_deref() == Some("23505") {
                return AppError::Conflict("resource already exists".to_string());
            }
        }
        AppError::Database(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_follow_the_taxonomy() {
        assert_eq!(
            AppError::BadRequest("x".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::Unauthorized("x".into()).status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AppError::Forbidden("x".into()).status_code(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            AppError::NotFound("x".into()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::Conflict("x".into()).status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            AppError::Storage("x".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            AppError::Internal("x".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn server_errors_are_redacted() {
        let err = AppError::Storage("bucket exploded at s3://secret".into());
        assert_eq!(err.public_message(), "storage operation failed");

        let err = AppError::NotFound("video not found".into());
        assert_eq!(err.public_message(), "video not found");
    }

    #[test]
    fn row_not_found_maps_to_database_error() {
        let err: AppError = sqlx::Error::RowNotFound.into();
        assert!(matches!(err, AppError::Database(_)));
    }
}
