//! Catalog Error Types

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Catalog-specific result type alias
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Catalog-specific error variants
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Field-level validation failure
    #[error("{message}")]
    Validation {
        field: &'static str,
        message: String,
    },

    /// Authenticated account lacks the admin role
    #[error("You do not have permission to perform this action")]
    AdminOnly,

    /// Requested record does not exist
    #[error("{0} not found")]
    NotFound(&'static str),

    /// Cart items payload could not be (de)serialized
    #[error("Cart payload error: {0}")]
    Payload(#[from] serde_json::Error),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl CatalogError {
    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        CatalogError::Validation {
            field,
            message: message.into(),
        }
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            CatalogError::Validation { .. } => StatusCode::BAD_REQUEST,
            CatalogError::AdminOnly => StatusCode::FORBIDDEN,
            CatalogError::NotFound(_) => StatusCode::NOT_FOUND,
            CatalogError::Payload(_) => StatusCode::INTERNAL_SERVER_ERROR,
            CatalogError::Database(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            CatalogError::Validation { .. } => ErrorKind::BadRequest,
            CatalogError::AdminOnly => ErrorKind::Forbidden,
            CatalogError::NotFound(_) => ErrorKind::NotFound,
            CatalogError::Payload(_) => ErrorKind::InternalServerError,
            CatalogError::Database(_) => ErrorKind::ServiceUnavailable,
        }
    }

    fn log(&self) {
        match self {
            CatalogError::Database(e) => {
                tracing::error!(error = %e, "Catalog database error");
            }
            CatalogError::Payload(e) => {
                tracing::error!(error = %e, "Cart payload error");
            }
            _ => {
                tracing::debug!(error = %self, "Catalog error");
            }
        }
    }
}

impl From<CatalogError> for AppError {
    fn from(err: CatalogError) -> Self {
        let kind = err.kind();
        let message = err.to_string();
        AppError::new(kind, message)
    }
}

impl IntoResponse for CatalogError {
    fn into_response(self) -> Response {
        self.log();
        let status = self.status_code();

        let body = if status.is_server_error() {
            serde_json::json!({ "detail": self.kind().as_str() })
        } else {
            match self {
                CatalogError::Validation { field, ref message } => serde_json::json!({
                    "errors": { field: [message] }
                }),
                _ => serde_json::json!({ "detail": self.to_string() }),
            }
        };

        (status, Json(body)).into_response()
    }
}
