//! Orders Error Types

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Orders-specific result type alias
pub type OrdersResult<T> = Result<T, OrdersError>;

/// Orders-specific error variants
#[derive(Debug, Error)]
pub enum OrdersError {
    /// Requested record does not exist (or belongs to another account)
    #[error("{0} not found")]
    NotFound(&'static str),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl OrdersError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            OrdersError::NotFound(_) => StatusCode::NOT_FOUND,
            OrdersError::Database(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            OrdersError::NotFound(_) => ErrorKind::NotFound,
            OrdersError::Database(_) => ErrorKind::ServiceUnavailable,
        }
    }
}

impl From<OrdersError> for AppError {
    fn from(err: OrdersError) -> Self {
        let kind = err.kind();
        let message = err.to_string();
        AppError::new(kind, message)
    }
}

impl IntoResponse for OrdersError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let body = if status.is_server_error() {
            tracing::error!(error = %self, "Orders database error");
            serde_json::json!({ "detail": self.kind().as_str() })
        } else {
            serde_json::json!({ "detail": self.to_string() })
        };

        (status, Json(body)).into_response()
    }
}
