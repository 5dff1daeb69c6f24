use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A required field is absent or the body is not a JSON object.
    #[error("Invalid fields: {0}")]
    InvalidFields(String),

    /// A field is present but has the wrong JSON type.
    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Not found: {0}")]
    NotFound(String),

    /// Anything unanticipated. Only `operation` is shown to the caller.
    #[error("{operation}: {source}")]
    Failed {
        operation: &'static str,
        #[source]
        source: BoxError,
    },
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match &self {
            Self::InvalidFields(msg) | Self::InvalidFormat(msg) => {
                (StatusCode::BAD_REQUEST, msg.clone())
            }
            Self::Conflict(msg) => (StatusCode::CONFLICT, msg.clone()),
            Self::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            Self::Failed { operation, source } => {
                tracing::error!(error = %source, "{operation}");
                (StatusCode::INTERNAL_SERVER_ERROR, (*operation).to_string())
            }
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;

/// Collapse a lower-level error into [`AppError::Failed`] for the named operation.
pub trait OrFailed<T> {
    fn or_failed(self, operation: &'static str) -> AppResult<T>;
}

impl<T, E> OrFailed<T> for Result<T, E>
where
    E: Into<BoxError>,
{
    fn or_failed(self, operation: &'static str) -> AppResult<T> {
        self.map_err(|e| AppError::Failed {
            operation,
            source: e.into(),
        })
    }
}
