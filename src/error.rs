use axum::{Json, http::StatusCode, response::IntoResponse};
use serde::{Deserialize, Serialize};
use sqlx::Error as SqlxError;
use thiserror::Error as ThisError;
use tracing::error;

pub const SAVE_FAILED_MESSAGE: &str =
    "Не удалось сохранить тренировку. Проверьте подключение к интернету.";

#[derive(Debug, ThisError)]
pub enum LiftError {
    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("HTTP request error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Database error: {0}")]
    DatabaseError(#[from] SqlxError),

    #[error("Ractor error: {0}")]
    RactorError(String),

    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),

    #[error("Exercise with this name already exists")]
    DuplicateExercise,

    #[error("Invalid credentials")]
    Unauthorized,

    #[error("Cloud storage not available")]
    CloudUnavailable,

    #[error("Cloud storage {op} timeout")]
    CloudTimeout { op: &'static str },

    #[error("Cloud storage error: {0}")]
    Cloud(String),

    #[error("API call failed ({status}): {message}")]
    Api { status: StatusCode, message: String },

    #[error("{}", SAVE_FAILED_MESSAGE)]
    SaveFailed,
}

impl LiftError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest(message.into())
    }

    /// Failures of the cloud bridge that justify retrying through the API.
    pub fn is_cloud_failure(&self) -> bool {
        matches!(
            self,
            LiftError::CloudUnavailable | LiftError::CloudTimeout { .. } | LiftError::Cloud(_)
        )
    }
}

impl IntoResponse for LiftError {
    fn into_response(self) -> axum::response::Response {
        let (status, code, message) = match &self {
            LiftError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            LiftError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            LiftError::DuplicateExercise => {
                (StatusCode::CONFLICT, "CONFLICT", self.to_string())
            }
            LiftError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                "UNAUTHORIZED",
                self.to_string(),
            ),
            LiftError::CloudUnavailable
            | LiftError::CloudTimeout { .. }
            | LiftError::Cloud(_)
            | LiftError::Api { .. }
            | LiftError::Reqwest(_)
            | LiftError::SaveFailed => {
                error!(error = %self, "upstream storage failure");
                (
                    StatusCode::BAD_GATEWAY,
                    "BAD_GATEWAY",
                    "Upstream storage is unavailable.".to_string(),
                )
            }
            LiftError::DatabaseError(_)
            | LiftError::RactorError(_)
            | LiftError::Json(_)
            | LiftError::Io(_)
            | LiftError::UrlParse(_) => {
                error!(error = %self, "request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred.".to_string(),
                )
            }
        };
        let body = ApiErrorResponse {
            error: ApiErrorBody {
                code: code.to_string(),
                message,
            },
        };
        (status, Json(body)).into_response()
    }
}

/// Standardized API error response body
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiErrorBody {
    pub code: String,
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    pub error: ApiErrorBody,
}
