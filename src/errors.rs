use axum::http::StatusCode;
use thiserror::Error;

/// Failures the tracker surfaces to its caller. Out-of-range or malformed
/// field values never show up here; normalization absorbs them.
#[derive(Debug, Error)]
pub enum TrackerError {
    #[error("import failed, check the file format: {0}")]
    ImportFormat(String),
    #[error("persistence unavailable: {0}")]
    PersistenceUnavailable(String),
}

impl From<std::io::Error> for TrackerError {
    fn from(err: std::io::Error) -> Self {
        Self::PersistenceUnavailable(err.to_string())
    }
}

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    pub fn internal(err: impl std::error::Error) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: err.to_string(),
        }
    }
}

impl From<TrackerError> for AppError {
    fn from(err: TrackerError) -> Self {
        match err {
            TrackerError::ImportFormat(_) => Self::bad_request(err.to_string()),
            TrackerError::PersistenceUnavailable(_) => Self::internal(err),
        }
    }
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        (self.status, self.message).into_response()
    }
}
