use shared::error::{ApiError, ErrorCode};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BackendError {
    #[error("invalid backend url '{url}': {source}")]
    InvalidUrl {
        url: String,
        source: url::ParseError,
    },
    #[error("backend request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("backend returned {status}: {message}")]
    Http { status: u16, message: String },
    #[error("failed to decode backend response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("{0} not found")]
    NotFound(String),
    #[error("refusing to {0} without a row filter")]
    MissingFilter(&'static str),
}

impl BackendError {
    pub fn status(&self) -> Option<u16> {
        match self {
            BackendError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<BackendError> for ApiError {
    fn from(value: BackendError) -> Self {
        let code = match &value {
            BackendError::Http { status: 401, .. } => ErrorCode::Unauthorized,
            BackendError::Http { status: 403, .. } => ErrorCode::Forbidden,
            BackendError::Http { status: 400 | 409 | 422, .. } => ErrorCode::Validation,
            BackendError::Http { .. } | BackendError::Transport(_) => ErrorCode::Upstream,
            BackendError::NotFound(_) => ErrorCode::NotFound,
            BackendError::MissingFilter(_) => ErrorCode::Validation,
            BackendError::InvalidUrl { .. } | BackendError::Decode(_) => ErrorCode::Internal,
        };
        let message = match value {
            BackendError::Http { message, .. } => message,
            other => other.to_string(),
        };
        ApiError::new(code, message)
    }
}
