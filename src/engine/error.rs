use axum::http::StatusCode;
use thiserror::Error;

/// Errors reported by the page engine and store operations.
///
/// The three caller-visible kinds (validation, invalid theme, not found)
/// map to distinct HTTP statuses; storage failures collapse into a
/// generic 500 without leaking paths to the client.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Brand name and theme are required")]
    MissingRequiredFields,

    #[error("Invalid theme")]
    InvalidTheme(String),

    #[error("Page not found")]
    PageNotFound(String),

    #[error("Theme not found")]
    ThemeNotFound(String),

    #[error("Storage error: {0}")]
    Storage(#[from] std::io::Error),

    #[error("Corrupt store data: {0}")]
    Corrupt(#[from] serde_json::Error),
}

impl EngineError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            EngineError::MissingRequiredFields | EngineError::InvalidTheme(_) => {
                StatusCode::BAD_REQUEST
            }
            EngineError::PageNotFound(_) | EngineError::ThemeNotFound(_) => StatusCode::NOT_FOUND,
            EngineError::Storage(_) | EngineError::Corrupt(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}
