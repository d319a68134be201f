//! Application error types

use serde::Serialize;
use thiserror::Error;

/// Application-wide error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Decode error at {path}: {reason}")]
    Decode { path: String, reason: String },

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Server returned status {0}")]
    Api(u16),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Decode failure at a JSON path
    pub fn decode(path: impl Into<String>, reason: impl Into<String>) -> Self {
        AppError::Decode {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

/// Serializable error response for the UI layer
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
}

impl From<AppError> for ErrorResponse {
    fn from(err: AppError) -> Self {
        let (code, message) = match &err {
            AppError::Database(_) => ("DATABASE_ERROR", err.to_string()),
            AppError::Serialization(_) => ("SERIALIZATION_ERROR", err.to_string()),
            AppError::Http(_) => ("HTTP_ERROR", err.to_string()),
            AppError::Decode { .. } => ("DECODE_ERROR", err.to_string()),
            AppError::Parse(_) => ("PARSE_ERROR", err.to_string()),
            AppError::Api(_) => ("API_ERROR", err.to_string()),
            AppError::NotFound(_) => ("NOT_FOUND", err.to_string()),
            AppError::Io(_) => ("IO_ERROR", err.to_string()),
            AppError::Internal(_) => ("INTERNAL_ERROR", err.to_string()),
        };

        ErrorResponse {
            code: code.to_string(),
            message,
        }
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
