use axum::http::StatusCode;
use thiserror::Error;

use super::{impl_into_response, AppError};

#[derive(Error, Debug)]
pub enum DocumentError {
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("unsupported image type: {detected}")]
    UnsupportedImageType { detected: String },

    #[error("malformed request body: {message}")]
    InvalidBody { message: String },

    #[error("document not found")]
    NotFound,

    #[error("storage error: {0}")]
    Storage(#[from] anyhow::Error),
}

impl AppError for DocumentError {
    fn status_code(&self) -> StatusCode {
        match self {
            DocumentError::MissingField { .. } => StatusCode::BAD_REQUEST,
            DocumentError::UnsupportedImageType { .. } => StatusCode::BAD_REQUEST,
            DocumentError::InvalidBody { .. } => StatusCode::BAD_REQUEST,
            DocumentError::NotFound => StatusCode::NOT_FOUND,
            DocumentError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn user_message(&self) -> String {
        match self {
            DocumentError::MissingField { field } => {
                format!("Field \"{}\" is required and must not be empty", field)
            }
            DocumentError::UnsupportedImageType { detected } => format!(
                "Unsupported image type \"{}\"; allowed types are JPEG, PNG and GIF",
                detected
            ),
            DocumentError::InvalidBody { message } => message.clone(),
            DocumentError::NotFound => "Document not found".to_string(),
            DocumentError::Storage(err) => format!("Failed to access document store: {}", err),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            DocumentError::MissingField { .. } => "MISSING_FIELD",
            DocumentError::UnsupportedImageType { .. } => "UNSUPPORTED_IMAGE_TYPE",
            DocumentError::InvalidBody { .. } => "INVALID_BODY",
            DocumentError::NotFound => "NOT_FOUND",
            DocumentError::Storage(_) => "STORAGE_ERROR",
        }
    }
}

impl_into_response!(DocumentError);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_follow_error_kind() {
        assert_eq!(
            DocumentError::MissingField { field: "title" }.status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(DocumentError::NotFound.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            DocumentError::Storage(anyhow::anyhow!("pool exhausted")).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn missing_field_message_names_the_field() {
        let msg = DocumentError::MissingField { field: "responsible" }.user_message();
        assert!(msg.contains("responsible"));
    }

    #[test]
    fn storage_message_surfaces_underlying_error() {
        let msg = DocumentError::Storage(anyhow::anyhow!("connection refused")).user_message();
        assert!(msg.contains("connection refused"));
    }
}
