use axum::http::StatusCode;

/// Common trait for the application's error types.
pub trait AppError: std::error::Error + Send + Sync + 'static {
    /// HTTP status code for this error
    fn status_code(&self) -> StatusCode;

    /// User-facing error message
    fn user_message(&self) -> String;

    /// Stable error code for client handling
    fn error_code(&self) -> &'static str;
}

/// Implements IntoResponse for an AppError type with the shared
/// `{error, code, status}` JSON body.
macro_rules! impl_into_response {
    ($error_type:ty) => {
        impl axum::response::IntoResponse for $error_type {
            fn into_response(self) -> axum::response::Response {
                use crate::errors::AppError;
                use axum::response::Json;
                use serde_json::json;

                let status = self.status_code();
                let body = Json(json!({
                    "error": self.user_message(),
                    "code": self.error_code(),
                    "status": status.as_u16()
                }));

                (status, body).into_response()
            }
        }
    };
}

pub(crate) use impl_into_response;

pub mod document;
