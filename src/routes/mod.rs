pub mod documents;

/// Plain-text landing banner.
pub async fn banner() -> &'static str {
    "Welcome to the documentation and error-resolution tracking system!"
}
