pub mod config;
pub mod db;
pub mod errors;
pub mod file_service;
pub mod mime_detection;
pub mod models;
pub mod routes;
pub mod swagger;
pub mod vision;

use std::sync::Arc;

use axum::{http::StatusCode, Json};
use config::Config;
use db::DocumentStore;
use vision::VisionClient;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn DocumentStore>,
    pub config: Config,
    pub vision: Option<VisionClient>,
}

/// Health check endpoint for monitoring
pub async fn health_check() -> Result<Json<serde_json::Value>, StatusCode> {
    Ok(Json(serde_json::json!({"status": "ok"})))
}
