use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, services::ServeDir};
use tracing::info;

use doctrack::{config::Config, db::Database, vision::VisionClient, AppState};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let config = Config::from_env()?;
    let db = Database::new(&config.database_url).await?;

    info!("Running database migrations");
    db.migrate().await?;

    let vision = VisionClient::from_config(&config);
    if vision.is_none() {
        info!("No VISION_API_KEY configured; image text recognition disabled");
    }

    let upload_path = config.upload_path.clone();
    tokio::fs::create_dir_all(&upload_path).await?;

    let state = Arc::new(AppState {
        store: Arc::new(db),
        config: config.clone(),
        vision,
    });

    let app = Router::new()
        .route("/", get(doctrack::routes::banner))
        .route("/health", get(doctrack::health_check))
        .nest("/documents", doctrack::routes::documents::router())
        .merge(doctrack::swagger::create_swagger_router())
        .nest_service("/uploads", ServeDir::new(upload_path))
        .layer(CorsLayer::permissive())
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(&config.server_address).await?;
    info!("Server starting on {}", config.server_address);

    axum::serve(listener, app).await?;

    Ok(())
}
