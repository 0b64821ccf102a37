use anyhow::Result;
use async_trait::async_trait;
use axum::{routing::get, Router};
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use doctrack::{
    config::Config,
    db::DocumentStore,
    models::{Document, NewDocument, UpdateDocumentRequest},
    routes,
    vision::VisionClient,
    AppState,
};

/// In-memory DocumentStore used by route tests so the suite runs without a
/// database.
#[derive(Default)]
pub struct InMemoryStore {
    inner: Mutex<Inner>,
}

#[derive(Default)]
struct Inner {
    next_id: i64,
    rows: BTreeMap<i64, Document>,
}

impl InMemoryStore {
    pub fn document_count(&self) -> usize {
        self.inner.lock().unwrap().rows.len()
    }

    pub fn document(&self, id: i64) -> Option<Document> {
        self.inner.lock().unwrap().rows.get(&id).cloned()
    }
}

#[async_trait]
impl DocumentStore for InMemoryStore {
    async fn create(&self, doc: &NewDocument) -> Result<i64> {
        let mut inner = self.inner.lock().unwrap();
        inner.next_id += 1;
        let id = inner.next_id;
        inner.rows.insert(
            id,
            Document {
                id,
                title: doc.title.clone(),
                responsible: doc.responsible.clone(),
                description: doc.description.clone(),
                image_url: doc.image_url.clone(),
                ai_analysis_text: doc.ai_analysis_text.clone(),
            },
        );
        Ok(id)
    }

    async fn get(&self, id: i64) -> Result<Option<Document>> {
        Ok(self.inner.lock().unwrap().rows.get(&id).cloned())
    }

    async fn replace(&self, id: i64, doc: &UpdateDocumentRequest) -> Result<bool> {
        let mut inner = self.inner.lock().unwrap();
        match inner.rows.get_mut(&id) {
            Some(row) => {
                row.title = doc.title.clone();
                row.responsible = doc.responsible.clone();
                row.description = doc.description.clone();
                row.image_url = doc.image_url.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: i64) -> Result<bool> {
        Ok(self.inner.lock().unwrap().rows.remove(&id).is_some())
    }
}

pub fn test_config(upload_path: &std::path::Path, vision_endpoint: Option<String>) -> Config {
    Config {
        database_url: "postgresql://unused".to_string(),
        server_address: "127.0.0.1:0".to_string(),
        upload_path: upload_path.to_string_lossy().to_string(),
        vision_api_key: vision_endpoint.as_ref().map(|_| "test-key".to_string()),
        vision_endpoint: vision_endpoint
            .unwrap_or_else(|| "https://vision.googleapis.com".to_string()),
    }
}

pub fn create_test_app(store: Arc<InMemoryStore>, config: Config) -> Router {
    let vision = VisionClient::from_config(&config);
    let state = Arc::new(AppState {
        store: store as Arc<dyn DocumentStore>,
        config,
        vision,
    });

    Router::new()
        .route("/", get(routes::banner))
        .route("/health", get(doctrack::health_check))
        .nest("/documents", routes::documents::router())
        .with_state(state)
}

pub const MULTIPART_BOUNDARY: &str = "doctrack-test-boundary";

/// Enough of a PNG header for magic-byte detection.
pub const PNG_BYTES: &[u8] = &[
    0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x48, 0x44,
    0x52,
];

pub const PDF_BYTES: &[u8] = b"%PDF-1.4\nfake document\n";

/// Hand-built multipart/form-data body with text fields and an optional file
/// part named `image`.
pub fn multipart_body(fields: &[(&str, &str)], file: Option<(&str, &[u8])>) -> Vec<u8> {
    let mut body = Vec::new();

    for (name, value) in fields {
        body.extend_from_slice(format!("--{}\r\n", MULTIPART_BOUNDARY).as_bytes());
        body.extend_from_slice(
            format!("Content-Disposition: form-data; name=\"{}\"\r\n\r\n", name).as_bytes(),
        );
        body.extend_from_slice(value.as_bytes());
        body.extend_from_slice(b"\r\n");
    }

    if let Some((filename, data)) = file {
        body.extend_from_slice(format!("--{}\r\n", MULTIPART_BOUNDARY).as_bytes());
        body.extend_from_slice(
            format!(
                "Content-Disposition: form-data; name=\"image\"; filename=\"{}\"\r\n",
                filename
            )
            .as_bytes(),
        );
        body.extend_from_slice(b"Content-Type: application/octet-stream\r\n\r\n");
        body.extend_from_slice(data);
        body.extend_from_slice(b"\r\n");
    }

    body.extend_from_slice(format!("--{}--\r\n", MULTIPART_BOUNDARY).as_bytes());
    body
}

pub async fn response_json(response: axum::response::Response) -> serde_json::Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}
