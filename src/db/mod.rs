use anyhow::Result;
use async_trait::async_trait;
use sqlx::{postgres::PgPoolOptions, PgPool};
use std::time::Duration;

use crate::models::{Document, NewDocument, UpdateDocumentRequest};

pub mod documents;

/// The data-access seam for document records. One implementation backed by
/// PostgreSQL; tests substitute an in-memory one.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Inserts a document and returns the database-assigned identifier.
    async fn create(&self, doc: &NewDocument) -> Result<i64>;

    async fn get(&self, id: i64) -> Result<Option<Document>>;

    /// Replaces title, responsible, description and image_url of an existing
    /// record. `ai_analysis_text` is left untouched. Returns false when no
    /// row with that id exists.
    async fn replace(&self, id: i64, doc: &UpdateDocumentRequest) -> Result<bool>;

    /// Returns false when no row with that id exists.
    async fn delete(&self, id: i64) -> Result<bool>;
}

#[derive(Clone)]
pub struct Database {
    pub pool: PgPool,
}

impl Database {
    pub async fn new(database_url: &str) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(10)
            .min_connections(1)
            .acquire_timeout(Duration::from_secs(10))
            .idle_timeout(Duration::from_secs(600))
            .connect(database_url)
            .await?;
        Ok(Self { pool })
    }

    pub fn get_pool(&self) -> &PgPool {
        &self.pool
    }

    /// Runs the embedded SQL migrations.
    pub async fn migrate(&self) -> Result<()> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }
}
