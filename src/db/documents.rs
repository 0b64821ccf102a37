use anyhow::Result;
use async_trait::async_trait;

use super::{Database, DocumentStore};
use crate::models::{Document, NewDocument, UpdateDocumentRequest};

#[async_trait]
impl DocumentStore for Database {
    async fn create(&self, doc: &NewDocument) -> Result<i64> {
        let id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO documents (title, responsible, description, image_url, ai_analysis_text)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id
            "#,
        )
        .bind(&doc.title)
        .bind(&doc.responsible)
        .bind(&doc.description)
        .bind(&doc.image_url)
        .bind(&doc.ai_analysis_text)
        .fetch_one(&self.pool)
        .await?;

        Ok(id)
    }

    async fn get(&self, id: i64) -> Result<Option<Document>> {
        let document = sqlx::query_as::<_, Document>(
            r#"
            SELECT id, title, responsible, description, image_url, ai_analysis_text
            FROM documents
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(document)
    }

    async fn replace(&self, id: i64, doc: &UpdateDocumentRequest) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE documents
            SET title = $2, responsible = $3, description = $4, image_url = $5
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(&doc.title)
        .bind(&doc.responsible)
        .bind(&doc.description)
        .bind(&doc.image_url)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM documents WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
