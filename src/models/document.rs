use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

use crate::errors::document::DocumentError;

/// A tracked document record as persisted in the `documents` table.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Document {
    pub id: i64,
    pub title: String,
    pub responsible: String,
    pub description: String,
    pub image_url: Option<String>,
    /// Text extracted from the uploaded image by the recognition service.
    /// Never user-supplied and never touched by updates.
    pub ai_analysis_text: Option<String>,
}

/// A document ready for insertion, with the recognition result (if any)
/// already attached. The store assigns the identifier.
#[derive(Debug, Clone)]
pub struct NewDocument {
    pub title: String,
    pub responsible: String,
    pub description: String,
    pub image_url: Option<String>,
    pub ai_analysis_text: Option<String>,
}

/// Fields accepted when creating a document. `image_url` is only honored on
/// the JSON path; multipart uploads derive it from the stored file.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateDocumentRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub responsible: String,
    #[serde(default)]
    pub description: String,
    pub image_url: Option<String>,
}

/// Full replacement payload for PUT. The identifier and `ai_analysis_text`
/// are immutable through this path.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct UpdateDocumentRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub responsible: String,
    #[serde(default)]
    pub description: String,
    pub image_url: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreateDocumentResponse {
    pub message: String,
    pub id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ai_analysis_text: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

fn first_missing_field(
    title: &str,
    responsible: &str,
    description: &str,
) -> Option<&'static str> {
    if title.trim().is_empty() {
        Some("title")
    } else if responsible.trim().is_empty() {
        Some("responsible")
    } else if description.trim().is_empty() {
        Some("description")
    } else {
        None
    }
}

impl CreateDocumentRequest {
    pub fn validate(&self) -> Result<(), DocumentError> {
        match first_missing_field(&self.title, &self.responsible, &self.description) {
            Some(field) => Err(DocumentError::MissingField { field }),
            None => Ok(()),
        }
    }
}

impl UpdateDocumentRequest {
    pub fn validate(&self) -> Result<(), DocumentError> {
        match first_missing_field(&self.title, &self.responsible, &self.description) {
            Some(field) => Err(DocumentError::MissingField { field }),
            None => Ok(()),
        }
    }
}
