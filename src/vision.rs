//! Client for the Google Cloud Vision `images:annotate` REST endpoint.
//!
//! Document creation calls this synchronously for uploaded images. Failures
//! are reduced to a sentinel string and never propagate; a document is still
//! created when the recognition service is down or unconfigured.

use anyhow::{anyhow, Result};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::config::Config;

/// Stored when the service answers but finds no text in the image.
pub const NO_TEXT_DETECTED: &str = "No text detected in the image.";
/// Stored when the recognition call fails or no credentials are configured.
pub const ANALYSIS_UNAVAILABLE: &str = "Text recognition unavailable.";

#[derive(Serialize)]
struct AnnotateRequest {
    requests: Vec<AnnotateImageRequest>,
}

#[derive(Serialize)]
struct AnnotateImageRequest {
    image: ImageContent,
    features: Vec<Feature>,
}

#[derive(Serialize)]
struct ImageContent {
    content: String,
}

#[derive(Serialize)]
struct Feature {
    #[serde(rename = "type")]
    feature_type: &'static str,
    #[serde(rename = "maxResults")]
    max_results: u32,
}

#[derive(Deserialize)]
struct AnnotateResponse {
    #[serde(default)]
    responses: Vec<AnnotateImageResponse>,
}

#[derive(Deserialize, Default)]
struct AnnotateImageResponse {
    #[serde(rename = "textAnnotations", default)]
    text_annotations: Vec<TextAnnotation>,
    error: Option<ApiStatus>,
}

#[derive(Deserialize)]
struct TextAnnotation {
    #[serde(default)]
    description: String,
}

#[derive(Deserialize)]
struct ApiStatus {
    #[serde(default)]
    code: i32,
    #[serde(default)]
    message: String,
}

#[derive(Clone)]
pub struct VisionClient {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
}

impl VisionClient {
    pub fn new(endpoint: String, api_key: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.trim_end_matches('/').to_string(),
            api_key,
        }
    }

    /// Returns a client only when an API key is configured.
    pub fn from_config(config: &Config) -> Option<Self> {
        config
            .vision_api_key
            .as_ref()
            .map(|key| Self::new(config.vision_endpoint.clone(), key.clone()))
    }

    /// Performs one TEXT_DETECTION call and returns the full first
    /// annotation, or None when the image contains no recognizable text.
    pub async fn detect_text(&self, image: &[u8]) -> Result<Option<String>> {
        let request = AnnotateRequest {
            requests: vec![AnnotateImageRequest {
                image: ImageContent {
                    content: STANDARD.encode(image),
                },
                features: vec![Feature {
                    feature_type: "TEXT_DETECTION",
                    max_results: 1,
                }],
            }],
        };

        let url = format!("{}/v1/images:annotate?key={}", self.endpoint, self.api_key);
        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await?
            .error_for_status()?
            .json::<AnnotateResponse>()
            .await?;

        first_annotation(response)
    }

    /// Recognition result suitable for storage: the extracted text or one of
    /// the sentinels. Never fails.
    pub async fn recognize(&self, image: &[u8]) -> String {
        match self.detect_text(image).await {
            Ok(Some(text)) => text,
            Ok(None) => NO_TEXT_DETECTED.to_string(),
            Err(err) => {
                warn!("Image text recognition failed: {}", err);
                ANALYSIS_UNAVAILABLE.to_string()
            }
        }
    }
}

fn first_annotation(response: AnnotateResponse) -> Result<Option<String>> {
    let image_response = response
        .responses
        .into_iter()
        .next()
        .ok_or_else(|| anyhow!("annotate response contained no results"))?;

    if let Some(status) = image_response.error {
        return Err(anyhow!(
            "vision API error {}: {}",
            status.code,
            status.message
        ));
    }

    Ok(image_response
        .text_annotations
        .into_iter()
        .next()
        .map(|annotation| annotation.description)
        .filter(|text| !text.is_empty()))
}
