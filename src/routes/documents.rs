use axum::{
    body::Bytes,
    extract::{FromRequest, Multipart, Path, Request, State},
    http::{header::CONTENT_TYPE, StatusCode},
    response::Json,
    routing::{delete, get, post, put},
    Router,
};
use std::sync::Arc;
use tracing::{info, warn};

use crate::{
    errors::document::DocumentError,
    file_service::FileService,
    mime_detection::{detect_mime_type, is_allowed_image_type},
    models::{
        CreateDocumentRequest, CreateDocumentResponse, Document, MessageResponse, NewDocument,
        UpdateDocumentRequest,
    },
    vision::ANALYSIS_UNAVAILABLE,
    AppState,
};

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", post(create_document))
        .route("/{id}", get(get_document))
        .route("/{id}", put(update_document))
        .route("/{id}", delete(delete_document))
}

#[utoipa::path(
    post,
    path = "/documents",
    tag = "documents",
    request_body(
        content = CreateDocumentRequest,
        description = "Document fields as JSON, or multipart/form-data with the same text parts plus an optional `image` file (JPEG, PNG or GIF). Uploaded images are passed through text recognition and the result is stored with the record."
    ),
    responses(
        (status = 201, description = "Document created", body = CreateDocumentResponse),
        (status = 400, description = "Missing required field or unsupported image type"),
        (status = 500, description = "Store failure")
    )
)]
pub async fn create_document(
    State(state): State<Arc<AppState>>,
    request: Request,
) -> Result<(StatusCode, Json<CreateDocumentResponse>), DocumentError> {
    let is_multipart = request
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(|value| value.starts_with("multipart/form-data"))
        .unwrap_or(false);

    let (payload, image) = if is_multipart {
        let multipart = Multipart::from_request(request, &())
            .await
            .map_err(|err| DocumentError::InvalidBody {
                message: err.to_string(),
            })?;
        read_multipart(multipart).await?
    } else {
        let Json(payload) = Json::<CreateDocumentRequest>::from_request(request, &())
            .await
            .map_err(|err| DocumentError::InvalidBody {
                message: err.to_string(),
            })?;
        (payload, None)
    };

    payload.validate()?;

    let mut image_url = payload.image_url.clone();
    let mut ai_analysis_text = None;

    if let Some((filename, data)) = image {
        let mime_type = detect_mime_type(&data, &filename);
        if !is_allowed_image_type(&mime_type) {
            return Err(DocumentError::UnsupportedImageType {
                detected: mime_type,
            });
        }

        let file_service = FileService::new(state.config.upload_path.clone());
        let saved_filename = file_service.save_file(&filename, &data).await?;
        image_url = Some(format!("/uploads/{}", saved_filename));

        ai_analysis_text = Some(match &state.vision {
            Some(vision) => vision.recognize(&data).await,
            None => {
                warn!("Image uploaded but no recognition credentials configured");
                ANALYSIS_UNAVAILABLE.to_string()
            }
        });
    }

    let new_document = NewDocument {
        title: payload.title,
        responsible: payload.responsible,
        description: payload.description,
        image_url,
        ai_analysis_text,
    };

    let id = state.store.create(&new_document).await?;
    info!("Created document {}", id);

    Ok((
        StatusCode::CREATED,
        Json(CreateDocumentResponse {
            message: "Document created successfully".to_string(),
            id,
            image_url: new_document.image_url,
            ai_analysis_text: new_document.ai_analysis_text,
        }),
    ))
}

#[utoipa::path(
    get,
    path = "/documents/{id}",
    tag = "documents",
    params(("id" = i64, Path, description = "Document ID")),
    responses(
        (status = 200, description = "Document details", body = Document),
        (status = 404, description = "Document not found"),
        (status = 500, description = "Store failure")
    )
)]
pub async fn get_document(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<Document>, DocumentError> {
    let document = state.store.get(id).await?.ok_or(DocumentError::NotFound)?;
    Ok(Json(document))
}

#[utoipa::path(
    put,
    path = "/documents/{id}",
    tag = "documents",
    params(("id" = i64, Path, description = "Document ID")),
    request_body = UpdateDocumentRequest,
    responses(
        (status = 200, description = "Document updated", body = MessageResponse),
        (status = 400, description = "Missing required field"),
        (status = 404, description = "Document not found")
    )
)]
pub async fn update_document(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateDocumentRequest>,
) -> Result<Json<MessageResponse>, DocumentError> {
    payload.validate()?;

    let updated = state.store.replace(id, &payload).await?;
    if !updated {
        return Err(DocumentError::NotFound);
    }

    info!("Updated document {}", id);
    Ok(Json(MessageResponse {
        message: "Document updated successfully".to_string(),
    }))
}

#[utoipa::path(
    delete,
    path = "/documents/{id}",
    tag = "documents",
    params(("id" = i64, Path, description = "Document ID")),
    responses(
        (status = 200, description = "Document deleted", body = MessageResponse),
        (status = 404, description = "Document not found"),
        (status = 500, description = "Store failure")
    )
)]
pub async fn delete_document(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<MessageResponse>, DocumentError> {
    let deleted = state.store.delete(id).await?;
    if !deleted {
        return Err(DocumentError::NotFound);
    }

    info!("Deleted document {}", id);
    Ok(Json(MessageResponse {
        message: "Document deleted successfully".to_string(),
    }))
}

/// Pulls the text fields and the optional `image` part out of a multipart
/// body. Unknown parts are ignored.
async fn read_multipart(
    mut multipart: Multipart,
) -> Result<(CreateDocumentRequest, Option<(String, Bytes)>), DocumentError> {
    let mut payload = CreateDocumentRequest {
        title: String::new(),
        responsible: String::new(),
        description: String::new(),
        image_url: None,
    };
    let mut image: Option<(String, Bytes)> = None;

    while let Some(field) = multipart.next_field().await.map_err(|err| {
        DocumentError::InvalidBody {
            message: err.to_string(),
        }
    })? {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            "title" => payload.title = read_text_field(field).await?,
            "responsible" => payload.responsible = read_text_field(field).await?,
            "description" => payload.description = read_text_field(field).await?,
            "image" => {
                let filename = field.file_name().unwrap_or("upload").to_string();
                let data = field.bytes().await.map_err(|err| DocumentError::InvalidBody {
                    message: err.to_string(),
                })?;
                image = Some((filename, data));
            }
            other => {
                warn!("Ignoring unexpected multipart field {:?}", other);
            }
        }
    }

    Ok((payload, image))
}

async fn read_text_field(field: axum::extract::multipart::Field<'_>) -> Result<String, DocumentError> {
    field.text().await.map_err(|err| DocumentError::InvalidBody {
        message: err.to_string(),
    })
}

// Handler-level tests live in tests/document_routes_tests.rs against an
// in-memory store.
