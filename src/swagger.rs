use axum::Router;
use std::sync::Arc;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    models::{
        CreateDocumentRequest, CreateDocumentResponse, Document, MessageResponse,
        UpdateDocumentRequest,
    },
    AppState,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::documents::create_document,
        crate::routes::documents::get_document,
        crate::routes::documents::update_document,
        crate::routes::documents::delete_document,
    ),
    components(
        schemas(
            Document, CreateDocumentRequest, UpdateDocumentRequest,
            CreateDocumentResponse, MessageResponse
        )
    ),
    tags(
        (name = "documents", description = "Document tracking endpoints")
    ),
    info(
        title = "Doctrack API",
        version = "0.1.0",
        description = "Document tracking API with optional image text recognition"
    )
)]
pub struct ApiDoc;

pub fn create_swagger_router() -> Router<Arc<AppState>> {
    Router::new().merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
