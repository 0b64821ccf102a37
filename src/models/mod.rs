pub mod document;

pub use document::{
    CreateDocumentRequest, CreateDocumentResponse, Document, MessageResponse, NewDocument,
    UpdateDocumentRequest,
};
