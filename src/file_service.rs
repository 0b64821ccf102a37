use anyhow::Result;
use std::path::Path;
use tokio::fs;
use uuid::Uuid;

#[derive(Clone)]
pub struct FileService {
    upload_path: String,
}

impl FileService {
    pub fn new(upload_path: String) -> Self {
        Self { upload_path }
    }

    /// Writes uploaded bytes under a randomly generated name, keeping the
    /// original extension. Returns the saved file name.
    pub async fn save_file(&self, filename: &str, data: &[u8]) -> Result<String> {
        let file_id = Uuid::new_v4();
        let extension = Path::new(filename)
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or("");

        let saved_filename = if extension.is_empty() {
            file_id.to_string()
        } else {
            format!("{}.{}", file_id, extension)
        };

        let file_path = Path::new(&self.upload_path).join(&saved_filename);

        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent).await?;
        }

        fs::write(&file_path, data).await?;

        Ok(saved_filename)
    }
}
