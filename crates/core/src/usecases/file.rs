use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use crate::{
    errors::{MarketError, MarketResult},
    models::file::StoredFile,
    repositories::FileStore,
};

#[derive(Clone)]
pub struct FileUsecase {
    files: Arc<dyn FileStore>,
}

/// Rejects ids that are empty or could escape the storage root.
pub fn validate_file_id(id: &str) -> MarketResult<()> {
    if id.is_empty() {
        return Err(MarketError::validation("file ID is required"));
    }
    if id.contains('/') || id.contains('\\') || id.contains("..") {
        return Err(MarketError::validation("invalid file ID"));
    }
    Ok(())
}

fn validate_file(file: &StoredFile) -> MarketResult<()> {
    validate_file_id(&file.id)?;
    if file.size <= 0 {
        return Err(MarketError::validation("file size must be positive"));
    }
    if file.mime_type.trim().is_empty() {
        return Err(MarketError::validation("file MIME type is required"));
    }
    Ok(())
}

impl FileUsecase {
    pub fn new(files: Arc<dyn FileStore>) -> Self {
        Self { files }
    }

    /// Stores `content` under a fresh id and returns its metadata.
    pub async fn upload(
        &self,
        name: Option<String>,
        mime_type: &str,
        content: Vec<u8>,
    ) -> MarketResult<StoredFile> {
        let id = Uuid::new_v4().simple().to_string();
        let file = StoredFile {
            name: name.filter(|n| !n.is_empty()).unwrap_or_else(|| id.clone()),
            id,
            size: content.len() as i64,
            mime_type: mime_type.to_string(),
        };
        validate_file(&file)?;

        self.files.upload(&file, content).await?;
        info!("Stored file {} ({} bytes, {})", file.id, file.size, file.mime_type);
        Ok(file)
    }

    pub async fn get(&self, id: &str) -> MarketResult<(StoredFile, Vec<u8>)> {
        validate_file_id(id)?;
        self.files
            .get(id)
            .await?
            .ok_or_else(|| MarketError::not_found("file not found"))
    }
}
