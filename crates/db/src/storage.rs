//! Object storage for uploaded files.
//!
//! [`LocalFileStore`] keeps each object as `<root>/<id>` with its metadata in
//! `<root>/<id>.json`. [`InMemoryFileStore`] is the process-local variant.

use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use eyre::WrapErr;
use tokio::sync::Mutex;
use tracing::{debug, info};

use beautyton_core::{
    errors::MarketResult, models::file::StoredFile, repositories::FileStore,
    usecases::file::validate_file_id,
};

pub struct LocalFileStore {
    root: PathBuf,
}

impl LocalFileStore {
    /// Creates the root directory when it does not exist yet.
    pub async fn new(root: impl Into<PathBuf>) -> eyre::Result<Self> {
        let root = root.into();
        tokio::fs::create_dir_all(&root)
            .await
            .wrap_err_with(|| format!("Failed to create storage root {}", root.display()))?;

        info!("File storage at {}", root.display());
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn content_path(&self, id: &str) -> PathBuf {
        self.root.join(id)
    }

    fn metadata_path(&self, id: &str) -> PathBuf {
        self.root.join(format!("{}.json", id))
    }
}

#[async_trait]
impl FileStore for LocalFileStore {
    async fn upload(&self, file: &StoredFile, content: Vec<u8>) -> MarketResult<()> {
        validate_file_id(&file.id)?;
        debug!("Writing file {} ({} bytes)", file.id, content.len());

        let metadata = serde_json::to_vec(file).wrap_err("Failed to encode file metadata")?;
        tokio::fs::write(self.content_path(&file.id), content)
            .await
            .wrap_err_with(|| format!("Failed to write file {}", file.id))?;
        tokio::fs::write(self.metadata_path(&file.id), metadata)
            .await
            .wrap_err_with(|| format!("Failed to write metadata of file {}", file.id))?;

        Ok(())
    }

    async fn get(&self, id: &str) -> MarketResult<Option<(StoredFile, Vec<u8>)>> {
        validate_file_id(id)?;

        let metadata = match tokio::fs::read(self.metadata_path(id)).await {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => {
                return Err(eyre::Report::new(err)
                    .wrap_err(format!("Failed to read metadata of file {}", id))
                    .into())
            }
        };
        let file: StoredFile =
            serde_json::from_slice(&metadata).wrap_err("Failed to decode file metadata")?;
        let content = tokio::fs::read(self.content_path(id))
            .await
            .wrap_err_with(|| format!("Failed to read file {}", id))?;

        Ok(Some((file, content)))
    }
}

#[derive(Default)]
pub struct InMemoryFileStore {
    files: Mutex<HashMap<String, (StoredFile, Vec<u8>)>>,
}

impl InMemoryFileStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl FileStore for InMemoryFileStore {
    async fn upload(&self, file: &StoredFile, content: Vec<u8>) -> MarketResult<()> {
        validate_file_id(&file.id)?;
        self.files
            .lock()
            .await
            .insert(file.id.clone(), (file.clone(), content));
        Ok(())
    }

    async fn get(&self, id: &str) -> MarketResult<Option<(StoredFile, Vec<u8>)>> {
        Ok(self.files.lock().await.get(id).cloned())
    }
}
