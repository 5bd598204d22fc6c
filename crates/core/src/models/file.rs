use serde::{Deserialize, Serialize};

/// Metadata of an object in the file store. `id` is the storage key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredFile {
    pub id: String,
    pub name: String,
    pub size: i64,
    pub mime_type: String,
}
