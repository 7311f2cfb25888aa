use crate::core::errors::MedviewError;
use crate::infrastructure::storage::ImageStore;
use async_trait::async_trait;
use std::path::PathBuf;

#[derive(Clone, Debug)]
pub struct FilesystemImageStore {
    dir: PathBuf,
}

impl FilesystemImageStore {
    /// Opens the upload directory, creating it if it does not exist yet.
    pub async fn open(dir: impl Into<PathBuf>) -> Result<Self, MedviewError> {
        let dir = dir.into();
        tokio::fs::create_dir_all(&dir)
            .await
            .map_err(|e| MedviewError::StorageError(format!("failed to create upload dir {}: {}", dir.display(), e)))?;
        Ok(FilesystemImageStore { dir })
    }
}

#[async_trait]
impl ImageStore for FilesystemImageStore {
    async fn save(&self, filename: &str, data: &[u8]) -> Result<(), MedviewError> {
        let path = self.dir.join(filename);
        tokio::fs::write(&path, data)
            .await
            .map_err(|e| MedviewError::StorageError(format!("failed to write {}: {}", path.display(), e)))
    }

    async fn list(&self) -> Result<Vec<String>, MedviewError> {
        let mut entries = tokio::fs::read_dir(&self.dir).await?;
        let mut names = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            if !entry.file_type().await?.is_file() {
                continue;
            }
            // Non UTF-8 names cannot have been produced by an upload.
            if let Ok(name) = entry.file_name().into_string() {
                names.push(name);
            }
        }
        Ok(names)
    }
}
