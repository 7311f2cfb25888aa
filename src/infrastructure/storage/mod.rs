pub mod filesystem;

use crate::core::errors::MedviewError;
use async_trait::async_trait;

/// The shared directory every uploaded image lands in.
#[async_trait]
pub trait ImageStore: Send + Sync {
    /// Writes `data` under `filename`, silently replacing an existing file.
    /// `filename` must already be sanitized.
    async fn save(&self, filename: &str, data: &[u8]) -> Result<(), MedviewError>;
    /// Names of all stored files, in directory enumeration order.
    async fn list(&self) -> Result<Vec<String>, MedviewError>;
}
