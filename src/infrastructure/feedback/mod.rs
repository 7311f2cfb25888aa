pub mod in_memory;

use crate::core::errors::MedviewError;
use async_trait::async_trait;

/// Feedback text keyed by image filename; one entry per filename.
#[async_trait]
pub trait FeedbackStore: Send + Sync {
    /// Stores `text` for `filename`, replacing any earlier entry.
    async fn set(&self, filename: &str, text: String) -> Result<(), MedviewError>;
    async fn get(&self, filename: &str) -> Result<Option<String>, MedviewError>;
}
