use crate::core::errors::MedviewError;
use crate::infrastructure::feedback::FeedbackStore;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Clone, Default)]
pub struct InMemoryFeedbackStore {
    entries: Arc<RwLock<HashMap<String, String>>>,
}

impl InMemoryFeedbackStore {
    pub fn new() -> Self {
        InMemoryFeedbackStore {
            entries: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

#[async_trait]
impl FeedbackStore for InMemoryFeedbackStore {
    async fn set(&self, filename: &str, text: String) -> Result<(), MedviewError> {
        self.entries.write().await.insert(filename.to_string(), text);
        Ok(())
    }

    async fn get(&self, filename: &str) -> Result<Option<String>, MedviewError> {
        Ok(self.entries.read().await.get(filename).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn last_write_wins() {
        let store = InMemoryFeedbackStore::new();
        assert!(store.get("a.png").await.unwrap().is_none());

        store.set("a.png", "Looks healthy".to_string()).await.unwrap();
        store.set("a.png", "Follow up needed".to_string()).await.unwrap();
        assert_eq!(store.get("a.png").await.unwrap().as_deref(), Some("Follow up needed"));
        assert!(store.get("b.png").await.unwrap().is_none());
    }
}
