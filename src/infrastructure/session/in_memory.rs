use crate::infrastructure::session::{ExpiredDeletion, SessionStore};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use time::OffsetDateTime;
use tokio::sync::RwLock;
use tower_sessions::session::{Id, Record};
use tower_sessions::session_store;
use tracing::debug;

/// Session records held in process memory. Expired records are dropped on
/// every `create`, on `load`, and by `delete_expired`.
#[derive(Clone, Debug, Default)]
pub struct InMemorySessionStore {
    records: Arc<RwLock<HashMap<Id, Record>>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        InMemorySessionStore {
            records: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Number of records currently held, expired or not.
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

fn prune(records: &mut HashMap<Id, Record>, now: OffsetDateTime) {
    let before = records.len();
    records.retain(|_, record| record.expiry_date > now);
    let pruned = before - records.len();
    if pruned > 0 {
        debug!(pruned, "dropped expired sessions");
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn create(&self, record: &mut Record) -> session_store::Result<()> {
        let mut records = self.records.write().await;
        prune(&mut records, OffsetDateTime::now_utc());
        while records.contains_key(&record.id) {
            record.id = Id::default();
        }
        records.insert(record.id, record.clone());
        Ok(())
    }

    async fn save(&self, record: &Record) -> session_store::Result<()> {
        self.records.write().await.insert(record.id, record.clone());
        Ok(())
    }

    async fn load(&self, session_id: &Id) -> session_store::Result<Option<Record>> {
        let mut records = self.records.write().await;
        match records.get(session_id) {
            None => return Ok(None),
            Some(record) if record.expiry_date > OffsetDateTime::now_utc() => return Ok(Some(record.clone())),
            Some(_) => {}
        }
        records.remove(session_id);
        Ok(None)
    }

    async fn delete(&self, session_id: &Id) -> session_store::Result<()> {
        self.records.write().await.remove(session_id);
        Ok(())
    }
}

#[async_trait]
impl ExpiredDeletion for InMemorySessionStore {
    async fn delete_expired(&self) -> session_store::Result<()> {
        prune(&mut *self.records.write().await, OffsetDateTime::now_utc());
        Ok(())
    }
}
