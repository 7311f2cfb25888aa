pub mod in_memory;

use std::time::Duration;
use tracing::error;

/// Session records live behind `tower-sessions`' store trait; swap the
/// implementation to persist sessions across restarts.
pub use tower_sessions::session_store::{ExpiredDeletion, SessionStore};

/// Deletes expired session records every `period`. Runs until the process
/// exits.
pub async fn prune_expired<S: ExpiredDeletion>(store: S, period: Duration) {
    let mut interval = tokio::time::interval(period);
    loop {
        interval.tick().await;
        if let Err(e) = store.delete_expired().await {
            error!(error = %e, "failed to prune expired sessions");
        }
    }
}
