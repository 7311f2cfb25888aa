mod service_tests;

use crate::api::{AppService, build_service};
use crate::config::Config;
use crate::infrastructure::session::in_memory::InMemorySessionStore;
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;

pub fn test_config(upload_dir: &Path) -> Config {
    Config {
        port: 0,
        log_level: "debug".to_string(),
        upload_dir: upload_dir.to_path_buf(),
        session_ttl_secs: 3600,
        secure_cookie: false,
        max_upload_bytes: 1024 * 1024,
        protect_uploads: false,
        bcrypt_cost: 4,
        doctor_password: "doctor123".to_string(),
        student_password: "student123".to_string(),
    }
}

/// Service over a fresh temporary upload directory. Keep `dir` alive for the
/// duration of the test.
pub struct TestContext {
    pub service: Arc<AppService>,
    pub sessions: InMemorySessionStore,
    pub config: Config,
    pub dir: TempDir,
}

pub async fn create_test_context_with(configure: impl FnOnce(&mut Config)) -> TestContext {
    let dir = tempfile::tempdir().unwrap();
    let mut config = test_config(&dir.path().join("uploads"));
    configure(&mut config);
    let service = build_service(&config).await.unwrap();
    TestContext {
        service,
        sessions: InMemorySessionStore::new(),
        config,
        dir,
    }
}

pub async fn create_test_context() -> TestContext {
    create_test_context_with(|_| {}).await
}
