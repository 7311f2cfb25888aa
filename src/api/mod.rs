pub mod handlers;
pub mod models;
pub mod openapi;
pub mod session;
pub mod views;

use crate::auth::credentials::CredentialStore;
use crate::config::Config;
use crate::core::errors::MedviewError;
use crate::core::services::MedviewService;
use crate::infrastructure::{feedback::in_memory::InMemoryFeedbackStore, storage::filesystem::FilesystemImageStore};
use std::sync::Arc;

pub type AppService = MedviewService<InMemoryFeedbackStore, FilesystemImageStore>;

/// Wires the stores named by `config` into a service: hashes the built-in
/// accounts and creates the upload directory if needed.
pub async fn build_service(config: &Config) -> Result<Arc<AppService>, MedviewError> {
    let cost = config.bcrypt_cost;
    let doctor_password = config.doctor_password.clone();
    let student_password = config.student_password.clone();
    let credentials =
        tokio::task::spawn_blocking(move || CredentialStore::builtin(cost, &doctor_password, &student_password))
            .await
            .map_err(|e| MedviewError::InternalServerError(format!("credential setup panicked: {}", e)))??;

    let images = FilesystemImageStore::open(&config.upload_dir).await?;

    Ok(Arc::new(MedviewService::new(credentials, InMemoryFeedbackStore::new(), images)))
}
