use thiserror::Error;

use crate::auth::guard::Operation;

#[derive(Error, Debug)]
pub enum MedviewError {
    #[error("Invalid username or password")]
    InvalidCredentials,
    #[error("Authentication required")]
    Unauthenticated,
    #[error("{}", .0.denial_notice())]
    Forbidden(Operation),
    #[error("No file provided")]
    MissingFile,
    #[error("Invalid file name: {0:?}")]
    InvalidFilename(String),
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
    #[error("Upload exceeds the size limit")]
    PayloadTooLarge,
    #[error("Storage error: {0}")]
    StorageError(String),
    #[error("Session error: {0}")]
    SessionError(String),
    #[error("Internal server error: {0}")]
    InternalServerError(String),
}

impl From<std::io::Error> for MedviewError {
    fn from(err: std::io::Error) -> Self {
        MedviewError::StorageError(err.to_string())
    }
}

impl From<tower_sessions::session::Error> for MedviewError {
    fn from(err: tower_sessions::session::Error) -> Self {
        MedviewError::SessionError(err.to_string())
    }
}
