pub mod api;
pub mod auth;
pub mod config;
pub mod core;
pub mod infrastructure;

pub use api::{AppService, build_service, handlers::api_routes};
pub use config::{CONFIG, Config};
pub use crate::core::errors::MedviewError;
pub use crate::core::services::MedviewService;

#[cfg(test)]
mod tests;
