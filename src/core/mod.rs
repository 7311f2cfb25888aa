pub mod errors;
pub mod filename;
pub mod models;
pub mod services;
