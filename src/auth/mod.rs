pub mod credentials;
pub mod guard;
