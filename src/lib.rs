// API Key Dashboard
// Main library module

pub mod client;
pub mod config;
pub mod dashboard;
pub mod database;
pub mod errors;
pub mod models;
pub mod routes;
pub mod security;
pub mod service;

// Re-export commonly used items
pub use client::{KeyApi, KeysClient};
pub use config::Config;
pub use dashboard::{Dashboard, DashboardState};
pub use database::Database;
pub use errors::{ApiError, ClientError, DashboardError};
pub use models::{ApiKey, CreateApiKeyRequest, RenameApiKeyRequest};
pub use security::KeyGenerator;
pub use service::ApiKeyService;
