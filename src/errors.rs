use thiserror::Error;

use crate::dashboard::PendingAction;

/// Server-side failures. Every variant is reported to HTTP callers as a
/// generic 500; the detail only reaches the logs.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Database error: {0}")]
    Store(#[from] rusqlite::Error),

    #[error("Database connection lock poisoned")]
    LockPoisoned,

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl ApiError {
    /// True when the store found no row for the requested id.
    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::Store(rusqlite::Error::QueryReturnedNoRows))
    }
}

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Server responded with {status}: {message}")]
    Status { status: u16, message: String },
}

#[derive(Error, Debug)]
pub enum DashboardError {
    #[error("Please enter a key name")]
    EmptyName,

    #[error("{0} is already in progress")]
    Busy(PendingAction),

    #[error("No delete is awaiting confirmation")]
    NoPendingConfirmation,

    #[error("No key is being edited")]
    NotEditing,

    #[error("API key {0} is not in the list")]
    UnknownKey(String),

    #[error(transparent)]
    Client(#[from] ClientError),
}

#[derive(Error, Debug)]
#[error("Clipboard unavailable: {0}")]
pub struct ClipboardError(pub String);
