//! Error types for the entry list engine.

use crate::context::EntryKey;
use thiserror::Error;

/// Storage-related errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Malformed value under key '{key}': {reason}")]
    Malformed { key: String, reason: String },

    #[error("Storage I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Why a context could not be registered
#[derive(Debug, Error)]
pub enum RegistrationError {
    #[error("Invalid {role} context '{name}': {reason}")]
    InvalidContext {
        role: &'static str,
        name: String,
        reason: String,
    },

    #[error("Invalid engine settings: {0}")]
    InvalidSettings(String),

    #[error("Context '{0}' is already registered")]
    DuplicateContext(String),

    #[error("{0}: no user is defined, aborting")]
    NoUser(String),

    #[error("{0}: no remote user is defined, aborting")]
    NoRemoteUser(String),
}

/// Errors of engine operations addressing a context by name
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Unknown context: {0}")]
    UnknownContext(String),

    #[error("No list '{list}' in context '{context}'")]
    UnknownList { context: String, list: String },

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

/// Why a toggle did nothing
#[derive(Debug, Error)]
pub enum ToggleError {
    #[error("No toggle is wired to control {0:?}")]
    Unbound(EntryKey),

    #[error("Toggle control {0:?} does not lead to an entry")]
    EntryNotFound(EntryKey),

    #[error("Cannot determine id for toggled entry {0:?}")]
    NoIdentity(EntryKey),
}

/// Top-level errors surfaced by the CLI and configuration layer
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("List not found: {site}/{user}/{list}")]
    ListNotFound {
        site: String,
        user: String,
        list: String,
    },

    #[error("No remembered user for site '{0}'")]
    UserNotFound(String),

    #[error("Invalid list file: {0}")]
    InvalidListFile(String),

    #[error("Storage error: {0}")]
    StorageError(#[from] StorageError),

    #[error("Engine error: {0}")]
    Engine(#[from] EngineError),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl From<config::ConfigError> for ApiError {
    fn from(err: config::ConfigError) -> Self {
        ApiError::ConfigError(err.to_string())
    }
}
