//! Core error types for streaktrack-core.
//!
//! Defines the error hierarchy used across the library, built on thiserror.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for streaktrack-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Store-related errors
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Stored-data integrity errors
    #[error("Data error: {0}")]
    Data(#[from] DataError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// User-store-specific errors.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Failed to open the database
    #[error("Failed to open user store at {path}: {source}")]
    OpenFailed {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// Query execution failed
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Guarded update found the record changed since it was read
    #[error("Concurrent update detected for user '{name}'")]
    Conflict { name: String },

    /// No record for the given user name
    #[error("Unknown user: {0}")]
    UnknownUser(String),

    /// Database is locked
    #[error("User store is locked")]
    Locked,
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Unknown configuration key
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Failed to parse configuration
    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),
}

/// Stored-data integrity errors.
///
/// These indicate a record that cannot be interpreted, which is fatal:
/// a streak must never be silently recomputed from a garbled timestamp.
#[derive(Error, Debug)]
pub enum DataError {
    /// A stored `last_commented` value that is neither RFC 3339 nor a
    /// legacy date-only value
    #[error("Unparseable last_commented value '{value}' for user '{name}'")]
    InvalidTimestamp { name: String, value: String },

    /// A tier table whose thresholds are not strictly increasing
    #[error("Invalid tier table: {0}")]
    InvalidTierTable(String),
}

impl From<rusqlite::Error> for StoreError {
    fn from(err: rusqlite::Error) -> Self {
        match &err {
            rusqlite::Error::SqliteFailure(err, _msg) => {
                if err.code == rusqlite::ErrorCode::DatabaseLocked {
                    StoreError::Locked
                } else {
                    StoreError::QueryFailed(err.to_string())
                }
            }
            _ => StoreError::QueryFailed(err.to_string()),
        }
    }
}

impl From<rusqlite::Error> for CoreError {
    fn from(err: rusqlite::Error) -> Self {
        CoreError::Store(err.into())
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
