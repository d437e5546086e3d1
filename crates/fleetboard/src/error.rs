//! Error types for fleetboard.
//!
//! This module defines all error types used throughout the fleetboard crate,
//! providing detailed context for debugging and operator-facing messages.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for fleetboard operations.
#[derive(Error, Debug)]
pub enum Error {
    // === Storage Errors ===
    /// Failed to open or create the database.
    #[error("failed to open database at {path}: {source}")]
    DatabaseOpen {
        /// Path to the database file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: rusqlite::Error,
    },

    /// A database query failed.
    #[error("database query failed: {0}")]
    DatabaseQuery(#[from] rusqlite::Error),

    /// Failed to run database migrations.
    #[error("database migration failed: {message}")]
    DatabaseMigration {
        /// Description of what went wrong.
        message: String,
    },

    // === Configuration Errors ===
    /// Failed to load configuration.
    #[error("failed to load configuration: {0}")]
    ConfigLoad(Box<figment::Error>),

    /// Configuration validation failed.
    #[error("invalid configuration: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    // === Remote API Errors ===
    /// The HTTP request could not be completed.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The aircraft service answered with a non-success status.
    #[error("{method} {url} returned HTTP {status}")]
    RemoteStatus {
        /// HTTP method of the request.
        method: &'static str,
        /// Requested URL.
        url: String,
        /// Status code returned by the service.
        status: u16,
    },

    // === Fleet Errors ===
    /// A status value outside the known set.
    #[error("invalid status '{value}' (expected available, maintenance or aog)")]
    InvalidStatus {
        /// The rejected value.
        value: String,
    },

    /// The backend holds no aircraft with the given id.
    #[error("no aircraft with id {id}")]
    AircraftNotFound {
        /// The id that was looked up.
        id: String,
    },

    /// A status update did not take effect; the in-memory fleet is unchanged.
    #[error("status update for {tail_number} did not take effect: {source}")]
    UpdateRejected {
        /// Tail number the operator tried to update.
        tail_number: String,
        /// Why the backend refused or failed.
        #[source]
        source: Box<Error>,
    },

    // === I/O Errors ===
    /// File system operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to create a required directory.
    #[error("failed to create directory {path}: {source}")]
    DirectoryCreate {
        /// Path that couldn't be created.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    // === Serialization Errors ===
    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // === Generic Errors ===
    /// An internal error occurred (bug).
    #[error("internal error: {0}")]
    Internal(String),
}

/// A specialized Result type for fleetboard operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

impl Error {
    /// Create a new internal error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Create an aircraft-not-found error.
    #[must_use]
    pub fn aircraft_not_found(id: impl ToString) -> Self {
        Self::AircraftNotFound { id: id.to_string() }
    }

    /// Wrap a backend failure as a rejected status update.
    #[must_use]
    pub fn update_rejected(tail_number: impl Into<String>, source: Error) -> Self {
        Self::UpdateRejected {
            tail_number: tail_number.into(),
            source: Box::new(source),
        }
    }

    /// Check if this error means a status update did not take effect.
    #[must_use]
    pub fn is_update_rejected(&self) -> bool {
        matches!(self, Self::UpdateRejected { .. })
    }

    /// Check if this error came from talking to the remote service.
    #[must_use]
    pub fn is_remote(&self) -> bool {
        match self {
            Self::Http(_) | Self::RemoteStatus { .. } => true,
            Self::UpdateRejected { source, .. } => source.is_remote(),
            _ => false,
        }
    }
}
