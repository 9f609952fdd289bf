//! Error types for the rota engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur in the engine. Malformed shift
//! or staff records are deliberately *not* represented here: classification
//! degrades to safe defaults instead of failing, so one bad record never
//! aborts a whole computation pass.

use thiserror::Error;

/// The main error type for the rota engine.
///
/// All fallible operations in the engine return this error type, making it
/// easy to handle errors consistently throughout the application.
///
/// # Example
///
/// ```
/// use rota_engine::error::RotaError;
///
/// let error = RotaError::ConfigNotFound {
///     path: "/missing/rota.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/rota.yaml");
/// ```
#[derive(Debug, Clone, Error)]
pub enum RotaError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// The data provider failed at the transport level.
    #[error("Data provider transport error: {message}")]
    Transport {
        /// A description of the transport failure.
        message: String,
    },

    /// The data provider rejected the request as unauthorized.
    #[error("Data provider rejected credentials: {message}")]
    Unauthorized {
        /// A description of the auth failure.
        message: String,
    },

    /// The refresh coordinator was started while already running.
    #[error("Refresh coordinator is already running")]
    RefreshAlreadyRunning,

    /// The refresh coordinator was stopped while not running.
    #[error("Refresh coordinator is not running")]
    RefreshNotRunning,
}

/// A type alias for Results that return RotaError.
pub type RotaResult<T> = Result<T, RotaError>;
