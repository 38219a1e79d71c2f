use sous_chef_core::AssistantError;

use std::{panic::Location, result::Result as StdResult};

use error_location::ErrorLocation;
use thiserror::Error;

/// Application-level errors for the sous-chef binary.
///
/// All variants include `ErrorLocation` for call-site tracking.
#[derive(Error, Debug)]
pub enum AppError {
    /// Assistant runtime error from sous-chef-core.
    #[error("Assistant error: {source} {location}")]
    Core {
        /// The underlying assistant error.
        #[source]
        source: AssistantError,
        /// Location where this error was created.
        location: ErrorLocation,
    },

    /// Configuration loading, saving or validation error.
    #[error("Configuration error: {reason} {location}")]
    ConfigError {
        /// Human-readable reason for failure.
        reason: String,
        /// Location where this error was created.
        location: ErrorLocation,
    },

    /// A required secret is not set in the environment.
    #[error("Missing secret: {name} is not set {location}")]
    MissingSecret {
        /// Name of the environment variable.
        name: String,
        /// Location where this error was created.
        location: ErrorLocation,
    },

    /// Failed to build the async runtime.
    #[error("Runtime error: {reason} {location}")]
    RuntimeError {
        /// Human-readable reason for failure.
        reason: String,
        /// Location where this error was created.
        location: ErrorLocation,
    },

    /// IO error from filesystem operations.
    #[error("IO error: {source} {location}")]
    IoError {
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
        /// Location where this error was created.
        location: ErrorLocation,
    },
}

// Manual From<AssistantError> with location tracking.
// Cannot use #[from] because it does not support extra fields.
impl From<AssistantError> for AppError {
    #[track_caller]
    fn from(source: AssistantError) -> Self {
        AppError::Core {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<std::io::Error> for AppError {
    #[track_caller]
    fn from(source: std::io::Error) -> Self {
        AppError::IoError {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

/// Convenience type alias for Results using `AppError`.
pub type Result<T> = StdResult<T, AppError>;
