use std::panic::Location;

use error_location::ErrorLocation;
use thiserror::Error;

/// Outcomes of a single call to a speech input source other than a
/// recognised utterance.
///
/// `Timeout` and `Unintelligible` are steady-state outcomes and carry no
/// location; the listener simply asks again.
#[derive(Error, Debug)]
pub enum RecognitionError {
    /// No speech started before the per-call timeout.
    #[error("No speech before listen timeout")]
    Timeout,

    /// Speech was captured but could not be turned into text.
    #[error("Speech was unintelligible")]
    Unintelligible,

    /// The recognition backend failed. Retryable after a short delay.
    #[error("Recognition service error: {reason} {location}")]
    Service {
        /// Description of the backend failure.
        reason: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// The input device is gone. The listener cannot continue.
    #[error("Speech input device failed: {reason} {location}")]
    Device {
        /// Description of the device failure.
        reason: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },
}

impl RecognitionError {
    /// Build a retryable service error at the caller's location.
    #[track_caller]
    pub fn service(reason: impl Into<String>) -> Self {
        RecognitionError::Service {
            reason: reason.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Build a fatal device error at the caller's location.
    #[track_caller]
    pub fn device(reason: impl Into<String>) -> Self {
        RecognitionError::Device {
            reason: reason.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Timeouts and unintelligible audio are normal while listening.
    pub fn is_expected(&self) -> bool {
        matches!(
            self,
            RecognitionError::Timeout | RecognitionError::Unintelligible
        )
    }

    /// Only a device failure ends the listener.
    pub fn is_fatal(&self) -> bool {
        matches!(self, RecognitionError::Device { .. })
    }
}

/// Recipe retrieval errors with source location tracking.
///
/// Every variant is reported to the user as an apology; none of them
/// touch the loaded recipe.
#[derive(Error, Debug)]
pub enum FetchError {
    /// The provider answered but reported a failure.
    #[error("Recipe provider error: {reason} {location}")]
    Provider {
        /// Description of the provider failure.
        reason: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// The HTTP round-trip itself failed.
    #[error("Recipe request failed: {source} {location}")]
    Request {
        /// Underlying error from reqwest.
        #[source]
        source: reqwest::Error,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// The response did not contain a usable recipe.
    #[error("Malformed recipe data: {reason} {location}")]
    MalformedRecipe {
        /// What was missing or invalid.
        reason: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },
}

impl FetchError {
    #[track_caller]
    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        FetchError::MalformedRecipe {
            reason: reason.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<reqwest::Error> for FetchError {
    #[track_caller]
    fn from(source: reqwest::Error) -> Self {
        FetchError::Request {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

/// Speech output errors. Logged by the serializer, never fatal.
#[derive(Error, Debug)]
pub enum SpeechError {
    /// The output channel failed to render an utterance.
    #[error("Speech playback failed: {reason} {location}")]
    Playback {
        /// Description of the playback failure.
        reason: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },
}

impl SpeechError {
    /// Build a playback error at the caller's location.
    #[track_caller]
    pub fn playback(reason: impl Into<String>) -> Self {
        SpeechError::Playback {
            reason: reason.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

/// Errors that end [`crate::Assistant::run`].
#[derive(Error, Debug)]
pub enum AssistantError {
    /// A background task panicked or was cancelled unexpectedly.
    #[error("Background task failed: {reason} {location}")]
    Task {
        /// Description of the task failure.
        reason: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },
}

/// Result type alias using [`AssistantError`].
pub type Result<T> = std::result::Result<T, AssistantError>;
