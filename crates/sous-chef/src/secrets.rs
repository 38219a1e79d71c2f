//! API key loading.

use crate::{AppError, AppResult};

use std::panic::Location;

use error_location::ErrorLocation;
use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, info};

/// Environment variable holding the recipe provider key.
pub(crate) const API_KEY_VAR: &str = "GEMINI_API_KEY";

/// Characters of the key that may appear in logs.
const VISIBLE_PREFIX_LEN: usize = 4;

/// Load the provider API key from the environment, reading `.env` first
/// if one is present.
///
/// # Errors
///
/// Returns [`AppError::MissingSecret`] if the variable is unset or blank.
#[track_caller]
pub(crate) fn load_api_key() -> AppResult<SecretString> {
    match dotenvy::dotenv() {
        Ok(path) => debug!(path = ?path, "Loaded .env"),
        Err(e) => debug!(error = %e, "No .env loaded"),
    }

    let key = api_key_from(std::env::var(API_KEY_VAR).ok())?;
    info!(api_key = %masked(&key), "API key loaded");
    Ok(key)
}

#[track_caller]
pub(crate) fn api_key_from(value: Option<String>) -> AppResult<SecretString> {
    match value.map(|v| v.trim().to_string()) {
        Some(v) if !v.is_empty() => Ok(SecretString::from(v)),
        _ => Err(AppError::MissingSecret {
            name: API_KEY_VAR.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }),
    }
}

/// First few characters followed by an ellipsis.
pub(crate) fn masked(key: &SecretString) -> String {
    let prefix: String = key
        .expose_secret()
        .chars()
        .take(VISIBLE_PREFIX_LEN)
        .collect();
    format!("{prefix}...")
}
