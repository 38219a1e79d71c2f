#![allow(clippy::unwrap_used)]

use crate::{
    AppError,
    secrets::{API_KEY_VAR, api_key_from, masked},
};

use secrecy::{ExposeSecret, SecretString};

/// WHAT: A present key is accepted and trimmed
/// WHY: Trailing newlines from .env files must not reach the API
#[test]
fn given_key_when_loading_then_trimmed_secret_returned() {
    let key = api_key_from(Some("  abcd1234\n".to_string())).unwrap();

    assert_eq!(key.expose_secret(), "abcd1234");
}

/// WHAT: A missing key is a fatal startup error
/// WHY: The assistant cannot fetch recipes without credentials
#[test]
fn given_no_key_when_loading_then_missing_secret() {
    let result = api_key_from(None);

    assert!(matches!(
        result,
        Err(AppError::MissingSecret { ref name, .. }) if name == API_KEY_VAR
    ));
}

/// WHAT: A blank key is treated as missing
/// WHY: `GEMINI_API_KEY=` in a .env file is a configuration mistake
#[test]
fn given_blank_key_when_loading_then_missing_secret() {
    assert!(matches!(
        api_key_from(Some("   ".to_string())),
        Err(AppError::MissingSecret { .. })
    ));
}

/// WHAT: Masking shows only a short prefix
/// WHY: Logs must never contain the full key
#[test]
fn given_key_when_masking_then_only_prefix_visible() {
    let key = SecretString::from("abcd1234secret".to_string());

    let shown = masked(&key);

    assert_eq!(shown, "abcd...");
    assert!(!shown.contains("secret"));
}
