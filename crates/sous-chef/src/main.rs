//! Sous-chef: a hands-free cooking assistant driven by a trigger word.

mod app;
mod command_speaker;
mod config;
mod console_input;
mod error;
mod secrets;
#[cfg(test)]
mod tests;

pub(crate) use {
    app::App,
    command_speaker::CommandSpeaker,
    console_input::ConsoleInput,
    error::{AppError, Result as AppResult},
};

use crate::{config::Config, secrets::load_api_key};

use std::{panic::Location, time::Duration};

use error_location::ErrorLocation;
use tracing::error;
use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is not set.
const DEFAULT_LOG_FILTER: &str = "sous_chef=info,sous_chef_core=info";

/// How long in-flight tasks get to finish after the assistant returns.
const RUNTIME_SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(1);

/// Application entry point.
fn main() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = match Config::load() {
        Ok(c) => c,
        Err(e) => {
            error!("Failed to load config: {:?}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = config.validate() {
        error!("Config validation failed: {:?}", e);
        std::process::exit(1);
    }

    let api_key = match load_api_key() {
        Ok(key) => key,
        Err(e) => {
            error!("Failed to load API key: {:?}", e);
            std::process::exit(1);
        }
    };

    let rt = match build_runtime() {
        Ok(rt) => rt,
        Err(e) => {
            error!("Failed to create tokio runtime: {:?}", e);
            std::process::exit(1);
        }
    };

    let app = App { config, api_key };
    let result = rt.block_on(app.run());

    // Stdin reads run on a blocking thread that never returns on its own.
    rt.shutdown_timeout(RUNTIME_SHUTDOWN_TIMEOUT);

    if let Err(e) = result {
        error!(error = ?e, "App error");
        std::process::exit(1);
    }
}

#[track_caller]
fn build_runtime() -> AppResult<tokio::runtime::Runtime> {
    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(|e| AppError::RuntimeError {
            reason: e.to_string(),
            location: ErrorLocation::from(Location::caller()),
        })
}
