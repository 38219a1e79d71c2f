//! Sous-chef Core Library
//!
//! Trigger-word command loop, recipe narration state machine and a
//! serialised speech queue for a hands-free cooking assistant. Speech
//! recognition, speech synthesis and recipe generation are collaborators
//! supplied through [`SpeechInput`], [`SpeechOutput`] and
//! [`RecipeProvider`].
//!
//! # Example
//!
//! ```no_run
//! use sous_chef_core::{
//!     Assistant, AssistantSettings, CoreResult, RecipeProvider, SpeechInput, SpeechOutput,
//! };
//!
//! use std::sync::Arc;
//!
//! async fn cook(
//!     provider: Arc<dyn RecipeProvider>,
//!     input: impl SpeechInput + 'static,
//!     output: impl SpeechOutput + 'static,
//! ) -> CoreResult<()> {
//!     Assistant::new(AssistantSettings::default(), provider)
//!         .run(input, output)
//!         .await
//! }
//! ```

mod assistant;
mod error;
mod recipe;
mod session;
mod settings;
mod speech;

pub use {
    assistant::Assistant,
    error::{AssistantError, FetchError, RecognitionError, Result as CoreResult, SpeechError},
    recipe::{Recipe, RecipeData, RecipeProvider, gemini},
    session::{Command, Progress, Session, TriggerState},
    settings::{
        AssistantSettings, DEFAULT_COMMAND_WINDOW, DEFAULT_LISTEN_TIMEOUT,
        DEFAULT_PHRASE_TIME_LIMIT, DEFAULT_SERVICE_BACKOFF, DEFAULT_TRIGGER_WORD,
    },
    speech::{SpeakRequest, SpeechHandle, SpeechInput, SpeechOutput, SpeechQueue, speech_queue},
};

#[cfg(test)]
mod tests;
