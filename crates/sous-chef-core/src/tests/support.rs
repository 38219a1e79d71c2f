//! Test doubles for the speech and recipe collaborators.

#![allow(clippy::unwrap_used)]

use crate::{FetchError, Recipe, RecipeProvider, RecognitionError, SpeechError, SpeechInput, SpeechOutput};

use std::{
    collections::{HashMap, VecDeque},
    panic::Location,
    sync::{
        Arc, Mutex,
        atomic::{AtomicUsize, Ordering},
    },
    time::Duration,
};

use async_trait::async_trait;
use error_location::ErrorLocation;
use tokio::sync::Notify;

pub(crate) fn tea() -> Recipe {
    Recipe::new("Tea", ["water", "tea leaves"], ["boil water", "steep leaves"]).unwrap()
}

pub(crate) fn pancakes() -> Recipe {
    Recipe::new("Pancakes", ["flour", "egg"], ["mix", "cook"]).unwrap()
}

pub(crate) fn coffee() -> Recipe {
    Recipe::new("Coffee", ["beans", "water"], ["grind beans", "brew", "pour"]).unwrap()
}

/// Answers known queries immediately, fails everything else.
#[derive(Default)]
pub(crate) struct StubProvider {
    recipes: HashMap<String, Recipe>,
    calls: AtomicUsize,
}

impl StubProvider {
    pub(crate) fn with(mut self, query: &str, recipe: Recipe) -> Self {
        self.recipes.insert(query.to_string(), recipe);
        self
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RecipeProvider for StubProvider {
    async fn fetch(&self, query: &str) -> Result<Recipe, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.recipes
            .get(query)
            .cloned()
            .ok_or_else(|| FetchError::Provider {
                reason: format!("no recipe for {query}"),
                location: ErrorLocation::from(Location::caller()),
            })
    }
}

/// Records every utterance it is asked to speak.
///
/// An utterance equal to `block_on` never finishes on its own; it signals
/// `started` and then waits to be cut off.
#[derive(Clone, Default)]
pub(crate) struct RecordingOutput {
    pub(crate) spoken: Arc<Mutex<Vec<String>>>,
    pub(crate) stops: Arc<AtomicUsize>,
    pub(crate) started: Arc<Notify>,
    block_on: Option<String>,
}

impl RecordingOutput {
    pub(crate) fn blocking_on(text: &str) -> Self {
        Self {
            block_on: Some(text.to_string()),
            ..Self::default()
        }
    }

    pub(crate) fn spoken(&self) -> Vec<String> {
        self.spoken.lock().unwrap().clone()
    }
}

#[async_trait]
impl SpeechOutput for RecordingOutput {
    async fn speak(&mut self, text: &str) -> Result<(), SpeechError> {
        if self.block_on.as_deref() == Some(text) {
            self.started.notify_one();
            std::future::pending::<()>().await;
        }

        if text == "unspeakable" {
            return Err(SpeechError::playback("synthesiser rejected text"));
        }

        self.spoken.lock().unwrap().push(text.to_string());
        Ok(())
    }

    async fn stop(&mut self) {
        self.stops.fetch_add(1, Ordering::SeqCst);
    }
}

/// Plays back a fixed script of listen outcomes, each after a delay.
///
/// Reports a device failure once the script runs out.
pub(crate) struct ScriptedInput {
    script: VecDeque<(Duration, Result<String, RecognitionError>)>,
}

impl ScriptedInput {
    pub(crate) fn new() -> Self {
        Self {
            script: VecDeque::new(),
        }
    }

    pub(crate) fn say(mut self, after: Duration, text: &str) -> Self {
        self.script.push_back((after, Ok(text.to_string())));
        self
    }

    pub(crate) fn fail(mut self, after: Duration, error: RecognitionError) -> Self {
        self.script.push_back((after, Err(error)));
        self
    }
}

#[async_trait]
impl SpeechInput for ScriptedInput {
    async fn listen(
        &mut self,
        _timeout: Duration,
        _phrase_time_limit: Duration,
    ) -> Result<String, RecognitionError> {
        match self.script.pop_front() {
            Some((after, outcome)) => {
                tokio::time::sleep(after).await;
                outcome
            }
            None => Err(RecognitionError::device("script exhausted")),
        }
    }
}
