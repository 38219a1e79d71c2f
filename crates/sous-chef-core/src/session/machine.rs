//! Session state machine.
//!
//! Two independent axes: trigger handling (idle or awaiting a command) and
//! recipe progress (nothing loaded, loaded, cooking at step N, done).
//! Only the session task calls into this type, so no locking is needed;
//! background fetches report back through a channel and their results are
//! applied here in one assignment.

use crate::{
    AssistantSettings, RecipeProvider, RecognitionError,
    session::{
        Command, LoadedRecipe, Progress, Session, TriggerState,
        fetch::{FetchCompletion, spawn_fetch},
        phrases,
    },
    speech::SpeechHandle,
};

use std::{sync::Arc, time::Duration};

use tokio::{sync::mpsc, task::AbortHandle, time::Instant};
use tracing::{debug, error, info, instrument, warn};
use uuid::Uuid;

pub(crate) struct SessionMachine {
    session: Session,
    trigger_word: String,
    command_window: Duration,
    speech: SpeechHandle,
    provider: Arc<dyn RecipeProvider>,
    completions: mpsc::UnboundedSender<FetchCompletion>,
    in_flight: Option<AbortHandle>,
}

impl SessionMachine {
    pub(crate) fn new(
        settings: &AssistantSettings,
        provider: Arc<dyn RecipeProvider>,
        speech: SpeechHandle,
        completions: mpsc::UnboundedSender<FetchCompletion>,
    ) -> Self {
        Self {
            session: Session::default(),
            trigger_word: settings.trigger_word.trim().to_lowercase(),
            command_window: settings.command_window,
            speech,
            provider,
            completions,
            in_flight: None,
        }
    }

    #[cfg(test)]
    pub(crate) fn session(&self) -> &Session {
        &self.session
    }

    pub(crate) fn is_listening(&self) -> bool {
        self.session.listening
    }

    pub(crate) fn command_deadline(&self) -> Option<Instant> {
        self.session.command_deadline()
    }

    pub(crate) fn greet(&self) {
        self.speech.speak(phrases::READY);
        self.speech.speak(phrases::instructions(&self.trigger_word));
    }

    /// Handle one recognised utterance heard at `now`.
    #[instrument(skip(self, now))]
    pub(crate) fn on_utterance(&mut self, text: &str, now: Instant) {
        // A command arriving after its window is treated as fresh input.
        self.on_tick(now);

        let text = text.trim().to_lowercase();

        match self.session.trigger {
            TriggerState::AwaitingCommand { .. } => {
                self.session.trigger = TriggerState::Idle;
                let command = Command::interpret(&text, &self.session);
                info!(text = %text, command = ?command, "Command received");
                self.execute(command);
            }
            TriggerState::Idle => {
                if text.contains(&self.trigger_word) {
                    self.speech.interrupt();
                    self.speech.speak(phrases::ACKNOWLEDGE);
                    self.session.trigger = TriggerState::AwaitingCommand {
                        deadline: now + self.command_window,
                    };
                    info!(
                        window_ms = self.command_window.as_millis(),
                        "Trigger word detected"
                    );
                } else {
                    debug!(text = %text, "No trigger word, ignoring");
                }
            }
        }
    }

    /// Close the command window if it has expired by `now`.
    ///
    /// Runs on every loop iteration, including silent ones.
    pub(crate) fn on_tick(&mut self, now: Instant) {
        match self.session.trigger {
            TriggerState::AwaitingCommand { deadline } if now >= deadline => {
                self.session.trigger = TriggerState::Idle;
                self.speech.speak(phrases::command_timeout(&self.trigger_word));
                info!("Command window timed out");
            }
            _ => {}
        }
    }

    /// The input device is gone; say so and stop listening.
    pub(crate) fn on_device_failure(&mut self, cause: &RecognitionError) {
        error!(error = ?cause, "Speech input lost, shutting down");
        self.speech.speak(phrases::INPUT_DEVICE_LOST);
        self.session.listening = false;
    }

    /// Shutdown was requested from outside the conversation; say goodbye
    /// and stop listening.
    pub(crate) fn on_shutdown_request(&mut self) {
        info!("Shutdown requested");
        self.speech.speak(phrases::FAREWELL);
        self.session.listening = false;
    }

    /// Apply the result of a background fetch.
    ///
    /// Only the most recently dispatched fetch may load a recipe; anything
    /// older is dropped without a word.
    #[instrument(skip(self, completion), fields(request_id = %completion.request_id))]
    pub(crate) fn complete_fetch(&mut self, completion: FetchCompletion) {
        if self.session.pending_fetch != Some(completion.request_id) {
            debug!(query = %completion.query, "Discarding superseded fetch result");
            return;
        }

        self.session.pending_fetch = None;
        self.in_flight = None;

        match completion.result {
            Ok(recipe) => {
                info!(query = %completion.query, title = recipe.title(), "Recipe loaded");

                let loaded = LoadedRecipe::new(recipe);
                self.speech.speak(phrases::recipe_found(loaded.recipe.title()));
                for (i, ingredient) in loaded.recipe.ingredients().iter().enumerate() {
                    self.speech.speak(phrases::enumerated(i + 1, ingredient));
                }
                self.speech
                    .speak(phrases::start_cooking_invite(&self.trigger_word));

                self.session.loaded = Some(loaded);
            }
            Err(e) => {
                warn!(query = %completion.query, error = ?e, "Recipe fetch failed");
                self.speech.speak(phrases::RECIPE_NOT_FOUND);
            }
        }
    }

    /// Abort any fetch still running. Used on shutdown.
    pub(crate) fn abort_fetch(&mut self) {
        if let Some(handle) = self.in_flight.take() {
            handle.abort();
        }
        self.session.pending_fetch = None;
    }

    fn execute(&mut self, command: Command) {
        match command {
            Command::FindRecipe { query } => self.dispatch_fetch(query),
            Command::AskForDish => self.speech.speak(phrases::ASK_FOR_DISH),
            Command::StartCooking => {
                if self.set_progress(Progress::Cooking { step: 0 }) {
                    self.speech.speak(phrases::START_COOKING);
                    self.read_current_step();
                }
            }
            Command::NextStep => self.next_step(),
            Command::RepeatStep => {
                self.speech.speak(phrases::REPEAT_STEP);
                self.read_current_step();
            }
            Command::PreviousStep => self.previous_step(),
            Command::ListIngredients => self.list_ingredients(),
            Command::Stop => {
                self.speech.speak(phrases::FAREWELL);
                self.session.listening = false;
                info!("Stop requested");
            }
            Command::NotUnderstood => self.speech.speak(phrases::NOT_UNDERSTOOD),
        }
    }

    fn dispatch_fetch(&mut self, query: String) {
        if let Some(previous) = self.in_flight.take() {
            previous.abort();
            debug!("Superseded in-flight fetch aborted");
        }

        let request_id = Uuid::new_v4();
        self.session.pending_fetch = Some(request_id);

        info!(request_id = %request_id, query = %query, "Fetching recipe");

        self.in_flight = Some(spawn_fetch(
            Arc::clone(&self.provider),
            request_id,
            query,
            self.completions.clone(),
        ));
    }

    fn next_step(&mut self) {
        let Some(loaded) = self.session.loaded.as_ref() else {
            return;
        };
        let Progress::Cooking { step } = loaded.progress else {
            return;
        };

        let next = step + 1;
        if next < loaded.recipe.step_count() {
            self.set_progress(Progress::Cooking { step: next });
            self.read_current_step();
        } else {
            self.set_progress(Progress::Done);
            self.speech.speak(phrases::RECIPE_COMPLETE);
            info!("Recipe finished");
        }
    }

    fn previous_step(&mut self) {
        match self.session.progress() {
            Some(Progress::Cooking { step }) if step > 0 => {
                self.set_progress(Progress::Cooking { step: step - 1 });
                self.speech.speak(phrases::PREVIOUS_STEP);
                self.read_current_step();
            }
            Some(Progress::Cooking { .. }) => {
                self.speech.speak(phrases::ALREADY_AT_FIRST_STEP);
            }
            _ => {}
        }
    }

    fn list_ingredients(&self) {
        let Some(recipe) = self.session.current_recipe() else {
            return;
        };

        self.speech.speak(phrases::INGREDIENTS_AGAIN);
        for (i, ingredient) in recipe.ingredients().iter().enumerate() {
            self.speech.speak(phrases::enumerated(i + 1, ingredient));
        }
    }

    fn read_current_step(&self) {
        let Some(loaded) = self.session.loaded.as_ref() else {
            return;
        };
        let Progress::Cooking { step } = loaded.progress else {
            return;
        };
        let Some(text) = loaded.recipe.step(step) else {
            return;
        };

        let number = step + 1;
        let total = loaded.recipe.step_count();

        debug!(step = number, total, "Reading step");

        self.speech.speak(phrases::step(number, total, text));
        if number < total {
            self.speech.speak(phrases::next_step_hint(&self.trigger_word));
        }
    }

    /// Returns false when no recipe is loaded.
    fn set_progress(&mut self, progress: Progress) -> bool {
        match self.session.loaded.as_mut() {
            Some(loaded) => {
                loaded.progress = progress;
                true
            }
            None => false,
        }
    }
}
