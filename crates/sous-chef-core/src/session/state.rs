use crate::Recipe;

use std::sync::Arc;

use tokio::time::Instant;
use uuid::Uuid;

/// Trigger-handling axis of the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerState {
    /// Listening for the trigger word.
    Idle,
    /// Trigger heard; the next utterance is a command.
    AwaitingCommand {
        /// When the command window closes.
        deadline: Instant,
    },
}

/// Progress through a loaded recipe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Progress {
    /// Loaded, waiting for "start cooking".
    NotStarted,
    /// Narrating; `step` is always a valid index into the recipe's steps.
    Cooking {
        /// Zero-based step cursor.
        step: usize,
    },
    /// Walked past the last step.
    Done,
}

/// A recipe together with how far through it the user is.
///
/// Replaced as a whole whenever a new recipe loads.
#[derive(Debug, Clone)]
pub(crate) struct LoadedRecipe {
    pub(crate) recipe: Arc<Recipe>,
    pub(crate) progress: Progress,
}

impl LoadedRecipe {
    pub(crate) fn new(recipe: Recipe) -> Self {
        Self {
            recipe: Arc::new(recipe),
            progress: Progress::NotStarted,
        }
    }
}

/// Process-wide assistant state.
///
/// Owned by the session task; everything else talks to it through
/// messages.
#[derive(Debug, Clone)]
pub struct Session {
    pub(crate) listening: bool,
    pub(crate) trigger: TriggerState,
    pub(crate) loaded: Option<LoadedRecipe>,
    pub(crate) pending_fetch: Option<Uuid>,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            listening: true,
            trigger: TriggerState::Idle,
            loaded: None,
            pending_fetch: None,
        }
    }
}

impl Session {
    /// False once a stop command or device failure has been handled.
    pub fn is_listening(&self) -> bool {
        self.listening
    }

    /// Current trigger-handling state.
    pub fn trigger(&self) -> TriggerState {
        self.trigger
    }

    /// Whether the next utterance will be treated as a command.
    pub fn is_awaiting_command(&self) -> bool {
        matches!(self.trigger, TriggerState::AwaitingCommand { .. })
    }

    /// Deadline of the open command window, if any.
    pub fn command_deadline(&self) -> Option<Instant> {
        match self.trigger {
            TriggerState::AwaitingCommand { deadline } => Some(deadline),
            TriggerState::Idle => None,
        }
    }

    /// Most recently loaded recipe.
    pub fn current_recipe(&self) -> Option<&Recipe> {
        self.loaded.as_ref().map(|loaded| loaded.recipe.as_ref())
    }

    /// Progress through the loaded recipe, `None` if nothing is loaded.
    pub fn progress(&self) -> Option<Progress> {
        self.loaded.as_ref().map(|loaded| loaded.progress)
    }

    /// Whether a step is being narrated.
    pub fn is_cooking(&self) -> bool {
        matches!(self.progress(), Some(Progress::Cooking { .. }))
    }

    /// Zero-based step cursor.
    ///
    /// Zero before cooking starts, the step count once done.
    pub fn current_step(&self) -> usize {
        match self.loaded.as_ref() {
            Some(LoadedRecipe {
                progress: Progress::Cooking { step },
                ..
            }) => *step,
            Some(LoadedRecipe {
                recipe,
                progress: Progress::Done,
            }) => recipe.step_count(),
            _ => 0,
        }
    }

    /// Id of the only fetch whose result may still load a recipe.
    pub fn pending_fetch(&self) -> Option<Uuid> {
        self.pending_fetch
    }
}
