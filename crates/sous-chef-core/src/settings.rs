use std::time::Duration;

/// Word that opens a command window.
pub const DEFAULT_TRIGGER_WORD: &str = "assistant";

/// How long a command window stays open after the trigger word.
pub const DEFAULT_COMMAND_WINDOW: Duration = Duration::from_secs(10);

/// Per-call listen timeout. Kept short so the loop re-checks the command
/// deadline and the listening flag at least this often.
pub const DEFAULT_LISTEN_TIMEOUT: Duration = Duration::from_secs(1);

/// Longest single phrase captured by one listen call.
pub const DEFAULT_PHRASE_TIME_LIMIT: Duration = Duration::from_secs(5);

/// Pause before listening again after a recognition service error.
pub const DEFAULT_SERVICE_BACKOFF: Duration = Duration::from_secs(2);

/// Runtime knobs for the assistant loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssistantSettings {
    /// Trigger word, matched case-insensitively as a substring.
    pub trigger_word: String,
    /// Command window length.
    pub command_window: Duration,
    /// Per-call listen timeout.
    pub listen_timeout: Duration,
    /// Per-call phrase limit.
    pub phrase_time_limit: Duration,
    /// Backoff after a recognition service error.
    pub service_backoff: Duration,
}

impl Default for AssistantSettings {
    fn default() -> Self {
        Self {
            trigger_word: DEFAULT_TRIGGER_WORD.to_string(),
            command_window: DEFAULT_COMMAND_WINDOW,
            listen_timeout: DEFAULT_LISTEN_TIMEOUT,
            phrase_time_limit: DEFAULT_PHRASE_TIME_LIMIT,
            service_backoff: DEFAULT_SERVICE_BACKOFF,
        }
    }
}
