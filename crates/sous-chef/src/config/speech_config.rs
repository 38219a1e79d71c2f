use serde::{Deserialize, Serialize};

/// Speech output configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SpeechConfig {
    /// Text-to-speech program, e.g. `espeak` or `say` (None = console only).
    #[serde(default)]
    pub command: Option<String>,

    /// Extra arguments placed before the text.
    #[serde(default)]
    pub args: Vec<String>,
}
