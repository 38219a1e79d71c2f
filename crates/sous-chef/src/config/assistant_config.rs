use crate::config::{
    default_command_window_secs, default_listen_timeout_secs, default_phrase_time_limit_secs,
    default_service_backoff_secs, default_trigger_word,
};

use std::time::Duration;

use serde::{Deserialize, Serialize};
use sous_chef_core::AssistantSettings;

/// Trigger word and listening cadence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssistantConfig {
    /// Word that opens a command window.
    #[serde(default = "default_trigger_word")]
    pub trigger_word: String,

    /// Seconds a command window stays open.
    #[serde(default = "default_command_window_secs")]
    pub command_window_secs: u64,

    /// Seconds each listen call waits for speech to start.
    #[serde(default = "default_listen_timeout_secs")]
    pub listen_timeout_secs: u64,

    /// Longest phrase captured per listen call, in seconds.
    #[serde(default = "default_phrase_time_limit_secs")]
    pub phrase_time_limit_secs: u64,

    /// Seconds to wait after a recognition service error.
    #[serde(default = "default_service_backoff_secs")]
    pub service_backoff_secs: u64,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            trigger_word: default_trigger_word(),
            command_window_secs: default_command_window_secs(),
            listen_timeout_secs: default_listen_timeout_secs(),
            phrase_time_limit_secs: default_phrase_time_limit_secs(),
            service_backoff_secs: default_service_backoff_secs(),
        }
    }
}

impl AssistantConfig {
    /// Convert to the core crate's runtime settings.
    pub fn to_settings(&self) -> AssistantSettings {
        AssistantSettings {
            trigger_word: self.trigger_word.clone(),
            command_window: Duration::from_secs(self.command_window_secs),
            listen_timeout: Duration::from_secs(self.listen_timeout_secs),
            phrase_time_limit: Duration::from_secs(self.phrase_time_limit_secs),
            service_backoff: Duration::from_secs(self.service_backoff_secs),
        }
    }
}
