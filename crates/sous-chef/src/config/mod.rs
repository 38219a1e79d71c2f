mod assistant_config;
#[allow(clippy::module_inception)]
mod config;
mod provider_config;
mod speech_config;

pub(crate) use {
    assistant_config::AssistantConfig, config::Config, provider_config::ProviderConfig,
    speech_config::SpeechConfig,
};

pub(crate) const DEFAULT_COMMAND_WINDOW_SECS: u64 = sous_chef_core::DEFAULT_COMMAND_WINDOW.as_secs();
pub(crate) const DEFAULT_LISTEN_TIMEOUT_SECS: u64 = sous_chef_core::DEFAULT_LISTEN_TIMEOUT.as_secs();
pub(crate) const DEFAULT_PHRASE_TIME_LIMIT_SECS: u64 =
    sous_chef_core::DEFAULT_PHRASE_TIME_LIMIT.as_secs();
pub(crate) const DEFAULT_SERVICE_BACKOFF_SECS: u64 =
    sous_chef_core::DEFAULT_SERVICE_BACKOFF.as_secs();

pub(crate) fn default_trigger_word() -> String {
    sous_chef_core::DEFAULT_TRIGGER_WORD.to_string()
}

pub(crate) fn default_command_window_secs() -> u64 {
    DEFAULT_COMMAND_WINDOW_SECS
}

pub(crate) fn default_listen_timeout_secs() -> u64 {
    DEFAULT_LISTEN_TIMEOUT_SECS
}

pub(crate) fn default_phrase_time_limit_secs() -> u64 {
    DEFAULT_PHRASE_TIME_LIMIT_SECS
}

pub(crate) fn default_service_backoff_secs() -> u64 {
    DEFAULT_SERVICE_BACKOFF_SECS
}

pub(crate) fn default_model() -> String {
    sous_chef_core::gemini::DEFAULT_MODEL.to_string()
}

pub(crate) fn default_endpoint() -> String {
    sous_chef_core::gemini::DEFAULT_ENDPOINT.to_string()
}
