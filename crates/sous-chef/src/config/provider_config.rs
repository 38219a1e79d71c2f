use crate::config::{default_endpoint, default_model};

use serde::{Deserialize, Serialize};

/// Recipe provider configuration. The API key comes from the environment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Gemini model name.
    #[serde(default = "default_model")]
    pub model: String,

    /// Base URL of the models API.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            endpoint: default_endpoint(),
        }
    }
}
