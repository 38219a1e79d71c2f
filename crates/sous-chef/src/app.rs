use crate::{AppResult, CommandSpeaker, ConsoleInput, config::Config};

use std::sync::Arc;

use secrecy::SecretString;
use sous_chef_core::{Assistant, RecipeProvider, gemini::GeminiProvider};
use tracing::{info, instrument, warn};

/// Main application state.
///
/// Wires the Gemini recipe provider and the console speech collaborators
/// into an [`Assistant`] and runs it to completion.
pub struct App {
    pub(crate) config: Config,
    pub(crate) api_key: SecretString,
}

impl App {
    /// Run the assistant until the user says stop or input closes.
    #[instrument(skip(self))]
    pub(crate) async fn run(self) -> AppResult<()> {
        let App { config, api_key } = self;

        let provider: Arc<dyn RecipeProvider> = Arc::new(GeminiProvider::new(
            api_key,
            &config.provider.model,
            &config.provider.endpoint,
        ));

        let speaker = CommandSpeaker::from_config(&config.speech);
        let input = ConsoleInput::stdin();

        info!(
            model = %config.provider.model,
            tts = config.speech.command.as_deref().unwrap_or("console"),
            "Type what you would say; each line is one utterance"
        );

        Assistant::new(config.assistant.to_settings(), provider)
            .run_until(input, speaker, interrupted())
            .await?;

        info!("Sous-chef stopped");
        Ok(())
    }
}

/// Completes on Ctrl-C. Never completes if the handler cannot be installed.
async fn interrupted() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Interrupt received, shutting down"),
        Err(e) => {
            warn!(error = %e, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    }
}
