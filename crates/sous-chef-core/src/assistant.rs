use crate::{
    AssistantError, AssistantSettings, CoreResult, RecipeProvider, RecognitionError,
    session::{FetchCompletion, SessionMachine},
    speech::{SpeechHandle, SpeechInput, SpeechOutput, SpeechQueue, spawn_listener, speech_queue},
};

use std::{panic::Location, sync::Arc, time::Duration};

use error_location::ErrorLocation;
use tokio::{
    sync::{mpsc, watch},
    time::{Instant, sleep_until},
};
use tracing::{debug, info, instrument, warn};

/// How long to wait for the listener task after shutdown is signalled.
const LISTENER_JOIN_TIMEOUT: Duration = Duration::from_secs(1);

/// The voice cooking assistant.
///
/// Owns the session and runs the single task allowed to mutate it. The
/// listener, the speech consumer and any recipe fetches run as separate
/// tasks and talk to it over channels.
pub struct Assistant {
    settings: AssistantSettings,
    machine: SessionMachine,
    completions: mpsc::UnboundedReceiver<FetchCompletion>,
    speech: SpeechHandle,
    queue: SpeechQueue,
}

impl Assistant {
    /// Create an assistant that fetches recipes from `provider`.
    pub fn new(settings: AssistantSettings, provider: Arc<dyn RecipeProvider>) -> Self {
        let (speech, queue) = speech_queue();
        let (completions_tx, completions) = mpsc::unbounded_channel();
        let machine = SessionMachine::new(&settings, provider, speech.clone(), completions_tx);

        Self {
            settings,
            machine,
            completions,
            speech,
            queue,
        }
    }

    /// Run until a stop command or input device failure.
    ///
    /// Everything already queued for speaking, including the farewell, is
    /// spoken before this returns.
    ///
    /// # Errors
    ///
    /// Returns [`AssistantError::Task`] if the speech consumer panicked.
    pub async fn run<I, O>(self, input: I, output: O) -> CoreResult<()>
    where
        I: SpeechInput + 'static,
        O: SpeechOutput + 'static,
    {
        self.run_until(input, output, std::future::pending()).await
    }

    /// Like [`Assistant::run`], but also says goodbye and shuts down in
    /// order once `shutdown` completes, e.g. on Ctrl-C.
    ///
    /// # Errors
    ///
    /// Returns [`AssistantError::Task`] if the speech consumer panicked.
    #[instrument(skip_all)]
    pub async fn run_until<I, O, S>(self, input: I, output: O, shutdown: S) -> CoreResult<()>
    where
        I: SpeechInput + 'static,
        O: SpeechOutput + 'static,
        S: Future<Output = ()>,
    {
        let Assistant {
            settings,
            mut machine,
            mut completions,
            speech,
            queue,
        } = self;

        info!(trigger_word = %settings.trigger_word, "Sous-chef starting");

        let speaker = queue.spawn(output);
        machine.greet();

        let (event_tx, mut event_rx) = mpsc::channel(32);
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let listener = spawn_listener(input, &settings, event_tx, shutdown_rx);

        tokio::pin!(shutdown);

        while machine.is_listening() {
            let deadline = machine.command_deadline();

            tokio::select! {
                event = event_rx.recv() => {
                    let now = Instant::now();
                    match event {
                        Some(Ok(text)) => machine.on_utterance(&text, now),
                        Some(Err(e)) if e.is_fatal() => machine.on_device_failure(&e),
                        Some(Err(_)) => machine.on_tick(now),
                        None => machine.on_device_failure(&RecognitionError::device("listener stopped")),
                    }
                }

                Some(completion) = completions.recv() => {
                    machine.complete_fetch(completion);
                }

                _ = sleep_until(deadline.unwrap_or_else(Instant::now)), if deadline.is_some() => {
                    machine.on_tick(Instant::now());
                }

                _ = &mut shutdown => {
                    machine.on_shutdown_request();
                }
            }
        }

        if shutdown_tx.send(true).is_err() {
            debug!("Listener already gone");
        }
        drop(event_rx);

        match tokio::time::timeout(LISTENER_JOIN_TIMEOUT, listener).await {
            Ok(Ok(())) => debug!("Listener stopped cleanly"),
            Ok(Err(e)) => warn!(error = ?e, "Listener task panicked"),
            Err(_) => debug!(
                "Listener did not stop within timeout, \
                   will be cleaned up on exit"
            ),
        }

        machine.abort_fetch();
        speech.shutdown();

        speaker.await.map_err(|e| AssistantError::Task {
            reason: format!("Speech consumer failed: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        info!("Sous-chef shut down");

        Ok(())
    }
}
