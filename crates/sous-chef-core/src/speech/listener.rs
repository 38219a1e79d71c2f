use crate::{AssistantSettings, RecognitionError, speech::SpeechInput};

use tokio::{
    sync::{mpsc, watch},
    task::JoinHandle,
};
use tracing::{debug, error, info, warn};

/// Outcome of one listen call, forwarded to the session task.
pub(crate) type ListenEvent = Result<String, RecognitionError>;

/// Spawn the input loop.
///
/// Forwards every outcome, including timeouts, so the session task can
/// check the command deadline on each iteration. Backs off after service
/// errors and exits after a device error, on shutdown, or once the
/// receiver is dropped.
pub(crate) fn spawn_listener<I>(
    mut input: I,
    settings: &AssistantSettings,
    events: mpsc::Sender<ListenEvent>,
    mut shutdown_rx: watch::Receiver<bool>,
) -> JoinHandle<()>
where
    I: SpeechInput + 'static,
{
    let listen_timeout = settings.listen_timeout;
    let phrase_time_limit = settings.phrase_time_limit;
    let backoff = settings.service_backoff;

    tokio::spawn(async move {
        info!(
            listen_timeout_ms = listen_timeout.as_millis(),
            "Listener started"
        );

        loop {
            let outcome = tokio::select! {
                _ = shutdown_rx.changed() => {
                    info!("Listener shutting down");
                    break;
                }
                outcome = input.listen(listen_timeout, phrase_time_limit) => outcome,
            };

            let retry_after_backoff = match &outcome {
                Ok(text) => {
                    debug!(text = %text, "Heard");
                    false
                }
                Err(e) if e.is_expected() => false,
                Err(e) if e.is_fatal() => {
                    error!(error = ?e, "Speech input device failed");
                    false
                }
                Err(e) => {
                    warn!(error = ?e, backoff_ms = backoff.as_millis(), "Recognition service error");
                    true
                }
            };
            let fatal = outcome.as_ref().is_err_and(RecognitionError::is_fatal);

            if events.send(outcome).await.is_err() {
                debug!("Session task gone, listener exiting");
                break;
            }

            if fatal {
                break;
            }

            if retry_after_backoff {
                tokio::select! {
                    _ = shutdown_rx.changed() => break,
                    _ = tokio::time::sleep(backoff) => {}
                }
            }
        }
    })
}
