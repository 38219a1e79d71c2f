//! Single-consumer speech queue.
//!
//! Any number of producers enqueue through cloned [`SpeechHandle`]s; one
//! task drains the [`SpeechQueue`] into a [`SpeechOutput`], so utterances
//! are spoken strictly in enqueue order and never overlap.

use crate::speech::SpeechOutput;

use std::sync::Arc;

use tokio::{
    sync::{mpsc, watch},
    task::JoinHandle,
};
use tracing::{debug, info, instrument, warn};

/// One ordered unit of speech output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpeakRequest {
    /// Text to speak.
    pub text: String,
    /// Interrupt epoch at enqueue time. Requests from an older epoch are
    /// discarded by the consumer.
    epoch: u64,
}

#[derive(Debug)]
pub(crate) enum SpeechMessage {
    Speak(SpeakRequest),
    Shutdown,
}

/// Producer side of the speech queue. Cheap to clone.
#[derive(Debug, Clone)]
pub struct SpeechHandle {
    tx: mpsc::UnboundedSender<SpeechMessage>,
    epoch: Arc<watch::Sender<u64>>,
}

/// Consumer side of the speech queue.
#[derive(Debug)]
pub struct SpeechQueue {
    rx: mpsc::UnboundedReceiver<SpeechMessage>,
    epoch: watch::Receiver<u64>,
}

/// Create a connected handle/queue pair.
pub fn speech_queue() -> (SpeechHandle, SpeechQueue) {
    let (tx, rx) = mpsc::unbounded_channel();
    let (epoch_tx, epoch_rx) = watch::channel(0);

    (
        SpeechHandle {
            tx,
            epoch: Arc::new(epoch_tx),
        },
        SpeechQueue {
            rx,
            epoch: epoch_rx,
        },
    )
}

impl SpeechHandle {
    /// Enqueue `text` for speaking. Never blocks.
    pub fn speak(&self, text: impl Into<String>) {
        let request = SpeakRequest {
            text: text.into(),
            epoch: *self.epoch.borrow(),
        };

        debug!(text = %request.text, "Speech enqueued");

        if self.tx.send(SpeechMessage::Speak(request)).is_err() {
            warn!("Speech queue closed, dropping utterance");
        }
    }

    /// Stop the current utterance and drop everything already queued.
    ///
    /// Requests enqueued after this call are unaffected.
    pub fn interrupt(&self) {
        self.epoch.send_modify(|epoch| *epoch += 1);
        debug!(epoch = *self.epoch.borrow(), "Speech interrupted");
    }

    /// Ask the consumer to stop once everything enqueued so far is spoken.
    pub fn shutdown(&self) {
        if self.tx.send(SpeechMessage::Shutdown).is_err() {
            debug!("Speech queue already closed");
        }
    }
}

impl SpeechQueue {
    /// Spawn the consumer task on the current runtime.
    pub fn spawn<O>(self, output: O) -> JoinHandle<()>
    where
        O: SpeechOutput + 'static,
    {
        tokio::spawn(self.run(output))
    }

    /// Drain the queue into `output` until shutdown or all handles drop.
    #[instrument(skip_all)]
    pub async fn run<O: SpeechOutput>(mut self, mut output: O) {
        while let Some(message) = self.rx.recv().await {
            let request = match message {
                SpeechMessage::Speak(request) => request,
                SpeechMessage::Shutdown => {
                    info!("Speech queue shutting down");
                    return;
                }
            };

            let current = *self.epoch.borrow_and_update();
            if request.epoch < current {
                debug!(text = %request.text, "Dropping interrupted utterance");
                continue;
            }

            let outcome = tokio::select! {
                result = output.speak(&request.text) => Some(result),
                Ok(()) = self.epoch.changed() => None,
            };

            match outcome {
                Some(Ok(())) => {}
                Some(Err(e)) => warn!(error = ?e, "Speech playback failed"),
                None => {
                    output.stop().await;
                    debug!(text = %request.text, "Utterance cut off");
                }
            }
        }

        info!("All speech handles dropped, queue closed");
    }

    /// Pull every message currently buffered without running a consumer.
    #[cfg(test)]
    pub(crate) fn drain(&mut self) -> Vec<SpeechMessage> {
        let mut messages = Vec::new();
        while let Ok(message) = self.rx.try_recv() {
            messages.push(message);
        }
        messages
    }

    /// Texts of every buffered request, interrupted or not.
    #[cfg(test)]
    pub(crate) fn drain_texts(&mut self) -> Vec<String> {
        self.drain()
            .into_iter()
            .filter_map(|message| match message {
                SpeechMessage::Speak(request) => Some(request.text),
                SpeechMessage::Shutdown => None,
            })
            .collect()
    }
}
