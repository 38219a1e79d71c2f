mod listener;
mod serializer;

pub(crate) use listener::spawn_listener;

pub use serializer::{SpeakRequest, SpeechHandle, SpeechQueue, speech_queue};

use crate::{RecognitionError, SpeechError};

use std::time::Duration;

use async_trait::async_trait;

/// Producer of recognised utterances.
///
/// Each call blocks for at most `timeout` waiting for speech to begin and
/// then captures up to `phrase_time_limit` of it.
#[async_trait]
pub trait SpeechInput: Send {
    /// Wait for the next utterance.
    ///
    /// # Errors
    ///
    /// [`RecognitionError::Timeout`] and [`RecognitionError::Unintelligible`]
    /// are routine; `Service` is retryable; `Device` ends listening.
    async fn listen(
        &mut self,
        timeout: Duration,
        phrase_time_limit: Duration,
    ) -> Result<String, RecognitionError>;
}

/// Consumer that renders text audibly.
///
/// Only ever driven by the single [`SpeechQueue`] consumer task.
#[async_trait]
pub trait SpeechOutput: Send {
    /// Speak `text`, returning once it has finished.
    ///
    /// The returned future may be dropped mid-utterance, after which
    /// [`SpeechOutput::stop`] is called.
    ///
    /// # Errors
    ///
    /// Returns [`SpeechError`] if the utterance could not be rendered.
    async fn speak(&mut self, text: &str) -> Result<(), SpeechError>;

    /// Silence whatever is currently playing.
    async fn stop(&mut self);
}
