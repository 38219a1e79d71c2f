//! Typed-utterance input for terminals without a recognizer.
//!
//! Each line read is treated as one recognised phrase.

use std::time::Duration;

use async_trait::async_trait;
use sous_chef_core::{RecognitionError, SpeechInput};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader, Lines, Stdin};
use tracing::{debug, instrument};

/// Reads utterances line by line from an async reader, stdin by default.
pub struct ConsoleInput<R = BufReader<Stdin>> {
    lines: Lines<R>,
}

impl ConsoleInput {
    /// Read utterances from the process's standard input.
    pub fn stdin() -> Self {
        Self::from_reader(BufReader::new(tokio::io::stdin()))
    }
}

impl<R> ConsoleInput<R>
where
    R: AsyncBufRead + Unpin + Send,
{
    /// Read utterances from any buffered reader.
    pub fn from_reader(reader: R) -> Self {
        Self {
            lines: reader.lines(),
        }
    }
}

#[async_trait]
impl<R> SpeechInput for ConsoleInput<R>
where
    R: AsyncBufRead + Unpin + Send,
{
    #[instrument(skip(self))]
    async fn listen(
        &mut self,
        timeout: Duration,
        _phrase_time_limit: Duration,
    ) -> Result<String, RecognitionError> {
        // next_line is cancel safe, so a timed out read loses nothing.
        match tokio::time::timeout(timeout, self.lines.next_line()).await {
            Err(_) => Err(RecognitionError::Timeout),
            Ok(Ok(Some(line))) => {
                let line = line.trim();
                if line.is_empty() {
                    Err(RecognitionError::Unintelligible)
                } else {
                    debug!(utterance = %line, "Line read");
                    Ok(line.to_string())
                }
            }
            Ok(Ok(None)) => Err(RecognitionError::device("standard input closed")),
            Ok(Err(e)) => Err(RecognitionError::service(format!(
                "Failed to read input: {}",
                e
            ))),
        }
    }
}
