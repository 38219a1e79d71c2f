//! Speech output through the console and an optional TTS program.
//!
//! Every utterance is echoed as `Assistant: <text>`. When a program is
//! configured (`espeak`, `say`, ...) it is run once per utterance with the
//! text as its last argument, and killed if the utterance is cut off.

use crate::config::SpeechConfig;

use std::process::Stdio;

use async_trait::async_trait;
use sous_chef_core::{SpeechError, SpeechOutput};
use tokio::{
    io::AsyncWriteExt,
    process::{Child, Command},
};
use tracing::{debug, instrument, warn};

/// Speaks by echoing to stdout and running an external synthesizer.
pub struct CommandSpeaker {
    program: Option<String>,
    args: Vec<String>,
    current: Option<Child>,
}

impl CommandSpeaker {
    /// Create a speaker. `program = None` gives console-only output.
    pub fn new(program: Option<String>, args: Vec<String>) -> Self {
        Self {
            program,
            args,
            current: None,
        }
    }

    /// Create a speaker from the `[speech]` config section.
    pub fn from_config(config: &SpeechConfig) -> Self {
        Self::new(config.command.clone(), config.args.clone())
    }

    async fn echo(text: &str) -> Result<(), SpeechError> {
        let mut stdout = tokio::io::stdout();
        stdout
            .write_all(format!("Assistant: {}\n", text).as_bytes())
            .await
            .map_err(|e| SpeechError::playback(format!("Failed to write to console: {}", e)))?;
        stdout
            .flush()
            .await
            .map_err(|e| SpeechError::playback(format!("Failed to flush console: {}", e)))
    }
}

#[async_trait]
impl SpeechOutput for CommandSpeaker {
    #[instrument(skip(self, text), fields(text_len = text.len()))]
    async fn speak(&mut self, text: &str) -> Result<(), SpeechError> {
        Self::echo(text).await?;

        let Some(program) = self.program.as_deref() else {
            return Ok(());
        };

        let child = Command::new(program)
            .args(&self.args)
            .arg(text)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| SpeechError::playback(format!("Failed to start {}: {}", program, e)))?;

        // Kept in `current` so stop() can reach it if this future is dropped.
        let status = self.current.insert(child).wait().await;
        self.current = None;

        let status = status
            .map_err(|e| SpeechError::playback(format!("Failed to wait for {}: {}", program, e)))?;

        if !status.success() {
            return Err(SpeechError::playback(format!(
                "{} exited with {}",
                program, status
            )));
        }

        debug!(program = %program, "Utterance played");
        Ok(())
    }

    async fn stop(&mut self) {
        if let Some(mut child) = self.current.take() {
            match child.kill().await {
                Ok(()) => debug!("Interrupted utterance"),
                Err(e) => warn!(error = %e, "Failed to stop speech program"),
            }
        }
    }
}
