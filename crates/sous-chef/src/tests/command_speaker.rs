#![allow(clippy::unwrap_used)]

use crate::CommandSpeaker;

use sous_chef_core::SpeechOutput;

/// WHAT: Console-only speaker always succeeds
/// WHY: The assistant must work without a TTS program installed
#[tokio::test]
async fn given_no_program_when_speaking_then_ok() {
    let mut speaker = CommandSpeaker::new(None, Vec::new());

    assert!(speaker.speak("Step 1 of 2: boil water").await.is_ok());
}

/// WHAT: A program that exits successfully counts as spoken
/// WHY: The speaker waits for the synthesizer to finish
#[cfg(unix)]
#[tokio::test]
async fn given_succeeding_program_when_speaking_then_ok() {
    let mut speaker = CommandSpeaker::new(Some("true".to_string()), Vec::new());

    assert!(speaker.speak("hello").await.is_ok());
}

/// WHAT: A program that exits non-zero is a playback error
/// WHY: Failures are reported so the queue can log them
#[cfg(unix)]
#[tokio::test]
async fn given_failing_program_when_speaking_then_playback_error() {
    let mut speaker = CommandSpeaker::new(Some("false".to_string()), Vec::new());

    assert!(speaker.speak("hello").await.is_err());
}

/// WHAT: A missing program is a playback error
/// WHY: A misconfigured TTS command must not crash the assistant
#[tokio::test]
async fn given_missing_program_when_speaking_then_playback_error() {
    let mut speaker =
        CommandSpeaker::new(Some("sous-chef-no-such-program".to_string()), Vec::new());

    assert!(speaker.speak("hello").await.is_err());
}

/// WHAT: Stopping a cut-off utterance kills the program
/// WHY: Interrupts must silence speech immediately
#[cfg(unix)]
#[tokio::test]
async fn given_long_utterance_when_stopped_then_returns_promptly() {
    // Given: A program that runs far longer than the test
    let mut speaker = CommandSpeaker::new(Some("sleep".to_string()), Vec::new());

    // When: The utterance is cut off and stop is called
    let cut_off = tokio::time::timeout(
        std::time::Duration::from_millis(100),
        speaker.speak("30"),
    )
    .await;
    assert!(cut_off.is_err());

    let stopped = tokio::time::timeout(std::time::Duration::from_secs(5), speaker.stop()).await;

    // Then: stop completes and a second stop is a no-op
    assert!(stopped.is_ok());
    speaker.stop().await;
}
