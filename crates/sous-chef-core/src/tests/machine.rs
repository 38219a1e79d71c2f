use crate::{
    AssistantSettings, Progress, RecognitionError, SpeechQueue,
    session::{FetchCompletion, SessionMachine, phrases},
    speech_queue,
    tests::support::{StubProvider, coffee, pancakes, tea},
};

use std::{sync::Arc, time::Duration};

use tokio::{sync::mpsc, time::Instant};

const TRIGGER: &str = "assistant";

struct Harness {
    machine: SessionMachine,
    queue: SpeechQueue,
    completions: mpsc::UnboundedReceiver<FetchCompletion>,
    provider: Arc<StubProvider>,
}

impl Harness {
    fn new(provider: StubProvider) -> Self {
        let provider = Arc::new(provider);
        let (speech, queue) = speech_queue();
        let (completions_tx, completions) = mpsc::unbounded_channel();
        let machine = SessionMachine::new(
            &AssistantSettings::default(),
            provider.clone(),
            speech,
            completions_tx,
        );

        Self {
            machine,
            queue,
            completions,
            provider,
        }
    }

    /// Trigger then issue `command`, returning what was spoken.
    fn command(&mut self, command: &str) -> Vec<String> {
        let now = Instant::now();
        self.machine.on_utterance(TRIGGER, now);
        self.machine.on_utterance(command, now);
        let mut spoken = self.queue.drain_texts();
        assert_eq!(spoken.first().map(String::as_str), Some(phrases::ACKNOWLEDGE));
        spoken.remove(0);
        spoken
    }

    /// Wait for the next fetch to finish and apply it.
    #[allow(clippy::unwrap_used)]
    async fn finish_fetch(&mut self) -> Vec<String> {
        let completion = self.completions.recv().await.unwrap();
        self.machine.complete_fetch(completion);
        self.queue.drain_texts()
    }

    async fn load(&mut self, query: &str) {
        self.command(&format!("recipe for {query}"));
        self.finish_fetch().await;
    }
}

fn step_lines(number: usize, total: usize, text: &str) -> Vec<String> {
    let mut lines = vec![phrases::step(number, total, text)];
    if number < total {
        lines.push(phrases::next_step_hint(TRIGGER));
    }
    lines
}

/// WHAT: Trigger word opens a command window and is acknowledged
/// WHY: Entry point of every interaction
#[tokio::test]
async fn given_idle_when_trigger_word_heard_then_awaits_command() {
    // Given: A fresh session
    let mut h = Harness::new(StubProvider::default());
    let now = Instant::now();

    // When: The trigger word is heard mid-sentence
    h.machine.on_utterance("Hey Assistant, are you there?", now);

    // Then: Acknowledged and awaiting a command for the full window
    assert_eq!(h.queue.drain_texts(), [phrases::ACKNOWLEDGE]);
    assert!(h.machine.session().is_awaiting_command());
    assert_eq!(
        h.machine.command_deadline(),
        Some(now + Duration::from_secs(10))
    );
}

/// WHAT: Utterances without the trigger word are ignored while idle
/// WHY: Background conversation must not run commands
#[tokio::test]
async fn given_idle_when_command_without_trigger_then_ignored() {
    let mut h = Harness::new(StubProvider::default());

    h.machine.on_utterance("stop", Instant::now());

    assert!(h.queue.drain_texts().is_empty());
    assert!(h.machine.is_listening());
    assert!(!h.machine.session().is_awaiting_command());
}

/// WHAT: Command text that also contains the trigger word is a command
/// WHY: Command handling takes priority over re-triggering
#[tokio::test]
async fn given_awaiting_command_when_text_contains_trigger_then_dispatched_as_command() {
    // Given: An open command window
    let mut h = Harness::new(StubProvider::default());
    let now = Instant::now();
    h.machine.on_utterance(TRIGGER, now);
    h.queue.drain_texts();

    // When: The command mentions the trigger word
    h.machine.on_utterance("assistant stop", now);

    // Then: It is executed rather than acknowledged again
    assert_eq!(h.queue.drain_texts(), [phrases::FAREWELL]);
    assert!(!h.machine.is_listening());
    assert!(!h.machine.session().is_awaiting_command());
}

/// WHAT: Silence until the deadline yields exactly one timeout message
/// WHY: The window must expire without any recognised input
#[tokio::test]
async fn given_awaiting_command_when_deadline_passes_then_single_timeout() {
    // Given: Command window opened at t0
    let mut h = Harness::new(StubProvider::default());
    let t0 = Instant::now();
    h.machine.on_utterance(TRIGGER, t0);
    h.queue.drain_texts();

    // When: Ticks arrive before, at and after the deadline
    h.machine.on_tick(t0 + Duration::from_secs(9));
    assert!(h.queue.drain_texts().is_empty());
    h.machine.on_tick(t0 + Duration::from_secs(10));
    h.machine.on_tick(t0 + Duration::from_secs(11));

    // Then: One timeout, back to idle
    assert_eq!(h.queue.drain_texts(), [phrases::command_timeout(TRIGGER)]);
    assert!(!h.machine.session().is_awaiting_command());
}

/// WHAT: A command heard after its window expired is not executed
/// WHY: The window is fixed; late speech is treated as fresh input
#[tokio::test]
async fn given_expired_window_when_command_arrives_then_timeout_and_ignored() {
    let mut h = Harness::new(StubProvider::default());
    let t0 = Instant::now();
    h.machine.on_utterance(TRIGGER, t0);
    h.queue.drain_texts();

    h.machine.on_utterance("stop", t0 + Duration::from_secs(12));

    assert_eq!(h.queue.drain_texts(), [phrases::command_timeout(TRIGGER)]);
    assert!(h.machine.is_listening());
}

/// WHAT: Fetching pancakes announces title, enumerated ingredients and invite
/// WHY: End-to-end speech contract of a successful fetch
#[tokio::test]
async fn given_provider_with_pancakes_when_recipe_requested_then_announced() {
    // Given: A provider that knows pancakes
    let mut h = Harness::new(StubProvider::default().with("pancakes", pancakes()));
    let now = Instant::now();

    // When: "assistant" then "recipe for pancakes", and the fetch finishes
    h.machine.on_utterance("assistant", now);
    h.machine.on_utterance("recipe for pancakes", now);
    let mut spoken = h.queue.drain_texts();
    spoken.extend(h.finish_fetch().await);

    // Then: ack, title, two enumerated ingredients, invite
    assert_eq!(
        spoken,
        [
            phrases::ACKNOWLEDGE.to_string(),
            phrases::recipe_found("Pancakes"),
            "1. flour".to_string(),
            "2. egg".to_string(),
            phrases::start_cooking_invite(TRIGGER),
        ]
    );
    assert_eq!(
        h.machine.session().current_recipe().map(|r| r.title()),
        Some("Pancakes")
    );
    assert_eq!(h.machine.session().progress(), Some(Progress::NotStarted));
    assert_eq!(h.machine.session().current_step(), 0);
}

/// WHAT: next then previous returns to step one verbatim
/// WHY: Navigation round-trip must be lossless
#[tokio::test]
async fn given_tea_loaded_when_start_next_previous_then_step_one_repeated() {
    // Given: Tea loaded
    let mut h = Harness::new(StubProvider::default().with("tea", tea()));
    h.load("tea").await;

    // When: start cooking, next step, previous step
    let started = h.command("start cooking");
    let next = h.command("next step");
    let previous = h.command("previous step");

    // Then: Step one is read again exactly as it was first read
    let mut expected_start = vec![phrases::START_COOKING.to_string()];
    expected_start.extend(step_lines(1, 2, "boil water"));
    assert_eq!(started, expected_start);

    assert_eq!(next, step_lines(2, 2, "steep leaves"));

    let mut expected_previous = vec![phrases::PREVIOUS_STEP.to_string()];
    expected_previous.extend(step_lines(1, 2, "boil water"));
    assert_eq!(previous, expected_previous);
    assert_eq!(previous[1], started[1]);
    assert_eq!(h.machine.session().current_step(), 0);
}

/// WHAT: "repeat" re-reads without moving the cursor
/// WHY: Repeat must be idempotent
#[tokio::test]
async fn given_cooking_when_repeat_then_cursor_unchanged() {
    let mut h = Harness::new(StubProvider::default().with("coffee", coffee()));
    h.load("coffee").await;
    h.command("start cooking");
    h.command("next step");

    let first = h.command("repeat");
    let second = h.command("repeat that please");

    let mut expected = vec![phrases::REPEAT_STEP.to_string()];
    expected.extend(step_lines(2, 3, "brew"));
    assert_eq!(first, expected);
    assert_eq!(second, expected);
    assert_eq!(h.machine.session().progress(), Some(Progress::Cooking { step: 1 }));
}

/// WHAT: "previous step" at the first step stays put
/// WHY: Boundary must not underflow or error
#[tokio::test]
async fn given_first_step_when_previous_then_already_at_first() {
    let mut h = Harness::new(StubProvider::default().with("tea", tea()));
    h.load("tea").await;
    h.command("start cooking");

    let spoken = h.command("previous step");

    assert_eq!(spoken, [phrases::ALREADY_AT_FIRST_STEP]);
    assert_eq!(h.machine.session().current_step(), 0);
    assert!(h.machine.session().is_cooking());
}

/// WHAT: "next step" past the end finishes; further "next step" falls back
/// WHY: Done is terminal until a new recipe or restart
#[tokio::test]
async fn given_last_step_when_next_then_done_and_fallback_after() {
    // Given: Cooking at the last step of tea
    let mut h = Harness::new(StubProvider::default().with("tea", tea()));
    h.load("tea").await;
    h.command("start cooking");
    h.command("next step");

    // When: next step twice more
    let finished = h.command("next step");
    let after = h.command("next step");

    // Then: Congratulation, then the fallback, recipe still loaded
    assert_eq!(finished, [phrases::RECIPE_COMPLETE]);
    assert_eq!(after, [phrases::NOT_UNDERSTOOD]);
    assert_eq!(h.machine.session().progress(), Some(Progress::Done));
    assert!(!h.machine.session().is_cooking());
    assert!(h.machine.session().current_recipe().is_some());

    // And: start cooking begins again from step one
    let restarted = h.command("start cooking");
    assert_eq!(restarted[1], phrases::step(1, 2, "boil water"));
    assert_eq!(h.machine.session().current_step(), 0);
}

/// WHAT: Ingredients are listed one request per item without a step reminder
/// WHY: Each ingredient is its own utterance; mid-cooking the cursor is untouched
#[tokio::test]
async fn given_cooking_when_ingredients_then_one_request_per_item() {
    let mut h = Harness::new(StubProvider::default().with("tea", tea()));
    h.load("tea").await;
    h.command("start cooking");
    h.command("next step");

    let spoken = h.command("ingredients");

    assert_eq!(
        spoken,
        [phrases::INGREDIENTS_AGAIN, "1. water", "2. tea leaves"]
    );
    assert_eq!(h.machine.session().current_step(), 1);
}

/// WHAT: A failed fetch apologises and keeps the previous recipe
/// WHY: Failures never mutate the session
#[tokio::test]
async fn given_loaded_recipe_when_fetch_fails_then_previous_recipe_kept() {
    // Given: Tea loaded and cooking
    let mut h = Harness::new(StubProvider::default().with("tea", tea()));
    h.load("tea").await;
    h.command("start cooking");

    // When: A fetch for an unknown dish fails
    h.command("how to make unicorn stew");
    let spoken = h.finish_fetch().await;

    // Then: Apology only; tea still loaded at the same step
    assert_eq!(spoken, [phrases::RECIPE_NOT_FOUND]);
    assert_eq!(h.machine.session().current_recipe().map(|r| r.title()), Some("Tea"));
    assert_eq!(h.machine.session().progress(), Some(Progress::Cooking { step: 0 }));
}

/// WHAT: A new recipe replaces the old one and resets progress
/// WHY: Cursor must never point into a different recipe
#[tokio::test]
async fn given_cooking_when_new_recipe_loads_then_progress_reset() {
    let mut h = Harness::new(
        StubProvider::default()
            .with("coffee", coffee())
            .with("tea", tea()),
    );
    h.load("coffee").await;
    h.command("start cooking");
    h.command("next step");
    h.command("next step");

    h.load("tea").await;

    assert_eq!(h.machine.session().current_recipe().map(|r| r.title()), Some("Tea"));
    assert_eq!(h.machine.session().progress(), Some(Progress::NotStarted));
    assert_eq!(h.machine.session().current_step(), 0);
}

/// WHAT: An older fetch finishing after a newer one changes nothing
/// WHY: Last dispatched fetch wins
#[tokio::test]
#[allow(clippy::unwrap_used)]
async fn given_two_fetches_when_first_completes_last_then_second_wins() {
    // Given: Fetch for tea dispatched, then one for coffee
    let mut h = Harness::new(
        StubProvider::default()
            .with("tea", tea())
            .with("coffee", coffee()),
    );
    h.command("recipe for tea");
    let tea_id = h.machine.session().pending_fetch().unwrap();
    h.command("recipe for coffee");

    // When: Coffee completes, then tea's result turns up late
    let spoken = h.finish_fetch().await;
    h.machine.complete_fetch(FetchCompletion {
        request_id: tea_id,
        query: "tea".to_string(),
        result: Ok(tea()),
    });

    // Then: Coffee is loaded and the late tea result is silent
    assert_eq!(spoken[0], phrases::recipe_found("Coffee"));
    assert!(h.queue.drain_texts().is_empty());
    assert_eq!(h.machine.session().current_recipe().map(|r| r.title()), Some("Coffee"));
    assert!(h.machine.session().pending_fetch().is_none());
}

/// WHAT: A superseded result arriving first is also discarded
/// WHY: Only the latest dispatch may mutate the session
#[tokio::test]
#[allow(clippy::unwrap_used)]
async fn given_two_fetches_when_first_completes_first_then_still_discarded() {
    let mut h = Harness::new(
        StubProvider::default()
            .with("tea", tea())
            .with("coffee", coffee()),
    );
    h.command("recipe for tea");
    let tea_id = h.machine.session().pending_fetch().unwrap();
    h.command("recipe for coffee");

    h.machine.complete_fetch(FetchCompletion {
        request_id: tea_id,
        query: "tea".to_string(),
        result: Ok(tea()),
    });
    assert!(h.machine.session().current_recipe().is_none());
    assert!(h.queue.drain_texts().is_empty());

    h.finish_fetch().await;
    assert_eq!(h.machine.session().current_recipe().map(|r| r.title()), Some("Coffee"));
}

/// WHAT: A bare "recipe" asks for the dish without calling the provider
/// WHY: Empty queries are never fetched
#[tokio::test]
async fn given_recipe_without_dish_when_commanded_then_asks_and_no_fetch() {
    let mut h = Harness::new(StubProvider::default());

    let spoken = h.command("recipe");
    tokio::task::yield_now().await;

    assert_eq!(spoken, [phrases::ASK_FOR_DISH]);
    assert!(h.machine.session().pending_fetch().is_none());
    assert_eq!(h.provider.calls(), 0);
}

/// WHAT: Unknown commands get guidance
/// WHY: Fallback rule
#[tokio::test]
async fn given_unknown_command_when_commanded_then_guidance() {
    let mut h = Harness::new(StubProvider::default());

    assert_eq!(h.command("sing a song"), [phrases::NOT_UNDERSTOOD]);
    assert!(h.machine.is_listening());
}

/// WHAT: Device failure announces itself and stops listening
/// WHY: Unrecoverable input ends the session gracefully
#[tokio::test]
async fn given_listening_when_device_fails_then_stops_listening() {
    let mut h = Harness::new(StubProvider::default());

    h.machine
        .on_device_failure(&RecognitionError::device("microphone unplugged"));

    assert_eq!(h.queue.drain_texts(), [phrases::INPUT_DEVICE_LOST]);
    assert!(!h.machine.is_listening());
}

/// WHAT: Unintelligible speech inside the window neither resets nor extends it
/// WHY: Only a recognised command or the deadline may close the window
#[tokio::test]
async fn given_awaiting_command_when_unintelligible_then_deadline_unchanged() {
    // Given: Command window opened at t0
    let mut h = Harness::new(StubProvider::default());
    let t0 = Instant::now();
    h.machine.on_utterance(TRIGGER, t0);
    h.queue.drain_texts();
    let deadline = h.machine.command_deadline();

    // When: An unintelligible result arrives halfway through the window
    h.machine.on_tick(t0 + Duration::from_secs(5));

    // Then: Still waiting, same deadline, nothing said
    assert!(h.machine.session().is_awaiting_command());
    assert_eq!(h.machine.command_deadline(), deadline);
    assert!(h.queue.drain_texts().is_empty());

    // And: The window still closes exactly once at t0 + 10s
    h.machine.on_tick(t0 + Duration::from_secs(10));
    h.machine.on_tick(t0 + Duration::from_secs(12));
    assert_eq!(h.queue.drain_texts(), [phrases::command_timeout(TRIGGER)]);
}

/// WHAT: An external shutdown request says goodbye and stops listening
/// WHY: Ctrl-C must end the session the same way "stop" does
#[tokio::test]
async fn given_listening_when_shutdown_requested_then_farewell_and_stopped() {
    let mut h = Harness::new(StubProvider::default());

    h.machine.on_shutdown_request();

    assert_eq!(h.queue.drain_texts(), [phrases::FAREWELL]);
    assert!(!h.machine.is_listening());
}
