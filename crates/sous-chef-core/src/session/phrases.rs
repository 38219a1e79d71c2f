//! Everything the assistant says.

pub(crate) const READY: &str = "Voice Cooking Assistant is ready!";
pub(crate) const ACKNOWLEDGE: &str = "Yes, I'm listening. What can I help you with?";
pub(crate) const ASK_FOR_DISH: &str = "What would you like a recipe for?";
pub(crate) const START_COOKING: &str = "Great! Let's start cooking. Here's the first step.";
pub(crate) const RECIPE_COMPLETE: &str =
    "Congratulations! That was the last step. Your dish should be ready. Enjoy your meal!";
pub(crate) const REPEAT_STEP: &str = "Let me repeat the current step.";
pub(crate) const PREVIOUS_STEP: &str = "Going back to the previous step.";
pub(crate) const ALREADY_AT_FIRST_STEP: &str = "You're already at the first step.";
pub(crate) const INGREDIENTS_AGAIN: &str = "Here are the ingredients again:";
pub(crate) const FAREWELL: &str = "Goodbye! Happy cooking!";
pub(crate) const NOT_UNDERSTOOD: &str = "I didn't understand that command. Try saying 'find recipe for' followed by a dish name, or say 'stop' to exit.";
pub(crate) const RECIPE_NOT_FOUND: &str = "I couldn't find a recipe for that. Please try a different dish or check your internet connection.";
pub(crate) const INPUT_DEVICE_LOST: &str = "I've lost access to the microphone. Shutting down.";

pub(crate) fn instructions(trigger_word: &str) -> String {
    format!("Say '{trigger_word}' followed by your command.")
}

pub(crate) fn command_timeout(trigger_word: &str) -> String {
    format!("I didn't hear a command. Say '{trigger_word}' again when you're ready.")
}

pub(crate) fn step(number: usize, total: usize, text: &str) -> String {
    format!("Step {number} of {total}: {text}")
}

pub(crate) fn next_step_hint(trigger_word: &str) -> String {
    format!("Say '{trigger_word}' then 'next step' when you're ready to continue.")
}

pub(crate) fn enumerated(number: usize, item: &str) -> String {
    format!("{number}. {item}")
}

pub(crate) fn recipe_found(title: &str) -> String {
    format!("I found a recipe for {title}. Here are the ingredients:")
}

pub(crate) fn start_cooking_invite(trigger_word: &str) -> String {
    format!("Say '{trigger_word}' then 'start cooking' when you're ready to begin.")
}
