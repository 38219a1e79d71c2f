use crate::Session;

/// Phrases that select the recipe rule. Any one of them is enough.
const RECIPE_PHRASES: [&str; 3] = ["find recipe for", "how to make", "recipe"];

/// Fragments removed from a recipe command to leave the dish name,
/// longest first so "recipe for" goes before bare "recipe".
const RECIPE_FRAGMENTS: [&str; 4] = ["find recipe for", "how to make", "recipe for", "recipe"];

const STOP_WORDS: [&str; 3] = ["stop", "exit", "quit"];

/// Action selected for a command utterance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Fetch a recipe for the dish.
    FindRecipe {
        /// Dish name with the recipe phrases stripped. Never empty.
        query: String,
    },
    /// A recipe phrase with no dish name.
    AskForDish,
    /// Begin narrating the loaded recipe from step one.
    StartCooking,
    /// Advance one step.
    NextStep,
    /// Say the current step again.
    RepeatStep,
    /// Go back one step.
    PreviousStep,
    /// List the loaded recipe's ingredients.
    ListIngredients,
    /// Say goodbye and stop listening.
    Stop,
    /// Nothing matched.
    NotUnderstood,
}

impl Command {
    /// Map a lower-cased command utterance to an action.
    ///
    /// Rules are tried in a fixed order and the first match wins, so
    /// "recipe stop" fetches a recipe for "stop" rather than exiting.
    /// Navigation rules only match when the session allows them; otherwise
    /// evaluation falls through to later rules.
    pub fn interpret(text: &str, session: &Session) -> Command {
        let has_recipe = session.current_recipe().is_some();
        let cooking = session.is_cooking();

        if RECIPE_PHRASES.iter().any(|phrase| text.contains(phrase)) {
            let query = dish_name(text);
            return if query.is_empty() {
                Command::AskForDish
            } else {
                Command::FindRecipe { query }
            };
        }

        if text.contains("start cooking") && has_recipe {
            Command::StartCooking
        } else if text.contains("next step") && cooking {
            Command::NextStep
        } else if text.contains("repeat") && cooking {
            Command::RepeatStep
        } else if text.contains("previous step") && cooking {
            Command::PreviousStep
        } else if text.contains("ingredients") && has_recipe {
            Command::ListIngredients
        } else if STOP_WORDS.iter().any(|word| text.contains(word)) {
            Command::Stop
        } else {
            Command::NotUnderstood
        }
    }
}

fn dish_name(text: &str) -> String {
    let stripped = RECIPE_FRAGMENTS
        .iter()
        .fold(text.to_string(), |acc, fragment| acc.replace(fragment, " "));

    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}
