use crate::FetchError;

use serde::Deserialize;
use tracing::debug;

/// Raw recipe payload as returned by a provider.
///
/// Every field is optional so that a missing field surfaces as
/// [`FetchError::MalformedRecipe`] rather than a serde error string.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RecipeData {
    /// Dish title.
    #[serde(default)]
    pub title: Option<String>,
    /// Ingredient lines in order.
    #[serde(default)]
    pub ingredients: Option<Vec<String>>,
    /// Method steps in order.
    #[serde(default)]
    pub steps: Option<Vec<String>>,
}

/// A validated, immutable recipe.
///
/// Title, ingredients and steps are guaranteed non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recipe {
    title: String,
    ingredients: Vec<String>,
    steps: Vec<String>,
}

impl Recipe {
    /// Validate and build a recipe.
    ///
    /// Entries are trimmed and blank entries dropped before the emptiness
    /// checks run.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::MalformedRecipe`] if the title is blank or
    /// either list ends up empty.
    #[track_caller]
    pub fn new<T, I, S>(title: T, ingredients: I, steps: S) -> Result<Self, FetchError>
    where
        T: Into<String>,
        I: IntoIterator,
        I::Item: Into<String>,
        S: IntoIterator,
        S::Item: Into<String>,
    {
        let title = title.into().trim().to_string();
        if title.is_empty() {
            return Err(FetchError::malformed("recipe title is empty"));
        }

        let ingredients = clean(ingredients);
        if ingredients.is_empty() {
            return Err(FetchError::malformed("recipe has no ingredients"));
        }

        let steps = clean(steps);
        if steps.is_empty() {
            return Err(FetchError::malformed("recipe has no steps"));
        }

        Ok(Self {
            title,
            ingredients,
            steps,
        })
    }

    /// Parse a recipe out of free-form model output.
    ///
    /// Language models tend to wrap JSON in prose or code fences, so only
    /// the span from the first `{` to the last `}` is deserialised.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::MalformedRecipe`] if no JSON object is found,
    /// it fails to parse, or it fails validation.
    #[track_caller]
    pub fn from_model_text(text: &str) -> Result<Self, FetchError> {
        let (Some(start), Some(end)) = (text.find('{'), text.rfind('}')) else {
            return Err(FetchError::malformed("no JSON object in response"));
        };

        if end < start {
            return Err(FetchError::malformed("no JSON object in response"));
        }

        let data: RecipeData = serde_json::from_str(&text[start..=end])
            .map_err(|e| FetchError::malformed(format!("invalid recipe JSON: {}", e)))?;

        debug!(json_len = end - start + 1, "Recipe JSON extracted");

        Recipe::try_from(data)
    }

    /// Dish title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Ingredient lines in order.
    pub fn ingredients(&self) -> &[String] {
        &self.ingredients
    }

    /// Method steps in order.
    pub fn steps(&self) -> &[String] {
        &self.steps
    }

    /// Step text at a zero-based index.
    pub fn step(&self, index: usize) -> Option<&str> {
        self.steps.get(index).map(String::as_str)
    }

    /// Number of steps. Always at least one.
    pub fn step_count(&self) -> usize {
        self.steps.len()
    }
}

impl TryFrom<RecipeData> for Recipe {
    type Error = FetchError;

    #[track_caller]
    fn try_from(data: RecipeData) -> Result<Self, Self::Error> {
        let title = data
            .title
            .ok_or_else(|| FetchError::malformed("missing field `title`"))?;
        let ingredients = data
            .ingredients
            .ok_or_else(|| FetchError::malformed("missing field `ingredients`"))?;
        let steps = data
            .steps
            .ok_or_else(|| FetchError::malformed("missing field `steps`"))?;

        Recipe::new(title, ingredients, steps)
    }
}

fn clean<I>(items: I) -> Vec<String>
where
    I: IntoIterator,
    I::Item: Into<String>,
{
    items
        .into_iter()
        .map(|item| item.into().trim().to_string())
        .filter(|item| !item.is_empty())
        .collect()
}
