use crate::{FetchError, Recipe};

use async_trait::async_trait;

/// Source of structured recipes for a free-text dish query.
///
/// Implementations may take as long as they like; the assistant always
/// calls them from a background task.
#[async_trait]
pub trait RecipeProvider: Send + Sync {
    /// Fetch a recipe for `query` (never empty).
    ///
    /// # Errors
    ///
    /// Returns [`FetchError`] if the provider fails or the response does
    /// not contain a complete recipe.
    async fn fetch(&self, query: &str) -> Result<Recipe, FetchError>;
}
