mod model;
mod provider;

pub mod gemini;

pub use {
    model::{Recipe, RecipeData},
    provider::RecipeProvider,
};
