//! Recipe provider backed by the Gemini `generateContent` API.

use crate::{FetchError, Recipe, RecipeProvider};

use std::panic::Location;

use async_trait::async_trait;
use error_location::ErrorLocation;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, instrument};

/// Default Gemini model used for recipe generation.
pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";

/// Base URL of the Gemini models API.
pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta/models";

#[derive(Serialize)]
struct GenerateRequest<'a> {
    contents: [RequestContent<'a>; 1],
}

#[derive(Serialize)]
struct RequestContent<'a> {
    parts: [RequestPart<'a>; 1],
}

#[derive(Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
pub(crate) struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

impl GenerateResponse {
    pub(crate) fn first_text(self) -> Option<String> {
        self.candidates
            .into_iter()
            .next()?
            .content?
            .parts
            .into_iter()
            .next()?
            .text
    }
}

/// Fetches recipes by prompting a Gemini model for JSON.
pub struct GeminiProvider {
    client: reqwest::Client,
    api_key: SecretString,
    url: String,
}

impl GeminiProvider {
    /// Create a provider for `model` under `endpoint`.
    pub fn new(api_key: SecretString, model: &str, endpoint: &str) -> Self {
        let url = format!("{}/{}:generateContent", endpoint.trim_end_matches('/'), model);

        debug!(url = %url, "Gemini recipe provider configured");

        Self {
            client: reqwest::Client::new(),
            api_key,
            url,
        }
    }

    /// The fully-qualified `generateContent` URL.
    pub fn url(&self) -> &str {
        &self.url
    }
}

/// Prompt asking for a recipe in the JSON shape [`Recipe::from_model_text`] expects.
pub(crate) fn recipe_prompt(query: &str) -> String {
    format!(
        "Give me a simple recipe for {query}. \
         Return in JSON format like this:\n\
         {{\n  \"title\": \"Recipe Title\",\n  \"ingredients\": [\"item1\", \"item2\"],\n  \"steps\": [\"step1\", \"step2\"]\n}}"
    )
}

#[async_trait]
impl RecipeProvider for GeminiProvider {
    #[instrument(skip(self))]
    async fn fetch(&self, query: &str) -> Result<Recipe, FetchError> {
        let prompt = recipe_prompt(query);
        let body = GenerateRequest {
            contents: [RequestContent {
                parts: [RequestPart { text: &prompt }],
            }],
        };

        let response = self
            .client
            .post(&self.url)
            .header("x-goog-api-key", self.api_key.expose_secret())
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(status = %status, body = %body, "Gemini API error");
            return Err(FetchError::Provider {
                reason: format!("Gemini API returned {}", status),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        let parsed: GenerateResponse = response.json().await?;
        let text = parsed
            .first_text()
            .ok_or_else(|| FetchError::malformed("response has no candidate text"))?;

        let recipe = Recipe::from_model_text(&text)?;

        info!(
            title = recipe.title(),
            ingredients = recipe.ingredients().len(),
            steps = recipe.step_count(),
            "Recipe parsed"
        );

        Ok(recipe)
    }
}
