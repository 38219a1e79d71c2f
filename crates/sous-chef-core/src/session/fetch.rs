use crate::{FetchError, Recipe, RecipeProvider};

use std::sync::Arc;

use tokio::{sync::mpsc, task::AbortHandle};
use tracing::{info, instrument, warn};
use uuid::Uuid;

/// Result of one background fetch, delivered back to the session task.
#[derive(Debug)]
pub(crate) struct FetchCompletion {
    pub(crate) request_id: Uuid,
    pub(crate) query: String,
    pub(crate) result: Result<Recipe, FetchError>,
}

/// Run `provider.fetch(query)` off the session task.
///
/// The task owns its result and only hands it back through `completions`;
/// it never touches the session.
#[instrument(skip(provider, completions))]
pub(crate) fn spawn_fetch(
    provider: Arc<dyn RecipeProvider>,
    request_id: Uuid,
    query: String,
    completions: mpsc::UnboundedSender<FetchCompletion>,
) -> AbortHandle {
    let handle = tokio::spawn(async move {
        let start = tokio::time::Instant::now();
        let result = provider.fetch(&query).await;

        info!(
            request_id = %request_id,
            duration_ms = start.elapsed().as_millis(),
            ok = result.is_ok(),
            "Recipe fetch finished"
        );

        let completion = FetchCompletion {
            request_id,
            query,
            result,
        };

        if completions.send(completion).is_err() {
            warn!(request_id = %request_id, "Session gone, dropping fetch result");
        }
    });

    handle.abort_handle()
}
