//! Driving the controller from line input and shutting down in order.

use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::task::{JoinHandle, JoinSet};
use tracing::{debug, warn};

use stacks::maps::MapsTransport;
use stacks::{LocateError, SearchController};

/// Start a search for every input line, then wait for all of them.
///
/// `tasks` may already hold startup work (the location bootstrap) that must
/// also settle. Once everything has finished the controller is dropped, which
/// closes the model channel so `renderer` prints the final state and returns.
pub async fn run<T, R, W>(
    controller: Arc<SearchController<T>>,
    mut tasks: JoinSet<()>,
    input: R,
    renderer: JoinHandle<W>,
) -> Result<W>
where
    T: MapsTransport + 'static,
    R: AsyncBufRead + Unpin,
    W: Send + 'static,
{
    let mut lines = input.lines();
    while let Some(line) = lines.next_line().await.context("Failed to read input")? {
        let controller = controller.clone();
        tasks.spawn(async move {
            match controller.search(&line).await {
                Ok(_) | Err(LocateError::Cancelled) | Err(LocateError::Validation) => {}
                Err(err) => warn!("Search for '{}' failed: {}", line.trim(), err),
            }
        });
    }

    debug!("Input closed, waiting for {} tasks", tasks.len());
    while let Some(joined) = tasks.join_next().await {
        joined.context("Search task panicked")?;
    }

    drop(controller);
    renderer.await.context("Renderer task panicked")
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use serde_json::{json, Value};
    use url::Url;

    use super::*;
    use crate::view;
    use stacks::config::Config;
    use stacks::maps::MapsClient;
    use stacks::TransportError;

    /// One library whose detail lookup is slow enough to outlive the input.
    struct SlowLibrary;

    impl MapsTransport for SlowLibrary {
        async fn get_json(&self, url: Url) -> Result<Value, TransportError> {
            let path = url.path();
            if path.ends_with("geocode/json") {
                return Ok(json!({
                    "status": "OK",
                    "results": [{ "geometry": { "location": { "lat": 1.35, "lng": 103.8 } } }]
                }));
            }
            if path.ends_with("nearbysearch/json") {
                return Ok(json!({
                    "status": "OK",
                    "results": [{
                        "place_id": "tampines",
                        "name": "Tampines Regional Library",
                        "geometry": { "location": { "lat": 1.353, "lng": 103.940 } }
                    }]
                }));
            }
            tokio::time::sleep(Duration::from_millis(50)).await;
            Ok(json!({
                "status": "OK",
                "result": {
                    "name": "Tampines Regional Library",
                    "opening_hours": { "open_now": true }
                }
            }))
        }
    }

    fn controller() -> Arc<SearchController<SlowLibrary>> {
        let config = Config::default();
        let client = MapsClient::new(SlowLibrary, &config.maps, config.search, "test-key").unwrap();
        Arc::new(SearchController::new(client))
    }

    #[tokio::test]
    async fn test_final_results_rendered_after_input_ends() {
        let controller = controller();
        let renderer = tokio::spawn(view::render_changes(controller.subscribe(), Vec::new()));

        // Trailing blank line: the last task spawned is a validation, not the search
        let out = run(controller, JoinSet::new(), &b"529510\n\n"[..], renderer)
            .await
            .unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains(" 1. Tampines Regional Library [Open] 1.353,103.94"));
    }

    #[tokio::test]
    async fn test_startup_tasks_are_awaited() {
        let controller = controller();
        let renderer = tokio::spawn(view::render_changes(controller.subscribe(), Vec::new()));

        let mut tasks = JoinSet::new();
        {
            let controller = controller.clone();
            tasks.spawn(async move {
                controller.search("529510").await.unwrap();
            });
        }

        let out = run(controller, tasks, &b""[..], renderer).await.unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Tampines Regional Library"));
    }
}
