//! Search controller: postal code in, enriched library list out.
//!
//! The controller is the only writer of the [`MapModel`]; the presentation
//! layer observes it through a `watch` receiver. A search runs geocode, then
//! nearby search, then the enrichment fan-out. Starting a new search cancels
//! the one in flight, and a cancelled search never touches the model.

pub mod model;

use std::future::Future;
use std::sync::{Mutex, PoisonError};

use chrono::{Datelike, Local, Weekday};
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

use crate::config::RegionConfig;
use crate::enrich::enrich_all;
use crate::error::{LocateError, Result};
use crate::location::{self, Bootstrap, DeviceLocator};
use crate::maps::{MapsClient, MapsTransport};
use crate::models::{Advisory, Viewport};

pub use model::{MapModel, SearchOutcome, SearchPhase};

fn local_weekday() -> Weekday {
    Local::now().weekday()
}

pub struct SearchController<T> {
    client: MapsClient<T>,
    model: watch::Sender<MapModel>,
    /// Generation and cancellation token of the search in flight
    inflight: Mutex<Option<(u64, CancellationToken)>>,
    clock: fn() -> Weekday,
}

impl<T: MapsTransport> SearchController<T> {
    pub fn new(client: MapsClient<T>) -> Self {
        let (model, _) = watch::channel(MapModel::default());
        Self {
            client,
            model,
            inflight: Mutex::new(None),
            clock: local_weekday,
        }
    }

    /// Override the day used to pick today's opening hours
    pub fn with_clock(mut self, clock: fn() -> Weekday) -> Self {
        self.clock = clock;
        self
    }

    pub fn subscribe(&self) -> watch::Receiver<MapModel> {
        self.model.subscribe()
    }

    pub fn snapshot(&self) -> MapModel {
        self.model.borrow().clone()
    }

    pub fn client(&self) -> &MapsClient<T> {
        &self.client
    }

    /// Position the map from the device location.
    ///
    /// The result is applied only if no search has positioned the map yet.
    pub async fn bootstrap<D: DeviceLocator>(&self, device: &D, region: &RegionConfig) -> Bootstrap {
        let boot = location::bootstrap(device, region).await;
        let applied = self.model.send_if_modified(|m| {
            if m.viewport.is_some() {
                return false;
            }
            m.viewport = Some(boot.viewport);
            if m.phase == SearchPhase::Idle && boot.advisory.is_some() {
                m.advisory = boot.advisory.clone();
            }
            true
        });
        if !applied {
            debug!("Bootstrap finished after a search positioned the map, ignoring");
        }
        boot
    }

    /// Run one search for a postal code.
    ///
    /// Whitespace-only input is rejected before any request is made. Zero
    /// results is a success with an advisory; geocode and nearby-search
    /// failures clear the list and surface an error advisory.
    pub async fn search(&self, query: &str) -> Result<SearchOutcome> {
        let query = query.trim();
        if query.is_empty() {
            info!("Empty postal code, not searching");
            self.model.send_modify(|m| {
                m.advisory = Some(Advisory::warning(
                    "Input needed",
                    LocateError::Validation.to_string(),
                ));
            });
            return Err(LocateError::Validation);
        }

        let (generation, token) = self.begin();
        info!("Search {} for '{}' started", generation, query);

        let result = self.run(query, generation, &token).await;
        self.finish(generation, &result);
        self.release(generation);
        result
    }

    async fn run(
        &self,
        query: &str,
        generation: u64,
        token: &CancellationToken,
    ) -> Result<SearchOutcome> {
        let center = guarded(token, self.client.geocode(query)).await?;

        // Recenter now so the map moves even while enrichment is slow
        let viewport = Viewport::around(center, self.client.search_config().search_delta);
        self.publish(generation, |m| m.viewport = Some(viewport));

        let stubs = guarded(token, self.client.nearby(center)).await?;
        if stubs.is_empty() {
            return Ok(SearchOutcome {
                viewport,
                places: Vec::new(),
                advisory: Some(self.no_results_advisory()),
            });
        }

        let today = (self.clock)();
        let places = guarded(token, enrich_all(&self.client, stubs, today)).await?;
        Ok(SearchOutcome {
            viewport,
            places,
            advisory: None,
        })
    }

    /// Cancel whatever is in flight and open a new generation.
    fn begin(&self) -> (u64, CancellationToken) {
        let mut inflight = self.inflight.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some((previous, token)) = inflight.take() {
            info!("Cancelling search {}", previous);
            token.cancel();
        }

        let mut generation = 0;
        self.model.send_modify(|m| {
            m.generation += 1;
            generation = m.generation;
            m.phase = SearchPhase::Searching;
            m.places.clear();
            m.advisory = None;
        });

        let token = CancellationToken::new();
        *inflight = Some((generation, token.clone()));
        (generation, token)
    }

    fn finish(&self, generation: u64, result: &Result<SearchOutcome>) {
        match result {
            Ok(outcome) => {
                info!(
                    "Search {} finished with {} places",
                    generation,
                    outcome.places.len()
                );
                self.publish(generation, |m| {
                    m.phase = SearchPhase::Success;
                    m.viewport = Some(outcome.viewport);
                    m.places = outcome.places.clone();
                    m.advisory = outcome.advisory.clone();
                });
            }
            Err(LocateError::Cancelled) => debug!("Search {} was superseded", generation),
            Err(err) => {
                error!("Search {} failed: {}", generation, err);
                self.publish(generation, |m| {
                    m.phase = SearchPhase::Failed;
                    m.places.clear();
                    m.advisory = Some(Advisory::error(
                        "Error",
                        format!("Failed to fetch library data: {}", err),
                    ));
                });
            }
        }
    }

    fn release(&self, generation: u64) {
        let mut inflight = self.inflight.lock().unwrap_or_else(PoisonError::into_inner);
        if matches!(inflight.as_ref(), Some((current, _)) if *current == generation) {
            *inflight = None;
        }
    }

    /// Apply `update` only if `generation` is still the latest search.
    fn publish(&self, generation: u64, update: impl FnOnce(&mut MapModel)) -> bool {
        self.model.send_if_modified(|m| {
            if m.generation != generation {
                return false;
            }
            update(m);
            true
        })
    }

    fn no_results_advisory(&self) -> Advisory {
        let km = f64::from(self.client.search_config().radius_m) / 1000.0;
        Advisory::info(
            "No Libraries Found",
            format!("No libraries found within {}km of this postal code.", km),
        )
    }
}

/// Race `work` against cancellation of the search.
async fn guarded<F, R>(token: &CancellationToken, work: F) -> Result<R>
where
    F: Future<Output = Result<R>>,
{
    tokio::select! {
        biased;
        _ = token.cancelled() => Err(LocateError::Cancelled),
        result = work => result,
    }
}
