//! Concurrent enrichment of a whole result batch.

use chrono::Weekday;
use futures::stream::{FuturesUnordered, StreamExt};
use tracing::{info, warn};

use super::enrich;
use crate::error::{LocateError, TransportError};
use crate::maps::{MapsClient, MapsTransport};
use crate::models::{EnrichedPlace, PlaceStub};

/// Enrich every stub concurrently and return them in input order.
///
/// All lookups are issued at once and every one is awaited before returning.
/// Results are slotted by the stub's original index, so completion order never
/// affects output order. Only an unreachable network fails the batch; the
/// error reported is the one for the earliest stub.
pub async fn enrich_all<T: MapsTransport>(
    client: &MapsClient<T>,
    stubs: Vec<PlaceStub>,
    today: Weekday,
) -> Result<Vec<EnrichedPlace>, LocateError> {
    let total = stubs.len();
    let mut pending: FuturesUnordered<_> = stubs
        .into_iter()
        .enumerate()
        .map(|(index, stub)| async move { (index, enrich(client, stub, today).await) })
        .collect();

    let mut slots: Vec<Option<EnrichedPlace>> = vec![None; total];
    let mut failure: Option<(usize, TransportError)> = None;

    while let Some((index, result)) = pending.next().await {
        match result {
            Ok(place) => slots[index] = Some(place),
            Err(err) => {
                warn!("Detail lookup {} could not reach the provider: {}", index, err);
                if failure.as_ref().map_or(true, |(first, _)| index < *first) {
                    failure = Some((index, err));
                }
            }
        }
    }

    if let Some((_, err)) = failure {
        return Err(err.into());
    }

    let places: Vec<EnrichedPlace> = slots.into_iter().flatten().collect();
    let degraded = places.iter().filter(|p| p.is_degraded()).count();
    info!("Enriched {} places ({} degraded)", places.len(), degraded);
    Ok(places)
}
