//! Turning place stubs into enriched places.

pub mod fanout;
pub mod hours;

use chrono::Weekday;
use tracing::{debug, warn};

use crate::error::TransportError;
use crate::maps::{DetailReply, MapsClient, MapsTransport, PlaceDetail};
use crate::models::{EnrichedPlace, PlaceStub};

pub use fanout::enrich_all;
pub use hours::{strip_day_label, today_hours, weekday_index};

/// Merge a stub with its detail lookup.
///
/// Any failure short of the network being unreachable degrades the entry to
/// a placeholder instead of failing.
pub async fn enrich<T: MapsTransport>(
    client: &MapsClient<T>,
    stub: PlaceStub,
    today: Weekday,
) -> Result<EnrichedPlace, TransportError> {
    match client.place_details(&stub.id).await {
        Ok(DetailReply::Found(detail)) => {
            debug!("Enriched place {}", stub.id);
            Ok(merge(stub, detail, today))
        }
        Ok(DetailReply::Unavailable(status)) => {
            warn!("Details for {} unavailable (status {})", stub.id, status);
            Ok(EnrichedPlace::degraded(stub))
        }
        Err(err @ TransportError::Unreachable(_)) => Err(err),
        Err(err) => {
            warn!("Details for {} failed: {}", stub.id, err);
            Ok(EnrichedPlace::degraded(stub))
        }
    }
}

/// Detail values win over the stub where present.
fn merge(stub: PlaceStub, detail: PlaceDetail, today: Weekday) -> EnrichedPlace {
    EnrichedPlace {
        today_hours: today_hours(detail.weekday_text.as_deref(), today),
        is_open_now: detail.open_now.unwrap_or(false),
        name: detail.name.unwrap_or(stub.name),
        coordinate: detail.coordinate.unwrap_or(stub.coordinate),
        id: stub.id,
    }
}
