//! Place detail lookups (canonical name, geometry and opening hours).

use serde::Deserialize;

use super::{ApiStatus, Geometry, MapsClient, MapsTransport};
use crate::error::TransportError;
use crate::models::Coordinate;

/// Fields requested from the detail endpoint.
const DETAIL_FIELDS: &str = "name,opening_hours,geometry";

#[derive(Debug, Deserialize)]
struct DetailResponse {
    status: ApiStatus,
    result: Option<DetailResult>,
}

#[derive(Debug, Deserialize)]
struct DetailResult {
    name: Option<String>,
    geometry: Option<Geometry>,
    opening_hours: Option<OpeningHours>,
}

#[derive(Debug, Deserialize)]
struct OpeningHours {
    open_now: Option<bool>,
    weekday_text: Option<Vec<String>>,
}

/// Detail fields relevant to enrichment. Every field may be absent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlaceDetail {
    pub name: Option<String>,
    pub coordinate: Option<Coordinate>,
    pub open_now: Option<bool>,
    /// Per-weekday text, Monday first
    pub weekday_text: Option<Vec<String>>,
}

/// Outcome of one detail lookup.
#[derive(Debug, Clone, PartialEq)]
pub enum DetailReply {
    Found(PlaceDetail),
    Unavailable(ApiStatus),
}

impl From<DetailResponse> for DetailReply {
    fn from(response: DetailResponse) -> Self {
        match (response.status, response.result) {
            (ApiStatus::Ok, Some(result)) => {
                let (open_now, weekday_text) = match result.opening_hours {
                    Some(hours) => (hours.open_now, hours.weekday_text),
                    None => (None, None),
                };
                DetailReply::Found(PlaceDetail {
                    name: result.name,
                    coordinate: result
                        .geometry
                        .and_then(|g| Coordinate::checked(g.location.lat, g.location.lng)),
                    open_now,
                    weekday_text,
                })
            }
            (ApiStatus::Ok, None) => DetailReply::Unavailable(ApiStatus::Ok),
            (status, _) => DetailReply::Unavailable(status),
        }
    }
}

impl<T: MapsTransport> MapsClient<T> {
    /// Fetch live details for one place id.
    ///
    /// Provider-level failures come back as [`DetailReply::Unavailable`];
    /// only HTTP-level problems are returned as errors.
    pub async fn place_details(&self, place_id: &str) -> Result<DetailReply, TransportError> {
        let url = self.endpoint(
            "place/details/json",
            &[("place_id", place_id), ("fields", DETAIL_FIELDS)],
        )?;
        let response: DetailResponse = self.fetch(url).await?;
        Ok(DetailReply::from(response))
    }
}
