//! Proximity search for library candidates around a coordinate.

use serde::Deserialize;
use tracing::{info, warn};

use super::{ApiStatus, Geometry, MapsClient, MapsTransport};
use crate::error::{LocateError, Result};
use crate::models::{Coordinate, PlaceStub};

pub const NEARBY_FALLBACK_MESSAGE: &str = "Error fetching nearby libraries.";

#[derive(Debug, Deserialize)]
struct NearbyResponse {
    status: ApiStatus,
    #[serde(default)]
    results: Vec<NearbyResult>,
    error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct NearbyResult {
    place_id: String,
    #[serde(default)]
    name: String,
    geometry: Geometry,
}

impl TryFrom<NearbyResult> for PlaceStub {
    type Error = LocateError;

    fn try_from(result: NearbyResult) -> Result<Self> {
        let location = result.geometry.location;
        let coordinate = Coordinate::checked(location.lat, location.lng).ok_or_else(|| {
            LocateError::InvalidResponse(format!(
                "place {} has out-of-range location {},{}",
                result.place_id, location.lat, location.lng
            ))
        })?;
        Ok(PlaceStub {
            id: result.place_id,
            name: result.name,
            coordinate,
        })
    }
}

/// Outcome of one nearby search.
#[derive(Debug, Clone, PartialEq)]
pub enum NearbyReply {
    Places(Vec<PlaceStub>),
    /// Valid answer with nothing in range
    ZeroResults,
    Failed {
        status: ApiStatus,
        message: Option<String>,
    },
}

impl TryFrom<NearbyResponse> for NearbyReply {
    type Error = LocateError;

    /// Fails as a whole if any result carries an impossible coordinate, so the
    /// stub list always matches the provider's list one to one.
    fn try_from(response: NearbyResponse) -> Result<Self> {
        let reply = match response.status {
            ApiStatus::Ok if response.results.is_empty() => NearbyReply::ZeroResults,
            ApiStatus::Ok => NearbyReply::Places(
                response
                    .results
                    .into_iter()
                    .map(PlaceStub::try_from)
                    .collect::<Result<Vec<_>>>()?,
            ),
            ApiStatus::ZeroResults => NearbyReply::ZeroResults,
            status => NearbyReply::Failed {
                status,
                message: response.error_message,
            },
        };
        Ok(reply)
    }
}

impl<T: MapsTransport> MapsClient<T> {
    /// Find candidate libraries within the configured radius of `center`.
    ///
    /// Returns an empty list when the provider reports zero results; stubs keep
    /// the provider's response order.
    pub async fn nearby(&self, center: Coordinate) -> Result<Vec<PlaceStub>> {
        let location = center.to_string();
        let radius = self.search.radius_m.to_string();
        let url = self.endpoint(
            "place/nearbysearch/json",
            &[
                ("location", location.as_str()),
                ("radius", radius.as_str()),
                ("type", self.search.place_type.as_str()),
                ("keyword", self.search.keyword.as_str()),
            ],
        )?;
        let response: NearbyResponse = self.fetch(url).await?;

        match NearbyReply::try_from(response)? {
            NearbyReply::Places(stubs) => {
                info!("Nearby search around {} found {} places", center, stubs.len());
                Ok(stubs)
            }
            NearbyReply::ZeroResults => {
                info!("Nearby search around {} found nothing", center);
                Ok(Vec::new())
            }
            NearbyReply::Failed { status, message } => {
                warn!("Nearby search around {} failed with status {}", center, status);
                Err(LocateError::SearchFailed(
                    message.unwrap_or_else(|| NEARBY_FALLBACK_MESSAGE.to_string()),
                ))
            }
        }
    }
}
