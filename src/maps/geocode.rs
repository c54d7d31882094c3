//! Postal code to coordinate resolution.

use serde::Deserialize;
use tracing::{info, warn};

use super::{ApiStatus, Geometry, MapsClient, MapsTransport};
use crate::error::{LocateError, Result};
use crate::models::Coordinate;

/// Message used when the provider gives no diagnostic of its own.
pub const GEOCODE_FALLBACK_MESSAGE: &str = "Could not find coordinates for the postal code.";

#[derive(Debug, Deserialize)]
struct GeocodeResponse {
    status: ApiStatus,
    #[serde(default)]
    results: Vec<GeocodeResult>,
    error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeocodeResult {
    geometry: Geometry,
}

/// Outcome of one geocoding request.
#[derive(Debug, Clone, PartialEq)]
pub enum GeocodeReply {
    Found(Coordinate),
    /// Nothing usable; carries the provider's diagnostic if it sent one
    NotFound {
        status: ApiStatus,
        message: Option<String>,
    },
}

impl From<GeocodeResponse> for GeocodeReply {
    fn from(response: GeocodeResponse) -> Self {
        let first = response.results.first().map(|r| r.geometry.location);
        match (response.status, first) {
            (ApiStatus::Ok, Some(loc)) => GeocodeReply::Found(Coordinate::new(loc.lat, loc.lng)),
            (status, _) => GeocodeReply::NotFound {
                status,
                message: response.error_message,
            },
        }
    }
}

impl<T: MapsTransport> MapsClient<T> {
    /// Resolve a postal code to the first matching coordinate.
    ///
    /// The request is restricted to the configured country. There is no retry:
    /// any failure ends the lookup.
    pub async fn geocode(&self, query: &str) -> Result<Coordinate> {
        let components = format!("country:{}", self.country);
        let url = self.endpoint(
            "geocode/json",
            &[("address", query), ("components", components.as_str())],
        )?;
        let response: GeocodeResponse = self.fetch(url).await?;

        match GeocodeReply::from(response) {
            GeocodeReply::Found(coord) => {
                let coord = Coordinate::checked(coord.latitude, coord.longitude).ok_or_else(|| {
                    LocateError::InvalidResponse(format!("geocoded coordinate {} out of range", coord))
                })?;
                info!("Geocoded '{}' to {}", query, coord);
                Ok(coord)
            }
            GeocodeReply::NotFound { status, message } => {
                warn!("Geocoding '{}' failed with status {}", query, status);
                Err(LocateError::NotFound(
                    message.unwrap_or_else(|| GEOCODE_FALLBACK_MESSAGE.to_string()),
                ))
            }
        }
    }
}
