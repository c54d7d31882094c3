//! Place records produced by the search pipeline.

use serde::{Deserialize, Serialize};

use super::Coordinate;

/// Hours text used when the detail lookup itself failed.
pub const HOURS_NOT_AVAILABLE: &str = "Not available";

/// Hours text used when details succeeded but carry no entry for today.
pub const HOURS_UNAVAILABLE: &str = "Hours unavailable";

/// Candidate returned by the nearby search, prior to enrichment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceStub {
    /// Provider-assigned place id, unique within one search
    pub id: String,
    pub name: String,
    pub coordinate: Coordinate,
}

/// A place merged with live hours/status, or degraded to a placeholder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrichedPlace {
    pub id: String,
    pub name: String,
    pub coordinate: Coordinate,
    pub today_hours: String,
    pub is_open_now: bool,
}

impl EnrichedPlace {
    /// Placeholder built from the stub when its detail lookup failed
    pub fn degraded(stub: PlaceStub) -> Self {
        Self {
            id: stub.id,
            name: stub.name,
            coordinate: stub.coordinate,
            today_hours: HOURS_NOT_AVAILABLE.to_string(),
            is_open_now: false,
        }
    }

    pub fn is_degraded(&self) -> bool {
        self.today_hours == HOURS_NOT_AVAILABLE && !self.is_open_now
    }
}
