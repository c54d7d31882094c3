//! Coordinates and map viewports.

use serde::{Deserialize, Serialize};

/// Geographic point in WGS84 degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Build a coordinate, rejecting values outside [-90,90] x [-180,180]
    pub fn checked(latitude: f64, longitude: f64) -> Option<Self> {
        let coord = Self::new(latitude, longitude);
        coord.is_valid().then_some(coord)
    }

    pub fn is_valid(&self) -> bool {
        (-90.0..=90.0).contains(&self.latitude) && (-180.0..=180.0).contains(&self.longitude)
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{},{}", self.latitude, self.longitude)
    }
}

/// Map window: a center plus the span shown in each axis (degrees).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Viewport {
    #[serde(flatten)]
    pub center: Coordinate,
    pub latitude_delta: f64,
    pub longitude_delta: f64,
}

impl Viewport {
    /// Square viewport centered on `center`
    pub fn around(center: Coordinate, delta: f64) -> Self {
        Self {
            center,
            latitude_delta: delta,
            longitude_delta: delta,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checked_accepts_bounds() {
        assert!(Coordinate::checked(90.0, 180.0).is_some());
        assert!(Coordinate::checked(-90.0, -180.0).is_some());
        assert!(Coordinate::checked(1.35, 103.8).is_some());
    }

    #[test]
    fn test_checked_rejects_out_of_range() {
        assert!(Coordinate::checked(90.5, 0.0).is_none());
        assert!(Coordinate::checked(0.0, -180.1).is_none());
        assert!(Coordinate::checked(f64::NAN, 0.0).is_none());
    }

    #[test]
    fn test_display_matches_location_param() {
        let coord = Coordinate::new(1.35, 103.8);
        assert_eq!(coord.to_string(), "1.35,103.8");
    }

    #[test]
    fn test_viewport_serializes_flat() {
        let viewport = Viewport::around(Coordinate::new(1.0, 2.0), 0.1);
        let json = serde_json::to_value(viewport).unwrap();
        assert_eq!(json["latitude"], 1.0);
        assert_eq!(json["longitude"], 2.0);
        assert_eq!(json["latitudeDelta"], 0.1);
        assert_eq!(json["longitudeDelta"], 0.1);
    }
}
