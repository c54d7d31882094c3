//! Initial map viewport from the device position.
//!
//! One best-effort attempt: ask for foreground location permission, read the
//! current position once, and fall back to the configured home region on
//! denial or failure. Never fails.

use std::future::Future;

use tracing::{info, warn};

use crate::config::RegionConfig;
use crate::error::PositionError;
use crate::models::{Advisory, Coordinate, Viewport};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Permission {
    Granted,
    Denied,
}

/// Platform location service.
pub trait DeviceLocator: Send + Sync {
    fn request_permission(&self) -> impl Future<Output = Permission> + Send;

    fn current_position(&self) -> impl Future<Output = Result<Coordinate, PositionError>> + Send;
}

/// Result of the bootstrap: always a viewport, sometimes an advisory.
#[derive(Debug, Clone, PartialEq)]
pub struct Bootstrap {
    pub viewport: Viewport,
    pub advisory: Option<Advisory>,
}

pub async fn bootstrap<D: DeviceLocator>(device: &D, region: &RegionConfig) -> Bootstrap {
    let fallback = Viewport::around(region.default_center, region.wide_delta);

    if device.request_permission().await == Permission::Denied {
        warn!("Location permission denied, showing default region");
        return Bootstrap {
            viewport: fallback,
            advisory: Some(Advisory::warning(
                "Permission denied",
                "Location permission is needed to show nearby libraries.",
            )),
        };
    }

    match device.current_position().await {
        Ok(position) => {
            info!("Device located at {}", position);
            Bootstrap {
                viewport: Viewport::around(position, region.narrow_delta),
                advisory: None,
            }
        }
        Err(err) => {
            warn!("Error getting current location: {}", err);
            Bootstrap {
                viewport: fallback,
                advisory: Some(Advisory::error(
                    "Error",
                    "Could not fetch current location. Please enter a postal code.",
                )),
            }
        }
    }
}

/// Locator with a fixed answer, for hosts without a positioning service.
#[derive(Debug, Clone)]
pub enum StaticLocator {
    Denied,
    At(Coordinate),
    Failing(String),
}

impl StaticLocator {
    /// Granted at `lat,lon` when both are given, denied otherwise
    pub fn from_args(lat: Option<f64>, lon: Option<f64>) -> Self {
        match (lat, lon) {
            (Some(lat), Some(lon)) => match Coordinate::checked(lat, lon) {
                Some(coord) => StaticLocator::At(coord),
                None => StaticLocator::Failing(format!("invalid position {},{}", lat, lon)),
            },
            _ => StaticLocator::Denied,
        }
    }
}

impl DeviceLocator for StaticLocator {
    async fn request_permission(&self) -> Permission {
        match self {
            StaticLocator::Denied => Permission::Denied,
            _ => Permission::Granted,
        }
    }

    async fn current_position(&self) -> Result<Coordinate, PositionError> {
        match self {
            StaticLocator::At(coord) => Ok(*coord),
            StaticLocator::Failing(reason) => Err(PositionError(reason.clone())),
            StaticLocator::Denied => Err(PositionError("permission denied".to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::models::AdvisoryKind;

    /// Counts position reads so tests can check none happen after denial
    struct CountingLocator {
        inner: StaticLocator,
        reads: AtomicUsize,
    }

    impl DeviceLocator for CountingLocator {
        async fn request_permission(&self) -> Permission {
            self.inner.request_permission().await
        }

        async fn current_position(&self) -> Result<Coordinate, PositionError> {
            self.reads.fetch_add(1, Ordering::SeqCst);
            self.inner.current_position().await
        }
    }

    fn counting(inner: StaticLocator) -> CountingLocator {
        CountingLocator {
            inner,
            reads: AtomicUsize::new(0),
        }
    }

    #[tokio::test]
    async fn test_denied_uses_default_region() {
        let region = RegionConfig::default();
        let device = counting(StaticLocator::Denied);

        let boot = bootstrap(&device, &region).await;
        assert_eq!(boot.viewport.center, Coordinate::new(1.3521, 103.8198));
        assert_eq!(boot.viewport.latitude_delta, 0.1);
        assert_eq!(boot.viewport.longitude_delta, 0.1);
        let advisory = boot.advisory.unwrap();
        assert_eq!(advisory.kind, AdvisoryKind::Warning);
        assert_eq!(advisory.title, "Permission denied");
        assert_eq!(device.reads.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_granted_uses_narrow_delta() {
        let region = RegionConfig::default();
        let device = counting(StaticLocator::At(Coordinate::new(1.44, 103.78)));

        let boot = bootstrap(&device, &region).await;
        assert_eq!(
            boot.viewport,
            Viewport::around(Coordinate::new(1.44, 103.78), 0.02)
        );
        assert!(boot.advisory.is_none());
        assert_eq!(device.reads.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_position_failure_falls_back() {
        let region = RegionConfig::default();
        let device = counting(StaticLocator::Failing("no fix".to_string()));

        let boot = bootstrap(&device, &region).await;
        assert_eq!(
            boot.viewport,
            Viewport::around(region.default_center, region.wide_delta)
        );
        assert_eq!(boot.advisory.unwrap().kind, AdvisoryKind::Error);
        // single attempt, no retry
        assert_eq!(device.reads.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_from_args() {
        assert!(matches!(StaticLocator::from_args(None, None), StaticLocator::Denied));
        assert!(matches!(StaticLocator::from_args(Some(1.0), None), StaticLocator::Denied));
        assert!(matches!(
            StaticLocator::from_args(Some(1.3), Some(103.8)),
            StaticLocator::At(_)
        ));
        assert!(matches!(
            StaticLocator::from_args(Some(123.0), Some(103.8)),
            StaticLocator::Failing(_)
        ));
    }
}
