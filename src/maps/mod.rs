//! Clients for the Google Maps web services used by the locator.
//!
//! Each endpoint lives in its own module and adds methods to [`MapsClient`]:
//! geocoding, nearby search and place details.

pub mod details;
pub mod geocode;
pub mod nearby;
pub mod transport;

use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;
use url::Url;

use crate::config::{MapsConfig, SearchConfig};
use crate::error::TransportError;

pub use details::{DetailReply, PlaceDetail};
pub use geocode::GeocodeReply;
pub use nearby::NearbyReply;
pub use transport::{MapsTransport, ReqwestTransport};

/// Provider status code carried in every web service response.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum ApiStatus {
    Ok,
    ZeroResults,
    NotFound,
    InvalidRequest,
    OverQueryLimit,
    RequestDenied,
    UnknownError,
    /// Any code this client does not know about
    Other(String),
}

impl From<String> for ApiStatus {
    fn from(code: String) -> Self {
        match code.as_str() {
            "OK" => ApiStatus::Ok,
            "ZERO_RESULTS" => ApiStatus::ZeroResults,
            "NOT_FOUND" => ApiStatus::NotFound,
            "INVALID_REQUEST" => ApiStatus::InvalidRequest,
            "OVER_QUERY_LIMIT" => ApiStatus::OverQueryLimit,
            "REQUEST_DENIED" => ApiStatus::RequestDenied,
            "UNKNOWN_ERROR" => ApiStatus::UnknownError,
            _ => ApiStatus::Other(code),
        }
    }
}

impl std::fmt::Display for ApiStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let code = match self {
            ApiStatus::Ok => "OK",
            ApiStatus::ZeroResults => "ZERO_RESULTS",
            ApiStatus::NotFound => "NOT_FOUND",
            ApiStatus::InvalidRequest => "INVALID_REQUEST",
            ApiStatus::OverQueryLimit => "OVER_QUERY_LIMIT",
            ApiStatus::RequestDenied => "REQUEST_DENIED",
            ApiStatus::UnknownError => "UNKNOWN_ERROR",
            ApiStatus::Other(code) => code,
        };
        f.write_str(code)
    }
}

/// `{ "lat": .., "lng": .. }` as returned inside `geometry.location`
#[derive(Debug, Clone, Copy, Deserialize)]
pub(crate) struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub(crate) struct Geometry {
    pub location: LatLng,
}

/// Client for the Maps web services, generic over the HTTP transport.
pub struct MapsClient<T> {
    transport: T,
    base_url: Url,
    api_key: String,
    country: String,
    search: SearchConfig,
}

impl<T: MapsTransport> MapsClient<T> {
    pub fn new(
        transport: T,
        maps: &MapsConfig,
        search: SearchConfig,
        api_key: &str,
    ) -> anyhow::Result<Self> {
        let mut base_url = Url::parse(&maps.base_url)?;
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        Ok(Self {
            transport,
            base_url,
            api_key: api_key.to_string(),
            country: maps.country.clone(),
            search,
        })
    }

    pub fn search_config(&self) -> &SearchConfig {
        &self.search
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Build `{base}{endpoint}?{params}&key=...`
    fn endpoint(&self, endpoint: &str, params: &[(&str, &str)]) -> Result<Url, TransportError> {
        let mut url = self
            .base_url
            .join(endpoint)
            .map_err(|e| TransportError::Unreachable(format!("bad endpoint {}: {}", endpoint, e)))?;
        url.query_pairs_mut()
            .extend_pairs(params)
            .append_pair("key", &self.api_key);
        Ok(url)
    }

    /// GET and decode a typed response body
    async fn fetch<R: DeserializeOwned>(&self, url: Url) -> Result<R, TransportError> {
        debug!("Requesting {}", transport::redact(&url));
        let body = self.transport.get_json(url).await?;
        serde_json::from_value(body).map_err(|e| TransportError::Decode(e.to_string()))
    }
}


#[cfg(test)]
mod tests {
    use super::testing::*;

    #[test]
    fn test_status_codes() {
        let ok: super::ApiStatus = serde_json::from_str("\"OK\"").unwrap();
        assert_eq!(ok, super::ApiStatus::Ok);

        let zero: super::ApiStatus = serde_json::from_str("\"ZERO_RESULTS\"").unwrap();
        assert_eq!(zero, super::ApiStatus::ZeroResults);

        let other: super::ApiStatus = serde_json::from_str("\"SOMETHING_NEW\"").unwrap();
        assert_eq!(other, super::ApiStatus::Other("SOMETHING_NEW".to_string()));
        assert_eq!(other.to_string(), "SOMETHING_NEW");
    }

    #[test]
    fn test_endpoint_appends_key() {
        let client = client(MockTransport::default());
        let url = client
            .endpoint("place/details/json", &[("place_id", "abc")])
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://maps.googleapis.com/maps/api/place/details/json?place_id=abc&key=test-key"
        );
    }
}
