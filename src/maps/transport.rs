//! HTTP transport abstraction so provider clients can be tested offline.

use std::future::Future;

use serde_json::Value;
use tracing::trace;
use url::Url;

use crate::error::TransportError;

/// Fetches a JSON document from a provider endpoint.
pub trait MapsTransport: Send + Sync {
    fn get_json(&self, url: Url) -> impl Future<Output = Result<Value, TransportError>> + Send;
}

/// Real transport backed by a shared reqwest client.
#[derive(Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Client with reqwest's default (unbounded) timeouts
    pub fn new() -> Result<Self, TransportError> {
        Self::build(reqwest::Client::builder())
    }

    fn build(builder: reqwest::ClientBuilder) -> Result<Self, TransportError> {
        let client = builder
            .user_agent(concat!("stacks/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| {
                TransportError::Unreachable(format!("Failed to create HTTP client: {}", e))
            })?;
        Ok(Self { client })
    }
}

impl MapsTransport for ReqwestTransport {
    async fn get_json(&self, url: Url) -> Result<Value, TransportError> {
        trace!("GET {}", redact(&url));

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| TransportError::Unreachable(e.without_url().to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::Status(status.as_u16()));
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| TransportError::Decode(e.without_url().to_string()))
    }
}

/// Render a request URL for logs with the API key masked.
pub fn redact(url: &Url) -> String {
    let mut masked = url.clone();
    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(k, v)| {
            let v = if k == "key" { "REDACTED".into() } else { v };
            (k.into_owned(), v.into_owned())
        })
        .collect();
    masked.query_pairs_mut().clear().extend_pairs(pairs);
    masked.to_string()
}
