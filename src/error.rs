//! Error taxonomy for the search pipeline.

use thiserror::Error;

/// Failures that abort a search (or reject it before it starts).
///
/// Per-place enrichment failures are not represented here: they degrade the
/// affected entry instead of failing the search.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LocateError {
    /// Empty query after trimming
    #[error("Please enter a postal code.")]
    Validation,

    /// Geocoding produced no usable coordinate
    #[error("{0}")]
    NotFound(String),

    /// Nearby search reported a provider error
    #[error("{0}")]
    SearchFailed(String),

    /// Network-level failure talking to a provider
    #[error("{0}")]
    Transport(String),

    /// Provider answered with a body we could not understand
    #[error("invalid provider response: {0}")]
    InvalidResponse(String),

    /// Superseded by a newer search
    #[error("search cancelled")]
    Cancelled,
}

/// Failures of a single HTTP exchange.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// No response at all (DNS, connect, TLS, timeout)
    #[error("network unreachable: {0}")]
    Unreachable(String),

    /// Response arrived with a non-success HTTP status
    #[error("HTTP status {0}")]
    Status(u16),

    /// Response body was not the JSON we expected
    #[error("failed to decode response: {0}")]
    Decode(String),
}

impl From<TransportError> for LocateError {
    fn from(err: TransportError) -> Self {
        match err {
            TransportError::Decode(msg) => LocateError::InvalidResponse(msg),
            other => LocateError::Transport(other.to_string()),
        }
    }
}

pub type Result<T, E = LocateError> = std::result::Result<T, E>;

/// The device could not report its current position.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct PositionError(pub String);
