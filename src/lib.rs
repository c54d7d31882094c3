//! Stacks - find public libraries near a postal code or the device location.
//!
//! This library holds the search pipeline; the `locate` binary is a thin
//! front-end over it.

pub mod config;
pub mod enrich;
pub mod error;
pub mod location;
pub mod maps;
pub mod models;
pub mod pipeline;

pub use error::{LocateError, TransportError};
pub use models::{Advisory, Coordinate, EnrichedPlace, PlaceStub, Viewport};
pub use pipeline::{MapModel, SearchController, SearchOutcome, SearchPhase};
