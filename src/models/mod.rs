//! Core data models for the library locator.

pub mod advisory;
pub mod geo;
pub mod place;

pub use advisory::{Advisory, AdvisoryKind};
pub use geo::{Coordinate, Viewport};
pub use place::{EnrichedPlace, PlaceStub};
