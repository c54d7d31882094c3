//! Observable map state written only by the search controller.

use serde::Serialize;

use crate::models::{Advisory, EnrichedPlace, Viewport};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchPhase {
    Idle,
    Searching,
    Success,
    Failed,
}

/// Snapshot rendered by the presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapModel {
    /// Incremented each time a search starts
    pub generation: u64,
    pub phase: SearchPhase,
    /// None until the bootstrap or a search has positioned the map
    pub viewport: Option<Viewport>,
    pub places: Vec<EnrichedPlace>,
    pub advisory: Option<Advisory>,
}

impl Default for MapModel {
    fn default() -> Self {
        Self {
            generation: 0,
            phase: SearchPhase::Idle,
            viewport: None,
            places: Vec::new(),
            advisory: None,
        }
    }
}

/// What a finished search hands back to its caller.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchOutcome {
    pub viewport: Viewport,
    pub places: Vec<EnrichedPlace>,
    /// Set when the search found nothing in range
    pub advisory: Option<Advisory>,
}
