//! Planet telemetry payloads consumed from the AI service.

use serde::{Deserialize, Serialize};

use crate::conversation::GroundingSource;

/// Marker value in `last_update` when telemetry fell back to the offline
/// payload.
pub const SYSTEM_OFFLINE: &str = "SYSTEM_OFFLINE";

/// Structured planet facts, in the fixed schema the AI is asked to fill.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanetData {
    pub introduction: String,
    pub description: String,
    pub key_points: Vec<String>,
    pub news: String,
    pub last_update: String,
}

impl PlanetData {
    /// True when this payload is the degraded offline substitute rather
    /// than live telemetry.
    pub fn is_offline(&self) -> bool {
        self.last_update == SYSTEM_OFFLINE
    }
}

/// The full planet-detail response handed to the UI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanetInfoResponse {
    pub data: Option<PlanetData>,
    pub sources: Vec<GroundingSource>,
}
