//! Named field zones and screen hit-testing.
//!
//! Zone rectangles are defined once in the canonical layout and mirrored
//! via [`mirror_rect`] when the UI-layout flip is active. Hit tests take
//! screen positions; canonical storage of the tapped position is a separate
//! concern handled with the storage flip.

use serde::{Deserialize, Serialize};

use super::coordinates::{mirror_rect, ZoneRect};
use crate::models::position::FieldPos;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Zone {
    Climb,
    Shooting,
    Intake,
}

impl Zone {
    pub fn name(&self) -> &'static str {
        match self {
            Zone::Climb => "climb",
            Zone::Shooting => "shooting",
            Zone::Intake => "intake",
        }
    }
}

/// Canonical zone layout: climb hangar on the left edge, shooting band in
/// the middle, intake terminal on the right edge.
const ZONE_LAYOUT: [(Zone, ZoneRect); 3] = [
    (Zone::Climb, ZoneRect::new(0.0, 0.0, 0.25, 1.0)),
    (Zone::Shooting, ZoneRect::new(0.25, 0.0, 0.75, 1.0)),
    (Zone::Intake, ZoneRect::new(0.75, 0.0, 1.0, 1.0)),
];

/// Find the zone under a screen position. First matching rectangle wins on
/// shared edges.
pub fn zone_at(screen: FieldPos, layout_flip: bool) -> Option<Zone> {
    ZONE_LAYOUT
        .iter()
        .map(|&(zone, rect)| (zone, if layout_flip { mirror_rect(rect) } else { rect }))
        .find(|(_, rect)| rect.contains(screen))
        .map(|(zone, _)| zone)
}
