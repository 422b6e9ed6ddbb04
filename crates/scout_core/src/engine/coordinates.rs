//! Canonical/screen coordinate transforms.
//!
//! Positions are stored in one fixed canonical orientation (blue alliance,
//! 0°). Two related but distinct flip booleans exist and must not be
//! conflated:
//!
//! - **storage flip** — device/field physical orientation alone; decides
//!   whether a stored (canonical) position is mirrored for display.
//! - **layout flip** — storage flip XOR alliance-is-red; decides which
//!   screen half UI zones occupy.
//!
//! A component asking "should the displayed robot dot be mirrored" uses the
//! storage flip; a component asking "which screen half is the shooting
//! zone" uses the layout flip.

use crate::models::position::FieldPos;
use crate::settings::{Alliance, FieldOrientation};

/// Mirror a position through the field center.
#[inline]
pub fn mirror(pos: FieldPos) -> FieldPos {
    FieldPos { x: 1.0 - pos.x, y: 1.0 - pos.y }
}

/// Map a screen position to canonical storage coordinates.
#[inline]
pub fn to_canonical(pos: FieldPos, flip: bool) -> FieldPos {
    if flip {
        mirror(pos)
    } else {
        pos
    }
}

/// Map a canonical position to screen coordinates. Self-inverse with
/// [`to_canonical`]: the mirror is its own inverse.
#[inline]
pub fn to_screen(pos: FieldPos, flip: bool) -> FieldPos {
    to_canonical(pos, flip)
}

/// Storage-orientation flip: mirrors stored coordinates for display.
#[inline]
pub fn storage_flip(orientation: FieldOrientation) -> bool {
    orientation == FieldOrientation::Flipped
}

/// UI-layout flip: which screen half zone buttons occupy.
#[inline]
pub fn layout_flip(orientation: FieldOrientation, alliance: Alliance) -> bool {
    storage_flip(orientation) ^ (alliance == Alliance::Red)
}

/// Axis-aligned rectangle in normalized coordinates, `x1 <= x2`, `y1 <= y2`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoneRect {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
}

impl ZoneRect {
    pub const fn new(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    pub fn contains(&self, pos: FieldPos) -> bool {
        pos.x >= self.x1 && pos.x <= self.x2 && pos.y >= self.y1 && pos.y <= self.y2
    }
}

/// Mirror a rectangle across the field center line for the UI-layout flip.
/// Only the x span moves; the y span is unchanged.
pub fn mirror_rect(r: ZoneRect) -> ZoneRect {
    ZoneRect { x1: 1.0 - r.x2, y1: r.y1, x2: 1.0 - r.x1, y2: r.y2 }
}
