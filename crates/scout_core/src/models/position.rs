//! Normalized field positions.

use serde::{Deserialize, Serialize};

/// Position on the field in normalized `[0,1] x [0,1]` coordinates.
///
/// Always stored in the canonical orientation (blue alliance, 0°): stored
/// data must never depend on which alliance or device orientation was
/// active when it was recorded. Mirroring for display happens in
/// `engine::coordinates`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FieldPos {
    pub x: f32,
    pub y: f32,
}

impl FieldPos {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Clamp both components into the unit square.
    pub fn clamped(self) -> Self {
        Self { x: self.x.clamp(0.0, 1.0), y: self.y.clamp(0.0, 1.0) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamped_is_idempotent() {
        let pos = FieldPos::new(1.5, -0.2);
        let once = pos.clamped();
        let twice = once.clamped();
        assert_eq!(once, twice);
        assert_eq!(once, FieldPos::new(1.0, 0.0));
    }
}
