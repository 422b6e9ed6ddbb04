//! Fixed match timing constants.
//!
//! Phase boundaries are contiguous, non-overlapping intervals in
//! elapsed-match-time. The teleop sub-phase durations must sum exactly to
//! the teleop phase duration; that is checked at compile time below, and
//! `PhaseSchedule::new` enforces the same rule for non-default schedules.

/// Autonomous period duration.
pub const AUTO_MS: u64 = 20_000;

/// Gap between auto and teleop (drivers pick up controllers).
pub const BETWEEN_MS: u64 = 3_000;

/// First teleop sub-phase: transition out of auto positioning.
pub const TRANSITION_MS: u64 = 10_000;

/// Each of the four mid-match shifts.
pub const SHIFT_MS: u64 = 25_000;

/// Endgame sub-phase (climb window).
pub const ENDGAME_MS: u64 = 30_000;

/// Total teleop duration, derived from the sub-phase sequence.
pub const TELEOP_MS: u64 = TRANSITION_MS + 4 * SHIFT_MS + ENDGAME_MS;

/// Total match duration from match start to the post phase.
pub const MATCH_MS: u64 = AUTO_MS + BETWEEN_MS + TELEOP_MS;

/// Duration of the phase-transition visual flash.
pub const FLASH_MS: u64 = 350;

// Compile-time validation
const _: () = assert!(TRANSITION_MS + 4 * SHIFT_MS + ENDGAME_MS == TELEOP_MS);
const _: () = assert!(TELEOP_MS == 140_000);
const _: () = assert!(MATCH_MS == 163_000);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_boundaries() {
        assert_eq!(AUTO_MS, 20_000);
        assert_eq!(AUTO_MS + BETWEEN_MS, 23_000);
        assert_eq!(AUTO_MS + BETWEEN_MS + TELEOP_MS, 163_000);
    }

    #[test]
    fn test_shift_2_boundary() {
        // transition + shift_1 after the teleop start at 23s
        assert_eq!(AUTO_MS + BETWEEN_MS + TRANSITION_MS + SHIFT_MS, 58_000);
    }
}
