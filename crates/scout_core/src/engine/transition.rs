//! Phase transition detection.
//!
//! Holds the last observed `(phase, sub_phase)` pair in a side channel
//! (never in the action history) and fires a fixed-duration visual flash on
//! every change after the first observation. A retrigger restarts the flash
//! timer; flashes never stack.

use super::clock::{MatchClockState, Phase, SubPhase};
use super::timing::FLASH_MS;

#[derive(Debug, Default)]
pub struct TransitionDetector {
    last: Option<(Phase, Option<SubPhase>)>,
    flash_until_ms: Option<u64>,
}

impl TransitionDetector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one derived clock state. Returns true when a phase or sub-phase
    /// boundary was crossed since the previous observation.
    ///
    /// The very first observation seeds the side channel without firing:
    /// entering `auto` from the unset sentinel produces no flash.
    pub fn observe(&mut self, clock: &MatchClockState, now_ms: u64) -> bool {
        let key = (clock.phase, clock.sub_phase.map(|s| s.kind));
        let fired = match self.last {
            None => false,
            Some(prev) => prev != key,
        };
        if fired {
            tracing::debug!(from = ?self.last, to = ?key, "phase transition");
            self.flash_until_ms = Some(now_ms + FLASH_MS);
        }
        self.last = Some(key);
        fired
    }

    /// Whether the transition flash is currently visible.
    pub fn is_flashing(&self, now_ms: u64) -> bool {
        self.flash_until_ms.is_some_and(|until| now_ms < until)
    }

    /// Drop all observed state, e.g. when the entry screen is reset.
    pub fn reset(&mut self) {
        self.last = None;
        self.flash_until_ms = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::clock::{default_schedule, derive_clock};

    fn observe_at(detector: &mut TransitionDetector, elapsed: u64) -> bool {
        let now = 1_000 + elapsed;
        let clock = derive_clock(default_schedule(), 1_000, now);
        detector.observe(&clock, now)
    }

    #[test]
    fn test_first_observation_does_not_fire() {
        let mut detector = TransitionDetector::new();
        assert!(!observe_at(&mut detector, 100));
        assert!(!detector.is_flashing(1_100));
    }

    #[test]
    fn test_fires_on_phase_change() {
        let mut detector = TransitionDetector::new();
        observe_at(&mut detector, 19_900);
        assert!(observe_at(&mut detector, 20_050), "auto -> between must flash");
        assert!(observe_at(&mut detector, 23_016), "between -> teleop must flash");
    }

    #[test]
    fn test_sub_phase_boundary_fires_exactly_once() {
        let mut detector = TransitionDetector::new();
        // several ticks inside shift_1, then two inside shift_2
        observe_at(&mut detector, 47_983);
        assert!(!observe_at(&mut detector, 47_999));
        assert!(observe_at(&mut detector, 58_001), "shift_1 -> shift_2 fires");
        assert!(!observe_at(&mut detector, 58_017), "same sub-phase does not re-fire");
        assert!(!observe_at(&mut detector, 58_033));
    }

    #[test]
    fn test_teleop_to_post_fires() {
        let mut detector = TransitionDetector::new();
        observe_at(&mut detector, 162_990);
        assert!(observe_at(&mut detector, 163_010));
    }

    #[test]
    fn test_flash_window_and_restart() {
        let mut detector = TransitionDetector::new();
        observe_at(&mut detector, 19_900);
        observe_at(&mut detector, 20_000);
        // flash was triggered at now = 21_000
        assert!(detector.is_flashing(21_100));
        assert!(detector.is_flashing(21_349));
        assert!(!detector.is_flashing(21_350), "flash ends after 350ms");

        // next boundary restarts the timer instead of stacking
        observe_at(&mut detector, 23_000);
        assert!(detector.is_flashing(1_000 + 23_000 + 349));
        assert!(!detector.is_flashing(1_000 + 23_000 + 350));
    }

    #[test]
    fn test_reset_returns_to_sentinel() {
        let mut detector = TransitionDetector::new();
        observe_at(&mut detector, 5_000);
        detector.reset();
        // after reset the next observation is "first" again
        assert!(!observe_at(&mut detector, 25_000));
    }
}
