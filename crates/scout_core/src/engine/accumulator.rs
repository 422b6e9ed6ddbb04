//! Continuous score accumulator.
//!
//! Converts a held directional drag into discrete score ticks via a
//! time-integrated rate curve. The live drive value is a plain mutable cell
//! updated synchronously by pointer-move handling and read directly by the
//! frame step, so the gesture never waits on a render pass.
//!
//! Tick emission carries fractional frame time over between frames; this is
//! what keeps the average rate independent of the frame rate.

/// Central band of the drag treated as no input.
pub const DEAD_ZONE: f32 = 0.05;

/// Hold duration before a press becomes continuous accumulation.
pub const HOLD_MS: u64 = 150;

/// Fastest tick interval, at full displacement.
pub const MIN_TICK_MS: f64 = 30.0;

/// Slowest tick interval, just outside the dead zone.
pub const MAX_TICK_MS: f64 = 300.0;

/// Neutral drive value the gesture always resets to.
pub const NEUTRAL: f32 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragState {
    Idle,
    /// Pointer down, below the hold threshold.
    Pending,
    /// Continuous accumulation running.
    Active,
}

#[derive(Debug)]
pub struct ScoreDrag {
    state: DragState,
    /// Live drive value in [0,1]; the fast-path side channel.
    value: f32,
    pressed_at_ms: u64,
    carry_ms: f64,
}

impl Default for ScoreDrag {
    fn default() -> Self {
        Self::new()
    }
}

impl ScoreDrag {
    pub fn new() -> Self {
        Self { state: DragState::Idle, value: NEUTRAL, pressed_at_ms: 0, carry_ms: 0.0 }
    }

    pub fn state(&self) -> DragState {
        self.state
    }

    /// Latest drive value as written by the pointer handlers.
    pub fn value(&self) -> f32 {
        self.value
    }

    /// Pointer down: enter `Pending`. Returns the instant tick (+1/-1) when
    /// the initial position already exceeds the dead zone, for immediate
    /// feedback before the hold threshold engages; 0 otherwise.
    pub fn pointer_down(&mut self, value: f32, now_ms: u64) -> i64 {
        self.state = DragState::Pending;
        self.pressed_at_ms = now_ms;
        self.carry_ms = 0.0;
        self.value = value.clamp(0.0, 1.0);
        tracing::trace!(value = self.value, "drag pending");

        let displacement = self.value - NEUTRAL;
        if displacement.abs() > DEAD_ZONE {
            if displacement < 0.0 {
                1
            } else {
                -1
            }
        } else {
            0
        }
    }

    /// Pointer move: update the side-channel value. Ignored while idle.
    pub fn pointer_move(&mut self, value: f32) {
        if self.state != DragState::Idle {
            self.value = value.clamp(0.0, 1.0);
        }
    }

    /// One animation frame. Promotes `Pending` to `Active` once the hold
    /// threshold elapses, then integrates `frame_dt_ms` of drag time into
    /// signed ticks (negative drive half increments, positive decrements).
    pub fn frame(&mut self, now_ms: u64, frame_dt_ms: f64) -> i64 {
        match self.state {
            DragState::Idle => 0,
            DragState::Pending => {
                if now_ms.saturating_sub(self.pressed_at_ms) >= HOLD_MS {
                    self.state = DragState::Active;
                    self.carry_ms = 0.0;
                    tracing::trace!("drag active");
                }
                0
            }
            DragState::Active => {
                let displacement = self.value - NEUTRAL;
                if displacement.abs() <= DEAD_ZONE {
                    // back inside the dead zone: drop queued time so leaving
                    // it again does not burst
                    self.carry_ms = 0.0;
                    return 0;
                }
                let magnitude = (((displacement.abs() - DEAD_ZONE) / (0.5 - DEAD_ZONE))
                    .clamp(0.0, 1.0)) as f64;
                // exponential interpolation: magnitude 0 -> MAX (slowest),
                // magnitude 1 -> MIN (fastest)
                let ms_per_tick = MIN_TICK_MS * (MAX_TICK_MS / MIN_TICK_MS).powf(1.0 - magnitude);

                self.carry_ms += frame_dt_ms;
                let ticks = (self.carry_ms / ms_per_tick).floor() as i64;
                if ticks > 0 {
                    self.carry_ms -= ticks as f64 * ms_per_tick;
                }
                if displacement < 0.0 {
                    ticks
                } else {
                    -ticks
                }
            }
        }
    }

    /// Pointer up / pointer leave / teardown: always returns the drive value
    /// to neutral and drops any queued fractional time.
    pub fn release(&mut self) {
        self.state = DragState::Idle;
        self.value = NEUTRAL;
        self.carry_ms = 0.0;
        tracing::trace!("drag released");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Drive the gesture with fixed-size frames for `duration_ms` after the
    /// hold threshold, returning the total emitted ticks.
    fn run_active(value: f32, duration_ms: u64, frame_ms: u64) -> i64 {
        let mut drag = ScoreDrag::new();
        // instant tick is not part of the rate law
        let _instant = drag.pointer_down(value, 0);
        // frames during the hold window emit nothing
        let mut now = 0;
        while now < HOLD_MS {
            now += frame_ms;
            assert_eq!(drag.frame(now, frame_ms as f64), 0, "no ticks before activation");
        }
        assert_eq!(drag.state(), DragState::Active);
        let mut total = 0i64;
        let end = now + duration_ms;
        while now < end {
            now += frame_ms;
            total += drag.frame(now, frame_ms as f64);
        }
        total
    }

    #[test]
    fn test_instant_tick_outside_dead_zone() {
        let mut drag = ScoreDrag::new();
        assert_eq!(drag.pointer_down(0.0, 10), 1, "negative half increments");
        drag.release();
        assert_eq!(drag.pointer_down(1.0, 20), -1, "positive half decrements");
    }

    #[test]
    fn test_no_instant_tick_inside_dead_zone() {
        let mut drag = ScoreDrag::new();
        assert_eq!(drag.pointer_down(0.52, 10), 0);
        assert_eq!(drag.pointer_down(0.5, 10), 0);
    }

    #[test]
    fn test_hold_threshold_promotes_to_active() {
        let mut drag = ScoreDrag::new();
        drag.pointer_down(0.0, 1_000);
        assert_eq!(drag.state(), DragState::Pending);
        drag.frame(1_149, 16.0);
        assert_eq!(drag.state(), DragState::Pending);
        drag.frame(1_150, 16.0);
        assert_eq!(drag.state(), DragState::Active);
    }

    #[test]
    fn test_rate_law_full_magnitude() {
        // magnitude 1 for 3000ms -> floor(3000 / 30) ticks, +/-1 for rounding
        let ticks = run_active(0.0, 3_000, 10);
        assert!((99..=101).contains(&ticks), "expected ~100 ticks, got {}", ticks);
    }

    #[test]
    fn test_rate_law_slow_end() {
        // just outside the dead zone: ms_per_tick approaches 300
        let ticks = run_active(0.5 + DEAD_ZONE + 0.0001, 3_000, 10);
        assert!((-11..=-9).contains(&ticks), "expected ~-10 ticks, got {}", ticks);
    }

    #[test]
    fn test_rate_independent_of_frame_size() {
        // fractional carry keeps the average rate stable across frame rates
        let coarse = run_active(0.0, 3_000, 50);
        let fine = run_active(0.0, 3_000, 5);
        assert!((coarse - fine).abs() <= 1, "coarse {} vs fine {}", coarse, fine);
    }

    #[test]
    fn test_dead_zone_reentry_resets_carry() {
        let mut drag = ScoreDrag::new();
        drag.pointer_down(0.0, 0);
        drag.frame(HOLD_MS, 0.0);
        assert_eq!(drag.state(), DragState::Active);

        // build up almost a full tick of carry, then dip into the dead zone
        drag.frame(HOLD_MS + 29, 29.0);
        drag.pointer_move(0.5);
        assert_eq!(drag.frame(HOLD_MS + 58, 29.0), 0);

        // leaving the dead zone again must not burst queued ticks
        drag.pointer_move(0.0);
        let ticks = drag.frame(HOLD_MS + 68, 10.0);
        assert_eq!(ticks, 0, "carry was reset, 10ms < 30ms per tick");
    }

    #[test]
    fn test_release_resets_to_neutral() {
        let mut drag = ScoreDrag::new();
        drag.pointer_down(0.1, 0);
        drag.frame(HOLD_MS, 16.0);
        drag.release();
        assert_eq!(drag.state(), DragState::Idle);
        assert_eq!(drag.value(), NEUTRAL);
        // frames after release emit nothing
        assert_eq!(drag.frame(HOLD_MS + 100, 16.0), 0);
    }

    #[test]
    fn test_pointer_move_ignored_while_idle() {
        let mut drag = ScoreDrag::new();
        drag.pointer_move(0.9);
        assert_eq!(drag.value(), NEUTRAL);
    }

    #[cfg(all(test, feature = "proptest"))]
    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Property: total ticks over a fixed hold match the rate law
            /// within one tick, for any frame size.
            #[test]
            fn prop_rate_law(frame_ms in 4u64..60) {
                let ticks = run_active(0.0, 3_000, frame_ms);
                prop_assert!((99..=101).contains(&ticks));
            }
        }
    }
}
