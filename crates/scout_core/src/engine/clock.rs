//! Match clock derivation.
//!
//! The clock is never stored as mutable phase/remaining fields that could
//! drift apart: the full [`MatchClockState`] is re-derived on every call
//! from a single anchor timestamp. `anchor_ms == 0` means the match has not
//! started. The derivation is pure, so identical elapsed time always yields
//! an identical state (replayable).

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use super::timing::{AUTO_MS, BETWEEN_MS, ENDGAME_MS, SHIFT_MS, TRANSITION_MS};
use crate::error::{CoreError, Result};

/// Top-level match segment. Terminal at `Post`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Prestart,
    Auto,
    Between,
    Teleop,
    Post,
}

/// Named interval within teleop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubPhase {
    Transition,
    #[serde(rename = "shift_1")]
    Shift1,
    #[serde(rename = "shift_2")]
    Shift2,
    #[serde(rename = "shift_3")]
    Shift3,
    #[serde(rename = "shift_4")]
    Shift4,
    Endgame,
}

impl SubPhase {
    pub fn name(&self) -> &'static str {
        match self {
            SubPhase::Transition => "transition",
            SubPhase::Shift1 => "shift_1",
            SubPhase::Shift2 => "shift_2",
            SubPhase::Shift3 => "shift_3",
            SubPhase::Shift4 => "shift_4",
            SubPhase::Endgame => "endgame",
        }
    }
}

/// One teleop sub-phase and its fixed duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubPhaseSlot {
    pub kind: SubPhase,
    pub duration_ms: u64,
}

/// Derived sub-phase progress within teleop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubPhaseState {
    pub kind: SubPhase,
    pub elapsed_ms: u64,
    pub total_ms: u64,
}

/// Derived clock state. Never stored; recomputed from the anchor each tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchClockState {
    pub phase: Phase,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub sub_phase: Option<SubPhaseState>,
    pub phase_elapsed_ms: u64,
    pub phase_remaining_ms: u64,
}

impl MatchClockState {
    fn prestart() -> Self {
        Self {
            phase: Phase::Prestart,
            sub_phase: None,
            phase_elapsed_ms: 0,
            phase_remaining_ms: 0,
        }
    }
}

/// Phase boundary configuration.
///
/// The teleop total is derived from the sub-phase sequence, so sub-phase
/// durations summing to the teleop duration holds by construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhaseSchedule {
    auto_ms: u64,
    between_ms: u64,
    sub_phases: Vec<SubPhaseSlot>,
}

impl PhaseSchedule {
    /// Build a schedule from explicit durations.
    ///
    /// Every duration must be nonzero and the sub-phase sequence non-empty;
    /// a zero-length interval would make phase boundaries ambiguous.
    pub fn new(auto_ms: u64, between_ms: u64, sub_phases: Vec<SubPhaseSlot>) -> Result<Self> {
        if auto_ms == 0 || between_ms == 0 {
            return Err(CoreError::InvalidSchedule(
                "auto and between durations must be nonzero".to_string(),
            ));
        }
        if sub_phases.is_empty() {
            return Err(CoreError::InvalidSchedule("no teleop sub-phases".to_string()));
        }
        if let Some(slot) = sub_phases.iter().find(|s| s.duration_ms == 0) {
            return Err(CoreError::InvalidSchedule(format!(
                "sub-phase {} has zero duration",
                slot.kind.name()
            )));
        }
        Ok(Self { auto_ms, between_ms, sub_phases })
    }

    pub fn auto_ms(&self) -> u64 {
        self.auto_ms
    }

    pub fn between_ms(&self) -> u64 {
        self.between_ms
    }

    pub fn sub_phases(&self) -> &[SubPhaseSlot] {
        &self.sub_phases
    }

    /// Total teleop duration (sum of the sub-phase durations).
    pub fn teleop_ms(&self) -> u64 {
        self.sub_phases.iter().map(|s| s.duration_ms).sum()
    }

    /// Total match duration from start to the post phase.
    pub fn match_ms(&self) -> u64 {
        self.auto_ms + self.between_ms + self.teleop_ms()
    }

    /// Cumulative-duration lookup of the sub-phase at `teleop_elapsed_ms`.
    ///
    /// Callers only pass values below `teleop_ms()`; with integer millisecond
    /// arithmetic the scan cannot overrun, but the tail is still clamped to
    /// the final sub-phase rather than left unhandled.
    fn sub_phase_at(&self, teleop_elapsed_ms: u64) -> SubPhaseState {
        let mut start = 0u64;
        let mut clamp = SubPhaseState { kind: SubPhase::Endgame, elapsed_ms: 0, total_ms: 0 };
        for slot in &self.sub_phases {
            let end = start + slot.duration_ms;
            if teleop_elapsed_ms < end {
                return SubPhaseState {
                    kind: slot.kind,
                    elapsed_ms: teleop_elapsed_ms - start,
                    total_ms: slot.duration_ms,
                };
            }
            clamp = SubPhaseState {
                kind: slot.kind,
                elapsed_ms: slot.duration_ms,
                total_ms: slot.duration_ms,
            };
            start = end;
        }
        clamp
    }
}

impl Default for PhaseSchedule {
    fn default() -> Self {
        Self {
            auto_ms: AUTO_MS,
            between_ms: BETWEEN_MS,
            sub_phases: vec![
                SubPhaseSlot { kind: SubPhase::Transition, duration_ms: TRANSITION_MS },
                SubPhaseSlot { kind: SubPhase::Shift1, duration_ms: SHIFT_MS },
                SubPhaseSlot { kind: SubPhase::Shift2, duration_ms: SHIFT_MS },
                SubPhaseSlot { kind: SubPhase::Shift3, duration_ms: SHIFT_MS },
                SubPhaseSlot { kind: SubPhase::Shift4, duration_ms: SHIFT_MS },
                SubPhaseSlot { kind: SubPhase::Endgame, duration_ms: ENDGAME_MS },
            ],
        }
    }
}

static DEFAULT_SCHEDULE: Lazy<PhaseSchedule> = Lazy::new(PhaseSchedule::default);

/// Shared default schedule for callers that never customize timings.
pub fn default_schedule() -> &'static PhaseSchedule {
    &DEFAULT_SCHEDULE
}

/// Derive the full clock state from the anchor and the current wall clock.
///
/// `anchor_ms == 0` means not started. `now_ms < anchor_ms` (clock skew) is
/// treated as prestart-equivalent; negative durations never reach callers.
pub fn derive_clock(schedule: &PhaseSchedule, anchor_ms: u64, now_ms: u64) -> MatchClockState {
    if anchor_ms == 0 || now_ms < anchor_ms {
        return MatchClockState::prestart();
    }
    let elapsed = now_ms - anchor_ms;

    let auto_end = schedule.auto_ms;
    let between_end = auto_end + schedule.between_ms;
    let teleop_end = between_end + schedule.teleop_ms();

    if elapsed < auto_end {
        return MatchClockState {
            phase: Phase::Auto,
            sub_phase: None,
            phase_elapsed_ms: elapsed,
            phase_remaining_ms: auto_end - elapsed,
        };
    }
    if elapsed < between_end {
        return MatchClockState {
            phase: Phase::Between,
            sub_phase: None,
            phase_elapsed_ms: elapsed - auto_end,
            phase_remaining_ms: between_end - elapsed,
        };
    }
    if elapsed < teleop_end {
        let teleop_elapsed = elapsed - between_end;
        return MatchClockState {
            phase: Phase::Teleop,
            sub_phase: Some(schedule.sub_phase_at(teleop_elapsed)),
            phase_elapsed_ms: teleop_elapsed,
            phase_remaining_ms: teleop_end - elapsed,
        };
    }
    MatchClockState {
        phase: Phase::Post,
        sub_phase: None,
        phase_elapsed_ms: elapsed - teleop_end,
        phase_remaining_ms: 0,
    }
}
