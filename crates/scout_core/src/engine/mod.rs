//! Match-entry engine: clock derivation, transition detection, coordinate
//! transforms, zones, the score-drag accumulator and the session that ties
//! them together.

pub mod accumulator;
pub mod clock;
pub mod coordinates;
pub mod session;
pub mod shot_cycle;
pub mod timing;
pub mod transition;
pub mod zones;

pub use accumulator::{DragState, ScoreDrag};
pub use clock::{
    default_schedule, derive_clock, MatchClockState, Phase, PhaseSchedule, SubPhase,
    SubPhaseSlot, SubPhaseState,
};
pub use session::{ClockTick, MatchEntrySession, SimpleAction};
pub use shot_cycle::ShotCycle;
pub use transition::TransitionDetector;
pub use zones::{zone_at, Zone};
