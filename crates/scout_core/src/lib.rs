//! # scout_core - Match-Entry Core for the Scouting App
//!
//! This library provides the live match-phase clock and action-recording
//! state machine behind the match-scouting entry screen: a synchronized
//! phase/sub-phase timeline derived from a single wall-clock anchor,
//! transition side effects, coordinate transforms under alliance/orientation
//! flips, and a strictly ordered, timestamped action log fed by pointer
//! gestures.
//!
//! ## Features
//! - Pure clock derivation (same elapsed time = same state, replayable)
//! - Append-only action log with explicit tail-scanning amendments
//! - Frame-rate-independent continuous score accumulation
//! - JSON API for replaying recorded input scripts

pub mod api;
pub mod engine;
pub mod error;
pub mod models;
pub mod settings;
pub mod sync;

// Re-export the JSON API surface
pub use api::{derive_clock_json, replay_script_json, ScriptEvent, ScriptStep};

// Re-export engine types
pub use engine::{
    default_schedule, derive_clock, zone_at, ClockTick, DragState, MatchClockState,
    MatchEntrySession, Phase, PhaseSchedule, ScoreDrag, ShotCycle, SimpleAction, SubPhase,
    SubPhaseSlot, SubPhaseState, TransitionDetector, Zone,
};
pub use engine::coordinates::{
    layout_flip, mirror, mirror_rect, storage_flip, to_canonical, to_screen, ZoneRect,
};

// Re-export the data model
pub use error::{CoreError, Result};
pub use models::{Action, ActionBase, ActionKind, ActionLog, ClimbLevel, FieldPos};
pub use settings::{
    Alliance, DefaultSettings, DeviceType, FieldOrientation, SettingsProvider, StaticSettings,
};
pub use sync::{JsonFileSink, MemorySink, SessionSnapshot, SnapshotSink};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const SCHEMA_VERSION: u8 = 1;
