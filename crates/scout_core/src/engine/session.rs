//! Match-entry session.
//!
//! Composition root for one scouted match: owns the anchor timestamp, the
//! staged start position, the action log, the transition detector, the drag
//! accumulator and the shot cycle. Everything runs on one thread; discrete
//! event handlers and the frame step never interleave, so ordering is call
//! order and no locking exists.
//!
//! Callers must pass non-decreasing `now_ms` values across discrete events;
//! that is what makes the exported log non-decreasing in timestamp.

use crate::engine::accumulator::ScoreDrag;
use crate::engine::clock::{derive_clock, MatchClockState, Phase, PhaseSchedule};
use crate::engine::coordinates::{layout_flip, storage_flip, to_canonical};
use crate::engine::shot_cycle::ShotCycle;
use crate::engine::transition::TransitionDetector;
use crate::engine::zones::{zone_at, Zone};
use crate::error::{CoreError, Result};
use crate::models::actions::{Action, ActionBase, ActionKind, ActionLog, ClimbLevel};
use crate::models::position::FieldPos;
use crate::settings::SettingsProvider;
use crate::sync::{SessionSnapshot, SnapshotSink};

/// One observed clock tick: the derived state plus transition side-effects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClockTick {
    pub clock: MatchClockState,
    /// A phase or sub-phase boundary was crossed on this tick.
    pub transitioned: bool,
    /// The transition flash is currently visible.
    pub flashing: bool,
}

/// Single-field action kinds recorded by plain button taps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SimpleAction {
    Passing,
    Defense,
    Traversal,
    Idle,
    Intake,
    Shooting,
}

pub struct MatchEntrySession<S: SnapshotSink> {
    schedule: PhaseSchedule,
    sink: S,
    /// Wall-clock anchor of match start; 0 = not started.
    anchor_ms: u64,
    staged_start: Option<FieldPos>,
    log: ActionLog,
    detector: TransitionDetector,
    drag: ScoreDrag,
    shot: ShotCycle,
    live_score: i32,
    climb_success: bool,
    storage_flip: bool,
    layout_flip: bool,
    last_synced: Option<SessionSnapshot>,
}

impl<S: SnapshotSink> MatchEntrySession<S> {
    pub fn new(schedule: PhaseSchedule, settings: &dyn SettingsProvider, sink: S) -> Self {
        let orientation = settings.field_orientation();
        let alliance = settings.device_type().alliance();
        Self {
            schedule,
            sink,
            anchor_ms: 0,
            staged_start: None,
            log: ActionLog::new(),
            detector: TransitionDetector::new(),
            drag: ScoreDrag::new(),
            shot: ShotCycle::new(),
            live_score: 0,
            climb_success: false,
            storage_flip: storage_flip(orientation),
            layout_flip: layout_flip(orientation, alliance),
            last_synced: None,
        }
    }

    pub fn started(&self) -> bool {
        self.anchor_ms != 0
    }

    pub fn live_score(&self) -> i32 {
        self.live_score
    }

    pub fn climb_success(&self) -> bool {
        self.climb_success
    }

    pub fn log(&self) -> &ActionLog {
        &self.log
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Current full `{start_position, actions}` tuple.
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            start_position: self.staged_start,
            actions: self.log.entries().to_vec(),
        }
    }

    // ----- clock -----

    /// Pure re-derivation; safe at any refresh cadence.
    pub fn clock(&self, now_ms: u64) -> MatchClockState {
        derive_clock(&self.schedule, self.anchor_ms, now_ms)
    }

    /// Display-refresh tick: derive the clock and run transition detection.
    pub fn tick(&mut self, now_ms: u64) -> ClockTick {
        let clock = self.clock(now_ms);
        let transitioned = self.detector.observe(&clock, now_ms);
        ClockTick { clock, transitioned, flashing: self.detector.is_flashing(now_ms) }
    }

    fn elapsed_ms(&self, now_ms: u64) -> u64 {
        if self.anchor_ms == 0 || now_ms < self.anchor_ms {
            0
        } else {
            now_ms - self.anchor_ms
        }
    }

    fn base_at(&self, now_ms: u64) -> ActionBase {
        let clock = self.clock(now_ms);
        ActionBase {
            timestamp_ms: self.elapsed_ms(now_ms),
            phase: clock.phase,
            sub_phase: clock.sub_phase.map(|s| s.kind),
        }
    }

    // ----- match start -----

    /// Stage the pre-match start position from a screen tap.
    pub fn stage_start_position(&mut self, screen: FieldPos) {
        self.staged_start = Some(to_canonical(screen.clamped(), self.storage_flip));
        self.sync();
    }

    pub fn staged_start(&self) -> Option<FieldPos> {
        self.staged_start
    }

    /// One-time transition: anchor the clock and seed the log with a single
    /// `starting` action from the staged position, if any.
    pub fn start_match(&mut self, now_ms: u64) -> Result<()> {
        if self.started() {
            return Err(CoreError::MatchAlreadyStarted);
        }
        self.anchor_ms = now_ms;
        if let Some(pos) = self.staged_start {
            self.log.append(Action::Starting { x: pos.x, y: pos.y });
        }
        tracing::debug!(anchor_ms = now_ms, "match started");
        self.sync();
        Ok(())
    }

    // ----- zones -----

    /// Hit-test a screen tap against the zone layout and enter the zone.
    /// Returns the zone, or None when the tap landed outside every zone.
    pub fn enter_zone_at(&mut self, screen: FieldPos, now_ms: u64) -> Option<Zone> {
        let zone = zone_at(screen, self.layout_flip)?;
        let canonical = to_canonical(screen, self.storage_flip);
        self.enter_zone(zone, canonical, now_ms);
        Some(zone)
    }

    /// Enter a zone at a canonical position.
    ///
    /// Entering `climb` during auto atomically appends the `zone_change`
    /// and a `climb(L1, current_success_flag)`; this auto-record rule never
    /// fires in teleop. A non-shooting tap with a fresh nonzero accumulated
    /// score commits it as a `score` action and opens the edit window.
    pub fn enter_zone(&mut self, zone: Zone, pos: FieldPos, now_ms: u64) {
        let base = self.base_at(now_ms);

        if zone == Zone::Shooting {
            if self.shot.shooting_zone_entered() {
                // fresh shot cycle
                self.live_score = 0;
                self.drag.release();
            }
        } else if self.live_score != 0 && !self.shot.is_editable() {
            self.log.append(Action::Score {
                base,
                x: pos.x,
                y: pos.y,
                score: self.live_score,
            });
            self.shot.committed();
        }

        self.log.append(Action::ZoneChange { base, zone });
        if zone == Zone::Climb && base.phase == Phase::Auto {
            self.log.append(Action::Climb {
                base,
                level: ClimbLevel::L1,
                success: self.climb_success,
            });
        }
        self.sync();
    }

    // ----- score gesture -----

    /// Pointer down on the score drag. The instant tick (if any) is applied
    /// immediately for feedback before the hold threshold engages.
    pub fn gesture_down(&mut self, value: f32, now_ms: u64) {
        let ticks = self.drag.pointer_down(value, now_ms);
        self.apply_ticks(ticks);
    }

    /// Pointer move: synchronous side-channel update, no log writes.
    pub fn gesture_move(&mut self, value: f32) {
        self.drag.pointer_move(value);
    }

    /// Animation-frame step; only path that converts held drag time into
    /// score ticks.
    pub fn gesture_frame(&mut self, now_ms: u64, frame_dt_ms: f64) {
        let ticks = self.drag.frame(now_ms, frame_dt_ms);
        self.apply_ticks(ticks);
    }

    /// Pointer up / leave / teardown.
    pub fn gesture_up(&mut self) {
        self.drag.release();
    }

    pub fn drag(&self) -> &ScoreDrag {
        &self.drag
    }

    /// Set the live score directly (slider edit). Clamped at zero.
    pub fn set_live_score(&mut self, score: i32) {
        self.update_live_score(score.max(0));
    }

    fn apply_ticks(&mut self, ticks: i64) {
        if ticks == 0 {
            return;
        }
        // under-floor ticks are dropped silently at the clamp boundary
        let next = (i64::from(self.live_score) + ticks).max(0) as i32;
        self.update_live_score(next);
    }

    fn update_live_score(&mut self, next: i32) {
        if next == self.live_score {
            return;
        }
        self.live_score = next;
        if self.shot.is_editable() {
            let score = self.live_score;
            let amended = self.log.amend_last_of_kind(ActionKind::Score, |a| {
                if let Action::Score { score: s, .. } = a {
                    *s = score;
                }
            });
            if amended {
                self.sync();
            }
        }
    }

    pub fn shot_editable(&self) -> bool {
        self.shot.is_editable()
    }

    // ----- climb -----

    /// Select a climb rung. Replaces the most recent climb action if one
    /// exists (the user is still in the climb zone), otherwise records a
    /// new one.
    pub fn select_climb_level(&mut self, level: ClimbLevel, now_ms: u64) {
        let success = self.climb_success;
        let amended = self.log.amend_last_of_kind(ActionKind::Climb, |a| {
            if let Action::Climb { level: l, success: s, .. } = a {
                *l = level;
                *s = success;
            }
        });
        if !amended {
            let base = self.base_at(now_ms);
            self.log.append(Action::Climb { base, level, success });
        }
        self.sync();
    }

    /// Toggle the only recorded level off: deletes the most recent climb.
    pub fn deselect_climb(&mut self) {
        if self.log.remove_last_of_kind(ActionKind::Climb).is_some() {
            self.sync();
        }
    }

    /// Flip the success flag; also patches the most recent climb action.
    pub fn set_climb_success(&mut self, success: bool) {
        self.climb_success = success;
        let amended = self.log.amend_last_of_kind(ActionKind::Climb, |a| {
            if let Action::Climb { success: s, .. } = a {
                *s = success;
            }
        });
        if amended {
            self.sync();
        }
    }

    // ----- simple actions -----

    pub fn record_simple(&mut self, kind: SimpleAction, now_ms: u64) {
        let base = self.base_at(now_ms);
        let action = match kind {
            SimpleAction::Passing => Action::Passing { base },
            SimpleAction::Defense => Action::Defense { base },
            SimpleAction::Traversal => Action::Traversal { base },
            SimpleAction::Idle => Action::Idle { base },
            SimpleAction::Intake => Action::Intake { base },
            SimpleAction::Shooting => Action::Shooting { base },
        };
        self.log.append(action);
        self.sync();
    }

    // ----- persistence sync -----

    /// Push the snapshot to the collaborator, skipped entirely when a
    /// value-equality check shows no change since the last push.
    fn sync(&mut self) {
        let snapshot = self.snapshot();
        if self.last_synced.as_ref() == Some(&snapshot) {
            return;
        }
        self.sink.put(&snapshot);
        self.last_synced = Some(snapshot);
    }
}
