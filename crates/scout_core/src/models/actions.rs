//! Match actions and the append-only action log.
//!
//! The log is append-only except for two sanctioned in-place mutations:
//! amending the score of the most recent `score` action while its edit
//! window is open, and replacing the level/success of the most recent
//! `climb` while the user remains in the climb zone (which may also be
//! deleted entirely on full deselect). "Most recent of kind" is always an
//! explicit backward scan so earlier history is never touched.

use serde::{Deserialize, Serialize};

use crate::engine::clock::{Phase, SubPhase};
use crate::engine::zones::Zone;

/// Climb rung.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClimbLevel {
    L1,
    L2,
    L3,
}

/// Shared per-action metadata captured at write time.
///
/// `timestamp_ms` is elapsed-match-time (0 if the match has not started).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionBase {
    pub timestamp_ms: u64,
    pub phase: Phase,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub sub_phase: Option<SubPhase>,
}

/// One recorded in-match event.
///
/// `starting` carries no timestamp: it is written once at match start and,
/// if present, is always first in the log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Action {
    Starting { x: f32, y: f32 },
    Score { base: ActionBase, x: f32, y: f32, score: i32 },
    Climb { base: ActionBase, level: ClimbLevel, success: bool },
    ZoneChange { base: ActionBase, zone: Zone },
    Passing { base: ActionBase },
    Defense { base: ActionBase },
    Traversal { base: ActionBase },
    Idle { base: ActionBase },
    Intake { base: ActionBase },
    Shooting { base: ActionBase },
}

/// Discriminant used by the tail-scanning log operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionKind {
    Starting,
    Score,
    Climb,
    ZoneChange,
    Passing,
    Defense,
    Traversal,
    Idle,
    Intake,
    Shooting,
}

impl ActionKind {
    pub fn name(&self) -> &'static str {
        match self {
            ActionKind::Starting => "starting",
            ActionKind::Score => "score",
            ActionKind::Climb => "climb",
            ActionKind::ZoneChange => "zone_change",
            ActionKind::Passing => "passing",
            ActionKind::Defense => "defense",
            ActionKind::Traversal => "traversal",
            ActionKind::Idle => "idle",
            ActionKind::Intake => "intake",
            ActionKind::Shooting => "shooting",
        }
    }
}

impl Action {
    pub fn kind(&self) -> ActionKind {
        match self {
            Action::Starting { .. } => ActionKind::Starting,
            Action::Score { .. } => ActionKind::Score,
            Action::Climb { .. } => ActionKind::Climb,
            Action::ZoneChange { .. } => ActionKind::ZoneChange,
            Action::Passing { .. } => ActionKind::Passing,
            Action::Defense { .. } => ActionKind::Defense,
            Action::Traversal { .. } => ActionKind::Traversal,
            Action::Idle { .. } => ActionKind::Idle,
            Action::Intake { .. } => ActionKind::Intake,
            Action::Shooting { .. } => ActionKind::Shooting,
        }
    }

    pub fn base(&self) -> Option<&ActionBase> {
        match self {
            Action::Starting { .. } => None,
            Action::Score { base, .. }
            | Action::Climb { base, .. }
            | Action::ZoneChange { base, .. }
            | Action::Passing { base }
            | Action::Defense { base }
            | Action::Traversal { base }
            | Action::Idle { base }
            | Action::Intake { base }
            | Action::Shooting { base } => Some(base),
        }
    }

    /// Elapsed-match-time of the action; `starting` is definitionally at 0.
    pub fn timestamp_ms(&self) -> u64 {
        self.base().map_or(0, |b| b.timestamp_ms)
    }
}

/// Append-only, time-ordered action record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActionLog {
    entries: Vec<Action>,
}

impl ActionLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, action: Action) {
        self.entries.push(action);
    }

    /// Patch the most recently appended action of `kind`, located by a
    /// backward scan from the tail. No-op (returns false) when absent.
    pub fn amend_last_of_kind<F>(&mut self, kind: ActionKind, patch: F) -> bool
    where
        F: FnOnce(&mut Action),
    {
        match self.entries.iter().rposition(|a| a.kind() == kind) {
            Some(idx) => {
                patch(&mut self.entries[idx]);
                true
            }
            None => false,
        }
    }

    /// Splice out the most recently appended action of `kind`. No-op when
    /// absent.
    pub fn remove_last_of_kind(&mut self, kind: ActionKind) -> Option<Action> {
        self.entries
            .iter()
            .rposition(|a| a.kind() == kind)
            .map(|idx| self.entries.remove(idx))
    }

    pub fn last_of_kind(&self, kind: ActionKind) -> Option<&Action> {
        self.entries.iter().rev().find(|a| a.kind() == kind)
    }

    pub fn entries(&self) -> &[Action] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn has_starting(&self) -> bool {
        self.entries.iter().any(|a| matches!(a, Action::Starting { .. }))
    }

    /// Timestamps are non-decreasing for every action except a single
    /// leading `starting` entry.
    pub fn is_time_ordered(&self) -> bool {
        let mut last = 0u64;
        for (idx, action) in self.entries.iter().enumerate() {
            match action {
                Action::Starting { .. } => {
                    if idx != 0 {
                        return false;
                    }
                }
                _ => {
                    let ts = action.timestamp_ms();
                    if ts < last {
                        return false;
                    }
                    last = ts;
                }
            }
        }
        true
    }
}
