//! Snapshot sink boundary.
//!
//! The session pushes the full `{start_position, actions}` tuple to the
//! surrounding persistence collaborator whenever either changes, diffed by
//! value equality. The sync is one-way: the core never reads the sink back.

use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::models::actions::Action;
use crate::models::position::FieldPos;

/// Everything the persistence collaborator receives.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub start_position: Option<FieldPos>,
    pub actions: Vec<Action>,
}

pub trait SnapshotSink {
    fn put(&mut self, snapshot: &SessionSnapshot);
}

/// Collects every push; used by tests and the replay API.
#[derive(Debug, Default)]
pub struct MemorySink {
    pub pushes: Vec<SessionSnapshot>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn latest(&self) -> Option<&SessionSnapshot> {
        self.pushes.last()
    }
}

impl SnapshotSink for MemorySink {
    fn put(&mut self, snapshot: &SessionSnapshot) {
        self.pushes.push(snapshot.clone());
    }
}

/// Writes each snapshot as JSON to a fixed path.
///
/// Write failures are logged and swallowed: the gesture path must never
/// block or fail on persistence, and the next value change retries anyway.
#[derive(Debug)]
pub struct JsonFileSink {
    path: PathBuf,
}

impl JsonFileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

impl SnapshotSink for JsonFileSink {
    fn put(&mut self, snapshot: &SessionSnapshot) {
        let json = match serde_json::to_string(snapshot) {
            Ok(json) => json,
            Err(error) => {
                tracing::warn!(%error, "snapshot serialization failed");
                return;
            }
        };
        if let Err(error) = fs::write(&self.path, json) {
            tracing::warn!(%error, path = %self.path.display(), "snapshot write failed");
        }
    }
}
