use serde::{Deserialize, Serialize};

use crate::engine::clock::{default_schedule, derive_clock, MatchClockState, PhaseSchedule};
use crate::engine::session::{MatchEntrySession, SimpleAction};
use crate::error::{CoreError, Result};
use crate::models::actions::ClimbLevel;
use crate::models::position::FieldPos;
use crate::settings::StaticSettings;
use crate::sync::{MemorySink, SessionSnapshot};
use crate::SCHEMA_VERSION;

/// One scripted input event at an absolute wall-clock time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScriptStep {
    pub at_ms: u64,
    #[serde(flatten)]
    pub event: ScriptEvent,
}

/// Replayable user input. Positions are screen coordinates; the session
/// applies the configured flips exactly as it does for live input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ScriptEvent {
    StageStart { x: f32, y: f32 },
    StartMatch,
    EnterZone { x: f32, y: f32 },
    GestureDown { value: f32 },
    GestureMove { value: f32 },
    GestureFrame { dt_ms: f64 },
    GestureUp,
    SetLiveScore { score: i32 },
    SelectClimbLevel { level: ClimbLevel },
    DeselectClimb,
    SetClimbSuccess { success: bool },
    Record { action: SimpleAction },
}

#[derive(Debug, Deserialize)]
struct ReplayRequest {
    schema_version: u8,
    #[serde(default)]
    settings: StaticSettings,
    script: Vec<ScriptStep>,
}

#[derive(Debug, Serialize)]
struct ReplayResponse {
    schema_version: u8,
    clock: MatchClockState,
    snapshot: SessionSnapshot,
}

/// Replay a recorded input script through a fresh session and return the
/// final snapshot plus the clock at the last step.
pub fn replay_script_json(input: &str) -> Result<String> {
    let request: ReplayRequest = serde_json::from_str(input)?;
    if request.schema_version != SCHEMA_VERSION {
        return Err(CoreError::InvalidScript(format!(
            "unsupported schema_version {}",
            request.schema_version
        )));
    }

    let mut session = MatchEntrySession::new(
        PhaseSchedule::default(),
        &request.settings,
        MemorySink::new(),
    );

    let mut last_at = 0u64;
    for step in &request.script {
        if step.at_ms < last_at {
            return Err(CoreError::InvalidScript(format!(
                "script steps must be time-ordered: {} after {}",
                step.at_ms, last_at
            )));
        }
        last_at = step.at_ms;

        match step.event {
            ScriptEvent::StageStart { x, y } => {
                session.stage_start_position(FieldPos::new(x, y));
            }
            ScriptEvent::StartMatch => session.start_match(step.at_ms)?,
            ScriptEvent::EnterZone { x, y } => {
                // taps outside every zone are ignored, matching live input
                let _ = session.enter_zone_at(FieldPos::new(x, y), step.at_ms);
            }
            ScriptEvent::GestureDown { value } => session.gesture_down(value, step.at_ms),
            ScriptEvent::GestureMove { value } => session.gesture_move(value),
            ScriptEvent::GestureFrame { dt_ms } => session.gesture_frame(step.at_ms, dt_ms),
            ScriptEvent::GestureUp => session.gesture_up(),
            ScriptEvent::SetLiveScore { score } => session.set_live_score(score),
            ScriptEvent::SelectClimbLevel { level } => {
                session.select_climb_level(level, step.at_ms)
            }
            ScriptEvent::DeselectClimb => session.deselect_climb(),
            ScriptEvent::SetClimbSuccess { success } => session.set_climb_success(success),
            ScriptEvent::Record { action } => session.record_simple(action, step.at_ms),
        }
    }

    let response = ReplayResponse {
        schema_version: SCHEMA_VERSION,
        clock: session.clock(last_at),
        snapshot: session.snapshot(),
    };
    Ok(serde_json::to_string(&response)?)
}

#[derive(Debug, Deserialize)]
struct ClockRequest {
    schema_version: u8,
    anchor_ms: u64,
    now_ms: u64,
}

#[derive(Debug, Serialize)]
struct ClockResponse {
    schema_version: u8,
    clock: MatchClockState,
}

/// Derive the clock state for an anchor/now pair against the default
/// schedule.
pub fn derive_clock_json(input: &str) -> Result<String> {
    let request: ClockRequest = serde_json::from_str(input)?;
    if request.schema_version != SCHEMA_VERSION {
        return Err(CoreError::InvalidScript(format!(
            "unsupported schema_version {}",
            request.schema_version
        )));
    }
    let clock = derive_clock(default_schedule(), request.anchor_ms, request.now_ms);
    Ok(serde_json::to_string(&ClockResponse { schema_version: SCHEMA_VERSION, clock })?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_replay_rejects_unknown_schema() {
        let input = json!({"schema_version": 9, "script": []}).to_string();
        assert!(replay_script_json(&input).is_err());
    }

    #[test]
    fn test_replay_rejects_disordered_script() {
        let input = json!({
            "schema_version": 1,
            "script": [
                {"at_ms": 5000, "event": "start_match"},
                {"at_ms": 4000, "event": "gesture_up"}
            ]
        })
        .to_string();
        assert!(replay_script_json(&input).is_err());
    }

    #[test]
    fn test_replay_minimal_script() {
        let input = json!({
            "schema_version": 1,
            "script": [
                {"at_ms": 0, "event": "stage_start", "x": 0.23, "y": 0.5},
                {"at_ms": 1000, "event": "start_match"}
            ]
        })
        .to_string();
        let output = replay_script_json(&input).expect("replay");
        let parsed: serde_json::Value = serde_json::from_str(&output).expect("json");

        assert_eq!(parsed["schema_version"], 1);
        assert_eq!(parsed["clock"]["phase"], "auto");
        let actions = parsed["snapshot"]["actions"].as_array().expect("actions");
        assert_eq!(actions.len(), 1);
        assert_eq!(actions[0]["type"], "starting");
        assert!((actions[0]["x"].as_f64().expect("x") - 0.23).abs() < 1e-6);
    }

    #[test]
    fn test_clock_json() {
        let input = json!({"schema_version": 1, "anchor_ms": 1000, "now_ms": 61000}).to_string();
        let output = derive_clock_json(&input).expect("clock");
        let parsed: serde_json::Value = serde_json::from_str(&output).expect("json");
        assert_eq!(parsed["clock"]["phase"], "teleop");
        assert_eq!(parsed["clock"]["sub_phase"]["kind"], "shift_2");
    }
}
