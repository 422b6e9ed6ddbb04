//! JSON API surface.
//!
//! String-in/string-out entry points for hosts that drive the core without
//! linking against its types (tooling, the replay CLI). Deterministic: the
//! same input always produces the same output.

mod json_api;

pub use json_api::{derive_clock_json, replay_script_json, ScriptEvent, ScriptStep};
