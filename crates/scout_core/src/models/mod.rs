//! Data model: recorded actions and field positions.

pub mod actions;
pub mod position;

pub use actions::{Action, ActionBase, ActionKind, ActionLog, ClimbLevel};
pub use position::FieldPos;
