//! Lux kit protocol handling.
//!
//! Parsing of the engine's per-turn update lines, the observation envelope,
//! and encoding of the actions sent back.

pub mod action;
pub mod observation;
pub mod update;

pub use action::{format_actions, parse_actions, Action, ActionError};
pub use observation::Observation;
pub use update::{build_game, parse_map_size, parse_update, Update, UpdateError, DONE_MARKER};

/// Sent after the action line to close the agent's turn.
pub const FINISH_MARKER: &str = "D_FINISH";
