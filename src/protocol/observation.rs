//! The per-turn observation envelope.
//!
//! Mirrors what the competition harness hands an agent: the turn index, the
//! acting team and the raw update lines. On turn 0 the first two updates are
//! the player id and the `width height` line, followed by the usual state.

use serde::{Deserialize, Serialize};

use super::update::{parse_map_size, UpdateError};

/// Raw input for one turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Observation {
    pub step: u32,
    pub player: u8,
    #[serde(default)]
    pub updates: Vec<String>,
}

impl Observation {
    pub fn new(step: u32, player: u8, updates: Vec<String>) -> Self {
        Observation {
            step,
            player,
            updates,
        }
    }

    /// Splits a turn-0 observation into its map size and the state lines
    /// that follow the two header lines.
    pub fn split_header(&self) -> Result<((i32, i32), &[String]), UpdateError> {
        if self.updates.len() < 2 {
            return Err(UpdateError::InvalidMapSize(
                self.updates.first().cloned().unwrap_or_default(),
            ));
        }
        let size = parse_map_size(&self.updates[1])?;
        Ok((size, &self.updates[2..]))
    }
}
