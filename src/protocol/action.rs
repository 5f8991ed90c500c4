//! Action encoding and decoding.
//!
//! Actions are the short command strings the engine accepts back each turn:
//! `m u_1 n`, `bcity u_1`, `bw 3 4`, `bc 3 4`, `r 3 4`, `p u_1`.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::game::{Direction, Position};

/// Errors that can occur when parsing an action string.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ActionError {
    #[error("empty input")]
    EmptyInput,

    #[error("unknown action '{0}'")]
    UnknownAction(String),

    #[error("'{tag}' expects {expected} arguments, got {found}")]
    WrongArgCount {
        tag: String,
        expected: usize,
        found: usize,
    },

    #[error("invalid direction '{0}'")]
    InvalidDirection(String),

    #[error("invalid coordinate '{0}'")]
    InvalidCoordinate(String),
}

/// A unit or citytile action for one turn.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Action {
    /// Move a unit one cell: `m <unit> <dir>`
    Move { unit_id: String, dir: Direction },

    /// Found a city on the unit's cell: `bcity <unit>`
    BuildCity { unit_id: String },

    /// Spawn a worker from a citytile: `bw <x> <y>`
    BuildWorker { pos: Position },

    /// Spawn a cart from a citytile: `bc <x> <y>`
    BuildCart { pos: Position },

    /// Spend a citytile's turn on research: `r <x> <y>`
    Research { pos: Position },

    /// Reduce the road level under a unit: `p <unit>`
    Pillage { unit_id: String },
}

impl Action {
    /// The unit this action belongs to, if it is a unit action.
    pub fn unit_id(&self) -> Option<&str> {
        match self {
            Action::Move { unit_id, .. }
            | Action::BuildCity { unit_id }
            | Action::Pillage { unit_id } => Some(unit_id),
            _ => None,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Move { unit_id, dir } => write!(f, "m {} {}", unit_id, dir.as_char()),
            Action::BuildCity { unit_id } => write!(f, "bcity {}", unit_id),
            Action::BuildWorker { pos } => write!(f, "bw {} {}", pos.x, pos.y),
            Action::BuildCart { pos } => write!(f, "bc {} {}", pos.x, pos.y),
            Action::Research { pos } => write!(f, "r {} {}", pos.x, pos.y),
            Action::Pillage { unit_id } => write!(f, "p {}", unit_id),
        }
    }
}

fn expect_args(tokens: &[&str], expected: usize) -> Result<(), ActionError> {
    if tokens.len() != expected + 1 {
        return Err(ActionError::WrongArgCount {
            tag: tokens[0].to_string(),
            expected,
            found: tokens.len() - 1,
        });
    }
    Ok(())
}

fn parse_pos(x: &str, y: &str) -> Result<Position, ActionError> {
    let px = x
        .parse::<i32>()
        .map_err(|_| ActionError::InvalidCoordinate(x.to_string()))?;
    let py = y
        .parse::<i32>()
        .map_err(|_| ActionError::InvalidCoordinate(y.to_string()))?;
    Ok(Position::new(px, py))
}

impl FromStr for Action {
    type Err = ActionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tokens: Vec<&str> = s.split_whitespace().collect();
        if tokens.is_empty() {
            return Err(ActionError::EmptyInput);
        }

        match tokens[0] {
            "m" => {
                expect_args(&tokens, 2)?;
                let mut chars = tokens[2].chars();
                let dir = match (chars.next(), chars.next()) {
                    (Some(c), None) => Direction::from_char(c),
                    _ => None,
                }
                .ok_or_else(|| ActionError::InvalidDirection(tokens[2].to_string()))?;
                Ok(Action::Move {
                    unit_id: tokens[1].to_string(),
                    dir,
                })
            }
            "bcity" => {
                expect_args(&tokens, 1)?;
                Ok(Action::BuildCity {
                    unit_id: tokens[1].to_string(),
                })
            }
            "p" => {
                expect_args(&tokens, 1)?;
                Ok(Action::Pillage {
                    unit_id: tokens[1].to_string(),
                })
            }
            "bw" => {
                expect_args(&tokens, 2)?;
                Ok(Action::BuildWorker {
                    pos: parse_pos(tokens[1], tokens[2])?,
                })
            }
            "bc" => {
                expect_args(&tokens, 2)?;
                Ok(Action::BuildCart {
                    pos: parse_pos(tokens[1], tokens[2])?,
                })
            }
            "r" => {
                expect_args(&tokens, 2)?;
                Ok(Action::Research {
                    pos: parse_pos(tokens[1], tokens[2])?,
                })
            }
            other => Err(ActionError::UnknownAction(other.to_string())),
        }
    }
}

/// Formats a turn's actions as the single comma-separated line the engine
/// reads back.
pub fn format_actions(actions: &[Action]) -> String {
    actions
        .iter()
        .map(|a| a.to_string())
        .collect::<Vec<_>>()
        .join(",")
}

/// Parses a comma-separated action line. An empty line is an empty turn.
pub fn parse_actions(s: &str) -> Result<Vec<Action>, ActionError> {
    if s.trim().is_empty() {
        return Ok(Vec::new());
    }
    s.split(',').map(|part| part.trim().parse()).collect()
}
