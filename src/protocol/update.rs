//! Update line parsing.
//!
//! Each turn the engine streams the whole visible state as one update per
//! line, terminated by `D_DONE`:
//!
//! - `rp <team> <points>` research points
//! - `r <kind> <x> <y> <amount>` resource deposit
//! - `u <kind> <team> <id> <x> <y> <cooldown> <wood> <coal> <uranium>` unit
//! - `c <team> <city_id> <fuel> <light_upkeep>` city
//! - `ct <team> <city_id> <x> <y> <cooldown>` citytile
//! - `ccd <x> <y> <level>` road level

use std::str::FromStr;

use thiserror::Error;
use tracing::warn;

use crate::game::{Cargo, Game, Position, ResourceKind, Unit, UnitKind, MAX_MAP_SIZE};

/// Marks the end of one turn's updates.
pub const DONE_MARKER: &str = "D_DONE";

/// Errors that can occur when parsing an update line.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum UpdateError {
    #[error("empty update line")]
    Empty,

    #[error("unknown update tag '{0}'")]
    UnknownTag(String),

    #[error("'{tag}' expects {expected} fields, got {found}")]
    WrongFieldCount {
        tag: String,
        expected: usize,
        found: usize,
    },

    #[error("invalid number '{0}'")]
    InvalidNumber(String),

    #[error("unknown resource kind '{0}'")]
    UnknownResource(String),

    #[error("unknown unit kind '{0}'")]
    UnknownUnitKind(String),

    #[error("invalid map size line '{0}'")]
    InvalidMapSize(String),
}

/// A single parsed update line.
#[derive(Debug, Clone, PartialEq)]
pub enum Update {
    ResearchPoints {
        team: u8,
        points: i32,
    },
    Resource {
        kind: ResourceKind,
        pos: Position,
        amount: i32,
    },
    Unit(Unit),
    City {
        team: u8,
        id: String,
        fuel: f64,
        light_upkeep: f64,
    },
    CityTile {
        team: u8,
        city_id: String,
        pos: Position,
        cooldown: f64,
    },
    Road {
        pos: Position,
        level: f64,
    },
    Done,
}

fn num<T: FromStr>(s: &str) -> Result<T, UpdateError> {
    s.parse::<T>()
        .map_err(|_| UpdateError::InvalidNumber(s.to_string()))
}

fn expect_fields(tokens: &[&str], expected: usize) -> Result<(), UpdateError> {
    if tokens.len() != expected {
        return Err(UpdateError::WrongFieldCount {
            tag: tokens[0].to_string(),
            expected: expected - 1,
            found: tokens.len() - 1,
        });
    }
    Ok(())
}

/// Parses one update line.
pub fn parse_update(line: &str) -> Result<Update, UpdateError> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    if tokens.is_empty() {
        return Err(UpdateError::Empty);
    }

    match tokens[0] {
        DONE_MARKER => Ok(Update::Done),
        "rp" => {
            expect_fields(&tokens, 3)?;
            Ok(Update::ResearchPoints {
                team: num(tokens[1])?,
                points: num(tokens[2])?,
            })
        }
        "r" => {
            expect_fields(&tokens, 5)?;
            let kind = ResourceKind::from_name(tokens[1])
                .ok_or_else(|| UpdateError::UnknownResource(tokens[1].to_string()))?;
            Ok(Update::Resource {
                kind,
                pos: Position::new(num(tokens[2])?, num(tokens[3])?),
                amount: num(tokens[4])?,
            })
        }
        "u" => {
            expect_fields(&tokens, 10)?;
            let code: u8 = num(tokens[1])?;
            let kind = UnitKind::from_code(code)
                .ok_or_else(|| UpdateError::UnknownUnitKind(tokens[1].to_string()))?;
            Ok(Update::Unit(Unit {
                id: tokens[3].to_string(),
                kind,
                team: num(tokens[2])?,
                pos: Position::new(num(tokens[4])?, num(tokens[5])?),
                cooldown: num(tokens[6])?,
                cargo: Cargo {
                    wood: num(tokens[7])?,
                    coal: num(tokens[8])?,
                    uranium: num(tokens[9])?,
                },
            }))
        }
        "c" => {
            expect_fields(&tokens, 5)?;
            Ok(Update::City {
                team: num(tokens[1])?,
                id: tokens[2].to_string(),
                fuel: num(tokens[3])?,
                light_upkeep: num(tokens[4])?,
            })
        }
        "ct" => {
            expect_fields(&tokens, 6)?;
            Ok(Update::CityTile {
                team: num(tokens[1])?,
                city_id: tokens[2].to_string(),
                pos: Position::new(num(tokens[3])?, num(tokens[4])?),
                cooldown: num(tokens[5])?,
            })
        }
        "ccd" => {
            expect_fields(&tokens, 4)?;
            Ok(Update::Road {
                pos: Position::new(num(tokens[1])?, num(tokens[2])?),
                level: num(tokens[3])?,
            })
        }
        other => Err(UpdateError::UnknownTag(other.to_string())),
    }
}

/// Parses the `width height` line sent once at the start of a match.
pub fn parse_map_size(line: &str) -> Result<(i32, i32), UpdateError> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    if tokens.len() != 2 {
        return Err(UpdateError::InvalidMapSize(line.to_string()));
    }
    let width: i32 = num(tokens[0])?;
    let height: i32 = num(tokens[1])?;
    if !(1..=MAX_MAP_SIZE).contains(&width) || !(1..=MAX_MAP_SIZE).contains(&height) {
        return Err(UpdateError::InvalidMapSize(line.to_string()));
    }
    Ok((width, height))
}

/// Builds a turn snapshot from that turn's update lines.
///
/// Lines that fail to parse, or that refer to unknown teams, cities or
/// off-map cells, are logged and skipped. Parsing stops at `D_DONE`.
pub fn build_game<S: AsRef<str>>(
    width: i32,
    height: i32,
    player_id: u8,
    turn: u32,
    lines: &[S],
) -> Game {
    let mut game = Game::new(width, height, player_id, turn);

    for line in lines {
        let line = line.as_ref();
        if line.trim().is_empty() {
            continue;
        }
        let update = match parse_update(line) {
            Ok(u) => u,
            Err(e) => {
                warn!(turn, line, error = %e, "skipping malformed update");
                continue;
            }
        };

        let applied = match update {
            Update::Done => break,
            Update::ResearchPoints { team, points } => game.set_research_points(team, points),
            Update::Resource { kind, pos, amount } => game.map.set_resource(pos, kind, amount),
            Update::Unit(unit) => game.add_unit(unit),
            Update::City {
                team,
                id,
                fuel,
                light_upkeep,
            } => game.add_city(team, &id, fuel, light_upkeep),
            Update::CityTile {
                team,
                city_id,
                pos,
                cooldown,
            } => game.add_citytile(team, &city_id, pos, cooldown),
            Update::Road { pos, level } => game.map.set_road(pos, level),
        };

        if !applied {
            warn!(turn, line, "update refers to unknown team, city or cell");
        }
    }

    game
}
