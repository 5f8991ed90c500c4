//! Board representation and game-state types.
//!
//! A read-only model of one turn of a Lux match: positions, map cells,
//! resources, units, cities and players.

pub mod city;
pub mod map;
pub mod position;
pub mod state;
pub mod unit;

pub use city::{City, CityTile};
pub use map::{Cell, CellCityTile, GameMap, Resource, ResourceKind, MAX_MAP_SIZE};
pub use position::{Direction, Position, CARDINALS};
pub use state::{Game, Player, COAL_RESEARCH_POINTS, TEAM_COUNT, URANIUM_RESEARCH_POINTS};
pub use unit::{Cargo, Unit, UnitKind, CART_CAPACITY, WORKER_CAPACITY};
