//! Cities and the citytiles they are made of.

use super::position::Position;

/// A single citytile.
#[derive(Debug, Clone, PartialEq)]
pub struct CityTile {
    pub city_id: String,
    pub team: u8,
    pub pos: Position,
    pub cooldown: f64,
}

impl CityTile {
    pub fn can_act(&self) -> bool {
        self.cooldown < 1.0
    }
}

/// A city: a connected group of citytiles sharing one fuel pool.
#[derive(Debug, Clone, PartialEq)]
pub struct City {
    pub id: String,
    pub team: u8,
    pub fuel: f64,
    pub light_upkeep: f64,
    pub citytiles: Vec<CityTile>,
}

impl City {
    /// Average fuel per citytile, or `None` for a city with no tiles.
    pub fn fuel_per_tile(&self) -> Option<f64> {
        if self.citytiles.is_empty() {
            None
        } else {
            Some(self.fuel / self.citytiles.len() as f64)
        }
    }
}
