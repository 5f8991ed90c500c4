//! Game state representation.
//!
//! Holds one turn's snapshot of a Lux match: the map, both players' units
//! and cities, and research progress. The engine resends the full state
//! every turn, so a snapshot is rebuilt from scratch rather than patched.

use super::city::{City, CityTile};
use super::map::{GameMap, ResourceKind};
use super::position::Position;
use super::unit::Unit;

/// Research points needed before coal can be mined.
pub const COAL_RESEARCH_POINTS: i32 = 50;

/// Research points needed before uranium can be mined.
pub const URANIUM_RESEARCH_POINTS: i32 = 200;

/// Number of teams in a match.
pub const TEAM_COUNT: usize = 2;

/// Everything one team owns.
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    pub team: u8,
    pub research_points: i32,
    pub units: Vec<Unit>,
    /// Cities in the order the engine reported them.
    pub cities: Vec<City>,
}

impl Player {
    pub fn new(team: u8) -> Self {
        Player {
            team,
            research_points: 0,
            units: Vec::new(),
            cities: Vec::new(),
        }
    }

    pub fn researched_coal(&self) -> bool {
        self.research_points >= COAL_RESEARCH_POINTS
    }

    pub fn researched_uranium(&self) -> bool {
        self.research_points >= URANIUM_RESEARCH_POINTS
    }

    /// True when this player may currently harvest `kind`.
    pub fn can_harvest(&self, kind: ResourceKind) -> bool {
        match kind {
            ResourceKind::Wood => true,
            ResourceKind::Coal => self.researched_coal(),
            ResourceKind::Uranium => self.researched_uranium(),
        }
    }

    pub fn city(&self, id: &str) -> Option<&City> {
        self.cities.iter().find(|c| c.id == id)
    }

    /// All citytiles across every city, city by city.
    pub fn citytiles(&self) -> impl Iterator<Item = &CityTile> {
        self.cities.iter().flat_map(|c| c.citytiles.iter())
    }

    pub fn citytile_count(&self) -> usize {
        self.cities.iter().map(|c| c.citytiles.len()).sum()
    }

    pub fn workers(&self) -> impl Iterator<Item = &Unit> {
        self.units.iter().filter(|u| u.is_worker())
    }
}

/// Complete snapshot of a match at one turn.
#[derive(Debug, Clone, PartialEq)]
pub struct Game {
    pub turn: u32,
    /// The team this agent plays.
    pub player_id: u8,
    pub map: GameMap,
    pub players: [Player; TEAM_COUNT],
}

impl Game {
    /// Creates an empty snapshot on a blank map.
    pub fn new(width: i32, height: i32, player_id: u8, turn: u32) -> Self {
        Game {
            turn,
            player_id,
            map: GameMap::new(width, height),
            players: [Player::new(0), Player::new(1)],
        }
    }

    /// The acting player.
    pub fn player(&self) -> &Player {
        &self.players[self.player_id as usize % TEAM_COUNT]
    }

    pub fn opponent(&self) -> &Player {
        &self.players[(self.player_id as usize + 1) % TEAM_COUNT]
    }

    fn team_mut(&mut self, team: u8) -> Option<&mut Player> {
        self.players.get_mut(team as usize)
    }

    /// Sets a team's research points. Returns false for an unknown team.
    pub fn set_research_points(&mut self, team: u8, points: i32) -> bool {
        match self.team_mut(team) {
            Some(p) => {
                p.research_points = points;
                true
            }
            None => false,
        }
    }

    /// Adds a unit to its team. Returns false for an unknown team or a
    /// position off the map.
    pub fn add_unit(&mut self, unit: Unit) -> bool {
        if !self.map.in_bounds(unit.pos.x, unit.pos.y) {
            return false;
        }
        match self.team_mut(unit.team) {
            Some(p) => {
                p.units.push(unit);
                true
            }
            None => false,
        }
    }

    /// Registers a city with no tiles yet. Returns false for an unknown team.
    pub fn add_city(&mut self, team: u8, id: &str, fuel: f64, light_upkeep: f64) -> bool {
        match self.team_mut(team) {
            Some(p) => {
                p.cities.push(City {
                    id: id.to_string(),
                    team,
                    fuel,
                    light_upkeep,
                    citytiles: Vec::new(),
                });
                true
            }
            None => false,
        }
    }

    /// Attaches a citytile to an already registered city and marks its cell.
    ///
    /// Returns false when the team or city is unknown or the tile is off
    /// the map.
    pub fn add_citytile(&mut self, team: u8, city_id: &str, pos: Position, cooldown: f64) -> bool {
        if !self.map.in_bounds(pos.x, pos.y) {
            return false;
        }
        let Some(player) = self.team_mut(team) else {
            return false;
        };
        let Some(city) = player.cities.iter_mut().find(|c| c.id == city_id) else {
            return false;
        };
        city.citytiles.push(CityTile {
            city_id: city_id.to_string(),
            team,
            pos,
            cooldown,
        });
        self.map.set_citytile(pos, team, city_id)
    }
}
