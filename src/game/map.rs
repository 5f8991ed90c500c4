//! Map cells and resources.
//!
//! The map is stored row-major in a flat vector. Lookups take signed
//! coordinates and return `None` off the board, so neighbor lookups near
//! the edges never panics.

use super::position::Position;

/// Largest map side the game generates.
pub const MAX_MAP_SIZE: i32 = 32;

/// The three harvestable resource kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Wood,
    Coal,
    Uranium,
}

impl ResourceKind {
    /// Returns the protocol name used in `r` update lines.
    pub const fn name(self) -> &'static str {
        match self {
            ResourceKind::Wood => "wood",
            ResourceKind::Coal => "coal",
            ResourceKind::Uranium => "uranium",
        }
    }

    /// Parses a resource kind from its protocol name.
    pub fn from_name(s: &str) -> Option<ResourceKind> {
        match s {
            "wood" => Some(ResourceKind::Wood),
            "coal" => Some(ResourceKind::Coal),
            "uranium" => Some(ResourceKind::Uranium),
            _ => None,
        }
    }
}

/// A resource deposit on a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resource {
    pub kind: ResourceKind,
    pub amount: i32,
}

/// Marks a cell as occupied by a citytile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellCityTile {
    pub team: u8,
    pub city_id: String,
}

/// A single map cell.
#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    pub pos: Position,
    pub resource: Option<Resource>,
    pub road: f64,
    pub citytile: Option<CellCityTile>,
}

impl Cell {
    fn empty(pos: Position) -> Self {
        Cell {
            pos,
            resource: None,
            road: 0.0,
            citytile: None,
        }
    }

    /// True when the cell still holds a positive amount of some resource.
    pub fn has_resource(&self) -> bool {
        matches!(self.resource, Some(r) if r.amount > 0)
    }

    /// True when nothing occupies the cell: no resource, road or citytile.
    pub fn is_empty(&self) -> bool {
        self.resource.is_none() && self.road == 0.0 && self.citytile.is_none()
    }
}

/// The game board.
#[derive(Debug, Clone, PartialEq)]
pub struct GameMap {
    pub width: i32,
    pub height: i32,
    cells: Vec<Cell>,
}

impl GameMap {
    /// Creates a map of empty cells. Sides are clamped to
    /// `0..=MAX_MAP_SIZE`.
    pub fn new(width: i32, height: i32) -> Self {
        let width = width.clamp(0, MAX_MAP_SIZE);
        let height = height.clamp(0, MAX_MAP_SIZE);
        let mut cells = Vec::with_capacity((width * height) as usize);
        for y in 0..height {
            for x in 0..width {
                cells.push(Cell::empty(Position::new(x, y)));
            }
        }
        GameMap {
            width,
            height,
            cells,
        }
    }

    /// True when `(x, y)` lies on the board.
    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && x < self.width && y < self.height
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if self.in_bounds(x, y) {
            Some((y * self.width + x) as usize)
        } else {
            None
        }
    }

    /// Returns the cell at `(x, y)`, or `None` off the board.
    pub fn cell(&self, x: i32, y: i32) -> Option<&Cell> {
        self.index(x, y).map(|i| &self.cells[i])
    }

    /// Returns the cell at `pos`, or `None` off the board.
    pub fn cell_at(&self, pos: Position) -> Option<&Cell> {
        self.cell(pos.x, pos.y)
    }

    fn cell_mut(&mut self, pos: Position) -> Option<&mut Cell> {
        match self.index(pos.x, pos.y) {
            Some(i) => self.cells.get_mut(i),
            None => None,
        }
    }

    /// Places a resource deposit. Returns false off the board.
    pub fn set_resource(&mut self, pos: Position, kind: ResourceKind, amount: i32) -> bool {
        match self.cell_mut(pos) {
            Some(cell) => {
                cell.resource = Some(Resource { kind, amount });
                true
            }
            None => false,
        }
    }

    /// Sets the road level of a cell. Returns false off the board.
    pub fn set_road(&mut self, pos: Position, level: f64) -> bool {
        match self.cell_mut(pos) {
            Some(cell) => {
                cell.road = level;
                true
            }
            None => false,
        }
    }

    /// Marks a cell as a citytile. Returns false off the board.
    pub fn set_citytile(&mut self, pos: Position, team: u8, city_id: &str) -> bool {
        match self.cell_mut(pos) {
            Some(cell) => {
                cell.citytile = Some(CellCityTile {
                    team,
                    city_id: city_id.to_string(),
                });
                true
            }
            None => false,
        }
    }

    /// All cells that currently hold a resource, in row-major order.
    pub fn resource_cells(&self) -> Vec<&Cell> {
        self.cells.iter().filter(|c| c.has_resource()).collect()
    }
}
