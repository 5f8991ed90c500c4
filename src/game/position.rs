//! Grid positions and movement directions.
//!
//! The board is a rectangular grid with the origin in the north-west corner;
//! x grows eastward and y grows southward.

use std::fmt;

/// A movement direction, including staying put.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    North,
    East,
    South,
    West,
    Center,
}

/// The four directions that actually change a unit's cell, in the order
/// used when picking a step toward a target.
pub const CARDINALS: [Direction; 4] = [
    Direction::North,
    Direction::East,
    Direction::South,
    Direction::West,
];

impl Direction {
    /// Returns the single-character protocol abbreviation.
    pub const fn as_char(self) -> char {
        match self {
            Direction::North => 'n',
            Direction::East => 'e',
            Direction::South => 's',
            Direction::West => 'w',
            Direction::Center => 'c',
        }
    }

    /// Parses a direction from its single-character abbreviation.
    pub fn from_char(c: char) -> Option<Direction> {
        match c {
            'n' => Some(Direction::North),
            'e' => Some(Direction::East),
            's' => Some(Direction::South),
            'w' => Some(Direction::West),
            'c' => Some(Direction::Center),
            _ => None,
        }
    }

    /// Unit offset `(dx, dy)` for one step in this direction.
    pub const fn offset(self) -> (i32, i32) {
        match self {
            Direction::North => (0, -1),
            Direction::East => (1, 0),
            Direction::South => (0, 1),
            Direction::West => (-1, 0),
            Direction::Center => (0, 0),
        }
    }
}

/// A cell coordinate on the map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Manhattan distance to another position.
    pub fn distance_to(self, other: Position) -> i32 {
        (self.x - other.x).abs() + (self.y - other.y).abs()
    }

    /// Returns the position `units` steps away in `dir`.
    pub fn translate(self, dir: Direction, units: i32) -> Position {
        let (dx, dy) = dir.offset();
        Position::new(self.x + dx * units, self.y + dy * units)
    }

    /// Returns the position shifted by an arbitrary offset.
    pub fn offset(self, dx: i32, dy: i32) -> Position {
        Position::new(self.x + dx, self.y + dy)
    }

    /// Picks the cardinal step that brings us closest to `target`.
    ///
    /// Candidates are tried in N, E, S, W order and only a strict improvement
    /// replaces the current best, so the first direction wins ties. Returns
    /// `Center` when standing on the target.
    pub fn direction_to(self, target: Position) -> Direction {
        let mut closest_dist = self.distance_to(target);
        let mut closest_dir = Direction::Center;
        for dir in CARDINALS {
            let dist = self.translate(dir, 1).distance_to(target);
            if dist < closest_dist {
                closest_dist = dist;
                closest_dir = dir;
            }
        }
        closest_dir
    }

    /// Sort key that orders positions row by row, north to south.
    pub fn row_major(self) -> (i32, i32) {
        (self.y, self.x)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}
