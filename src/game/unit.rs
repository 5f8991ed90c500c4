//! Units and their cargo.

use super::position::Position;

/// Cargo capacity of a worker.
pub const WORKER_CAPACITY: i32 = 100;

/// Cargo capacity of a cart.
pub const CART_CAPACITY: i32 = 2000;

/// The kind of a mobile unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnitKind {
    Worker,
    Cart,
}

impl UnitKind {
    /// Returns the numeric code used in `u` update lines.
    pub const fn code(self) -> u8 {
        match self {
            UnitKind::Worker => 0,
            UnitKind::Cart => 1,
        }
    }

    /// Parses a unit kind from its numeric code.
    pub fn from_code(code: u8) -> Option<UnitKind> {
        match code {
            0 => Some(UnitKind::Worker),
            1 => Some(UnitKind::Cart),
            _ => None,
        }
    }

    pub const fn capacity(self) -> i32 {
        match self {
            UnitKind::Worker => WORKER_CAPACITY,
            UnitKind::Cart => CART_CAPACITY,
        }
    }
}

/// Resources carried by a unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cargo {
    pub wood: i32,
    pub coal: i32,
    pub uranium: i32,
}

impl Cargo {
    pub fn total(&self) -> i32 {
        self.wood + self.coal + self.uranium
    }
}

/// A unit owned by some team.
#[derive(Debug, Clone, PartialEq)]
pub struct Unit {
    pub id: String,
    pub kind: UnitKind,
    pub team: u8,
    pub pos: Position,
    pub cooldown: f64,
    pub cargo: Cargo,
}

impl Unit {
    pub fn is_worker(&self) -> bool {
        self.kind == UnitKind::Worker
    }

    /// A unit may act when its cooldown has run out.
    pub fn can_act(&self) -> bool {
        self.cooldown < 1.0
    }

    /// Remaining carrying capacity; never negative.
    pub fn cargo_space_left(&self) -> i32 {
        (self.kind.capacity() - self.cargo.total()).max(0)
    }
}
