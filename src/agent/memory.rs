//! Cross-turn memory of a match.
//!
//! A `Session` holds what the heuristics remember between turns: each
//! unit's resource and city assignments, its recent positions, and the
//! shared build site. It lives for one match and is owned by the caller.

use std::collections::{HashMap, VecDeque};

use crate::game::Position;

/// The citytile a unit returns its cargo to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CityAssignment {
    pub city_id: String,
    pub pos: Position,
}

/// What the session remembers about one unit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UnitMemory {
    pub resource: Option<Position>,
    pub city: Option<CityAssignment>,
    /// `(turn, position)` pairs, oldest first.
    history: VecDeque<(u32, Position)>,
}

impl UnitMemory {
    /// Records where the unit stands on `turn`, keeping at most `window`
    /// entries. Recording the same turn again replaces that entry.
    pub fn record_position(&mut self, turn: u32, pos: Position, window: usize) {
        if let Some(last) = self.history.back_mut() {
            if last.0 == turn {
                last.1 = pos;
                return;
            }
        }
        self.history.push_back((turn, pos));
        while self.history.len() > window {
            self.history.pop_front();
        }
    }

    /// True once `window` positions are recorded and all of them match.
    pub fn is_stuck(&self, window: usize) -> bool {
        if window == 0 || self.history.len() < window {
            return false;
        }
        let mut recent = self.history.iter().rev().take(window).map(|(_, p)| *p);
        match recent.next() {
            Some(first) => recent.all(|p| p == first),
            None => false,
        }
    }

    pub fn recent_positions(&self) -> Vec<Position> {
        self.history.iter().map(|(_, p)| *p).collect()
    }
}

/// Memory for one match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub units: HashMap<String, UnitMemory>,
    /// The one cell every full worker is currently steering toward to build.
    pub build_site: Option<Position>,
    /// Base seed for stuck-unit moves.
    pub seed: u64,
}

impl Session {
    pub fn new(seed: u64) -> Self {
        Session {
            units: HashMap::new(),
            build_site: None,
            seed,
        }
    }

    pub fn unit(&self, id: &str) -> Option<&UnitMemory> {
        self.units.get(id)
    }

    pub fn unit_mut(&mut self, id: &str) -> &mut UnitMemory {
        self.units.entry(id.to_string()).or_default()
    }

    /// Forgets units that are no longer alive, releasing their claims.
    pub fn retain_units<'a>(&mut self, alive: impl IntoIterator<Item = &'a str>) {
        let alive: std::collections::HashSet<&str> = alive.into_iter().collect();
        self.units.retain(|id, _| alive.contains(id.as_str()));
    }

    /// True when some unit other than `except` is assigned to `pos`.
    pub fn is_claimed(&self, pos: Position, except: &str) -> bool {
        self.units
            .iter()
            .any(|(id, mem)| id != except && mem.resource == Some(pos))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn history_keeps_window() {
        let mut mem = UnitMemory::default();
        for turn in 0..5 {
            mem.record_position(turn, Position::new(turn as i32, 0), 3);
        }
        assert_eq!(
            mem.recent_positions(),
            vec![Position::new(2, 0), Position::new(3, 0), Position::new(4, 0)]
        );
    }

    #[test]
    fn same_turn_replaces_entry() {
        let mut mem = UnitMemory::default();
        mem.record_position(1, Position::new(0, 0), 3);
        mem.record_position(1, Position::new(0, 0), 3);
        mem.record_position(1, Position::new(0, 0), 3);
        assert_eq!(mem.recent_positions().len(), 1);
        assert!(!mem.is_stuck(3));
    }

    #[test]
    fn stuck_needs_full_identical_window() {
        let mut mem = UnitMemory::default();
        let p = Position::new(2, 2);
        mem.record_position(0, p, 3);
        mem.record_position(1, p, 3);
        assert!(!mem.is_stuck(3));
        mem.record_position(2, p, 3);
        assert!(mem.is_stuck(3));
        mem.record_position(3, Position::new(2, 3), 3);
        assert!(!mem.is_stuck(3));
    }

    #[test]
    fn retain_units_drops_dead_units() {
        let mut session = Session::new(0);
        session.unit_mut("u_1").resource = Some(Position::new(1, 1));
        session.unit_mut("u_2").resource = Some(Position::new(2, 2));
        session.retain_units(["u_2"]);
        assert!(session.unit("u_1").is_none());
        assert!(session.unit("u_2").is_some());
        assert!(!session.is_claimed(Position::new(1, 1), "u_9"));
    }

    #[test]
    fn claims_ignore_own_assignment() {
        let mut session = Session::new(0);
        session.unit_mut("u_1").resource = Some(Position::new(1, 1));
        assert!(session.is_claimed(Position::new(1, 1), "u_2"));
        assert!(!session.is_claimed(Position::new(1, 1), "u_1"));
    }
}
