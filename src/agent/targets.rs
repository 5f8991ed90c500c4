//! Nearest-target searches.
//!
//! Plain linear scans over the candidate cells; boards are at most 32x32 so
//! no spatial index is kept. Ties on distance go to the first candidate in
//! row-major order, which keeps assignments independent of update order.

use crate::game::{Cell, Player, Position};

use super::memory::{CityAssignment, Session};

/// Finds the closest resource cell `unit_id` may harvest and no other unit
/// has claimed.
///
/// `resource_cells` are expected in row-major order, as returned by
/// `GameMap::resource_cells`.
pub fn nearest_resource(
    from: Position,
    unit_id: &str,
    resource_cells: &[&Cell],
    player: &Player,
    session: &Session,
) -> Option<Position> {
    let mut best: Option<(i32, Position)> = None;
    for cell in resource_cells {
        let Some(resource) = cell.resource else {
            continue;
        };
        if !player.can_harvest(resource.kind) {
            continue;
        }
        if session.is_claimed(cell.pos, unit_id) {
            continue;
        }
        let dist = cell.pos.distance_to(from);
        if best.map_or(true, |(d, p)| (dist, cell.pos.row_major()) < (d, p.row_major())) {
            best = Some((dist, cell.pos));
        }
    }
    best.map(|(_, pos)| pos)
}

/// Finds the closest citytile across all of the player's cities.
pub fn nearest_citytile(from: Position, player: &Player) -> Option<CityAssignment> {
    player
        .citytiles()
        .min_by_key(|tile| (tile.pos.distance_to(from), tile.pos.row_major()))
        .map(|tile| CityAssignment {
            city_id: tile.city_id.clone(),
            pos: tile.pos,
        })
}

/// True when the assigned citytile still belongs to the player.
pub fn citytile_exists(assignment: &CityAssignment, player: &Player) -> bool {
    player
        .city(&assignment.city_id)
        .is_some_and(|city| city.citytiles.iter().any(|t| t.pos == assignment.pos))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Game, ResourceKind};

    fn game_with_resources(resources: &[(i32, i32, ResourceKind)]) -> Game {
        let mut game = Game::new(8, 8, 0, 0);
        for &(x, y, kind) in resources {
            game.map.set_resource(Position::new(x, y), kind, 100);
        }
        game
    }

    #[test]
    fn picks_closest_wood() {
        let game = game_with_resources(&[(0, 0, ResourceKind::Wood), (4, 4, ResourceKind::Wood)]);
        let cells = game.map.resource_cells();
        let session = Session::new(0);
        let pos = nearest_resource(Position::new(5, 5), "u_1", &cells, game.player(), &session);
        assert_eq!(pos, Some(Position::new(4, 4)));
    }

    #[test]
    fn skips_unresearched_kinds() {
        let mut game = game_with_resources(&[(1, 1, ResourceKind::Coal), (6, 6, ResourceKind::Wood)]);
        let session = Session::new(0);
        {
            let cells = game.map.resource_cells();
            let pos = nearest_resource(Position::new(1, 2), "u_1", &cells, game.player(), &session);
            assert_eq!(pos, Some(Position::new(6, 6)));
        }
        game.set_research_points(0, 50);
        let cells = game.map.resource_cells();
        let pos = nearest_resource(Position::new(1, 2), "u_1", &cells, game.player(), &session);
        assert_eq!(pos, Some(Position::new(1, 1)));
    }

    #[test]
    fn skips_tiles_claimed_by_others() {
        let game = game_with_resources(&[(1, 0, ResourceKind::Wood), (3, 0, ResourceKind::Wood)]);
        let cells = game.map.resource_cells();
        let mut session = Session::new(0);
        session.unit_mut("u_2").resource = Some(Position::new(1, 0));
        let pos = nearest_resource(Position::new(0, 0), "u_1", &cells, game.player(), &session);
        assert_eq!(pos, Some(Position::new(3, 0)));
        // A unit's own claim does not hide the tile from itself.
        let pos = nearest_resource(Position::new(0, 0), "u_2", &cells, game.player(), &session);
        assert_eq!(pos, Some(Position::new(1, 0)));
    }

    #[test]
    fn ties_go_to_row_major_first() {
        let game = game_with_resources(&[(4, 3, ResourceKind::Wood), (3, 4, ResourceKind::Wood), (2, 3, ResourceKind::Wood)]);
        let cells = game.map.resource_cells();
        let session = Session::new(0);
        let pos = nearest_resource(Position::new(3, 3), "u_1", &cells, game.player(), &session);
        assert_eq!(pos, Some(Position::new(2, 3)));
    }

    #[test]
    fn none_when_nothing_harvestable() {
        let game = game_with_resources(&[(1, 1, ResourceKind::Uranium)]);
        let cells = game.map.resource_cells();
        let session = Session::new(0);
        assert_eq!(
            nearest_resource(Position::new(0, 0), "u_1", &cells, game.player(), &session),
            None
        );
    }

    #[test]
    fn nearest_citytile_spans_cities() {
        let mut game = Game::new(8, 8, 0, 0);
        game.add_city(0, "c_1", 0.0, 0.0);
        game.add_city(0, "c_2", 0.0, 0.0);
        game.add_citytile(0, "c_1", Position::new(0, 0), 0.0);
        game.add_citytile(0, "c_2", Position::new(5, 5), 0.0);
        let a = nearest_citytile(Position::new(4, 4), game.player()).unwrap();
        assert_eq!(a.city_id, "c_2");
        assert_eq!(a.pos, Position::new(5, 5));
        assert!(citytile_exists(&a, game.player()));
        assert!(nearest_citytile(Position::new(0, 0), game.opponent()).is_none());
    }

    #[test]
    fn citytile_exists_detects_lost_tile() {
        let mut game = Game::new(4, 4, 0, 0);
        game.add_city(0, "c_1", 0.0, 0.0);
        game.add_citytile(0, "c_1", Position::new(1, 1), 0.0);
        let gone = CityAssignment {
            city_id: "c_1".to_string(),
            pos: Position::new(2, 2),
        };
        assert!(!citytile_exists(&gone, game.player()));
        let other_city = CityAssignment {
            city_id: "c_7".to_string(),
            pos: Position::new(1, 1),
        };
        assert!(!citytile_exists(&other_city, game.player()));
    }
}
