//! Choosing and reaching a site for a new citytile.

use crate::game::{Direction, GameMap, Position};

/// Orthogonal neighbor offsets, tried first.
const ORTHOGONAL: [(i32, i32); 4] = [(1, 0), (0, 1), (-1, 0), (0, -1)];

/// Diagonal neighbor offsets, tried when no orthogonal cell is free.
const DIAGONAL: [(i32, i32); 4] = [(1, -1), (-1, 1), (-1, -1), (1, 1)];

/// Finds an empty cell next to `near`: orthogonal neighbors first, then
/// diagonals. Off-map neighbors are skipped.
pub fn find_build_site(map: &GameMap, near: Position) -> Option<Position> {
    ORTHOGONAL
        .iter()
        .chain(DIAGONAL.iter())
        .filter_map(|&(dx, dy)| {
            let pos = near.offset(dx, dy);
            map.cell_at(pos)
        })
        .find(|cell| cell.is_empty())
        .map(|cell| cell.pos)
}

fn passable(map: &GameMap, pos: Position) -> bool {
    map.cell_at(pos).is_some_and(|c| c.citytile.is_none())
}

/// One step from `from` toward `to` along the axis with the larger gap.
///
/// When the next cell on that axis holds a citytile or lies off the map,
/// the unit sidesteps along the other axis instead: east or south when the
/// remaining difference there is positive, west or north otherwise.
pub fn step_toward_site(map: &GameMap, from: Position, to: Position) -> Direction {
    let dx = to.x - from.x;
    let dy = to.y - from.y;

    if dy.abs() > dx.abs() {
        let primary = if dy > 0 { Direction::South } else { Direction::North };
        if passable(map, from.translate(primary, 1)) {
            primary
        } else if dx > 0 {
            Direction::East
        } else {
            Direction::West
        }
    } else {
        let primary = if dx > 0 { Direction::East } else { Direction::West };
        if passable(map, from.translate(primary, 1)) {
            primary
        } else if dy > 0 {
            Direction::South
        } else {
            Direction::North
        }
    }
}
