//! Citytile actions: grow the workforce, otherwise research.

use tracing::debug;

use crate::game::Player;
use crate::protocol::Action;

/// One action per citytile that can act this turn.
///
/// While the player has fewer workers than citytiles, tiles spawn workers
/// until the gap is closed; every other actable tile researches.
pub fn citytile_actions(player: &Player, worker_count: usize) -> Vec<Action> {
    let mut can_create = player.citytile_count() as i64 - worker_count as i64;
    let mut actions = Vec::new();

    for tile in player.citytiles().filter(|t| t.can_act()) {
        if can_create > 0 {
            debug!(pos = %tile.pos, city = %tile.city_id, "building worker");
            actions.push(Action::BuildWorker { pos: tile.pos });
            can_create -= 1;
        } else {
            debug!(pos = %tile.pos, city = %tile.city_id, "researching");
            actions.push(Action::Research { pos: tile.pos });
        }
    }

    actions
}
