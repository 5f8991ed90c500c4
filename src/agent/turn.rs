//! The per-turn decision function.
//!
//! `decide_turn` looks at one snapshot, updates the session's assignments
//! and position history, and returns the actions for this turn together with
//! a per-unit account of what each worker did or why it sat the turn out.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info, info_span};

use crate::config::AgentConfig;
use crate::game::{Cell, Direction, Game, Player, Position, Unit, CARDINALS};
use crate::protocol::Action;

use super::build::{find_build_site, step_toward_site};
use super::cities::citytile_actions;
use super::memory::Session;
use super::targets::{citytile_exists, nearest_citytile, nearest_resource};

/// Why a worker took the action it did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    /// Random cardinal move to break out of a blocked spot.
    Unstuck,
    Harvest { target: Position },
    ReturnToCity { target: Position },
    GoToBuildSite { site: Position },
    BuildCity,
}

/// Why a worker produced no action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    Cooldown,
    /// No harvestable, unclaimed resource tile is left.
    NoResourceTarget,
    /// The player owns no citytile to return to.
    NoCity,
    /// A full worker has no city to measure growth against.
    AssignedCityMissing,
    /// No empty cell was found next to the chosen resource.
    NoBuildSite,
}

/// What happened to one worker this turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnitOutcome {
    Acted { action: Action, intent: Intent },
    Skipped(SkipReason),
}

/// The result of one turn.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TurnPlan {
    /// Unit actions in unit order, then citytile actions.
    pub actions: Vec<Action>,
    /// One entry per worker, in unit order.
    pub outcomes: Vec<(String, UnitOutcome)>,
}

impl TurnPlan {
    pub fn outcome(&self, unit_id: &str) -> Option<&UnitOutcome> {
        self.outcomes
            .iter()
            .find(|(id, _)| id == unit_id)
            .map(|(_, o)| o)
    }
}

/// Result of the build branch for a full worker.
enum BuildStep {
    Outcome(UnitOutcome),
    /// The assigned city cannot afford to grow; fall back to returning cargo.
    LowFuel,
}

/// Read-only inputs shared by every unit decision in a turn.
struct TurnContext<'a> {
    game: &'a Game,
    player: &'a Player,
    resource_cells: Vec<&'a Cell>,
    config: &'a AgentConfig,
}

fn move_unit(unit: &Unit, dir: Direction, intent: Intent) -> UnitOutcome {
    UnitOutcome::Acted {
        action: Action::Move {
            unit_id: unit.id.clone(),
            dir,
        },
        intent,
    }
}

/// FNV-1a over the id bytes; stable across toolchains.
fn fold_id(unit_id: &str) -> u64 {
    unit_id.bytes().fold(0xcbf2_9ce4_8422_2325, |hash, b| {
        (hash ^ u64::from(b)).wrapping_mul(0x0100_0000_01b3)
    })
}

/// Picks a cardinal direction for a stuck unit.
///
/// The generator is seeded from the session seed, the turn and the unit id,
/// so the same turn always yields the same move.
fn stuck_direction(seed: u64, turn: u32, unit_id: &str) -> Direction {
    let mixed = seed ^ (u64::from(turn)).wrapping_mul(0x9E37_79B9_7F4A_7C15) ^ fold_id(unit_id);
    let mut rng = SmallRng::seed_from_u64(mixed);
    CARDINALS[rng.gen_range(0..CARDINALS.len())]
}

/// Decides every action for the acting player on this snapshot.
pub fn decide_turn(game: &Game, session: &mut Session, config: &AgentConfig) -> TurnPlan {
    let _span = info_span!("turn", turn = game.turn).entered();

    let player = game.player();
    let ctx = TurnContext {
        game,
        player,
        resource_cells: game.map.resource_cells(),
        config,
    };

    session.retain_units(player.units.iter().map(|u| u.id.as_str()));

    for worker in player.workers() {
        let mem = session.unit_mut(&worker.id);
        mem.record_position(game.turn, worker.pos, config.stuck_window);
        if mem.city.as_ref().is_some_and(|c| !citytile_exists(c, player)) {
            debug!(unit = %worker.id, "assigned citytile is gone");
            mem.city = None;
        }
        if mem.city.is_none() {
            mem.city = nearest_citytile(worker.pos, player);
            if let Some(city) = &mem.city {
                debug!(unit = %worker.id, city = %city.city_id, pos = %city.pos, "assigned city");
            }
        }
    }

    for worker in player.workers() {
        let assigned = session.unit(&worker.id).and_then(|m| m.resource);
        if assigned.is_none() {
            let target = nearest_resource(worker.pos, &worker.id, &ctx.resource_cells, player, session);
            debug!(unit = %worker.id, resource = ?target, "assigned resource");
            session.unit_mut(&worker.id).resource = target;
        }
    }

    let worker_count = player.workers().count();
    let citytile_count = player.citytile_count();
    let mut build_enabled =
        citytile_count == 0 || worker_count as f64 / citytile_count as f64 >= config.build_ratio;
    debug!(workers = worker_count, citytiles = citytile_count, build_enabled, "turn summary");

    let mut plan = TurnPlan::default();

    for unit in player.units.iter().filter(|u| u.is_worker()) {
        let outcome = if unit.can_act() {
            decide_unit(&ctx, session, unit, &mut build_enabled)
        } else {
            UnitOutcome::Skipped(SkipReason::Cooldown)
        };

        match &outcome {
            UnitOutcome::Acted { action, intent } => {
                debug!(unit = %unit.id, action = %action, intent = ?intent, "unit acted");
                plan.actions.push(action.clone());
            }
            UnitOutcome::Skipped(SkipReason::Cooldown) => {}
            UnitOutcome::Skipped(reason) => {
                info!(unit = %unit.id, reason = ?reason, "unit skipped");
            }
        }
        plan.outcomes.push((unit.id.clone(), outcome));
    }

    plan.actions
        .extend(citytile_actions(player, worker_count));
    plan
}

fn decide_unit(
    ctx: &TurnContext<'_>,
    session: &mut Session,
    unit: &Unit,
    build_enabled: &mut bool,
) -> UnitOutcome {
    let stuck = session
        .unit(&unit.id)
        .is_some_and(|m| m.is_stuck(ctx.config.stuck_window));
    if stuck {
        let dir = stuck_direction(session.seed, ctx.game.turn, &unit.id);
        info!(unit = %unit.id, pos = %unit.pos, "looks like a stuck worker");
        return move_unit(unit, dir, Intent::Unstuck);
    }

    if unit.cargo_space_left() > 0 {
        return harvest(ctx, session, unit);
    }

    if *build_enabled {
        match try_build(ctx, session, unit, build_enabled) {
            BuildStep::Outcome(outcome) => return outcome,
            BuildStep::LowFuel => {}
        }
    }

    return_to_city(ctx, session, unit)
}

/// Moves toward the assigned resource, reassigning when it ran dry.
fn harvest(ctx: &TurnContext<'_>, session: &mut Session, unit: &Unit) -> UnitOutcome {
    let assigned = session
        .unit(&unit.id)
        .and_then(|m| m.resource)
        .filter(|pos| ctx.game.map.cell_at(*pos).is_some_and(|c| c.has_resource()));

    let target = match assigned {
        Some(pos) => pos,
        None => {
            let target = nearest_resource(unit.pos, &unit.id, &ctx.resource_cells, ctx.player, session);
            debug!(unit = %unit.id, resource = ?target, "reassigned resource");
            session.unit_mut(&unit.id).resource = target;
            match target {
                Some(pos) => pos,
                None => return UnitOutcome::Skipped(SkipReason::NoResourceTarget),
            }
        }
    };

    move_unit(unit, unit.pos.direction_to(target), Intent::Harvest { target })
}

/// Moves toward the assigned citytile, reassigning when it no longer exists.
fn return_to_city(ctx: &TurnContext<'_>, session: &mut Session, unit: &Unit) -> UnitOutcome {
    if ctx.player.cities.is_empty() {
        return UnitOutcome::Skipped(SkipReason::NoCity);
    }

    let assigned = session
        .unit(&unit.id)
        .and_then(|m| m.city.clone())
        .filter(|a| citytile_exists(a, ctx.player));

    let target = match assigned {
        Some(a) => a.pos,
        None => match nearest_citytile(unit.pos, ctx.player) {
            Some(a) => {
                let pos = a.pos;
                debug!(unit = %unit.id, city = %a.city_id, pos = %pos, "reassigned city");
                session.unit_mut(&unit.id).city = Some(a);
                pos
            }
            None => return UnitOutcome::Skipped(SkipReason::NoCity),
        },
    };

    move_unit(unit, unit.pos.direction_to(target), Intent::ReturnToCity { target })
}

/// Steers a full worker to the shared build site and founds a city there.
fn try_build(
    ctx: &TurnContext<'_>,
    session: &mut Session,
    unit: &Unit,
    build_enabled: &mut bool,
) -> BuildStep {
    let city_id = session
        .unit(&unit.id)
        .and_then(|m| m.city.as_ref())
        .map(|c| c.city_id.clone());
    let Some(city) = city_id.as_deref().and_then(|id| ctx.player.city(id)) else {
        return BuildStep::Outcome(UnitOutcome::Skipped(SkipReason::AssignedCityMissing));
    };
    let Some(fuel_per_tile) = city.fuel_per_tile() else {
        return BuildStep::Outcome(UnitOutcome::Skipped(SkipReason::AssignedCityMissing));
    };

    let enough_fuel = fuel_per_tile > ctx.config.fuel_per_tile_threshold;
    debug!(
        unit = %unit.id,
        city = %city.id,
        fuel = city.fuel,
        size = city.citytiles.len(),
        enough_fuel,
        "build check"
    );
    if !enough_fuel {
        return BuildStep::LowFuel;
    }

    let stored = session
        .build_site
        .filter(|site| ctx.game.map.cell_at(*site).is_some_and(|c| c.is_empty()));
    let site = match stored {
        Some(site) => site,
        None => {
            let Some(near) =
                nearest_resource(unit.pos, &unit.id, &ctx.resource_cells, ctx.player, session)
            else {
                return BuildStep::Outcome(UnitOutcome::Skipped(SkipReason::NoResourceTarget));
            };
            let Some(site) = find_build_site(&ctx.game.map, near) else {
                info!(near = %near, "couldn't find any empty tile");
                session.build_site = None;
                return BuildStep::Outcome(UnitOutcome::Skipped(SkipReason::NoBuildSite));
            };
            info!(site = %site, "found build location");
            session.build_site = Some(site);
            site
        }
    };

    if unit.pos == site {
        info!(unit = %unit.id, site = %site, "building city");
        *build_enabled = false;
        session.build_site = None;
        return BuildStep::Outcome(UnitOutcome::Acted {
            action: Action::BuildCity {
                unit_id: unit.id.clone(),
            },
            intent: Intent::BuildCity,
        });
    }

    let dir = step_toward_site(&ctx.game.map, unit.pos, site);
    BuildStep::Outcome(move_unit(unit, dir, Intent::GoToBuildSite { site }))
}
