//! Turn decision heuristics.
//!
//! Greedy, per-unit rules: harvest the nearest free resource, bring full
//! cargo home, grow cities when fuel allows, and shake loose stuck workers.
//! Citytiles spawn workers or research.

pub mod build;
pub mod cities;
pub mod memory;
pub mod targets;
pub mod turn;

pub use memory::{CityAssignment, Session, UnitMemory};
pub use turn::{decide_turn, Intent, SkipReason, TurnPlan, UnitOutcome};
