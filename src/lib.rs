//! luxbot agent library.
//!
//! Exposes the game model, the kit protocol, the turn heuristics and the
//! engine for use by integration tests, benchmarks and the binary.

pub mod agent;
pub mod config;
pub mod engine;
pub mod game;
pub mod protocol;
