//! Engine state management.
//!
//! Holds what survives between turns of one match: the map size learned on
//! turn 0, the session memory and the configuration. Each observation is
//! turned into a fresh snapshot, decided on, and answered with one action
//! line.

use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::PathBuf;

use thiserror::Error;
use tracing::{error, info, warn};

use crate::agent::{decide_turn, Session, TurnPlan};
use crate::config::AgentConfig;
use crate::protocol::{build_game, format_actions, Action, Observation, UpdateError, FINISH_MARKER};

/// Errors that can occur while handling a turn.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("observation for step {0} arrived before the map size was known")]
    NotInitialized(u32),

    #[error("invalid match header: {0}")]
    Header(#[from] UpdateError),

    #[error("failed to write stats file '{path}': {source}")]
    Stats {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write actions: {0}")]
    Output(#[from] io::Error),
}

/// Holds the mutable state of the agent across one match.
pub struct Engine {
    pub config: AgentConfig,
    pub session: Session,
    map_size: Option<(i32, i32)>,
}

impl Engine {
    /// Creates an engine waiting for a turn-0 observation.
    pub fn new(config: AgentConfig) -> Self {
        let seed = config.seed.unwrap_or_else(rand::random);
        Engine {
            config,
            session: Session::new(seed),
            map_size: None,
        }
    }

    /// Forgets everything about the current match, keeping the seed.
    pub fn new_match(&mut self) {
        self.session = Session::new(self.session.seed);
        self.map_size = None;
    }

    pub fn map_size(&self) -> Option<(i32, i32)> {
        self.map_size
    }

    /// Decides the actions for one observation.
    pub fn decide(&mut self, obs: &Observation) -> Result<TurnPlan, EngineError> {
        let state_lines: &[String] = if obs.step == 0 {
            if self.map_size.is_some() {
                self.new_match();
            }
            let (size, rest) = obs.split_header()?;
            info!(width = size.0, height = size.1, player = obs.player, "match started");
            self.map_size = Some(size);
            rest
        } else {
            &obs.updates
        };

        let (width, height) = self
            .map_size
            .ok_or(EngineError::NotInitialized(obs.step))?;
        let game = build_game(width, height, obs.player, obs.step, state_lines);
        let plan = decide_turn(&game, &mut self.session, &self.config);

        info!(
            turn = obs.step,
            actions = plan.actions.len(),
            citytiles = game.player().citytile_count(),
            "turn decided"
        );

        if obs.step == self.config.final_turn {
            if let Err(e) = self.write_stats(game.player().citytile_count()) {
                warn!(error = %e, "stats not written");
            }
        }

        Ok(plan)
    }

    /// Decides the actions for one observation, dropping the per-unit detail.
    pub fn act(&mut self, obs: &Observation) -> Result<Vec<Action>, EngineError> {
        self.decide(obs).map(|plan| plan.actions)
    }

    /// Answers one turn on `out`: the comma-separated action line followed
    /// by the finish marker. A turn that cannot be decided is answered with
    /// an empty action line.
    pub fn handle_turn<W: Write>(&mut self, obs: &Observation, out: &mut W) -> Result<(), EngineError> {
        let actions = match self.act(obs) {
            Ok(actions) => actions,
            Err(e) => {
                error!(turn = obs.step, error = %e, "turn failed");
                Vec::new()
            }
        };
        writeln!(out, "{}", format_actions(&actions))?;
        writeln!(out, "{}", FINISH_MARKER)?;
        out.flush()?;
        Ok(())
    }

    /// Appends the final citytile count to the stats file.
    fn write_stats(&self, citytiles: usize) -> Result<(), EngineError> {
        let path = &self.config.stats_path;
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|source| EngineError::Stats {
                path: path.clone(),
                source,
            })?;
        writeln!(file, "{}", citytiles).map_err(|source| EngineError::Stats {
            path: path.clone(),
            source,
        })
    }
}
