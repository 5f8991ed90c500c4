//! luxbot -- a heuristic Lux AI agent.
//!
//! Reads the kit protocol from stdin: on the first turn the player id and
//! the `width height` line, then each turn's update lines up to `D_DONE`.
//! After every `D_DONE` it writes the turn's actions as one comma-separated
//! line followed by `D_FINISH`. Decision traces go to the log file, never to
//! stdout.
//!
//! Usage:
//!   luxbot [--config FILE] [--log FILE] [--stats FILE] [--seed N]

use std::env;
use std::fs::File;
use std::io::{self, BufRead};
use std::path::{Path, PathBuf};
use std::process;
use std::sync::Mutex;

use tracing::{error, warn};
use tracing_subscriber::EnvFilter;

use luxbot::config::AgentConfig;
use luxbot::engine::Engine;
use luxbot::protocol::{Observation, DONE_MARKER};

/// Command-line overrides applied on top of the config file.
#[derive(Default)]
struct Args {
    config: Option<PathBuf>,
    log: Option<PathBuf>,
    stats: Option<PathBuf>,
    seed: Option<u64>,
}

fn parse_args() -> Result<Args, String> {
    let args: Vec<String> = env::args().collect();
    let mut parsed = Args::default();

    let mut i = 1;
    while i < args.len() {
        let flag = args[i].as_str();
        let value = args
            .get(i + 1)
            .ok_or_else(|| format!("missing value for {}", flag))?;
        match flag {
            "--config" => parsed.config = Some(PathBuf::from(value)),
            "--log" => parsed.log = Some(PathBuf::from(value)),
            "--stats" => parsed.stats = Some(PathBuf::from(value)),
            "--seed" => {
                parsed.seed = Some(
                    value
                        .parse()
                        .map_err(|_| format!("invalid --seed value: '{}'", value))?,
                )
            }
            other => return Err(format!("unknown argument: '{}'", other)),
        }
        i += 2;
    }

    Ok(parsed)
}

fn load_config(args: &Args) -> Result<AgentConfig, String> {
    let mut config = match &args.config {
        Some(path) => AgentConfig::load(path).map_err(|e| e.to_string())?,
        None => AgentConfig::default(),
    };
    if let Some(log) = &args.log {
        config.log_path = log.clone();
    }
    if let Some(stats) = &args.stats {
        config.stats_path = stats.clone();
    }
    if args.seed.is_some() {
        config.seed = args.seed;
    }
    Ok(config)
}

/// Sends decision traces to a fresh log file, or to stderr when the file
/// cannot be created.
fn init_logging(log_path: &Path) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("luxbot=debug"));
    match File::create(log_path) {
        Ok(file) => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(Mutex::new(file))
            .with_ansi(false)
            .with_target(false)
            .init(),
        Err(e) => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(io::stderr)
                .with_target(false)
                .init();
            warn!(path = %log_path.display(), error = %e, "cannot create log file");
        }
    }
}

/// Runs the kit protocol loop, reading updates from stdin and writing
/// action lines to stdout.
fn main() {
    let config = match parse_args().and_then(|args| load_config(&args)) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("{}", e);
            process::exit(2);
        }
    };
    init_logging(&config.log_path);

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());
    let mut engine = Engine::new(config);

    let mut updates: Vec<String> = Vec::new();
    let mut step: u32 = 0;
    let mut player: u8 = 0;

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(l) => l,
            Err(_) => break,
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line != DONE_MARKER {
            updates.push(line.to_string());
            continue;
        }

        if step == 0 {
            player = match updates.first().map(|s| s.parse::<u8>()) {
                Some(Ok(p)) => p,
                _ => {
                    warn!(first = ?updates.first(), "no player id in first update, assuming 0");
                    0
                }
            };
        }

        let obs = Observation::new(step, player, std::mem::take(&mut updates));
        if let Err(e) = engine.handle_turn(&obs, &mut out) {
            error!(error = %e, "cannot write to stdout");
            break;
        }
        step += 1;
    }
}
