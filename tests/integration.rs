//! Integration tests for the luxbot binary.
//!
//! Tests full kit protocol sessions by spawning the agent process, feeding
//! update lines via stdin, and checking the action lines on stdout.

use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::process::{Command, Stdio};

use luxbot::game::{Direction, Position};
use luxbot::protocol::{parse_actions, Action};

fn temp_path(tag: &str, ext: &str) -> PathBuf {
    std::env::temp_dir().join(format!("luxbot-it-{}-{}.{}", tag, std::process::id(), ext))
}

/// Sends the given input lines to the agent and collects stdout lines.
fn run_agent(tag: &str, extra_args: &[&str], input: &[&str]) -> Vec<String> {
    let exe = env!("CARGO_BIN_EXE_luxbot");
    let log = temp_path(tag, "log");
    let stats = temp_path(tag, "txt");
    let mut child = Command::new(exe)
        .arg("--log")
        .arg(&log)
        .arg("--stats")
        .arg(&stats)
        .arg("--seed")
        .arg("11")
        .args(extra_args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .expect("failed to start luxbot");

    let mut stdin = child.stdin.take().unwrap();
    let stdout = child.stdout.take().unwrap();
    let reader = std::io::BufReader::new(stdout);

    for line in input {
        writeln!(stdin, "{}", line).unwrap();
    }
    stdin.flush().unwrap();
    drop(stdin);

    let lines: Vec<String> = reader.lines().map(|l| l.unwrap()).collect();
    let status = child.wait().expect("failed to wait on child");
    assert!(status.success());
    let _ = std::fs::remove_file(&log);
    let _ = std::fs::remove_file(&stats);
    lines
}

/// A 12x12 opening: one worker next to wood, one city with one tile.
const TURN_0: &[&str] = &[
    "0",
    "12 12",
    "rp 0 0",
    "rp 1 0",
    "r wood 3 2 800",
    "r wood 9 9 800",
    "r coal 5 5 300",
    "u 0 0 u_1 2 2 0 0 0 0",
    "u 0 1 u_2 9 8 0 0 0 0",
    "c 0 c_1 0 23",
    "ct 0 c_1 1 1 0",
    "c 1 c_2 0 23",
    "ct 1 c_2 10 10 0",
    "D_DONE",
];

#[test]
fn first_turn_answers_with_actions_and_finish() {
    let lines = run_agent("first", &[], TURN_0);
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[1], "D_FINISH");

    let actions = parse_actions(&lines[0]).unwrap();
    assert_eq!(
        actions,
        vec![
            Action::Move {
                unit_id: "u_1".to_string(),
                dir: Direction::East,
            },
            Action::Research { pos: Position::new(1, 1) },
        ]
    );
}

#[test]
fn opponent_units_are_never_ordered() {
    let lines = run_agent("opponent", &[], TURN_0);
    let actions = parse_actions(&lines[0]).unwrap();
    assert!(actions.iter().all(|a| a.unit_id() != Some("u_2")));
    assert!(!actions.contains(&Action::Research { pos: Position::new(10, 10) }));
}

#[test]
fn every_turn_gets_an_answer() {
    let mut input: Vec<&str> = TURN_0.to_vec();
    let turn_1 = [
        "rp 0 1",
        "rp 1 0",
        "r wood 3 2 780",
        "u 0 0 u_1 3 2 1 20 0 0",
        "c 0 c_1 0 23",
        "ct 0 c_1 1 1 9",
        "D_DONE",
    ];
    input.extend_from_slice(&turn_1);

    let lines = run_agent("two-turns", &[], &input);
    assert_eq!(lines.len(), 4);
    assert_eq!(lines[3], "D_FINISH");
    // The worker is cooling down and the citytile already acted: empty turn.
    assert_eq!(lines[2], "");
}

#[test]
fn citytiles_spawn_workers_when_short() {
    let input = [
        "0",
        "8 8",
        "rp 0 0",
        "rp 1 0",
        "r wood 5 5 800",
        "c 0 c_1 0 23",
        "ct 0 c_1 1 1 0",
        "ct 0 c_1 1 2 0",
        "D_DONE",
    ];
    let lines = run_agent("spawn", &[], &input);
    let actions = parse_actions(&lines[0]).unwrap();
    assert_eq!(
        actions,
        vec![
            Action::BuildWorker { pos: Position::new(1, 1) },
            Action::BuildWorker { pos: Position::new(1, 2) },
        ]
    );
}

#[test]
fn malformed_updates_are_skipped() {
    let input = [
        "0",
        "8 8",
        "this is not an update",
        "r wood 1 0 100",
        "u 0 0 u_1 0 0 0 0 0 0",
        "D_DONE",
    ];
    let lines = run_agent("malformed", &[], &input);
    assert_eq!(lines[0], "m u_1 e");
    assert_eq!(lines[1], "D_FINISH");
}

#[test]
fn bad_arguments_exit_with_error() {
    let exe = env!("CARGO_BIN_EXE_luxbot");
    let status = Command::new(exe)
        .arg("--bogus")
        .arg("1")
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .expect("failed to start luxbot");
    assert!(!status.success());
}

#[test]
fn config_file_is_honored() {
    let config = temp_path("config", "json");
    std::fs::write(&config, r#"{"final_turn": 0}"#).unwrap();
    let stats = temp_path("config-stats", "txt");
    let _ = std::fs::remove_file(&stats);

    let exe = env!("CARGO_BIN_EXE_luxbot");
    let mut child = Command::new(exe)
        .arg("--config")
        .arg(&config)
        .arg("--log")
        .arg(temp_path("config", "log"))
        .arg("--stats")
        .arg(&stats)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .expect("failed to start luxbot");
    let mut stdin = child.stdin.take().unwrap();
    for line in TURN_0 {
        writeln!(stdin, "{}", line).unwrap();
    }
    drop(stdin);
    assert!(child.wait().unwrap().success());

    let written = std::fs::read_to_string(&stats).unwrap();
    let _ = std::fs::remove_file(&stats);
    let _ = std::fs::remove_file(&config);
    let _ = std::fs::remove_file(temp_path("config", "log"));
    assert_eq!(written, "1\n");
}
