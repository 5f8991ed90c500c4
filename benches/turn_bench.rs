use criterion::{black_box, criterion_group, criterion_main, Criterion};

use luxbot::agent::{decide_turn, Session};
use luxbot::config::AgentConfig;
use luxbot::protocol::build_game;

/// A busy mid-game 32x32 board: 40 wood tiles, 24 workers, 2 cities.
fn mid_game_lines() -> Vec<String> {
    let mut lines = vec!["rp 0 30".to_string(), "rp 1 30".to_string()];
    for i in 0..40 {
        lines.push(format!("r wood {} {} 400", (i * 7) % 32, (i * 11) % 32));
    }
    for i in 0..24 {
        let wood = if i % 3 == 0 { 100 } else { 0 };
        lines.push(format!("u 0 0 u_{} {} {} 0 {} 0 0", i, (i * 5) % 32, (i * 3) % 32, wood));
    }
    lines.push("c 0 c_1 900 46".to_string());
    lines.push("c 0 c_2 120 23".to_string());
    for i in 0..6 {
        lines.push(format!("ct 0 c_1 {} 16 0", 10 + i));
    }
    lines.push("ct 0 c_2 4 4 0".to_string());
    lines.push("D_DONE".to_string());
    lines
}

fn bench_build_game(c: &mut Criterion) {
    let lines = mid_game_lines();
    c.bench_function("build_game_32x32", |b| {
        b.iter(|| build_game(32, 32, 0, 100, black_box(lines.as_slice())))
    });
}

fn bench_decide_turn(c: &mut Criterion) {
    let game = build_game(32, 32, 0, 100, mid_game_lines().as_slice());
    let config = AgentConfig::default();
    c.bench_function("decide_turn_24_workers", |b| {
        b.iter(|| {
            let mut session = Session::new(1);
            decide_turn(black_box(&game), &mut session, &config)
        })
    });
}

criterion_group!(benches, bench_build_game, bench_decide_turn);
criterion_main!(benches);
