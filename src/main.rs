//! Dart Evade entry point
//!
//! Native builds run a headless demo session: the autopilot flies the craft
//! until it is destroyed or the frame budget runs out, then the best score
//! is persisted. Rendering and input belong to the host front end.

use std::time::{SystemTime, UNIX_EPOCH};

use dart_evade::consts::FRAME_DT;
use dart_evade::highscores::{self, HighScore};
use dart_evade::settings::{Difficulty, Tuning};
use dart_evade::sim::{GameEvent, GameState, TickInput, tick};

/// Ten minutes at 60 Hz
const MAX_DEMO_FRAMES: u32 = 60 * 60 * 10;

const TUNING_PATH: &str = "tuning.json";

fn main() {
    env_logger::init();
    log::info!("Dart Evade (native) starting...");

    let mut tuning = Tuning::load(TUNING_PATH);
    if let Some(difficulty) = std::env::args().nth(1).as_deref().and_then(Difficulty::from_str) {
        log::info!("Difficulty: {}", difficulty.as_str());
        tuning.apply_difficulty(difficulty);
    }

    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0);

    let mut state = match GameState::new(seed, tuning) {
        Ok(state) => state,
        Err(e) => {
            log::error!("Could not start session: {}", e);
            std::process::exit(1);
        }
    };

    let mut high_score = HighScore::load(highscores::DEFAULT_PATH);
    let input = TickInput {
        idle_mode: true,
        ..Default::default()
    };

    let mut frames = 0;
    let mut coins = 0;
    while frames < MAX_DEMO_FRAMES {
        let report = tick(&mut state, &input, FRAME_DT);
        frames += 1;
        coins += state
            .drain_events()
            .iter()
            .filter(|e| matches!(e, GameEvent::PickupCollected { .. }))
            .count();
        if report.ended {
            break;
        }
    }

    println!(
        "Survived {:.1}s, collected {} coins, score {}",
        frames as f32 * FRAME_DT,
        coins,
        state.score
    );

    if high_score.record(state.score) {
        println!("New high score!");
    }
    println!("High score: {}", high_score.high_score);

    if let Err(e) = high_score.save(highscores::DEFAULT_PATH) {
        log::warn!("Could not save high score: {}", e);
    }
}
