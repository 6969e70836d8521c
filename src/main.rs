//! Open Cave entry point
//!
//! Native builds run a headless attract loop: the autopilot flies a few runs
//! at a fixed 60 Hz frame clock and the best score is kept in a JSON file.
//! The browser build is driven from JavaScript through `platform::web`.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use std::time::{SystemTime, UNIX_EPOCH};

    use opencave::persistence::FileStore;
    use opencave::platform::ThrustSignal;
    use opencave::sim::{GameEvent, GamePhase};
    use opencave::{Game, Tuning};

    const FRAME_DT: f32 = 1.0 / 60.0;
    const RUNS: u32 = 3;
    /// Give up on a run after ten simulated minutes
    const MAX_FRAMES_PER_RUN: u32 = 60 * 60 * 10;

    env_logger::init();
    log::info!("Open Cave (native) starting...");

    let mut args = std::env::args().skip(1);
    let tuning = match args.next() {
        Some(path) => match Tuning::load(&path) {
            Ok(tuning) => tuning,
            Err(e) => {
                log::error!("Failed to load tuning from {}: {}", path, e);
                std::process::exit(1);
            }
        },
        None => Tuning::default(),
    };
    let store_path = args
        .next()
        .unwrap_or_else(|| "opencave-best-score.json".to_string());

    let entropy = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0);
    let mut game = Game::with_session_entropy(tuning, FileStore::new(store_path), entropy);
    game.set_idle_mode(true);

    // Input adapters write the signal; the loop polls it once per frame
    let thrust = ThrustSignal::new();

    for run in 1..=RUNS {
        // A press starts the run, then the autopilot takes over
        thrust.set(true);
        game.set_thrust(thrust.is_active());
        game.update(FRAME_DT);
        thrust.set(false);

        let mut frames = 0;
        while game.phase() == GamePhase::Playing && frames < MAX_FRAMES_PER_RUN {
            game.set_thrust(thrust.is_active());
            for event in game.update(FRAME_DT) {
                match event {
                    GameEvent::Crashed { cause, score } => {
                        println!("Run {}: crashed ({:?}) with score {}", run, cause, score);
                    }
                    GameEvent::NewBestScore(score) => println!("  New best score: {}", score),
                    _ => {}
                }
            }
            frames += 1;
        }

        if game.phase() == GamePhase::Playing {
            println!("Run {}: still flying after {} frames, score {}", run, frames, game.score());
        }

        // Let the debris settle before the next press
        while game.state().particles().next().is_some() {
            game.update(FRAME_DT);
        }
    }

    println!("Best score: {}", game.best_score());
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is platform::web::wasm_start, this is just to satisfy the compiler
}
