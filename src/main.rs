//! Smile Flap entry point
//!
//! The browser build is driven from JS through `smile_flap::web`. Natively
//! this runs a headless session against a scripted smile pattern on a
//! simulated 60 Hz refresh clock and prints the results.
//!
//! Usage: `smile-flap [tuning.json]`, or `smile-flap --print-defaults` to
//! dump the default tuning as a starting point for a custom file.

#[cfg(not(target_arch = "wasm32"))]
fn main() -> Result<(), Box<dyn std::error::Error>> {
    use smile_flap::platform::ScriptedInference;
    use smile_flap::{GameEvent, GameLoop, Tuning};

    env_logger::init();
    log::info!("Smile Flap (native) starting...");

    let tuning = match std::env::args().nth(1) {
        Some(flag) if flag == "--print-defaults" => {
            println!("{}", Tuning::default().to_json()?);
            return Ok(());
        }
        Some(path) => {
            let json = std::fs::read_to_string(&path)?;
            log::info!("Loaded tuning from {}", path);
            Tuning::from_json(&json)?
        }
        None => Tuning::default(),
    };

    // Short smile bursts with relaxed gaps in between, ~1 flap per second
    let mut script = vec![Some((0.9, 0.85)); 5];
    script.extend(vec![Some((0.1, 0.15)); 8]);
    script.push(None);
    let engine = ScriptedInference::new(script, true);

    let seed = 0x5EED;
    let mut game = GameLoop::with_inference(tuning, seed, Ok(engine))?;
    log::info!("Game initialized with seed: {}", seed);

    const FRAME_MS: f64 = 1000.0 / 60.0;
    const TIME_LIMIT_MS: f64 = 10.0 * 60.0 * 1000.0;

    let mut now = 0.0;
    let mut flaps = 0u32;
    game.start_round(now);

    'session: while now < TIME_LIMIT_MS {
        for event in game.frame(now) {
            match event {
                GameEvent::Flapped => flaps += 1,
                GameEvent::RoundOver { round, score } => {
                    println!("Round {}: {} points", round, score);
                }
                GameEvent::SessionOver { best_score } => {
                    println!("Best score: {}", best_score);
                    break 'session;
                }
                GameEvent::RoundStarted { .. } | GameEvent::Scored { .. } => {}
            }
        }
        // Rounds advance immediately in the demo
        game.next_round(now);
        now += FRAME_MS;
    }

    if now >= TIME_LIMIT_MS {
        log::warn!("Time limit reached, quitting");
        game.quit();
    }
    game.shutdown();

    println!("{} flaps over {:.1}s of play", flaps, now / 1000.0);
    Ok(())
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is `smile_flap::web::wasm_start`, this is just to satisfy the compiler
}
