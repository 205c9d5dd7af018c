//! Fixed timestep simulation tick
//!
//! Core game loop that advances the simulation one tick at a time. Physics
//! constants are per tick, not per second: the host throttles ticks to a
//! fixed rate instead of scaling by elapsed time.

use rand::Rng;

use super::collision::check_collision;
use super::state::{GameEvent, GamePhase, Obstacle, Simulation};

impl Simulation {
    /// Advance by one tick at host time `now`
    pub fn step(&mut self, now: f64) -> Vec<GameEvent> {
        tick(self, now)
    }
}

/// Advance the game state by one tick
pub fn tick(sim: &mut Simulation, now: f64) -> Vec<GameEvent> {
    let mut events = Vec::new();

    match sim.phase {
        GamePhase::Countdown => {
            sim.countdown = sim.countdown(now);
            if now - sim.countdown_started_at >= sim.tuning.countdown_ms() {
                sim.begin_running();
                events.push(GameEvent::RoundStarted { round: sim.round });
            }
        }
        GamePhase::Running => run_physics(sim, &mut events),
        GamePhase::NotStarted | GamePhase::RoundOver | GamePhase::SessionOver => {}
    }

    events
}

fn run_physics(sim: &mut Simulation, events: &mut Vec<GameEvent>) {
    integrate_bird(sim);
    spawn_obstacles(sim);
    advance_obstacles(sim);

    let gained = score_passed_obstacles(sim);
    if gained > 0 {
        events.push(GameEvent::Scored { score: sim.score });
    }

    if check_collision(&sim.bird, &sim.obstacles, &sim.tuning) {
        sim.terminal = true;
    }

    if sim.terminal {
        finish_round(sim, events);
    }
}

/// Gravity, terminal velocity, ceiling and floor
fn integrate_bird(sim: &mut Simulation) {
    let tuning = &sim.tuning;
    let bird = &mut sim.bird;
    let radius = bird.radius();

    // Only the falling side is capped; flaps set velocity directly
    bird.velocity = (bird.velocity + tuning.gravity).min(tuning.terminal_velocity);
    bird.y += bird.velocity;

    // Ceiling stops the bird but is not fatal
    if bird.y < radius {
        bird.y = radius;
        bird.velocity = 0.0;
    }

    let floor = tuning.screen_height - radius;
    if bird.y > floor {
        bird.y = floor;
        sim.terminal = true;
    }
}

/// Keep at least one obstacle; spawn once the newest has moved far enough
fn spawn_obstacles(sim: &mut Simulation) {
    let spawn_x = sim.tuning.screen_width;
    let due = match sim.obstacles.last() {
        None => true,
        Some(newest) => spawn_x - newest.x > sim.tuning.spawn_distance,
    };
    if !due {
        return;
    }

    let (lo, hi) = sim.tuning.gap_top_range();
    let gap_top = sim.rng.random_range(lo..=hi);
    let id = sim.next_obstacle_id();
    log::debug!("Spawned obstacle {} with gap at {:.0}", id, gap_top);

    sim.obstacles.push(Obstacle {
        id,
        x: spawn_x,
        width: sim.tuning.obstacle_width,
        gap_top,
        gap_bottom: gap_top + sim.tuning.gap_size,
        passed: false,
    });
}

/// Scroll obstacles left and drop the ones fully off screen
fn advance_obstacles(sim: &mut Simulation) {
    let speed = sim.tuning.obstacle_speed;
    for obstacle in &mut sim.obstacles {
        obstacle.x -= speed;
    }
    sim.obstacles.retain(|o| o.trailing_edge() >= 0.0);
}

/// Award points for each obstacle whose trailing edge has passed the bird.
/// Returns the points gained this tick.
fn score_passed_obstacles(sim: &mut Simulation) -> u32 {
    let bird_x = sim.bird.x;
    let mut gained = 0;
    for obstacle in sim.obstacles.iter_mut().filter(|o| !o.passed) {
        if obstacle.trailing_edge() < bird_x {
            obstacle.passed = true;
            gained += sim.tuning.score_per_obstacle;
        }
    }
    sim.score += gained;
    gained
}

/// Commit the score and move to RoundOver or SessionOver
fn finish_round(sim: &mut Simulation, events: &mut Vec<GameEvent>) {
    sim.best_score = sim.best_score.max(sim.score);
    events.push(GameEvent::RoundOver {
        round: sim.round,
        score: sim.score,
    });

    if sim.round >= sim.tuning.rounds {
        sim.phase = GamePhase::SessionOver;
        events.push(GameEvent::SessionOver {
            best_score: sim.best_score,
        });
        log::info!(
            "Session over after round {} (score {}, best {})",
            sim.round,
            sim.score,
            sim.best_score
        );
    } else {
        sim.phase = GamePhase::RoundOver;
        log::info!("Round {} over (score {})", sim.round, sim.score);
    }
}
