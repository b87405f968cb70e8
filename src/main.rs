//! Skystrike headless demo
//!
//! Stands in for the windowed frame pump: drives the simulation with a
//! simple autopilot at the capped tick rate, tallies the audio-trigger
//! events a real host would play back, and prints the final snapshot as
//! JSON for inspection.

use glam::Vec2;
use skystrike::consts::*;
use skystrike::sim::{tick, GameEvent, GamePhase, GameState, Snapshot, TickInput};
use skystrike::AIM_PIVOT;

/// Demo length in simulated seconds
const DEMO_SECONDS: f32 = 120.0;

fn main() {
    env_logger::init();

    let seed = 0xC0FFEE;
    let mut state = GameState::new(seed);
    log::info!("starting demo session (seed {seed:#x})");

    let dt = 1.0 / TICK_RATE_CAP;
    let mut shots = 0u32;
    let mut drops = 0u32;
    let mut explosions = 0u32;

    for _ in 0..(DEMO_SECONDS * TICK_RATE_CAP) as u32 {
        let input = TickInput {
            pointer: autopilot_target(&state),
            fire: true,
            restart: false,
        };
        for event in tick(&mut state, &input, dt) {
            match event {
                GameEvent::ShotFired => shots += 1,
                GameEvent::BombDropped => drops += 1,
                GameEvent::ExplosionOccurred => explosions += 1,
            }
        }
        if state.phase == GamePhase::GameOver {
            break;
        }
    }

    log::info!(
        "demo finished: score {}, health {}, {} shots, {} bombs dropped, {} explosions",
        state.score,
        state.health,
        shots,
        drops,
        explosions
    );

    let snapshot = Snapshot::capture(&state);
    match serde_json::to_string_pretty(&snapshot) {
        Ok(json) => println!("{json}"),
        Err(err) => log::error!("snapshot serialization failed: {err}"),
    }
}

/// Aim at the nearest falling bomb; with no bombs in the air, lead the
/// nearest flying bomber; otherwise point straight up.
fn autopilot_target(state: &GameState) -> Vec2 {
    let nearest = |positions: &mut dyn Iterator<Item = Vec2>| {
        positions.min_by(|a, b| {
            a.distance(AIM_PIVOT)
                .partial_cmp(&b.distance(AIM_PIVOT))
                .unwrap_or(std::cmp::Ordering::Equal)
        })
    };

    if let Some(bomb) = nearest(&mut state.bombs.iter().map(|b| b.pos)) {
        return bomb;
    }
    if let Some(bomber) = nearest(
        &mut state
            .bombers
            .iter()
            .filter(|b| b.is_flying())
            .map(|b| b.pos),
    ) {
        return bomber;
    }
    AIM_PIVOT + Vec2::new(0.0, -100.0)
}
