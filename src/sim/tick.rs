//! Per-frame simulation update
//!
//! One tick fully advances the session in a fixed order: timers, bomber
//! spawning, aim/fire input, kinematics, bomb drops, collision resolution,
//! pruning. The host calls this once per rendered frame with the elapsed
//! wall-clock seconds; all rates are per-second, so the simulation is
//! frame-rate independent.

use glam::Vec2;
use rand::Rng;

use super::collision;
use super::state::{
    Bomb, Bomber, BomberState, GameEvent, GamePhase, GameState, Particle, Projectile, SMOKE_PRESET,
};
use crate::consts::*;
use crate::{aim_angle, AIM_PIVOT};

/// Input sampled by the host once per tick
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Pointer position in screen coordinates
    pub pointer: Vec2,
    /// Fire button held
    pub fire: bool,
    /// Restart click; only meaningful in GameOver
    pub restart: bool,
}

/// Advance the session by one tick of `dt` seconds.
///
/// Returns the audio-trigger events produced during this tick, in the
/// order they occurred.
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) -> Vec<GameEvent> {
    let mut events = Vec::new();

    // A negative dt is host misbehavior: flag it in debug, treat the
    // frame as empty in release.
    debug_assert!(dt >= 0.0, "negative dt: {dt}");
    let dt = dt.max(0.0);

    if state.phase == GamePhase::GameOver {
        // No entity updates after game over; only a restart is honored.
        if input.restart {
            log::info!("restarting session (seed {})", state.seed);
            state.restart();
        }
        return events;
    }

    // 1. Timers, floored at zero.
    state.fire_cooldown = (state.fire_cooldown - dt).max(0.0);
    state.bomber_spawn_cooldown = (state.bomber_spawn_cooldown - dt).max(0.0);

    // 2. Bomber spawning. Kind only scales speed; the spawn interval
    //    shrinks as the score grows, floored at one second.
    if state.bomber_spawn_cooldown <= 0.0 {
        let kind = state.rng.random_range(1..=5);
        let speed = BOMBER_SPEED + kind as f32 * 10.0;
        state.bombers.push(Bomber::spawn(&mut state.rng, speed));
        state.bomber_spawn_cooldown =
            (BOMBER_SPAWN_TIME - state.score as f32 * BOMBER_SPAWN_SCALING).max(1.0);
        log::debug!("spawned bomber kind {kind} (speed {speed})");
    }

    // 3. Aim from the pointer, clamped to the upper half-plane.
    state.aim_angle = aim_angle(input.pointer, AIM_PIVOT);

    // 4. Fire, gated by the reload timer.
    if input.fire && state.fire_cooldown <= 0.0 {
        state.projectiles.push(Projectile::fire(state.aim_angle));
        state.fire_cooldown = RELOAD_TIME;
        events.push(GameEvent::ShotFired);
    }

    // 5. Kinematics. Projectiles and bombs leave one smoke puff per tick;
    //    bombers emit on their own sub-interval.
    for proj in state.projectiles.iter_mut() {
        proj.tick(dt);
        state
            .smoke_particles
            .push(Particle::spawn(&mut state.rng, proj.pos, &SMOKE_PRESET));
    }
    for bomber in state.bombers.iter_mut() {
        bomber.tick(dt, &mut state.smoke_particles, &mut state.rng);
    }
    for bomb in state.bombs.iter_mut() {
        bomb.tick(dt);
        state
            .smoke_particles
            .push(Particle::spawn(&mut state.rng, bomb.pos, &SMOKE_PRESET));
    }
    for particle in state.explosion_particles.iter_mut() {
        particle.tick(dt);
    }
    for particle in state.smoke_particles.iter_mut() {
        particle.tick(dt);
    }

    // 6. Expired drop timers release bombs. The bomber keeps flying; its
    //    timer is redrawn from the drop-delay bounds.
    for bomber in state.bombers.iter_mut() {
        if bomber.is_flying() && bomber.drop_timer <= 0.0 {
            state
                .bombs
                .push(Bomb::new(bomber.bomb_release_point(), state.score));
            bomber.drop_timer = state.rng.random_range(BOMB_DROP_TIME_MIN..BOMB_DROP_TIME_MAX);
            events.push(GameEvent::BombDropped);
        }
    }

    // 7. Collisions.
    collision::resolve(state, &mut events);

    // 8. Prune dead entities.
    state
        .bombers
        .retain(|b| !matches!(b.state, BomberState::Removed));
    state.projectiles.retain(Projectile::on_screen);
    state.explosion_particles.retain(Particle::is_alive);
    state.smoke_particles.retain(Particle::is_alive);

    debug_assert!(state.health > 0 || state.phase == GamePhase::GameOver);
    debug_assert!(state.fire_cooldown >= 0.0);
    debug_assert!(state.bomber_spawn_cooldown >= 0.0);

    events
}
