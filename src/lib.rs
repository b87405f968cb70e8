//! Skystrike - a bomber-defense arcade game core
//!
//! Core modules:
//! - `sim`: Single-threaded simulation (kinematics, entities, collisions,
//!   session state machine)
//!
//! Rendering, audio playback and input polling live outside this crate.
//! A host loop samples a [`sim::TickInput`] once per frame, calls
//! [`sim::tick`], plays back the returned [`sim::GameEvent`]s and draws
//! from a [`sim::Snapshot`].

pub mod sim;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Screen dimensions (simulation space, pixels, y grows downward)
    pub const SCREEN_WIDTH: f32 = 1000.0;
    pub const SCREEN_HEIGHT: f32 = 1000.0;

    /// Frame-rate cap for the host loop (ticks per second)
    pub const TICK_RATE_CAP: f32 = 100.0;

    /// Explosion particle tunables
    pub const PARTICLE_COUNT: usize = 30;
    pub const PARTICLE_SPEED_MIN: f32 = 50.0;
    pub const PARTICLE_SPEED_MAX: f32 = 200.0;
    pub const PARTICLE_RADIUS: f32 = 3.0;
    pub const PARTICLE_LIFETIME: f32 = 0.6;
    /// How long a destroyed bomber keeps its explosion cloud on screen
    pub const EXPLOSION_DURATION: f32 = 0.5;

    /// Smoke trail tunables
    pub const SMOKE_SPEED_MIN: f32 = 10.0;
    pub const SMOKE_SPEED_MAX: f32 = 30.0;
    pub const SMOKE_RADIUS: f32 = 6.0;
    pub const SMOKE_LIFETIME: f32 = 0.5;
    /// Seconds between smoke puffs from a flying bomber
    pub const BOMBER_SMOKE_INTERVAL: f32 = 0.05;

    /// Aim geometry
    pub const AIM_PIVOT_X: f32 = SCREEN_WIDTH / 2.0;
    pub const AIM_PIVOT_Y: f32 = 735.0;
    pub const AIM_LINE_LENGTH: f32 = 700.0;

    /// Projectile tunables
    pub const PROJECTILE_RADIUS: f32 = 12.0;
    pub const PROJECTILE_SPEED: f32 = 500.0;
    pub const RELOAD_TIME: f32 = 1.0;

    /// Bomber tunables
    pub const BOMBER_SPEED: f32 = 200.0;
    pub const BOMBER_SPAWN_TIME: f32 = 3.0;
    /// Spawn interval shrinks by this much per score point (floored at 1s)
    pub const BOMBER_SPAWN_SCALING: f32 = 0.02;
    pub const BOMBER_WIDTH: f32 = 120.0;
    pub const BOMBER_HEIGHT: f32 = 60.0;
    /// Horizontal band inside which a bomber's drop timer counts down
    pub const DROP_ZONE_MIN_X: f32 = 200.0;
    pub const DROP_ZONE_MAX_X: f32 = 800.0;

    /// Bomb tunables
    pub const BOMB_RADIUS: f32 = 15.0;
    pub const BOMB_INITIAL_SPEED: f32 = 70.0;
    /// Fall-speed increase per score point, locked in at drop time
    pub const BOMB_SPEED_FACTOR: f32 = 0.1;
    pub const BOMB_DROP_TIME_MIN: f32 = 1.0;
    pub const BOMB_DROP_TIME_MAX: f32 = 3.0;

    /// Bombs detonate when they reach this height (bunker top 675 +
    /// bunker height 150 - 30)
    pub const GROUND_Y: f32 = 795.0;

    /// Ground-impact damage roll bounds (inclusive)
    pub const GROUND_DAMAGE_MIN: i32 = 1;
    pub const GROUND_DAMAGE_MAX: i32 = 20;

    pub const MAX_HEALTH: i32 = 100;

    /// Health bar geometry (for HUD layers)
    pub const HEALTH_BAR_WIDTH: f32 = 200.0;
    pub const HEALTH_BAR_HEIGHT: f32 = 20.0;
}

/// The fixed point projectiles are fired from
pub const AIM_PIVOT: Vec2 = Vec2::new(consts::AIM_PIVOT_X, consts::AIM_PIVOT_Y);

/// Advance a position by a velocity over `dt` seconds
#[inline]
pub fn advance(position: Vec2, velocity: Vec2, dt: f32) -> Vec2 {
    position + velocity * dt
}

/// Aim angle for a pointer position, in radians.
///
/// 0 is straight up, positive leans left, negative leans right, clamped to
/// [-pi/2, pi/2]. A pointer at the pivot (or non-finite input) resolves to
/// 0 rather than an undefined angle.
pub fn aim_angle(pointer: Vec2, pivot: Vec2) -> f32 {
    use std::f32::consts::FRAC_PI_2;
    let d = pointer - pivot;
    // atan2 is total, but the zero vector lands on -pi (signed zeros);
    // resolve it, and any non-finite pointer, to straight up.
    if d == Vec2::ZERO || !d.is_finite() {
        return 0.0;
    }
    (-d.x).atan2(-d.y).clamp(-FRAC_PI_2, FRAC_PI_2)
}

/// Unit direction for an aim angle (0 points straight up the screen)
#[inline]
pub fn aim_direction(angle: f32) -> Vec2 {
    Vec2::new(-angle.sin(), -angle.cos())
}
