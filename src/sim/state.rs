//! Session state and entity types
//!
//! Everything the simulation mutates per tick lives here. Entity
//! collections are owned exclusively by [`GameState`]; nothing outside the
//! session holds a reference to a live entity across ticks - renderers see
//! an immutable snapshot instead.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::Serialize;
use std::f32::consts::TAU;

use crate::advance;
use crate::consts::*;

/// Top-level session mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Health reached zero; only a restart is accepted
    GameOver,
}

/// Discrete audio-trigger events surfaced by each tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    ShotFired,
    BombDropped,
    /// One per destroyed bomber, intercepted bomb or ground impact
    ExplosionOccurred,
}

/// Tunables shared by every particle kind
#[derive(Debug, Clone, Copy)]
pub struct ParticlePreset {
    pub speed_min: f32,
    pub speed_max: f32,
    pub lifetime: f32,
}

/// Fast, short-lived: collision and impact bursts. Rendered at
/// [`PARTICLE_RADIUS`].
pub const EXPLOSION_PRESET: ParticlePreset = ParticlePreset {
    speed_min: PARTICLE_SPEED_MIN,
    speed_max: PARTICLE_SPEED_MAX,
    lifetime: PARTICLE_LIFETIME,
};

/// Slow, longer-lived: trails behind moving entities. Rendered at
/// [`SMOKE_RADIUS`].
pub const SMOKE_PRESET: ParticlePreset = ParticlePreset {
    speed_min: SMOKE_SPEED_MIN,
    speed_max: SMOKE_SPEED_MAX,
    lifetime: SMOKE_LIFETIME,
};

/// A fire-and-forget visual particle
#[derive(Debug, Clone)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Remaining lifetime in seconds; monotonically decreasing
    pub lifetime: f32,
    max_lifetime: f32,
}

impl Particle {
    pub fn new(pos: Vec2, vel: Vec2, lifetime: f32) -> Self {
        Self {
            pos,
            vel,
            lifetime,
            max_lifetime: lifetime,
        }
    }

    /// Spawn at `origin` with a uniformly random direction in [0, 2pi) and
    /// a uniformly random speed from the preset's range
    pub fn spawn(rng: &mut Pcg32, origin: Vec2, preset: &ParticlePreset) -> Self {
        let angle = rng.random_range(0.0..TAU);
        let speed = rng.random_range(preset.speed_min..preset.speed_max);
        Self::new(
            origin,
            Vec2::new(angle.cos(), angle.sin()) * speed,
            preset.lifetime,
        )
    }

    pub fn tick(&mut self, dt: f32) {
        self.pos = advance(self.pos, self.vel, dt);
        self.lifetime -= dt;
    }

    pub fn is_alive(&self) -> bool {
        self.lifetime > 0.0
    }

    /// Linear fade factor in [0, 1] for rendering
    pub fn fade(&self) -> f32 {
        (self.lifetime / self.max_lifetime).clamp(0.0, 1.0)
    }
}

/// Spawn a fixed-size burst of explosion particles at one origin
pub fn explosion_burst(rng: &mut Pcg32, origin: Vec2) -> Vec<Particle> {
    (0..PARTICLE_COUNT)
        .map(|_| Particle::spawn(rng, origin, &EXPLOSION_PRESET))
        .collect()
}

/// Traversal direction of a bomber
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Facing {
    Left,
    Right,
}

/// Bomber life cycle.
///
/// "Exploding" is visual-only decay: the bomber no longer flies or
/// collides, but its explosion cloud stays renderable for a grace period.
/// The burst is populated exactly once, on the Flying -> Exploding
/// transition.
#[derive(Debug, Clone)]
pub enum BomberState {
    Flying,
    Exploding {
        elapsed: f32,
        particles: Vec<Particle>,
    },
    Removed,
}

/// A flying enemy that traverses the screen and periodically drops bombs
#[derive(Debug, Clone)]
pub struct Bomber {
    /// Sprite center
    pub pos: Vec2,
    pub vel: Vec2,
    pub facing: Facing,
    /// Counts down only while the horizontal center is in the drop zone
    pub drop_timer: f32,
    pub smoke_timer: f32,
    pub state: BomberState,
}

impl Bomber {
    /// Spawn off-screen on a random side, at a random altitude in the top
    /// half of the screen, with the given horizontal speed
    pub fn spawn(rng: &mut Pcg32, speed: f32) -> Self {
        let (x, vel, facing) = if rng.random_bool(0.5) {
            (-BOMBER_WIDTH, Vec2::new(speed, 0.0), Facing::Right)
        } else {
            (SCREEN_WIDTH + BOMBER_WIDTH, Vec2::new(-speed, 0.0), Facing::Left)
        };
        let y = rng.random_range(BOMBER_HEIGHT / 2.0..SCREEN_HEIGHT / 2.0 - BOMBER_HEIGHT / 2.0);
        Self {
            pos: Vec2::new(x, y),
            vel,
            facing,
            drop_timer: rng.random_range(BOMB_DROP_TIME_MIN..BOMB_DROP_TIME_MAX),
            smoke_timer: 0.0,
            state: BomberState::Flying,
        }
    }

    pub fn is_flying(&self) -> bool {
        matches!(self.state, BomberState::Flying)
    }

    /// Horizontal center inside the band where the drop timer counts down
    pub fn in_drop_zone(&self) -> bool {
        (DROP_ZONE_MIN_X..=DROP_ZONE_MAX_X).contains(&self.pos.x)
    }

    /// Trailing edge of the sprite, where the smoke trail is emitted
    pub fn trailing_edge(&self) -> Vec2 {
        match self.facing {
            Facing::Right => Vec2::new(self.pos.x - BOMBER_WIDTH / 2.0, self.pos.y),
            Facing::Left => Vec2::new(self.pos.x + BOMBER_WIDTH / 2.0, self.pos.y),
        }
    }

    /// Bottom center of the sprite, where a dropped bomb is released
    pub fn bomb_release_point(&self) -> Vec2 {
        Vec2::new(self.pos.x, self.pos.y + BOMBER_HEIGHT / 2.0)
    }

    /// Destroy the bomber: velocity freezes and the explosion burst is
    /// populated, exactly once, on this transition
    pub fn explode(&mut self, rng: &mut Pcg32) {
        debug_assert!(self.is_flying(), "only a flying bomber can explode");
        self.state = BomberState::Exploding {
            elapsed: 0.0,
            particles: explosion_burst(rng, self.pos),
        };
    }

    /// Advance one tick. Flying bombers push smoke puffs into `smoke`;
    /// exploding bombers advance their attached burst until removal.
    pub fn tick(&mut self, dt: f32, smoke: &mut Vec<Particle>, rng: &mut Pcg32) {
        match &mut self.state {
            BomberState::Flying => {
                self.pos = advance(self.pos, self.vel, dt);
                self.smoke_timer -= dt;
                if self.smoke_timer <= 0.0 {
                    smoke.push(Particle::spawn(rng, self.trailing_edge(), &SMOKE_PRESET));
                    self.smoke_timer = BOMBER_SMOKE_INTERVAL;
                }
                if self.in_drop_zone() {
                    self.drop_timer -= dt;
                }
            }
            BomberState::Exploding { elapsed, particles } => {
                for p in particles.iter_mut() {
                    p.tick(dt);
                }
                *elapsed += dt;
                if *elapsed >= EXPLOSION_DURATION {
                    self.state = BomberState::Removed;
                }
            }
            BomberState::Removed => {}
        }
    }
}

/// A falling bomb. Fall speed is locked in from the score at creation
/// time; later score changes do not affect bombs already in the air.
#[derive(Debug, Clone)]
pub struct Bomb {
    pub pos: Vec2,
    pub vel: Vec2,
}

impl Bomb {
    pub fn new(pos: Vec2, score: u32) -> Self {
        let speed = BOMB_INITIAL_SPEED + score as f32 * BOMB_SPEED_FACTOR;
        Self {
            pos,
            vel: Vec2::new(0.0, speed),
        }
    }

    pub fn tick(&mut self, dt: f32) {
        self.pos = advance(self.pos, self.vel, dt);
    }
}

/// A fired shot traveling in a straight line from the aim pivot
#[derive(Debug, Clone)]
pub struct Projectile {
    pub pos: Vec2,
    pub vel: Vec2,
}

impl Projectile {
    /// Fire from the aim pivot along the clamped aim angle
    pub fn fire(aim_angle: f32) -> Self {
        Self {
            pos: crate::AIM_PIVOT,
            vel: crate::aim_direction(aim_angle) * PROJECTILE_SPEED,
        }
    }

    pub fn tick(&mut self, dt: f32) {
        self.pos = advance(self.pos, self.vel, dt);
    }

    pub fn on_screen(&self) -> bool {
        (0.0..=SCREEN_WIDTH).contains(&self.pos.x) && (0.0..=SCREEN_HEIGHT).contains(&self.pos.y)
    }
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub phase: GamePhase,
    pub health: i32,
    pub score: u32,
    /// Seconds until the next shot is allowed
    pub fire_cooldown: f32,
    /// Seconds until the next bomber spawns
    pub bomber_spawn_cooldown: f32,
    /// Last computed aim angle (radians), kept for the snapshot
    pub aim_angle: f32,
    pub bombers: Vec<Bomber>,
    pub bombs: Vec<Bomb>,
    pub projectiles: Vec<Projectile>,
    pub explosion_particles: Vec<Particle>,
    pub smoke_particles: Vec<Particle>,
}

impl GameState {
    /// Create a fresh Playing session with the given seed
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Playing,
            health: MAX_HEALTH,
            score: 0,
            fire_cooldown: 0.0,
            bomber_spawn_cooldown: 0.0,
            aim_angle: 0.0,
            bombers: Vec::new(),
            bombs: Vec::new(),
            projectiles: Vec::new(),
            explosion_particles: Vec::new(),
            smoke_particles: Vec::new(),
        }
    }

    /// Full reset back to a fresh Playing session. The RNG stream
    /// continues where it left off; the run seed is unchanged.
    pub fn restart(&mut self) {
        self.phase = GamePhase::Playing;
        self.health = MAX_HEALTH;
        self.score = 0;
        self.fire_cooldown = 0.0;
        self.bomber_spawn_cooldown = 0.0;
        self.aim_angle = 0.0;
        self.bombers.clear();
        self.bombs.clear();
        self.projectiles.clear();
        self.explosion_particles.clear();
        self.smoke_particles.clear();
    }
}
