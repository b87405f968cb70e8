//! Single-threaded simulation module
//!
//! All gameplay logic lives here. One logical tick per rendered frame:
//! - No rendering or platform dependencies
//! - Seeded RNG owned by the session
//! - Every timer and velocity is per-second, scaled by `dt`
//! - The whole update is synchronous; nothing blocks inside a tick

pub mod collision;
pub mod snapshot;
pub mod state;
pub mod tick;

pub use collision::{bomber_contains, circles_overlap};
pub use snapshot::{BomberView, ParticleView, Snapshot};
pub use state::{
    Bomb, Bomber, BomberState, Facing, GameEvent, GamePhase, GameState, Particle, ParticlePreset,
    Projectile, EXPLOSION_PRESET, SMOKE_PRESET,
};
pub use tick::{tick, TickInput};
