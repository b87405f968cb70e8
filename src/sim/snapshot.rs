//! Immutable per-tick view of the session
//!
//! The renderer and HUD never touch live entities; they draw from this
//! snapshot, captured once per tick after the update completes. The whole
//! view is serializable so headless runs can dump frames for inspection.

use glam::Vec2;
use serde::Serialize;

use super::state::{BomberState, Facing, GamePhase, GameState, Particle};
use crate::consts::RELOAD_TIME;

/// A particle with its fade factor pre-computed for rendering
#[derive(Debug, Clone, Serialize)]
pub struct ParticleView {
    pub pos: Vec2,
    /// Linear fade in [0, 1]; 1 is fully opaque
    pub fade: f32,
}

impl ParticleView {
    fn of(particle: &Particle) -> Self {
        Self {
            pos: particle.pos,
            fade: particle.fade(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct BomberView {
    pub pos: Vec2,
    pub facing: Facing,
    /// `Some` while the bomber renders as an explosion cloud instead of a
    /// sprite
    pub explosion: Option<Vec<ParticleView>>,
}

/// Everything a presentation layer needs for one frame
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub phase: GamePhase,
    pub health: i32,
    pub score: u32,
    /// 0 just fired, 1 ready; drives the reload-progress bar
    pub reload_progress: f32,
    /// Clamped aim angle in radians, for the gun sprite and aim line
    pub aim_angle: f32,
    pub projectiles: Vec<Vec2>,
    pub bombers: Vec<BomberView>,
    pub bombs: Vec<Vec2>,
    pub explosion_particles: Vec<ParticleView>,
    pub smoke_particles: Vec<ParticleView>,
}

impl Snapshot {
    pub fn capture(state: &GameState) -> Self {
        let reload_progress = if state.fire_cooldown <= 0.0 {
            1.0
        } else {
            1.0 - state.fire_cooldown / RELOAD_TIME
        };

        let bombers = state
            .bombers
            .iter()
            .filter(|b| !matches!(b.state, BomberState::Removed))
            .map(|b| BomberView {
                pos: b.pos,
                facing: b.facing,
                explosion: match &b.state {
                    BomberState::Exploding { particles, .. } => Some(
                        particles
                            .iter()
                            .filter(|p| p.is_alive())
                            .map(ParticleView::of)
                            .collect(),
                    ),
                    _ => None,
                },
            })
            .collect();

        Self {
            phase: state.phase,
            health: state.health,
            score: state.score,
            reload_progress,
            aim_angle: state.aim_angle,
            projectiles: state.projectiles.iter().map(|p| p.pos).collect(),
            bombers,
            bombs: state.bombs.iter().map(|b| b.pos).collect(),
            explosion_particles: state
                .explosion_particles
                .iter()
                .map(ParticleView::of)
                .collect(),
            smoke_particles: state.smoke_particles.iter().map(ParticleView::of).collect(),
        }
    }
}
