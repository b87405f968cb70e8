//! Collision detection and resolution
//!
//! Runs once per tick, after all entities have advanced. The scan order is
//! fixed (bomb/projectile, bomb/ground, projectile/bomber) because it
//! decides double-hit edge cases: a bomb intercepted in step 1 can no
//! longer damage the ground in step 2, and a projectile consumed by a bomb
//! can no longer destroy a bomber.
//!
//! Removal is collect-then-filter: entities are marked during the scan and
//! the collections are compacted in one pass afterwards, so no list is
//! ever mutated while it is being iterated.
//!
//! Note the asymmetry carried over from the original tuning: bombs are hit
//! by center distance, bombers by point-in-rect against the sprite bounds.

use glam::Vec2;
use rand::Rng;

use super::state::{explosion_burst, Bomber, GameEvent, GamePhase, GameState};
use crate::consts::*;

/// Euclidean center-distance test for round entities
#[inline]
pub fn circles_overlap(a: Vec2, radius_a: f32, b: Vec2, radius_b: f32) -> bool {
    a.distance(b) < radius_a + radius_b
}

/// Point containment in a bomber's sprite rectangle
pub fn bomber_contains(bomber: &Bomber, point: Vec2) -> bool {
    let half = Vec2::new(BOMBER_WIDTH / 2.0, BOMBER_HEIGHT / 2.0);
    let min = bomber.pos - half;
    let max = bomber.pos + half;
    point.x >= min.x && point.x <= max.x && point.y >= min.y && point.y <= max.y
}

/// Resolve all collisions for this tick and apply their effects: scoring,
/// damage, particle bursts, phase transition. Pushes one
/// [`GameEvent::ExplosionOccurred`] per destruction.
pub fn resolve(state: &mut GameState, events: &mut Vec<GameEvent>) {
    let mut bomb_removed = vec![false; state.bombs.len()];
    let mut projectile_removed = vec![false; state.projectiles.len()];

    // 1. Bomb vs projectile: at most one projectile consumed per bomb.
    for (bomb_idx, bomb) in state.bombs.iter().enumerate() {
        for (proj_idx, proj) in state.projectiles.iter().enumerate() {
            if projectile_removed[proj_idx] {
                continue;
            }
            if circles_overlap(proj.pos, PROJECTILE_RADIUS, bomb.pos, BOMB_RADIUS) {
                projectile_removed[proj_idx] = true;
                bomb_removed[bomb_idx] = true;
                let burst = explosion_burst(&mut state.rng, bomb.pos);
                state.explosion_particles.extend(burst);
                events.push(GameEvent::ExplosionOccurred);
                break;
            }
        }
    }

    // 2. Bomb vs ground, for bombs that survived step 1.
    for (bomb_idx, bomb) in state.bombs.iter().enumerate() {
        if bomb_removed[bomb_idx] || bomb.pos.y < GROUND_Y {
            continue;
        }
        bomb_removed[bomb_idx] = true;
        let impact = Vec2::new(bomb.pos.x, GROUND_Y);
        let burst = explosion_burst(&mut state.rng, impact);
        state.explosion_particles.extend(burst);
        events.push(GameEvent::ExplosionOccurred);

        let damage = state.rng.random_range(GROUND_DAMAGE_MIN..=GROUND_DAMAGE_MAX);
        state.health -= damage;
        if state.health <= 0 {
            state.health = 0;
            state.phase = GamePhase::GameOver;
            log::info!("health depleted, game over at score {}", state.score);
        }
    }

    // 3. Projectile vs bomber: flying bombers only, first match wins.
    for bomber in state.bombers.iter_mut() {
        if !bomber.is_flying() {
            continue;
        }
        for (proj_idx, proj) in state.projectiles.iter().enumerate() {
            if projectile_removed[proj_idx] {
                continue;
            }
            if bomber_contains(bomber, proj.pos) {
                projectile_removed[proj_idx] = true;
                bomber.explode(&mut state.rng);
                state.score += 1;
                events.push(GameEvent::ExplosionOccurred);
                break;
            }
        }
    }

    // Compact the marked collections.
    let mut idx = 0;
    state.bombs.retain(|_| {
        let keep = !bomb_removed[idx];
        idx += 1;
        keep
    });
    let mut idx = 0;
    state.projectiles.retain(|_| {
        let keep = !projectile_removed[idx];
        idx += 1;
        keep
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{Bomb, BomberState, Facing, Projectile};
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn flying_bomber(pos: Vec2) -> Bomber {
        Bomber {
            pos,
            vel: Vec2::new(BOMBER_SPEED, 0.0),
            facing: Facing::Right,
            drop_timer: 100.0,
            smoke_timer: 0.0,
            state: BomberState::Flying,
        }
    }

    fn projectile_at(pos: Vec2) -> Projectile {
        Projectile {
            pos,
            vel: Vec2::new(0.0, -PROJECTILE_SPEED),
        }
    }

    #[test]
    fn test_circles_overlap_threshold() {
        // Combined radius 27: distance 30 misses, 25 hits
        let a = Vec2::new(500.0, 730.0);
        assert!(!circles_overlap(a, PROJECTILE_RADIUS, Vec2::new(500.0, 700.0), BOMB_RADIUS));
        assert!(circles_overlap(a, PROJECTILE_RADIUS, Vec2::new(500.0, 705.0), BOMB_RADIUS));
    }

    #[test]
    fn test_bomber_contains_sprite_bounds() {
        let b = flying_bomber(Vec2::new(400.0, 200.0));
        assert!(bomber_contains(&b, Vec2::new(400.0, 200.0)));
        assert!(bomber_contains(&b, Vec2::new(400.0 - BOMBER_WIDTH / 2.0, 200.0)));
        assert!(!bomber_contains(&b, Vec2::new(400.0 + BOMBER_WIDTH / 2.0 + 1.0, 200.0)));
        assert!(!bomber_contains(&b, Vec2::new(400.0, 200.0 + BOMBER_HEIGHT / 2.0 + 1.0)));
    }

    #[test]
    fn test_interception_removes_both_and_bursts() {
        let mut state = GameState::new(1);
        state.bombs.push(Bomb::new(Vec2::new(500.0, 400.0), 0));
        state.projectiles.push(projectile_at(Vec2::new(500.0, 410.0)));

        let mut events = Vec::new();
        resolve(&mut state, &mut events);

        assert!(state.bombs.is_empty());
        assert!(state.projectiles.is_empty());
        assert_eq!(state.explosion_particles.len(), PARTICLE_COUNT);
        assert_eq!(events, vec![GameEvent::ExplosionOccurred]);
        // Interception never damages the player
        assert_eq!(state.health, MAX_HEALTH);
    }

    #[test]
    fn test_projectile_consumed_at_most_once() {
        // One projectile overlapping two bombs: only the first bomb is
        // intercepted, the second survives the tick.
        let mut state = GameState::new(1);
        state.bombs.push(Bomb::new(Vec2::new(500.0, 400.0), 0));
        state.bombs.push(Bomb::new(Vec2::new(505.0, 400.0), 0));
        state.projectiles.push(projectile_at(Vec2::new(500.0, 405.0)));

        let mut events = Vec::new();
        resolve(&mut state, &mut events);

        assert_eq!(state.bombs.len(), 1);
        assert!(state.projectiles.is_empty());
        assert_eq!(events.len(), 1);
    }

    #[test]
    fn test_intercepted_bomb_skips_ground_check() {
        // A bomb below the ground line that is also intercepted must not
        // deal damage: step 1 wins over step 2.
        let mut state = GameState::new(1);
        state.bombs.push(Bomb::new(Vec2::new(500.0, GROUND_Y + 5.0), 0));
        state.projectiles.push(projectile_at(Vec2::new(500.0, GROUND_Y + 5.0)));

        let mut events = Vec::new();
        resolve(&mut state, &mut events);

        assert!(state.bombs.is_empty());
        assert_eq!(state.health, MAX_HEALTH);
        assert_eq!(events.len(), 1);
    }

    #[test]
    fn test_ground_impact_damages_and_bursts_at_ground_line() {
        let mut state = GameState::new(1);
        state.bombs.push(Bomb::new(Vec2::new(321.0, GROUND_Y + 2.0), 0));

        let mut events = Vec::new();
        resolve(&mut state, &mut events);

        assert!(state.bombs.is_empty());
        assert!(state.health < MAX_HEALTH);
        assert!(state.health >= MAX_HEALTH - GROUND_DAMAGE_MAX);
        assert_eq!(events, vec![GameEvent::ExplosionOccurred]);
        // Burst is centered on (bomb.x, GROUND_Y), not the bomb's position
        assert_eq!(state.explosion_particles.len(), PARTICLE_COUNT);
        for p in &state.explosion_particles {
            assert_eq!(p.pos, Vec2::new(321.0, GROUND_Y));
        }
    }

    #[test]
    fn test_ground_impact_can_end_the_game() {
        let mut state = GameState::new(1);
        state.health = 1;
        state.bombs.push(Bomb::new(Vec2::new(500.0, GROUND_Y), 0));

        let mut events = Vec::new();
        resolve(&mut state, &mut events);

        assert_eq!(state.health, 0);
        assert_eq!(state.phase, GamePhase::GameOver);
    }

    #[test]
    fn test_projectile_destroys_flying_bomber() {
        let mut state = GameState::new(1);
        state.bombers.push(flying_bomber(Vec2::new(400.0, 200.0)));
        state.projectiles.push(projectile_at(Vec2::new(400.0, 200.0)));

        let mut events = Vec::new();
        resolve(&mut state, &mut events);

        assert_eq!(state.score, 1);
        assert!(state.projectiles.is_empty());
        assert!(matches!(state.bombers[0].state, BomberState::Exploding { .. }));
        assert_eq!(events, vec![GameEvent::ExplosionOccurred]);
    }

    #[test]
    fn test_exploding_bomber_no_longer_collides() {
        let mut state = GameState::new(1);
        let mut bomber = flying_bomber(Vec2::new(400.0, 200.0));
        bomber.explode(&mut Pcg32::seed_from_u64(9));
        state.bombers.push(bomber);
        state.projectiles.push(projectile_at(Vec2::new(400.0, 200.0)));

        let mut events = Vec::new();
        resolve(&mut state, &mut events);

        assert_eq!(state.score, 0);
        assert_eq!(state.projectiles.len(), 1);
        assert!(events.is_empty());
    }

    #[test]
    fn test_bomb_interception_beats_bomber_hit() {
        // A projectile overlapping both a bomb and a bomber is consumed by
        // the bomb scan first; the bomber survives.
        let mut state = GameState::new(1);
        state.bombers.push(flying_bomber(Vec2::new(400.0, 200.0)));
        state.bombs.push(Bomb::new(Vec2::new(400.0, 210.0), 0));
        state.projectiles.push(projectile_at(Vec2::new(400.0, 205.0)));

        let mut events = Vec::new();
        resolve(&mut state, &mut events);

        assert!(state.bombs.is_empty());
        assert!(state.bombers[0].is_flying());
        assert_eq!(state.score, 0);
        assert_eq!(events.len(), 1);
    }
}
