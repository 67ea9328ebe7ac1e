//! Projectiles
//!
//! Fired along the toroidally-shortest direction to the target at the moment
//! of firing; unguided after that. A projectile dies on its first hit or
//! after spending its travel budget.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::sim::unit::Team;
use crate::{wrap_position, wrapped_delta};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Projectile {
    pub id: u32,
    pub team: Team,
    pub pos: Vec2,
    pub vel: Vec2,
    pub damage: f32,
    /// World distance covered so far
    pub traveled: f32,
    pub max_distance: f32,
    pub alive: bool,
}

impl Projectile {
    /// Aim from `from` at `toward` across the wrapped world. A degenerate
    /// zero-length aim yields a stationary projectile that expires in place.
    pub fn fire(
        id: u32,
        team: Team,
        from: Vec2,
        toward: Vec2,
        speed: f32,
        damage: f32,
        max_distance: f32,
        width: f32,
        height: f32,
    ) -> Self {
        let aim = wrapped_delta(from, toward, width, height);
        let vel = if aim.length_squared() > 0.0 {
            aim.normalize() * speed
        } else {
            Vec2::ZERO
        };
        Self {
            id,
            team,
            pos: from,
            vel,
            damage,
            traveled: 0.0,
            max_distance,
            alive: true,
        }
    }

    /// Advance one timestep, wrapping position and spending travel budget
    pub fn advance(&mut self, dt: f32, width: f32, height: f32) {
        let step = self.vel * dt;
        self.pos = wrap_position(self.pos + step, width, height);
        self.traveled += step.length();
        if self.traveled > self.max_distance {
            self.alive = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const W: f32 = 800.0;
    const H: f32 = 600.0;

    #[test]
    fn test_fire_aims_across_the_seam() {
        let p = Projectile::fire(
            1,
            Team::Friendly,
            Vec2::new(790.0, 300.0),
            Vec2::new(10.0, 300.0),
            250.0,
            10.0,
            200.0,
            W,
            H,
        );
        // Shortest path is rightward through the edge, not back across the map
        assert!(p.vel.x > 0.0);
        assert!((p.vel.length() - 250.0).abs() < 1e-3);
    }

    #[test]
    fn test_advance_wraps_position() {
        let mut p = Projectile::fire(
            1,
            Team::Enemy,
            Vec2::new(795.0, 300.0),
            Vec2::new(50.0, 300.0),
            250.0,
            8.0,
            200.0,
            W,
            H,
        );
        p.advance(0.1, W, H); // 25 units right, past the edge
        assert!(p.pos.x < 25.0);
        assert!(p.alive);
    }

    #[test]
    fn test_expires_after_travel_budget() {
        let mut p = Projectile::fire(
            1,
            Team::Friendly,
            Vec2::new(100.0, 100.0),
            Vec2::new(400.0, 100.0),
            250.0,
            10.0,
            200.0,
            W,
            H,
        );
        // 250 units/s: the 200-unit budget runs out around 0.8s
        for _ in 0..47 {
            p.advance(1.0 / 60.0, W, H); // ~195.8 units
        }
        assert!(p.alive);
        for _ in 0..3 {
            p.advance(1.0 / 60.0, W, H); // ~208.3 units
        }
        assert!(!p.alive);
    }

    #[test]
    fn test_degenerate_aim_is_stationary() {
        let at = Vec2::new(200.0, 200.0);
        let p = Projectile::fire(1, Team::Friendly, at, at, 250.0, 10.0, 200.0, W, H);
        assert_eq!(p.vel, Vec2::ZERO);
    }
}
