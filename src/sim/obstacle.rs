//! Axis-aligned terrain obstacles
//!
//! Obstacles only block unit movement; projectiles fly over them.

use glam::Vec2;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub min: Vec2,
    pub max: Vec2,
}

impl Obstacle {
    pub fn new(position: Vec2, size: Vec2) -> Self {
        Self {
            min: position,
            max: position + size,
        }
    }

    /// AABB overlap test against another box given by its corners
    pub fn intersects(&self, min: Vec2, max: Vec2) -> bool {
        self.min.x < max.x && min.x < self.max.x && self.min.y < max.y && min.y < self.max.y
    }

    pub fn contains(&self, point: Vec2) -> bool {
        (self.min.x..self.max.x).contains(&point.x) && (self.min.y..self.max.y).contains(&point.y)
    }
}

/// Whether a square footprint centered at `center` overlaps any obstacle
pub fn blocked(obstacles: &[Obstacle], center: Vec2, half_extent: f32) -> bool {
    let half = Vec2::splat(half_extent);
    obstacles
        .iter()
        .any(|o| o.intersects(center - half, center + half))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intersects() {
        let o = Obstacle::new(Vec2::new(300.0, 200.0), Vec2::new(200.0, 50.0));
        assert!(o.intersects(Vec2::new(290.0, 190.0), Vec2::new(310.0, 210.0)));
        assert!(!o.intersects(Vec2::new(0.0, 0.0), Vec2::new(100.0, 100.0)));
        // Touching edges do not count as overlap
        assert!(!o.intersects(Vec2::new(100.0, 100.0), Vec2::new(300.0, 200.0)));
    }

    #[test]
    fn test_contains() {
        let o = Obstacle::new(Vec2::new(300.0, 200.0), Vec2::new(200.0, 50.0));
        assert!(o.contains(Vec2::new(400.0, 225.0)));
        assert!(!o.contains(Vec2::new(299.0, 225.0)));
    }

    #[test]
    fn test_blocked_footprint() {
        let obstacles = [Obstacle::new(Vec2::new(300.0, 200.0), Vec2::new(200.0, 50.0))];
        assert!(blocked(&obstacles, Vec2::new(295.0, 210.0), 10.0));
        assert!(!blocked(&obstacles, Vec2::new(100.0, 100.0), 10.0));
    }
}
