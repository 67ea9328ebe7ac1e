//! Skirmish - a headless RTS sandbox with influence-map driven AI
//!
//! Core modules:
//! - `sim`: Deterministic simulation (influence field, units, projectiles)
//! - `config`: Construction-time configuration and validation
//! - `trade`: Ship movement / cargo trade sandbox
//! - `program`: Toy shape-program interpreter (data in, shape descriptions out)
//! - `tiles`: Flyweight tile set and tile map
//!
//! There is no rendering, windowing or asset loading here. A renderer (not
//! part of this crate) can iterate the influence grid and the shape/tile data
//! read-only; the library itself only logs through the `log` facade.

pub mod config;
pub mod program;
pub mod sim;
pub mod tiles;
pub mod trade;

pub use config::{BoundaryPolicy, ConfigError, FieldConfig, SimConfig, UnitTuning};
pub use sim::{InfluenceField, SkirmishState, Team, TickInput, tick};

use glam::Vec2;

/// World and simulation constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;

    /// Default world dimensions (toroidal unless configured otherwise)
    pub const WORLD_WIDTH: f32 = 800.0;
    pub const WORLD_HEIGHT: f32 = 600.0;

    /// Default influence grid cell size (20 x 15 cells over the default world)
    pub const CELL_SIZE: f32 = 40.0;
    /// Default influence spread radius, in cells
    pub const INFLUENCE_RADIUS: i32 = 3;

    /// Unit defaults
    pub const UNIT_MAX_HEALTH: f32 = 100.0;
    pub const UNIT_HIT_RADIUS: f32 = 10.0;
}

/// Wrap a position into `[0, width) x [0, height)` (toroidal world)
#[inline]
pub fn wrap_position(pos: Vec2, width: f32, height: f32) -> Vec2 {
    Vec2::new(pos.x.rem_euclid(width), pos.y.rem_euclid(height))
}

/// Shortest displacement from `from` to `to` on a torus of the given size
#[inline]
pub fn wrapped_delta(from: Vec2, to: Vec2, width: f32, height: f32) -> Vec2 {
    let mut delta = to - from;
    if delta.x > width / 2.0 {
        delta.x -= width;
    } else if delta.x < -width / 2.0 {
        delta.x += width;
    }
    if delta.y > height / 2.0 {
        delta.y -= height;
    } else if delta.y < -height / 2.0 {
        delta.y += height;
    }
    delta
}

/// Shortest distance between two points on a torus of the given size
#[inline]
pub fn wrapped_distance(a: Vec2, b: Vec2, width: f32, height: f32) -> f32 {
    wrapped_delta(a, b, width, height).length()
}
