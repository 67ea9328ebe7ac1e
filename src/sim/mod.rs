//! Deterministic simulation module
//!
//! All skirmish logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Fixed per-tick phase order (field recompute before any sampling)
//! - Stable iteration order (by entity ID)
//! - No rendering or platform dependencies

pub mod field;
pub mod obstacle;
pub mod projectile;
pub mod state;
pub mod tick;
pub mod unit;

pub use field::{Contributor, InfluenceField};
pub use obstacle::{Obstacle, blocked};
pub use projectile::Projectile;
pub use state::{SkirmishEvent, SkirmishState};
pub use tick::{MoveOrder, TickInput, tick};
pub use unit::{Behavior, COMPASS_DIRS, Team, Unit, decide, lowest_influence_direction};
