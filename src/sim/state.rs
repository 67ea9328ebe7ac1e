//! Skirmish state and events
//!
//! Everything the tick loop needs lives here: the entity containers, the
//! influence field, an entity-id allocator and the per-tick event queue.

use serde::{Deserialize, Serialize};

use glam::Vec2;

use crate::config::{ConfigError, SimConfig};
use crate::sim::field::InfluenceField;
use crate::sim::obstacle::Obstacle;
use crate::sim::projectile::Projectile;
use crate::sim::unit::{Team, Unit};
use crate::wrap_position;

/// Things that happened during a tick, for the embedding caller to drain.
/// Replaces ad-hoc stdout notification with an explicit queue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SkirmishEvent {
    UnitSpawned { id: u32, team: Team },
    ProjectileFired { shooter: u32, team: Team },
    UnitKilled { id: u32, team: Team },
}

/// Complete simulation state (deterministic, serializable)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkirmishState {
    pub config: SimConfig,
    /// Recomputed from the unit snapshot at the start of every tick
    pub field: InfluenceField,
    pub units: Vec<Unit>,
    pub projectiles: Vec<Projectile>,
    pub obstacles: Vec<Obstacle>,
    /// Events since the last drain
    pub events: Vec<SkirmishEvent>,
    /// Simulation tick counter
    pub time_ticks: u64,
    next_id: u32,
}

impl SkirmishState {
    pub fn new(config: SimConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let field = InfluenceField::new(config.field.clone())?;
        Ok(Self {
            config,
            field,
            units: Vec::new(),
            projectiles: Vec::new(),
            obstacles: Vec::new(),
            events: Vec::new(),
            time_ticks: 0,
            next_id: 1,
        })
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Spawn a unit, wrapping the position into the world
    pub fn spawn_unit(&mut self, team: Team, pos: Vec2) -> u32 {
        let id = self.next_entity_id();
        let pos = wrap_position(pos, self.config.field.width, self.config.field.height);
        self.units.push(Unit::new(id, team, pos));
        self.events.push(SkirmishEvent::UnitSpawned { id, team });
        id
    }

    pub fn unit(&self, id: u32) -> Option<&Unit> {
        self.units.iter().find(|u| u.id == id)
    }

    pub fn unit_mut(&mut self, id: u32) -> Option<&mut Unit> {
        self.units.iter_mut().find(|u| u.id == id)
    }

    pub fn live_count(&self, team: Team) -> usize {
        self.units
            .iter()
            .filter(|u| u.alive && u.team == team)
            .count()
    }

    /// Take all pending events, leaving the queue empty
    pub fn drain_events(&mut self) -> Vec<SkirmishEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_invalid_config() {
        let mut config = SimConfig::default();
        config.field.cell_size = -1.0;
        assert!(SkirmishState::new(config).is_err());
    }

    #[test]
    fn test_spawn_wraps_position_and_emits_event() {
        let mut state = SkirmishState::new(SimConfig::default()).unwrap();
        let id = state.spawn_unit(Team::Friendly, Vec2::new(-10.0, 300.0));
        assert_eq!(state.unit(id).unwrap().pos, Vec2::new(790.0, 300.0));
        assert_eq!(
            state.drain_events(),
            vec![SkirmishEvent::UnitSpawned {
                id,
                team: Team::Friendly
            }]
        );
        // Drained
        assert!(state.events.is_empty());
    }

    #[test]
    fn test_entity_ids_are_unique_and_monotonic() {
        let mut state = SkirmishState::new(SimConfig::default()).unwrap();
        let a = state.spawn_unit(Team::Friendly, Vec2::new(100.0, 100.0));
        let b = state.spawn_unit(Team::Enemy, Vec2::new(700.0, 500.0));
        assert!(b > a);
    }

    #[test]
    fn test_live_count_ignores_dead() {
        let mut state = SkirmishState::new(SimConfig::default()).unwrap();
        let a = state.spawn_unit(Team::Enemy, Vec2::new(100.0, 100.0));
        state.spawn_unit(Team::Enemy, Vec2::new(200.0, 100.0));
        state.unit_mut(a).unwrap().take_damage(200.0);
        assert_eq!(state.live_count(Team::Enemy), 1);
    }
}
