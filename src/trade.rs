//! Ship movement and cargo trade sandbox
//!
//! A small self-contained toy: ships steer smoothly toward click targets
//! with thrust, inertia and friction, and carry a named-item cargo hold plus
//! a hull layout of typed part records (data only, for an external renderer).
//! Notifications go through an explicit per-ship event queue instead of a
//! process-wide observer list; the embedding caller drains them.

use glam::Vec2;
use rand::Rng;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

/// Maximum engine thrust (per-tick velocity gain at full burn)
pub const MAX_THRUST: f32 = 100.0;
/// Velocity retained each tick
pub const FRICTION: f32 = 0.98;
/// Distance at which a ship counts as arrived at its target
pub const ARRIVAL_RADIUS: f32 = 10.0;
/// Fraction of the remaining angle turned per tick
const TURN_SMOOTHING: f32 = 0.1;
/// Fraction of max thrust applied while seeking a target
const SEEK_THRUST: f32 = 0.1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CargoItem {
    pub name: String,
    pub quantity: u32,
}

/// Named-item cargo ledger; entries merge by name and vanish at zero
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CargoHold {
    items: Vec<CargoItem>,
}

impl CargoHold {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, name: &str, quantity: u32) {
        if quantity == 0 {
            return;
        }
        match self.items.iter_mut().find(|item| item.name == name) {
            Some(item) => item.quantity += quantity,
            None => self.items.push(CargoItem {
                name: name.to_string(),
                quantity,
            }),
        }
    }

    /// Remove up to `quantity` units, returning how many were actually removed
    pub fn remove(&mut self, name: &str, quantity: u32) -> u32 {
        let Some(index) = self.items.iter().position(|item| item.name == name) else {
            return 0;
        };
        let item = &mut self.items[index];
        let removed = item.quantity.min(quantity);
        item.quantity -= removed;
        if item.quantity == 0 {
            self.items.remove(index);
        }
        removed
    }

    pub fn quantity(&self, name: &str) -> u32 {
        self.items
            .iter()
            .find(|item| item.name == name)
            .map(|item| item.quantity)
            .unwrap_or(0)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CargoItem> {
        self.items.iter()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PartKind {
    Hull,
    Thruster,
}

/// One piece of a ship's hull layout, relative to the ship's origin.
/// Pure data for an external renderer; nothing here draws it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HullPart {
    pub kind: PartKind,
    pub offset: Vec2,
    /// Degrees, relative to the ship's heading
    pub rotation: f32,
    pub size: Vec2,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TradeEvent {
    CargoAdded { item: String, quantity: u32 },
    CargoRemoved { item: String, quantity: u32 },
    Arrived { pos: Vec2 },
}

/// A trading ship
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ship {
    pub pos: Vec2,
    /// Heading in degrees
    pub rotation: f32,
    pub vel: Vec2,
    pub thrust: f32,
    pub target: Option<Vec2>,
    pub cargo: CargoHold,
    pub parts: Vec<HullPart>,
    /// Events since the last drain
    pub events: Vec<TradeEvent>,
}

impl Ship {
    /// New ship with the standard starter cargo and hull layout
    pub fn new(pos: Vec2) -> Self {
        let mut cargo = CargoHold::new();
        cargo.add("Fuel", 100);
        cargo.add("Food", 50);
        cargo.add("Metal", 30);
        Self {
            pos,
            rotation: 0.0,
            vel: Vec2::ZERO,
            thrust: 0.0,
            target: None,
            cargo,
            parts: vec![
                HullPart {
                    kind: PartKind::Hull,
                    offset: Vec2::ZERO,
                    rotation: 0.0,
                    size: Vec2::new(40.0, 20.0),
                },
                HullPart {
                    kind: PartKind::Thruster,
                    offset: Vec2::new(-20.0, -10.0),
                    rotation: 180.0,
                    size: Vec2::new(10.0, 5.0),
                },
                HullPart {
                    kind: PartKind::Thruster,
                    offset: Vec2::new(20.0, -10.0),
                    rotation: 180.0,
                    size: Vec2::new(10.0, 5.0),
                },
            ],
            events: Vec::new(),
        }
    }

    pub fn add_part(&mut self, part: HullPart) {
        self.parts.push(part);
    }

    /// Remove every part of the given kind, returning how many were removed
    pub fn remove_parts(&mut self, kind: PartKind) -> usize {
        let before = self.parts.len();
        self.parts.retain(|part| part.kind != kind);
        before - self.parts.len()
    }

    pub fn set_target(&mut self, target: Vec2) {
        self.target = Some(target);
    }

    pub fn add_cargo(&mut self, name: &str, quantity: u32) {
        self.cargo.add(name, quantity);
        self.events.push(TradeEvent::CargoAdded {
            item: name.to_string(),
            quantity,
        });
    }

    pub fn remove_cargo(&mut self, name: &str, quantity: u32) -> u32 {
        let removed = self.cargo.remove(name, quantity);
        if removed > 0 {
            self.events.push(TradeEvent::CargoRemoved {
                item: name.to_string(),
                quantity: removed,
            });
        }
        removed
    }

    pub fn drain_events(&mut self) -> Vec<TradeEvent> {
        std::mem::take(&mut self.events)
    }

    /// Advance one tick: turn toward the target, burn, coast with friction
    pub fn update(&mut self) {
        if let Some(target) = self.target {
            let to_target = target - self.pos;
            let angle_to_target = to_target.y.atan2(to_target.x).to_degrees();
            let mut angle_diff = angle_to_target - self.rotation;
            if angle_diff > 180.0 {
                angle_diff -= 360.0;
            } else if angle_diff < -180.0 {
                angle_diff += 360.0;
            }
            self.rotation += angle_diff * TURN_SMOOTHING;

            self.thrust = MAX_THRUST * SEEK_THRUST;
            let heading = self.rotation.to_radians();
            self.vel += Vec2::new(heading.cos(), heading.sin()) * self.thrust;

            if to_target.length() < ARRIVAL_RADIUS {
                self.target = None;
                self.thrust = 0.0;
                self.vel = Vec2::ZERO;
                self.events.push(TradeEvent::Arrived { pos: self.pos });
            }
        }

        // Inertia with friction
        self.pos += self.vel;
        self.vel *= FRICTION;
    }
}

/// Wandering autopilot: picks a nearby random waypoint whenever the ship has
/// no target. Deterministic for a given seed.
#[derive(Debug)]
pub struct WanderAi {
    rng: Pcg32,
}

impl WanderAi {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    pub fn drive(&mut self, ship: &mut Ship) {
        if ship.target.is_none() {
            let dx: f32 = self.rng.random_range(-50.0..50.0);
            let dy: f32 = self.rng.random_range(-50.0..50.0);
            ship.set_target(ship.pos + Vec2::new(dx, dy));
        }
        ship.update();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cargo_merges_by_name() {
        let mut hold = CargoHold::new();
        hold.add("Fuel", 10);
        hold.add("Fuel", 5);
        assert_eq!(hold.quantity("Fuel"), 15);
        assert_eq!(hold.iter().count(), 1);
    }

    #[test]
    fn test_cargo_remove_saturates() {
        let mut hold = CargoHold::new();
        hold.add("Food", 10);
        assert_eq!(hold.remove("Food", 25), 10);
        assert_eq!(hold.quantity("Food"), 0);
        // Emptied entries disappear
        assert_eq!(hold.iter().count(), 0);
        assert_eq!(hold.remove("Missing", 5), 0);
    }

    #[test]
    fn test_ship_turns_toward_target() {
        let mut ship = Ship::new(Vec2::new(400.0, 300.0));
        // Target directly below: +90 degrees in this coordinate system
        ship.set_target(Vec2::new(400.0, 500.0));
        let before = (90.0 - ship.rotation).abs();
        ship.update();
        let after = (90.0 - ship.rotation).abs();
        assert!(after < before);
    }

    #[test]
    fn test_ship_arrives_and_stops() {
        let mut ship = Ship::new(Vec2::new(400.0, 300.0));
        ship.set_target(Vec2::new(450.0, 300.0));
        for _ in 0..600 {
            ship.update();
            if ship.target.is_none() {
                break;
            }
        }
        assert!(ship.target.is_none(), "never arrived");
        assert!(
            ship.drain_events()
                .iter()
                .any(|e| matches!(e, TradeEvent::Arrived { .. }))
        );
    }

    #[test]
    fn test_cargo_changes_emit_events() {
        let mut ship = Ship::new(Vec2::new(0.0, 0.0));
        ship.drain_events();
        ship.add_cargo("Ore", 7);
        let removed = ship.remove_cargo("Ore", 3);
        assert_eq!(removed, 3);
        assert_eq!(
            ship.drain_events(),
            vec![
                TradeEvent::CargoAdded {
                    item: "Ore".into(),
                    quantity: 7
                },
                TradeEvent::CargoRemoved {
                    item: "Ore".into(),
                    quantity: 3
                },
            ]
        );
        // Removing nothing emits nothing
        ship.remove_cargo("Missing", 1);
        assert!(ship.drain_events().is_empty());
    }

    #[test]
    fn test_default_hull_layout() {
        let ship = Ship::new(Vec2::ZERO);
        assert_eq!(
            ship.parts
                .iter()
                .filter(|p| p.kind == PartKind::Hull)
                .count(),
            1
        );
        assert_eq!(
            ship.parts
                .iter()
                .filter(|p| p.kind == PartKind::Thruster)
                .count(),
            2
        );
        // Thrusters point backwards
        assert!(
            ship.parts
                .iter()
                .filter(|p| p.kind == PartKind::Thruster)
                .all(|p| p.rotation == 180.0)
        );
    }

    #[test]
    fn test_add_and_remove_parts_by_kind() {
        let mut ship = Ship::new(Vec2::ZERO);
        ship.add_part(HullPart {
            kind: PartKind::Thruster,
            offset: Vec2::new(0.0, -12.0),
            rotation: 180.0,
            size: Vec2::new(10.0, 5.0),
        });
        assert_eq!(ship.parts.len(), 4);
        // Removes every part of that kind, not just one
        assert_eq!(ship.remove_parts(PartKind::Thruster), 3);
        assert_eq!(ship.parts.len(), 1);
        assert_eq!(ship.remove_parts(PartKind::Thruster), 0);
    }

    #[test]
    fn test_wander_is_deterministic_per_seed() {
        let mut a = Ship::new(Vec2::new(200.0, 150.0));
        let mut b = Ship::new(Vec2::new(200.0, 150.0));
        let mut ai_a = WanderAi::new(7);
        let mut ai_b = WanderAi::new(7);
        for _ in 0..120 {
            ai_a.drive(&mut a);
            ai_b.drive(&mut b);
        }
        assert_eq!(a, b);

        let mut c = Ship::new(Vec2::new(200.0, 150.0));
        let mut ai_c = WanderAi::new(8);
        for _ in 0..120 {
            ai_c.drive(&mut c);
        }
        assert_ne!(a.pos, c.pos);
    }
}
