//! Units and behavior selection
//!
//! Units are plain data plus a closed set of behaviors; there is no trait
//! hierarchy. The behavior state machine is driven by influence-field
//! samples but lives entirely outside the field - the field is a pure read
//! dependency here.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::config::UnitTuning;
use crate::consts::UNIT_MAX_HEALTH;
use crate::sim::field::{Contributor, InfluenceField};
use crate::{wrap_position, wrapped_distance};

/// Faction marker. Determines the sign of projected influence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Team {
    Friendly,
    Enemy,
}

impl Team {
    /// Signed affiliation: +1 friendly, -1 hostile
    pub fn sign(self) -> f32 {
        match self {
            Team::Friendly => 1.0,
            Team::Enemy => -1.0,
        }
    }

    pub fn opposes(self, other: Team) -> bool {
        self != other
    }
}

/// Behavior states for field-driven units
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Behavior {
    #[default]
    Idle,
    /// Close on the nearest opposing unit and fire in range
    Attack,
    /// Low health: move away from the current target until recovered
    Retreat,
    /// Friendly presence too strong: slip toward the lowest-influence area
    Evade,
}

/// A single combat unit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Unit {
    pub id: u32,
    pub team: Team,
    pub pos: Vec2,
    /// Current movement goal (own position when idle)
    pub target: Vec2,
    pub health: f32,
    pub alive: bool,
    /// Seconds until the next shot is allowed
    pub cooldown: f32,
    pub behavior: Behavior,
}

impl Unit {
    pub fn new(id: u32, team: Team, pos: Vec2) -> Self {
        Self {
            id,
            team,
            pos,
            target: pos,
            health: UNIT_MAX_HEALTH,
            alive: true,
            cooldown: 0.0,
            behavior: Behavior::Idle,
        }
    }

    pub fn take_damage(&mut self, amount: f32) {
        self.health = (self.health - amount).max(0.0);
        if self.health <= 0.0 {
            self.alive = false;
        }
    }

    /// Whether a world point lands within this unit's hit circle (wrapped)
    pub fn contains_point(&self, point: Vec2, hit_radius: f32, width: f32, height: f32) -> bool {
        wrapped_distance(self.pos, point, width, height) <= hit_radius
    }
}

impl Contributor for Unit {
    fn position(&self) -> Vec2 {
        self.pos
    }

    fn affiliation(&self) -> f32 {
        self.team.sign()
    }

    fn is_alive(&self) -> bool {
        self.alive
    }
}

/// Pick the next behavior for an enemy unit from its field sample and health.
///
/// Pure function; thresholds come from [`UnitTuning`]. Retreat is sticky:
/// once entered it holds until health passes `recover_health`.
pub fn decide(current: Behavior, sample: f32, health: f32, tuning: &UnitTuning) -> Behavior {
    if health < tuning.retreat_health {
        return Behavior::Retreat;
    }
    if current == Behavior::Retreat && health < tuning.recover_health {
        return Behavior::Retreat;
    }
    if sample > tuning.evade_above {
        Behavior::Evade
    } else if sample < tuning.attack_below {
        Behavior::Attack
    } else {
        Behavior::Idle
    }
}

/// The eight compass directions probed when evading
pub const COMPASS_DIRS: [Vec2; 8] = [
    Vec2::new(0.0, -1.0),
    Vec2::new(1.0, -1.0),
    Vec2::new(1.0, 0.0),
    Vec2::new(1.0, 1.0),
    Vec2::new(0.0, 1.0),
    Vec2::new(-1.0, 1.0),
    Vec2::new(-1.0, 0.0),
    Vec2::new(-1.0, -1.0),
];

/// Direction whose probe point has the lowest influence, ties going to the
/// first direction in compass order (deterministic).
pub fn lowest_influence_direction(
    field: &InfluenceField,
    pos: Vec2,
    probe_distance: f32,
    width: f32,
    height: f32,
) -> Vec2 {
    let mut best = COMPASS_DIRS[0];
    let mut best_influence = f32::MAX;
    for dir in COMPASS_DIRS {
        let probe = wrap_position(pos + dir * probe_distance, width, height);
        let influence = field.sample(probe);
        if influence < best_influence {
            best_influence = influence;
            best = dir;
        }
    }
    best
}
