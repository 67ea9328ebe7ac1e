//! Construction-time configuration
//!
//! All tunables are fixed at construction; there is no runtime
//! reconfiguration. `validate()` rejects degenerate values with
//! [`ConfigError`] before any state is built.

use serde::{Deserialize, Serialize};
use std::{error::Error, fmt};

use crate::consts::*;

/// How grid indices outside the valid range are treated.
///
/// The two policies produce materially different totals near edges: `Wrap`
/// makes the world toroidal, `Clamp` simply drops out-of-range contributions.
/// Pick one per deployment; `update` and `sample` always apply the same one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BoundaryPolicy {
    /// Indices are taken modulo the grid dimensions (toroidal world)
    #[default]
    Wrap,
    /// Out-of-range indices are skipped; out-of-grid samples read 0.0
    Clamp,
}

/// Influence field configuration
///
/// World dimensions that are not a multiple of `cell_size` truncate the last
/// partial row/column: a 810x600 world with 40-unit cells still gets 20
/// columns, and positions past x=800 only reach the grid under `Wrap`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldConfig {
    /// World width in world units
    pub width: f32,
    /// World height in world units
    pub height: f32,
    /// Edge length of one square grid cell, in world units
    pub cell_size: f32,
    /// Influence spread radius, in cells
    pub radius: i32,
    /// Out-of-range index handling
    pub boundary: BoundaryPolicy,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            width: WORLD_WIDTH,
            height: WORLD_HEIGHT,
            cell_size: CELL_SIZE,
            radius: INFLUENCE_RADIUS,
            boundary: BoundaryPolicy::Wrap,
        }
    }
}

impl FieldConfig {
    /// Grid row count (`⌊height / cell_size⌋`)
    pub fn rows(&self) -> usize {
        (self.height / self.cell_size).floor() as usize
    }

    /// Grid column count (`⌊width / cell_size⌋`)
    pub fn cols(&self) -> usize {
        (self.width / self.cell_size).floor() as usize
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.cell_size > 0.0) || !self.cell_size.is_finite() {
            return Err(ConfigError::CellSize {
                cell_size: self.cell_size,
            });
        }
        if !(self.width > 0.0 && self.height > 0.0)
            || !self.width.is_finite()
            || !self.height.is_finite()
        {
            return Err(ConfigError::WorldSize {
                width: self.width,
                height: self.height,
            });
        }
        if self.radius < 0 {
            return Err(ConfigError::Radius {
                radius: self.radius,
            });
        }
        let (rows, cols) = (self.rows(), self.cols());
        if rows == 0 || cols == 0 {
            return Err(ConfigError::EmptyGrid { rows, cols });
        }
        Ok(())
    }
}

/// Unit behavior tuning
///
/// Default balance: enemies are slightly slower and weaker per shot but fire
/// on a longer cooldown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitTuning {
    pub friendly_speed: f32,
    pub enemy_speed: f32,
    pub attack_range: f32,
    pub friendly_damage: f32,
    pub enemy_damage: f32,
    pub friendly_cooldown: f32,
    pub enemy_cooldown: f32,
    pub projectile_speed: f32,
    pub projectile_max_distance: f32,
    /// Unit hit radius for projectile collision
    pub hit_radius: f32,
    /// Enemies retreat below this health and stay retreating until recovered
    pub retreat_health: f32,
    pub recover_health: f32,
    /// Field sample above this (friendly presence) makes an enemy evade
    pub evade_above: f32,
    /// Field sample below this (enemy dominance) makes an enemy attack
    pub attack_below: f32,
    /// How far ahead the eight evade probes look, in world units
    pub evade_probe_distance: f32,
    /// How far an evading unit commits to the chosen direction
    pub evade_step: f32,
}

impl Default for UnitTuning {
    fn default() -> Self {
        Self {
            friendly_speed: 100.0,
            enemy_speed: 80.0,
            attack_range: 150.0,
            friendly_damage: 10.0,
            enemy_damage: 8.0,
            friendly_cooldown: 1.5,
            enemy_cooldown: 2.0,
            projectile_speed: 250.0,
            projectile_max_distance: 200.0,
            hit_radius: UNIT_HIT_RADIUS,
            retreat_health: 30.0,
            recover_health: 50.0,
            evade_above: -0.5,
            attack_below: -1.0,
            evade_probe_distance: 20.0,
            evade_step: 50.0,
        }
    }
}

impl UnitTuning {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("friendly_speed", self.friendly_speed),
            ("enemy_speed", self.enemy_speed),
            ("attack_range", self.attack_range),
            ("friendly_cooldown", self.friendly_cooldown),
            ("enemy_cooldown", self.enemy_cooldown),
            ("projectile_speed", self.projectile_speed),
            ("projectile_max_distance", self.projectile_max_distance),
            ("hit_radius", self.hit_radius),
            ("evade_probe_distance", self.evade_probe_distance),
            ("evade_step", self.evade_step),
        ];
        for (name, value) in positive {
            if !(value > 0.0) || !value.is_finite() {
                return Err(ConfigError::Tuning { name, value });
            }
        }
        let non_negative = [
            ("friendly_damage", self.friendly_damage),
            ("enemy_damage", self.enemy_damage),
            ("retreat_health", self.retreat_health),
            ("recover_health", self.recover_health),
        ];
        for (name, value) in non_negative {
            if !(value >= 0.0) {
                return Err(ConfigError::Tuning { name, value });
            }
        }
        Ok(())
    }

    pub fn speed(&self, team: crate::sim::Team) -> f32 {
        match team {
            crate::sim::Team::Friendly => self.friendly_speed,
            crate::sim::Team::Enemy => self.enemy_speed,
        }
    }

    pub fn damage(&self, team: crate::sim::Team) -> f32 {
        match team {
            crate::sim::Team::Friendly => self.friendly_damage,
            crate::sim::Team::Enemy => self.enemy_damage,
        }
    }

    pub fn cooldown(&self, team: crate::sim::Team) -> f32 {
        match team {
            crate::sim::Team::Friendly => self.friendly_cooldown,
            crate::sim::Team::Enemy => self.enemy_cooldown,
        }
    }
}

/// Complete simulation configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SimConfig {
    pub field: FieldConfig,
    pub units: UnitTuning,
    /// Run seed for reproducibility
    pub seed: u64,
}

impl SimConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.field.validate()?;
        self.units.validate()
    }

    /// Parse and validate a configuration from JSON
    pub fn from_json(src: &str) -> Result<Self, ConfigError> {
        let config: SimConfig =
            serde_json::from_str(src).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }
}

/// Invalid configuration, detected at construction time.
///
/// Fatal: no partially-built field or state is ever returned.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    WorldSize { width: f32, height: f32 },
    CellSize { cell_size: f32 },
    Radius { radius: i32 },
    EmptyGrid { rows: usize, cols: usize },
    Tuning { name: &'static str, value: f32 },
    Parse(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::WorldSize { width, height } => {
                write!(f, "world dimensions must be positive (got {width}x{height})")
            }
            ConfigError::CellSize { cell_size } => {
                write!(f, "cell size must be positive (got {cell_size})")
            }
            ConfigError::Radius { radius } => {
                write!(f, "influence radius must be non-negative (got {radius})")
            }
            ConfigError::EmptyGrid { rows, cols } => {
                write!(f, "grid has no cells ({rows} rows x {cols} cols)")
            }
            ConfigError::Tuning { name, value } => {
                write!(f, "invalid unit tuning: {name} = {value}")
            }
            ConfigError::Parse(msg) => write!(f, "config parse error: {msg}"),
        }
    }
}

impl Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(SimConfig::default().validate().is_ok());
    }

    #[test]
    fn test_default_grid_dimensions() {
        let field = FieldConfig::default();
        assert_eq!(field.cols(), 20);
        assert_eq!(field.rows(), 15);
    }

    #[test]
    fn test_zero_cell_size_rejected() {
        let field = FieldConfig {
            cell_size: 0.0,
            ..Default::default()
        };
        assert_eq!(
            field.validate(),
            Err(ConfigError::CellSize { cell_size: 0.0 })
        );
    }

    #[test]
    fn test_negative_dimensions_rejected() {
        let field = FieldConfig {
            width: -800.0,
            ..Default::default()
        };
        assert!(matches!(
            field.validate(),
            Err(ConfigError::WorldSize { .. })
        ));

        let field = FieldConfig {
            height: -1.0,
            ..Default::default()
        };
        assert!(matches!(
            field.validate(),
            Err(ConfigError::WorldSize { .. })
        ));
    }

    #[test]
    fn test_negative_radius_rejected() {
        let field = FieldConfig {
            radius: -1,
            ..Default::default()
        };
        assert_eq!(field.validate(), Err(ConfigError::Radius { radius: -1 }));
    }

    #[test]
    fn test_world_smaller_than_one_cell_rejected() {
        let field = FieldConfig {
            width: 10.0,
            height: 10.0,
            cell_size: 40.0,
            ..Default::default()
        };
        assert!(matches!(
            field.validate(),
            Err(ConfigError::EmptyGrid { .. })
        ));
    }

    #[test]
    fn test_json_round_trip() {
        let config = SimConfig {
            seed: 42,
            ..Default::default()
        };
        let json = serde_json::to_string(&config).unwrap();
        let parsed = SimConfig::from_json(&json).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_bad_json_reported_as_parse_error() {
        assert!(matches!(
            SimConfig::from_json("{not json"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_invalid_json_config_rejected_by_validation() {
        let mut config = SimConfig::default();
        config.field.cell_size = -5.0;
        let json = serde_json::to_string(&config).unwrap();
        assert!(matches!(
            SimConfig::from_json(&json),
            Err(ConfigError::CellSize { .. })
        ));
    }
}
