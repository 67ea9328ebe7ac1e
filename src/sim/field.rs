//! Influence field: a discretized scalar grid over world space
//!
//! Every tick the owning simulation hands the field a snapshot of live
//! contributors; the grid is fully overwritten (never reallocated) and
//! downstream AI samples it by position to pick behavior. Sign encodes the
//! dominant affiliation at a location, magnitude its aggregate strength.
//!
//! The field is single-threaded state: callers must treat "update, then
//! sample" as one atomic phase per tick. It never owns or mutates entities.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::config::{BoundaryPolicy, ConfigError, FieldConfig};

/// Read-only view of an entity that projects influence onto the field.
///
/// `affiliation` is the signed team marker: `+1.0` friendly, `-1.0` hostile.
pub trait Contributor {
    fn position(&self) -> Vec2;
    fn affiliation(&self) -> f32;
    fn is_alive(&self) -> bool;
}

/// A 2D grid of influence values, fixed-size for its whole lifetime.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InfluenceField {
    config: FieldConfig,
    rows: usize,
    cols: usize,
    cells: Vec<f32>,
}

impl InfluenceField {
    /// Build a field for the configured world. The grid dimensions are
    /// `⌊height/cell⌋ x ⌊width/cell⌋`; a non-divisible world truncates the
    /// last partial row/column (see [`FieldConfig`]).
    pub fn new(config: FieldConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let rows = config.rows();
        let cols = config.cols();
        Ok(Self {
            config,
            rows,
            cols,
            cells: vec![0.0; rows * cols],
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn cell_size(&self) -> f32 {
        self.config.cell_size
    }

    pub fn boundary(&self) -> BoundaryPolicy {
        self.config.boundary
    }

    /// Value of the cell at (col, row). Panics if out of range; use
    /// [`sample`](Self::sample) for world-position queries.
    pub fn cell(&self, col: usize, row: usize) -> f32 {
        assert!(col < self.cols && row < self.rows);
        self.cells[row * self.cols + col]
    }

    /// Read-only iteration over all cells as `(col, row, value)`, for debug
    /// overlays. Pure read; never triggers recomputation.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize, f32)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(|(i, &v)| (i % self.cols, i / self.cols, v))
    }

    /// Recompute the whole grid from a snapshot of contributors.
    ///
    /// Resets every cell to zero, then accumulates each *live* contributor in
    /// the order supplied. Contribution is pure summation, so order does not
    /// change the result beyond float rounding; repeating the same snapshot
    /// yields the identical grid (no accumulation across calls).
    pub fn update<'a, C, I>(&mut self, contributors: I)
    where
        C: Contributor + 'a,
        I: IntoIterator<Item = &'a C>,
    {
        self.cells.fill(0.0);
        for contributor in contributors {
            if !contributor.is_alive() {
                continue;
            }
            self.apply(contributor.position(), contributor.affiliation());
        }
    }

    /// Influence at a world position, under the configured boundary policy.
    ///
    /// Total: positions that resolve outside the grid under `Clamp` read a
    /// neutral `0.0` ("no known influence"), never an error.
    pub fn sample(&self, position: Vec2) -> f32 {
        let (cx, cy) = self.cell_of(position);
        match self.resolve(cx, cy) {
            Some((col, row)) => self.cells[row * self.cols + col],
            None => 0.0,
        }
    }

    /// Spread one contributor over every cell within Euclidean cell-distance
    /// `radius`, adding `affiliation / (1 + distance)`: 1.0 at the source
    /// cell, falling to `1/(1+R)` at the rim.
    fn apply(&mut self, position: Vec2, affiliation: f32) {
        let (cx, cy) = self.cell_of(position);
        let radius = self.config.radius;
        for dy in -radius..=radius {
            for dx in -radius..=radius {
                let distance = ((dx * dx + dy * dy) as f32).sqrt();
                if distance > radius as f32 {
                    continue;
                }
                if let Some((col, row)) = self.resolve(cx + dx as i64, cy + dy as i64) {
                    self.cells[row * self.cols + col] += affiliation / (1.0 + distance);
                }
            }
        }
    }

    /// World position to (possibly out-of-range) cell coordinates, by
    /// flooring division. Shared by `update` and `sample` so both apply the
    /// boundary policy to identical indices.
    fn cell_of(&self, position: Vec2) -> (i64, i64) {
        (
            (position.x / self.config.cell_size).floor() as i64,
            (position.y / self.config.cell_size).floor() as i64,
        )
    }

    fn resolve(&self, cx: i64, cy: i64) -> Option<(usize, usize)> {
        match self.config.boundary {
            BoundaryPolicy::Wrap => Some((
                cx.rem_euclid(self.cols as i64) as usize,
                cy.rem_euclid(self.rows as i64) as usize,
            )),
            BoundaryPolicy::Clamp => {
                if (0..self.cols as i64).contains(&cx) && (0..self.rows as i64).contains(&cy) {
                    Some((cx as usize, cy as usize))
                } else {
                    None
                }
            }
        }
    }
}
