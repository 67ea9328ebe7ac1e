//! Flyweight tile set and tile map
//!
//! One `TileSprite` (atlas rectangle) is interned per tile kind; every map
//! cell stores only its kind and derives its world position from its grid
//! coordinates. No textures are loaded here - the atlas coordinates are data
//! for an external renderer.

use glam::Vec2;
use rand::Rng;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TileKind {
    Grass,
    Water,
    Wall,
    Tree,
}

impl TileKind {
    pub const ALL: [TileKind; 4] = [TileKind::Grass, TileKind::Water, TileKind::Wall, TileKind::Tree];

    fn index(self) -> usize {
        match self {
            TileKind::Grass => 0,
            TileKind::Water => 1,
            TileKind::Wall => 2,
            TileKind::Tree => 3,
        }
    }
}

/// Shared (intrinsic) tile data: where the sprite lives in the atlas
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileSprite {
    pub atlas_x: u32,
    pub atlas_y: u32,
    pub size: u32,
}

/// Interns one sprite per kind and hands out references to the shared data
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileSet {
    sprites: [TileSprite; 4],
    tile_size: u32,
}

impl TileSet {
    pub fn new(tile_size: u32) -> Self {
        let sprite = |i: u32| TileSprite {
            atlas_x: i * tile_size,
            atlas_y: 0,
            size: tile_size,
        };
        Self {
            sprites: [sprite(0), sprite(1), sprite(2), sprite(3)],
            tile_size,
        }
    }

    pub fn tile_size(&self) -> u32 {
        self.tile_size
    }

    pub fn sprite(&self, kind: TileKind) -> &TileSprite {
        &self.sprites[kind.index()]
    }
}

/// Per-placement (extrinsic) tile state
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tile {
    pub kind: TileKind,
    pub pos: Vec2,
}

/// A rows x cols grid of tile kinds
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileMap {
    rows: usize,
    cols: usize,
    tile_size: u32,
    kinds: Vec<TileKind>,
}

impl TileMap {
    /// Fill a map with uniformly random kinds from a seeded RNG
    pub fn random(rows: usize, cols: usize, tile_size: u32, seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let kinds = (0..rows * cols)
            .map(|_| TileKind::ALL[rng.random_range(0..TileKind::ALL.len())])
            .collect();
        Self {
            rows,
            cols,
            tile_size,
            kinds,
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn kind_at(&self, col: usize, row: usize) -> TileKind {
        self.kinds[row * self.cols + col]
    }

    /// Iterate placements row-major with world positions derived from the
    /// grid coordinates
    pub fn tiles(&self) -> impl Iterator<Item = Tile> + '_ {
        let size = self.tile_size as f32;
        self.kinds.iter().enumerate().map(move |(i, &kind)| Tile {
            kind,
            pos: Vec2::new((i % self.cols) as f32 * size, (i / self.cols) as f32 * size),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sprites_are_shared_per_kind() {
        let set = TileSet::new(64);
        let a = set.sprite(TileKind::Water) as *const TileSprite;
        let b = set.sprite(TileKind::Water) as *const TileSprite;
        assert!(std::ptr::eq(a, b));
        assert_eq!(set.sprite(TileKind::Water).atlas_x, 64);
        assert_eq!(set.sprite(TileKind::Tree).atlas_x, 192);
    }

    #[test]
    fn test_random_map_is_deterministic_per_seed() {
        let a = TileMap::random(10, 10, 64, 123);
        let b = TileMap::random(10, 10, 64, 123);
        assert_eq!(a, b);
        let c = TileMap::random(10, 10, 64, 124);
        assert_ne!(a, c);
    }

    #[test]
    fn test_tiles_positions_follow_grid() {
        let map = TileMap::random(2, 3, 64, 1);
        let tiles: Vec<Tile> = map.tiles().collect();
        assert_eq!(tiles.len(), 6);
        assert_eq!(tiles[0].pos, Vec2::new(0.0, 0.0));
        assert_eq!(tiles[4].pos, Vec2::new(64.0, 64.0));
        assert_eq!(tiles[4].kind, map.kind_at(1, 1));
    }
}
