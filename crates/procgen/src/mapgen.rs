//! Procedural map generation split into primitives, the tile container, and
//! the three layout algorithms.

mod bsp;
mod cellular;
mod corridor;
mod dungeon;
mod grid;
mod roles;
mod room;
pub(crate) mod seed;
mod simple_random;

use serde::{Deserialize, Serialize};

use crate::error::GenerationError;
use crate::types::{AlgorithmType, AreaTheme};

pub use bsp::{BspDungeonGenerator, MIN_BSP_ROOM_SIZE};
pub use cellular::{CellularAutomataDungeonGenerator, MIN_CAVE_SIZE};
pub use corridor::{Bend, Corridor};
pub use dungeon::DungeonMap;
pub use room::{Room, RoomContents};
pub use simple_random::SimpleRandomDungeonGenerator;

/// Shared capability of every layout algorithm.
///
/// Implementations own their configuration and build a fresh RNG from `seed`
/// on each call, so independent calls never share random state.
pub trait DungeonGenerator {
    fn algorithm(&self) -> AlgorithmType;

    fn theme(&self) -> AreaTheme;

    fn generate(&self, width: usize, height: usize, seed: u64)
    -> Result<DungeonMap, GenerationError>;
}

/// Closed set of generator configurations, keyed by algorithm.
///
/// Used as the theme registry value and as the `[generator]` table of a
/// generation request.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "algorithm", rename_all = "snake_case")]
pub enum GeneratorConfig {
    Bsp {
        #[serde(default = "default_bsp_min_room_size")]
        min_room_size: usize,
    },
    Cellular {
        #[serde(default = "default_fill_probability")]
        fill_probability: f64,
        #[serde(default = "default_iterations")]
        iterations: u32,
        #[serde(default = "default_min_region_tiles")]
        min_region_tiles: usize,
    },
    SimpleRandom {
        #[serde(default = "default_min_rooms")]
        min_rooms: usize,
        #[serde(default = "default_max_rooms")]
        max_rooms: usize,
        #[serde(default = "default_scatter_min_room_size")]
        min_room_size: usize,
        #[serde(default = "default_scatter_max_room_size")]
        max_room_size: usize,
    },
}

fn default_bsp_min_room_size() -> usize {
    bsp::DEFAULT_MIN_ROOM_SIZE
}
fn default_fill_probability() -> f64 {
    cellular::DEFAULT_FILL_PROBABILITY
}
fn default_iterations() -> u32 {
    cellular::DEFAULT_ITERATIONS
}
fn default_min_region_tiles() -> usize {
    1
}
fn default_min_rooms() -> usize {
    simple_random::DEFAULT_MIN_ROOMS
}
fn default_max_rooms() -> usize {
    simple_random::DEFAULT_MAX_ROOMS
}
fn default_scatter_min_room_size() -> usize {
    simple_random::DEFAULT_MIN_ROOM_SIZE
}
fn default_scatter_max_room_size() -> usize {
    simple_random::DEFAULT_MAX_ROOM_SIZE
}

impl GeneratorConfig {
    pub fn algorithm(&self) -> AlgorithmType {
        match self {
            GeneratorConfig::Bsp { .. } => AlgorithmType::BinarySpacePartition,
            GeneratorConfig::Cellular { .. } => AlgorithmType::CellularAutomata,
            GeneratorConfig::SimpleRandom { .. } => AlgorithmType::SimpleRandom,
        }
    }

    pub fn generate(
        &self,
        theme: AreaTheme,
        width: usize,
        height: usize,
        seed: u64,
    ) -> Result<DungeonMap, GenerationError> {
        match *self {
            GeneratorConfig::Bsp { min_room_size } => {
                BspDungeonGenerator::new(min_room_size, theme).generate(width, height, seed)
            }
            GeneratorConfig::Cellular { fill_probability, iterations, min_region_tiles } => {
                CellularAutomataDungeonGenerator::new(fill_probability, iterations, theme)
                    .with_min_region_tiles(min_region_tiles)
                    .generate(width, height, seed)
            }
            GeneratorConfig::SimpleRandom { min_rooms, max_rooms, min_room_size, max_room_size } => {
                SimpleRandomDungeonGenerator::new(min_rooms, max_rooms, theme)
                    .with_room_size(min_room_size, max_room_size)
                    .generate(width, height, seed)
            }
        }
    }
}
