use serde::Serialize;

use crate::mapgen::GeneratorConfig;
use crate::types::{AlgorithmType, AreaTheme};

const CAVE_MIN_REGION_TILES: usize = 4;

/// Immutable per-theme parameters: the generator to run and how densely the
/// decoration pass fills rooms.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AreaTemplate {
    theme: AreaTheme,
    summary: &'static str,
    generator: GeneratorConfig,
    monster_density: f64,
    treasure_density: f64,
    trap_density: f64,
    recommended_level: u32,
}

impl AreaTemplate {
    pub fn for_theme(theme: AreaTheme) -> Self {
        let (summary, generator, monster_density, treasure_density, trap_density, recommended_level) =
            match theme {
                AreaTheme::Dungeon => (
                    "A dark underground dungeon of cut stone",
                    bsp(6),
                    0.6,
                    0.3,
                    0.3,
                    3,
                ),
                AreaTheme::Cave => (
                    "A limestone cave of winding natural passages",
                    cellular(0.45, 3),
                    0.4,
                    0.2,
                    0.1,
                    2,
                ),
                AreaTheme::Forest => (
                    "A dense forest split by twisting trails",
                    simple_random(),
                    0.3,
                    0.2,
                    0.1,
                    1,
                ),
                AreaTheme::Ruins => (
                    "Collapsed halls swallowed by roots and moss",
                    bsp(6),
                    0.5,
                    0.4,
                    0.2,
                    4,
                ),
                AreaTheme::Castle => (
                    "A fortress of barracks and guarded halls",
                    bsp(8),
                    0.7,
                    0.3,
                    0.2,
                    6,
                ),
                AreaTheme::Temple => (
                    "A sanctum of carved pillars and quiet shrines",
                    cellular(0.45, 4),
                    0.4,
                    0.5,
                    0.3,
                    5,
                ),
                AreaTheme::Sewers => (
                    "Flooded tunnels beneath the city streets",
                    cellular(0.42, 3),
                    0.5,
                    0.1,
                    0.2,
                    2,
                ),
                AreaTheme::UndergroundCity => (
                    "A forgotten city of plazas far below the surface",
                    simple_random(),
                    0.3,
                    0.4,
                    0.1,
                    7,
                ),
            };
        Self {
            theme,
            summary,
            generator,
            monster_density,
            treasure_density,
            trap_density,
            recommended_level,
        }
    }

    pub fn theme(&self) -> AreaTheme {
        self.theme
    }

    pub fn name(&self) -> &'static str {
        self.theme.label()
    }

    pub fn summary(&self) -> &'static str {
        self.summary
    }

    pub fn generator(&self) -> &GeneratorConfig {
        &self.generator
    }

    pub fn algorithm(&self) -> AlgorithmType {
        self.generator.algorithm()
    }

    pub fn monster_density(&self) -> f64 {
        self.monster_density
    }

    pub fn treasure_density(&self) -> f64 {
        self.treasure_density
    }

    pub fn trap_density(&self) -> f64 {
        self.trap_density
    }

    pub fn recommended_level(&self) -> u32 {
        self.recommended_level
    }
}

fn bsp(min_room_size: usize) -> GeneratorConfig {
    GeneratorConfig::Bsp { min_room_size }
}

fn cellular(fill_probability: f64, iterations: u32) -> GeneratorConfig {
    GeneratorConfig::Cellular { fill_probability, iterations, min_region_tiles: CAVE_MIN_REGION_TILES }
}

fn simple_random() -> GeneratorConfig {
    GeneratorConfig::SimpleRandom { min_rooms: 8, max_rooms: 15, min_room_size: 5, max_room_size: 10 }
}
