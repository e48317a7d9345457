use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Pos {
    pub y: i32,
    pub x: i32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TileKind {
    Wall,
    Floor,
}

#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum RoomType {
    Corridor,
    #[default]
    Chamber,
    Treasure,
    Trap,
    Spawn,
    Boss,
    Safe,
}

#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum AreaTheme {
    #[default]
    Dungeon,
    Cave,
    Forest,
    Ruins,
    Castle,
    Temple,
    Sewers,
    UndergroundCity,
}

impl AreaTheme {
    pub const ALL: [AreaTheme; 8] = [
        AreaTheme::Dungeon,
        AreaTheme::Cave,
        AreaTheme::Forest,
        AreaTheme::Ruins,
        AreaTheme::Castle,
        AreaTheme::Temple,
        AreaTheme::Sewers,
        AreaTheme::UndergroundCity,
    ];

    /// Position of the theme inside [`AreaTheme::ALL`].
    pub fn index(self) -> usize {
        match self {
            AreaTheme::Dungeon => 0,
            AreaTheme::Cave => 1,
            AreaTheme::Forest => 2,
            AreaTheme::Ruins => 3,
            AreaTheme::Castle => 4,
            AreaTheme::Temple => 5,
            AreaTheme::Sewers => 6,
            AreaTheme::UndergroundCity => 7,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            AreaTheme::Dungeon => "dungeon",
            AreaTheme::Cave => "cave",
            AreaTheme::Forest => "forest",
            AreaTheme::Ruins => "ruins",
            AreaTheme::Castle => "castle",
            AreaTheme::Temple => "temple",
            AreaTheme::Sewers => "sewers",
            AreaTheme::UndergroundCity => "underground_city",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            AreaTheme::Dungeon => "Dungeon",
            AreaTheme::Cave => "Cave",
            AreaTheme::Forest => "Forest",
            AreaTheme::Ruins => "Ancient Ruins",
            AreaTheme::Castle => "Castle",
            AreaTheme::Temple => "Temple",
            AreaTheme::Sewers => "Sewers",
            AreaTheme::UndergroundCity => "Underground City",
        }
    }
}

impl fmt::Display for AreaTheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("unknown area theme `{0}`")]
pub struct ParseThemeError(pub String);

impl FromStr for AreaTheme {
    type Err = ParseThemeError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase().replace(['-', ' '], "_");
        AreaTheme::ALL
            .into_iter()
            .find(|theme| theme.name() == normalized)
            .ok_or_else(|| ParseThemeError(value.to_string()))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AlgorithmType {
    #[serde(rename = "bsp")]
    BinarySpacePartition,
    #[serde(rename = "cellular")]
    CellularAutomata,
    #[serde(rename = "simple_random")]
    SimpleRandom,
}

impl fmt::Display for AlgorithmType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            AlgorithmType::BinarySpacePartition => "bsp",
            AlgorithmType::CellularAutomata => "cellular",
            AlgorithmType::SimpleRandom => "simple_random",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn theme_index_matches_position_in_all() {
        for (position, theme) in AreaTheme::ALL.into_iter().enumerate() {
            assert_eq!(theme.index(), position, "{theme:?}");
        }
    }

    #[test]
    fn theme_names_round_trip_through_from_str() {
        for theme in AreaTheme::ALL {
            assert_eq!(theme.name().parse::<AreaTheme>(), Ok(theme));
        }
        assert_eq!("Underground-City".parse::<AreaTheme>(), Ok(AreaTheme::UndergroundCity));
        assert_eq!("swamp".parse::<AreaTheme>(), Err(ParseThemeError("swamp".to_string())));
    }
}
