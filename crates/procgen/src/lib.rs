pub mod area;
pub mod config;
pub mod error;
pub mod mapgen;
pub mod procedure;
pub mod types;

pub use area::{AreaGenerator, AreaTemplate};
pub use config::{ConfigError, GenerationRequest};
pub use error::{ConfigurationError, GenerationError};
pub use mapgen::{
    Bend, BspDungeonGenerator, CellularAutomataDungeonGenerator, Corridor, DungeonGenerator, DungeonMap,
    GeneratorConfig, Room, RoomContents, SimpleRandomDungeonGenerator,
};
pub use procedure::{Encounter, EncounterKind, ProcedureGenerator, Quest, QuestObjective};
pub use types::*;
