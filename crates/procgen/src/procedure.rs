//! Encounters and quests rolled against a finished map.
//!
//! Both generators read the map and never modify it. Their output depends
//! only on the map's seed and the seed passed in, so the same pair always
//! replays the same encounter or quest.

use std::fmt;

use serde::Serialize;

use crate::mapgen::DungeonMap;
use crate::mapgen::seed::{ENCOUNTER_STREAM, GenRng, QUEST_STREAM, mix_seed_stream};
use crate::types::{AreaTheme, RoomType};

const DIFFICULTY_JITTER: f64 = 0.05;
const MAX_QUEST_DIFFICULTY: u8 = 10;
const REWARD_PER_DIFFICULTY: u32 = 100;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EncounterKind {
    MonsterPack,
    TreasureRoom,
    TrapGauntlet,
    BossRoom,
    PuzzleChamber,
}

impl EncounterKind {
    pub const ALL: [EncounterKind; 5] = [
        EncounterKind::MonsterPack,
        EncounterKind::TreasureRoom,
        EncounterKind::TrapGauntlet,
        EncounterKind::BossRoom,
        EncounterKind::PuzzleChamber,
    ];

    pub fn base_difficulty(self) -> f64 {
        match self {
            EncounterKind::MonsterPack => 0.5,
            EncounterKind::TreasureRoom => 0.3,
            EncounterKind::TrapGauntlet => 0.4,
            EncounterKind::BossRoom => 0.9,
            EncounterKind::PuzzleChamber => 0.6,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            EncounterKind::MonsterPack => "monster_pack",
            EncounterKind::TreasureRoom => "treasure_room",
            EncounterKind::TrapGauntlet => "trap_gauntlet",
            EncounterKind::BossRoom => "boss_room",
            EncounterKind::PuzzleChamber => "puzzle_chamber",
        }
    }
}

impl fmt::Display for EncounterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Encounter {
    pub kind: EncounterKind,
    /// In `[0, 1]`.
    pub difficulty: f64,
    pub room_index: Option<usize>,
    pub location: String,
    pub seed: u64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestObjective {
    Slay,
    Find,
    Rescue,
    Retrieve,
    Explore,
    Survive,
}

impl QuestObjective {
    pub const ALL: [QuestObjective; 6] = [
        QuestObjective::Slay,
        QuestObjective::Find,
        QuestObjective::Rescue,
        QuestObjective::Retrieve,
        QuestObjective::Explore,
        QuestObjective::Survive,
    ];
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Quest {
    pub objective: QuestObjective,
    pub name: String,
    /// In `1..=10`.
    pub difficulty: u8,
    pub reward: u32,
    pub location: String,
    pub seed: u64,
}

struct WordBank {
    monsters: &'static [&'static str],
    treasures: &'static [&'static str],
    artifacts: &'static [&'static str],
    places: &'static [&'static str],
}

const NPC_NAMES: &[&str] =
    &["Brother Aldric", "Mira the Cartographer", "Old Tobin", "Captain Ysolde", "Fenwick"];

fn word_bank(theme: AreaTheme) -> WordBank {
    match theme {
        AreaTheme::Dungeon => WordBank {
            monsters: &["goblins", "skeletons", "jailers"],
            treasures: &["iron strongbox", "warden's purse"],
            artifacts: &["Key of Nine Locks", "Chained Tome"],
            places: &["the Black Vault", "Grimhold Keep"],
        },
        AreaTheme::Cave => WordBank {
            monsters: &["cave bats", "trolls", "blind crawlers"],
            treasures: &["crystal geode", "miner's hoard"],
            artifacts: &["Glowstone Lantern", "Echo Shell"],
            places: &["the Dripping Hollow", "Moonwell Grotto"],
        },
        AreaTheme::Forest => WordBank {
            monsters: &["wolves", "dryads", "bandits"],
            treasures: &["hollow-oak cache", "ranger's stash"],
            artifacts: &["Thornwood Bow", "Acorn of Ages"],
            places: &["the Tanglewood", "Ashgrove"],
        },
        AreaTheme::Ruins => WordBank {
            monsters: &["wraiths", "stone golems", "scavengers"],
            treasures: &["royal reliquary", "buried coffer"],
            artifacts: &["Broken Crown", "Sunstone Tablet"],
            places: &["fallen Aurelis", "the Sunken Forum"],
        },
        AreaTheme::Castle => WordBank {
            monsters: &["knights", "gargoyles", "war hounds"],
            treasures: &["treasury chest", "baron's signet"],
            artifacts: &["Banner of the First King", "Oathblade"],
            places: &["Castle Vend", "the High Keep"],
        },
        AreaTheme::Temple => WordBank {
            monsters: &["cultists", "temple guardians", "spirits"],
            treasures: &["offering bowl", "gilded altar cloth"],
            artifacts: &["Idol of Dawn", "Censer of Whispers"],
            places: &["the Silent Sanctum", "the Shrine of Veils"],
        },
        AreaTheme::Sewers => WordBank {
            monsters: &["giant rats", "oozes", "smugglers"],
            treasures: &["smuggler's bundle", "drowned purse"],
            artifacts: &["Rusted Sigil", "Guildmaster's Ledger"],
            places: &["the Undercity Drains", "the Old Cistern"],
        },
        AreaTheme::UndergroundCity => WordBank {
            monsters: &["duergar", "deep stalkers", "rogue constructs"],
            treasures: &["dwarven vault", "forge tithe"],
            artifacts: &["Runehammer", "Lamp of the Deep King"],
            places: &["Khaz Varun", "the Lantern Market"],
        },
    }
}

fn procedure_rng(map_seed: u64, seed: u64, stream: u64) -> GenRng {
    GenRng::from_seed(mix_seed_stream(mix_seed_stream(map_seed, stream) ^ seed, stream))
}

/// Stateless generator of encounters and quests.
#[derive(Clone, Copy, Debug, Default)]
pub struct ProcedureGenerator;

impl ProcedureGenerator {
    pub fn generate_encounter(dungeon: &DungeonMap, seed: u64) -> Encounter {
        let mut rng = procedure_rng(dungeon.seed(), seed, ENCOUNTER_STREAM);
        let kind = *rng.pick(&EncounterKind::ALL);
        let jitter = (rng.unit() * 2.0 - 1.0) * DIFFICULTY_JITTER;
        let difficulty = (kind.base_difficulty() + jitter).clamp(0.0, 1.0);

        let rooms = dungeon.rooms();
        let boss_room = rooms.iter().position(|room| room.room_type() == RoomType::Boss);
        let room_index = match (kind, boss_room) {
            (EncounterKind::BossRoom, Some(index)) => Some(index),
            _ if rooms.len() > 1 => {
                let candidates: Vec<usize> = (0..rooms.len())
                    .filter(|&index| rooms[index].room_type() != RoomType::Spawn)
                    .collect();
                Some(*rng.pick(&candidates))
            }
            _ if rooms.is_empty() => None,
            _ => Some(0),
        };

        let label = dungeon.theme().label();
        let location = match room_index {
            Some(index) => format!("room {index} of the {label}"),
            None => format!("the {label}"),
        };
        Encounter { kind, difficulty, room_index, location, seed }
    }

    pub fn generate_quest(dungeon: &DungeonMap, seed: u64) -> Quest {
        let mut rng = procedure_rng(dungeon.seed(), seed, QUEST_STREAM);
        let bank = word_bank(dungeon.theme());
        let objective = *rng.pick(&QuestObjective::ALL);
        let place = *rng.pick(bank.places);

        let name = match objective {
            QuestObjective::Slay => {
                format!("Slay {} {}", rng.range_usize(3, 12), rng.pick(bank.monsters))
            }
            QuestObjective::Find => format!("Find the {} of {place}", rng.pick(bank.treasures)),
            QuestObjective::Rescue => format!("Rescue {} from {place}", rng.pick(NPC_NAMES)),
            QuestObjective::Retrieve => {
                format!("Retrieve the {} for {}", rng.pick(bank.artifacts), rng.pick(NPC_NAMES))
            }
            QuestObjective::Explore => format!("Explore the depths of {place}"),
            QuestObjective::Survive => format!("Survive {} encounters", rng.range_usize(3, 12)),
        };

        let difficulty = rng.range_usize(1, usize::from(MAX_QUEST_DIFFICULTY)) as u8;
        Quest {
            objective,
            name,
            difficulty,
            reward: u32::from(difficulty) * REWARD_PER_DIFFICULTY,
            location: place.to_string(),
            seed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapgen::{BspDungeonGenerator, DungeonGenerator};

    fn sample_map() -> DungeonMap {
        BspDungeonGenerator::new(6, AreaTheme::Temple).generate(48, 40, 77).expect("valid")
    }

    #[test]
    fn encounters_replay_and_stay_in_range() {
        let map = sample_map();
        for seed in 0..64 {
            let encounter = ProcedureGenerator::generate_encounter(&map, seed);
            assert_eq!(encounter, ProcedureGenerator::generate_encounter(&map, seed));
            assert!((0.0..=1.0).contains(&encounter.difficulty));
            assert!((encounter.difficulty - encounter.kind.base_difficulty()).abs() <= 0.05 + 1e-9);
            assert_eq!(encounter.seed, seed);

            let index = encounter.room_index.expect("map has rooms");
            if encounter.kind == EncounterKind::BossRoom {
                assert_eq!(map.rooms()[index].room_type(), RoomType::Boss);
            } else {
                assert_ne!(map.rooms()[index].room_type(), RoomType::Spawn);
            }
        }
    }

    #[test]
    fn quests_scale_reward_with_difficulty() {
        let map = sample_map();
        for seed in 0..64 {
            let quest = ProcedureGenerator::generate_quest(&map, seed);
            assert!((1..=10).contains(&quest.difficulty));
            assert_eq!(quest.reward, u32::from(quest.difficulty) * 100);
            assert!(!quest.name.contains('{'));
            assert!(word_bank(AreaTheme::Temple).places.contains(&quest.location.as_str()));
        }
    }

    #[test]
    fn roomless_map_gets_an_area_wide_encounter() {
        let map = DungeonMap::new(10, 10, AreaTheme::Sewers, 3);
        let encounter = ProcedureGenerator::generate_encounter(&map, 5);
        assert_eq!(encounter.room_index, None);
        assert_eq!(encounter.location, "the Sewers");
    }

    #[test]
    fn reading_the_map_leaves_it_untouched() {
        let map = sample_map();
        let before = map.clone();
        let _ = ProcedureGenerator::generate_encounter(&map, 1);
        let _ = ProcedureGenerator::generate_quest(&map, 1);
        assert_eq!(map, before);
    }
}
