//! Greedy scatter: propose random rooms, keep the ones that leave a gap to
//! every accepted room, then chain them together.

use log::{debug, warn};

use crate::error::{ConfigurationError, GenerationError, check_map_size, check_minimum};
use crate::types::{AlgorithmType, AreaTheme};

use super::corridor::Corridor;
use super::dungeon::DungeonMap;
use super::roles::tag_spawn_and_boss;
use super::room::Room;
use super::seed::GenRng;
use super::DungeonGenerator;

pub(super) const DEFAULT_MIN_ROOMS: usize = 8;
pub(super) const DEFAULT_MAX_ROOMS: usize = 15;
pub(super) const DEFAULT_MIN_ROOM_SIZE: usize = 5;
pub(super) const DEFAULT_MAX_ROOM_SIZE: usize = 10;
const MIN_SCATTER_ROOM_SIZE: usize = 3;
const ROOM_PADDING: i32 = 2;
const ATTEMPTS_PER_ROOM: usize = 40;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SimpleRandomDungeonGenerator {
    min_rooms: usize,
    max_rooms: usize,
    min_room_size: usize,
    max_room_size: usize,
    theme: AreaTheme,
}

impl Default for SimpleRandomDungeonGenerator {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_ROOMS, DEFAULT_MAX_ROOMS, AreaTheme::Dungeon)
    }
}

impl SimpleRandomDungeonGenerator {
    pub fn new(min_rooms: usize, max_rooms: usize, theme: AreaTheme) -> Self {
        Self {
            min_rooms,
            max_rooms,
            min_room_size: DEFAULT_MIN_ROOM_SIZE,
            max_room_size: DEFAULT_MAX_ROOM_SIZE,
            theme,
        }
    }

    pub fn with_room_size(mut self, min_room_size: usize, max_room_size: usize) -> Self {
        self.min_room_size = min_room_size;
        self.max_room_size = max_room_size;
        self
    }

    pub fn min_map_edge(&self) -> usize {
        self.min_room_size * 3
    }

    fn validate(&self, width: usize, height: usize) -> Result<(), ConfigurationError> {
        check_minimum("min_rooms", self.min_rooms, 1)?;
        if self.min_rooms > self.max_rooms {
            return Err(ConfigurationError::RoomCountRange {
                min: self.min_rooms,
                max: self.max_rooms,
            });
        }
        check_minimum("min_room_size", self.min_room_size, MIN_SCATTER_ROOM_SIZE)?;
        if self.min_room_size > self.max_room_size {
            return Err(ConfigurationError::RoomSizeRange {
                min: self.min_room_size,
                max: self.max_room_size,
            });
        }
        check_map_size(self.algorithm(), width, height, self.min_map_edge(), self.min_map_edge())
    }

    fn propose(&self, width: usize, height: usize, rng: &mut GenRng) -> Room {
        let room_width =
            rng.range_usize(self.min_room_size, self.max_room_size.min(width / 3)) as i32;
        let room_height =
            rng.range_usize(self.min_room_size, self.max_room_size.min(height / 3)) as i32;
        let x = rng.range_i32(1, width as i32 - room_width - 1);
        let y = rng.range_i32(1, height as i32 - room_height - 1);
        Room::new(x, y, room_width, room_height)
    }

    fn sweep(&self, width: usize, height: usize, accepted: &[Room]) -> Option<Room> {
        let size = self.min_room_size as i32;
        for y in 1..=(height as i32 - size - 1) {
            for x in 1..=(width as i32 - size - 1) {
                let candidate = Room::new(x, y, size, size);
                if fits(&candidate, accepted) {
                    return Some(candidate);
                }
            }
        }
        None
    }
}

fn fits(candidate: &Room, accepted: &[Room]) -> bool {
    accepted.iter().all(|room| !candidate.overlaps_with_padding(room, ROOM_PADDING))
}

impl DungeonGenerator for SimpleRandomDungeonGenerator {
    fn algorithm(&self) -> AlgorithmType {
        AlgorithmType::SimpleRandom
    }

    fn theme(&self) -> AreaTheme {
        self.theme
    }

    // Each room slot gets a fixed budget of random proposals; when that runs
    // out a deterministic sweep places a minimum-size room, and if even the
    // sweep finds no space the map keeps the rooms it already has.
    fn generate(
        &self,
        width: usize,
        height: usize,
        seed: u64,
    ) -> Result<DungeonMap, GenerationError> {
        self.validate(width, height)?;

        let mut rng = GenRng::from_seed(seed);
        let mut map = DungeonMap::new(width, height, self.theme, seed);
        let room_count = rng.range_usize(self.min_rooms, self.max_rooms);

        let mut rooms: Vec<Room> = Vec::new();
        while rooms.len() < room_count {
            let proposed = (0..ATTEMPTS_PER_ROOM)
                .map(|_| self.propose(width, height, &mut rng))
                .find(|candidate| fits(candidate, &rooms));
            match proposed.or_else(|| self.sweep(width, height, &rooms)) {
                Some(room) => rooms.push(room),
                None => {
                    warn!(
                        "simple_random placed {} of {room_count} rooms before running out of space (seed {seed}, {width}x{height})",
                        rooms.len()
                    );
                    break;
                }
            }
        }

        if rooms.is_empty() {
            return Err(GenerationError::EmptyGeneration {
                algorithm: self.algorithm(),
                width,
                height,
                seed,
            });
        }

        let last = rooms.len() - 1;
        tag_spawn_and_boss(&mut rooms, last);

        let corridors: Vec<Corridor> = rooms
            .windows(2)
            .map(|pair| Corridor::new(pair[0].center(), pair[1].center()))
            .collect();
        for room in rooms {
            map.carve_room(&room);
            map.push_room(room);
        }
        for corridor in corridors {
            map.carve_corridor(&corridor);
            map.push_corridor(corridor);
        }

        debug!(
            "simple_random generated {} rooms, {} corridors, {} open tiles (seed {seed}, {width}x{height})",
            map.rooms().len(),
            map.corridors().len(),
            map.count_open_tiles()
        );
        Ok(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::RoomType;

    #[test]
    fn accepted_rooms_keep_their_padding() {
        let map = SimpleRandomDungeonGenerator::default().generate(60, 60, 42).expect("valid");
        let rooms = map.rooms();
        for (index, room) in rooms.iter().enumerate() {
            for other in &rooms[index + 1..] {
                assert!(!room.overlaps_with_padding(other, ROOM_PADDING), "{room:?} vs {other:?}");
            }
        }
    }

    #[test]
    fn rooms_are_chained_first_to_last() {
        let map = SimpleRandomDungeonGenerator::new(10, 12, AreaTheme::Forest)
            .generate(70, 70, 7)
            .expect("valid");
        let rooms = map.rooms();

        assert_eq!(map.corridors().len(), rooms.len() - 1);
        for (corridor, pair) in map.corridors().iter().zip(rooms.windows(2)) {
            assert_eq!(corridor.start(), pair[0].center());
            assert_eq!(corridor.end(), pair[1].center());
        }
        assert_eq!(rooms[0].room_type(), RoomType::Spawn);
        assert_eq!(rooms[rooms.len() - 1].room_type(), RoomType::Boss);
    }

    #[test]
    fn crowded_maps_degrade_to_fewer_rooms() {
        let map = SimpleRandomDungeonGenerator::new(20, 20, AreaTheme::Dungeon)
            .with_room_size(5, 5)
            .generate(15, 15, 3)
            .expect("a 15x15 map fits at least one room");

        assert!(!map.rooms().is_empty());
        assert!(map.rooms().len() < 20);
        assert_eq!(map.corridors().len(), map.rooms().len() - 1);
    }

    #[test]
    fn unbounded_room_counts_fill_until_space_runs_out() {
        let map = SimpleRandomDungeonGenerator::new(1, usize::MAX, AreaTheme::Dungeon)
            .generate(60, 60, 42)
            .expect("a 60x60 map fits at least one room");

        assert!(!map.rooms().is_empty());
        assert_eq!(map.corridors().len(), map.rooms().len() - 1);
        for (index, room) in map.rooms().iter().enumerate() {
            let later = &map.rooms()[index + 1..];
            assert!(later.iter().all(|other| !room.overlaps_with_padding(other, ROOM_PADDING)));
        }
    }

    #[test]
    fn sweep_finds_the_first_free_spot() {
        let generator = SimpleRandomDungeonGenerator::new(1, 1, AreaTheme::Dungeon).with_room_size(3, 3);
        let blocker = Room::new(1, 1, 3, 3);
        let found = generator.sweep(12, 12, &[blocker]).expect("space remains");
        assert_eq!(found, Room::new(7, 1, 3, 3));
    }

    #[test]
    fn invalid_counts_and_sizes_are_rejected() {
        assert_eq!(
            SimpleRandomDungeonGenerator::new(9, 3, AreaTheme::Dungeon).generate(60, 60, 1),
            Err(GenerationError::Configuration(ConfigurationError::RoomCountRange { min: 9, max: 3 }))
        );
        assert_eq!(
            SimpleRandomDungeonGenerator::new(0, 3, AreaTheme::Dungeon).generate(60, 60, 1),
            Err(GenerationError::Configuration(ConfigurationError::BelowMinimum {
                name: "min_rooms",
                value: 0,
                minimum: 1,
            }))
        );
        assert!(matches!(
            SimpleRandomDungeonGenerator::default().generate(14, 60, 1),
            Err(GenerationError::Configuration(ConfigurationError::MapTooSmall { .. }))
        ));
    }
}
