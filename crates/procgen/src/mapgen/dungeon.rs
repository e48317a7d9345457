//! The tile grid plus the ordered rooms and corridors a generator produced.

use serde::Serialize;
use xxhash_rust::xxh3::xxh3_64;

use crate::types::{AreaTheme, Pos, TileKind};

use super::corridor::Corridor;
use super::grid::{in_bounds, tile_index};
use super::room::Room;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DungeonMap {
    width: usize,
    height: usize,
    tiles: Vec<TileKind>,
    rooms: Vec<Room>,
    corridors: Vec<Corridor>,
    theme: AreaTheme,
    seed: u64,
}

impl DungeonMap {
    pub fn new(width: usize, height: usize, theme: AreaTheme, seed: u64) -> Self {
        Self {
            width,
            height,
            tiles: vec![TileKind::Wall; width * height],
            rooms: Vec::new(),
            corridors: Vec::new(),
            theme,
            seed,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn theme(&self) -> AreaTheme {
        self.theme
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    pub fn corridors(&self) -> &[Corridor] {
        &self.corridors
    }

    pub fn tiles(&self) -> &[TileKind] {
        &self.tiles
    }

    pub fn initialize_tiles(&mut self) {
        self.tiles.clear();
        self.tiles.resize(self.width * self.height, TileKind::Wall);
    }

    pub fn carve_room(&mut self, room: &Room) {
        let left = room.x().max(0);
        let top = room.y().max(0);
        let right = room.right().min(self.width as i32);
        let bottom = room.bottom().min(self.height as i32);
        for y in top..bottom {
            for x in left..right {
                self.tiles[(y as usize) * self.width + (x as usize)] = TileKind::Floor;
            }
        }
    }

    pub fn carve_corridor(&mut self, corridor: &Corridor) {
        for &pos in corridor.cells() {
            self.set_tile(pos, TileKind::Floor);
        }
    }

    /// Out-of-range coordinates read as walls.
    pub fn get_tile(&self, x: i32, y: i32) -> TileKind {
        self.tile_at(Pos { y, x })
    }

    pub fn tile_at(&self, pos: Pos) -> TileKind {
        if !in_bounds(self.width, self.height, pos) {
            return TileKind::Wall;
        }
        self.tiles[tile_index(self.width, pos)]
    }

    pub fn count_open_tiles(&self) -> usize {
        self.tiles.iter().filter(|&&tile| tile == TileKind::Floor).count()
    }

    /// Stable byte encoding of the grid, rooms and corridors.
    pub fn canonical_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.tiles.len() + 64);
        bytes.extend((self.width as u32).to_le_bytes());
        bytes.extend((self.height as u32).to_le_bytes());
        bytes.extend(self.seed.to_le_bytes());
        bytes.push(self.theme.index() as u8);
        for tile in &self.tiles {
            bytes.push(match tile {
                TileKind::Wall => 0,
                TileKind::Floor => 1,
            });
        }

        bytes.extend((self.rooms.len() as u32).to_le_bytes());
        for room in &self.rooms {
            bytes.extend(room.x().to_le_bytes());
            bytes.extend(room.y().to_le_bytes());
            bytes.extend(room.width().to_le_bytes());
            bytes.extend(room.height().to_le_bytes());
            bytes.push(room.room_type() as u8);
        }

        bytes.extend((self.corridors.len() as u32).to_le_bytes());
        for corridor in &self.corridors {
            bytes.extend((corridor.len() as u32).to_le_bytes());
            for cell in corridor.cells() {
                bytes.extend(cell.y.to_le_bytes());
                bytes.extend(cell.x.to_le_bytes());
            }
        }

        bytes
    }

    pub fn fingerprint(&self) -> u64 {
        xxh3_64(&self.canonical_bytes())
    }

    pub(crate) fn set_tile(&mut self, pos: Pos, tile: TileKind) {
        if in_bounds(self.width, self.height, pos) {
            let index = tile_index(self.width, pos);
            self.tiles[index] = tile;
        }
    }

    pub(crate) fn replace_tiles(&mut self, tiles: Vec<TileKind>) {
        debug_assert_eq!(tiles.len(), self.width * self.height);
        self.tiles = tiles;
    }

    pub(crate) fn push_room(&mut self, room: Room) {
        self.rooms.push(room);
    }

    pub(crate) fn push_corridor(&mut self, corridor: Corridor) {
        self.corridors.push(corridor);
    }

    pub(crate) fn rooms_mut(&mut self) -> &mut [Room] {
        &mut self.rooms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_map_is_all_wall() {
        let map = DungeonMap::new(20, 20, AreaTheme::Dungeon, 0);
        assert_eq!(map.tiles().len(), 400);
        assert!(map.tiles().iter().all(|&tile| tile == TileKind::Wall));
        assert_eq!(map.count_open_tiles(), 0);
    }

    #[test]
    fn carve_room_touches_only_the_rectangle() {
        let mut map = DungeonMap::new(20, 20, AreaTheme::Dungeon, 0);
        map.carve_room(&Room::new(5, 5, 10, 10));

        for y in 5..15 {
            for x in 5..15 {
                assert_eq!(map.get_tile(x, y), TileKind::Floor, "({x}, {y})");
            }
        }
        assert_eq!(map.get_tile(5, 4), TileKind::Wall);
        assert_eq!(map.get_tile(4, 5), TileKind::Wall);
        assert_eq!(map.get_tile(15, 14), TileKind::Wall);
        assert_eq!(map.count_open_tiles(), 100);
    }

    #[test]
    fn carving_clips_to_the_grid() {
        let mut map = DungeonMap::new(10, 10, AreaTheme::Cave, 0);
        map.carve_room(&Room::new(-3, 8, 5, 5));
        map.carve_corridor(&Corridor::new(Pos { y: 0, x: 4 }, Pos { y: 3, x: 12 }));

        assert_eq!(map.get_tile(0, 8), TileKind::Floor);
        assert_eq!(map.get_tile(1, 9), TileKind::Floor);
        assert_eq!(map.get_tile(2, 9), TileKind::Wall);
        assert_eq!(map.get_tile(4, 0), TileKind::Floor);
        assert_eq!(map.get_tile(9, 0), TileKind::Floor);
        assert_eq!(map.get_tile(9, 1), TileKind::Wall);
    }

    #[test]
    fn out_of_range_reads_are_walls() {
        let mut map = DungeonMap::new(20, 20, AreaTheme::Dungeon, 0);
        map.carve_room(&Room::new(0, 0, 20, 20));

        assert_eq!(map.get_tile(10, 10), TileKind::Floor);
        assert_eq!(map.get_tile(-1, 10), TileKind::Wall);
        assert_eq!(map.get_tile(10, -1), TileKind::Wall);
        assert_eq!(map.get_tile(20, 0), TileKind::Wall);
        assert_eq!(map.get_tile(100, 100), TileKind::Wall);
        assert_eq!(map.get_tile(i32::MIN, i32::MAX), TileKind::Wall);
    }

    #[test]
    fn initialize_tiles_resets_carved_cells() {
        let mut map = DungeonMap::new(8, 6, AreaTheme::Dungeon, 0);
        map.carve_room(&Room::new(1, 1, 3, 3));
        map.initialize_tiles();
        assert_eq!(map.count_open_tiles(), 0);
        assert_eq!(map.tiles().len(), 48);
    }

    #[test]
    fn fingerprint_tracks_tile_changes() {
        let mut map = DungeonMap::new(12, 12, AreaTheme::Dungeon, 3);
        let empty = map.fingerprint();
        map.carve_room(&Room::new(2, 2, 3, 3));
        assert_ne!(empty, map.fingerprint());
        assert_eq!(map.fingerprint(), map.clone().fingerprint());
    }
}
