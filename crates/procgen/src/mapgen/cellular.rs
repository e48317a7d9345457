//! Cave carving: random noise smoothed by a neighbour-count rule, then cut
//! into rooms along its connected floor regions.

use log::{debug, trace};

use crate::error::{GenerationError, check_map_size, check_probability};
use crate::types::{AlgorithmType, AreaTheme, Pos, TileKind};

use super::corridor::{Bend, Corridor};
use super::dungeon::DungeonMap;
use super::grid::{minimum_spanning_pairs, tile_index};
use super::roles::{farthest_room_from, tag_spawn_and_boss};
use super::room::Room;
use super::seed::{CORRIDOR_BEND_STREAM, GenRng, mix_seed_stream};
use super::DungeonGenerator;

pub(super) const DEFAULT_FILL_PROBABILITY: f64 = 0.45;
pub(super) const DEFAULT_ITERATIONS: u32 = 3;
const WALL_THRESHOLD: u8 = 5;
const MIN_ROOM_EDGE: i32 = 3;
pub const MIN_CAVE_SIZE: usize = 5;

#[derive(Clone, Debug, PartialEq)]
pub struct CellularAutomataDungeonGenerator {
    fill_probability: f64,
    iterations: u32,
    min_region_tiles: usize,
    theme: AreaTheme,
}

impl Default for CellularAutomataDungeonGenerator {
    fn default() -> Self {
        Self::new(DEFAULT_FILL_PROBABILITY, DEFAULT_ITERATIONS, AreaTheme::Cave)
    }
}

impl CellularAutomataDungeonGenerator {
    pub fn new(fill_probability: f64, iterations: u32, theme: AreaTheme) -> Self {
        Self { fill_probability, iterations, min_region_tiles: 1, theme }
    }

    pub fn with_min_region_tiles(mut self, min_region_tiles: usize) -> Self {
        self.min_region_tiles = min_region_tiles.max(1);
        self
    }

    pub fn fill_probability(&self) -> f64 {
        self.fill_probability
    }

    pub fn iterations(&self) -> u32 {
        self.iterations
    }
}

fn is_border(width: usize, height: usize, x: usize, y: usize) -> bool {
    x == 0 || y == 0 || x == width - 1 || y == height - 1
}

fn seed_noise(width: usize, height: usize, fill_probability: f64, rng: &mut GenRng) -> Vec<TileKind> {
    let mut tiles = vec![TileKind::Wall; width * height];
    for y in 0..height {
        for x in 0..width {
            if is_border(width, height, x, y) {
                continue;
            }
            if !rng.chance(fill_probability) {
                tiles[y * width + x] = TileKind::Floor;
            }
        }
    }
    tiles
}

// Walls in the 3x3 block centred on `(x, y)`, the cell itself included.
// Cells past the edge count as walls.
fn block_walls(tiles: &[TileKind], width: usize, height: usize, x: usize, y: usize) -> u8 {
    let mut count = 0;
    for dy in -1..=1 {
        for dx in -1..=1 {
            let nx = x as i32 + dx;
            let ny = y as i32 + dy;
            let outside = nx < 0 || ny < 0 || nx as usize >= width || ny as usize >= height;
            if outside || tiles[(ny as usize) * width + (nx as usize)] == TileKind::Wall {
                count += 1;
            }
        }
    }
    count
}

fn smooth(tiles: &[TileKind], width: usize, height: usize) -> Vec<TileKind> {
    let mut next = tiles.to_vec();
    for y in 1..height - 1 {
        for x in 1..width - 1 {
            next[y * width + x] = if block_walls(tiles, width, height, x, y) >= WALL_THRESHOLD {
                TileKind::Wall
            } else {
                TileKind::Floor
            };
        }
    }
    next
}

#[derive(Debug)]
struct CaveRegion {
    cells: Vec<Pos>,
    bounds: Room,
}

fn floor_regions(tiles: &[TileKind], width: usize, height: usize) -> Vec<CaveRegion> {
    let mut visited = vec![false; tiles.len()];
    let mut regions = Vec::new();
    let mut stack = Vec::new();

    for start in 0..tiles.len() {
        if visited[start] || tiles[start] != TileKind::Floor {
            continue;
        }
        visited[start] = true;
        stack.push(Pos { y: (start / width) as i32, x: (start % width) as i32 });

        let mut cells = Vec::new();
        let (mut min_x, mut min_y) = (i32::MAX, i32::MAX);
        let (mut max_x, mut max_y) = (i32::MIN, i32::MIN);
        while let Some(pos) = stack.pop() {
            cells.push(pos);
            min_x = min_x.min(pos.x);
            min_y = min_y.min(pos.y);
            max_x = max_x.max(pos.x);
            max_y = max_y.max(pos.y);

            for next in [
                Pos { y: pos.y - 1, x: pos.x },
                Pos { y: pos.y, x: pos.x + 1 },
                Pos { y: pos.y + 1, x: pos.x },
                Pos { y: pos.y, x: pos.x - 1 },
            ] {
                if next.x < 0 || next.y < 0 || next.x as usize >= width || next.y as usize >= height
                {
                    continue;
                }
                let index = tile_index(width, next);
                if visited[index] || tiles[index] != TileKind::Floor {
                    continue;
                }
                visited[index] = true;
                stack.push(next);
            }
        }

        let bounds = Room::new(min_x, min_y, max_x - min_x + 1, max_y - min_y + 1);
        regions.push(CaveRegion { cells, bounds });
    }

    regions
}

// Largest rectangle of `open` cells inside `bounds` with both edges at least
// `min_edge`, found with the row-by-row histogram sweep. Ties keep the first
// rectangle found.
fn largest_open_rectangle(
    open: &[bool],
    width: usize,
    bounds: &Room,
    min_edge: i32,
) -> Option<Room> {
    let left = bounds.x() as usize;
    let span = bounds.width() as usize;
    let mut heights = vec![0_i32; span];
    let mut stack: Vec<(usize, i32)> = Vec::with_capacity(span + 1);
    let mut best: Option<(usize, Room)> = None;

    for y in bounds.y()..bounds.bottom() {
        let row = y as usize * width + left;
        for (column, height) in heights.iter_mut().enumerate() {
            *height = if open[row + column] { *height + 1 } else { 0 };
        }

        stack.clear();
        for column in 0..=span {
            let current = heights.get(column).copied().unwrap_or(0);
            let mut start = column;
            while let Some(&(open_column, height)) = stack.last() {
                if height < current {
                    break;
                }
                stack.pop();
                let span_width = (column - open_column) as i32;
                let area = height as usize * span_width as usize;
                let fits = height >= min_edge.max(1) && span_width >= min_edge;
                if fits && best.as_ref().is_none_or(|(best_area, _)| area > *best_area) {
                    let x = (left + open_column) as i32;
                    let room = Room::new(x, y - height + 1, span_width, height);
                    best = Some((area, room));
                }
                start = open_column;
            }
            stack.push((start, current));
        }
    }

    best.map(|(_, room)| room)
}

// Cuts a region into all-floor rooms, largest first, each keeping a
// one-cell gap to the rooms already taken. `open` must be all `false` on
// entry and is left that way.
fn rooms_in_region(region: &CaveRegion, width: usize, open: &mut [bool]) -> Vec<Room> {
    for &pos in &region.cells {
        open[tile_index(width, pos)] = true;
    }

    let bounds = &region.bounds;
    let mut rooms = Vec::new();
    while let Some(room) = largest_open_rectangle(open, width, bounds, MIN_ROOM_EDGE) {
        for y in (room.y() - 1).max(bounds.y())..(room.bottom() + 1).min(bounds.bottom()) {
            for x in (room.x() - 1).max(bounds.x())..(room.right() + 1).min(bounds.right()) {
                open[y as usize * width + x as usize] = false;
            }
        }
        rooms.push(room);
    }

    for &pos in &region.cells {
        open[tile_index(width, pos)] = false;
    }
    rooms
}

impl DungeonGenerator for CellularAutomataDungeonGenerator {
    fn algorithm(&self) -> AlgorithmType {
        AlgorithmType::CellularAutomata
    }

    fn theme(&self) -> AreaTheme {
        self.theme
    }

    fn generate(
        &self,
        width: usize,
        height: usize,
        seed: u64,
    ) -> Result<DungeonMap, GenerationError> {
        check_probability("fill_probability", self.fill_probability)?;
        check_map_size(self.algorithm(), width, height, MIN_CAVE_SIZE, MIN_CAVE_SIZE)?;

        let mut rng = GenRng::from_seed(seed);
        let mut tiles = seed_noise(width, height, self.fill_probability, &mut rng);
        for _ in 0..self.iterations {
            tiles = smooth(&tiles, width, height);
        }

        let mut open = vec![false; tiles.len()];
        let mut rooms = Vec::new();
        for region in floor_regions(&tiles, width, height) {
            let region_rooms = if region.cells.len() >= self.min_region_tiles {
                rooms_in_region(&region, width, &mut open)
            } else {
                Vec::new()
            };
            if region_rooms.is_empty() {
                trace!("filling cave region of {} tiles at {:?}", region.cells.len(), region.bounds);
                for &pos in &region.cells {
                    tiles[tile_index(width, pos)] = TileKind::Wall;
                }
                continue;
            }
            trace!(
                "cave region of {} tiles at {:?} yields {} rooms",
                region.cells.len(),
                region.bounds,
                region_rooms.len()
            );
            rooms.extend(region_rooms);
        }

        if rooms.is_empty() {
            return Err(GenerationError::EmptyGeneration {
                algorithm: self.algorithm(),
                width,
                height,
                seed,
            });
        }

        let mut map = DungeonMap::new(width, height, self.theme, seed);
        map.replace_tiles(tiles);

        let bend_seed = mix_seed_stream(seed, CORRIDOR_BEND_STREAM);
        for (connected, joined) in minimum_spanning_pairs(&rooms) {
            let pair_key = ((connected as u64) << 32) | joined as u64;
            let bend = if mix_seed_stream(bend_seed, pair_key) & 1 == 0 {
                Bend::HorizontalFirst
            } else {
                Bend::VerticalFirst
            };
            let corridor = Corridor::with_bend(rooms[connected].center(), rooms[joined].center(), bend);
            map.carve_corridor(&corridor);
            map.push_corridor(corridor);
        }

        let boss = farthest_room_from(&rooms, 0);
        tag_spawn_and_boss(&mut rooms, boss);
        for room in rooms {
            map.carve_room(&room);
            map.push_room(room);
        }

        debug!(
            "cellular generated {} rooms, {} corridors, {} open tiles (seed {seed}, {width}x{height})",
            map.rooms().len(),
            map.corridors().len(),
            map.count_open_tiles()
        );
        Ok(map)
    }
}
