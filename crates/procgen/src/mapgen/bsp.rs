//! Binary space partitioning: split the map into a tree of regions, carve one
//! room per leaf, and join sibling subtrees on the way back up.

use log::{debug, trace};
use slotmap::{SecondaryMap, SlotMap, new_key_type};

use crate::error::{GenerationError, check_map_size, check_minimum};
use crate::types::{AlgorithmType, AreaTheme};

use super::corridor::{Bend, Corridor};
use super::dungeon::DungeonMap;
use super::grid::squared_distance;
use super::roles::{farthest_room_from, tag_spawn_and_boss};
use super::room::Room;
use super::seed::GenRng;
use super::DungeonGenerator;

pub(super) const DEFAULT_MIN_ROOM_SIZE: usize = 6;
pub const MIN_BSP_ROOM_SIZE: usize = 4;
const MAX_SPLIT_DEPTH: u32 = 32;
const LEAF_MARGIN: i32 = 1;
const MIN_ROOM_EDGE: i32 = 2;

new_key_type! {
    struct NodeId;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Region {
    x: i32,
    y: i32,
    width: i32,
    height: i32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum SplitAxis {
    Vertical,
    Horizontal,
}

#[derive(Debug)]
struct BspNode {
    region: Region,
    children: Option<(NodeId, NodeId)>,
}

struct Partition {
    nodes: SlotMap<NodeId, BspNode>,
    root: NodeId,
}

impl Partition {
    fn build(width: usize, height: usize, min_size: i32, rng: &mut GenRng) -> Self {
        let mut nodes = SlotMap::with_key();
        let region = Region { x: 0, y: 0, width: width as i32, height: height as i32 };
        let root = split_region(&mut nodes, region, 0, min_size, rng);
        Self { nodes, root }
    }

    fn leaves(&self) -> Vec<NodeId> {
        let mut leaves = Vec::new();
        let mut stack = vec![self.root];
        while let Some(id) = stack.pop() {
            match self.nodes[id].children {
                Some((first, second)) => {
                    stack.push(second);
                    stack.push(first);
                }
                None => leaves.push(id),
            }
        }
        leaves
    }
}

fn split_region(
    nodes: &mut SlotMap<NodeId, BspNode>,
    region: Region,
    depth: u32,
    min_size: i32,
    rng: &mut GenRng,
) -> NodeId {
    let can_split_vertically = region.width >= min_size * 2;
    let can_split_horizontally = region.height >= min_size * 2;
    if depth >= MAX_SPLIT_DEPTH || (!can_split_vertically && !can_split_horizontally) {
        return nodes.insert(BspNode { region, children: None });
    }

    let axis = if region.width > region.height {
        SplitAxis::Vertical
    } else if region.height > region.width {
        SplitAxis::Horizontal
    } else if rng.coin() {
        SplitAxis::Vertical
    } else {
        SplitAxis::Horizontal
    };

    let (first, second) = match axis {
        SplitAxis::Vertical => {
            let offset = rng.range_i32(min_size, region.width - min_size);
            (
                Region { width: offset, ..region },
                Region { x: region.x + offset, width: region.width - offset, ..region },
            )
        }
        SplitAxis::Horizontal => {
            let offset = rng.range_i32(min_size, region.height - min_size);
            (
                Region { height: offset, ..region },
                Region { y: region.y + offset, height: region.height - offset, ..region },
            )
        }
    };
    trace!("bsp split {region:?} along {axis:?} at depth {depth}");

    let first_id = split_region(nodes, first, depth + 1, min_size, rng);
    let second_id = split_region(nodes, second, depth + 1, min_size, rng);
    nodes.insert(BspNode { region, children: Some((first_id, second_id)) })
}

fn room_inside(region: Region, rng: &mut GenRng) -> Room {
    let inner_width = region.width - LEAF_MARGIN * 2;
    let inner_height = region.height - LEAF_MARGIN * 2;
    let room_width =
        rng.range_i32((inner_width / 2).max(MIN_ROOM_EDGE).min(inner_width), inner_width);
    let room_height =
        rng.range_i32((inner_height / 2).max(MIN_ROOM_EDGE).min(inner_height), inner_height);
    let x = region.x + LEAF_MARGIN + rng.range_i32(0, inner_width - room_width);
    let y = region.y + LEAF_MARGIN + rng.range_i32(0, inner_height - room_height);
    Room::new(x, y, room_width, room_height)
}

// Nearest pair of rooms across two subtrees; ties go to the lowest indices.
fn closest_pair(rooms: &[Room], first: &[usize], second: &[usize]) -> Option<(usize, usize)> {
    let mut best: Option<(u64, usize, usize)> = None;
    for &left in first {
        for &right in second {
            let distance = squared_distance(rooms[left].center(), rooms[right].center());
            let candidate = (distance, left, right);
            if best.is_none_or(|current| candidate < current) {
                best = Some(candidate);
            }
        }
    }
    best.map(|(_, left, right)| (left, right))
}

// Post-order walk that links sibling subtrees and returns the room indices
// found under `id`.
fn connect_subtree(
    partition: &Partition,
    id: NodeId,
    room_of_leaf: &SecondaryMap<NodeId, usize>,
    rooms: &[Room],
    rng: &mut GenRng,
    corridors: &mut Vec<Corridor>,
) -> Vec<usize> {
    let Some((first, second)) = partition.nodes[id].children else {
        return room_of_leaf.get(id).copied().into_iter().collect();
    };

    let mut first_rooms = connect_subtree(partition, first, room_of_leaf, rooms, rng, corridors);
    let second_rooms = connect_subtree(partition, second, room_of_leaf, rooms, rng, corridors);
    if let Some((left, right)) = closest_pair(rooms, &first_rooms, &second_rooms) {
        let bend = if rng.coin() { Bend::HorizontalFirst } else { Bend::VerticalFirst };
        corridors.push(Corridor::with_bend(rooms[left].center(), rooms[right].center(), bend));
    }
    first_rooms.extend(second_rooms);
    first_rooms
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BspDungeonGenerator {
    min_room_size: usize,
    theme: AreaTheme,
}

impl Default for BspDungeonGenerator {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_ROOM_SIZE, AreaTheme::Dungeon)
    }
}

impl BspDungeonGenerator {
    pub fn new(min_room_size: usize, theme: AreaTheme) -> Self {
        Self { min_room_size, theme }
    }

    pub fn min_room_size(&self) -> usize {
        self.min_room_size
    }
}

impl DungeonGenerator for BspDungeonGenerator {
    fn algorithm(&self) -> AlgorithmType {
        AlgorithmType::BinarySpacePartition
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
        check_minimum("min_room_size", self.min_room_size, MIN_BSP_ROOM_SIZE)?;
        check_map_size(self.algorithm(), width, height, self.min_room_size, self.min_room_size)?;

        let mut rng = GenRng::from_seed(seed);
        let mut map = DungeonMap::new(width, height, self.theme, seed);
        let partition = Partition::build(width, height, self.min_room_size as i32, &mut rng);

        let leaves = partition.leaves();
        let mut rooms = Vec::with_capacity(leaves.len());
        let mut room_of_leaf = SecondaryMap::with_capacity(leaves.len());
        for leaf in leaves {
            room_of_leaf.insert(leaf, rooms.len());
            rooms.push(room_inside(partition.nodes[leaf].region, &mut rng));
        }

        let mut corridors = Vec::with_capacity(rooms.len().saturating_sub(1));
        connect_subtree(&partition, partition.root, &room_of_leaf, &rooms, &mut rng, &mut corridors);

        let boss = farthest_room_from(&rooms, 0);
        tag_spawn_and_boss(&mut rooms, boss);

        for room in rooms {
            map.carve_room(&room);
            map.push_room(room);
        }
        for corridor in corridors {
            map.carve_corridor(&corridor);
            map.push_corridor(corridor);
        }

        debug!(
            "bsp generated {} rooms, {} corridors, {} open tiles (seed {seed}, {width}x{height})",
            map.rooms().len(),
            map.corridors().len(),
            map.count_open_tiles()
        );
        Ok(map)
    }
}
