//! Grid and tile-space primitives shared by the generators.

use crate::types::Pos;

use super::room::Room;

pub(super) fn in_bounds(width: usize, height: usize, pos: Pos) -> bool {
    pos.x >= 0 && pos.y >= 0 && (pos.x as usize) < width && (pos.y as usize) < height
}

pub(super) fn tile_index(width: usize, pos: Pos) -> usize {
    (pos.y as usize) * width + (pos.x as usize)
}

pub(super) fn manhattan(a: Pos, b: Pos) -> u32 {
    a.x.abs_diff(b.x) + a.y.abs_diff(b.y)
}

pub(super) fn squared_distance(a: Pos, b: Pos) -> u64 {
    let dx = u64::from(a.x.abs_diff(b.x));
    let dy = u64::from(a.y.abs_diff(b.y));
    dx * dx + dy * dy
}

// Prim's minimum spanning tree over room centers as `(connected, newly_joined)`
// pairs. Distance ties go to the lowest pair.
pub(super) fn minimum_spanning_pairs(rooms: &[Room]) -> Vec<(usize, usize)> {
    if rooms.len() < 2 {
        return Vec::new();
    }

    let mut pairs = Vec::with_capacity(rooms.len() - 1);
    let mut connected_room_indices = vec![0_usize];
    let mut pending_room_indices: Vec<usize> = (1..rooms.len()).collect();

    while !pending_room_indices.is_empty() {
        let mut best_choice: Option<(u32, usize, usize)> = None;
        for &connected_index in &connected_room_indices {
            let connected_center = rooms[connected_index].center();
            for &pending_index in &pending_room_indices {
                let distance = manhattan(connected_center, rooms[pending_index].center());
                let candidate = (distance, connected_index, pending_index);
                if best_choice.is_none_or(|best| candidate < best) {
                    best_choice = Some(candidate);
                }
            }
        }

        let Some((_, connected_index, pending_index)) = best_choice else {
            break;
        };
        pairs.push((connected_index, pending_index));
        connected_room_indices.push(pending_index);
        pending_room_indices.retain(|&index| index != pending_index);
    }

    pairs
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn in_bounds_rejects_negative_and_overflowing_positions() {
        assert!(in_bounds(5, 4, Pos { y: 3, x: 4 }));
        assert!(!in_bounds(5, 4, Pos { y: 4, x: 0 }));
        assert!(!in_bounds(5, 4, Pos { y: 0, x: -1 }));
    }

    #[test]
    fn spanning_pairs_join_every_room_once() {
        let rooms = vec![
            Room::new(1, 1, 3, 3),
            Room::new(30, 1, 3, 3),
            Room::new(8, 1, 3, 3),
            Room::new(1, 20, 3, 3),
        ];
        let pairs = minimum_spanning_pairs(&rooms);

        assert_eq!(pairs.len(), rooms.len() - 1);
        assert_eq!(pairs[0], (0, 2), "nearest room joins first");
        let mut joined: Vec<usize> = pairs.iter().map(|&(_, pending)| pending).collect();
        joined.sort_unstable();
        assert_eq!(joined, vec![1, 2, 3]);
    }

    #[test]
    fn single_room_needs_no_links() {
        assert!(minimum_spanning_pairs(&[Room::new(0, 0, 2, 2)]).is_empty());
    }
}
