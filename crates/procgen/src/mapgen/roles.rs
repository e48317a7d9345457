//! Spawn and boss room selection.

use crate::types::RoomType;

use super::grid::squared_distance;
use super::room::Room;

// Index of the room whose center lies farthest from `origin`'s center.
// Ties go to the later room.
pub(super) fn farthest_room_from(rooms: &[Room], origin: usize) -> usize {
    let origin_center = rooms[origin].center();
    let mut best = origin;
    let mut best_distance = 0_u64;
    for (index, room) in rooms.iter().enumerate() {
        let distance = squared_distance(origin_center, room.center());
        if distance >= best_distance && index != origin {
            best = index;
            best_distance = distance;
        }
    }
    best
}

pub(super) fn tag_spawn_and_boss(rooms: &mut [Room], boss: usize) {
    let Some(first) = rooms.first_mut() else {
        return;
    };
    first.set_room_type(RoomType::Spawn);
    if boss != 0 && boss < rooms.len() {
        rooms[boss].set_room_type(RoomType::Boss);
    }
}
