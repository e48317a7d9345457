//! Room population: contents rolled from template densities, then the room
//! type and description that follow from them. Geometry is left untouched.

use crate::mapgen::seed::{DECORATION_STREAM, GenRng, mix_seed_stream};
use crate::mapgen::{DungeonMap, RoomContents};
use crate::types::RoomType;

use super::describe::room_description;
use super::template::AreaTemplate;

fn roll_contents(template: &AreaTemplate, rng: &mut GenRng) -> RoomContents {
    let has_treasure = rng.chance(template.treasure_density());
    let has_trap = rng.chance(template.trap_density());
    let monster_count =
        if rng.chance(template.monster_density()) { rng.range_usize(1, 3) as u8 } else { 0 };
    RoomContents { has_treasure, has_trap, monster_count }
}

fn classify(contents: RoomContents) -> RoomType {
    if contents.has_treasure {
        RoomType::Treasure
    } else if contents.has_trap {
        RoomType::Trap
    } else if contents.monster_count == 0 {
        RoomType::Safe
    } else {
        RoomType::Chamber
    }
}

pub(super) fn populate_rooms(map: &mut DungeonMap, template: &AreaTemplate) {
    let theme = template.theme();
    let mut rng = GenRng::from_seed(mix_seed_stream(map.seed(), DECORATION_STREAM));

    for room in map.rooms_mut() {
        match room.room_type() {
            RoomType::Spawn => {}
            RoomType::Boss => room.set_contents(RoomContents {
                monster_count: rng.range_usize(2, 4) as u8,
                ..RoomContents::default()
            }),
            _ => {
                let contents = roll_contents(template, &mut rng);
                room.set_contents(contents);
                room.set_room_type(classify(contents));
            }
        }
        let description = room_description(theme, room);
        room.set_description(description);
    }
}
