use crate::mapgen::Room;
use crate::types::{AreaTheme, RoomType};

fn theme_backdrop(theme: AreaTheme, width: i32, height: i32) -> String {
    match theme {
        AreaTheme::Dungeon => format!("A stone chamber {width}x{height} feet"),
        AreaTheme::Cave => format!("A natural cavern with {width}x{height} feet of space"),
        AreaTheme::Forest => format!("A clearing in the woods measuring {width}x{height} feet"),
        AreaTheme::Ruins => {
            format!("Crumbling remains of an ancient structure {width}x{height} feet")
        }
        AreaTheme::Castle => format!("A fortress hall spanning {width}x{height} feet"),
        AreaTheme::Temple => format!("A sacred chamber {width}x{height} feet across"),
        AreaTheme::Sewers => format!("A fetid tunnel {width}x{height} feet long"),
        AreaTheme::UndergroundCity => format!("A city plaza measuring {width}x{height} feet"),
    }
}

fn room_type_note(room_type: RoomType) -> Option<&'static str> {
    match room_type {
        RoomType::Spawn => Some("Faint footprints mark where the journey begins."),
        RoomType::Boss => Some("A heavy dread hangs over this place."),
        RoomType::Treasure => Some("Something glints among the debris."),
        RoomType::Trap => Some("The floor is scored with suspicious grooves."),
        RoomType::Safe => Some("It is quiet here."),
        RoomType::Corridor => Some("The walls press in close."),
        RoomType::Chamber => None,
    }
}

/// Prose for one room built from its theme, role, size and contents.
pub fn room_description(theme: AreaTheme, room: &Room) -> String {
    let mut text = theme_backdrop(theme, room.width(), room.height());
    text.push('.');

    if let Some(note) = room_type_note(room.room_type()) {
        text.push(' ');
        text.push_str(note);
    }

    let contents = room.contents();
    match contents.monster_count {
        0 => {}
        1 => text.push_str(" A lone creature lurks in the shadows."),
        count => text.push_str(&format!(" {count} creatures lurk in the shadows.")),
    }
    if contents.has_treasure && room.room_type() != RoomType::Treasure {
        text.push_str(" A small cache lies hidden nearby.");
    }
    if contents.has_trap && room.room_type() != RoomType::Trap {
        text.push_str(" Watch your step.");
    }
    text
}
