//! Axis-aligned room rectangles and the metadata the decoration layer attaches.

use serde::Serialize;

use crate::types::{Pos, RoomType};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
pub struct RoomContents {
    pub has_treasure: bool,
    pub has_trap: bool,
    pub monster_count: u8,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct Room {
    x: i32,
    y: i32,
    width: i32,
    height: i32,
    room_type: RoomType,
    description: String,
    contents: RoomContents,
}

impl Room {
    /// Edges shorter than one cell are raised to one.
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width: width.max(1),
            height: height.max(1),
            room_type: RoomType::Chamber,
            description: String::new(),
            contents: RoomContents::default(),
        }
    }

    pub fn x(&self) -> i32 {
        self.x
    }

    pub fn y(&self) -> i32 {
        self.y
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }

    pub fn area(&self) -> usize {
        (self.width as usize) * (self.height as usize)
    }

    pub fn center(&self) -> Pos {
        Pos { y: self.y + self.height / 2, x: self.x + self.width / 2 }
    }

    pub fn room_type(&self) -> RoomType {
        self.room_type
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn contents(&self) -> RoomContents {
        self.contents
    }

    pub fn contains(&self, pos: Pos) -> bool {
        pos.x >= self.x && pos.x < self.right() && pos.y >= self.y && pos.y < self.bottom()
    }

    pub fn cells(&self) -> impl Iterator<Item = Pos> + '_ {
        (self.y..self.bottom()).flat_map(move |y| (self.x..self.right()).map(move |x| Pos { y, x }))
    }

    /// Bounding-box test where rooms that merely touch edge-to-edge also count.
    pub fn intersects(&self, other: &Room) -> bool {
        self.overlaps_with_padding(other, 0)
    }

    /// [`Room::intersects`] after growing `self` by `padding` on every side.
    pub fn overlaps_with_padding(&self, other: &Room, padding: i32) -> bool {
        !(self.right() + padding < other.x
            || other.right() + padding < self.x
            || self.bottom() + padding < other.y
            || other.bottom() + padding < self.y)
    }

    pub(crate) fn set_room_type(&mut self, room_type: RoomType) {
        self.room_type = room_type;
    }

    pub(crate) fn set_description(&mut self, description: String) {
        self.description = description;
    }

    pub(crate) fn set_contents(&mut self, contents: RoomContents) {
        self.contents = contents;
    }
}
