use serde::Serialize;

use crate::types::Pos;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Bend {
    HorizontalFirst,
    VerticalFirst,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct Corridor {
    start: Pos,
    end: Pos,
    cells: Vec<Pos>,
}

impl Corridor {
    pub fn new(start: Pos, end: Pos) -> Self {
        Self::with_bend(start, end, Bend::HorizontalFirst)
    }

    pub fn with_bend(start: Pos, end: Pos, bend: Bend) -> Self {
        let corner = match bend {
            Bend::HorizontalFirst => Pos { y: start.y, x: end.x },
            Bend::VerticalFirst => Pos { y: end.y, x: start.x },
        };

        let mut cells = vec![start];
        walk_straight(&mut cells, corner);
        walk_straight(&mut cells, end);
        Self { start, end, cells }
    }

    pub fn start(&self) -> Pos {
        self.start
    }

    pub fn end(&self) -> Pos {
        self.end
    }

    pub fn cells(&self) -> &[Pos] {
        &self.cells
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

// Extends `cells` one unit at a time until it reaches `target`, which must
// share a row or a column with the current last cell.
fn walk_straight(cells: &mut Vec<Pos>, target: Pos) {
    let Some(mut current) = cells.last().copied() else {
        return;
    };
    debug_assert!(current.x == target.x || current.y == target.y);
    while current != target {
        current.x += (target.x - current.x).signum();
        current.y += (target.y - current.y).signum();
        cells.push(current);
    }
}
