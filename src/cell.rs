use core::fmt;
use std::ops::Add;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::DEFAULT_WEIGHT;

/// A `(row, col)` position on a [Grid](crate::grid::Grid). Signed so that neighbour offsets can
/// step off the grid and be rejected by a bounds check instead of wrapping.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Coord {
    pub row: i32,
    pub col: i32,
}

impl Coord {
    pub const fn new(row: i32, col: i32) -> Coord {
        Coord { row, col }
    }
    pub fn manhattan_distance(&self, other: &Coord) -> i32 {
        (self.row - other.row).abs() + (self.col - other.col).abs()
    }
    /// Whether `other` shares a side with this coordinate.
    pub fn is_adjacent(&self, other: &Coord) -> bool {
        self.manhattan_distance(other) == 1
    }
}

impl Add<(i32, i32)> for Coord {
    type Output = Coord;
    fn add(self, (d_row, d_col): (i32, i32)) -> Coord {
        Coord::new(self.row + d_row, self.col + d_col)
    }
}

impl From<(i32, i32)> for Coord {
    fn from((row, col): (i32, i32)) -> Coord {
        Coord::new(row, col)
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// What occupies a cell. `Visited` and `Path` are display states written back by the caller;
/// the engines treat them like `Empty`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum CellKind {
    #[default]
    Empty,
    Wall,
    Start,
    End,
    Visited,
    Path,
    Weighted,
}

impl CellKind {
    pub fn symbol(&self) -> char {
        match self {
            CellKind::Empty => '.',
            CellKind::Wall => '#',
            CellKind::Start => 'S',
            CellKind::End => 'E',
            CellKind::Visited => 'v',
            CellKind::Path => '*',
            CellKind::Weighted => 'w',
        }
    }
    pub fn from_symbol(symbol: char) -> Option<CellKind> {
        match symbol {
            '.' => Some(CellKind::Empty),
            '#' => Some(CellKind::Wall),
            'S' => Some(CellKind::Start),
            'E' => Some(CellKind::End),
            'v' => Some(CellKind::Visited),
            '*' => Some(CellKind::Path),
            'w' => Some(CellKind::Weighted),
            _ => None,
        }
    }
    pub fn is_wall(&self) -> bool {
        *self == CellKind::Wall
    }
    /// Start and end are owned by the editor and never overwritten by painting.
    pub fn is_special(&self) -> bool {
        matches!(self, CellKind::Start | CellKind::End)
    }
}

/// A single grid cell together with the traversal metadata a search attaches to it.
///
/// Cells stored in a [Grid](crate::grid::Grid) normally carry no metadata. The copies handed
/// out in a [TraversalResult](crate::solver::TraversalResult) record the depth (and for
/// Dijkstra the accumulated cost) they were discovered with, plus the coordinate of the cell
/// they were discovered from. Parents are coordinates rather than references, so the
/// discovery tree stays acyclic and plain data.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Cell {
    pub row: i32,
    pub col: i32,
    pub kind: CellKind,
    pub weight: i32,
    pub depth: Option<u32>,
    pub cost_from_start: Option<i32>,
    pub parent: Option<Coord>,
}

impl Cell {
    pub fn new(coord: Coord, kind: CellKind) -> Cell {
        Cell {
            row: coord.row,
            col: coord.col,
            kind,
            weight: DEFAULT_WEIGHT,
            depth: None,
            cost_from_start: None,
            parent: None,
        }
    }
    pub fn coord(&self) -> Coord {
        Coord::new(self.row, self.col)
    }
    /// Drops depth, cost and parent.
    pub fn clear_metadata(&mut self) {
        self.depth = None;
        self.cost_from_start = None;
        self.parent = None;
    }
    pub(crate) fn discovered(&self, depth: u32, parent: Option<Coord>) -> Cell {
        Cell {
            depth: Some(depth),
            parent,
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn symbols_round_trip_for_every_kind() {
        for kind in [
            CellKind::Empty,
            CellKind::Wall,
            CellKind::Start,
            CellKind::End,
            CellKind::Visited,
            CellKind::Path,
            CellKind::Weighted,
        ] {
            assert_eq!(CellKind::from_symbol(kind.symbol()), Some(kind));
        }
        assert_eq!(CellKind::from_symbol('x'), None);
    }

    #[test]
    fn coord_offsets_may_leave_the_grid() {
        let c = Coord::new(0, 0) + (-1, 0);
        assert_eq!(c, Coord::new(-1, 0));
        assert_eq!(Coord::new(2, 3).manhattan_distance(&Coord::new(0, 0)), 5);
        assert!(Coord::new(2, 3).is_adjacent(&Coord::new(2, 4)));
        assert!(!Coord::new(2, 3).is_adjacent(&Coord::new(3, 4)));
    }
}
