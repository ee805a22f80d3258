use thiserror::Error;

use crate::cell::Coord;

/// Caller contract violations. An unreachable end is not one of these: it is reported as
/// `found == false` on the [TraversalResult](crate::solver::TraversalResult).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    #[error("{coord} lies outside the {rows}x{cols} grid")]
    OutOfBounds { coord: Coord, rows: usize, cols: usize },

    #[error("cell {coord} has negative weight {weight}")]
    NegativeWeight { coord: Coord, weight: i32 },

    #[error("cost of the route into {coord} does not fit in an i32")]
    CostOverflow { coord: Coord },

    #[error("a grid needs at least one row and one column")]
    EmptyGrid,

    #[error("unknown cell symbol {found:?} at line {line}, column {column}")]
    Parse {
        line: usize,
        column: usize,
        found: char,
    },

    #[error("unknown algorithm {0:?}")]
    UnknownAlgorithm(String),

    #[error("line {line} has {found} cells, expected {expected}")]
    RaggedRow {
        line: usize,
        expected: usize,
        found: usize,
    },
}
