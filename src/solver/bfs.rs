use std::collections::VecDeque;

use crate::cell::Coord;
use crate::error::GridError;
use crate::grid::Grid;
use crate::solver::{frontier_search, Frontier, GridSolver, TraversalResult};

/// First in, first out: cells come back in non-decreasing depth, which is what makes the
/// first route found a shortest one.
#[derive(Default)]
pub(crate) struct Queue(VecDeque<(Coord, u32)>);

impl Frontier for Queue {
    fn push(&mut self, coord: Coord, depth: u32) {
        self.0.push_back((coord, depth));
    }
    fn pop(&mut self) -> Option<(Coord, u32)> {
        self.0.pop_front()
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct BfsSolver;

impl GridSolver for BfsSolver {
    fn name(&self) -> &'static str {
        "bfs"
    }
    fn search(&self, grid: &Grid, start: Coord) -> Result<TraversalResult, GridError> {
        frontier_search::<Queue>(self.name(), grid, start)
    }
}
