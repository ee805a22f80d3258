use core::fmt;
use std::str::FromStr;

use log::debug;

use crate::cell::{Cell, CellKind, Coord};
use crate::error::GridError;
use crate::grid::Grid;
use crate::search_tree::SearchTree;

pub mod bfs;
pub mod dfs;
pub mod dijkstra;

use bfs::BfsSolver;
use dfs::DfsSolver;
use dijkstra::DijkstraSolver;

/// What a traversal hands back to the caller.
///
/// `visited` is the exploration order to animate; every entry is a copy of the grid cell with
/// the depth (and for Dijkstra the cost) it had when it was added. `end_cell` is present
/// exactly when `found` is. The parent links of every discovered cell live in `tree`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TraversalResult {
    pub found: bool,
    pub end_cell: Option<Cell>,
    pub visited: Vec<Cell>,
    pub tree: SearchTree,
}

impl TraversalResult {
    pub(crate) fn found(end_cell: Cell, visited: Vec<Cell>, tree: SearchTree) -> TraversalResult {
        TraversalResult {
            found: true,
            end_cell: Some(end_cell),
            visited,
            tree,
        }
    }
    pub(crate) fn not_found(visited: Vec<Cell>, tree: SearchTree) -> TraversalResult {
        TraversalResult {
            found: false,
            end_cell: None,
            visited,
            tree,
        }
    }
    /// The start-to-end route, or an empty vector if the end was not reached.
    pub fn path(&self) -> Vec<Coord> {
        match &self.end_cell {
            Some(end) => self.tree.path_to(end.coord()),
            None => Vec::new(),
        }
    }
    /// Sum of the weights of every cell entered along [path](Self::path); the start cell is not
    /// entered and costs nothing. `None` if no path was found or the sum overflows an `i32`.
    pub fn path_cost(&self, grid: &Grid) -> Option<i32> {
        let path = self.path();
        if path.is_empty() {
            return None;
        }
        path.iter()
            .skip(1)
            .filter_map(|&c| grid.get(c))
            .try_fold(0i32, |total, c| total.checked_add(c.weight))
    }
}

/// A search engine over a [Grid]. Implementations read the grid and never write to it.
pub trait GridSolver {
    fn name(&self) -> &'static str;

    /// Explores from `start` until a cell of kind [CellKind::End] is finalized or nothing is
    /// left to explore.
    fn search(&self, grid: &Grid, start: Coord) -> Result<TraversalResult, GridError>;

    /// Searches and reconstructs the route in one go.
    fn get_path(&self, grid: &Grid, start: Coord) -> Result<Option<Vec<Coord>>, GridError> {
        let result = self.search(grid, start)?;
        Ok(result.found.then(|| result.path()))
    }
}

/// Storage discipline of an unweighted search. The order in which entries come back out is
/// the only thing separating breadth-first from depth-first search.
pub(crate) trait Frontier: Default {
    fn push(&mut self, coord: Coord, depth: u32);
    fn pop(&mut self) -> Option<(Coord, u32)>;
}

/// Shared loop of [BfsSolver] and [DfsSolver]. A cell is marked visited, recorded and linked to
/// its parent when it is pushed, so nothing is pushed twice.
pub(crate) fn frontier_search<F: Frontier>(
    name: &str,
    grid: &Grid,
    start: Coord,
) -> Result<TraversalResult, GridError> {
    grid.check_bounds(start)?;
    let mut tree = SearchTree::new(start);
    let mut visited = Vec::new();
    let mut frontier = F::default();
    frontier.push(start, 0);

    while let Some((coord, depth)) = frontier.pop() {
        let cell = grid.cell(coord);
        match cell.kind {
            CellKind::End => {
                debug!(
                    "{} from {} reached {} after {} cells",
                    name,
                    start,
                    coord,
                    visited.len()
                );
                let end_cell = cell.discovered(depth, tree.parent(coord));
                return Ok(TraversalResult::found(end_cell, visited, tree));
            }
            // Walls never get pushed below, only a start placed on a wall gets here.
            CellKind::Wall => continue,
            _ => {}
        }
        for n in grid.walkable_neighbours(coord) {
            if tree.discover(n, coord) {
                visited.push(grid.cell(n).discovered(depth + 1, Some(coord)));
                frontier.push(n, depth + 1);
            }
        }
    }
    debug!(
        "{} from {} exhausted the frontier after {} cells",
        name,
        start,
        visited.len()
    );
    Ok(TraversalResult::not_found(visited, tree))
}

/// Breadth-first search from `start`. The route it finds has the fewest possible steps.
pub fn run_bfs(grid: &Grid, start: Coord) -> Result<TraversalResult, GridError> {
    BfsSolver.search(grid, start)
}

/// Depth-first search from `start`. Finds a route when one exists, with no length guarantee.
pub fn run_dfs(grid: &Grid, start: Coord) -> Result<TraversalResult, GridError> {
    DfsSolver.search(grid, start)
}

/// Dijkstra's search from `start`, honouring cell weights. Fails on negative weights.
pub fn run_dijkstra(grid: &Grid, start: Coord) -> Result<TraversalResult, GridError> {
    DijkstraSolver.search(grid, start)
}

/// The engines a caller can pick from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Algorithm {
    Bfs,
    Dfs,
    Dijkstra,
}

impl Algorithm {
    pub const ALL: [Algorithm; 3] = [Algorithm::Bfs, Algorithm::Dfs, Algorithm::Dijkstra];

    pub fn run(&self, grid: &Grid, start: Coord) -> Result<TraversalResult, GridError> {
        self.solver().search(grid, start)
    }
    pub fn solver(&self) -> &'static dyn GridSolver {
        match self {
            Algorithm::Bfs => &BfsSolver,
            Algorithm::Dfs => &DfsSolver,
            Algorithm::Dijkstra => &DijkstraSolver,
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.pad(self.solver().name())
    }
}

impl FromStr for Algorithm {
    type Err = GridError;

    fn from_str(s: &str) -> Result<Algorithm, GridError> {
        Algorithm::ALL
            .into_iter()
            .find(|a| a.solver().name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| GridError::UnknownAlgorithm(s.to_owned()))
    }
}
