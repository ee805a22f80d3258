use crate::cell::Coord;
use crate::error::GridError;
use crate::grid::Grid;
use crate::solver::{frontier_search, Frontier, GridSolver, TraversalResult};

/// Last in, first out.
#[derive(Default)]
pub(crate) struct Stack(Vec<(Coord, u32)>);

impl Frontier for Stack {
    fn push(&mut self, coord: Coord, depth: u32) {
        self.0.push((coord, depth));
    }
    fn pop(&mut self) -> Option<(Coord, u32)> {
        self.0.pop()
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct DfsSolver;

impl GridSolver for DfsSolver {
    fn name(&self) -> &'static str {
        "dfs"
    }
    fn search(&self, grid: &Grid, start: Coord) -> Result<TraversalResult, GridError> {
        frontier_search::<Stack>(self.name(), grid, start)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::CellKind;

    fn solve(text: &str) -> TraversalResult {
        let grid: Grid = text.parse().unwrap();
        let start = grid.start().unwrap();
        DfsSolver.search(&grid, start).unwrap()
    }

    #[test]
    fn finds_path_on_open_grid() {
        let result = solve("S..\n...\n..E");
        assert!(result.found);
        assert_eq!(result.path().last(), Some(&Coord::new(2, 2)));
    }

    #[test]
    fn large_open_grid() {
        let mut grid = Grid::new(10, 10);
        grid.set_kind(Coord::new(0, 0), CellKind::Start).unwrap();
        grid.set_kind(Coord::new(9, 9), CellKind::End).unwrap();
        let result = DfsSolver.search(&grid, Coord::new(0, 0)).unwrap();
        assert!(result.found);
        let path = result.path();
        assert!(path.windows(2).all(|w| w[0].is_adjacent(&w[1])));
    }

    #[test]
    fn walled_off_end_is_not_found() {
        // Last row and column are walls, the end sits in the corner.
        let result = solve("S..#\n...#\n...#\n###E");
        assert!(!result.found);
        assert_eq!(result.visited.len(), 8);
    }

    #[test]
    fn start_on_end_returns_immediately() {
        let result = solve("E..");
        assert!(result.found);
        assert!(result.visited.is_empty());
    }

    /// The most recently pushed neighbour (down, last in the direction order) is expanded first.
    #[test]
    fn dives_along_the_last_direction() {
        let result = solve("S..\n...\n...\n..E");
        let second_ring = result.visited[2].coord();
        // Start pushes right (0,1) then down (1,0); (1,0) is popped next and pushes right, down.
        assert_eq!(result.visited[0].coord(), Coord::new(0, 1));
        assert_eq!(result.visited[1].coord(), Coord::new(1, 0));
        assert_eq!(second_ring, Coord::new(1, 1));
        assert_eq!(result.visited[3].coord(), Coord::new(2, 0));
    }
}
