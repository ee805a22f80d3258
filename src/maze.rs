//! Randomized depth-first maze carving.
//!
//! The generator starts from a grid made entirely of walls and carves passages with recursive
//! backtracking. Only cells an even number of steps away from the start (in both row and
//! column) are carve targets, so the walls left between passages are exactly one cell thick
//! and the passages form a spanning tree over that lattice. Every carve and backtrack is logged
//! so the construction itself can be replayed.
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use log::{info, warn};
use rand::Rng;
use smallvec::SmallVec;

use crate::cell::{Cell, CellKind, Coord};
use crate::error::GridError;
use crate::grid::Grid;
use crate::{DIRECTIONS, N_SMALLVEC_SIZE};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum MazeAction {
    Carve,
    Backtrack,
    Finish,
}

/// One entry of the generation log: the cell as it looked right after the action.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MazeStep {
    pub cell: Cell,
    pub step: usize,
    pub action: MazeAction,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MazeResult {
    pub grid: Grid,
    pub generation_steps: Vec<MazeStep>,
}

/// Carves a maze with the thread-local RNG. See [generate_maze_with].
pub fn generate_maze(
    rows: usize,
    cols: usize,
    start: Coord,
    end: Coord,
) -> Result<MazeResult, GridError> {
    let mut rng = rand::thread_rng();
    generate_maze_with(rows, cols, start, end, || rng.gen::<f64>())
}

/// Carves a `rows` x `cols` maze from `start` and marks `start` and `end`.
///
/// `random` must return values in `[0, 1)`; feeding the same sequence reproduces the same
/// maze. The end is only guaranteed to be reachable when it lies inside the border and an even
/// number of rows and columns away from the start; otherwise it is still marked but may be
/// sealed in by walls.
pub fn generate_maze_with<R>(
    rows: usize,
    cols: usize,
    start: Coord,
    end: Coord,
    random: R,
) -> Result<MazeResult, GridError>
where
    R: FnMut() -> f64,
{
    if rows == 0 || cols == 0 {
        return Err(GridError::EmptyGrid);
    }
    let mut carver = MazeCarver::new(rows, cols, random);
    carver.grid.check_bounds(start)?;
    carver.grid.check_bounds(end)?;
    if !carver.on_lattice(start, end) {
        warn!(
            "End {} is off the carving lattice of start {}, the maze may not connect them",
            end, start
        );
    }

    carver.carve(start);
    let mut stack = vec![start];
    while let Some(&current) = stack.last() {
        let mut candidates = carver.candidates(current);
        carver.shuffle(&mut candidates);
        if let Some(&next) = candidates.first() {
            carver.carve(next);
            carver.carve(Coord::new(
                (current.row + next.row) / 2,
                (current.col + next.col) / 2,
            ));
            stack.push(next);
        } else if let Some(popped) = stack.pop() {
            // Running out of moves at the start ends the walk, it is not a backtrack.
            if !stack.is_empty() {
                carver.log(popped, MazeAction::Backtrack);
            }
        }
    }

    carver.grid.set_kind(start, CellKind::Start)?;
    carver.grid.set_kind(end, CellKind::End)?;
    carver.log(end, MazeAction::Finish);

    info!(
        "Generated {}x{} maze from {} to {} in {} steps",
        rows,
        cols,
        start,
        end,
        carver.steps.len()
    );
    Ok(MazeResult {
        grid: carver.grid,
        generation_steps: carver.steps,
    })
}

/// [generate_maze] with the start in the top-left interior corner and the end in the
/// bottom-right one.
pub fn create_maze(rows: usize, cols: usize) -> Result<MazeResult, GridError> {
    let (start, end) = default_corners(rows, cols);
    generate_maze(rows, cols, start, end)
}

/// [create_maze] with an explicit random source.
pub fn create_maze_with<R>(rows: usize, cols: usize, random: R) -> Result<MazeResult, GridError>
where
    R: FnMut() -> f64,
{
    let (start, end) = default_corners(rows, cols);
    generate_maze_with(rows, cols, start, end, random)
}

fn default_corners(rows: usize, cols: usize) -> (Coord, Coord) {
    (
        Coord::new(1, 1),
        Coord::new(rows as i32 - 2, cols as i32 - 2),
    )
}

struct MazeCarver<R> {
    grid: Grid,
    steps: Vec<MazeStep>,
    random: R,
}

impl<R: FnMut() -> f64> MazeCarver<R> {
    fn new(rows: usize, cols: usize, random: R) -> MazeCarver<R> {
        MazeCarver {
            grid: Grid::filled(rows, cols, CellKind::Wall),
            steps: Vec::new(),
            random,
        }
    }

    fn on_lattice(&self, start: Coord, end: Coord) -> bool {
        let interior = |c: Coord| {
            c.row >= 1
                && c.col >= 1
                && (c.row as usize) < self.grid.rows() - 1
                && (c.col as usize) < self.grid.cols() - 1
        };
        start == end
            || (interior(end)
                && (end.row - start.row) % 2 == 0
                && (end.col - start.col) % 2 == 0)
    }

    /// Uncarved cells two steps away, kept off the outer border.
    fn candidates(&self, coord: Coord) -> SmallVec<[Coord; N_SMALLVEC_SIZE]> {
        let rows = self.grid.rows() as i32;
        let cols = self.grid.cols() as i32;
        DIRECTIONS
            .iter()
            .map(|&(d_row, d_col)| coord + (2 * d_row, 2 * d_col))
            .filter(|n| n.row >= 1 && n.row < rows - 1 && n.col >= 1 && n.col < cols - 1)
            .filter(|&n| self.grid.cell(n).kind.is_wall())
            .collect()
    }

    /// Fisher-Yates driven by the injected source.
    fn shuffle(&mut self, items: &mut [Coord]) {
        for i in (1..items.len()).rev() {
            let j = ((self.random)() * (i + 1) as f64) as usize;
            items.swap(i, j.min(i));
        }
    }

    fn carve(&mut self, coord: Coord) {
        self.grid.cell_mut(coord).kind = CellKind::Empty;
        self.log(coord, MazeAction::Carve);
    }

    fn log(&mut self, coord: Coord, action: MazeAction) {
        self.steps.push(MazeStep {
            cell: self.grid.cell(coord).clone(),
            step: self.steps.len(),
            action,
        });
    }
}
