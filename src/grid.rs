use core::fmt;
use std::str::FromStr;

use itertools::iproduct;
use log::debug;
use petgraph::unionfind::UnionFind;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::cell::{Cell, CellKind, Coord};
use crate::error::GridError;
use crate::{
    DEFAULT_COLS, DEFAULT_END, DEFAULT_ROWS, DEFAULT_START, DEFAULT_WEIGHT, DIRECTIONS,
    N_SMALLVEC_SIZE, WEIGHTED_CELL_COST,
};

/// A rectangular, row-major collection of [Cell]s. The extents are fixed once built.
///
/// The grid is what the editor owns and what every engine reads. Engines only ever borrow it
/// immutably and keep their frontier, visited set and parent table to themselves, so a search
/// never changes what the caller displays; merging results back is an explicit
/// [apply_visited](Grid::apply_visited) / [apply_path](Grid::apply_path) call.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
}

impl Default for Grid {
    fn default() -> Grid {
        Grid::new(0, 0)
    }
}

impl Grid {
    /// An all-empty grid.
    pub fn new(rows: usize, cols: usize) -> Grid {
        Grid::filled(rows, cols, CellKind::Empty)
    }
    pub fn filled(rows: usize, cols: usize, kind: CellKind) -> Grid {
        let cells = iproduct!(0..rows as i32, 0..cols as i32)
            .map(|(row, col)| {
                let mut cell = Cell::new(Coord::new(row, col), kind);
                cell.weight = weight_for(kind);
                cell
            })
            .collect();
        Grid { rows, cols, cells }
    }
    /// The editor's opening board: an empty `DEFAULT_ROWS` x `DEFAULT_COLS` grid with start and
    /// end on the middle row.
    pub fn default_layout() -> Grid {
        let mut grid = Grid::new(DEFAULT_ROWS, DEFAULT_COLS);
        let (start, end) = (Coord::from(DEFAULT_START), Coord::from(DEFAULT_END));
        grid.cell_mut(start).kind = CellKind::Start;
        grid.cell_mut(end).kind = CellKind::End;
        grid
    }
    pub fn rows(&self) -> usize {
        self.rows
    }
    pub fn cols(&self) -> usize {
        self.cols
    }
    pub fn len(&self) -> usize {
        self.cells.len()
    }
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
    pub fn in_bounds(&self, coord: Coord) -> bool {
        coord.row >= 0
            && coord.col >= 0
            && (coord.row as usize) < self.rows
            && (coord.col as usize) < self.cols
    }
    pub fn check_bounds(&self, coord: Coord) -> Result<(), GridError> {
        if self.in_bounds(coord) {
            Ok(())
        } else {
            Err(GridError::OutOfBounds {
                coord,
                rows: self.rows,
                cols: self.cols,
            })
        }
    }
    /// Row-major index of an in-bounds coordinate.
    pub fn index(&self, coord: Coord) -> Option<usize> {
        self.in_bounds(coord)
            .then(|| coord.row as usize * self.cols + coord.col as usize)
    }
    pub fn checked_index(&self, coord: Coord) -> Result<usize, GridError> {
        self.check_bounds(coord)?;
        Ok(coord.row as usize * self.cols + coord.col as usize)
    }
    pub fn get(&self, coord: Coord) -> Option<&Cell> {
        self.index(coord).map(|ix| &self.cells[ix])
    }
    pub fn get_mut(&mut self, coord: Coord) -> Option<&mut Cell> {
        self.index(coord).map(move |ix| &mut self.cells[ix])
    }
    pub fn iter(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }
    /// Cells of one row, left to right. `None` past the last row.
    pub fn row(&self, row: usize) -> Option<&[Cell]> {
        if row >= self.rows {
            return None;
        }
        self.cells.get(row * self.cols..(row + 1) * self.cols)
    }

    // Only for coordinates already known to be in bounds.
    pub(crate) fn cell(&self, coord: Coord) -> &Cell {
        &self.cells[coord.row as usize * self.cols + coord.col as usize]
    }
    pub(crate) fn cell_at(&self, index: usize) -> &Cell {
        &self.cells[index]
    }
    pub(crate) fn cell_mut(&mut self, coord: Coord) -> &mut Cell {
        &mut self.cells[coord.row as usize * self.cols + coord.col as usize]
    }

    /// In-bounds 4-neighbours of `coord`, in [DIRECTIONS] order. Off-grid positions are
    /// skipped, not reported.
    pub fn neighbours(&self, coord: Coord) -> SmallVec<[Coord; N_SMALLVEC_SIZE]> {
        DIRECTIONS
            .iter()
            .map(|&d| coord + d)
            .filter(|&n| self.in_bounds(n))
            .collect()
    }
    /// [neighbours](Self::neighbours) without walls.
    pub fn walkable_neighbours(&self, coord: Coord) -> SmallVec<[Coord; N_SMALLVEC_SIZE]> {
        DIRECTIONS
            .iter()
            .map(|&d| coord + d)
            .filter(|&n| self.get(n).is_some_and(|c| !c.kind.is_wall()))
            .collect()
    }
    /// First cell of the given kind in row-major order.
    pub fn find_kind(&self, kind: CellKind) -> Option<Coord> {
        self.cells.iter().find(|c| c.kind == kind).map(Cell::coord)
    }
    pub fn start(&self) -> Option<Coord> {
        self.find_kind(CellKind::Start)
    }
    pub fn end(&self) -> Option<Coord> {
        self.find_kind(CellKind::End)
    }

    /// Overwrites the kind of a cell. Painting `Weighted` gives the cell
    /// [WEIGHTED_CELL_COST]; any other kind resets it to [DEFAULT_WEIGHT].
    pub fn set_kind(&mut self, coord: Coord, kind: CellKind) -> Result<(), GridError> {
        self.check_bounds(coord)?;
        let cell = self.cell_mut(coord);
        cell.kind = kind;
        cell.weight = weight_for(kind);
        Ok(())
    }
    pub fn set_weight(&mut self, coord: Coord, weight: i32) -> Result<(), GridError> {
        self.check_bounds(coord)?;
        if weight < 0 {
            return Err(GridError::NegativeWeight { coord, weight });
        }
        self.cell_mut(coord).weight = weight;
        Ok(())
    }
    /// Fails on the first cell (row-major) carrying a negative weight.
    pub fn validate_weights(&self) -> Result<(), GridError> {
        match self.cells.iter().find(|c| c.weight < 0) {
            Some(cell) => Err(GridError::NegativeWeight {
                coord: cell.coord(),
                weight: cell.weight,
            }),
            None => Ok(()),
        }
    }

    /// Flips a cell between wall and empty. Start and end are left alone. Returns the kind the
    /// cell ends up with.
    pub fn toggle_wall(&mut self, coord: Coord) -> Result<CellKind, GridError> {
        self.toggle(coord, CellKind::Wall)
    }
    /// Flips a cell between weighted and empty, like [toggle_wall](Self::toggle_wall).
    pub fn toggle_weight(&mut self, coord: Coord) -> Result<CellKind, GridError> {
        self.toggle(coord, CellKind::Weighted)
    }
    fn toggle(&mut self, coord: Coord, kind: CellKind) -> Result<CellKind, GridError> {
        self.check_bounds(coord)?;
        let current = self.cell(coord).kind;
        if current.is_special() {
            return Ok(current);
        }
        let new_kind = if current == kind {
            CellKind::Empty
        } else {
            kind
        };
        self.set_kind(coord, new_kind)?;
        Ok(new_kind)
    }

    /// Moves the start cell to `coord`. Refuses (returning `false`) to land on the end cell.
    pub fn move_start(&mut self, coord: Coord) -> Result<bool, GridError> {
        self.move_special(coord, CellKind::Start, CellKind::End)
    }
    /// Moves the end cell to `coord`. Refuses (returning `false`) to land on the start cell.
    pub fn move_end(&mut self, coord: Coord) -> Result<bool, GridError> {
        self.move_special(coord, CellKind::End, CellKind::Start)
    }
    fn move_special(
        &mut self,
        coord: Coord,
        kind: CellKind,
        other: CellKind,
    ) -> Result<bool, GridError> {
        self.check_bounds(coord)?;
        if self.cell(coord).kind == other {
            return Ok(false);
        }
        if let Some(previous) = self.find_kind(kind) {
            self.set_kind(previous, CellKind::Empty)?;
        }
        self.set_kind(coord, kind)?;
        Ok(true)
    }

    /// Wipes a previous run off the board: visited and path cells become empty again and all
    /// traversal metadata is dropped. Walls, weights, start and end stay.
    pub fn clear_path(&mut self) {
        for cell in self.cells.iter_mut() {
            if matches!(cell.kind, CellKind::Visited | CellKind::Path) {
                cell.kind = CellKind::Empty;
            }
            cell.clear_metadata();
        }
    }
    /// Paints the empty cells of a visited sequence as visited, carrying over their depth and
    /// cost. Other kinds keep their look. Out-of-bounds entries are ignored.
    pub fn apply_visited<'a, I>(&mut self, visited: I)
    where
        I: IntoIterator<Item = &'a Cell>,
    {
        for seen in visited {
            if let Some(cell) = self.get_mut(seen.coord()) {
                if cell.kind == CellKind::Empty {
                    cell.kind = CellKind::Visited;
                }
                cell.depth = seen.depth;
                cell.cost_from_start = seen.cost_from_start;
            }
        }
    }
    /// Paints a reconstructed route. Start and end keep their kind; weighted cells on the route
    /// keep their weight.
    pub fn apply_path(&mut self, path: &[Coord]) {
        for &coord in path {
            if let Some(cell) = self.get_mut(coord) {
                if !cell.kind.is_special() {
                    cell.kind = CellKind::Path;
                }
            }
        }
    }

    /// Labels every non-wall cell with the 4-connected region it belongs to.
    pub fn components(&self) -> Components {
        let mut union = UnionFind::new(self.len());
        for (ix, cell) in self.cells.iter().enumerate() {
            if cell.kind.is_wall() {
                continue;
            }
            let coord = cell.coord();
            // Right and down are enough to link every edge once.
            for n in [coord + (0, 1), coord + (1, 0)] {
                if let Some(n_ix) = self.index(n) {
                    if !self.cells[n_ix].kind.is_wall() {
                        union.union(ix, n_ix);
                    }
                }
            }
        }
        debug!("Generated components for {}x{} grid", self.rows, self.cols);
        Components {
            union,
            walls: self.cells.iter().map(|c| c.kind.is_wall()).collect(),
            rows: self.rows,
            cols: self.cols,
        }
    }
}

fn weight_for(kind: CellKind) -> i32 {
    if kind == CellKind::Weighted {
        WEIGHTED_CELL_COST
    } else {
        DEFAULT_WEIGHT
    }
}

/// Connected regions of walkable cells, computed once by [Grid::components]. Goes stale as
/// soon as the grid is edited.
#[derive(Clone, Debug)]
pub struct Components {
    union: UnionFind<usize>,
    walls: Vec<bool>,
    rows: usize,
    cols: usize,
}

impl Components {
    fn index(&self, coord: Coord) -> Option<usize> {
        (coord.row >= 0
            && coord.col >= 0
            && (coord.row as usize) < self.rows
            && (coord.col as usize) < self.cols)
            .then(|| coord.row as usize * self.cols + coord.col as usize)
    }
    /// Retrieves the component id of a walkable coordinate.
    pub fn component(&self, coord: Coord) -> Option<usize> {
        self.index(coord)
            .filter(|&ix| !self.walls[ix])
            .map(|ix| self.union.find(ix))
    }
    /// Checks if start and goal are walkable and on the same component.
    pub fn reachable(&self, start: Coord, goal: Coord) -> bool {
        match (self.component(start), self.component(goal)) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        }
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for cells in (0..self.rows).filter_map(|row| self.row(row)) {
            let line = cells.iter().map(|c| c.kind.symbol()).collect::<String>();
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

/// Parses the format written by [Display](fmt::Display): one line per row, one symbol per cell
/// (see [CellKind::symbol]). Blank lines and surrounding whitespace are ignored.
impl FromStr for Grid {
    type Err = GridError;

    fn from_str(s: &str) -> Result<Grid, GridError> {
        let lines = s
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .collect::<Vec<_>>();
        let rows = lines.len();
        let cols = lines.first().map_or(0, |l| l.chars().count());
        if rows == 0 || cols == 0 {
            return Err(GridError::EmptyGrid);
        }
        let mut grid = Grid::new(rows, cols);
        for (row, line) in lines.iter().enumerate() {
            let found = line.chars().count();
            if found != cols {
                return Err(GridError::RaggedRow {
                    line: row + 1,
                    expected: cols,
                    found,
                });
            }
            for (col, symbol) in line.chars().enumerate() {
                let kind = CellKind::from_symbol(symbol).ok_or(GridError::Parse {
                    line: row + 1,
                    column: col + 1,
                    found: symbol,
                })?;
                grid.set_kind(Coord::new(row as i32, col as i32), kind)?;
            }
        }
        Ok(grid)
    }
}
