//! # grid_search
//!
//! A grid-based search sandbox. A [Grid] of cells holds walls, weighted cells and exactly one
//! start and one end; on it one of three searches can be run:
//! [breadth-first search](https://en.wikipedia.org/wiki/Breadth-first_search),
//! [depth-first search](https://en.wikipedia.org/wiki/Depth-first_search) and
//! [Dijkstra's algorithm](https://en.wikipedia.org/wiki/Dijkstra%27s_algorithm). Mazes can be
//! carved with
//! [randomized depth-first search](https://en.wikipedia.org/wiki/Maze_generation_algorithm#Randomized_depth-first_search).
//!
//! Every search borrows the grid immutably and returns a [TraversalResult] holding the order
//! in which cells were explored and, when the end was reached, the end cell. The route is
//! rebuilt from the parent links in the result with [reconstruct_path] (or
//! [TraversalResult::path]). How and when to draw either sequence is up to the caller.
//!
//! ```
//! use grid_search::{run_bfs, Grid};
//!
//! let grid: Grid = "S.#\n..#\n..E".parse().unwrap();
//! let result = run_bfs(&grid, grid.start().unwrap()).unwrap();
//! assert!(result.found);
//! assert_eq!(result.path().len(), 5);
//! ```
pub mod cell;
pub mod error;
pub mod grid;
pub mod maze;
pub mod search_tree;
pub mod solver;

pub use cell::{Cell, CellKind, Coord};
pub use error::GridError;
pub use grid::{Components, Grid};
pub use maze::{
    create_maze, create_maze_with, generate_maze, generate_maze_with, MazeAction, MazeResult,
    MazeStep,
};
pub use search_tree::{reconstruct_path, SearchTree};
pub use solver::{
    run_bfs, run_dfs, run_dijkstra, Algorithm, GridSolver, TraversalResult,
};

/// Neighbour offsets as `(d_row, d_col)`: right, left, up, down. Every engine expands
/// neighbours in this order, which decides ties between equally deep or equally cheap cells.
pub const DIRECTIONS: [(i32, i32); 4] = [(0, 1), (0, -1), (-1, 0), (1, 0)];
/// Cost of entering an ordinary cell.
pub const DEFAULT_WEIGHT: i32 = 1;
/// Cost of entering a cell painted [CellKind::Weighted].
pub const WEIGHTED_CELL_COST: i32 = 5;

pub const DEFAULT_ROWS: usize = 30;
pub const DEFAULT_COLS: usize = 71;
/// `(row, col)` of the start cell in [Grid::default_layout].
pub const DEFAULT_START: (i32, i32) = (15, 30);
/// `(row, col)` of the end cell in [Grid::default_layout].
pub const DEFAULT_END: (i32, i32) = (15, 40);

pub const N_SMALLVEC_SIZE: usize = 4;
