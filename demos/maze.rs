use grid_search::{create_maze_with, run_dfs, MazeAction};
use rand::{rngs::StdRng, Rng, SeedableRng};

// Carves a 15x31 maze from a fixed seed, replays the carving log as a summary and solves the
// result with depth-first search.

fn main() {
    let mut rng = StdRng::seed_from_u64(2024);
    let maze = create_maze_with(15, 31, || rng.gen::<f64>()).unwrap();
    let carves = maze
        .generation_steps
        .iter()
        .filter(|s| s.action == MazeAction::Carve)
        .count();
    println!(
        "{} steps, {} carves, {} backtracks",
        maze.generation_steps.len(),
        carves,
        maze.generation_steps.len() - carves - 1
    );
    let mut grid = maze.grid;
    let start = grid.start().unwrap();
    let result = run_dfs(&grid, start).unwrap();
    grid.apply_visited(&result.visited);
    grid.apply_path(&result.path());
    println!("{}", grid);
}
