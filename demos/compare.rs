use grid_search::{Algorithm, Grid};
use itertools::Itertools;

// Runs every engine on the editor's default board with a wall across the middle and prints
// how much of the board each one explored before reaching the end.

fn main() {
    let mut grid = Grid::default_layout();
    for row in 8..23 {
        grid.toggle_wall((row, 35).into()).unwrap();
    }
    let start = grid.start().unwrap();
    for algorithm in Algorithm::ALL {
        let result = algorithm.run(&grid, start).unwrap();
        let path = result.path();
        println!(
            "{:>8}: found {}, visited {}, path {}",
            algorithm,
            result.found,
            result.visited.len(),
            path.len()
        );
        println!("          {}", path.iter().take(6).join(" -> "));
    }
}
