use grid_search::{run_bfs, Grid};

// In this example a path is found on a 3x3 grid with shape
//  ___
// |S  |
// | # |
// |  E|
//  ___
// where
// - # marks a wall
// - S marks the start
// - E marks the end
//
// Cells have a 4-neighbourhood

fn main() {
    let mut grid: Grid = "S..\n.#.\n..E".parse().unwrap();
    println!("{}", grid);
    let start = grid.start().unwrap();
    let result = run_bfs(&grid, start).unwrap();
    println!("Visited:");
    for cell in &result.visited {
        println!("{} at depth {}", cell.coord(), cell.depth.unwrap_or_default());
    }
    let path = result.path();
    println!("Path:");
    for p in &path {
        println!("{}", p);
    }
    grid.apply_visited(&result.visited);
    grid.apply_path(&path);
    println!("\n{}", grid);
}
