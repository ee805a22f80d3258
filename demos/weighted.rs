use grid_search::{run_bfs, run_dijkstra, Grid};

// Breadth-first search walks straight through the weighted cells (w), Dijkstra's search pays
// for them and takes the detour below.
//  _______
// |S www E|
// |       |
//  _______

fn main() {
    let grid: Grid = "S.www.E\n.......".parse().unwrap();
    let start = grid.start().unwrap();
    for (name, result) in [
        ("BFS", run_bfs(&grid, start).unwrap()),
        ("Dijkstra", run_dijkstra(&grid, start).unwrap()),
    ] {
        let mut painted = grid.clone();
        painted.apply_path(&result.path());
        println!(
            "{}: {} steps, cost {}",
            name,
            result.path().len() - 1,
            result.path_cost(&grid).unwrap_or_default()
        );
        println!("{}", painted);
    }
}
