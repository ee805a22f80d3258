use std::cmp::Ordering;
use std::collections::BinaryHeap;

use log::debug;

use crate::cell::{CellKind, Coord};
use crate::error::GridError;
use crate::grid::Grid;
use crate::search_tree::SearchTree;
use crate::solver::{GridSolver, TraversalResult};

struct SmallestCostHolder<K> {
    cost: K,
    sequence: usize,
    index: usize,
}

impl<K: PartialEq> Eq for SmallestCostHolder<K> {}

impl<K: PartialEq> PartialEq for SmallestCostHolder<K> {
    fn eq(&self, other: &Self) -> bool {
        self.cost.eq(&other.cost) && self.sequence == other.sequence
    }
}

impl<K: Ord> PartialOrd for SmallestCostHolder<K> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<K: Ord> Ord for SmallestCostHolder<K> {
    fn cmp(&self, other: &Self) -> Ordering {
        // BinaryHeap is a max-heap: cheapest first, and on equal cost the earliest push first.
        match other.cost.cmp(&self.cost) {
            Ordering::Equal => other.sequence.cmp(&self.sequence),
            s => s,
        }
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct DijkstraSolver;

impl GridSolver for DijkstraSolver {
    fn name(&self) -> &'static str {
        "dijkstra"
    }

    /// Cells are finalized when popped and a stale heap entry for an already finalized cell is
    /// dropped on pop. A neighbour is only relinked when the new cost is strictly lower. Finalizing
    /// a cell whose cost does not fit in an `i32` fails with [GridError::CostOverflow].
    fn search(&self, grid: &Grid, start: Coord) -> Result<TraversalResult, GridError> {
        let start_ix = grid.checked_index(start)?;
        grid.validate_weights()?;

        let n = grid.len();
        let mut cost: Vec<Option<i64>> = vec![None; n];
        let mut depth = vec![0u32; n];
        let mut finalized = vec![false; n];
        let mut tree = SearchTree::new(start);
        let mut visited = Vec::new();
        let mut to_see = BinaryHeap::new();
        let mut sequence = 0;

        cost[start_ix] = Some(0);
        to_see.push(SmallestCostHolder {
            cost: 0i64,
            sequence,
            index: start_ix,
        });

        while let Some(SmallestCostHolder {
            cost: reached,
            index,
            ..
        }) = to_see.pop()
        {
            if finalized[index] {
                continue;
            }
            finalized[index] = true;

            let cell = grid.cell_at(index);
            let coord = cell.coord();
            let reached =
                i32::try_from(reached).map_err(|_| GridError::CostOverflow { coord })?;
            let mut record = cell.discovered(depth[index], tree.parent(coord));
            record.cost_from_start = Some(reached);
            visited.push(record.clone());

            match cell.kind {
                CellKind::End => {
                    debug!(
                        "dijkstra from {} reached {} at cost {} after {} cells",
                        start,
                        coord,
                        reached,
                        visited.len()
                    );
                    return Ok(TraversalResult::found(record, visited, tree));
                }
                CellKind::Wall => continue,
                _ => {}
            }

            for neighbour in grid.walkable_neighbours(coord) {
                let Some(n_ix) = grid.index(neighbour) else {
                    continue;
                };
                let candidate = i64::from(reached) + i64::from(grid.cell(neighbour).weight);
                if cost[n_ix].map_or(true, |c| candidate < c) {
                    cost[n_ix] = Some(candidate);
                    depth[n_ix] = depth[index] + 1;
                    if !tree.discover(neighbour, coord) {
                        tree.relink(neighbour, coord);
                    }
                    sequence += 1;
                    to_see.push(SmallestCostHolder {
                        cost: candidate,
                        sequence,
                        index: n_ix,
                    });
                }
            }
        }
        debug!(
            "dijkstra from {} exhausted the frontier after {} cells",
            start,
            visited.len()
        );
        Ok(TraversalResult::not_found(visited, tree))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solver::bfs::BfsSolver;
    use crate::{DEFAULT_WEIGHT, WEIGHTED_CELL_COST};

    fn parse(text: &str) -> Grid {
        text.parse().unwrap()
    }

    #[test]
    fn finds_path_when_one_exists() {
        let grid = parse("S..\n...\n..E");
        let result = DijkstraSolver.search(&grid, Coord::new(0, 0)).unwrap();
        assert!(result.found);
        assert_eq!(result.end_cell.unwrap().cost_from_start, Some(4));
    }

    #[test]
    fn blocked_start_is_not_found() {
        let grid = parse("S#.\n#..\n..E");
        let result = DijkstraSolver.search(&grid, Coord::new(0, 0)).unwrap();
        assert!(!result.found);
        // Only the start itself is finalized.
        assert_eq!(result.visited.len(), 1);
    }

    #[test]
    fn start_on_end_finalizes_only_the_start() {
        let grid = parse("E..");
        let result = DijkstraSolver.search(&grid, Coord::new(0, 0)).unwrap();
        assert!(result.found);
        assert_eq!(result.visited.len(), 1);
        assert_eq!(result.end_cell.unwrap().cost_from_start, Some(0));
    }

    /// Going straight through the weighted cell costs more than walking around it.
    #[test]
    fn routes_around_weighted_cells() {
        // |SwE|
        // |...|
        let grid = parse("SwE\n...");
        let result = DijkstraSolver.search(&grid, Coord::new(0, 0)).unwrap();
        assert!(result.found);
        assert_eq!(result.path_cost(&grid), Some(4 * DEFAULT_WEIGHT));
        assert!(!result.path().contains(&Coord::new(0, 1)));

        let bfs = BfsSolver.search(&grid, Coord::new(0, 0)).unwrap();
        assert_eq!(bfs.path_cost(&grid), Some(WEIGHTED_CELL_COST + DEFAULT_WEIGHT));
    }

    #[test]
    fn finalized_costs_never_decrease() {
        let grid = parse("S.w..\n.#w#.\n..w.E\nww...");
        let result = DijkstraSolver.search(&grid, Coord::new(0, 0)).unwrap();
        let costs = result
            .visited
            .iter()
            .map(|c| c.cost_from_start.unwrap())
            .collect::<Vec<_>>();
        assert!(costs.windows(2).all(|w| w[0] <= w[1]));
    }

    /// Each coordinate is finalized at most once even though stale entries are left in the heap.
    #[test]
    fn no_cell_is_finalized_twice() {
        let grid = parse("Swww.\n.www.\n....E");
        let result = DijkstraSolver.search(&grid, Coord::new(0, 0)).unwrap();
        let mut seen = result.visited.iter().map(|c| c.coord()).collect::<Vec<_>>();
        let total = seen.len();
        seen.sort();
        seen.dedup();
        assert_eq!(seen.len(), total);
    }

    #[test]
    fn heavy_cell_is_avoided() {
        let mut grid = parse("S...\n....\n...E");
        grid.set_weight(Coord::new(0, 1), 9).unwrap();
        let result = DijkstraSolver.search(&grid, Coord::new(0, 0)).unwrap();
        assert_eq!(result.path_cost(&grid), Some(5));
        assert!(!result.path().contains(&Coord::new(0, 1)));
    }

    #[test]
    fn negative_weight_is_rejected() {
        let mut grid = parse("S.E");
        grid.get_mut(Coord::new(0, 1)).unwrap().weight = -2;
        let err = DijkstraSolver.search(&grid, Coord::new(0, 0)).unwrap_err();
        assert_eq!(
            err,
            GridError::NegativeWeight {
                coord: Coord::new(0, 1),
                weight: -2
            }
        );
    }

    #[test]
    fn route_costing_exactly_i32_max_is_found() {
        let mut grid = parse("S.E");
        grid.set_weight(Coord::new(0, 1), i32::MAX - DEFAULT_WEIGHT).unwrap();
        let result = DijkstraSolver.search(&grid, Coord::new(0, 0)).unwrap();
        assert!(result.found);
        assert_eq!(result.end_cell.as_ref().unwrap().cost_from_start, Some(i32::MAX));
        assert_eq!(result.path_cost(&grid), Some(i32::MAX));
    }

    #[test]
    fn overflowing_route_cost_is_an_error() {
        let mut grid = parse("S.E");
        grid.set_weight(Coord::new(0, 1), i32::MAX).unwrap();
        let err = DijkstraSolver.search(&grid, Coord::new(0, 0)).unwrap_err();
        assert_eq!(
            err,
            GridError::CostOverflow {
                coord: Coord::new(0, 2)
            }
        );
        // The unweighted engines still find the route, only its cost is unrepresentable.
        let bfs = BfsSolver.search(&grid, Coord::new(0, 0)).unwrap();
        assert!(bfs.found);
        assert_eq!(bfs.path_cost(&grid), None);
    }

    /// Relaxing into a huge cell must not stop the search while cheaper cells remain.
    #[test]
    fn cheap_route_is_found_next_to_a_huge_cell() {
        let mut grid = parse("S..E\n....");
        grid.set_weight(Coord::new(1, 0), i32::MAX).unwrap();
        let result = DijkstraSolver.search(&grid, Coord::new(0, 0)).unwrap();
        assert!(result.found);
        assert_eq!(result.end_cell.unwrap().cost_from_start, Some(3));
    }

    #[test]
    fn zero_weights_are_allowed() {
        let mut grid = parse("S..E");
        grid.set_weight(Coord::new(0, 1), 0).unwrap();
        let result = DijkstraSolver.search(&grid, Coord::new(0, 0)).unwrap();
        assert_eq!(result.path_cost(&grid), Some(2));
    }
}
