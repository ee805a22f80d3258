//! The discovery tree a traversal builds: for every discovered coordinate, the index of the
//! coordinate it was reached from. Parents are stored as indices into an insertion-ordered map
//! rather than as links between cells, which keeps the tree acyclic plain data.
use fxhash::FxBuildHasher;
use indexmap::map::Entry::{Occupied, Vacant};
use indexmap::IndexMap;

use crate::cell::Coord;

type FxIndexMap<K, V> = IndexMap<K, V, FxBuildHasher>;

const ROOT: usize = usize::MAX;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SearchTree {
    parents: FxIndexMap<Coord, usize>,
}

impl SearchTree {
    pub fn new(root: Coord) -> SearchTree {
        let mut parents = FxIndexMap::default();
        parents.insert(root, ROOT);
        SearchTree { parents }
    }
    pub fn len(&self) -> usize {
        self.parents.len()
    }
    pub fn is_empty(&self) -> bool {
        self.parents.is_empty()
    }
    pub fn contains(&self, coord: Coord) -> bool {
        self.parents.contains_key(&coord)
    }
    pub fn root(&self) -> Option<Coord> {
        self.parents.get_index(0).map(|(c, _)| *c)
    }
    /// Links `coord` to `parent` the first time it is seen. Returns `false` (and changes
    /// nothing) if `coord` is already in the tree.
    pub fn discover(&mut self, coord: Coord, parent: Coord) -> bool {
        let Some(parent_ix) = self.parents.get_index_of(&parent) else {
            return false;
        };
        match self.parents.entry(coord) {
            Vacant(e) => {
                e.insert(parent_ix);
                true
            }
            Occupied(_) => false,
        }
    }
    /// Links `coord` to `parent`, replacing any earlier parent. Used when a cheaper route is
    /// found before the cell is finalized.
    pub fn relink(&mut self, coord: Coord, parent: Coord) {
        if let Some(parent_ix) = self.parents.get_index_of(&parent) {
            if coord != parent {
                self.parents.insert(coord, parent_ix);
            }
        }
    }
    pub fn parent(&self, coord: Coord) -> Option<Coord> {
        self.parents
            .get(&coord)
            .and_then(|&ix| self.parents.get_index(ix))
            .map(|(c, _)| *c)
    }
    /// Walks parent links from `end` back to the root and returns the route in root-to-end
    /// order. Empty if `end` was never discovered.
    pub fn path_to(&self, end: Coord) -> Vec<Coord> {
        match self.parents.get_index_of(&end) {
            Some(ix) => reverse_path(&self.parents, ix),
            None => Vec::new(),
        }
    }
}

fn reverse_path(parents: &FxIndexMap<Coord, usize>, start: usize) -> Vec<Coord> {
    let mut path: Vec<Coord> = std::iter::successors(Some(start), |&i| {
        parents
            .get_index(i)
            .map(|(_, &p)| p)
            .filter(|&p| p != ROOT)
    })
    .filter_map(|i| parents.get_index(i).map(|(node, _)| *node))
    .collect();
    path.reverse();
    path
}

/// Turns an end coordinate into its start-to-end route by following the parent links recorded
/// in `tree`. Runs in the length of the route and never looks at the grid.
pub fn reconstruct_path(tree: &SearchTree, end: Coord) -> Vec<Coord> {
    tree.path_to(end)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A chain of three parent links yields four coordinates, start first.
    #[test]
    fn chain_of_three_links() {
        let mut tree = SearchTree::new(Coord::new(0, 0));
        assert!(tree.discover(Coord::new(0, 1), Coord::new(0, 0)));
        assert!(tree.discover(Coord::new(1, 1), Coord::new(0, 1)));
        assert!(tree.discover(Coord::new(1, 2), Coord::new(1, 1)));
        let path = reconstruct_path(&tree, Coord::new(1, 2));
        assert_eq!(
            path,
            vec![
                Coord::new(0, 0),
                Coord::new(0, 1),
                Coord::new(1, 1),
                Coord::new(1, 2)
            ]
        );
    }

    #[test]
    fn first_discovery_wins() {
        let mut tree = SearchTree::new(Coord::new(0, 0));
        tree.discover(Coord::new(0, 1), Coord::new(0, 0));
        tree.discover(Coord::new(1, 0), Coord::new(0, 0));
        assert!(!tree.discover(Coord::new(1, 1), Coord::new(5, 5)));
        assert!(tree.discover(Coord::new(1, 1), Coord::new(0, 1)));
        assert!(!tree.discover(Coord::new(1, 1), Coord::new(1, 0)));
        assert_eq!(tree.parent(Coord::new(1, 1)), Some(Coord::new(0, 1)));
    }

    #[test]
    fn relink_replaces_parent() {
        let mut tree = SearchTree::new(Coord::new(0, 0));
        tree.discover(Coord::new(0, 1), Coord::new(0, 0));
        tree.discover(Coord::new(1, 0), Coord::new(0, 0));
        tree.discover(Coord::new(1, 1), Coord::new(0, 1));
        tree.relink(Coord::new(1, 1), Coord::new(1, 0));
        assert_eq!(tree.parent(Coord::new(1, 1)), Some(Coord::new(1, 0)));
        assert_eq!(tree.path_to(Coord::new(1, 1)).len(), 3);
    }

    #[test]
    fn root_has_no_parent() {
        let tree = SearchTree::new(Coord::new(2, 2));
        assert_eq!(tree.parent(Coord::new(2, 2)), None);
        assert_eq!(tree.root(), Some(Coord::new(2, 2)));
        assert_eq!(tree.path_to(Coord::new(2, 2)), vec![Coord::new(2, 2)]);
        assert!(tree.path_to(Coord::new(0, 0)).is_empty());
    }
}
