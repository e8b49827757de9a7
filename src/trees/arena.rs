//! Explicit parent/child form of a rooted tree.
//!
//! Generation works on level sequences alone; this arena form exists for
//! callers that need to walk parent and child relationships. Nodes are
//! indexed by their preorder position, node 0 is the root, and each node
//! stores the indices of its children.

use std::collections::VecDeque;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::levels::OrderedTree;

/// A rooted tree as an adjacency list over preorder node indices.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IndexedTree {
    children: Vec<Vec<usize>>,
    parents: Vec<Option<usize>>,
}

impl IndexedTree {
    /// Build the arena from a level sequence: each node's parent is the
    /// most recent node one level below it.
    pub fn from_levels(tree: &OrderedTree) -> Self {
        let levels = tree.levels();
        let n = levels.len();
        let mut children = vec![Vec::new(); n];
        let mut parents = vec![None; n];
        // Most recent node seen at each height; the grafting points.
        let mut last_at_level = vec![0usize; tree.height() + 1];
        for (node, &level) in levels.iter().enumerate().skip(1) {
            let parent = last_at_level[level - 1];
            children[parent].push(node);
            parents[node] = Some(parent);
            last_at_level[level] = node;
        }
        IndexedTree { children, parents }
    }

    /// Number of nodes.
    pub fn node_count(&self) -> usize {
        self.children.len()
    }

    /// Children of a node, in preorder.
    pub fn children(&self, node: usize) -> &[usize] {
        &self.children[node]
    }

    /// Parent of a node; `None` for the root.
    pub fn parent(&self, node: usize) -> Option<usize> {
        self.parents[node]
    }

    /// Height of each node above the root.
    pub fn depths(&self) -> Vec<usize> {
        let mut depths = vec![0; self.node_count()];
        let mut queue = VecDeque::new();
        queue.push_back((0, 0));
        while let Some((node, depth)) = queue.pop_front() {
            depths[node] = depth;
            for &child in &self.children[node] {
                queue.push_back((child, depth + 1));
            }
        }
        depths
    }

    /// Number of nodes with no children.
    pub fn leaf_count(&self) -> usize {
        self.children.iter().filter(|c| c.is_empty()).count()
    }

    /// Indices on the path from a node back up to the root, root first.
    pub fn path_to_root(&self, mut node: usize) -> Vec<usize> {
        let mut path = vec![node];
        while let Some(parent) = self.parents[node] {
            path.push(parent);
            node = parent;
        }
        path.reverse();
        path
    }

    /// Number of nodes in the subtree hanging from `node`, itself included.
    pub fn subtree_size(&self, node: usize) -> usize {
        1 + self.children[node]
            .iter()
            .map(|&child| self.subtree_size(child))
            .sum::<usize>()
    }
}

impl fmt::Debug for IndexedTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "IndexedTree(n={}, children={:?})", self.node_count(), self.children)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn arena(levels: &[usize]) -> IndexedTree {
        IndexedTree::from_levels(&OrderedTree::new(levels.iter().copied()).unwrap())
    }

    #[test]
    fn test_single_node() {
        let tree = arena(&[0]);
        assert_eq!(tree.node_count(), 1);
        assert_eq!(tree.parent(0), None);
        assert!(tree.children(0).is_empty());
        assert_eq!(tree.leaf_count(), 1);
    }

    #[test]
    fn test_path_tree() {
        let tree = arena(&[0, 1, 2, 3]);
        assert_eq!(tree.children(0), &[1]);
        assert_eq!(tree.children(2), &[3]);
        assert_eq!(tree.parent(3), Some(2));
        assert_eq!(tree.path_to_root(3), vec![0, 1, 2, 3]);
        assert_eq!(tree.leaf_count(), 1);
    }

    #[test]
    fn test_branching() {
        // Root with a 2-chain and a leaf child
        let tree = arena(&[0, 1, 2, 1]);
        assert_eq!(tree.children(0), &[1, 3]);
        assert_eq!(tree.children(1), &[2]);
        assert_eq!(tree.parent(3), Some(0));
        assert_eq!(tree.depths(), vec![0, 1, 2, 1]);
        assert_eq!(tree.subtree_size(1), 2);
        assert_eq!(tree.subtree_size(0), 4);
    }

    #[test]
    fn test_depths_recover_levels() {
        use crate::trees::TreeEnumerator;
        for tree in TreeEnumerator::new(7).unwrap().iter() {
            let ordered = OrderedTree::new(tree.levels().iter().copied()).unwrap();
            let arena = IndexedTree::from_levels(&ordered);
            assert_eq!(arena.depths(), tree.levels());
        }
    }
}
