//! Forests: multisets of rooted trees, and their generators.
//!
//! [`PartitionForests`] enumerates the forests whose tree sizes realize a
//! given partition: trees of equal size are drawn as combinations with
//! repetition from the tree generator for that size, and the draws for
//! distinct sizes are combined as a product, so no multiset of trees is
//! emitted twice. [`ForestEnumerator`] enumerates all forests on `n` nodes
//! by chopping every tree on `n + 1` nodes at its root.

use num_bigint::BigUint;
use num_traits::One;
use serde::{Deserialize, Serialize};

use super::levels::{DominantTree, TreeEnumerator};
use crate::counts::{factorial, multichoose};
use crate::partitions::Partition;
use crate::products::{run_lengths, unordered_product};

/// A multiset of rooted trees, stored sorted.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Default, Serialize, Deserialize)]
pub struct Forest {
    trees: Vec<DominantTree>,
}

impl Forest {
    /// The empty forest.
    pub fn empty() -> Self {
        Forest { trees: Vec::new() }
    }

    /// A forest from a collection of trees.
    pub fn from_trees<I: IntoIterator<Item = DominantTree>>(trees: I) -> Self {
        trees.into_iter().collect()
    }

    /// The trees in canonical order.
    pub fn trees(&self) -> &[DominantTree] {
        &self.trees
    }

    /// Number of trees.
    pub fn len(&self) -> usize {
        self.trees.len()
    }

    /// Whether the forest holds no trees.
    pub fn is_empty(&self) -> bool {
        self.trees.is_empty()
    }

    /// Total number of nodes across all trees.
    pub fn node_count(&self) -> usize {
        self.trees.iter().map(DominantTree::node_count).sum()
    }

    /// Iterate over the trees.
    pub fn iter(&self) -> std::slice::Iter<'_, DominantTree> {
        self.trees.iter()
    }

    /// Distinct trees with their multiplicities.
    pub fn multiplicities(&self) -> Vec<(DominantTree, usize)> {
        run_lengths(&self.trees)
    }

    /// Number of distinct representations of the same multiset of
    /// labelled trees: multiplicity factorials times the tree
    /// degeneracies.
    pub fn degeneracy(&self) -> BigUint {
        let mut deg = BigUint::one();
        for (tree, mult) in self.multiplicities() {
            deg *= factorial(mult);
            deg *= tree.degeneracy().pow(mult as u32);
        }
        deg
    }
}

impl FromIterator<DominantTree> for Forest {
    fn from_iter<I: IntoIterator<Item = DominantTree>>(iter: I) -> Self {
        let mut trees: Vec<DominantTree> = iter.into_iter().collect();
        trees.sort_unstable();
        Forest { trees }
    }
}

impl IntoIterator for Forest {
    type Item = DominantTree;
    type IntoIter = std::vec::IntoIter<DominantTree>;

    fn into_iter(self) -> Self::IntoIter {
        self.trees.into_iter()
    }
}

impl<'a> IntoIterator for &'a Forest {
    type Item = &'a DominantTree;
    type IntoIter = std::slice::Iter<'a, DominantTree>;

    fn into_iter(self) -> Self::IntoIter {
        self.trees.iter()
    }
}

/// The forests whose tree sizes realize a fixed partition.
#[derive(Clone, Debug)]
pub struct PartitionForests {
    partition: Partition,
}

impl PartitionForests {
    /// Forests with one tree of size `p` for every part `p`.
    pub fn new(partition: Partition) -> Self {
        PartitionForests { partition }
    }

    /// Begin a fresh enumeration.
    pub fn iter(&self) -> impl Iterator<Item = Forest> {
        unordered_product(self.partition.multiplicities(), |&size| {
            TreeEnumerator::new_unchecked(size).iter()
        })
        .map(Forest::from_trees)
    }

    /// Number of forests: the product over distinct sizes of
    /// `C(T(size) + mult - 1, mult)` where `T` counts rooted trees.
    pub fn cardinality(&self) -> BigUint {
        let mut total = BigUint::one();
        for (size, mult) in self.partition.multiplicities() {
            let trees = TreeEnumerator::new_unchecked(size).cardinality();
            total *= multichoose(&trees, mult);
        }
        total
    }
}

impl IntoIterator for PartitionForests {
    type Item = Forest;
    type IntoIter = Box<dyn Iterator<Item = Forest>>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.iter())
    }
}

/// All forests of rooted trees on `n` nodes.
///
/// Every rooted tree on `n + 1` nodes is a forest on `n` nodes grafted to a
/// common root, so enumeration chops the trees of the next size up.
#[derive(Clone, Copy, Debug)]
pub struct ForestEnumerator {
    n: usize,
}

impl ForestEnumerator {
    /// Forests on `n` nodes; `n == 0` yields exactly the empty forest.
    pub fn new(n: usize) -> Self {
        ForestEnumerator { n }
    }

    /// Begin a fresh enumeration.
    pub fn iter(&self) -> impl Iterator<Item = Forest> {
        TreeEnumerator::new_unchecked(self.n + 1)
            .iter()
            .map(|tree| tree.chop())
    }

    /// Number of forests on `n` nodes.
    pub fn cardinality(&self) -> BigUint {
        TreeEnumerator::new_unchecked(self.n + 1).cardinality()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn forests_of(parts: &[usize]) -> Vec<Forest> {
        PartitionForests::new(Partition::new(parts.iter().copied()).unwrap())
            .iter()
            .collect()
    }

    #[test]
    fn test_empty_partition() {
        let all = PartitionForests::new(Partition::empty());
        let forests: Vec<Forest> = all.iter().collect();
        assert_eq!(forests, vec![Forest::empty()]);
        assert_eq!(all.cardinality(), BigUint::from(1u32));
    }

    #[test]
    fn test_single_part() {
        // One tree of size 4: the four trees on four nodes
        let forests = forests_of(&[4]);
        assert_eq!(forests.len(), 4);
        for forest in &forests {
            assert_eq!(forest.len(), 1);
            assert_eq!(forest.node_count(), 4);
        }
    }

    #[test]
    fn test_equal_parts_draw_multisets() {
        // Two trees of size 3 from 2 shapes: C(2+1, 2) = 3 multisets
        let forests = forests_of(&[3, 3]);
        assert_eq!(forests.len(), 3);
        let mut dedup = forests.clone();
        dedup.sort();
        dedup.dedup();
        assert_eq!(dedup.len(), forests.len());
    }

    #[test]
    fn test_mixed_parts() {
        // Sizes (3, 2): 2 shapes of size 3, 1 of size 2
        let forests = forests_of(&[3, 2]);
        assert_eq!(forests.len(), 2);
        for forest in &forests {
            assert_eq!(forest.node_count(), 5);
        }
    }

    #[test]
    fn test_cardinality_matches_enumeration() {
        for parts in [vec![1], vec![2, 2], vec![4, 3, 3], vec![1, 1, 1, 1]] {
            let all = PartitionForests::new(Partition::new(parts).unwrap());
            assert_eq!(BigUint::from(all.iter().count()), all.cardinality());
        }
    }

    #[test]
    fn test_forest_counts() {
        // Forests on n nodes = trees on n+1 nodes (OEIS A000081 shifted)
        let expected = [1usize, 1, 2, 4, 9, 20, 48];
        for (n, &count) in expected.iter().enumerate() {
            let all = ForestEnumerator::new(n);
            assert_eq!(all.iter().count(), count, "n = {n}");
            assert_eq!(all.cardinality(), BigUint::from(count));
            for forest in all.iter() {
                assert_eq!(forest.node_count(), n);
            }
        }
    }

    #[test]
    fn test_forest_degeneracy() {
        // Two identical single-node trees: 2! representations
        let leaf = DominantTree::from_levels(vec![0]).unwrap();
        let forest = Forest::from_trees(vec![leaf.clone(), leaf]);
        assert_eq!(forest.degeneracy(), BigUint::from(2u32));
    }
}
