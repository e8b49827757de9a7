//! Ordered rooted trees as level sequences, and their dominant forms.
//!
//! A level sequence lists each node's height above the root in depth-first
//! preorder; the root contributes the leading zero. The *dominant* sequence
//! of an unordered tree is the lexicographically greatest level sequence
//! among all orderings of its subtrees, which makes it a canonical
//! representative: two level sequences denote the same unordered tree
//! exactly when their dominant forms are equal.

use num_bigint::BigUint;
use num_traits::{One, Zero};
use serde::{Deserialize, Serialize};

use super::forests::Forest;
use super::rooted::RootedTree;
use crate::counts::divisors;
use crate::{FuncstructError, Result};

/// Index ranges of the root's branches within a level sequence: each branch
/// begins where the level returns to one above the root.
fn branch_ranges(levels: &[usize]) -> Vec<(usize, usize)> {
    let mut ranges = Vec::new();
    let root = levels[0];
    let mut start = 1;
    for (i, &level) in levels.iter().enumerate().skip(2) {
        if level == root + 1 {
            ranges.push((start, i));
            start = i;
        }
    }
    if levels.len() > 1 {
        ranges.push((start, levels.len()));
    }
    ranges
}

/// Recursively order every branch dominantly and sort branches in
/// descending lexicographic order.
fn dominant_sequence(levels: &[usize]) -> Vec<usize> {
    let mut branches: Vec<Vec<usize>> = branch_ranges(levels)
        .into_iter()
        .map(|(a, b)| dominant_sequence(&levels[a..b]))
        .collect();
    branches.sort_unstable_by(|a, b| b.cmp(a));
    let mut out = Vec::with_capacity(levels.len());
    out.push(levels[0]);
    for branch in branches {
        out.extend(branch);
    }
    out
}

/// An ordered rooted tree represented by its level sequence.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Serialize, Deserialize)]
pub struct OrderedTree {
    levels: Vec<usize>,
}

impl OrderedTree {
    /// Validate a level sequence: it must start at zero and never climb by
    /// more than one, and no later node may return to the root level.
    pub fn new<I: IntoIterator<Item = usize>>(levels: I) -> Result<Self> {
        let levels: Vec<usize> = levels.into_iter().collect();
        if levels.is_empty() {
            return Err(FuncstructError::InvalidParameter(
                "a tree requires at least one node".to_string(),
            ));
        }
        if levels[0] != 0 {
            return Err(FuncstructError::InvalidParameter(
                "level sequence must start at the root level zero".to_string(),
            ));
        }
        for (i, window) in levels.windows(2).enumerate() {
            if window[1] == 0 || window[1] > window[0] + 1 {
                return Err(FuncstructError::InvalidParameter(format!(
                    "level {} at position {} breaks the preorder growth rule",
                    window[1],
                    i + 1
                )));
            }
        }
        Ok(OrderedTree { levels })
    }

    /// The level sequence.
    pub fn levels(&self) -> &[usize] {
        &self.levels
    }

    /// Number of nodes.
    pub fn node_count(&self) -> usize {
        self.levels.len()
    }

    /// Greatest height above the root.
    pub fn height(&self) -> usize {
        self.levels.iter().copied().max().unwrap_or(0)
    }

    /// The root's branches, each rooted one level up.
    pub fn branches(&self) -> impl Iterator<Item = OrderedTree> + '_ {
        branch_ranges(&self.levels).into_iter().map(move |(a, b)| {
            OrderedTree {
                levels: self.levels[a..b].to_vec(),
            }
        })
    }

    /// The root's subtrees, re-rooted at level zero.
    pub fn subtrees(&self) -> impl Iterator<Item = OrderedTree> + '_ {
        branch_ranges(&self.levels).into_iter().map(move |(a, b)| {
            OrderedTree {
                levels: self.levels[a..b].iter().map(|&l| l - 1).collect(),
            }
        })
    }

    /// Forget the subtree ordering.
    pub fn unordered(&self) -> RootedTree {
        RootedTree::new(self.subtrees().map(|s| s.unordered()))
    }

    /// Canonicalize to the dominant ordering.
    pub fn dominant(&self) -> DominantTree {
        DominantTree {
            levels: dominant_sequence(&self.levels),
        }
    }
}

/// The dominant (canonical) ordering of an unordered rooted tree: the
/// lexicographically greatest level sequence, formed by putting every
/// subtree in dominant form and sorting subtrees in descending order.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Serialize, Deserialize)]
pub struct DominantTree {
    levels: Vec<usize>,
}

impl DominantTree {
    /// Validate and canonicalize a level sequence.
    pub fn from_levels<I: IntoIterator<Item = usize>>(levels: I) -> Result<Self> {
        Ok(OrderedTree::new(levels)?.dominant())
    }

    /// Wrap a sequence already known to be dominantly ordered.
    pub(crate) fn from_canonical(levels: Vec<usize>) -> Self {
        debug_assert_eq!(levels, dominant_sequence(&levels));
        DominantTree { levels }
    }

    /// Canonicalize a preorder sequence built internally, skipping
    /// validation.
    pub(crate) fn from_preorder(levels: Vec<usize>) -> Self {
        DominantTree {
            levels: dominant_sequence(&levels),
        }
    }

    /// The canonical level sequence.
    pub fn levels(&self) -> &[usize] {
        &self.levels
    }

    /// Number of nodes.
    pub fn node_count(&self) -> usize {
        self.levels.len()
    }

    /// Greatest height above the root.
    pub fn height(&self) -> usize {
        self.levels.iter().copied().max().unwrap_or(0)
    }

    /// The root's subtrees; dominantly ordered by construction.
    pub fn subtrees(&self) -> impl Iterator<Item = DominantTree> + '_ {
        branch_ranges(&self.levels).into_iter().map(move |(a, b)| {
            DominantTree {
                levels: self.levels[a..b].iter().map(|&l| l - 1).collect(),
            }
        })
    }

    /// The multiset of the root's subtrees.
    pub fn chop(&self) -> Forest {
        self.subtrees().collect()
    }

    /// Forget the ordering, producing the nested-multiset tree form.
    pub fn unordered(&self) -> RootedTree {
        RootedTree::new(self.subtrees().map(|s| s.unordered()))
    }

    /// Number of orderings that represent the same labelling of the
    /// underlying unordered tree: the subtree multiset's degeneracy times
    /// the degeneracies of the subtrees themselves.
    pub fn degeneracy(&self) -> BigUint {
        self.chop().degeneracy()
    }
}

/// The unlabelled rooted trees on a fixed number of nodes.
///
/// Restartable: each call to [`TreeEnumerator::iter`] begins a fresh
/// enumeration from the path tree.
#[derive(Clone, Copy, Debug)]
pub struct TreeEnumerator {
    n: usize,
}

impl TreeEnumerator {
    /// The trees on `n` nodes; fails for `n == 0`.
    pub fn new(n: usize) -> Result<Self> {
        if n == 0 {
            return Err(FuncstructError::InvalidParameter(
                "every tree requires at least one node".to_string(),
            ));
        }
        Ok(TreeEnumerator { n })
    }

    pub(crate) fn new_unchecked(n: usize) -> Self {
        debug_assert!(n >= 1);
        TreeEnumerator { n }
    }

    /// Begin a fresh enumeration from the path tree `[0, 1, ..., n-1]`.
    pub fn iter(&self) -> TreeIter {
        TreeIter {
            levels: (0..self.n).collect(),
            done: false,
        }
    }

    /// Number of trees on `n` nodes, by the recurrence featured in Finch's
    /// "Otter's Tree Enumeration Constants" (OEIS A000081).
    pub fn cardinality(&self) -> BigUint {
        let mut table = vec![BigUint::zero(); self.n + 1];
        table[1] = BigUint::one();
        for m in 2..=self.n {
            let mut total = BigUint::zero();
            for i in 1..m {
                let inner: BigUint = divisors(i)
                    .into_iter()
                    .map(|d| &table[d] * BigUint::from(d))
                    .sum();
                total += inner * &table[m - i];
            }
            table[m] = total / BigUint::from(m - 1);
        }
        table.pop().unwrap_or_default()
    }
}

impl IntoIterator for TreeEnumerator {
    type Item = DominantTree;
    type IntoIter = TreeIter;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl IntoIterator for &TreeEnumerator {
    type Item = DominantTree;
    type IntoIter = TreeIter;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iteration state for [`TreeEnumerator`]: the Beyer–Hedetniemi successor
/// scheme over the current level sequence, constant amortized writes per
/// tree.
#[derive(Clone, Debug)]
pub struct TreeIter {
    levels: Vec<usize>,
    done: bool,
}

impl TreeIter {
    /// Overwrite the tail from the split point with copies of the pattern
    /// ending just before it.
    fn step(&mut self) {
        let n = self.levels.len();
        let mut p = n - 1;
        while self.levels[p] == self.levels[1] {
            p -= 1;
        }
        let mut q = p - 1;
        while self.levels[q] >= self.levels[p] {
            q -= 1;
        }
        for i in p..n {
            self.levels[i] = self.levels[i - (p - q)];
        }
    }
}

impl Iterator for TreeIter {
    type Item = DominantTree;

    fn next(&mut self) -> Option<DominantTree> {
        if self.done {
            return None;
        }
        let tree = DominantTree::from_canonical(self.levels.clone());
        // The star-like tree with both early levels equal is the last one.
        if self.levels.len() <= 2 || self.levels[1] == self.levels[2] {
            self.done = true;
        } else {
            self.step();
        }
        Some(tree)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trees(n: usize) -> Vec<DominantTree> {
        TreeEnumerator::new(n).unwrap().iter().collect()
    }

    #[test]
    fn test_zero_nodes_rejected() {
        assert!(TreeEnumerator::new(0).is_err());
    }

    #[test]
    fn test_singleton_cases() {
        assert_eq!(trees(1).len(), 1);
        assert_eq!(trees(1)[0].levels(), &[0]);
        assert_eq!(trees(2).len(), 1);
        assert_eq!(trees(2)[0].levels(), &[0, 1]);
    }

    #[test]
    fn test_four_node_trees_in_order() {
        let levels: Vec<Vec<usize>> = trees(4).iter().map(|t| t.levels().to_vec()).collect();
        assert_eq!(
            levels,
            vec![
                vec![0, 1, 2, 3],
                vec![0, 1, 2, 2],
                vec![0, 1, 2, 1],
                vec![0, 1, 1, 1],
            ]
        );
    }

    #[test]
    fn test_tree_counts() {
        // OEIS A000081
        let expected = [1usize, 1, 2, 4, 9, 20, 48, 115];
        for (i, &count) in expected.iter().enumerate() {
            let n = i + 1;
            let enumerator = TreeEnumerator::new(n).unwrap();
            assert_eq!(enumerator.iter().count(), count, "n = {n}");
            assert_eq!(enumerator.cardinality(), BigUint::from(count), "n = {n}");
        }
    }

    #[test]
    fn test_emitted_trees_unique_and_canonical() {
        for n in 1..=8 {
            let all = trees(n);
            for tree in &all {
                assert_eq!(tree.node_count(), n);
                let recanon = DominantTree::from_levels(tree.levels().to_vec()).unwrap();
                assert_eq!(&recanon, tree);
            }
            let mut dedup = all.clone();
            dedup.sort();
            dedup.dedup();
            assert_eq!(dedup.len(), all.len());
        }
    }

    #[test]
    fn test_dominant_ordering() {
        // A caterpillar entered with its short branch first
        let tree = DominantTree::from_levels(vec![0, 1, 1, 2, 3]).unwrap();
        assert_eq!(tree.levels(), &[0, 1, 2, 3, 1]);
        // Canonicalization is invariant under subtree ordering
        let other = DominantTree::from_levels(vec![0, 1, 2, 3, 1]).unwrap();
        assert_eq!(tree, other);
    }

    #[test]
    fn test_invalid_level_sequences() {
        assert!(OrderedTree::new([]).is_err());
        assert!(OrderedTree::new([1, 2]).is_err());
        assert!(OrderedTree::new([0, 2]).is_err());
        assert!(OrderedTree::new([0, 1, 3]).is_err());
        assert!(OrderedTree::new([0, 1, 0]).is_err());
    }

    #[test]
    fn test_subtrees() {
        let tree = DominantTree::from_levels(vec![0, 1, 2, 2, 1]).unwrap();
        let subtrees: Vec<Vec<usize>> =
            tree.subtrees().map(|s| s.levels().to_vec()).collect();
        assert_eq!(subtrees, vec![vec![0, 1, 1], vec![0]]);
    }

    #[test]
    fn test_height() {
        assert_eq!(DominantTree::from_levels(vec![0]).unwrap().height(), 0);
        assert_eq!(
            DominantTree::from_levels(vec![0, 1, 2, 1]).unwrap().height(),
            2
        );
    }
}
