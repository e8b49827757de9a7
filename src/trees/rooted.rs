//! Unordered rooted trees as nested multisets of subtrees.
//!
//! Nothing distinguishes the nodes of an unlabelled tree, so an unordered
//! rooted tree is characterized entirely by the multiset of its subtrees.
//! This form is the traversable counterpart of [`DominantTree`]; the level
//! sequence remains the representation of record during generation.

use std::fmt;

use num_bigint::BigUint;
use num_traits::One;
use serde::{Deserialize, Serialize};

use super::levels::DominantTree;
use crate::products::run_lengths;

/// An unordered rooted tree: a root holding a multiset of subtrees.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RootedTree {
    // Sorted descending so that equal multisets compare equal.
    subtrees: Vec<RootedTree>,
}

impl RootedTree {
    /// A tree from a collection of subtrees.
    pub fn new<I: IntoIterator<Item = RootedTree>>(subtrees: I) -> Self {
        let mut subtrees: Vec<RootedTree> = subtrees.into_iter().collect();
        subtrees.sort_unstable_by(|a, b| b.cmp(a));
        RootedTree { subtrees }
    }

    /// The single-node tree.
    pub fn leaf() -> Self {
        RootedTree {
            subtrees: Vec::new(),
        }
    }

    /// The unordered tree of a level sequence's dominant form.
    pub fn from_dominant(tree: &DominantTree) -> Self {
        tree.unordered()
    }

    /// The root's subtrees, largest first.
    pub fn subtrees(&self) -> &[RootedTree] {
        &self.subtrees
    }

    /// Total number of nodes.
    pub fn node_count(&self) -> usize {
        1 + self.subtrees.iter().map(RootedTree::node_count).sum::<usize>()
    }

    /// Height of the tallest subtree plus one; zero for a leaf.
    pub fn height(&self) -> usize {
        self.subtrees
            .iter()
            .map(|s| s.height() + 1)
            .max()
            .unwrap_or(0)
    }

    /// The canonical ordered form: every subtree dominantly ordered,
    /// subtrees in descending order.
    pub fn ordered_form(&self) -> DominantTree {
        let mut levels = Vec::with_capacity(self.node_count());
        self.write_levels(0, &mut levels);
        // Subtree order here may not be dominant, so canonicalize.
        DominantTree::from_preorder(levels)
    }

    fn write_levels(&self, level: usize, out: &mut Vec<usize>) {
        out.push(level);
        for subtree in &self.subtrees {
            subtree.write_levels(level + 1, out);
        }
    }

    /// Number of ways to order the tree without changing its labelling:
    /// the product over distinct subtrees of `multiplicity!` times each
    /// subtree's own degeneracy raised to its multiplicity.
    pub fn degeneracy(&self) -> BigUint {
        let mut deg = BigUint::one();
        for (subtree, mult) in run_lengths(&self.subtrees) {
            for i in 2..=mult {
                deg *= BigUint::from(i);
            }
            deg *= subtree.degeneracy().pow(mult as u32);
        }
        deg
    }
}

impl fmt::Debug for RootedTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RootedTree{:?}", self.ordered_form().levels())
    }
}

impl Default for RootedTree {
    fn default() -> Self {
        Self::leaf()
    }
}

impl From<&DominantTree> for RootedTree {
    fn from(tree: &DominantTree) -> Self {
        tree.unordered()
    }
}
