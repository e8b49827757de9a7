//! Rooted trees: level sequences, canonical forms, forests and generators.

mod arena;
mod forests;
mod levels;
mod rooted;

pub use arena::IndexedTree;
pub use forests::{Forest, ForestEnumerator, PartitionForests};
pub use levels::{DominantTree, OrderedTree, TreeEnumerator, TreeIter};
pub use rooted::RootedTree;
