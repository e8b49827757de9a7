//! # Funcstructs: enumeration of endofunction structures
//!
//! This library enumerates canonical representatives of unlabelled
//! combinatorial objects (rooted trees, fixed-length integer partitions and
//! fixed-content necklaces) and composes them to enumerate *endofunction
//! structures*: equivalence classes of self-maps on a finite set under
//! relabelling of the elements.
//!
//! ## Features
//!
//! - **Rooted trees**: constant-amortized-time generation of dominant level
//!   sequences (Beyer–Hedetniemi), nested-multiset tree form, arena form
//! - **Partitions**: fixed-length integer partitions by successor rule
//! - **Necklaces**: fixed-content necklace generation (Sawada), smallest
//!   rotation canonicalization, counting by period
//! - **Structures**: forests of trees arranged on necklaces of cycles,
//!   with exact counting via De Bruijn's mapping-pattern formula
//!
//! Every generator visits each equivalence class exactly once using only
//! local state transitions; there is no hashing-based deduplication and no
//! backtracking search over already-emitted objects.

#![warn(missing_docs)]
#![warn(clippy::all)]

/// Compositions of an integer into ordered parts
pub mod compositions;

/// Basic combinatorial counting helpers
pub mod counts;

/// Necklaces: equivalence classes of words under rotation
pub mod necklaces;

/// Integer partitions and their generators
pub mod partitions;

/// Unordered products of enumerated sequences
pub mod products;

/// Endofunction structures and their enumeration
pub mod structures;

/// Rooted trees, forests and their generators
pub mod trees;

// Re-export commonly used types
pub use necklaces::{FixedContentNecklaces, Necklace};
pub use partitions::{CycleType, FixedLengthPartitions, Partition};
pub use structures::{EndofunctionStructures, Funcstruct};
pub use trees::{
    DominantTree, Forest, ForestEnumerator, IndexedTree, OrderedTree, PartitionForests,
    RootedTree, TreeEnumerator,
};

/// Error types for the library
#[derive(Debug, thiserror::Error)]
pub enum FuncstructError {
    /// A constructor argument lies outside the generator's domain
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}

/// Result type for the library
pub type Result<T> = std::result::Result<T, FuncstructError>;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        necklaces::{FixedContentNecklaces, Necklace},
        partitions::{CycleType, FixedLengthPartitions, Partition},
        structures::{EndofunctionStructures, Funcstruct},
        trees::{
            DominantTree, Forest, ForestEnumerator, IndexedTree, OrderedTree,
            PartitionForests, RootedTree, TreeEnumerator,
        },
        FuncstructError, Result,
    };
}
