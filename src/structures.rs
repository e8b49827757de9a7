//! Endofunction structures: conjugacy classes of self-maps on a finite set.
//!
//! The functional digraph of a self-map decomposes into cycles with rooted
//! trees hanging off the cyclic nodes. Relabelling symmetry is cancelled in
//! three layers: the trees attached to a cycle are taken in dominant form,
//! the arrangement of trees around one cycle is a [`Necklace`], and the
//! collection of cycles is a multiset. A structure therefore determines a
//! self-map up to conjugation and vice versa.

use itertools::Either;
use num_bigint::{BigInt, BigUint};
use num_rational::BigRational;
use num_traits::{One, Zero};
use serde::{Deserialize, Serialize};

use crate::compositions::WeakCompositions;
use crate::counts::{divisors, factorial};
use crate::necklaces::{FixedContentNecklaces, Necklace};
use crate::partitions::{partitions, CycleType, FixedLengthPartitions, Partition};
use crate::products::{bundles, run_lengths, unordered_product};
use crate::trees::{DominantTree, PartitionForests};
use crate::{FuncstructError, Result};

/// An endofunction structure: a multiset of necklaces whose beads are the
/// dominant trees attached to the nodes of one cycle.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Serialize, Deserialize)]
pub struct Funcstruct {
    cycles: Vec<Necklace<DominantTree>>,
}

impl Funcstruct {
    /// A structure from its cycles.
    pub fn new<I: IntoIterator<Item = Necklace<DominantTree>>>(cycles: I) -> Self {
        let mut cycles: Vec<Necklace<DominantTree>> = cycles.into_iter().collect();
        cycles.sort_unstable();
        Funcstruct { cycles }
    }

    /// The cycles in canonical order.
    pub fn cycles(&self) -> &[Necklace<DominantTree>] {
        &self.cycles
    }

    /// Total number of nodes, cyclic and tree nodes alike.
    pub fn node_count(&self) -> usize {
        self.cycles
            .iter()
            .map(|cycle| cycle.iter().map(DominantTree::node_count).sum::<usize>())
            .sum()
    }

    /// The multiset of cycle lengths.
    pub fn cycle_type(&self) -> CycleType {
        let mut lengths: Vec<usize> = self.cycles.iter().map(Necklace::len).collect();
        lengths.sort_unstable_by(|a, b| b.cmp(a));
        Partition::from_sorted(lengths)
    }

    /// Number of labellings fixed by the structure's symmetries. The size
    /// of the conjugacy class of any representative self-map on `n` nodes
    /// is `n!` divided by this.
    pub fn degeneracy(&self) -> BigUint {
        let mut deg = BigUint::one();
        for (cycle, mult) in run_lengths(&self.cycles) {
            // Permutations of interchangeable cycles
            deg *= factorial(mult);
            // Rotations of the cycle, then the orderings within each tree
            let mut cycle_deg = BigUint::from(cycle.degeneracy());
            for tree in &cycle {
                cycle_deg *= tree.degeneracy();
            }
            deg *= cycle_deg.pow(mult as u32);
        }
        deg
    }
}

/// Every arrangement of `free` extra nodes as trees attached to one cycle
/// of length `len`, canonicalized as a necklace of dominant trees.
fn attachment_forests(
    free: usize,
    len: usize,
) -> impl Iterator<Item = Necklace<DominantTree>> {
    FixedLengthPartitions::new(free + len, len)
        .into_iter()
        .flat_map(|sizes| {
            PartitionForests::new(sizes)
                .iter()
                .flat_map(|forest| FixedContentNecklaces::new(forest).iter())
        })
}

/// Every way to attach `free` extra nodes to a group of `mult`
/// interchangeable cycles of length `len`, as a multiset of necklaces.
fn component_groups(
    free: usize,
    len: usize,
    mult: usize,
) -> impl Iterator<Item = Vec<Necklace<DominantTree>>> {
    // Partition the free nodes plus one budget slot per cycle, so every
    // cycle receives a positive allowance.
    FixedLengthPartitions::new(free + mult, mult)
        .into_iter()
        .flat_map(move |budgets| {
            unordered_product(budgets.multiplicities(), move |&allowance| {
                attachment_forests(allowance - 1, len)
            })
        })
}

/// The structures on `n` nodes whose cycle lengths realize `cycle_type`.
fn cycle_type_structs(n: usize, cycle_type: Partition) -> impl Iterator<Item = Funcstruct> {
    let free = n - cycle_type.sum();
    let groups = cycle_type.multiplicities();
    let group_count = groups.len();
    WeakCompositions::new(free, group_count).flat_map(move |composition| {
        let factors: Vec<Vec<Vec<Necklace<DominantTree>>>> = composition
            .iter()
            .zip(groups.iter())
            .map(|(&c, &(len, mult))| component_groups(c, len, mult).collect())
            .collect();
        bundles(factors).map(|bundle| Funcstruct::new(bundle.into_iter().flatten()))
    })
}

/// The endofunction structures on a fixed number of nodes, optionally
/// restricted to one cycle type.
///
/// Restartable: each call to [`EndofunctionStructures::iter`] begins a
/// fresh enumeration.
#[derive(Clone, Debug)]
pub struct EndofunctionStructures {
    n: usize,
    cycle_type: Option<CycleType>,
}

impl EndofunctionStructures {
    /// All structures on `n` nodes, over every admissible cycle type.
    pub fn new(n: usize) -> Self {
        EndofunctionStructures {
            n,
            cycle_type: None,
        }
    }

    /// The structures on `n` nodes with the given cycle type. The parts
    /// count the cyclic nodes, so their sum must not exceed `n`; the
    /// remaining nodes hang off the cycles as tree nodes.
    pub fn with_cycle_type(n: usize, cycle_type: CycleType) -> Result<Self> {
        if cycle_type.sum() > n {
            return Err(FuncstructError::InvalidParameter(format!(
                "cycle type {:?} wants {} cyclic nodes but only {} exist",
                cycle_type.parts(),
                cycle_type.sum(),
                n
            )));
        }
        Ok(EndofunctionStructures {
            n,
            cycle_type: Some(cycle_type),
        })
    }

    /// Begin a fresh enumeration.
    pub fn iter(&self) -> impl Iterator<Item = Funcstruct> {
        let n = self.n;
        match &self.cycle_type {
            Some(cycle_type) => Either::Left(cycle_type_structs(n, cycle_type.clone())),
            None => Either::Right((1..=n).flat_map(move |cyclic| {
                partitions(cyclic).flat_map(move |cycle_type| cycle_type_structs(n, cycle_type))
            })),
        }
    }

    /// Number of structures. Unrestricted, this is De Bruijn's
    /// mapping-pattern count; under a cycle type the enumeration itself is
    /// tallied.
    pub fn cardinality(&self) -> BigUint {
        match &self.cycle_type {
            Some(_) => BigUint::from(self.iter().count()),
            None => mapping_patterns(self.n),
        }
    }
}

/// Number of mapping patterns on `n` points, by the formula in De Bruijn,
/// "Enumeration of Mapping Patterns", J. Combinatorial Theory 12 (1972):
/// a sum of rational products over the partitions of `n`, each partition
/// read as the multiplicities of its parts.
fn mapping_patterns(n: usize) -> BigUint {
    let mut total = BigRational::zero();
    for partition in partitions(n) {
        let mut mults = vec![0usize; n + 1];
        for &part in partition.parts() {
            mults[part] += 1;
        }
        let mut term = BigRational::one();
        for i in 1..=n {
            let b = mults[i];
            if b == 0 {
                continue;
            }
            let touched: usize = divisors(i).into_iter().map(|j| j * mults[j]).sum();
            let numer = BigInt::from(touched).pow(b as u32);
            let denom = BigInt::from(i).pow(b as u32) * BigInt::from(factorial(b));
            term *= BigRational::new(numer, denom);
        }
        total += term;
    }
    total.to_integer().magnitude().clone()
}
