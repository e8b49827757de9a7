//! Integer partitions held in non-increasing order, and their generators.
//!
//! [`FixedLengthPartitions`] enumerates the partitions of `n` into exactly
//! `length` positive parts by a successor rule over the maximal suffix of
//! equal trailing parts, starting from the most balanced partition. The
//! bookkeeping for that suffix amortizes to constant time per partition.

use num_bigint::{BigInt, BigUint};
use num_traits::{One, Zero};
use serde::{Deserialize, Serialize};

use crate::products::run_lengths;
use crate::{FuncstructError, Result};

/// A partition of an integer: positive parts stored in non-increasing order.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Serialize, Deserialize)]
pub struct Partition {
    parts: Vec<usize>,
}

/// A partition read as the multiset of cycle lengths of an endofunction
/// structure.
pub type CycleType = Partition;

impl Partition {
    /// Create a partition from the given parts, sorting them into canonical
    /// non-increasing order. Fails on a zero part.
    pub fn new<I: IntoIterator<Item = usize>>(parts: I) -> Result<Self> {
        let mut parts: Vec<usize> = parts.into_iter().collect();
        if parts.iter().any(|&p| p == 0) {
            return Err(FuncstructError::InvalidParameter(
                "partition parts must be positive".to_string(),
            ));
        }
        parts.sort_unstable_by(|a, b| b.cmp(a));
        Ok(Partition { parts })
    }

    /// The empty partition of zero.
    pub fn empty() -> Self {
        Partition { parts: Vec::new() }
    }

    pub(crate) fn from_sorted(parts: Vec<usize>) -> Self {
        debug_assert!(parts.windows(2).all(|w| w[0] >= w[1]));
        Partition { parts }
    }

    /// The parts in non-increasing order.
    pub fn parts(&self) -> &[usize] {
        &self.parts
    }

    /// Sum of the parts.
    pub fn sum(&self) -> usize {
        self.parts.iter().sum()
    }

    /// Number of parts.
    pub fn len(&self) -> usize {
        self.parts.len()
    }

    /// Whether this is the empty partition.
    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// Distinct parts with their multiplicities, largest part first.
    pub fn multiplicities(&self) -> Vec<(usize, usize)> {
        run_lengths(&self.parts)
    }
}

/// The most balanced partition of `n` into `length` parts (parts differ by
/// at most one), together with the length of its suffix of ones.
///
/// The ones count seeds the suffix bookkeeping of the successor rule, saving
/// a rescan of the freshly built tail.
fn balanced_parts(n: usize, length: usize) -> (Vec<usize>, usize) {
    let binsize = n / length;
    let overstuffed = n - length * binsize;
    let regular = length - overstuffed;
    let mut parts = vec![binsize + 1; overstuffed];
    parts.extend(std::iter::repeat(binsize).take(regular));
    let ones = if binsize == 1 { regular } else { 0 };
    (parts, ones)
}

/// The partitions of `n` into exactly `length` positive parts.
///
/// Restartable: each call to [`FixedLengthPartitions::iter`] begins a fresh
/// enumeration from the balanced partition.
#[derive(Clone, Copy, Debug)]
pub struct FixedLengthPartitions {
    n: usize,
    length: usize,
}

impl FixedLengthPartitions {
    /// Partitions of `n` into exactly `length` parts. All argument values
    /// are valid; impossible combinations enumerate nothing.
    pub fn new(n: usize, length: usize) -> Self {
        FixedLengthPartitions { n, length }
    }

    /// Begin a fresh enumeration.
    pub fn iter(&self) -> FixedLengthPartitionIter {
        FixedLengthPartitionIter {
            n: self.n,
            length: self.length,
            parts: Vec::new(),
            ones: 0,
            state: IterState::Fresh,
        }
    }
}

impl IntoIterator for FixedLengthPartitions {
    type Item = Partition;
    type IntoIter = FixedLengthPartitionIter;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl IntoIterator for &FixedLengthPartitions {
    type Item = Partition;
    type IntoIter = FixedLengthPartitionIter;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum IterState {
    Fresh,
    Running,
    Done,
}

/// Iteration state for [`FixedLengthPartitions`].
#[derive(Clone, Debug)]
pub struct FixedLengthPartitionIter {
    n: usize,
    length: usize,
    parts: Vec<usize>,
    /// Length of the trailing run of ones in `parts`.
    ones: usize,
    state: IterState,
}

impl FixedLengthPartitionIter {
    /// Advance `parts` to its successor; false when the enumeration is over.
    fn step(&mut self) -> bool {
        let w = self.length;
        let j = self.ones;
        // The suffix of ones plus the part it would increment must fit.
        if j + 2 > w {
            return false;
        }
        let mut k = 2;
        let mut s = j + self.parts[w - j - 1] - 1;
        while j + k < w && self.parts[w - j - k - 1] == self.parts[w - j - 2] {
            s += self.parts[w - j - 2];
            k += 1;
        }
        k -= 1;
        self.parts[w - j - k - 1] += 1;
        let (suffix, ones) = balanced_parts(s, j + k);
        self.parts.truncate(w - j - k);
        self.parts.extend(suffix);
        self.ones = ones;
        true
    }
}

impl Iterator for FixedLengthPartitionIter {
    type Item = Partition;

    fn next(&mut self) -> Option<Partition> {
        match self.state {
            IterState::Done => None,
            IterState::Fresh => {
                self.state = IterState::Running;
                if self.length == 0 {
                    self.state = IterState::Done;
                    return (self.n == 0).then(Partition::empty);
                }
                if self.length == 1 {
                    self.state = IterState::Done;
                    return (self.n > 0).then(|| Partition::from_sorted(vec![self.n]));
                }
                if self.n < self.length {
                    self.state = IterState::Done;
                    return None;
                }
                let (parts, ones) = balanced_parts(self.n, self.length);
                self.parts = parts;
                self.ones = ones;
                Some(Partition::from_sorted(self.parts.clone()))
            }
            IterState::Running => {
                if self.step() {
                    Some(Partition::from_sorted(self.parts.clone()))
                } else {
                    self.state = IterState::Done;
                    None
                }
            }
        }
    }
}

/// All partitions of `n` into any number of parts, shortest first.
///
/// `n == 0` yields exactly the empty partition.
pub fn partitions(n: usize) -> impl Iterator<Item = Partition> {
    let empty = (n == 0).then(Partition::empty);
    empty
        .into_iter()
        .chain((1..=n).flat_map(move |l| FixedLengthPartitions::new(n, l)))
}

/// The partition numbers `p(0) ..= p(n)`, by Euler's pentagonal-number
/// recurrence; each pass sums `O(sqrt(m))` earlier terms.
pub fn partition_numbers_upto(n: usize) -> Vec<BigUint> {
    let mut counts: Vec<BigInt> = vec![BigInt::zero(); n + 1];
    counts[0] = BigInt::one();
    for m in 1..=n {
        let mut total = BigInt::zero();
        let mut k: i64 = 1;
        loop {
            let mut hit = false;
            for pent in [k * (3 * k - 1) / 2, k * (3 * k + 1) / 2] {
                let pent = pent as usize;
                if pent <= m {
                    hit = true;
                    let term = &counts[m - pent];
                    if k % 2 == 1 {
                        total += term;
                    } else {
                        total -= term;
                    }
                }
            }
            if !hit {
                break;
            }
            k += 1;
        }
        counts[m] = total;
    }
    counts
        .into_iter()
        .map(|c| c.magnitude().clone())
        .collect()
}
