//! Necklaces: equivalence classes of words under cyclic rotation.
//!
//! A necklace is the lexicographically smallest rotation of a word; two
//! words are equivalent exactly when their necklace forms agree.
//! [`FixedContentNecklaces`] enumerates every necklace over a fixed multiset
//! of beads with Sawada's simple-fixed-content algorithm, which prunes every
//! failing branch in constant time and therefore runs in amortized constant
//! time per necklace.

use num_bigint::BigUint;
use num_integer::Integer;
use num_traits::Zero;
use serde::{Deserialize, Serialize};

use crate::counts::{divisors, multinomial_coefficient};
use crate::products::run_lengths;
use crate::{FuncstructError, Result};

/// Number of distinct cyclic rotations of a word; equivalently the smallest
/// positive rotation under which the word is invariant.
///
/// Computed from the longest proper border of the word: rotating by
/// `n - border` is the identity exactly when that amount divides `n`.
pub fn periodicity<T: PartialEq>(word: &[T]) -> usize {
    let n = word.len();
    if n == 0 {
        return 0;
    }
    let mut fail = vec![0usize; n];
    for i in 1..n {
        let mut j = fail[i - 1];
        fail[i] = loop {
            if word[i] == word[j] {
                break j + 1;
            }
            if j == 0 {
                break 0;
            }
            j = fail[j - 1];
        };
    }
    let p = n - fail[n - 1];
    if n % p == 0 {
        p
    } else {
        n
    }
}

/// Index of the lexicographically least rotation, by the two-cursor
/// comparison scan (linear time, no allocation).
fn least_rotation_start<T: Ord>(word: &[T]) -> usize {
    let n = word.len();
    let (mut i, mut j, mut k) = (0usize, 1usize, 0usize);
    while i < n && j < n && k < n {
        let a = &word[(i + k) % n];
        let b = &word[(j + k) % n];
        if a == b {
            k += 1;
        } else if a > b {
            i += k + 1;
            if i == j {
                i += 1;
            }
            k = 0;
        } else {
            j += k + 1;
            if j == i {
                j += 1;
            }
            k = 0;
        }
    }
    i.min(j)
}

/// The canonical representative of a class of words equivalent under
/// rotation: the lexicographically smallest one.
///
/// ```
/// use funcstructs::Necklace;
///
/// let neck = Necklace::new(vec![2, 2, 1, 2]);
/// assert_eq!(neck.as_slice(), &[1, 2, 2, 2]);
/// assert_eq!(neck, Necklace::new(vec![2, 1, 2, 2]));
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Serialize, Deserialize)]
pub struct Necklace<T> {
    word: Vec<T>,
}

impl<T: Ord> Necklace<T> {
    /// Canonicalize a word to its smallest rotation.
    pub fn new(mut word: Vec<T>) -> Self {
        let start = least_rotation_start(&word);
        word.rotate_left(start);
        Necklace { word }
    }

    /// Wrap a word already known to be its own smallest rotation.
    pub(crate) fn from_canonical(word: Vec<T>) -> Self {
        debug_assert_eq!(least_rotation_start(&word), 0);
        Necklace { word }
    }

    /// The canonical word.
    pub fn as_slice(&self) -> &[T] {
        &self.word
    }

    /// Number of beads.
    pub fn len(&self) -> usize {
        self.word.len()
    }

    /// Whether the necklace has no beads.
    pub fn is_empty(&self) -> bool {
        self.word.is_empty()
    }

    /// Iterate over the beads in canonical order.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.word.iter()
    }

    /// Smallest rotation under which the necklace is invariant.
    pub fn period(&self) -> usize {
        periodicity(&self.word)
    }

    /// Number of distinct linear representations of this necklace,
    /// `len / period`.
    pub fn degeneracy(&self) -> usize {
        if self.word.is_empty() {
            1
        } else {
            self.word.len() / self.period()
        }
    }
}

impl<'a, T> IntoIterator for &'a Necklace<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.word.iter()
    }
}

impl<T> IntoIterator for Necklace<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.word.into_iter()
    }
}

/// The set of necklaces formed from a fixed pool of beads.
///
/// Restartable: each call to [`FixedContentNecklaces::iter`] begins a fresh
/// enumeration in lexicographic order of the canonical words.
#[derive(Clone, Debug)]
pub struct FixedContentNecklaces<T> {
    elements: Vec<T>,
    multiplicities: Vec<usize>,
}

impl<T: Ord + Clone> FixedContentNecklaces<T> {
    /// Group a multiset of beads into sorted distinct elements with
    /// multiplicities.
    pub fn new<I: IntoIterator<Item = T>>(beads: I) -> Self {
        let mut beads: Vec<T> = beads.into_iter().collect();
        beads.sort();
        let runs = run_lengths(&beads);
        let (elements, multiplicities) = runs.into_iter().unzip();
        FixedContentNecklaces {
            elements,
            multiplicities,
        }
    }

    /// Begin a fresh enumeration.
    pub fn iter(&self) -> NecklaceIter<T> {
        NecklaceIter::start(self.elements.clone(), self.multiplicities.clone())
    }

    /// Number of necklaces with exactly `k` distinct rotations, for each
    /// period `k`; entry `k` of the returned table. Periods other than
    /// multiples of the base period forced by the bead content are zero.
    pub fn count_by_period(&self) -> Vec<BigUint> {
        if self.multiplicities.is_empty() {
            return Vec::new();
        }
        let n: usize = self.multiplicities.iter().sum();
        // Every period is a multiple of n/w where w is the gcd of the
        // multiplicities.
        let w = self
            .multiplicities
            .iter()
            .fold(0usize, |acc, &m| acc.gcd(&m));
        let baseperiod = n / w;
        let factors = divisors(w);
        let mut by_period: Vec<BigUint> = vec![BigUint::zero(); w + 1];
        for &factor in &factors {
            let period = baseperiod * factor;
            // Words periodic in any divisor of `factor`: the multinomial of
            // the proportionally scaled-down content.
            let scaled: Vec<usize> = self
                .multiplicities
                .iter()
                .map(|&m| m * factor / w)
                .collect();
            let mut count = multinomial_coefficient(&scaled);
            // Remove the words whose period properly subdivides this one.
            if factor > 1 {
                for &sub in divisors(factor).iter().filter(|&&d| d != factor) {
                    count -= BigUint::from(sub * baseperiod) * &by_period[sub];
                }
            }
            by_period[factor] = count / BigUint::from(period);
        }
        by_period
    }

    /// Total number of necklaces over this bead pool.
    pub fn cardinality(&self) -> BigUint {
        self.count_by_period().iter().sum()
    }
}

impl FixedContentNecklaces<usize> {
    /// Necklaces over the beads `0..k`, where bead `i` appears
    /// `multiplicities[i]` times. Fails on a zero multiplicity.
    pub fn from_multiplicities(multiplicities: &[usize]) -> Result<Self> {
        if multiplicities.iter().any(|&m| m == 0) {
            return Err(FuncstructError::InvalidParameter(
                "bead multiplicities must be positive".to_string(),
            ));
        }
        Ok(FixedContentNecklaces {
            elements: (0..multiplicities.len()).collect(),
            multiplicities: multiplicities.to_vec(),
        })
    }
}

impl<T: Ord + Clone> IntoIterator for FixedContentNecklaces<T> {
    type Item = Necklace<T>;
    type IntoIter = NecklaceIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        NecklaceIter::start(self.elements, self.multiplicities)
    }
}

/// One pending position of the simple-fixed-content recursion.
#[derive(Clone, Copy, Debug)]
struct Frame {
    /// Position being filled, 1-based; `t > n` marks a completed word.
    t: usize,
    /// Longest prefix-period compatible with the word so far.
    p: usize,
    /// Lower bound on the symbol for this position: the symbol one period
    /// back, `word[t - p - 1]`.
    lo: usize,
    /// Next candidate symbol.
    j: usize,
    /// Symbol currently placed by this frame, to be restored on backtrack.
    placed: Option<usize>,
}

/// Iteration state for [`FixedContentNecklaces`]: the recursion of Sawada's
/// simple-fixed-content algorithm unrolled onto an explicit stack, so the
/// enumeration is an ordinary pull-based iterator.
#[derive(Clone, Debug)]
pub struct NecklaceIter<T> {
    elements: Vec<T>,
    counts: Vec<usize>,
    /// Candidate word as indices into `elements`.
    word: Vec<usize>,
    stack: Vec<Frame>,
    n: usize,
    k: usize,
}

impl<T: Ord + Clone> NecklaceIter<T> {
    fn start(elements: Vec<T>, multiplicities: Vec<usize>) -> Self {
        let n: usize = multiplicities.iter().sum();
        let k = elements.len();
        let mut counts = multiplicities;
        let mut word = vec![0usize; n];
        let mut stack = Vec::new();
        if n > 0 {
            // Pin the smallest bead at position one; every necklace begins
            // with its smallest symbol.
            word[0] = 0;
            counts[0] -= 1;
            stack.push(Frame {
                t: 2,
                p: 1,
                lo: 0,
                j: 0,
                placed: None,
            });
        }
        NecklaceIter {
            elements,
            counts,
            word,
            stack,
            n,
            k,
        }
    }

    fn emit(&self) -> Necklace<T> {
        let strand = self
            .word
            .iter()
            .map(|&i| self.elements[i].clone())
            .collect();
        Necklace::from_canonical(strand)
    }
}

impl<T: Ord + Clone> Iterator for NecklaceIter<T> {
    type Item = Necklace<T>;

    fn next(&mut self) -> Option<Necklace<T>> {
        loop {
            let top = self.stack.len().checked_sub(1)?;
            let mut frame = self.stack[top];

            // Completed word: a necklace iff its period divides the length.
            if frame.t > self.n {
                let emit = self.n % frame.p == 0;
                self.stack.pop();
                if emit {
                    return Some(self.emit());
                }
                continue;
            }

            // Take back the symbol placed on the previous visit.
            if let Some(s) = frame.placed.take() {
                self.counts[s] += 1;
            }

            // Try the next symbol that keeps the prefix a pre-necklace.
            let mut advanced = false;
            while frame.j < self.k {
                let j = frame.j;
                frame.j += 1;
                if self.counts[j] == 0 {
                    continue;
                }
                self.word[frame.t - 1] = j;
                self.counts[j] -= 1;
                frame.placed = Some(j);
                // Matching the symbol one period back preserves the period;
                // anything larger resets it to the full prefix length.
                let p_next = if j == frame.lo { frame.p } else { frame.t };
                let t_next = frame.t + 1;
                let lo_next = if t_next <= self.n {
                    self.word[t_next - p_next - 1]
                } else {
                    0
                };
                self.stack[top] = frame;
                self.stack.push(Frame {
                    t: t_next,
                    p: p_next,
                    lo: lo_next,
                    j: lo_next,
                    placed: None,
                });
                advanced = true;
                break;
            }
            if !advanced {
                self.stack.pop();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn necklace_words(multiplicities: &[usize]) -> Vec<Vec<usize>> {
        FixedContentNecklaces::from_multiplicities(multiplicities)
            .unwrap()
            .iter()
            .map(|neck| neck.as_slice().to_vec())
            .collect()
    }

    #[test]
    fn test_periodicity() {
        assert_eq!(periodicity::<u8>(&[]), 0);
        assert_eq!(periodicity(&[7]), 1);
        assert_eq!(periodicity(&[1, 2, 1, 2]), 2);
        assert_eq!(periodicity(&[1, 2, 2, 1]), 4);
        assert_eq!(periodicity(&[0, 0, 0]), 1);
        assert_eq!(periodicity(&[1, 2, 3, 1, 2, 3]), 3);
    }

    #[test]
    fn test_smallest_rotation() {
        assert_eq!(Necklace::new(vec![3, 1, 2]).as_slice(), &[1, 2, 3]);
        assert_eq!(Necklace::new(vec![2, 1, 2, 1]).as_slice(), &[1, 2, 1, 2]);
        assert_eq!(
            Necklace::new(vec![1, 0, 1, 1, 0]).as_slice(),
            &[0, 1, 0, 1, 1]
        );
        assert_eq!(Necklace::<u8>::new(vec![]).as_slice(), &[] as &[u8]);
    }

    #[test]
    fn test_rotations_identified() {
        let reference = Necklace::new(vec![1, 2, 2, 3]);
        let mut word = vec![1, 2, 2, 3];
        for _ in 0..4 {
            word.rotate_left(1);
            assert_eq!(Necklace::new(word.clone()), reference);
        }
    }

    #[test]
    fn test_sawada_three_three() {
        // Sawada's published example: 4 binary necklaces of content (3, 3)
        let words = necklace_words(&[3, 3]);
        assert_eq!(
            words,
            vec![
                vec![0, 0, 0, 1, 1, 1],
                vec![0, 0, 1, 0, 1, 1],
                vec![0, 0, 1, 1, 0, 1],
                vec![0, 1, 0, 1, 0, 1],
            ]
        );
    }

    #[test]
    fn test_degenerate_contents() {
        assert!(necklace_words(&[]).is_empty());
        assert_eq!(necklace_words(&[1]), vec![vec![0]]);
        assert_eq!(necklace_words(&[4]), vec![vec![0, 0, 0, 0]]);
        assert_eq!(necklace_words(&[1, 1, 1]), vec![vec![0, 1, 2], vec![0, 2, 1]]);
    }

    #[test]
    fn test_zero_multiplicity_rejected() {
        assert!(FixedContentNecklaces::from_multiplicities(&[2, 0, 1]).is_err());
    }

    #[test]
    fn test_counts_match_enumeration() {
        for multiplicities in [
            vec![3, 3],
            vec![2, 2, 2],
            vec![1, 1, 1, 1],
            vec![4, 2],
            vec![6, 3],
            vec![2, 1, 1],
        ] {
            let necks = FixedContentNecklaces::from_multiplicities(&multiplicities).unwrap();
            let listed = necks.iter().count();
            assert_eq!(
                BigUint::from(listed),
                necks.cardinality(),
                "content {multiplicities:?}"
            );
        }
    }

    #[test]
    fn test_count_by_period() {
        // Content (2, 2): necklaces 0011 (period 4) and 0101 (period 2)
        let necks = FixedContentNecklaces::from_multiplicities(&[2, 2]).unwrap();
        let by_period = necks.count_by_period();
        assert_eq!(by_period[1], BigUint::from(1u32));
        assert_eq!(by_period[2], BigUint::from(1u32));
        for neck in necks.iter() {
            assert!(neck.len() % neck.period() == 0);
        }
    }

    #[test]
    fn test_period_on_emitted_necklaces() {
        let necks = FixedContentNecklaces::from_multiplicities(&[3, 3]).unwrap();
        let periods: Vec<usize> = necks.iter().map(|n| n.period()).collect();
        assert_eq!(periods, vec![6, 6, 6, 2]);
    }

    #[test]
    fn test_restartable() {
        let necks = FixedContentNecklaces::from_multiplicities(&[2, 2, 1]).unwrap();
        let first: Vec<_> = necks.iter().collect();
        let second: Vec<_> = necks.iter().collect();
        assert_eq!(first, second);
    }

    proptest! {
        #[test]
        fn prop_canonicalization_idempotent(word in prop::collection::vec(0u8..4, 0..12)) {
            let neck = Necklace::new(word);
            let again = Necklace::new(neck.as_slice().to_vec());
            prop_assert_eq!(neck, again);
        }

        #[test]
        fn prop_rotation_invariant(word in prop::collection::vec(0u8..4, 1..12), r in 0usize..12) {
            let mut rotated = word.clone();
            let len = rotated.len();
            rotated.rotate_left(r % len);
            prop_assert_eq!(Necklace::new(word), Necklace::new(rotated));
        }

        #[test]
        fn prop_emitted_words_unique_and_canonical(
            mults in prop::collection::vec(1usize..4, 1..4)
        ) {
            let necks = FixedContentNecklaces::from_multiplicities(&mults).unwrap();
            let all: Vec<_> = necks.iter().collect();
            for neck in &all {
                let recanon = Necklace::new(neck.as_slice().to_vec());
                prop_assert_eq!(neck, &recanon);
            }
            let mut dedup = all.clone();
            dedup.sort();
            dedup.dedup();
            prop_assert_eq!(dedup.len(), all.len());
        }
    }
}
