//! Unordered products: multisets formed by drawing from per-key enumerations.
//!
//! Given a multiset of keys and a per-key enumeration, [`unordered_product`]
//! yields every multiset obtained by drawing, for each distinct key of
//! multiplicity `m`, an unordered selection of `m` items from that key's
//! enumeration, and combining the selections across keys. It assumes each
//! enumeration emits distinct items and that enumerations for distinct keys
//! are disjoint, which holds for every canonical generator in this crate.

use itertools::{Either, Itertools};

/// Run-length encode a slice whose equal elements are adjacent.
pub(crate) fn run_lengths<T: PartialEq + Clone>(sorted: &[T]) -> Vec<(T, usize)> {
    let mut runs: Vec<(T, usize)> = Vec::new();
    for item in sorted {
        match runs.last_mut() {
            Some((prev, count)) if prev == item => *count += 1,
            _ => runs.push((item.clone(), 1)),
        }
    }
    runs
}

/// Every multiset drawn from `f(key)` with repetition `mult` per entry of
/// `keys`, combined across entries; emitted as sorted vectors.
///
/// An empty `keys` yields exactly one empty multiset.
pub fn unordered_product<K, T, F, I>(
    keys: Vec<(K, usize)>,
    mut f: F,
) -> impl Iterator<Item = Vec<T>>
where
    T: Clone + Ord,
    F: FnMut(&K) -> I,
    I: Iterator<Item = T>,
{
    let groups: Vec<Vec<Vec<T>>> = keys
        .iter()
        .map(|(key, mult)| f(key).combinations_with_replacement(*mult).collect())
        .collect();
    bundles(groups).map(|bundle| {
        let mut items: Vec<T> = bundle.into_iter().flatten().collect();
        items.sort_unstable();
        items
    })
}

/// Cartesian product across factors; zero factors yield one empty bundle,
/// matching the empty-product convention.
pub(crate) fn bundles<T: Clone>(factors: Vec<Vec<T>>) -> impl Iterator<Item = Vec<T>> {
    if factors.is_empty() {
        Either::Left(std::iter::once(Vec::new()))
    } else {
        Either::Right(factors.into_iter().multi_cartesian_product())
    }
}
