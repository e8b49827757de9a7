//! Basic combinatorial counting helpers: factorials, multinomials, divisors.
//!
//! All counting routines return [`BigUint`] since the quantities involved
//! (labellings, necklace counts, tree counts) overflow machine words well
//! before the enumeration itself becomes infeasible.

use num_bigint::BigUint;
use num_traits::One;

/// Precomputed table of factorials `0! ..= max!`.
///
/// Built once per counting call site and owned by it; there are no
/// process-wide caches.
#[derive(Clone, Debug)]
pub struct Factorials {
    table: Vec<BigUint>,
}

impl Factorials {
    /// Tabulate factorials up to and including `max!`.
    pub fn upto(max: usize) -> Self {
        let mut table = Vec::with_capacity(max + 1);
        table.push(BigUint::one());
        for i in 1..=max {
            let next = &table[i - 1] * BigUint::from(i);
            table.push(next);
        }
        Factorials { table }
    }

    /// Look up `n!`; `n` must not exceed the `max` given at construction.
    pub fn get(&self, n: usize) -> &BigUint {
        &self.table[n]
    }
}

/// `n!` as a big integer.
pub fn factorial(n: usize) -> BigUint {
    let mut val = BigUint::one();
    for i in 2..=n {
        val *= BigUint::from(i);
    }
    val
}

/// Product of the factorials of the given values.
pub fn factorial_prod<I: IntoIterator<Item = usize>>(values: I) -> BigUint {
    let mut val = BigUint::one();
    for i in values {
        val *= factorial(i);
    }
    val
}

/// Multinomial coefficient `(sum parts)! / (p1! * p2! * ...)`.
pub fn multinomial_coefficient(parts: &[usize]) -> BigUint {
    let n: usize = parts.iter().sum();
    factorial(n) / factorial_prod(parts.iter().copied())
}

/// Number of multisets of size `r` drawn from `n` distinct items, i.e.
/// `C(n + r - 1, r)`, for `n` too large to fit a machine word.
pub fn multichoose(n: &BigUint, r: usize) -> BigUint {
    let mut val = BigUint::one();
    for i in 1..=r {
        // n + r - i, computed without underflow since i <= r
        val *= n + BigUint::from(r - i);
        val /= BigUint::from(i);
    }
    val
}

/// All divisors of `n` in increasing order; empty for `n == 0`.
pub fn divisors(n: usize) -> Vec<usize> {
    let mut small = Vec::new();
    let mut large = Vec::new();
    let mut d = 1;
    while d * d <= n {
        if n % d == 0 {
            small.push(d);
            if d != n / d {
                large.push(n / d);
            }
        }
        d += 1;
    }
    large.reverse();
    small.extend(large);
    small
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factorials() {
        assert_eq!(factorial(0), BigUint::from(1u32));
        assert_eq!(factorial(5), BigUint::from(120u32));
        let table = Factorials::upto(10);
        for i in 0..=10 {
            assert_eq!(*table.get(i), factorial(i));
        }
    }

    #[test]
    fn test_multinomial() {
        // 4!/(2!*2!) = 6
        assert_eq!(multinomial_coefficient(&[2, 2]), BigUint::from(6u32));
        // Plain binomial as a degenerate multinomial
        assert_eq!(multinomial_coefficient(&[3, 2]), BigUint::from(10u32));
        assert_eq!(multinomial_coefficient(&[]), BigUint::from(1u32));
    }

    #[test]
    fn test_multichoose() {
        // C(4+2-1, 2) = 10
        assert_eq!(multichoose(&BigUint::from(4u32), 2), BigUint::from(10u32));
        assert_eq!(multichoose(&BigUint::from(9u32), 0), BigUint::from(1u32));
        assert_eq!(multichoose(&BigUint::from(1u32), 5), BigUint::from(1u32));
    }

    #[test]
    fn test_divisors() {
        assert_eq!(divisors(1), vec![1]);
        assert_eq!(divisors(12), vec![1, 2, 3, 4, 6, 12]);
        assert_eq!(divisors(13), vec![1, 13]);
        assert_eq!(divisors(36), vec![1, 2, 3, 4, 6, 9, 12, 18, 36]);
        assert!(divisors(0).is_empty());
    }
}
