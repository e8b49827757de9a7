//! Compositions of an integer: ordered tuples of integers summing to n.
//!
//! A composition of n is an ordered tuple of positive integers summing to n;
//! there are `2^(n-1)` of them. A *weak* composition of fixed length k allows
//! zero parts; there are `C(n+k-1, k-1)` of those. Weak compositions
//! distribute free tree nodes over the distinct cycle lengths of an
//! endofunction structure.

/// Iterator over all compositions of `n` into positive parts.
///
/// Successor rule: decrement the rightmost part greater than one and append
/// the freed amount as a tail part; pop trailing ones along the way.
#[derive(Clone, Debug)]
pub struct Compositions {
    current: Vec<usize>,
    fresh: bool,
}

impl Compositions {
    /// All compositions of `n`, starting from the single-part `[n]`.
    /// `n == 0` yields exactly the empty composition.
    pub fn new(n: usize) -> Self {
        let current = if n == 0 { Vec::new() } else { vec![n] };
        Compositions {
            current,
            fresh: true,
        }
    }

    fn step(&mut self) -> bool {
        let len = self.current.len();
        while let Some(&last) = self.current.last() {
            if last > 1 {
                let k = self.current.len() - 1;
                self.current[k] -= 1;
                self.current.push(len - k);
                return true;
            }
            self.current.pop();
        }
        false
    }
}

impl Iterator for Compositions {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Vec<usize>> {
        if self.fresh {
            self.fresh = false;
            return Some(self.current.clone());
        }
        if self.step() {
            Some(self.current.clone())
        } else {
            None
        }
    }
}

/// Iterator over the length-`k` tuples of non-negative integers summing to
/// `n`, by the classic NEXCOM successor (Nijenhuis and Wilf).
#[derive(Clone, Debug)]
pub struct WeakCompositions {
    n: usize,
    k: usize,
    current: Vec<usize>,
    state: State,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum State {
    Fresh,
    Running,
    Done,
}

impl WeakCompositions {
    /// All weak compositions of `n` into exactly `k` parts.
    pub fn new(n: usize, k: usize) -> Self {
        let mut current = vec![0; k];
        if k > 0 {
            current[0] = n;
        }
        WeakCompositions {
            n,
            k,
            current,
            state: State::Fresh,
        }
    }

    fn step(&mut self) -> bool {
        if self.k == 0 || self.current[self.k - 1] == self.n {
            return false;
        }
        // Move the leftmost nonzero block one slot right, returning the
        // remainder to the front.
        let h = self
            .current
            .iter()
            .position(|&c| c != 0)
            .unwrap_or(self.k - 1);
        let val = self.current[h];
        self.current[h] = 0;
        self.current[0] = val - 1;
        self.current[h + 1] += 1;
        true
    }
}

impl Iterator for WeakCompositions {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Vec<usize>> {
        match self.state {
            State::Done => None,
            State::Fresh => {
                if self.k == 0 && self.n > 0 {
                    // No way to write a positive total as an empty sum
                    self.state = State::Done;
                    return None;
                }
                self.state = State::Running;
                Some(self.current.clone())
            }
            State::Running => {
                if self.step() {
                    Some(self.current.clone())
                } else {
                    self.state = State::Done;
                    None
                }
            }
        }
    }
}
