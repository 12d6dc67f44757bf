//! Lexicographic permutation enumeration.
//!
//! # Example
//!
//! ```
//! use permatrix::PermutationIndexGenerator;
//!
//! let mut generator = PermutationIndexGenerator::new(3).unwrap();
//! let mut seen = Vec::new();
//! while let Some(indices) = generator.next_permutation() {
//!     seen.push(indices.to_vec());
//! }
//! assert_eq!(seen.len(), 6);
//! assert_eq!(seen[0], [0, 1, 2]);
//! assert_eq!(seen[5], [2, 1, 0]);
//! ```

use alloc::vec::Vec;

use num_traits::CheckedMul;

use crate::error::OrbitError;

/// Largest order the generator accepts. `20!` fits in 64 bits, `21!` does not.
pub const MAX_ORDER: usize = 20;

/// `n!`, or `None` when it does not fit in a `u64`.
pub fn factorial(n: usize) -> Option<u64> {
    (2..=n as u64).try_fold(1u64, |acc, k| CheckedMul::checked_mul(&acc, &k))
}

/// Produces every permutation of `[0, order)` exactly once, in lexicographic
/// order, starting at the identity and ending at the full reversal.
///
/// Permutations are handed out as a borrow of one internal buffer that is
/// rearranged in place on every call. Copy the slice to keep it.
#[derive(Clone, Debug)]
pub struct PermutationIndexGenerator {
    indices: Vec<usize>,
    total: u64,
    remaining: u64,
}

impl PermutationIndexGenerator {
    /// Create a generator for permutations of `[0, order)`.
    ///
    /// Fails with [`OrbitError::InvalidOrder`] unless `1 <= order <= 20`.
    pub fn new(order: usize) -> Result<Self, OrbitError> {
        let total = match factorial(order) {
            Some(total) if (1..=MAX_ORDER).contains(&order) => total,
            _ => {
                return Err(OrbitError::InvalidOrder {
                    order,
                    min: 1,
                    max: MAX_ORDER,
                });
            }
        };
        Ok(Self {
            indices: (0..order).collect(),
            total,
            remaining: total,
        })
    }

    /// Length of each permutation.
    pub fn order(&self) -> usize {
        self.indices.len()
    }

    /// Number of permutations the generator produces in total (`order!`).
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Number of permutations not yet handed out.
    pub fn remaining(&self) -> u64 {
        self.remaining
    }

    /// Whether another permutation is available.
    pub fn has_next(&self) -> bool {
        self.remaining != 0
    }

    /// Advance to the next permutation in lexicographic order.
    ///
    /// The first call yields the identity untouched. Returns `None` once all
    /// `order!` permutations have been produced.
    pub fn next_permutation(&mut self) -> Option<&[usize]> {
        if self.remaining == 0 {
            return None;
        }
        if self.remaining < self.total {
            self.step();
        }
        self.remaining -= 1;
        Some(&self.indices)
    }

    /// Rearrange `indices` into its lexicographic successor.
    ///
    /// Only called while a successor exists, so `indices` is not the full
    /// reversal and both scans below terminate in range.
    fn step(&mut self) {
        let a = &mut self.indices;

        // Largest j with a[j] < a[j + 1].
        let mut j = a.len() - 2;
        while a[j] > a[j + 1] {
            j -= 1;
        }

        // Smallest value to the right of a[j] that is still greater than it.
        // The suffix is decreasing, so that is the rightmost such value.
        let mut k = a.len() - 1;
        while a[j] > a[k] {
            k -= 1;
        }

        a.swap(j, k);
        a[j + 1..].reverse();
    }
}
