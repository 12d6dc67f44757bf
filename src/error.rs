//! Errors raised while enumerating and classifying permutation matrices.

use crate::image::ImageKey;

/// Orbit enumeration error.
///
/// The computation is pure and deterministic, so none of these are
/// transient: retrying the same call yields the same error.
#[derive(Copy, Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum OrbitError {
    /// Matrix order outside the range the component supports.
    #[error("matrix order {order} is outside the supported range {min}..={max}")]
    InvalidOrder {
        /// The rejected order.
        order: usize,
        /// Smallest supported order.
        min: usize,
        /// Largest supported order.
        max: usize,
    },
    /// A representative's isomorphic count is not the size of a rotation orbit.
    #[error("representative {key} has isomorphic count {count}, expected 1, 2 or 4")]
    InvariantViolation {
        /// Canonical key of the offending representative.
        key: ImageKey,
        /// The observed count.
        count: u32,
    },
    /// Orbit sizes do not add up to the number of permutations.
    #[error("orbits account for {accounted} permutations, expected {expected}")]
    CountMismatch {
        /// `sole + 2 * twin + 4 * quad`.
        accounted: u64,
        /// `order!`.
        expected: u64,
    },
}
