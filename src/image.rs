//! Compact permutation-matrix images, canonical keys, and rotation imprints.
//!
//! An image of order N stores one marked cell per position: `dots[x]` is the
//! `y` of the dot at `x`. The canonical key is the polynomial `Σ dots[x]·17^x`,
//! computed on first use and cached until the dots change.
//!
//! # Example
//!
//! ```
//! use permatrix::{MatrixImage, Rotation};
//!
//! let image = MatrixImage::from_dots([1, 3, 0, 2]);
//! assert_eq!(image.image_key(), 1 + 3 * 17 + 0 * 289 + 2 * 4913);
//!
//! // Four quarter turns bring the image back.
//! let mut turned = image.clone();
//! for _ in 0..4 {
//!     turned.rotate_self();
//! }
//! assert_eq!(turned, image);
//! assert_eq!(image.rotated(Rotation::Rotate90), image.rotate());
//! ```

use alloc::collections::BTreeSet;
use alloc::vec;
use alloc::vec::Vec;
use core::cell::OnceCell;

use num_traits::{NumCast, PrimInt, checked_pow};

use crate::error::OrbitError;
use crate::rotation::Rotation;

/// Canonical integer key of an image.
pub type ImageKey = u64;

/// Base of the key polynomial.
pub const KEY_BASE: ImageKey = 17;

/// Largest order whose keys all fit in an [`ImageKey`] without wrapping.
///
/// Equal to the largest `n` for which [`key_bound::<ImageKey>(n)`](key_bound)
/// is `Some`.
pub const MAX_KEYED_ORDER: usize = 15;

/// Largest key an image of `order` can produce, or `None` if it overflows `T`.
///
/// The maximum of `Σ dots[x]·17^x` over all permutations is reached by the
/// identity, since larger digits pair with larger powers.
pub fn key_bound<T: PrimInt>(order: usize) -> Option<T> {
    let base = <T as NumCast>::from(KEY_BASE)?;
    let mut bound = T::zero();
    for x in 0..order {
        let term = <T as NumCast>::from(x)?.checked_mul(&checked_pow(base, x)?)?;
        bound = bound.checked_add(&term)?;
    }
    Some(bound)
}

/// Whether every image of `order` has a distinct, non-wrapping key.
pub fn is_keyable(order: usize) -> bool {
    order >= 1 && key_bound::<ImageKey>(order).is_some()
}

/// One marked cell. Ordered by `x`, then `y`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Dot {
    /// Position in the permutation; cells from the left edge.
    pub x: usize,
    /// Value at that position; cells from the top edge.
    pub y: usize,
}

impl Dot {
    /// Create a dot.
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}

/// Size of a rotation orbit.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum OrbitType {
    /// Fixed by every rotation.
    Sole,
    /// Fixed by the half turn only; one sibling.
    Twin,
    /// All four rotations are distinct.
    Quad,
}

impl OrbitType {
    /// All orbit types, smallest orbit first.
    pub const ALL: [Self; 3] = [Self::Sole, Self::Twin, Self::Quad];

    /// Classify an isomorphic count. `None` for anything but 1, 2 or 4.
    pub fn from_count(count: u32) -> Option<Self> {
        match count {
            1 => Some(Self::Sole),
            2 => Some(Self::Twin),
            4 => Some(Self::Quad),
            _ => None,
        }
    }

    /// Number of distinct images in the orbit.
    pub fn size(self) -> u32 {
        match self {
            Self::Sole => 1,
            Self::Twin => 2,
            Self::Quad => 4,
        }
    }
}

/// How much the rotations of an image overlap, judged by its imprint.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ImprintClass {
    /// The imprint is the image itself (N cells).
    Sole,
    /// Some rotations share cells.
    Overlapping,
    /// The four rotations cover 4N distinct cells.
    Dispersed,
}

/// A permutation matrix stored as the `y` of the single dot at each `x`.
///
/// Construction does not check that the dots form a permutation; images
/// built from [`PermutationIndexGenerator`](crate::PermutationIndexGenerator)
/// output always do. Equality compares dots only.
#[derive(Clone, Debug)]
pub struct MatrixImage {
    dots: Vec<usize>,
    key: OnceCell<ImageKey>,
    isomorphic_count: u32,
}

impl MatrixImage {
    /// An image of `order` with every dot at `y = 0`.
    ///
    /// Fill it with [`add_dot`](Self::add_dot).
    pub fn with_order(order: usize) -> Self {
        Self::from_dots(vec![0; order])
    }

    /// Wrap an array holding the `y` of each `x`.
    pub fn from_dots(dots: impl Into<Vec<usize>>) -> Self {
        Self {
            dots: dots.into(),
            key: OnceCell::new(),
            isomorphic_count: 1,
        }
    }

    /// Place the dot at `x` on `y`.
    ///
    /// # Panics
    ///
    /// If `x >= order`.
    pub fn add_dot(&mut self, x: usize, y: usize) {
        self.dots[x] = y;
        self.key.take();
    }

    /// Matrix order N.
    pub fn order(&self) -> usize {
        self.dots.len()
    }

    /// `y` of the dot at each `x`.
    pub fn dots(&self) -> &[usize] {
        &self.dots
    }

    /// The marked cells in `x` order.
    pub fn dot_iter(&self) -> impl Iterator<Item = Dot> + '_ {
        self.dots.iter().enumerate().map(|(x, &y)| Dot::new(x, y))
    }

    /// Whether every `y` in `[0, order)` is used exactly once.
    pub fn is_permutation(&self) -> bool {
        let mut seen = vec![false; self.order()];
        self.dots
            .iter()
            .all(|&y| y < seen.len() && !core::mem::replace(&mut seen[y], true))
    }

    /// The image turned 90 degrees: `dots'[N-1-dots[x]] = x`.
    pub fn rotate(&self) -> Self {
        self.rotated(Rotation::Rotate90)
    }

    /// Turn this image 90 degrees in place, discarding the cached key.
    pub fn rotate_self(&mut self) {
        let turned = self.rotate();
        self.dots = turned.dots;
        self.key.take();
    }

    /// The image under `rotation`, computed directly from these dots.
    pub fn rotated(&self, rotation: Rotation) -> Self {
        let order = self.order();
        let mut turned = vec![0; order];
        for dot in self.dot_iter() {
            let Dot { x, y } = rotation.map_dot(dot, order);
            turned[x] = y;
        }
        Self::from_dots(turned)
    }

    /// Canonical key `Σ dots[x]·17^x`, computed once and cached.
    ///
    /// Distinct permutations get distinct keys up to [`MAX_KEYED_ORDER`].
    /// Past that the sum wraps modulo 2^64 and collisions become possible.
    pub fn image_key(&self) -> ImageKey {
        *self.key.get_or_init(|| polynomial_key(&self.dots))
    }

    /// Dot-by-dot equality, independent of the key.
    pub fn compare_with(&self, other: &Self) -> bool {
        self.dots == other.dots
    }

    /// Union of the cells of this image and its three rotations.
    pub fn imprint(&self) -> BTreeSet<Dot> {
        let order = self.order();
        Rotation::ALL
            .iter()
            .flat_map(|&rotation| self.dot_iter().map(move |dot| rotation.map_dot(dot, order)))
            .collect()
    }

    /// Classify [`imprint`](Self::imprint) by its cardinality.
    pub fn imprint_class(&self) -> ImprintClass {
        let cells = self.imprint().len();
        let order = self.order();
        if cells == order {
            ImprintClass::Sole
        } else if cells == 4 * order {
            ImprintClass::Dispersed
        } else {
            ImprintClass::Overlapping
        }
    }

    /// How many members of this image's orbit were merged into it.
    pub fn isomorphic_count(&self) -> u32 {
        self.isomorphic_count
    }

    pub(crate) fn inc_isomorphic_count(&mut self) {
        self.isomorphic_count += 1;
    }

    /// Orbit size implied by the isomorphic count.
    ///
    /// Any count other than 1, 2 or 4 means deduplication went wrong and is
    /// reported as [`OrbitError::InvariantViolation`].
    pub fn orbit_type(&self) -> Result<OrbitType, OrbitError> {
        OrbitType::from_count(self.isomorphic_count).ok_or_else(|| OrbitError::InvariantViolation {
            key: self.image_key(),
            count: self.isomorphic_count,
        })
    }
}

impl PartialEq for MatrixImage {
    fn eq(&self, other: &Self) -> bool {
        self.compare_with(other)
    }
}

impl Eq for MatrixImage {}

impl From<&[usize]> for MatrixImage {
    fn from(dots: &[usize]) -> Self {
        Self::from_dots(dots)
    }
}

fn polynomial_key(dots: &[usize]) -> ImageKey {
    let mut key: ImageKey = 0;
    let mut power: ImageKey = 1;
    for &y in dots {
        key = key.wrapping_add((y as ImageKey).wrapping_mul(power));
        power = power.wrapping_mul(KEY_BASE);
    }
    key
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_bound_matches_max_keyed_order() {
        assert!(key_bound::<ImageKey>(MAX_KEYED_ORDER).is_some());
        assert!(key_bound::<ImageKey>(MAX_KEYED_ORDER + 1).is_none());
        // Signed 64-bit keys would not buy another order either.
        assert!(key_bound::<i64>(MAX_KEYED_ORDER).is_some());
        assert!(key_bound::<i64>(MAX_KEYED_ORDER + 1).is_none());
        assert_eq!(key_bound::<ImageKey>(3), Some(1 * 17 + 2 * 289));
    }

    #[test]
    fn keyable_range() {
        assert!(!is_keyable(0));
        assert!(is_keyable(1));
        assert!(is_keyable(15));
        assert!(!is_keyable(16));
        assert!(!is_keyable(20));
    }

    #[test]
    fn identity_key_is_the_bound() {
        for order in 1..=MAX_KEYED_ORDER {
            let identity = MatrixImage::from_dots((0..order).collect::<Vec<_>>());
            assert_eq!(Some(identity.image_key()), key_bound::<ImageKey>(order));
        }
    }

    #[test]
    fn key_is_polynomial() {
        let image = MatrixImage::from_dots([2, 0, 1]);
        assert_eq!(image.image_key(), 2 + 0 * 17 + 1 * 289);
    }

    #[test]
    fn add_dot_invalidates_key() {
        let mut image = MatrixImage::with_order(2);
        assert_eq!(image.image_key(), 0);
        image.add_dot(0, 1);
        image.add_dot(1, 0);
        assert_eq!(image.dots(), &[1, 0]);
        assert_eq!(image.image_key(), 1);
    }

    #[test]
    fn rotate_self_invalidates_key() {
        let mut image = MatrixImage::from_dots([0, 1]);
        let before = image.image_key();
        image.rotate_self();
        assert_eq!(image.dots(), &[1, 0]);
        assert_ne!(image.image_key(), before);
        assert_eq!(image.image_key(), MatrixImage::from_dots([1, 0]).image_key());
    }

    #[test]
    fn rotate_formula() {
        // dots'[N-1-dots[x]] = x
        let image = MatrixImage::from_dots([1, 3, 0, 2]);
        let turned = image.rotate();
        for (x, &y) in image.dots().iter().enumerate() {
            assert_eq!(turned.dots()[3 - y], x);
        }
        assert_eq!(turned.dots(), &[1, 3, 0, 2]);
    }

    #[test]
    fn rotated_matches_repeated_rotate() {
        let image = MatrixImage::from_dots([3, 0, 4, 1, 2]);
        let mut stepwise = image.clone();
        for &rotation in &Rotation::ALL {
            assert_eq!(image.rotated(rotation), stepwise, "{rotation:?}");
            stepwise = stepwise.rotate();
        }
        assert_eq!(stepwise, image);
    }

    #[test]
    fn rotation_preserves_permutation() {
        let image = MatrixImage::from_dots([2, 4, 1, 3, 0]);
        for &rotation in &Rotation::ALL {
            assert!(image.rotated(rotation).is_permutation());
        }
    }

    #[test]
    fn is_permutation_detects_repeats_and_range() {
        assert!(MatrixImage::from_dots([1, 0, 2]).is_permutation());
        assert!(!MatrixImage::from_dots([1, 1, 2]).is_permutation());
        assert!(!MatrixImage::from_dots([0, 1, 3]).is_permutation());
        assert!(!MatrixImage::with_order(3).is_permutation());
    }

    #[test]
    fn equality_ignores_counts_and_cache() {
        let a = MatrixImage::from_dots([0, 2, 1]);
        let mut b = MatrixImage::from(&[0, 2, 1][..]);
        b.inc_isomorphic_count();
        let _ = a.image_key();
        assert!(a.compare_with(&b));
        assert_eq!(a, b);
        assert_ne!(a, MatrixImage::from_dots([0, 1, 2]));
        assert_ne!(a, MatrixImage::from_dots([0, 2]));
    }

    #[test]
    fn imprint_of_identity_3x3_shares_center() {
        let image = MatrixImage::from_dots([0, 1, 2]);
        let imprint = image.imprint();
        let expected: BTreeSet<Dot> = [(0, 0), (0, 2), (1, 1), (2, 0), (2, 2)]
            .into_iter()
            .map(|(x, y)| Dot::new(x, y))
            .collect();
        assert_eq!(imprint, expected);
        assert_eq!(image.imprint_class(), ImprintClass::Overlapping);
    }

    #[test]
    fn imprint_classes() {
        // Fixed by every rotation.
        let sole = MatrixImage::from_dots([1, 3, 0, 2]);
        assert_eq!(sole.imprint().len(), 4);
        assert_eq!(sole.imprint_class(), ImprintClass::Sole);

        let dispersed = MatrixImage::from_dots([0, 1, 3, 2]);
        assert_eq!(dispersed.imprint().len(), 16);
        assert_eq!(dispersed.imprint_class(), ImprintClass::Dispersed);
    }

    #[test]
    fn orbit_type_from_count() {
        assert_eq!(OrbitType::from_count(1), Some(OrbitType::Sole));
        assert_eq!(OrbitType::from_count(2), Some(OrbitType::Twin));
        assert_eq!(OrbitType::from_count(4), Some(OrbitType::Quad));
        for bad in [0, 3, 5, 8] {
            assert_eq!(OrbitType::from_count(bad), None);
        }
        for &t in &OrbitType::ALL {
            assert_eq!(OrbitType::from_count(t.size()), Some(t));
        }
    }

    #[test]
    fn orbit_type_reports_invariant_violation() {
        let mut image = MatrixImage::from_dots([0, 2, 1]);
        assert_eq!(image.orbit_type(), Ok(OrbitType::Sole));
        image.inc_isomorphic_count();
        image.inc_isomorphic_count();
        assert_eq!(
            image.orbit_type(),
            Err(OrbitError::InvariantViolation {
                key: image.image_key(),
                count: 3
            })
        );
    }
}
