//! Rotation-orbit registry: enumerate, deduplicate, classify.
//!
//! # Example
//!
//! ```
//! use permatrix::{Mode, OrbitRegistry};
//!
//! let registry = OrbitRegistry::generate(4, Mode::Unique).unwrap();
//! let counts = registry.counts();
//! assert_eq!(registry.count(), 9);
//! assert_eq!((counts.sole, counts.twin, counts.quad), (2, 3, 4));
//! assert_eq!(counts.permutations(), 24);
//! ```

use alloc::vec::Vec;

use tracing::{debug, error, info, trace};

use crate::error::OrbitError;
use crate::image::{ImageKey, ImprintClass, MAX_KEYED_ORDER, MatrixImage, OrbitType, is_keyable};
use crate::permutation::{PermutationIndexGenerator, factorial};
use crate::rotation::Rotation;

#[cfg(feature = "std")]
type KeyIndex = std::collections::HashMap<ImageKey, usize>;
#[cfg(not(feature = "std"))]
type KeyIndex = alloc::collections::BTreeMap<ImageKey, usize>;

/// Permutations between two progress events.
const PROGRESS_INTERVAL: u64 = 1000;

/// Which images a registry keeps.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Mode {
    /// One representative per rotation orbit.
    #[default]
    Unique,
    /// Every permutation, without deduplication.
    Full,
}

/// Number of orbits of each size.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct OrbitCounts {
    /// Orbits of size 1.
    pub sole: u64,
    /// Orbits of size 2.
    pub twin: u64,
    /// Orbits of size 4.
    pub quad: u64,
}

impl OrbitCounts {
    /// Orbits of the given type.
    pub fn get(&self, orbit: OrbitType) -> u64 {
        match orbit {
            OrbitType::Sole => self.sole,
            OrbitType::Twin => self.twin,
            OrbitType::Quad => self.quad,
        }
    }

    /// Total number of orbits.
    pub fn orbits(&self) -> u64 {
        self.sole + self.twin + self.quad
    }

    /// Number of permutations the orbits cover: `sole + 2·twin + 4·quad`.
    pub fn permutations(&self) -> u64 {
        OrbitType::ALL
            .iter()
            .map(|&orbit| self.get(orbit) * u64::from(orbit.size()))
            .sum()
    }

    fn record(&mut self, orbit: OrbitType) {
        match orbit {
            OrbitType::Sole => self.sole += 1,
            OrbitType::Twin => self.twin += 1,
            OrbitType::Quad => self.quad += 1,
        }
    }
}

/// Representatives grouped by how much their rotations overlap.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct ImprintCensus {
    /// Imprint of N cells.
    pub sole: u64,
    /// Imprint strictly between N and 4N cells.
    pub overlapping: u64,
    /// Imprint of 4N cells.
    pub dispersed: u64,
}

/// Images of one matrix order, keyed by canonical key.
///
/// Built by [`generate`](Self::generate). In [`Mode::Unique`] each rotation
/// orbit has exactly one representative: the first member the lexicographic
/// enumeration reaches, which is not necessarily the orbit's smallest.
#[derive(Clone, Debug)]
pub struct OrbitRegistry {
    order: usize,
    mode: Mode,
    images: Vec<MatrixImage>,
    index: KeyIndex,
    counts: OrbitCounts,
}

impl OrbitRegistry {
    /// An empty registry for `order`.
    ///
    /// Fails with [`OrbitError::InvalidOrder`] unless
    /// `1 <= order <= MAX_KEYED_ORDER`, the range in which keys never wrap.
    pub fn new(order: usize, mode: Mode) -> Result<Self, OrbitError> {
        if !is_keyable(order) {
            return Err(OrbitError::InvalidOrder {
                order,
                min: 1,
                max: MAX_KEYED_ORDER,
            });
        }
        Ok(Self {
            order,
            mode,
            images: Vec::new(),
            index: KeyIndex::new(),
            counts: OrbitCounts::default(),
        })
    }

    /// Enumerate every permutation of `order` and collect images per `mode`.
    ///
    /// In [`Mode::Unique`] the orbits are classified afterwards; an orbit
    /// count outside {1, 2, 4} or a total other than `order!` is returned as
    /// an error rather than tallied.
    pub fn generate(order: usize, mode: Mode) -> Result<Self, OrbitError> {
        let mut registry = Self::new(order, mode)?;
        let mut permutations = PermutationIndexGenerator::new(order)?;
        debug!(order, ?mode, total = permutations.total(), "enumerating permutations");

        let mut seen: u64 = 0;
        while let Some(indices) = permutations.next_permutation() {
            let image = MatrixImage::from(indices);
            match mode {
                Mode::Full => registry.insert(image),
                Mode::Unique => {
                    registry.add_unique_image(image);
                }
            }
            seen += 1;
            if seen % PROGRESS_INTERVAL == 0 {
                trace!(seen, images = registry.count(), "progress");
            }
        }

        if mode == Mode::Unique {
            registry.classify()?;
        }
        info!(order, ?mode, images = registry.count(), "generated");
        Ok(registry)
    }

    /// Add `image` unless one of its rotations is already registered.
    ///
    /// The 90, 180 and 270 degree rotations are each computed from `image`
    /// and looked up by key. The first hit has its isomorphic count bumped
    /// and `false` is returned. With no hit, `image` itself is inserted
    /// unrotated and `true` is returned.
    pub fn add_unique_image(&mut self, image: MatrixImage) -> bool {
        debug_assert_eq!(image.order(), self.order);
        for rotation in Rotation::NON_TRIVIAL {
            let key = image.rotated(rotation).image_key();
            if let Some(&slot) = self.index.get(&key) {
                self.images[slot].inc_isomorphic_count();
                return false;
            }
        }
        self.insert(image);
        true
    }

    /// Store `image` under its own key, replacing any image with that key.
    fn insert(&mut self, image: MatrixImage) {
        let key = image.image_key();
        match self.index.get(&key) {
            Some(&slot) => self.images[slot] = image,
            None => {
                self.index.insert(key, self.images.len());
                self.images.push(image);
            }
        }
    }

    /// Tally orbit sizes and check they cover every permutation.
    fn classify(&mut self) -> Result<(), OrbitError> {
        let mut counts = OrbitCounts::default();
        for image in &self.images {
            match image.orbit_type() {
                Ok(orbit) => counts.record(orbit),
                Err(e) => {
                    error!(order = self.order, error = %e, "orbit invariant violated");
                    return Err(e);
                }
            }
        }

        let expected = factorial(self.order).unwrap_or(u64::MAX);
        let accounted = counts.permutations();
        if accounted != expected {
            error!(order = self.order, accounted, expected, "orbit sizes do not cover all permutations");
            return Err(OrbitError::CountMismatch {
                accounted,
                expected,
            });
        }

        debug!(
            order = self.order,
            sole = counts.sole,
            twin = counts.twin,
            quad = counts.quad,
            "classified orbits"
        );
        self.counts = counts;
        Ok(())
    }

    /// Matrix order.
    pub fn order(&self) -> usize {
        self.order
    }

    /// Mode the registry was built in.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Number of images held.
    pub fn count(&self) -> usize {
        self.images.len()
    }

    /// Whether the registry holds no images.
    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    /// Images in the order they were first registered.
    pub fn images(&self) -> &[MatrixImage] {
        &self.images
    }

    /// Iterate images in the order they were first registered.
    pub fn iter(&self) -> core::slice::Iter<'_, MatrixImage> {
        self.images.iter()
    }

    /// The image stored under `key`.
    pub fn get(&self, key: ImageKey) -> Option<&MatrixImage> {
        self.index.get(&key).map(|&slot| &self.images[slot])
    }

    /// Whether an image is stored under `key`.
    pub fn contains(&self, key: ImageKey) -> bool {
        self.index.contains_key(&key)
    }

    /// The registered image `image` rotates onto, trying the identity first.
    pub fn representative_of(&self, image: &MatrixImage) -> Option<&MatrixImage> {
        Rotation::ALL
            .iter()
            .find_map(|&rotation| self.get(image.rotated(rotation).image_key()))
    }

    /// Orbit counts. All zero in [`Mode::Full`].
    pub fn counts(&self) -> OrbitCounts {
        self.counts
    }

    /// Classify every held image by its imprint.
    pub fn imprint_census(&self) -> ImprintCensus {
        let mut census = ImprintCensus::default();
        for image in &self.images {
            match image.imprint_class() {
                ImprintClass::Sole => census.sole += 1,
                ImprintClass::Overlapping => census.overlapping += 1,
                ImprintClass::Dispersed => census.dispersed += 1,
            }
        }
        census
    }

    /// Take the images, in the order they were first registered.
    pub fn into_images(self) -> Vec<MatrixImage> {
        self.images
    }
}

impl<'a> IntoIterator for &'a OrbitRegistry {
    type Item = &'a MatrixImage;
    type IntoIter = core::slice::Iter<'a, MatrixImage>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
