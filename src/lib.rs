//! Permutation matrices grouped into 90-degree rotation orbits.
//!
//! Enumerates every N×N permutation matrix in lexicographic order, keys each
//! one with a 64-bit polynomial, and keeps one representative per rotation
//! orbit along with the count of orbits of size 1, 2 and 4. Pure
//! computation: no I/O, no rendering, `no_std` + `alloc` compatible.
//!
//! # Modules
//!
//! - [`permutation`]: Lexicographic permutation generator
//! - [`rotation`]: Quarter-turn rotations of a square grid
//! - [`image`]: Compact images, canonical keys, imprints
//! - [`registry`]: Orbit deduplication and classification
//! - [`batch`]: Order lists and per-order reports
//!
//! # Example
//!
//! ```
//! use permatrix::{Mode, OrbitRegistry, OrbitType};
//!
//! let registry = OrbitRegistry::generate(2, Mode::Unique).unwrap();
//! assert_eq!(registry.count(), 1);
//! assert_eq!(registry.images()[0].orbit_type(), Ok(OrbitType::Twin));
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

pub mod batch;
pub mod error;
pub mod image;
pub mod permutation;
pub mod registry;
pub mod rotation;

pub use error::OrbitError;
pub use image::{
    Dot, ImageKey, ImprintClass, KEY_BASE, MAX_KEYED_ORDER, MatrixImage, OrbitType, is_keyable,
    key_bound,
};
pub use permutation::{MAX_ORDER, PermutationIndexGenerator, factorial};
pub use registry::{ImprintCensus, Mode, OrbitCounts, OrbitRegistry};
pub use rotation::Rotation;
