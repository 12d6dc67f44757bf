//! Batch driving: order lists and per-order reports.
//!
//! Parses order lists like `2,4-7,9` and turns each generated registry into
//! an [`OrderReport`] whose `Display` is the plain-text summary.
//!
//! # Example
//!
//! ```
//! use permatrix::{Mode, batch};
//!
//! let parsed = batch::parse_orders("1-3");
//! assert!(parsed.warnings.is_empty());
//!
//! let reports = batch::run(&parsed.ranges, Mode::Unique, false).unwrap();
//! assert_eq!(reports.len(), 3);
//! assert_eq!(
//!     reports[2].to_string(),
//!     "Number of unique images for 3x3 matrix: 2\n\
//!      Sole image: 0\n\
//!      Twin image: 1\n\
//!      Quad image: 1\n"
//! );
//! ```

mod parse;

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;
use core::ops::RangeInclusive;

use crate::error::OrbitError;
use crate::registry::{ImprintCensus, Mode, OrbitCounts, OrbitRegistry};

/// An inclusive range of matrix orders.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct OrderRange {
    /// First order.
    pub low: usize,
    /// Last order (inclusive).
    pub high: usize,
}

impl OrderRange {
    /// Orders `low..=high`.
    pub const fn new(low: usize, high: usize) -> Self {
        Self { low, high }
    }

    /// Just `order`.
    pub const fn single(order: usize) -> Self {
        Self::new(order, order)
    }

    /// Whether the range holds no orders (`low > high`).
    pub fn is_empty(&self) -> bool {
        self.low > self.high
    }

    /// The orders in increasing sequence.
    pub fn orders(&self) -> RangeInclusive<usize> {
        self.low..=self.high
    }
}

impl fmt::Display for OrderRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.low == self.high {
            write!(f, "{}", self.low)
        } else {
            write!(f, "{}-{}", self.low, self.high)
        }
    }
}

/// Result of parsing an order list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseResult {
    /// Ranges in the order they were written.
    pub ranges: Vec<OrderRange>,
    /// Non-fatal parse warnings.
    pub warnings: Vec<ParseWarning>,
}

impl ParseResult {
    /// Every order, range by range.
    pub fn orders(&self) -> impl Iterator<Item = usize> + '_ {
        self.ranges.iter().flat_map(OrderRange::orders)
    }
}

/// Non-fatal warning from order-list parsing. The offending token is skipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseWarning {
    /// The token is not an order or an order range.
    ValueInvalid {
        /// The token as written.
        token: String,
        /// What is wrong with it.
        reason: &'static str,
    },
    /// A range whose start exceeds its end.
    EmptyRange {
        /// The token as written.
        token: String,
    },
}

impl fmt::Display for ParseWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ValueInvalid { token, reason } => write!(f, "ignoring {token:?}: {reason}"),
            Self::EmptyRange { token } => write!(f, "ignoring {token:?}: range is empty"),
        }
    }
}

/// Parse an order list: comma-separated orders (`6`) and ranges (`4-7`).
pub fn parse_orders(list: &str) -> ParseResult {
    let (ranges, warnings) = parse::parse_list(list);
    ParseResult { ranges, warnings }
}

/// Summary of one generated order.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct OrderReport {
    /// Matrix order.
    pub order: usize,
    /// Mode the registry was built in.
    pub mode: Mode,
    /// Number of images kept.
    pub images: usize,
    /// Orbit counts; meaningful in [`Mode::Unique`] only.
    pub counts: OrbitCounts,
    /// Imprint census, when requested.
    pub imprint: Option<ImprintCensus>,
}

impl OrderReport {
    /// Summarize `registry`, computing the imprint census if `with_imprint`.
    pub fn from_registry(registry: &OrbitRegistry, with_imprint: bool) -> Self {
        Self {
            order: registry.order(),
            mode: registry.mode(),
            images: registry.count(),
            counts: registry.counts(),
            imprint: with_imprint.then(|| registry.imprint_census()),
        }
    }
}

impl fmt::Display for OrderReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self.mode {
            Mode::Unique => "unique",
            Mode::Full => "all",
        };
        writeln!(
            f,
            "Number of {kind} images for {n}x{n} matrix: {images}",
            n = self.order,
            images = self.images
        )?;
        if self.mode == Mode::Unique {
            writeln!(f, "Sole image: {}", self.counts.sole)?;
            writeln!(f, "Twin image: {}", self.counts.twin)?;
            writeln!(f, "Quad image: {}", self.counts.quad)?;
        }
        if let Some(census) = &self.imprint {
            writeln!(f, "Sole:{}, Dispersed:{}", census.sole, census.dispersed)?;
        }
        Ok(())
    }
}

/// Generate every order in `ranges` and report on each, stopping at the
/// first error.
pub fn run(
    ranges: &[OrderRange],
    mode: Mode,
    with_imprint: bool,
) -> Result<Vec<OrderReport>, OrbitError> {
    ranges
        .iter()
        .flat_map(OrderRange::orders)
        .map(|order| {
            let registry = OrbitRegistry::generate(order, mode)?;
            Ok(OrderReport::from_registry(&registry, with_imprint))
        })
        .collect()
}
