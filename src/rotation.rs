//! Quarter-turn rotations (the cyclic group C4) acting on square grids.

use crate::image::Dot;

/// A clockwise rotation of a square grid by a multiple of 90 degrees.
///
/// The four elements form the rotation subgroup of the square's symmetry
/// group. A dot `(x, y)` sits `x` cells from the left edge and `y` cells
/// from the top, so `Rotate90` carries the top-left corner to the top-right.
///
/// ```text
///     Identity      Rotate90      Rotate180     Rotate270
///     * - -         - - *         - - -         - - -
///     - - -         - - -         - - -         - - -
///     - - -         - - -         - - *         * - -
/// ```
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Rotation {
    /// No rotation.
    #[default]
    Identity,
    /// 90 degrees clockwise.
    Rotate90,
    /// 180 degrees.
    Rotate180,
    /// 270 degrees clockwise (90 counter-clockwise).
    Rotate270,
}

impl Rotation {
    /// All four rotations, indexed by quarter turns.
    pub const ALL: [Self; 4] = [
        Self::Identity,
        Self::Rotate90,
        Self::Rotate180,
        Self::Rotate270,
    ];

    /// The three rotations other than the identity, in increasing angle.
    pub const NON_TRIVIAL: [Self; 3] = [Self::Rotate90, Self::Rotate180, Self::Rotate270];

    /// Rotation by `turns` clockwise quarter turns (taken modulo 4).
    pub fn from_quarter_turns(turns: u8) -> Self {
        Self::ALL[(turns & 3) as usize]
    }

    /// Number of clockwise quarter turns (0-3).
    pub fn quarter_turns(self) -> u8 {
        self as u8
    }

    /// Whether this is the identity.
    pub fn is_identity(self) -> bool {
        self == Self::Identity
    }

    /// Apply `self` first, then `other`.
    pub fn compose(self, other: Self) -> Self {
        Self::from_quarter_turns(self.quarter_turns() + other.quarter_turns())
    }

    /// The rotation undoing `self`.
    pub fn inverse(self) -> Self {
        Self::from_quarter_turns(4 - self.quarter_turns())
    }

    /// Forward-map a dot of an `order`×`order` grid.
    ///
    /// `dot` must lie inside the grid.
    pub fn map_dot(self, dot: Dot, order: usize) -> Dot {
        let last = order - 1;
        match self {
            Self::Identity => dot,
            Self::Rotate90 => Dot::new(last - dot.y, dot.x),
            Self::Rotate180 => Dot::new(last - dot.x, last - dot.y),
            Self::Rotate270 => Dot::new(dot.y, last - dot.x),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quarter_turn_round_trip() {
        for turns in 0..4u8 {
            assert_eq!(Rotation::from_quarter_turns(turns).quarter_turns(), turns);
        }
        assert_eq!(Rotation::from_quarter_turns(5), Rotation::Rotate90);
    }

    #[test]
    fn cayley_table() {
        // Entry [i][j] is ALL[i].compose(ALL[j]), as quarter turns.
        #[rustfmt::skip]
        const CAYLEY: [[u8; 4]; 4] = [
            [0, 1, 2, 3],
            [1, 2, 3, 0],
            [2, 3, 0, 1],
            [3, 0, 1, 2],
        ];
        for (i, row) in CAYLEY.iter().enumerate() {
            for (j, &expected) in row.iter().enumerate() {
                let (a, b) = (Rotation::ALL[i], Rotation::ALL[j]);
                assert_eq!(
                    a.compose(b).quarter_turns(),
                    expected,
                    "Cayley mismatch: {a:?}.compose({b:?})"
                );
            }
        }
    }

    #[test]
    fn inverse_all() {
        for &r in &Rotation::ALL {
            assert_eq!(r.compose(r.inverse()), Rotation::Identity, "{r:?}");
            assert_eq!(r.inverse().compose(r), Rotation::Identity, "{r:?}");
        }
    }

    #[test]
    fn identity_is_neutral() {
        assert!(Rotation::Identity.is_identity());
        for &r in &Rotation::ALL {
            assert_eq!(Rotation::Identity.compose(r), r);
            assert_eq!(r.compose(Rotation::Identity), r);
        }
    }

    #[test]
    fn map_dot_corners_of_3x3() {
        let corner = Dot::new(0, 0);
        assert_eq!(Rotation::Identity.map_dot(corner, 3), Dot::new(0, 0));
        assert_eq!(Rotation::Rotate90.map_dot(corner, 3), Dot::new(2, 0));
        assert_eq!(Rotation::Rotate180.map_dot(corner, 3), Dot::new(2, 2));
        assert_eq!(Rotation::Rotate270.map_dot(corner, 3), Dot::new(0, 2));
    }

    #[test]
    fn map_dot_agrees_with_composition() {
        let order = 5;
        for &a in &Rotation::ALL {
            for &b in &Rotation::ALL {
                for x in 0..order {
                    for y in 0..order {
                        let dot = Dot::new(x, y);
                        let stepwise = b.map_dot(a.map_dot(dot, order), order);
                        let fused = a.compose(b).map_dot(dot, order);
                        assert_eq!(stepwise, fused, "{dot:?} via {a:?} then {b:?}");
                    }
                }
            }
        }
    }

    #[test]
    fn center_is_fixed_for_odd_orders() {
        for &r in &Rotation::ALL {
            assert_eq!(r.map_dot(Dot::new(2, 2), 5), Dot::new(2, 2));
        }
    }
}
