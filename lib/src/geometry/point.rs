//! 2D point in scaled integer coordinates.

use crate::{scale, unscale, Coord, CoordF};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A 2D point with integer (scaled) coordinates.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Point {
    pub x: Coord,
    pub y: Coord,
}

impl Point {
    #[inline]
    pub const fn new(x: Coord, y: Coord) -> Self {
        Self { x, y }
    }

    /// Create a point from millimetre coordinates.
    #[inline]
    pub fn new_scale(x: CoordF, y: CoordF) -> Self {
        Self::new(scale(x), scale(y))
    }

    /// Coordinates in millimetres.
    #[inline]
    pub fn to_mm(self) -> [CoordF; 2] {
        [unscale(self.x), unscale(self.y)]
    }

    /// Squared distance in scaled units.
    ///
    /// Each axis difference fits a u64, so its square fits a u128; the sum
    /// saturates for points at opposite corners of the coordinate range.
    #[inline]
    pub fn distance_squared(&self, other: &Point) -> u128 {
        let dx = self.x.abs_diff(other.x) as u128;
        let dy = self.y.abs_diff(other.y) as u128;
        (dx * dx).saturating_add(dy * dy)
    }

    /// Euclidean distance in scaled units.
    #[inline]
    pub fn distance(&self, other: &Point) -> CoordF {
        (self.distance_squared(other) as CoordF).sqrt()
    }
}

impl fmt::Debug for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [x, y] = self.to_mm();
        write!(f, "({:.3}, {:.3})", x, y)
    }
}
