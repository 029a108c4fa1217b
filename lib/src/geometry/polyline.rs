//! Polyline type for open paths.
//!
//! Extrusion entities keep their geometry as a polyline; loops repeat the
//! first point at the end.

use super::Point;
use crate::CoordF;
use serde::{Deserialize, Serialize};
use std::fmt;

/// An open polyline defined by a sequence of points.
#[derive(Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Polyline {
    points: Vec<Point>,
}

impl Polyline {
    /// Create a new empty polyline.
    #[inline]
    pub fn new() -> Self {
        Self { points: Vec::new() }
    }

    /// Create a polyline from a vector of points.
    #[inline]
    pub fn from_points(points: Vec<Point>) -> Self {
        Self { points }
    }

    #[inline]
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Append the points of `other`, skipping its first point when it
    /// duplicates our last one.
    pub fn append(&mut self, other: &Polyline) {
        let skip = match (self.points.last(), other.points.first()) {
            (Some(a), Some(b)) if a == b => 1,
            _ => 0,
        };
        self.points.extend_from_slice(&other.points[skip.min(other.len())..]);
    }

    #[inline]
    pub fn first(&self) -> Option<Point> {
        self.points.first().copied()
    }

    #[inline]
    pub fn last(&self) -> Option<Point> {
        self.points.last().copied()
    }

    /// Total length in scaled units.
    pub fn length(&self) -> CoordF {
        self.points.windows(2).map(|w| w[0].distance(&w[1])).sum()
    }

    /// Check if this polyline is closed (first point equals last point).
    #[inline]
    pub fn is_closed(&self) -> bool {
        self.points.len() >= 2 && self.points.first() == self.points.last()
    }

    pub fn reverse(&mut self) {
        self.points.reverse();
    }
}

impl fmt::Debug for Polyline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Polyline({} points)", self.points.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn l_shape() -> Polyline {
        Polyline::from_points(vec![
            Point::new(0, 0),
            Point::new(100, 0),
            Point::new(100, 100),
        ])
    }

    #[test]
    fn test_length() {
        assert!((l_shape().length() - 200.0).abs() < 1e-9);
        assert_eq!(Polyline::new().length(), 0.0);
    }

    #[test]
    fn test_reverse() {
        let mut pl = l_shape();
        pl.reverse();
        assert_eq!(pl.first(), Some(Point::new(100, 100)));
        assert_eq!(pl.last(), Some(Point::new(0, 0)));
    }

    #[test]
    fn test_append_skips_shared_point() {
        let mut pl = l_shape();
        let tail = Polyline::from_points(vec![Point::new(100, 100), Point::new(0, 100)]);
        pl.append(&tail);
        assert_eq!(pl.len(), 4);
        assert_eq!(pl.last(), Some(Point::new(0, 100)));
    }

    #[test]
    fn test_is_closed() {
        let mut pl = l_shape();
        assert!(!pl.is_closed());
        pl.append(&Polyline::from_points(vec![Point::new(0, 0)]));
        assert!(pl.is_closed());
    }
}
