//! Extrusion entities.
//!
//! An extrusion entity is one unit of toolpath motion tagged with a role.
//! Collections hold them as trait objects so paths, multi-paths, loops and
//! nested collections can share one sequence.

use std::fmt;

use super::ExtrusionRole;
use crate::geometry::{Point, Polyline};
use crate::CoordF;

/// Common interface of everything a collection can hold.
pub trait ExtrusionEntity: fmt::Debug + Send + Sync {
    /// The role of this entity.
    fn role(&self) -> ExtrusionRole;

    /// Start point, `None` for empty geometry.
    fn first_point(&self) -> Option<Point>;

    /// End point, `None` for empty geometry.
    fn last_point(&self) -> Option<Point>;

    /// Whether this entity is a closed loop.
    fn is_loop(&self) -> bool {
        false
    }

    /// Whether this entity is itself a collection.
    fn is_collection(&self) -> bool {
        false
    }

    /// Whether the entity may be printed end-to-start.
    fn can_reverse(&self) -> bool {
        !self.is_loop()
    }

    /// Reverse the print direction.
    fn reverse(&mut self);

    /// Length in scaled units.
    fn length(&self) -> CoordF;

    /// Flattened geometry of the entity.
    fn polyline(&self) -> Polyline;

    /// Extrusion width (mm).
    fn width(&self) -> CoordF;

    /// Layer height (mm).
    fn height(&self) -> CoordF;

    fn clone_box(&self) -> Box<dyn ExtrusionEntity>;
}

impl Clone for Box<dyn ExtrusionEntity> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

/// A single open extrusion path.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtrusionPath {
    pub polyline: Polyline,

    pub role: ExtrusionRole,

    /// Extrusion width (mm).
    pub width: CoordF,

    /// Layer height (mm).
    pub height: CoordF,
}

impl ExtrusionPath {
    pub fn new(polyline: Polyline, role: ExtrusionRole) -> Self {
        Self {
            polyline,
            role,
            width: 0.45,
            height: 0.2,
        }
    }

    pub fn from_points(points: Vec<Point>, role: ExtrusionRole) -> Self {
        Self::new(Polyline::from_points(points), role)
    }

    pub fn with_width(mut self, width: CoordF) -> Self {
        self.width = width;
        self
    }

    pub fn with_height(mut self, height: CoordF) -> Self {
        self.height = height;
        self
    }
}

impl ExtrusionEntity for ExtrusionPath {
    fn role(&self) -> ExtrusionRole {
        self.role
    }

    fn first_point(&self) -> Option<Point> {
        self.polyline.first()
    }

    fn last_point(&self) -> Option<Point> {
        self.polyline.last()
    }

    fn reverse(&mut self) {
        self.polyline.reverse();
    }

    fn length(&self) -> CoordF {
        self.polyline.length()
    }

    fn polyline(&self) -> Polyline {
        self.polyline.clone()
    }

    fn width(&self) -> CoordF {
        self.width
    }

    fn height(&self) -> CoordF {
        self.height
    }

    fn clone_box(&self) -> Box<dyn ExtrusionEntity> {
        Box::new(self.clone())
    }
}

/// Consecutive paths printed without lifting the nozzle.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExtrusionMultiPath {
    pub paths: Vec<ExtrusionPath>,
}

impl ExtrusionMultiPath {
    pub fn new(paths: Vec<ExtrusionPath>) -> Self {
        Self { paths }
    }
}

impl ExtrusionEntity for ExtrusionMultiPath {
    fn role(&self) -> ExtrusionRole {
        self.paths.first().map_or(ExtrusionRole::None, |p| p.role)
    }

    fn first_point(&self) -> Option<Point> {
        self.paths.first().and_then(|p| p.first_point())
    }

    fn last_point(&self) -> Option<Point> {
        self.paths.last().and_then(|p| p.last_point())
    }

    fn reverse(&mut self) {
        for path in &mut self.paths {
            path.reverse();
        }
        self.paths.reverse();
    }

    fn length(&self) -> CoordF {
        self.paths.iter().map(|p| p.length()).sum()
    }

    fn polyline(&self) -> Polyline {
        let mut out = Polyline::new();
        for path in &self.paths {
            out.append(&path.polyline);
        }
        out
    }

    fn width(&self) -> CoordF {
        self.paths.first().map_or(0.0, |p| p.width)
    }

    fn height(&self) -> CoordF {
        self.paths.first().map_or(0.0, |p| p.height)
    }

    fn clone_box(&self) -> Box<dyn ExtrusionEntity> {
        Box::new(self.clone())
    }
}

/// A closed loop made of one or more paths.
///
/// The last path ends where the first one starts.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExtrusionLoop {
    pub paths: Vec<ExtrusionPath>,
}

impl ExtrusionLoop {
    pub fn new(paths: Vec<ExtrusionPath>) -> Self {
        Self { paths }
    }

    /// Build a single-path loop from a closed ring of points. The first point
    /// is repeated at the end if needed.
    pub fn from_ring(mut points: Vec<Point>, role: ExtrusionRole) -> Self {
        if let (Some(&first), Some(&last)) = (points.first(), points.last()) {
            if points.len() > 1 && first != last {
                points.push(first);
            }
        }
        Self::new(vec![ExtrusionPath::from_points(points, role)])
    }
}

impl ExtrusionEntity for ExtrusionLoop {
    fn role(&self) -> ExtrusionRole {
        self.paths.first().map_or(ExtrusionRole::None, |p| p.role)
    }

    fn first_point(&self) -> Option<Point> {
        self.paths.first().and_then(|p| p.first_point())
    }

    fn last_point(&self) -> Option<Point> {
        self.first_point()
    }

    fn is_loop(&self) -> bool {
        true
    }

    fn reverse(&mut self) {
        for path in &mut self.paths {
            path.reverse();
        }
        self.paths.reverse();
    }

    fn length(&self) -> CoordF {
        self.paths.iter().map(|p| p.length()).sum()
    }

    fn polyline(&self) -> Polyline {
        let mut out = Polyline::new();
        for path in &self.paths {
            out.append(&path.polyline);
        }
        out
    }

    fn width(&self) -> CoordF {
        self.paths.first().map_or(0.0, |p| p.width)
    }

    fn height(&self) -> CoordF {
        self.paths.first().map_or(0.0, |p| p.height)
    }

    fn clone_box(&self) -> Box<dyn ExtrusionEntity> {
        Box::new(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scale;

    fn line(x0: f64, x1: f64, role: ExtrusionRole) -> ExtrusionPath {
        ExtrusionPath::from_points(
            vec![
                Point::new(scale(x0), 0),
                Point::new(scale(x1), 0),
            ],
            role,
        )
    }

    #[test]
    fn test_path_basics() {
        let mut path = line(0.0, 10.0, ExtrusionRole::InternalInfill);
        assert_eq!(path.role(), ExtrusionRole::InternalInfill);
        assert!((path.length() - scale(10.0) as f64).abs() < 1e-6);
        assert!(path.can_reverse());

        path.reverse();
        assert_eq!(path.first_point(), Some(Point::new(scale(10.0), 0)));
    }

    #[test]
    fn test_multipath_reverse() {
        let mut mp = ExtrusionMultiPath::new(vec![
            line(0.0, 1.0, ExtrusionRole::GapFill),
            line(1.0, 2.0, ExtrusionRole::GapFill),
        ]);
        assert_eq!(mp.role(), ExtrusionRole::GapFill);
        assert_eq!(mp.polyline().len(), 3);

        mp.reverse();
        assert_eq!(mp.first_point(), Some(Point::new(scale(2.0), 0)));
        assert_eq!(mp.last_point(), Some(Point::new(0, 0)));
    }

    #[test]
    fn test_loop_is_closed_and_not_reversible() {
        let lp = ExtrusionLoop::from_ring(
            vec![
                Point::new(0, 0),
                Point::new(100, 0),
                Point::new(100, 100),
            ],
            ExtrusionRole::ExternalPerimeter,
        );
        assert!(lp.is_loop());
        assert!(!lp.can_reverse());
        assert!(lp.polyline().is_closed());
        assert_eq!(lp.first_point(), lp.last_point());
    }

    #[test]
    fn test_empty_multipath_has_no_role() {
        let mp = ExtrusionMultiPath::default();
        assert_eq!(mp.role(), ExtrusionRole::None);
        assert_eq!(mp.first_point(), None);
    }
}
