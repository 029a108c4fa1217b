//! Geometry primitives for extrusion entities.
//!
//! - [`Point`] - 2D point with integer coordinates (scaled)
//! - [`Polyline`] - Open polyline (path)
//!
//! ## Coordinate System
//!
//! Coordinates are scaled integers (`SCALING_FACTOR` = 1,000,000, so 1 unit =
//! 1 nanometer). Use `scale()` / `unscale()` to convert from and to mm.

mod point;
mod polyline;

pub use point::Point;
pub use polyline::Polyline;
