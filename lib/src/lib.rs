//! # Extrusion order
//!
//! Role-priority ordering of extrusion entities for a slicing pipeline.
//!
//! The path planner emits each layer as an [`ExtrusionEntityCollection`] in
//! its own default order. This library lets the user override that order
//! with a priority list of extrusion roles and decides whether the automatic
//! nearest-neighbour chaining pass may reorder the result again:
//! - Role taxonomy and name lookup ([`ExtrusionRole`])
//! - Polymorphic extrusion entities and collections
//! - Custom role order extraction and application ([`order`])
//! - Nearest-neighbour chaining that honours the collection's `no_sort` flag
//! - JSON configuration and layer files
//!
//! ## Example
//!
//! ```rust,ignore
//! use extrusion_order::{order_collection, PrintConfig};
//!
//! let config = PrintConfig::from_json_file("order.json")?;
//! order_collection(&config, &mut layer_collection);
//! ```

// Core modules
pub mod config;
pub mod extrusion;
pub mod geometry;
pub mod layers;
pub mod order;

pub use config::PrintConfig;
pub use extrusion::{
    ExtrusionEntity, ExtrusionEntityCollection, ExtrusionLoop, ExtrusionMultiPath, ExtrusionPath,
    ExtrusionRole,
};
pub use geometry::{Point, Polyline};
pub use layers::{EntityRecord, LayerFile, LayerRecord};
pub use order::{
    apply_custom_extrusion_order, custom_extrusion_roles_from_config, order_collection,
    order_layers, CustomExtrusionOrder, RolePriority,
};

/// Coordinate type used throughout the crate.
/// Using i64 for integer coordinates (scaled by SCALING_FACTOR) to avoid floating-point issues.
pub type Coord = i64;

/// Floating-point coordinate type for unscaled values.
pub type CoordF = f64;

/// Scaling factor: coordinates are stored as integers scaled by this factor.
/// 1 unit = 1 nanometer, so 1mm = 1_000_000 units.
pub const SCALING_FACTOR: f64 = 1_000_000.0;

/// Scale a floating-point coordinate to integer.
#[inline]
pub fn scale(v: CoordF) -> Coord {
    (v * SCALING_FACTOR).round() as Coord
}

/// Unscale an integer coordinate to floating-point.
#[inline]
pub fn unscale(v: Coord) -> CoordF {
    v as CoordF / SCALING_FACTOR
}

/// Result type used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for configuration and file handling.
///
/// The ordering pass itself never fails.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}
