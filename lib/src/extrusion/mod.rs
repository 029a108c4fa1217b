//! Extrusion entities and their collections.
//!
//! This module provides the types the ordering pass works on:
//! - [`ExtrusionRole`] - feature type of an entity, including sentinels
//! - [`ExtrusionEntity`] - trait implemented by every printable entity
//! - [`ExtrusionPath`], [`ExtrusionMultiPath`], [`ExtrusionLoop`] - concrete entities
//! - [`ExtrusionEntityCollection`] - ordered sequence of entities plus the
//!   `no_sort` flag consumed by the chaining pass

mod chain;
mod collection;
mod entity;
mod role;

pub use collection::ExtrusionEntityCollection;
pub use entity::{ExtrusionEntity, ExtrusionLoop, ExtrusionMultiPath, ExtrusionPath};
pub use role::ExtrusionRole;
