//! JSON layer file format.
//!
//! A layer file lists, per layer, the extrusion entities produced by the
//! planner in their planned order. Coordinates are in mm.
//!
//! ```json
//! {
//!   "layers": [
//!     {
//!       "index": 0,
//!       "no_sort": false,
//!       "entities": [
//!         { "role": "External perimeter", "closed": true,
//!           "points": [[0, 0], [10, 0], [10, 10]] },
//!         { "role": "Internal infill", "points": [[1, 1], [9, 9]], "width": 0.5 }
//!       ]
//!     }
//!   ]
//! }
//! ```
//!
//! Role names are resolved with [`ExtrusionRole::from_name`]; unknown names
//! load as [`ExtrusionRole::None`] and are written back unchanged.

use crate::extrusion::{
    ExtrusionEntity, ExtrusionEntityCollection, ExtrusionLoop, ExtrusionPath, ExtrusionRole,
};
use crate::geometry::Point;
use crate::{CoordF, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

fn default_width() -> CoordF {
    0.45
}

fn default_height() -> CoordF {
    0.2
}

/// One extrusion entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityRecord {
    pub role: String,
    pub points: Vec<[CoordF; 2]>,
    #[serde(default)]
    pub closed: bool,
    #[serde(default = "default_width")]
    pub width: CoordF,
    #[serde(default = "default_height")]
    pub height: CoordF,
}

impl EntityRecord {
    /// Build the extrusion entity this record describes.
    pub fn to_entity(&self) -> Box<dyn ExtrusionEntity> {
        let role = ExtrusionRole::from_name(&self.role);
        let points: Vec<Point> = self
            .points
            .iter()
            .map(|&[x, y]| Point::new_scale(x, y))
            .collect();

        if self.closed {
            let mut lp = ExtrusionLoop::from_ring(points, role);
            for path in &mut lp.paths {
                path.width = self.width;
                path.height = self.height;
            }
            Box::new(lp)
        } else {
            Box::new(
                ExtrusionPath::from_points(points, role)
                    .with_width(self.width)
                    .with_height(self.height),
            )
        }
    }

    /// Describe an existing entity. Nested collections are flattened into a
    /// single record.
    pub fn from_entity(entity: &dyn ExtrusionEntity) -> Self {
        Self {
            role: entity.role().name().to_string(),
            points: entity
                .polyline()
                .points()
                .iter()
                .map(|p| p.to_mm())
                .collect(),
            closed: entity.is_loop(),
            width: entity.width(),
            height: entity.height(),
        }
    }
}

/// All entities of one layer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LayerRecord {
    #[serde(default)]
    pub index: usize,
    /// The collection's `no_sort` flag.
    #[serde(default)]
    pub no_sort: bool,
    #[serde(default)]
    pub entities: Vec<EntityRecord>,
}

impl LayerRecord {
    pub fn to_collection(&self) -> ExtrusionEntityCollection {
        let mut collection = ExtrusionEntityCollection::from_entities(
            self.entities.iter().map(EntityRecord::to_entity).collect(),
        );
        collection.no_sort = self.no_sort;
        collection
    }

    /// Replace the entities and flag with those of `collection`.
    ///
    /// Role names that did not resolve to a known role are carried over from
    /// the current records: each unresolved entity takes the name of the first
    /// unclaimed unresolved record with the same points, in either direction.
    pub fn update_from(&mut self, collection: &ExtrusionEntityCollection) {
        let mut unresolved: Vec<(String, Vec<[CoordF; 2]>)> = self
            .entities
            .iter()
            .filter(|record| ExtrusionRole::from_name(&record.role) == ExtrusionRole::None)
            .map(|record| {
                let canonical = EntityRecord::from_entity(record.to_entity().as_ref());
                (record.role.clone(), canonical.points)
            })
            .collect();

        self.no_sort = collection.no_sort;
        self.entities = collection
            .iter()
            .map(|entity| {
                let mut record = EntityRecord::from_entity(entity);
                if entity.role() == ExtrusionRole::None {
                    let found = unresolved
                        .iter()
                        .position(|(_, points)| same_path(points, &record.points));
                    if let Some(slot) = found {
                        record.role = unresolved.remove(slot).0;
                    }
                }
                record
            })
            .collect();
    }
}

fn same_path(a: &[[CoordF; 2]], b: &[[CoordF; 2]]) -> bool {
    a == b || a.iter().eq(b.iter().rev())
}

/// A whole layer file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LayerFile {
    pub layers: Vec<LayerRecord>,
}

impl LayerFile {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// One collection per layer, in file order.
    pub fn to_collections(&self) -> Vec<ExtrusionEntityCollection> {
        self.layers.iter().map(LayerRecord::to_collection).collect()
    }

    /// Write ordered collections back, matching layers by position.
    pub fn update_from_collections(&mut self, collections: &[ExtrusionEntityCollection]) {
        for (layer, collection) in self.layers.iter_mut().zip(collections) {
            layer.update_from(collection);
        }
    }

    /// Total number of entities across all layers.
    pub fn entity_count(&self) -> usize {
        self.layers.iter().map(|l| l.entities.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PrintConfig;
    use crate::order::order_layers;

    const SAMPLE: &str = r#"{
        "layers": [
            {
                "index": 3,
                "entities": [
                    { "role": "Perimeter", "closed": true, "points": [[0, 0], [10, 0], [10, 10]] },
                    { "role": "Support material", "points": [[20, 0], [30, 0]] },
                    { "role": "Internal infill", "points": [[1, 1], [9, 9]], "width": 0.5 },
                    { "role": "Sparkles", "points": [[5, 5], [6, 6]] }
                ]
            }
        ]
    }"#;

    fn roles(layer: &LayerRecord) -> Vec<&str> {
        layer.entities.iter().map(|e| e.role.as_str()).collect()
    }

    #[test]
    fn test_parse_defaults() {
        let file = LayerFile::from_json_str(SAMPLE).unwrap();
        assert_eq!(file.layers.len(), 1);
        assert_eq!(file.entity_count(), 4);

        let layer = &file.layers[0];
        assert_eq!(layer.index, 3);
        assert!(!layer.no_sort);
        assert!((layer.entities[1].width - 0.45).abs() < 1e-9);
        assert!((layer.entities[2].width - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_to_collection() {
        let file = LayerFile::from_json_str(SAMPLE).unwrap();
        let coll = file.layers[0].to_collection();

        assert_eq!(
            coll.roles(),
            vec![
                ExtrusionRole::Perimeter,
                ExtrusionRole::SupportMaterial,
                ExtrusionRole::InternalInfill,
                ExtrusionRole::None,
            ]
        );
        assert!(coll.entities[0].is_loop());
        assert!(coll.entities[0].polyline().is_closed());
        assert_eq!(coll.entities[1].first_point(), Some(Point::new_scale(20.0, 0.0)));
    }

    #[test]
    fn test_order_and_write_back() {
        let mut file = LayerFile::from_json_str(SAMPLE).unwrap();
        let mut collections = file.to_collections();
        let config = PrintConfig::new()
            .custom_extrusion_role_order(["Internal infill", "Support material"])
            .preserve_custom_order(true);

        order_layers(&config, &mut collections);
        file.update_from_collections(&collections);

        let layer = &file.layers[0];
        assert!(layer.no_sort);
        assert_eq!(
            roles(layer),
            vec!["Internal infill", "Support material", "Perimeter", "Sparkles"]
        );
        assert!(layer.entities[2].closed);
        assert_eq!(layer.entities[2].points.len(), 4);
        assert!((layer.entities[0].width - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_json_round_trip() {
        let file = LayerFile::from_json_str(SAMPLE).unwrap();
        let mut copy = file.clone();
        copy.update_from_collections(&file.to_collections());

        let reparsed = LayerFile::from_json_str(&copy.to_json().unwrap()).unwrap();
        assert_eq!(reparsed.entity_count(), 4);
        assert_eq!(reparsed.layers[0].entities[1], file.layers[0].entities[1]);
    }

    #[test]
    fn test_unknown_roles_survive_chaining() {
        let mut file = LayerFile::from_json_str(
            r#"{ "layers": [ { "entities": [
                { "role": "Perimeter", "points": [[0, 0], [1, 0]] },
                { "role": "Glitter", "points": [[5, 0], [2, 0]] },
                { "role": "Sparkles", "points": [[9, 0], [20, 0]] }
            ] } ] }"#,
        )
        .unwrap();
        let mut collections = file.to_collections();
        let config = PrintConfig::new().custom_extrusion_role_order(["Perimeter"]);

        order_layers(&config, &mut collections);
        file.update_from_collections(&collections);

        let layer = &file.layers[0];
        assert!(!layer.no_sort);
        assert_eq!(roles(layer), vec!["Perimeter", "Glitter", "Sparkles"]);
        // Glitter was flipped by the chaining pass and kept its name.
        assert_eq!(layer.entities[1].points, vec![[2.0, 0.0], [5.0, 0.0]]);
    }

    #[test]
    fn test_order_with_far_apart_coordinates() {
        let mut file = LayerFile::from_json_str(
            r#"{ "layers": [ { "entities": [
                { "role": "Perimeter", "points": [[1e13, 0], [1e13, 1]] },
                { "role": "Perimeter", "points": [[-1e13, 0], [-1e13, 1]] }
            ] } ] }"#,
        )
        .unwrap();
        let mut collections = file.to_collections();
        let config = PrintConfig::new().custom_extrusion_role_order(["Perimeter"]);

        order_layers(&config, &mut collections);
        file.update_from_collections(&collections);

        assert_eq!(file.entity_count(), 2);
        assert!(!file.layers[0].no_sort);
    }

    #[test]
    fn test_invalid_json() {
        assert!(LayerFile::from_json_str("{ \"layers\": 3 }").is_err());
    }
}
