//! Ordered collection of extrusion entities.

use super::{ExtrusionEntity, ExtrusionRole};
use crate::geometry::{Point, Polyline};
use crate::CoordF;

/// An ordered, heterogeneous sequence of extrusion entities.
///
/// `no_sort` tells the downstream chaining pass (see
/// [`chain_from`](Self::chain_from)) that the current order is authoritative
/// and must be emitted as is.
#[derive(Debug, Clone, Default)]
pub struct ExtrusionEntityCollection {
    pub entities: Vec<Box<dyn ExtrusionEntity>>,
    pub no_sort: bool,
}

impl ExtrusionEntityCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_entities(entities: Vec<Box<dyn ExtrusionEntity>>) -> Self {
        Self {
            entities,
            no_sort: false,
        }
    }

    /// Add an entity at the end.
    pub fn push<E: ExtrusionEntity + 'static>(&mut self, entity: E) {
        self.entities.push(Box::new(entity));
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn ExtrusionEntity> {
        self.entities.iter().map(|e| e.as_ref())
    }

    /// Role of every direct child, in order.
    pub fn roles(&self) -> Vec<ExtrusionRole> {
        self.entities.iter().map(|e| e.role()).collect()
    }
}

impl ExtrusionEntity for ExtrusionEntityCollection {
    /// The shared role of all children, `Mixed` if they differ, `None` when
    /// empty.
    fn role(&self) -> ExtrusionRole {
        let mut roles = self.entities.iter().map(|e| e.role());
        let Some(first) = roles.next() else {
            return ExtrusionRole::None;
        };
        if roles.all(|r| r == first) {
            first
        } else {
            ExtrusionRole::Mixed
        }
    }

    fn first_point(&self) -> Option<Point> {
        self.entities.first().and_then(|e| e.first_point())
    }

    fn last_point(&self) -> Option<Point> {
        self.entities.last().and_then(|e| e.last_point())
    }

    fn is_collection(&self) -> bool {
        true
    }

    /// A collection whose order is pinned cannot be flipped either.
    fn can_reverse(&self) -> bool {
        !self.no_sort
    }

    fn reverse(&mut self) {
        for entity in &mut self.entities {
            if entity.can_reverse() {
                entity.reverse();
            }
        }
        self.entities.reverse();
    }

    fn length(&self) -> CoordF {
        self.entities.iter().map(|e| e.length()).sum()
    }

    fn polyline(&self) -> Polyline {
        let mut out = Polyline::new();
        for entity in &self.entities {
            out.append(&entity.polyline());
        }
        out
    }

    fn width(&self) -> CoordF {
        self.entities.first().map_or(0.0, |e| e.width())
    }

    fn height(&self) -> CoordF {
        self.entities.first().map_or(0.0, |e| e.height())
    }

    fn clone_box(&self) -> Box<dyn ExtrusionEntity> {
        Box::new(self.clone())
    }
}
