//! Nearest-neighbour chaining of a collection.
//!
//! This is the automatic ordering pass that runs after the planner (and after
//! any custom role order). It reorders entities greedily to shorten travel
//! moves, flipping reversible entities when their far end is closer. It is
//! skipped entirely when the collection's `no_sort` flag is set, and it never
//! looks inside nested collections.

use log::trace;

use super::{ExtrusionEntity, ExtrusionEntityCollection};
use crate::geometry::Point;

impl ExtrusionEntityCollection {
    /// Chain the entities in place, starting from `start` (or from the first
    /// entity's start point).
    ///
    /// Ties are broken deterministically: lower original index first, and for
    /// the same entity its start point before its end point.
    pub fn chain_from(&mut self, start: Option<Point>) {
        if self.no_sort {
            trace!("chain: collection pinned, keeping {} entities", self.len());
            return;
        }
        if self.entities.len() < 2 {
            return;
        }

        let mut pending: Vec<Option<Box<dyn ExtrusionEntity>>> =
            self.entities.drain(..).map(Some).collect();
        let mut remaining: Vec<usize> = (0..pending.len()).collect();
        let mut current = start.or_else(|| {
            pending[0]
                .as_ref()
                .and_then(|entity| entity.first_point())
        });
        let mut ordered = Vec::with_capacity(pending.len());
        let mut reversed = 0usize;

        while !remaining.is_empty() {
            let (slot, reverse) = nearest_entity(&pending, &remaining, current);
            let idx = remaining.remove(slot);
            if let Some(mut entity) = pending[idx].take() {
                if reverse {
                    entity.reverse();
                    reversed += 1;
                }
                if let Some(end) = entity.last_point() {
                    current = Some(end);
                }
                ordered.push(entity);
            }
        }

        trace!(
            "chain: ordered {} entities, {} reversed",
            ordered.len(),
            reversed
        );
        self.entities = ordered;
    }

    /// Chained copy of this collection. A pinned collection is returned as is.
    pub fn chained_path_from(&self, start: Option<Point>) -> Self {
        let mut copy = self.clone();
        copy.chain_from(start);
        copy
    }
}

/// Find the remaining entity closest to `current`.
///
/// Returns its slot in `remaining` and whether it should be printed reversed.
/// `remaining` is kept sorted by original index, so a strict comparison gives
/// the lower index on ties. Entities without geometry sort last.
fn nearest_entity(
    pending: &[Option<Box<dyn ExtrusionEntity>>],
    remaining: &[usize],
    current: Option<Point>,
) -> (usize, bool) {
    let Some(current) = current else {
        return (0, false);
    };

    let mut best: Option<(u128, usize, bool)> = None;
    for (slot, &idx) in remaining.iter().enumerate() {
        let Some(entity) = pending[idx].as_ref() else {
            continue;
        };

        let mut consider = |point: Option<Point>, reverse: bool| {
            if let Some(p) = point {
                let dist = current.distance_squared(&p);
                if best.map_or(true, |(best_dist, _, _)| dist < best_dist) {
                    best = Some((dist, slot, reverse));
                }
            }
        };

        consider(entity.first_point(), false);
        if entity.can_reverse() {
            consider(entity.last_point(), true);
        }
    }

    best.map_or((0, false), |(_, slot, reverse)| (slot, reverse))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extrusion::{ExtrusionLoop, ExtrusionPath, ExtrusionRole};

    fn segment(x0: i64, x1: i64) -> ExtrusionPath {
        ExtrusionPath::from_points(
            vec![Point::new(x0, 0), Point::new(x1, 0)],
            ExtrusionRole::InternalInfill,
        )
    }

    fn starts(coll: &ExtrusionEntityCollection) -> Vec<Option<Point>> {
        coll.iter().map(|e| e.first_point()).collect()
    }

    #[test]
    fn test_chain_nearest_neighbour() {
        let mut coll = ExtrusionEntityCollection::new();
        coll.push(segment(1000, 1100));
        coll.push(segment(0, 100));
        coll.push(segment(500, 600));

        coll.chain_from(Some(Point::new(0, 0)));

        assert_eq!(
            starts(&coll),
            vec![
                Some(Point::new(0, 0)),
                Some(Point::new(500, 0)),
                Some(Point::new(1000, 0)),
            ]
        );
    }

    #[test]
    fn test_chain_reverses_open_paths() {
        let mut coll = ExtrusionEntityCollection::new();
        coll.push(segment(0, 100));
        coll.push(segment(300, 120));

        coll.chain_from(Some(Point::new(0, 0)));

        // Second path is entered from its nearer end.
        assert_eq!(coll.entities[1].first_point(), Some(Point::new(120, 0)));
        assert_eq!(coll.entities[1].last_point(), Some(Point::new(300, 0)));
    }

    #[test]
    fn test_chain_never_reverses_loops() {
        let mut coll = ExtrusionEntityCollection::new();
        coll.push(segment(0, 100));
        coll.push(ExtrusionLoop::from_ring(
            vec![Point::new(500, 0), Point::new(500, 500), Point::new(110, 0)],
            ExtrusionRole::Perimeter,
        ));

        coll.chain_from(Some(Point::new(0, 0)));

        assert_eq!(coll.entities[1].first_point(), Some(Point::new(500, 0)));
    }

    #[test]
    fn test_chain_skipped_when_pinned() {
        let mut coll = ExtrusionEntityCollection::new();
        coll.push(segment(1000, 1100));
        coll.push(segment(0, 100));
        coll.no_sort = true;

        let before = starts(&coll);
        coll.chain_from(Some(Point::new(0, 0)));
        assert_eq!(starts(&coll), before);
    }

    #[test]
    fn test_chain_ties_prefer_lower_index() {
        let mut coll = ExtrusionEntityCollection::new();
        coll.push(segment(100, 200));
        coll.push(segment(-100, -200));

        coll.chain_from(Some(Point::new(0, 0)));

        assert_eq!(coll.entities[0].first_point(), Some(Point::new(100, 0)));
    }

    #[test]
    fn test_chain_across_full_coordinate_range() {
        let mut coll = ExtrusionEntityCollection::new();
        coll.push(segment(i64::MAX - 10, i64::MAX));
        coll.push(segment(i64::MIN, i64::MIN + 10));
        coll.push(segment(0, 10));

        coll.chain_from(None);

        assert_eq!(
            starts(&coll),
            vec![
                Some(Point::new(i64::MAX - 10, 0)),
                Some(Point::new(10, 0)),
                Some(Point::new(i64::MIN + 10, 0)),
            ]
        );
    }

    #[test]
    fn test_chained_path_from_leaves_source() {
        let mut coll = ExtrusionEntityCollection::new();
        coll.push(segment(1000, 1100));
        coll.push(segment(0, 100));

        let chained = coll.chained_path_from(Some(Point::new(0, 0)));

        assert_eq!(coll.entities[0].first_point(), Some(Point::new(1000, 0)));
        assert_eq!(chained.entities[0].first_point(), Some(Point::new(0, 0)));
        assert_eq!(chained.len(), 2);
    }
}
