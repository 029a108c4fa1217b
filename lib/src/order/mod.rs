//! Custom extrusion role ordering.
//!
//! Lets the user override the planner's print order with an explicit priority
//! list of roles, e.g. `["Skirt", "External perimeter", "Perimeter"]`.
//!
//! # Overview
//!
//! 1. [`custom_extrusion_roles_from_config`] turns the configured role names
//!    into [`ExtrusionRole`]s, silently dropping anything that is not a
//!    concrete role.
//! 2. [`apply_custom_extrusion_order`] stable-sorts a collection by the
//!    position of each entity's role in that list (unlisted roles go last,
//!    keeping their relative order) and sets the collection's `no_sort` flag,
//!    which decides whether the chaining pass may reorder it again.
//!
//! [`order_collection`] and [`order_layers`] run both steps followed by the
//! chaining pass, which is how the planner calls this right before a
//! collection is emitted.

use std::collections::HashMap;

use log::{debug, log_enabled, trace, Level};
use rayon::prelude::*;

use crate::config::PrintConfig;
use crate::extrusion::{ExtrusionEntityCollection, ExtrusionRole};

/// Read the custom role order from `config`.
///
/// Returns an empty list when the option is absent. Names that do not map to
/// a concrete role (unknown names, "Mixed") are dropped without notice; use
/// [`PrintConfig::validate`] to report them. Order and duplicates are kept.
pub fn custom_extrusion_roles_from_config(config: &PrintConfig) -> Vec<ExtrusionRole> {
    let Some(names) = config.custom_role_names() else {
        return Vec::new();
    };

    names
        .iter()
        .map(|name| ExtrusionRole::from_name(name))
        .filter(|role| role.is_concrete())
        .collect()
}

/// Role to rank table built from a priority list.
///
/// A role's rank is the index of its first occurrence in the list. Roles that
/// are not listed rank after every listed role.
#[derive(Debug, Clone, Default)]
pub struct RolePriority {
    ranks: HashMap<ExtrusionRole, usize>,
    unlisted: usize,
}

impl RolePriority {
    pub fn from_roles(roles: &[ExtrusionRole]) -> Self {
        let mut ranks = HashMap::with_capacity(roles.len());
        for (index, &role) in roles.iter().enumerate() {
            ranks.entry(role).or_insert(index);
        }
        Self {
            ranks,
            unlisted: roles.len(),
        }
    }

    /// Rank of `role`; lower prints earlier.
    #[inline]
    pub fn rank(&self, role: ExtrusionRole) -> usize {
        self.ranks.get(&role).copied().unwrap_or(self.unlisted)
    }

    /// Rank given to roles missing from the list (the list length).
    #[inline]
    pub fn unlisted_rank(&self) -> usize {
        self.unlisted
    }

    /// Number of distinct listed roles.
    pub fn len(&self) -> usize {
        self.ranks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranks.is_empty()
    }
}

/// Reorder `collection` by `roles` and set its `no_sort` flag.
///
/// The sort is stable: entities of equal rank keep their relative order, and
/// only positions change. After sorting, `no_sort` is set to
/// `preserve_suborder_and_disable_sort`.
///
/// When `roles` or the collection is empty nothing is sorted. In that case
/// `no_sort` is cleared if `preserve_suborder_and_disable_sort` is false, but
/// left at its previous value (not forced to true) if it is true. This
/// asymmetry is deliberate and kept as is until the intended behaviour is
/// clarified; callers that need the flag set must set it themselves.
pub fn apply_custom_extrusion_order(
    collection: &mut ExtrusionEntityCollection,
    roles: &[ExtrusionRole],
    preserve_suborder_and_disable_sort: bool,
) {
    if roles.is_empty() || collection.is_empty() {
        if !preserve_suborder_and_disable_sort {
            collection.no_sort = false;
        }
        trace!(
            "custom order: nothing to sort ({} roles, {} entities), no_sort={}",
            roles.len(),
            collection.len(),
            collection.no_sort
        );
        return;
    }

    let priority = RolePriority::from_roles(roles);
    collection
        .entities
        .sort_by_key(|entity| priority.rank(entity.role()));
    collection.no_sort = preserve_suborder_and_disable_sort;

    debug!(
        "custom order: sorted {} entities by {} roles, no_sort={}",
        collection.len(),
        priority.len(),
        collection.no_sort
    );
}

/// A custom order resolved from configuration, ready to apply to any number
/// of collections.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomExtrusionOrder {
    pub roles: Vec<ExtrusionRole>,
    pub preserve_suborder: bool,
}

impl CustomExtrusionOrder {
    pub fn new(roles: Vec<ExtrusionRole>, preserve_suborder: bool) -> Self {
        Self {
            roles,
            preserve_suborder,
        }
    }

    pub fn from_config(config: &PrintConfig) -> Self {
        Self::new(
            custom_extrusion_roles_from_config(config),
            config.preserve_custom_order,
        )
    }

    /// Whether no custom order is in effect.
    pub fn is_empty(&self) -> bool {
        self.roles.is_empty()
    }

    pub fn apply(&self, collection: &mut ExtrusionEntityCollection) {
        apply_custom_extrusion_order(collection, &self.roles, self.preserve_suborder);
    }
}

/// Apply the configured custom order to `collection`, then run the chaining
/// pass (which does nothing if the collection ended up pinned).
pub fn order_collection(config: &PrintConfig, collection: &mut ExtrusionEntityCollection) {
    let order = CustomExtrusionOrder::from_config(config);
    order.apply(collection);
    collection.chain_from(config.chain_start_point());
}

/// Entity counts per role class over a set of layers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct RoleTally {
    perimeter: usize,
    infill: usize,
    support: usize,
    other: usize,
}

impl RoleTally {
    fn of(layers: &[ExtrusionEntityCollection]) -> Self {
        let mut tally = Self::default();
        for role in layers.iter().flat_map(|c| c.roles()) {
            if role.is_perimeter() {
                tally.perimeter += 1;
            } else if role.is_infill() {
                tally.infill += 1;
            } else if role.is_support() {
                tally.support += 1;
            } else {
                tally.other += 1;
            }
        }
        tally
    }
}

/// Apply the configured custom order to every layer collection in parallel,
/// then run the chaining pass on each layer (a no-op for layers that ended up
/// pinned).
///
/// Layers are independent; each one is owned by a single worker for the
/// duration of the call.
pub fn order_layers(config: &PrintConfig, layers: &mut [ExtrusionEntityCollection]) {
    let order = CustomExtrusionOrder::from_config(config);
    let start = config.chain_start_point();

    debug!(
        "ordering {} layers with roles [{}]",
        layers.len(),
        order
            .roles
            .iter()
            .map(|r| r.name())
            .collect::<Vec<_>>()
            .join(", ")
    );

    layers.par_iter_mut().for_each(|collection| {
        order.apply(collection);
        collection.chain_from(start);
    });

    if log_enabled!(Level::Debug) {
        let tally = RoleTally::of(layers);
        debug!(
            "ordered {} perimeter, {} infill, {} support, {} other entities",
            tally.perimeter, tally.infill, tally.support, tally.other
        );
    }
}
