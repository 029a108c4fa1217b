//! Print configuration types.
//!
//! Only the options read by the ordering pass live here. Everything is
//! optional: an empty JSON object is a valid configuration and leaves the
//! planner's default order in charge.

use crate::extrusion::ExtrusionRole;
use crate::geometry::Point;
use crate::{CoordF, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::path::Path;

/// Print configuration controlling extrusion ordering.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrintConfig {
    /// Role names in print priority order, highest first.
    ///
    /// `None` means the option is not defined at all, which is not the same
    /// as an empty list for callers that distinguish the two; the ordering
    /// pass treats both as "no custom order".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_extrusion_role_order: Option<Vec<String>>,

    /// Keep the custom order as final and disable the automatic chaining pass.
    pub preserve_custom_order: bool,

    /// Start point for the chaining pass (mm). Defaults to the first entity.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chain_start: Option<[CoordF; 2]>,
}

impl PrintConfig {
    /// Create a new PrintConfig with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: set the custom role order.
    pub fn custom_extrusion_role_order<I, S>(mut self, roles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.custom_extrusion_role_order = Some(roles.into_iter().map(Into::into).collect());
        self
    }

    /// Builder method: pin the custom order.
    pub fn preserve_custom_order(mut self, preserve: bool) -> Self {
        self.preserve_custom_order = preserve;
        self
    }

    /// Builder method: set the chaining start point (mm).
    pub fn chain_start(mut self, x: CoordF, y: CoordF) -> Self {
        self.chain_start = Some([x, y]);
        self
    }

    /// Whether the custom role order option is defined.
    pub fn has_custom_extrusion_role_order(&self) -> bool {
        self.custom_extrusion_role_order.is_some()
    }

    /// The raw role names of the custom order, if defined.
    pub fn custom_role_names(&self) -> Option<&[String]> {
        self.custom_extrusion_role_order.as_deref()
    }

    /// Chaining start point in scaled coordinates.
    pub fn chain_start_point(&self) -> Option<Point> {
        self.chain_start.map(|[x, y]| Point::new_scale(x, y))
    }

    /// Parse a configuration from JSON.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a configuration from a JSON file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    /// Serialize to pretty JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Validate the configuration.
    ///
    /// The ordering pass itself never rejects names; it drops whatever does
    /// not resolve to a concrete role. This is where such entries get
    /// reported.
    pub fn validate(&self) -> std::result::Result<(), String> {
        let Some(names) = self.custom_role_names() else {
            return Ok(());
        };

        let mut seen = HashSet::new();
        for name in names {
            let role = ExtrusionRole::from_name(name);
            if !role.is_concrete() {
                return Err(format!(
                    "Unknown extrusion role '{}' in custom_extrusion_role_order",
                    name
                ));
            }
            if !seen.insert(role) {
                return Err(format!(
                    "Extrusion role '{}' listed more than once in custom_extrusion_role_order",
                    name
                ));
            }
        }
        Ok(())
    }
}

impl fmt::Display for PrintConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.custom_role_names() {
            Some(names) => write!(
                f,
                "PrintConfig(order=[{}], preserve={})",
                names.join(", "),
                self.preserve_custom_order
            ),
            None => write!(f, "PrintConfig(order=default)"),
        }
    }
}
