//! Extrusion roles.
//!
//! Every extrusion entity is tagged with an [`ExtrusionRole`]. Besides the
//! concrete feature types, the enumeration carries three sentinels that never
//! describe a printable feature: [`ExtrusionRole::None`] (unset or unknown),
//! [`ExtrusionRole::Mixed`] (a collection of differing roles) and
//! [`ExtrusionRole::Count`] (terminator).

use serde::{Deserialize, Serialize};
use std::fmt;

/// Type of extrusion for an entity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ExtrusionRole {
    /// Unset. Also the result of looking up an unknown role name.
    #[default]
    None,
    /// Internal perimeter.
    Perimeter,
    /// External (outer) perimeter.
    ExternalPerimeter,
    /// Perimeter printed over air.
    OverhangPerimeter,
    /// Sparse infill.
    InternalInfill,
    /// Internal solid infill.
    SolidInfill,
    /// Top solid infill (visible surface).
    TopSolidInfill,
    /// Ironing pass over top surfaces.
    Ironing,
    /// Bridge infill (over gaps).
    BridgeInfill,
    /// Gap fill (thin areas).
    GapFill,
    /// Skirt/brim.
    Skirt,
    /// Support material.
    SupportMaterial,
    /// Support interface.
    SupportMaterialInterface,
    /// Wipe tower.
    WipeTower,
    /// Custom (user-defined).
    Custom,
    /// Collection containing entities of different roles.
    Mixed,
    /// Number of roles. Terminator only.
    Count,
}

impl ExtrusionRole {
    /// All concrete roles, in declaration order.
    pub const CONCRETE: [ExtrusionRole; 14] = [
        ExtrusionRole::Perimeter,
        ExtrusionRole::ExternalPerimeter,
        ExtrusionRole::OverhangPerimeter,
        ExtrusionRole::InternalInfill,
        ExtrusionRole::SolidInfill,
        ExtrusionRole::TopSolidInfill,
        ExtrusionRole::Ironing,
        ExtrusionRole::BridgeInfill,
        ExtrusionRole::GapFill,
        ExtrusionRole::Skirt,
        ExtrusionRole::SupportMaterial,
        ExtrusionRole::SupportMaterialInterface,
        ExtrusionRole::WipeTower,
        ExtrusionRole::Custom,
    ];

    /// Look up a role by its human-readable name.
    ///
    /// Unknown names yield [`ExtrusionRole::None`] rather than an error;
    /// callers filter on [`is_concrete`](Self::is_concrete).
    pub fn from_name(name: &str) -> ExtrusionRole {
        match name {
            "Perimeter" => ExtrusionRole::Perimeter,
            "External perimeter" => ExtrusionRole::ExternalPerimeter,
            "Overhang perimeter" => ExtrusionRole::OverhangPerimeter,
            "Internal infill" => ExtrusionRole::InternalInfill,
            "Solid infill" => ExtrusionRole::SolidInfill,
            "Top solid infill" => ExtrusionRole::TopSolidInfill,
            "Ironing" => ExtrusionRole::Ironing,
            "Bridge infill" => ExtrusionRole::BridgeInfill,
            "Gap fill" => ExtrusionRole::GapFill,
            "Skirt" | "Skirt/Brim" => ExtrusionRole::Skirt,
            "Support material" => ExtrusionRole::SupportMaterial,
            "Support material interface" => ExtrusionRole::SupportMaterialInterface,
            "Wipe tower" => ExtrusionRole::WipeTower,
            "Custom" => ExtrusionRole::Custom,
            "Mixed" => ExtrusionRole::Mixed,
            _ => ExtrusionRole::None,
        }
    }

    /// Human-readable name, the inverse of [`from_name`](Self::from_name).
    pub fn name(&self) -> &'static str {
        match self {
            ExtrusionRole::None => "",
            ExtrusionRole::Perimeter => "Perimeter",
            ExtrusionRole::ExternalPerimeter => "External perimeter",
            ExtrusionRole::OverhangPerimeter => "Overhang perimeter",
            ExtrusionRole::InternalInfill => "Internal infill",
            ExtrusionRole::SolidInfill => "Solid infill",
            ExtrusionRole::TopSolidInfill => "Top solid infill",
            ExtrusionRole::Ironing => "Ironing",
            ExtrusionRole::BridgeInfill => "Bridge infill",
            ExtrusionRole::GapFill => "Gap fill",
            ExtrusionRole::Skirt => "Skirt",
            ExtrusionRole::SupportMaterial => "Support material",
            ExtrusionRole::SupportMaterialInterface => "Support material interface",
            ExtrusionRole::WipeTower => "Wipe tower",
            ExtrusionRole::Custom => "Custom",
            ExtrusionRole::Mixed => "Mixed",
            ExtrusionRole::Count => "Count",
        }
    }

    /// Whether this role describes a printable feature (not a sentinel).
    #[inline]
    pub fn is_concrete(&self) -> bool {
        !matches!(
            self,
            ExtrusionRole::None | ExtrusionRole::Mixed | ExtrusionRole::Count
        )
    }

    /// Check if this role is a perimeter.
    pub fn is_perimeter(&self) -> bool {
        matches!(
            self,
            ExtrusionRole::Perimeter
                | ExtrusionRole::ExternalPerimeter
                | ExtrusionRole::OverhangPerimeter
        )
    }

    /// Check if this role is infill.
    pub fn is_infill(&self) -> bool {
        matches!(
            self,
            ExtrusionRole::InternalInfill
                | ExtrusionRole::SolidInfill
                | ExtrusionRole::TopSolidInfill
                | ExtrusionRole::BridgeInfill
        )
    }

    /// Check if this role is support.
    pub fn is_support(&self) -> bool {
        matches!(
            self,
            ExtrusionRole::SupportMaterial | ExtrusionRole::SupportMaterialInterface
        )
    }

    /// Feature name as written in `; FEATURE: <name>` G-code comments.
    pub fn feature_name(&self) -> &'static str {
        match self {
            ExtrusionRole::Perimeter => "Inner wall",
            ExtrusionRole::ExternalPerimeter => "Outer wall",
            ExtrusionRole::OverhangPerimeter => "Overhang wall",
            ExtrusionRole::InternalInfill => "Sparse infill",
            ExtrusionRole::SolidInfill => "Internal solid infill",
            ExtrusionRole::TopSolidInfill => "Top surface",
            ExtrusionRole::Ironing => "Ironing",
            ExtrusionRole::BridgeInfill => "Bridge",
            ExtrusionRole::GapFill => "Gap infill",
            ExtrusionRole::Skirt => "Skirt",
            ExtrusionRole::SupportMaterial => "Support",
            ExtrusionRole::SupportMaterialInterface => "Support interface",
            ExtrusionRole::WipeTower => "Prime tower",
            ExtrusionRole::Custom => "Custom",
            ExtrusionRole::None | ExtrusionRole::Mixed | ExtrusionRole::Count => "",
        }
    }
}

impl fmt::Display for ExtrusionRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExtrusionRole::None => f.write_str("<none>"),
            other => f.write_str(other.name()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_lookup_is_inverse() {
        for role in ExtrusionRole::CONCRETE {
            assert_eq!(ExtrusionRole::from_name(role.name()), role);
        }
    }

    #[test]
    fn test_unknown_name_is_none() {
        assert_eq!(ExtrusionRole::from_name("Infill"), ExtrusionRole::None);
        assert_eq!(ExtrusionRole::from_name("perimeter"), ExtrusionRole::None);
        assert_eq!(ExtrusionRole::from_name(""), ExtrusionRole::None);
    }

    #[test]
    fn test_sentinels_are_not_concrete() {
        assert!(!ExtrusionRole::None.is_concrete());
        assert!(!ExtrusionRole::Mixed.is_concrete());
        assert!(!ExtrusionRole::Count.is_concrete());
        assert!(ExtrusionRole::CONCRETE.iter().all(|r| r.is_concrete()));
        assert_eq!(ExtrusionRole::from_name("Mixed"), ExtrusionRole::Mixed);
    }

    #[test]
    fn test_legacy_skirt_name() {
        assert_eq!(ExtrusionRole::from_name("Skirt/Brim"), ExtrusionRole::Skirt);
    }

    #[test]
    fn test_classification() {
        assert!(ExtrusionRole::ExternalPerimeter.is_perimeter());
        assert!(ExtrusionRole::OverhangPerimeter.is_perimeter());
        assert!(!ExtrusionRole::InternalInfill.is_perimeter());

        assert!(ExtrusionRole::SolidInfill.is_infill());
        assert!(!ExtrusionRole::GapFill.is_infill());

        assert!(ExtrusionRole::SupportMaterialInterface.is_support());
        assert!(!ExtrusionRole::Skirt.is_support());
    }
}
