//! # Calculator Registry
//!
//! The catalog of every trade calculator, in display order. Each entry maps
//! a [`CalculatorId`] to a description, search keywords, and the module that
//! implements it.
//!
//! ## Example
//!
//! ```rust
//! use calc_core::registry::{get_calculator, CalculatorId};
//!
//! let descriptor = get_calculator("concrete").unwrap();
//! assert_eq!(descriptor.id, CalculatorId::Concrete);
//! assert_eq!(descriptor.load().meta().id, CalculatorId::Concrete);
//!
//! assert!(get_calculator("pool").is_err());
//! ```

use std::fmt;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::calculators::{
    CalculatorModule,
    ConcreteCalculator,
    DrywallCalculator,
    InsulationCalculator,
    LaborCalculator,
    PaintCalculator,
    PlaceholderCalculator,
};
use crate::errors::{CalcError, CalcResult};

// ============================================================================
// Identifiers
// ============================================================================

/// Registry key of a calculator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CalculatorId {
    Concrete,
    Framing,
    Drywall,
    Paint,
    Roofing,
    Flooring,
    Insulation,
    Decking,
    Fencing,
    Siding,
    Tile,
    Brick,
    Excavation,
    Gravel,
    Asphalt,
    Stairs,
    Electrical,
    Plumbing,
    Hvac,
    Labor,
}

impl CalculatorId {
    /// The lowercase key used in URLs, the CLI and saved preferences
    pub fn as_str(&self) -> &'static str {
        match self {
            CalculatorId::Concrete => "concrete",
            CalculatorId::Framing => "framing",
            CalculatorId::Drywall => "drywall",
            CalculatorId::Paint => "paint",
            CalculatorId::Roofing => "roofing",
            CalculatorId::Flooring => "flooring",
            CalculatorId::Insulation => "insulation",
            CalculatorId::Decking => "decking",
            CalculatorId::Fencing => "fencing",
            CalculatorId::Siding => "siding",
            CalculatorId::Tile => "tile",
            CalculatorId::Brick => "brick",
            CalculatorId::Excavation => "excavation",
            CalculatorId::Gravel => "gravel",
            CalculatorId::Asphalt => "asphalt",
            CalculatorId::Stairs => "stairs",
            CalculatorId::Electrical => "electrical",
            CalculatorId::Plumbing => "plumbing",
            CalculatorId::Hvac => "hvac",
            CalculatorId::Labor => "labor",
        }
    }

    /// Load the module implementing this calculator.
    pub fn module(&self) -> &'static dyn CalculatorModule {
        match self {
            CalculatorId::Concrete => &CONCRETE,
            CalculatorId::Drywall => &DRYWALL,
            CalculatorId::Paint => &PAINT,
            CalculatorId::Insulation => &INSULATION,
            CalculatorId::Labor => &LABOR,
            CalculatorId::Framing => &FRAMING,
            CalculatorId::Roofing => &ROOFING,
            CalculatorId::Flooring => &FLOORING,
            CalculatorId::Decking => &DECKING,
            CalculatorId::Fencing => &FENCING,
            CalculatorId::Siding => &SIDING,
            CalculatorId::Tile => &TILE,
            CalculatorId::Brick => &BRICK,
            CalculatorId::Excavation => &EXCAVATION,
            CalculatorId::Gravel => &GRAVEL,
            CalculatorId::Asphalt => &ASPHALT,
            CalculatorId::Stairs => &STAIRS,
            CalculatorId::Electrical => &ELECTRICAL,
            CalculatorId::Plumbing => &PLUMBING,
            CalculatorId::Hvac => &HVAC,
        }
    }
}

impl fmt::Display for CalculatorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for CalculatorId {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase();
        REGISTRY
            .iter()
            .map(|d| d.id)
            .find(|id| id.as_str() == key)
            .ok_or_else(|| CalcError::calculator_not_found(s))
    }
}

/// Catalog grouping of calculators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CalculatorCategory {
    /// Concrete and masonry
    Masonry,
    /// Framing and stairs
    Structure,
    Interior,
    Exterior,
    /// Earthwork and paving
    Sitework,
    /// Electrical, plumbing, HVAC
    Mechanical,
    /// Labor and markup
    Costs,
}

impl CalculatorCategory {
    pub fn display_name(&self) -> &'static str {
        match self {
            CalculatorCategory::Masonry => "Concrete & Masonry",
            CalculatorCategory::Structure => "Structure",
            CalculatorCategory::Interior => "Interior",
            CalculatorCategory::Exterior => "Exterior",
            CalculatorCategory::Sitework => "Sitework",
            CalculatorCategory::Mechanical => "Mechanical",
            CalculatorCategory::Costs => "Costs & Markup",
        }
    }
}

// ============================================================================
// Module instances
// ============================================================================

static CONCRETE: ConcreteCalculator = ConcreteCalculator;
static DRYWALL: DrywallCalculator = DrywallCalculator;
static PAINT: PaintCalculator = PaintCalculator;
static INSULATION: InsulationCalculator = InsulationCalculator;
static LABOR: LaborCalculator = LaborCalculator;

static FRAMING: PlaceholderCalculator =
    PlaceholderCalculator::new(CalculatorId::Framing, "Framing Calculator", CalculatorCategory::Structure);
static ROOFING: PlaceholderCalculator =
    PlaceholderCalculator::new(CalculatorId::Roofing, "Roofing Calculator", CalculatorCategory::Exterior);
static FLOORING: PlaceholderCalculator =
    PlaceholderCalculator::new(CalculatorId::Flooring, "Flooring Calculator", CalculatorCategory::Interior);
static DECKING: PlaceholderCalculator =
    PlaceholderCalculator::new(CalculatorId::Decking, "Decking Calculator", CalculatorCategory::Exterior);
static FENCING: PlaceholderCalculator =
    PlaceholderCalculator::new(CalculatorId::Fencing, "Fencing Calculator", CalculatorCategory::Exterior);
static SIDING: PlaceholderCalculator =
    PlaceholderCalculator::new(CalculatorId::Siding, "Siding Calculator", CalculatorCategory::Exterior);
static TILE: PlaceholderCalculator =
    PlaceholderCalculator::new(CalculatorId::Tile, "Tile Calculator", CalculatorCategory::Interior);
static BRICK: PlaceholderCalculator =
    PlaceholderCalculator::new(CalculatorId::Brick, "Brick Calculator", CalculatorCategory::Masonry);
static EXCAVATION: PlaceholderCalculator =
    PlaceholderCalculator::new(CalculatorId::Excavation, "Excavation Calculator", CalculatorCategory::Sitework);
static GRAVEL: PlaceholderCalculator =
    PlaceholderCalculator::new(CalculatorId::Gravel, "Gravel Calculator", CalculatorCategory::Sitework);
static ASPHALT: PlaceholderCalculator =
    PlaceholderCalculator::new(CalculatorId::Asphalt, "Asphalt Paving Calculator", CalculatorCategory::Sitework);
static STAIRS: PlaceholderCalculator =
    PlaceholderCalculator::new(CalculatorId::Stairs, "Stair Calculator", CalculatorCategory::Structure);
static ELECTRICAL: PlaceholderCalculator =
    PlaceholderCalculator::new(CalculatorId::Electrical, "Electrical Calculator", CalculatorCategory::Mechanical);
static PLUMBING: PlaceholderCalculator =
    PlaceholderCalculator::new(CalculatorId::Plumbing, "Plumbing Calculator", CalculatorCategory::Mechanical);
static HVAC: PlaceholderCalculator =
    PlaceholderCalculator::new(CalculatorId::Hvac, "HVAC Calculator", CalculatorCategory::Mechanical);

// ============================================================================
// Registry
// ============================================================================

/// One catalog entry: what a calculator is and how to find it.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct CalculatorDescriptor {
    pub id: CalculatorId,
    pub description: &'static str,
    /// Extra search terms beyond the title and id
    pub keywords: &'static [&'static str],
}

impl CalculatorDescriptor {
    const fn new(id: CalculatorId, description: &'static str, keywords: &'static [&'static str]) -> Self {
        Self { id, description, keywords }
    }

    /// Resolve the module behind this entry.
    pub fn load(&self) -> &'static dyn CalculatorModule {
        self.id.module()
    }
}

/// Every calculator, in catalog order.
pub static REGISTRY: &[CalculatorDescriptor] = &[
    CalculatorDescriptor::new(
        CalculatorId::Concrete,
        "Cubic yards and premix bags for a slab, with waste and cost",
        &["slab", "cement", "yards", "footing", "patio", "driveway"],
    ),
    CalculatorDescriptor::new(
        CalculatorId::Framing,
        "Studs, plates and headers for wood-framed walls",
        &["studs", "lumber", "wall", "2x4", "plates"],
    ),
    CalculatorDescriptor::new(
        CalculatorId::Drywall,
        "Sheets of gypsum board for walls and ceilings",
        &["sheetrock", "gypsum", "wallboard", "sheets", "ceiling"],
    ),
    CalculatorDescriptor::new(
        CalculatorId::Paint,
        "Gallons of paint by area, coats and coverage",
        &["gallons", "primer", "coats", "walls", "interior"],
    ),
    CalculatorDescriptor::new(
        CalculatorId::Roofing,
        "Shingle squares and underlayment for a roof",
        &["shingles", "squares", "roof", "underlayment", "pitch"],
    ),
    CalculatorDescriptor::new(
        CalculatorId::Flooring,
        "Boxes of plank, laminate or carpet for a floor",
        &["laminate", "hardwood", "vinyl", "carpet", "planks"],
    ),
    CalculatorDescriptor::new(
        CalculatorId::Insulation,
        "Batt insulation bags and depth for a target R-value",
        &["batts", "r-value", "attic", "fiberglass", "bags"],
    ),
    CalculatorDescriptor::new(
        CalculatorId::Decking,
        "Deck boards, joists and fasteners",
        &["deck", "boards", "joists", "composite"],
    ),
    CalculatorDescriptor::new(
        CalculatorId::Fencing,
        "Posts, rails and pickets for a fence line",
        &["fence", "posts", "pickets", "rails"],
    ),
    CalculatorDescriptor::new(
        CalculatorId::Siding,
        "Siding squares for exterior walls",
        &["vinyl", "cladding", "exterior", "walls"],
    ),
    CalculatorDescriptor::new(
        CalculatorId::Tile,
        "Tiles, thinset and grout for floors and walls",
        &["ceramic", "porcelain", "grout", "backsplash"],
    ),
    CalculatorDescriptor::new(
        CalculatorId::Brick,
        "Bricks and mortar for a wall",
        &["masonry", "mortar", "block", "veneer"],
    ),
    CalculatorDescriptor::new(
        CalculatorId::Excavation,
        "Cut volume and truckloads for digging",
        &["dig", "dirt", "soil", "trench", "yards"],
    ),
    CalculatorDescriptor::new(
        CalculatorId::Gravel,
        "Tons of gravel or crushed stone for a base",
        &["stone", "tons", "base", "aggregate", "driveway"],
    ),
    CalculatorDescriptor::new(
        CalculatorId::Asphalt,
        "Tons of hot-mix asphalt for paving",
        &["paving", "blacktop", "driveway", "tons"],
    ),
    CalculatorDescriptor::new(
        CalculatorId::Stairs,
        "Rise, run and stringer layout for a stair",
        &["steps", "stringer", "rise", "run", "treads"],
    ),
    CalculatorDescriptor::new(
        CalculatorId::Electrical,
        "Outlets, circuits and wire for a room",
        &["wiring", "outlets", "circuits", "wire"],
    ),
    CalculatorDescriptor::new(
        CalculatorId::Plumbing,
        "Fixtures and pipe runs for a bathroom or kitchen",
        &["pipe", "fixtures", "water", "drain"],
    ),
    CalculatorDescriptor::new(
        CalculatorId::Hvac,
        "Heating and cooling load by floor area",
        &["heating", "cooling", "btu", "furnace", "air"],
    ),
    CalculatorDescriptor::new(
        CalculatorId::Labor,
        "Crew hours through burden, overhead and profit",
        &["markup", "overhead", "profit", "burden", "wages", "estimate"],
    ),
];

/// Look up a calculator by its registry key.
pub fn get_calculator(id: &str) -> CalcResult<&'static CalculatorDescriptor> {
    let id: CalculatorId = id.parse()?;
    REGISTRY
        .iter()
        .find(|d| d.id == id)
        .ok_or_else(|| CalcError::calculator_not_found(id.as_str()))
}

// ============================================================================
// Catalog
// ============================================================================

/// Availability shown in the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CalculatorStatus {
    Ready,
    /// Listed, but only carries the placeholder contract
    NotImplemented,
    /// The module could not describe itself
    Unavailable,
}

/// Descriptor merged with the module's own metadata.
#[derive(Debug, Clone, Serialize)]
pub struct CatalogEntry {
    pub id: CalculatorId,
    pub title: String,
    /// `None` when the module is unavailable
    pub category: Option<CalculatorCategory>,
    pub description: &'static str,
    pub keywords: &'static [&'static str],
    pub status: CalculatorStatus,
}

impl CatalogEntry {
    fn from_descriptor(descriptor: &CalculatorDescriptor) -> Self {
        Self::resolve(descriptor, descriptor.load())
    }

    fn resolve(descriptor: &CalculatorDescriptor, module: &dyn CalculatorModule) -> Self {
        let meta = match catch_unwind(AssertUnwindSafe(|| module.meta())) {
            Ok(meta) if meta.id == descriptor.id => Some(meta),
            Ok(meta) => {
                warn!(key = %descriptor.id, reported = %meta.id, "Calculator id does not match its registry key");
                None
            }
            Err(_) => {
                warn!(key = %descriptor.id, "Calculator metadata could not be loaded");
                None
            }
        };

        match meta {
            Some(meta) => CatalogEntry {
                id: descriptor.id,
                title: meta.title.to_string(),
                category: Some(meta.category),
                description: descriptor.description,
                keywords: descriptor.keywords,
                status: if module.is_implemented() {
                    CalculatorStatus::Ready
                } else {
                    CalculatorStatus::NotImplemented
                },
            },
            None => CatalogEntry {
                id: descriptor.id,
                title: descriptor.id.as_str().to_string(),
                category: None,
                description: descriptor.description,
                keywords: descriptor.keywords,
                status: CalculatorStatus::Unavailable,
            },
        }
    }
}

/// Catalog listing for every registry entry.
///
/// A module that fails to describe itself is listed as unavailable rather
/// than hiding the rest of the catalog.
pub fn all_calculator_meta() -> Vec<CatalogEntry> {
    REGISTRY.iter().map(CatalogEntry::from_descriptor).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculators::CalculatorMeta;
    use crate::engine::{ComputationResult, InputValues};

    #[test]
    fn test_registry_has_every_id_once() {
        assert_eq!(REGISTRY.len(), 20);
        let mut ids: Vec<CalculatorId> = REGISTRY.iter().map(|d| d.id).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 20);
    }

    #[test]
    fn test_module_ids_match_registry_keys() {
        for descriptor in REGISTRY {
            assert_eq!(descriptor.load().meta().id, descriptor.id);
        }
    }

    #[test]
    fn test_parse_ids() {
        assert_eq!("Drywall".parse::<CalculatorId>().unwrap(), CalculatorId::Drywall);
        assert_eq!(" hvac ".parse::<CalculatorId>().unwrap(), CalculatorId::Hvac);
        let err = "pool".parse::<CalculatorId>().unwrap_err();
        assert_eq!(err.error_code(), "CALCULATOR_NOT_FOUND");
    }

    #[test]
    fn test_serde_key_matches_as_str() {
        for descriptor in REGISTRY {
            let json = serde_json::to_string(&descriptor.id).unwrap();
            assert_eq!(json, format!("\"{}\"", descriptor.id.as_str()));
        }
    }

    #[test]
    fn test_catalog_status() {
        let catalog = all_calculator_meta();
        let ready: Vec<CalculatorId> = catalog
            .iter()
            .filter(|e| e.status == CalculatorStatus::Ready)
            .map(|e| e.id)
            .collect();
        assert_eq!(
            ready,
            vec![
                CalculatorId::Concrete,
                CalculatorId::Drywall,
                CalculatorId::Paint,
                CalculatorId::Insulation,
                CalculatorId::Labor
            ]
        );
        assert!(catalog.iter().all(|e| e.status != CalculatorStatus::Unavailable));
    }

    struct Mislabeled;

    impl CalculatorModule for Mislabeled {
        fn meta(&self) -> CalculatorMeta {
            CalculatorMeta {
                id: CalculatorId::Paint,
                title: "Wrong",
                category: CalculatorCategory::Interior,
            }
        }

        fn compute(&self, _inputs: &InputValues) -> CalcResult<ComputationResult> {
            Err(CalcError::internal("unused"))
        }

        fn explain(&self, _inputs: &InputValues) -> String {
            String::new()
        }
    }

    struct Broken;

    impl CalculatorModule for Broken {
        fn meta(&self) -> CalculatorMeta {
            panic!("metadata unavailable")
        }

        fn compute(&self, _inputs: &InputValues) -> CalcResult<ComputationResult> {
            Err(CalcError::internal("unused"))
        }

        fn explain(&self, _inputs: &InputValues) -> String {
            String::new()
        }
    }

    #[test]
    fn test_bad_modules_listed_as_unavailable() {
        let descriptor = get_calculator("tile").unwrap();

        let mislabeled = CatalogEntry::resolve(descriptor, &Mislabeled);
        assert_eq!(mislabeled.status, CalculatorStatus::Unavailable);
        assert_eq!(mislabeled.title, "tile");
        assert_eq!(mislabeled.category, None);

        let broken = CatalogEntry::resolve(descriptor, &Broken);
        assert_eq!(broken.status, CalculatorStatus::Unavailable);
        assert_eq!(broken.description, descriptor.description);
    }
}
