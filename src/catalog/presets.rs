//! Built-in catalogs
//!
//! The starter crop table and soil profiles used when no configuration
//! supplies its own. Attribute order: nitrogen, phosphorus, potassium,
//! moisture (water-retention proxy).

use super::store::CatalogEntry;
use crate::error::Result;
use crate::vector::AttributeVector;
use serde::{Deserialize, Serialize};

/// Default attribute names, in vector order
pub const DEFAULT_ATTRIBUTES: [&str; 4] = ["nitrogen", "phosphorus", "potassium", "moisture"];

const CROPS: &[(&str, &str, [f64; 4])] = &[
    ("wheat", "Wheat", [80.0, 40.0, 40.0, 20.0]),
    ("rice", "Rice", [100.0, 60.0, 40.0, 80.0]),
    ("maize", "Maize", [60.0, 30.0, 30.0, 40.0]),
];

const SOILS: &[(&str, [f64; 4])] = &[
    ("Alluvial", [90.0, 50.0, 45.0, 30.0]),
    ("Black", [70.0, 40.0, 60.0, 50.0]),
    ("Clay", [50.0, 30.0, 30.0, 70.0]),
];

/// A named soil sample that can be used as a scoring query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SoilProfile {
    pub name: String,
    pub profile: AttributeVector,
}

/// Starter crop requirement table (wheat, rice, maize)
pub fn default_crops() -> Result<Vec<CatalogEntry>> {
    CROPS
        .iter()
        .map(|(id, label, values)| {
            Ok(CatalogEntry::new(*id, *label, AttributeVector::new(*values)?))
        })
        .collect()
}

/// Starter soil profiles (alluvial, black, clay)
pub fn default_soils() -> Result<Vec<SoilProfile>> {
    SOILS
        .iter()
        .map(|(name, values)| {
            Ok(SoilProfile {
                name: name.to_string(),
                profile: AttributeVector::new(*values)?,
            })
        })
        .collect()
}

/// Find a soil profile by case-insensitive name
pub fn find_soil<'a>(soils: &'a [SoilProfile], name: &str) -> Option<&'a SoilProfile> {
    soils.iter().find(|s| s.name.eq_ignore_ascii_case(name))
}
