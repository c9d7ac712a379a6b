//! The pricing rules the studio charges against each piece.
//!
//! These are fixed for the lifetime of a process. Changing a price means
//! shipping a new build (or a new config file), never editing a record.

use getset::CopyGetters;
use serde::{Serialize, Deserialize};

/// Cost of a bisque firing, per kilogram of piece weight.
pub const FIRING_PRICE_PER_KG: f64 = 13.0;

/// Cost of glazing, per cubic centimeter of bounding-box volume.
pub const GLAZE_PRICE_PER_CM3: f64 = 0.013;

/// Cost of clay bought from the studio, per kilogram.
pub const STUDIO_CLAY_PRICE_PER_KG: f64 = 7.0;

/// A set of unit prices used by the costing function.
#[derive(Clone, Copy, Debug, PartialEq, CopyGetters, Serialize, Deserialize)]
#[getset(get_copy = "pub")]
#[serde(default)]
pub struct Pricing {
    /// Currency per kg fired
    firing_per_kg: f64,
    /// Currency per cm³ glazed
    glaze_per_cm3: f64,
    /// Currency per kg of studio clay
    studio_clay_per_kg: f64,
}

impl Pricing {
    /// Create a custom price table.
    pub fn new(firing_per_kg: f64, glaze_per_cm3: f64, studio_clay_per_kg: f64) -> Self {
        Self {
            firing_per_kg,
            glaze_per_cm3,
            studio_clay_per_kg,
        }
    }

    /// The studio's standard prices.
    pub fn standard() -> Self {
        Self::new(FIRING_PRICE_PER_KG, GLAZE_PRICE_PER_CM3, STUDIO_CLAY_PRICE_PER_KG)
    }
}

impl Default for Pricing {
    fn default() -> Self {
        Self::standard()
    }
}
