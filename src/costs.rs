//! This module holds the algorithm that costs a piece.
//!
//! Costing is a pure function of a piece's measurements, its clay source, and
//! the studio's [Pricing]. Nothing here rounds: rounding to two places happens
//! when a value is formatted for display.
//!
//! [Pricing]: ../pricing/struct.Pricing.html

use crate::{
    models::piece::{ClaySource, Measurements},
    pricing::Pricing,
};
use getset::CopyGetters;
use serde::{Serialize, Deserialize};

/// The four cost fields derived for every piece.
#[derive(Clone, Copy, Debug, Default, PartialEq, CopyGetters, Serialize, Deserialize)]
#[getset(get_copy = "pub")]
pub struct PieceCosts {
    /// What the clay cost (zero if the piece used no tracked clay)
    clay: f64,
    /// Bisque firing, by weight
    firing: f64,
    /// Glazing, by bounding-box volume
    glaze: f64,
    /// `firing + glaze + clay`
    total: f64,
}

impl PieceCosts {
    /// Build a cost set from its three components. The total is always derived
    /// here, so it can never disagree with its parts.
    pub fn from_components(clay: f64, firing: f64, glaze: f64) -> Self {
        Self {
            clay,
            firing,
            glaze,
            total: firing + glaze + clay,
        }
    }
}

/// Cost a piece.
///
/// `own_clay_price_per_kg` is only consulted when `clay` is
/// `ClaySource::Own`.
pub fn calculate_costs(measurements: &Measurements, clay: ClaySource, own_clay_price_per_kg: f64, pricing: &Pricing) -> PieceCosts {
    let weight = measurements.weight_kg();
    let clay_cost = match clay {
        ClaySource::Studio => weight * pricing.studio_clay_per_kg(),
        ClaySource::Own => weight * own_clay_price_per_kg,
        ClaySource::None => 0.0,
    };
    let firing = weight * pricing.firing_per_kg();
    let volume = measurements.volume_cm3();
    let glaze = volume * pricing.glaze_per_cm3();
    PieceCosts::from_components(clay_cost, firing, glaze)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn measurements() -> Measurements {
        Measurements::new(2.0, 10.0, 10.0, 5.0)
    }

    #[test]
    fn studio_clay() {
        let costs = calculate_costs(&measurements(), ClaySource::Studio, 0.0, &Pricing::standard());
        assert_eq!(costs.clay(), 14.0);
        assert_eq!(costs.firing(), 26.0);
        assert_eq!(costs.glaze(), 500.0 * 0.013);
        assert!((costs.glaze() - 6.5).abs() < 1e-9);
        assert!((costs.total() - 46.5).abs() < 1e-9);
    }

    #[test]
    fn own_clay() {
        let costs = calculate_costs(&measurements(), ClaySource::Own, 5.0, &Pricing::standard());
        assert_eq!(costs.clay(), 10.0);
        assert_eq!(costs.firing(), 26.0);
        assert!((costs.total() - 42.5).abs() < 1e-9);
    }

    #[test]
    fn no_clay_ignores_own_price() {
        let costs = calculate_costs(&measurements(), ClaySource::None, 99.0, &Pricing::standard());
        assert_eq!(costs.clay(), 0.0);
        assert_eq!(costs.total(), costs.firing() + costs.glaze());

        // studio clay ignores it too
        let costs = calculate_costs(&measurements(), ClaySource::Studio, 99.0, &Pricing::standard());
        assert_eq!(costs.clay(), 14.0);
    }

    #[test]
    fn total_is_sum_of_parts() {
        let samples = vec![
            (Measurements::new(0.337, 7.25, 8.1, 8.1), ClaySource::Studio, 0.0),
            (Measurements::new(1.9, 21.3, 12.0, 12.0), ClaySource::Own, 6.35),
            (Measurements::new(0.0, 0.0, 0.0, 0.0), ClaySource::None, 0.0),
            (Measurements::new(4.75, 33.3, 19.9, 0.7), ClaySource::Own, 0.1),
        ];
        for (m, clay, own) in samples {
            let costs = calculate_costs(&m, clay, own, &Pricing::standard());
            assert_eq!(costs.total(), costs.firing() + costs.glaze() + costs.clay());
        }
    }

    #[test]
    fn deterministic() {
        let m = Measurements::new(1.234, 5.67, 8.9, 10.11);
        let pricing = Pricing::new(12.5, 0.021, 6.75);
        let costs1 = calculate_costs(&m, ClaySource::Studio, 0.0, &pricing);
        let costs2 = calculate_costs(&m, ClaySource::Studio, 0.0, &pricing);
        assert_eq!(costs1, costs2);
        assert_eq!(costs1.total().to_bits(), costs2.total().to_bits());
    }

    #[test]
    fn custom_pricing() {
        let pricing = Pricing::new(10.0, 0.02, 8.0);
        let costs = calculate_costs(&measurements(), ClaySource::Studio, 0.0, &pricing);
        assert_eq!(costs.clay(), 16.0);
        assert_eq!(costs.firing(), 20.0);
        assert!((costs.glaze() - 10.0).abs() < 1e-9);
        assert!((costs.total() - 46.0).abs() < 1e-9);
    }

    #[test]
    fn does_not_reject_odd_input() {
        let m = Measurements::new(-1.0, 10.0, 10.0, 5.0);
        let costs = calculate_costs(&m, ClaySource::Studio, 0.0, &Pricing::standard());
        assert_eq!(costs.firing(), -13.0);
        assert_eq!(costs.clay(), -7.0);
    }
}
