//! Startup configuration: prices, how money is written, and how reports are
//! titled and named.
//!
//! Configuration is read once, as JSON. Every field is optional and falls back
//! to the studio's defaults, so an empty object is a valid config.

use crate::{
    error::{Error, Result},
    models::piece::CostPolicy,
    pricing::Pricing,
    report::{
        document::ReportOptions,
        format::CurrencyFormat,
    },
};
use getset::{CopyGetters, Getters};
use serde::{Serialize, Deserialize};
use std::path::Path;

/// The studio core's configuration.
#[derive(Clone, Debug, Default, PartialEq, Getters, CopyGetters, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    #[getset(get_copy = "pub")]
    pricing: Pricing,
    /// Price stored pieces again on load instead of trusting their stored
    /// costs.
    #[getset(get_copy = "pub")]
    recompute_on_load: bool,
    #[getset(get = "pub")]
    currency: CurrencyFormat,
    #[getset(get = "pub")]
    report: ReportOptions,
}

impl Config {
    /// Parse a JSON config.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| Error::Config(e.to_string()))
    }

    /// Read and parse a JSON config file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))?;
        let config = Self::from_json(&contents)?;
        tracing::info!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// How stored pieces should be treated when they're loaded.
    pub fn cost_policy(&self) -> CostPolicy {
        if self.recompute_on_load {
            CostPolicy::Recompute(self.pricing)
        } else {
            CostPolicy::Frozen
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_is_defaults() {
        let config = Config::from_json("{}").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.pricing(), Pricing::standard());
        assert_eq!(config.cost_policy(), CostPolicy::Frozen);
        assert_eq!(config.currency().format(7.0), "R$ 7,00");
        assert_eq!(config.report().file_prefix(), "studio_report");
    }

    #[test]
    fn reads_overrides() {
        let config = Config::from_json(r#"{
            "pricing": {"firing_per_kg": 14.0, "glaze_per_cm3": 0.015, "studio_clay_per_kg": 7.5},
            "recompute_on_load": true,
            "currency": {"symbol": "€"},
            "report": {"title": "Relatorio de Producao do Atelie"}
        }"#).unwrap();
        assert_eq!(config.pricing(), Pricing::new(14.0, 0.015, 7.5));
        assert_eq!(config.cost_policy(), CostPolicy::Recompute(Pricing::new(14.0, 0.015, 7.5)));
        assert_eq!(config.currency().symbol(), "€");
        assert_eq!(config.currency().decimal_separator(), ',');
        assert_eq!(config.report().title(), "Relatorio de Producao do Atelie");
        assert_eq!(config.report().file_prefix(), "studio_report");
    }

    #[test]
    fn rejects_bad_json() {
        assert!(matches!(Config::from_json("{\"pricing\": 3}"), Err(Error::Config(_))));
        assert!(matches!(Config::from_file("/nonexistent/studio.json"), Err(Error::Config(_))));
    }
}
