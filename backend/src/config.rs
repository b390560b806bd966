//! Tariff configuration
//!
//! Surcharge, tax and derived-product factors. The defaults are the
//! published tariff; a JSON config may override any subset of them.

use crate::error::RateError;
use serde::{Deserialize, Serialize};

/// Factors applied on top of the slab rate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TariffConfig {
    /// Development surcharge as a fraction of the base rate (default 2%)
    pub development_surcharge_rate: f64,

    /// Tax as a fraction of the surcharge-inclusive rate (default 5%)
    pub tax_rate: f64,

    /// Multiplier on the fully taxed scale L total (default 1.5)
    pub luggage_markup: f64,

    /// Multiplier on the scale P base rate, before surcharge and tax (default 1.1)
    pub joint_product_markup: f64,
}

impl Default for TariffConfig {
    fn default() -> Self {
        Self {
            development_surcharge_rate: 0.02, // 2% DSC
            tax_rate: 0.05,                   // 5% GST
            luggage_markup: 1.5,              // +50%
            joint_product_markup: 1.1,        // +10%
        }
    }
}

impl TariffConfig {
    /// Parse a JSON config; missing fields keep their defaults
    ///
    /// The document must be an object and every key must name a factor.
    pub fn from_json(json: &str) -> Result<Self, RateError> {
        let value: serde_json::Value = serde_json::from_str(json)
            .map_err(|e| RateError::InvalidConfig(format!("Config parse failed: {}", e)))?;
        if !value.is_object() {
            return Err(RateError::InvalidConfig(
                "Config must be a JSON object".to_string(),
            ));
        }
        let config: TariffConfig = serde_json::from_value(value)
            .map_err(|e| RateError::InvalidConfig(format!("Config parse failed: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), RateError> {
        let non_negative = [
            ("development_surcharge_rate", self.development_surcharge_rate),
            ("tax_rate", self.tax_rate),
        ];
        for (name, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(RateError::InvalidConfig(format!(
                    "{} must be a non-negative finite number, got {}",
                    name, value
                )));
            }
        }

        let positive = [
            ("luggage_markup", self.luggage_markup),
            ("joint_product_markup", self.joint_product_markup),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(RateError::InvalidConfig(format!(
                    "{} must be a positive finite number, got {}",
                    name, value
                )));
            }
        }

        Ok(())
    }
}
