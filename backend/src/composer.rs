//! Rate composition
//!
//! Turns a resolved slab rate into a taxed total and derives the luggage and
//! joint-product variants.
//!
//! ```text
//! base           = Σ unit_rate × multiplier
//! surcharge      = base × 2%
//! after          = base + surcharge
//! tax            = after × 5%
//! total          = after + tax
//!
//! luggage total  = ceil(total_L × 1.5)                  (markup after tax)
//! JPP total      = ceil((base_P × 1.1) × 1.02 × 1.05)   (markup before surcharge)
//! ```
//!
//! Intermediate values are never rounded. Only derived totals are rounded up.

use crate::config::TariffConfig;
use crate::error::RateError;
use crate::models::{
    ceil_currency, JointProductRate, LuggageRate, RateBreakdown, RateQuote, ScaleCode,
    ScaleSelection,
};
use crate::resolver::resolve_distance_band;
use crate::routes::{Route, RouteRates};
use crate::table::SlabTable;
use crate::weight::weight_breakdown;
use tracing::debug;

/// Rate engine over one loaded table
///
/// The table is borrowed immutably for the lifetime of the engine; every
/// query is a pure function of `(table, config, distance, weight, scale)`.
///
/// # Example
/// ```
/// use parcel_rate_core::{RateEngine, ScaleCode, SlabTable};
///
/// let table = SlabTable::from_json(r#"{"L": {"1-50": {"1-10": 7.53, "11-20": 15.06}}}"#).unwrap();
/// let engine = RateEngine::new(&table);
///
/// let rate = engine.compute_rate(25.0, 15.0, ScaleCode::Luggage).unwrap();
/// assert_eq!(rate.base_rate, 15.06);
/// assert_eq!(rate.rounded_total(), 17.0);
/// ```
#[derive(Debug, Clone)]
pub struct RateEngine<'a> {
    table: &'a SlabTable,
    config: TariffConfig,
}

impl<'a> RateEngine<'a> {
    /// Engine with the published tariff factors
    pub fn new(table: &'a SlabTable) -> Self {
        Self {
            table,
            config: TariffConfig::default(),
        }
    }

    /// Engine with custom tariff factors
    ///
    /// # Errors
    /// `RateError::InvalidConfig` if the config fails validation.
    pub fn with_config(table: &'a SlabTable, config: TariffConfig) -> Result<Self, RateError> {
        config.validate()?;
        Ok(Self { table, config })
    }

    pub fn table(&self) -> &SlabTable {
        self.table
    }

    pub fn config(&self) -> &TariffConfig {
        &self.config
    }

    /// Rate for one scale
    ///
    /// A scale without data for the resolved band yields an all-zero
    /// breakdown rather than an error.
    ///
    /// # Errors
    /// `RateError::Precondition` if distance or weight is not a positive
    /// finite number.
    pub fn compute_rate(
        &self,
        distance_km: f64,
        weight_kg: f64,
        scale: ScaleCode,
    ) -> Result<RateBreakdown, RateError> {
        check_positive("distance", distance_km)?;
        check_positive("weight", weight_kg)?;

        let Some(band) = resolve_distance_band(distance_km, self.table, scale)? else {
            debug!(scale = %scale, "Scale has no distance bands");
            return Ok(RateBreakdown::no_data(scale, distance_km, weight_kg));
        };
        let Some(slabs) = self.table.slabs(scale, band) else {
            debug!(scale = %scale, band = %band, "No rates for distance band");
            return Ok(RateBreakdown::no_data(scale, distance_km, weight_kg));
        };

        let lines = weight_breakdown(weight_kg, slabs);
        if lines.is_empty() {
            debug!(scale = %scale, band = %band, "Distance band has no weight slabs");
            return Ok(RateBreakdown::no_data(scale, distance_km, weight_kg));
        }
        let base_rate: f64 = lines.iter().map(|line| line.amount()).sum();

        let development_surcharge = base_rate * self.config.development_surcharge_rate;
        let rate_after_surcharge = base_rate + development_surcharge;
        let tax = rate_after_surcharge * self.config.tax_rate;
        let total_rate = rate_after_surcharge + tax;

        Ok(RateBreakdown {
            scale,
            distance_km,
            weight_kg,
            distance_band: Some(band.to_string()),
            base_rate,
            development_surcharge,
            rate_after_surcharge,
            tax,
            total_rate,
            rate_per_unit_weight: total_rate / weight_kg,
            lines,
        })
    }

    /// Luggage variant from a scale L breakdown
    ///
    /// Markup on the taxed total, no second tax pass.
    pub fn luggage_rate(&self, luggage: &RateBreakdown) -> LuggageRate {
        let marked_up_rate = luggage.total_rate * self.config.luggage_markup;
        LuggageRate {
            marked_up_rate,
            luggage_tax: marked_up_rate * self.config.tax_rate,
            total: ceil_currency(marked_up_rate),
            rate_per_unit_weight: per_unit(marked_up_rate, luggage.weight_kg),
        }
    }

    /// Joint-product variant from a scale P breakdown
    ///
    /// Markup on the base rate, then the normal surcharge and tax.
    pub fn joint_product_rate(&self, premier: &RateBreakdown) -> JointProductRate {
        let base = premier.base_rate * self.config.joint_product_markup;
        let development_surcharge = base * self.config.development_surcharge_rate;
        let rate_after_surcharge = base + development_surcharge;
        let tax = rate_after_surcharge * self.config.tax_rate;
        let unrounded_total = rate_after_surcharge + tax;

        JointProductRate {
            base,
            development_surcharge,
            rate_after_surcharge,
            tax,
            unrounded_total,
            total: ceil_currency(unrounded_total),
            rate_per_unit_weight: per_unit(unrounded_total, premier.weight_kg),
        }
    }

    /// Rates for every selected scale plus the derived variants
    pub fn quote(
        &self,
        distance_km: f64,
        weight_kg: f64,
        selection: ScaleSelection,
    ) -> Result<RateQuote, RateError> {
        let scales = selection
            .scales()
            .into_iter()
            .map(|scale| self.compute_rate(distance_km, weight_kg, scale))
            .collect::<Result<Vec<_>, _>>()?;

        let mut quote = RateQuote {
            distance_km,
            weight_kg,
            scales,
            luggage: None,
            joint_product: None,
        };
        quote.luggage = quote
            .scale(ScaleCode::Luggage)
            .filter(|b| b.total_rate > 0.0)
            .map(|b| self.luggage_rate(b));
        quote.joint_product = quote
            .scale(ScaleCode::Premier)
            .filter(|b| b.base_rate > 0.0)
            .map(|b| self.joint_product_rate(b));

        Ok(quote)
    }

    /// All-scale quote for every route, in route order
    pub fn route_sheet(&self, routes: &[Route], weight_kg: f64) -> Result<Vec<RouteRates>, RateError> {
        routes
            .iter()
            .map(|route| {
                let quote = self.quote(f64::from(route.distance_km), weight_kg, ScaleSelection::All)?;
                Ok(RouteRates {
                    route: route.clone(),
                    quote,
                })
            })
            .collect()
    }
}

fn check_positive(field: &'static str, value: f64) -> Result<(), RateError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(RateError::Precondition { field, value })
    }
}

fn per_unit(amount: f64, weight_kg: f64) -> f64 {
    if weight_kg > 0.0 {
        amount / weight_kg
    } else {
        0.0
    }
}
