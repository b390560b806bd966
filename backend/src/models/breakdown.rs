//! Rate results
//!
//! All monetary values are unrounded `f64` currency units. Only the
//! `rounded_*` accessors and the derived totals apply ceiling rounding, so
//! presentation layers can format the raw figures however they like.

use crate::models::scale::ScaleCode;
use serde::{Deserialize, Serialize};

/// Slack absorbed before rounding a total up, so representation error such as
/// `150.00000000000003` does not cost a whole currency unit.
const CEIL_TOLERANCE: f64 = 1e-9;

/// Round a monetary total up to the next whole currency unit
///
/// Not an exact `ceil`: values within `CEIL_TOLERANCE` above a whole unit
/// round down to it, so f64 noise from the surcharge and tax products never
/// adds a unit.
///
/// # Example
/// ```
/// use parcel_rate_core::ceil_currency;
///
/// assert_eq!(ceil_currency(235.62), 236.0);
/// assert_eq!(ceil_currency(100.0 * 1.5), 150.0);
/// assert_eq!(ceil_currency(150.00000000000003), 150.0);
/// assert_eq!(ceil_currency(0.0), 0.0);
/// ```
pub fn ceil_currency(value: f64) -> f64 {
    let rounded = (value - CEIL_TOLERANCE).ceil();
    if rounded == 0.0 {
        // (-tolerance).ceil() is -0.0
        0.0
    } else {
        rounded
    }
}

/// One application of a weight slab
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreakdownLine {
    /// Weight band key, e.g. `"11-20"`
    pub weight_band: String,

    /// Total consignment weight covered by this line (kg)
    pub weight: f64,

    /// Rate for one slab of this band
    pub unit_rate: f64,

    /// Number of slab units charged
    pub multiplier: u64,

    /// e.g. `"3 × 20kg slab (11-20)"`
    pub description: String,
}

impl BreakdownLine {
    /// `unit_rate × multiplier`
    pub fn amount(&self) -> f64 {
        self.unit_rate * self.multiplier as f64
    }
}

/// Fully composed rate for one scale
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateBreakdown {
    pub scale: ScaleCode,

    /// Query distance (km)
    pub distance_km: f64,

    /// Query weight (kg)
    pub weight_kg: f64,

    /// Distance band the query resolved to, `None` when the scale had no data
    pub distance_band: Option<String>,

    pub base_rate: f64,
    pub development_surcharge: f64,
    pub rate_after_surcharge: f64,
    pub tax: f64,
    pub total_rate: f64,
    pub rate_per_unit_weight: f64,

    pub lines: Vec<BreakdownLine>,
}

impl RateBreakdown {
    /// All-zero result for a scale without tariff data
    pub fn no_data(scale: ScaleCode, distance_km: f64, weight_kg: f64) -> Self {
        Self {
            scale,
            distance_km,
            weight_kg,
            distance_band: None,
            base_rate: 0.0,
            development_surcharge: 0.0,
            rate_after_surcharge: 0.0,
            tax: 0.0,
            total_rate: 0.0,
            rate_per_unit_weight: 0.0,
            lines: Vec::new(),
        }
    }

    /// Whether the table had any rate for this query
    pub fn is_available(&self) -> bool {
        !self.lines.is_empty()
    }

    /// Total rounded up to a whole currency unit
    pub fn rounded_total(&self) -> f64 {
        ceil_currency(self.total_rate)
    }
}

/// Luggage variant derived from the scale L breakdown
///
/// The markup is applied to the already-taxed total. `luggage_tax` is
/// informational only and is not part of `total`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LuggageRate {
    /// `total_L × markup`, unrounded
    pub marked_up_rate: f64,

    /// `total_L × markup × tax_rate`, display only
    pub luggage_tax: f64,

    /// `ceil(total_L × markup)`
    pub total: f64,

    /// `marked_up_rate / weight`
    pub rate_per_unit_weight: f64,
}

/// Joint-product (JPP) variant derived from the scale P breakdown
///
/// Unlike luggage, the markup is applied to the base rate, before surcharge
/// and tax.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JointProductRate {
    /// `base_P × markup`
    pub base: f64,
    pub development_surcharge: f64,
    pub rate_after_surcharge: f64,
    pub tax: f64,

    /// `rate_after_surcharge + tax`, unrounded
    pub unrounded_total: f64,

    /// `ceil(unrounded_total)`
    pub total: f64,

    /// `unrounded_total / weight`
    pub rate_per_unit_weight: f64,
}

/// Every rate computed for one `(distance, weight, selection)` query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateQuote {
    pub distance_km: f64,
    pub weight_kg: f64,

    /// One breakdown per selected scale, in presentation order
    pub scales: Vec<RateBreakdown>,

    /// Present when scale L was quoted with a positive total
    pub luggage: Option<LuggageRate>,

    /// Present when scale P was quoted with a positive base rate
    pub joint_product: Option<JointProductRate>,
}

impl RateQuote {
    /// Breakdown for one scale, if it was part of the selection
    pub fn scale(&self, scale: ScaleCode) -> Option<&RateBreakdown> {
        self.scales.iter().find(|b| b.scale == scale)
    }
}
