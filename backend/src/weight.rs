//! Weight slab breakdown
//!
//! One band is charged per consignment: the smallest band whose upper bound
//! holds the whole weight, or the largest band when none does. The band's
//! capacity is repeated `ceil(weight / upper_bound)` times.

use crate::models::BreakdownLine;
use crate::table::WeightSlab;

/// Break a weight down into slab units
///
/// Returns at most one line; empty when `slabs` is empty.
///
/// # Example
/// ```
/// use parcel_rate_core::{weight_breakdown, SlabTable, ScaleCode, Band};
///
/// let table = SlabTable::from_json(r#"{"L": {"1-50": {"1-10": 7.53, "11-20": 15.06}}}"#).unwrap();
/// let slabs = table.slabs(ScaleCode::Luggage, Band::parse("1-50").unwrap()).unwrap();
///
/// let lines = weight_breakdown(45.0, slabs);
/// assert_eq!(lines[0].weight_band, "11-20");
/// assert_eq!(lines[0].multiplier, 3);
/// ```
pub fn weight_breakdown(weight: f64, slabs: &[WeightSlab]) -> Vec<BreakdownLine> {
    let mut ordered: Vec<&WeightSlab> = slabs.iter().collect();
    // Stable: equal upper bounds keep source order
    ordered.sort_by_key(|slab| slab.band.high());

    let selected = ordered
        .iter()
        .find(|slab| weight <= f64::from(slab.band.high()))
        .or_else(|| ordered.last());

    let Some(slab) = selected else {
        return Vec::new();
    };

    let capacity = slab.band.high();
    let multiplier = slab_units(weight, capacity);

    vec![BreakdownLine {
        weight_band: slab.band.to_string(),
        weight,
        unit_rate: slab.unit_rate,
        multiplier,
        description: format!("{} × {}kg slab ({})", multiplier, capacity, slab.band),
    }]
}

/// `ceil(weight / capacity)`, never less than one unit
fn slab_units(weight: f64, capacity: u32) -> u64 {
    let units = (weight / f64::from(capacity)).ceil();
    if units < 1.0 {
        1
    } else {
        units as u64
    }
}
