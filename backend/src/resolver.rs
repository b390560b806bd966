//! Distance band resolution
//!
//! 1. First band (source order) whose inclusive range contains the distance
//! 2. Otherwise the band whose midpoint is nearest; ties go to the earlier band
//!
//! Resolution is total: any finite non-negative distance maps to a band as
//! long as the scale has at least one.

use crate::error::RateError;
use crate::models::{Band, ScaleCode};
use crate::table::SlabTable;
use tracing::debug;

/// Map a distance to one of the scale's distance bands
///
/// Returns `Ok(None)` only when the scale has no bands at all.
///
/// # Errors
/// `RateError::Precondition` if `distance` is negative or not finite.
///
/// # Example
/// ```
/// use parcel_rate_core::{resolve_distance_band, ScaleCode, SlabTable};
///
/// let table = SlabTable::from_json(
///     r#"{"L": {"1-50": {"1-10": 7.53}, "51-100": {"1-10": 9.0}}}"#,
/// ).unwrap();
/// let band = resolve_distance_band(75.0, &table, ScaleCode::Luggage).unwrap().unwrap();
/// assert_eq!(band.to_string(), "51-100");
///
/// // Beyond the last band: nearest midpoint wins
/// let band = resolve_distance_band(900.0, &table, ScaleCode::Luggage).unwrap().unwrap();
/// assert_eq!(band.to_string(), "51-100");
/// ```
pub fn resolve_distance_band(
    distance: f64,
    table: &SlabTable,
    scale: ScaleCode,
) -> Result<Option<Band>, RateError> {
    if !distance.is_finite() || distance < 0.0 {
        return Err(RateError::Precondition {
            field: "distance",
            value: distance,
        });
    }

    let Some(scale_table) = table.scale(scale) else {
        return Ok(None);
    };
    let bands = scale_table.rows().iter().map(|row| row.band);

    if let Some(band) = bands.clone().find(|band| band.contains(distance)) {
        return Ok(Some(band));
    }

    // Strict `<` keeps the first band on ties
    let mut nearest: Option<(Band, f64)> = None;
    for band in bands {
        let diff = (distance - band.midpoint()).abs();
        match nearest {
            Some((_, best)) if diff >= best => {}
            _ => nearest = Some((band, diff)),
        }
    }

    if let Some((band, diff)) = nearest {
        debug!(
            scale = %scale,
            distance,
            band = %band,
            midpoint_diff = diff,
            "Distance outside all bands, using nearest band"
        );
    }
    Ok(nearest.map(|(band, _)| band))
}
