//! Built-in fallback table
//!
//! Covers the 1-50 km band and weights up to 100 kg for every scale. Used
//! whenever the external table cannot be loaded.

use super::{DistanceRow, ScaleTable, SlabTable, WeightSlab};
use crate::models::{Band, ScaleCode};
use std::collections::BTreeMap;

const DEFAULT_DISTANCE_BAND: Band = Band::new_unchecked(1, 50);

const WEIGHT_BANDS: [Band; 10] = [
    Band::new_unchecked(1, 10),
    Band::new_unchecked(11, 20),
    Band::new_unchecked(21, 30),
    Band::new_unchecked(31, 40),
    Band::new_unchecked(41, 50),
    Band::new_unchecked(51, 60),
    Band::new_unchecked(61, 70),
    Band::new_unchecked(71, 80),
    Band::new_unchecked(81, 90),
    Band::new_unchecked(91, 100),
];

const LUGGAGE_RATES: [f64; 10] = [7.53, 15.06, 22.59, 30.12, 37.65, 45.18, 52.71, 60.24, 67.77, 75.3];
const PREMIER_RATES: [f64; 10] = [4.19, 8.37, 12.55, 16.74, 20.92, 25.1, 29.29, 33.47, 37.65, 41.84];
const RAJDHANI_RATES: [f64; 10] = [6.28, 12.56, 18.83, 25.11, 31.38, 37.66, 43.93, 50.21, 56.48, 62.76];
const STANDARD_RATES: [f64; 10] = [2.1, 4.19, 6.28, 8.37, 10.47, 12.56, 14.65, 16.74, 18.83, 20.93];

/// Compiled-in table substituted when loading fails
pub fn default_table() -> SlabTable {
    let scales = [
        (ScaleCode::Luggage, LUGGAGE_RATES),
        (ScaleCode::Premier, PREMIER_RATES),
        (ScaleCode::Rajdhani, RAJDHANI_RATES),
        (ScaleCode::Standard, STANDARD_RATES),
    ]
    .into_iter()
    .map(|(scale, rates)| (scale, scale_table(&rates)))
    .collect::<BTreeMap<_, _>>();

    SlabTable::from_scales(scales)
}

fn scale_table(rates: &[f64; 10]) -> ScaleTable {
    let slabs = WEIGHT_BANDS
        .iter()
        .zip(rates.iter())
        .map(|(band, rate)| WeightSlab {
            band: *band,
            unit_rate: *rate,
        })
        .collect();

    ScaleTable {
        rows: vec![DistanceRow {
            band: DEFAULT_DISTANCE_BAND,
            slabs,
        }],
    }
}
