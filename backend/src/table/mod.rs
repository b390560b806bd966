//! Slab table: scale → distance band → weight band → unit rate
//!
//! # Critical Invariants
//!
//! 1. Every band key parses as an inclusive `low-high` range (fail fast)
//! 2. Every unit rate is finite and non-negative
//! 3. All scales share one distance-band sequence
//! 4. Bands keep the insertion order of the source document
//! 5. The table is immutable once built

pub mod defaults;
pub mod loader;

use crate::error::TableError;
use crate::models::{Band, ScaleCode};
use serde::de::{Deserializer, MapAccess, Visitor};
use serde::Deserialize;
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use std::fmt;
use std::marker::PhantomData;

pub use defaults::default_table;
pub use loader::{load, load_or_default, FileSource, InlineSource, LoadedTable, TableOrigin, TableSource};

// ============================================================================
// Typed Table
// ============================================================================

/// Rate for one weight band
#[derive(Debug, Clone, PartialEq)]
pub struct WeightSlab {
    pub band: Band,
    pub unit_rate: f64,
}

/// Weight slabs for one distance band, in source order
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceRow {
    pub band: Band,
    pub slabs: Vec<WeightSlab>,
}

/// Distance rows for one scale, in source order
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ScaleTable {
    rows: Vec<DistanceRow>,
}

impl ScaleTable {
    pub fn rows(&self) -> &[DistanceRow] {
        &self.rows
    }

    /// Row for a distance band, if the scale defines it
    pub fn row(&self, band: Band) -> Option<&DistanceRow> {
        self.rows.iter().find(|row| row.band == band)
    }

    fn distance_bands(&self) -> Vec<Band> {
        self.rows.iter().map(|row| row.band).collect()
    }
}

/// Immutable tariff table
///
/// # Example
/// ```
/// use parcel_rate_core::{ScaleCode, SlabTable};
///
/// let table = SlabTable::from_json(r#"{"L": {"1-50": {"1-10": 7.53, "11-20": 15.06}}}"#).unwrap();
/// assert!(table.scale(ScaleCode::Luggage).is_some());
/// assert!(table.scale(ScaleCode::Premier).is_none());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SlabTable {
    scales: BTreeMap<ScaleCode, ScaleTable>,
}

impl SlabTable {
    /// Parse and validate a JSON document shaped
    /// `{ scale: { distance_band: { weight_band: rate } } }`
    pub fn from_json(json: &str) -> Result<Self, TableError> {
        let raw: RawTable = serde_json::from_str(json)?;
        Self::from_raw(raw)
    }

    /// Start building a table in code
    pub fn builder() -> SlabTableBuilder {
        SlabTableBuilder::default()
    }

    pub(crate) fn from_scales(scales: BTreeMap<ScaleCode, ScaleTable>) -> Self {
        Self { scales }
    }

    fn from_raw(raw: RawTable) -> Result<Self, TableError> {
        if raw.0.is_empty() {
            return Err(TableError::Empty);
        }

        let mut scales = BTreeMap::new();
        for (scale_key, distances) in raw.0 {
            let scale = ScaleCode::from_code(&scale_key)
                .ok_or_else(|| TableError::UnknownScale(scale_key.clone()))?;

            let mut rows = Vec::with_capacity(distances.0.len());
            for (distance_key, weights) in distances.0 {
                let band = Band::parse(&distance_key)?;
                let mut slabs = Vec::with_capacity(weights.0.len());
                for (weight_key, unit_rate) in weights.0 {
                    let weight_band = Band::parse(&weight_key)?;
                    if !unit_rate.is_finite() || unit_rate < 0.0 {
                        return Err(TableError::InvalidRate {
                            scale: scale.to_string(),
                            distance_band: band.to_string(),
                            weight_band: weight_band.to_string(),
                            rate: unit_rate,
                        });
                    }
                    slabs.push(WeightSlab {
                        band: weight_band,
                        unit_rate,
                    });
                }
                rows.push(DistanceRow { band, slabs });
            }

            if scales.insert(scale, ScaleTable { rows }).is_some() {
                return Err(TableError::DuplicateScale(scale_key));
            }
        }

        let table = Self { scales };
        table.check_distance_partition()?;
        Ok(table)
    }

    /// All scales must enumerate the same distance bands in the same order,
    /// so a band resolved for one scale is meaningful for every other.
    fn check_distance_partition(&self) -> Result<(), TableError> {
        let mut scales = self.scales.iter();
        let Some((reference, reference_table)) = scales.next() else {
            return Err(TableError::Empty);
        };
        let expected = reference_table.distance_bands();

        for (scale, scale_table) in scales {
            if scale_table.distance_bands() != expected {
                return Err(TableError::InconsistentDistanceBands {
                    scale: scale.to_string(),
                    reference: reference.to_string(),
                });
            }
        }
        Ok(())
    }

    /// Rates for one scale
    pub fn scale(&self, scale: ScaleCode) -> Option<&ScaleTable> {
        self.scales.get(&scale)
    }

    /// Scales present in the table, in presentation order
    pub fn scale_codes(&self) -> impl Iterator<Item = ScaleCode> + '_ {
        self.scales.keys().copied()
    }

    /// Weight slabs for `table[scale][band]`
    pub fn slabs(&self, scale: ScaleCode, band: Band) -> Option<&[WeightSlab]> {
        self.scale(scale)
            .and_then(|t| t.row(band))
            .map(|row| row.slabs.as_slice())
    }

    /// Shared distance bands, in source order
    pub fn distance_bands(&self) -> Vec<Band> {
        self.scales
            .values()
            .next()
            .map(ScaleTable::distance_bands)
            .unwrap_or_default()
    }

    /// Total number of `(scale, distance, weight)` rate cells
    pub fn rate_count(&self) -> usize {
        self.scales
            .values()
            .flat_map(|t| t.rows.iter())
            .map(|row| row.slabs.len())
            .sum()
    }

    /// SHA-256 of a canonical rendering of the table
    ///
    /// Scales are sorted, bands keep source order, so the same document
    /// always yields the same fingerprint.
    pub fn fingerprint(&self) -> String {
        let canonical: Vec<(&str, Vec<(String, Vec<(String, f64)>)>)> = self
            .scales
            .iter()
            .map(|(scale, table)| {
                let rows = table
                    .rows
                    .iter()
                    .map(|row| {
                        let slabs = row
                            .slabs
                            .iter()
                            .map(|slab| (slab.band.to_string(), slab.unit_rate))
                            .collect();
                        (row.band.to_string(), slabs)
                    })
                    .collect();
                (scale.code(), rows)
            })
            .collect();

        // Tuples of strings and finite floats always serialize
        let json = serde_json::to_string(&canonical).unwrap_or_default();

        let mut hasher = Sha256::new();
        hasher.update(json.as_bytes());
        format!("{:x}", hasher.finalize())
    }
}

// ============================================================================
// Builder
// ============================================================================

/// Accumulates rates in insertion order; validated on `build`
#[derive(Debug, Default, Clone)]
pub struct SlabTableBuilder {
    raw: RawTable,
}

impl SlabTableBuilder {
    /// Add one rate cell
    pub fn rate(mut self, scale: ScaleCode, distance_band: &str, weight_band: &str, unit_rate: f64) -> Self {
        let distances = entry(&mut self.raw.0, scale.code());
        let weights = entry(&mut distances.0, distance_band);
        match weights.0.iter_mut().find(|(key, _)| key == weight_band) {
            Some((_, rate)) => *rate = unit_rate,
            None => weights.0.push((weight_band.to_string(), unit_rate)),
        }
        self
    }

    pub fn build(self) -> Result<SlabTable, TableError> {
        SlabTable::from_raw(self.raw)
    }
}

fn entry<'a, V: Default>(entries: &'a mut Vec<(String, V)>, key: &str) -> &'a mut V {
    let index = match entries.iter().position(|(k, _)| k == key) {
        Some(index) => index,
        None => {
            entries.push((key.to_string(), V::default()));
            entries.len() - 1
        }
    };
    &mut entries[index].1
}

// ============================================================================
// Order-preserving JSON representation
// ============================================================================

type RawTable = Ordered<Ordered<Ordered<f64>>>;

/// JSON object decoded as a vector of entries, keeping document order
#[derive(Debug, Clone)]
struct Ordered<V>(Vec<(String, V)>);

impl<V> Default for Ordered<V> {
    fn default() -> Self {
        Self(Vec::new())
    }
}

impl<'de, V: Deserialize<'de>> Deserialize<'de> for Ordered<V> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct OrderedVisitor<V>(PhantomData<V>);

        impl<'de, V: Deserialize<'de>> Visitor<'de> for OrderedVisitor<V> {
            type Value = Ordered<V>;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a JSON object")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut entries: Vec<(String, V)> = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some((key, value)) = map.next_entry::<String, V>()? {
                    if entries.iter().any(|(k, _)| *k == key) {
                        return Err(serde::de::Error::custom(format!("duplicate key '{}'", key)));
                    }
                    entries.push((key, value));
                }
                Ok(Ordered(entries))
            }
        }

        deserializer.deserialize_map(OrderedVisitor(PhantomData))
    }
}
