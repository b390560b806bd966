//! Table loading with built-in fallback
//!
//! Loading happens once at startup. A failed load is logged and replaced by
//! [`default_table`](super::default_table); callers always get a usable table.
//! Loading again simply re-reads the source.

use super::{default_table, SlabTable};
use crate::error::TableError;
use serde::Serialize;
use std::fs;
use std::path::PathBuf;
use tracing::{info, warn};

/// Somewhere a table JSON document can be read from
pub trait TableSource {
    /// Short description for logs and `TableOrigin`
    fn describe(&self) -> String;

    /// Raw JSON document
    fn fetch(&self) -> Result<String, TableError>;
}

/// Table stored in a local file
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl TableSource for FileSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    fn fetch(&self) -> Result<String, TableError> {
        Ok(fs::read_to_string(&self.path)?)
    }
}

/// Table document already held in memory
#[derive(Debug, Clone)]
pub struct InlineSource {
    name: String,
    json: String,
}

impl InlineSource {
    pub fn new(name: impl Into<String>, json: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            json: json.into(),
        }
    }
}

impl TableSource for InlineSource {
    fn describe(&self) -> String {
        self.name.clone()
    }

    fn fetch(&self) -> Result<String, TableError> {
        Ok(self.json.clone())
    }
}

/// Where the active table came from
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum TableOrigin {
    /// Loaded from the named source
    Source(String),
    /// Built-in table, with the reason the source was not used
    BuiltInDefault { reason: String },
}

impl TableOrigin {
    pub fn is_degraded(&self) -> bool {
        matches!(self, TableOrigin::BuiltInDefault { .. })
    }
}

/// A usable table and its provenance
#[derive(Debug, Clone)]
pub struct LoadedTable {
    pub table: SlabTable,
    pub origin: TableOrigin,
}

impl LoadedTable {
    /// Built-in table used deliberately (no source configured)
    pub fn built_in() -> Self {
        Self {
            table: default_table(),
            origin: TableOrigin::BuiltInDefault {
                reason: "no table source configured".to_string(),
            },
        }
    }
}

/// Read and validate a table, propagating any failure
pub fn load(source: &dyn TableSource) -> Result<SlabTable, TableError> {
    let json = source.fetch()?;
    let table = SlabTable::from_json(&json)?;

    info!(
        source = %source.describe(),
        scales = table.scale_codes().count(),
        distance_bands = table.distance_bands().len(),
        rates = table.rate_count(),
        fingerprint = %table.fingerprint(),
        "Loaded slab table"
    );
    Ok(table)
}

/// Read a table, substituting the built-in default on any failure
///
/// # Example
/// ```
/// use parcel_rate_core::table::{load_or_default, InlineSource};
///
/// let loaded = load_or_default(&InlineSource::new("broken", "not json"));
/// assert!(loaded.origin.is_degraded());
/// assert_eq!(loaded.table, parcel_rate_core::table::default_table());
/// ```
pub fn load_or_default(source: &dyn TableSource) -> LoadedTable {
    match load(source) {
        Ok(table) => LoadedTable {
            table,
            origin: TableOrigin::Source(source.describe()),
        },
        Err(e) => {
            warn!(
                source = %source.describe(),
                error = %e,
                "Failed to load slab table, using built-in default"
            );
            LoadedTable {
                table: default_table(),
                origin: TableOrigin::BuiltInDefault {
                    reason: e.to_string(),
                },
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inline_source_loads() {
        let source = InlineSource::new("inline", r#"{"S": {"1-50": {"1-10": 2.1}}}"#);
        let loaded = load_or_default(&source);
        assert_eq!(loaded.origin, TableOrigin::Source("inline".to_string()));
        assert!(!loaded.origin.is_degraded());
        assert_eq!(loaded.table.rate_count(), 1);
    }

    #[test]
    fn test_missing_file_falls_back() {
        let source = FileSource::new("/nonexistent/parcel/rates.json");
        assert!(matches!(load(&source), Err(TableError::Io(_))));

        let loaded = load_or_default(&source);
        assert!(loaded.origin.is_degraded());
        assert_eq!(loaded.table, default_table());
    }

    #[test]
    fn test_built_in_is_degraded() {
        assert!(LoadedTable::built_in().origin.is_degraded());
    }
}
