//! Error types for the rate core
//!
//! Table problems are fatal only to the load attempt that produced them;
//! `table::load_or_default` turns every `TableError` into a logged fallback.

use thiserror::Error;

/// Errors raised while reading or validating a slab table
#[derive(Debug, Error)]
pub enum TableError {
    #[error("Failed to read table source: {0}")]
    Io(#[from] std::io::Error),

    #[error("Table JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Malformed band key '{key}': {reason}")]
    MalformedBand { key: String, reason: String },

    #[error("Invalid unit rate {rate} at {scale}/{distance_band}/{weight_band}")]
    InvalidRate {
        scale: String,
        distance_band: String,
        weight_band: String,
        rate: f64,
    },

    #[error("Unknown scale code '{0}'")]
    UnknownScale(String),

    #[error("Scale '{0}' is defined more than once")]
    DuplicateScale(String),

    #[error("Scale {scale} does not share the distance bands of scale {reference}")]
    InconsistentDistanceBands { scale: String, reference: String },

    #[error("Table defines no scales")]
    Empty,
}

/// Errors raised by rate computation
#[derive(Debug, Error, PartialEq)]
pub enum RateError {
    /// Caller passed a value the core never accepts (non-positive or non-finite)
    #[error("Precondition violated: {field} must be a positive finite number, got {value}")]
    Precondition { field: &'static str, value: f64 },

    #[error("Invalid tariff config: {0}")]
    InvalidConfig(String),
}

/// Errors raised by the route book and its store
#[derive(Debug, Error)]
pub enum RouteError {
    #[error("Station code must not be empty ({field})")]
    EmptyStation { field: &'static str },

    #[error("Route distance must be positive")]
    InvalidDistance,

    #[error("Route {from} -> {to} ({distance_km} km) already exists")]
    Duplicate {
        from: String,
        to: String,
        distance_km: u32,
    },

    #[error("Route store I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Route store JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
