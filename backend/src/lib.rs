//! Parcel Rate Core - Rust Engine
//!
//! Railway parcel tariff resolution: given a distance, a weight and a scale,
//! look up the slab rate and compose surcharge, tax and derived products.
//!
//! # Architecture
//!
//! - **table**: Slab table (scale → distance band → weight band → rate), loading and fallback
//! - **resolver**: Distance → distance band
//! - **weight**: Weight → slab units of one weight band
//! - **composer**: Surcharge/tax composition, luggage and JPP variants, `RateEngine`
//! - **routes**: Route book and bulk route pricing
//! - **models**: Scales, bands and result types
//!
//! # Critical Invariants
//!
//! 1. The table is immutable after load and passed explicitly
//! 2. `total = base × (1 + surcharge) × (1 + tax)`; intermediates are unrounded
//! 3. Only presented totals are rounded, always upward
//! 4. Missing tariff data is a zero breakdown, never an error

pub mod composer;
pub mod config;
pub mod error;
pub mod models;
pub mod resolver;
pub mod routes;
pub mod table;
pub mod weight;

// Re-exports for convenience
pub use composer::RateEngine;
pub use config::TariffConfig;
pub use error::{RateError, RouteError, TableError};
pub use models::{
    ceil_currency, Band, BreakdownLine, JointProductRate, LuggageRate, RateBreakdown, RateQuote,
    ScaleCode, ScaleSelection,
};
pub use resolver::resolve_distance_band;
pub use routes::{default_routes, Route, RouteBook, RouteRates, RouteStore};
pub use table::{LoadedTable, SlabTable, TableOrigin};
pub use weight::weight_breakdown;
