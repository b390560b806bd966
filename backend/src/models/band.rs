//! Inclusive numeric bands
//!
//! Distance and weight bands share the `"low-high"` key format. Keys are
//! parsed once when a table is built; afterwards only the numeric bounds are
//! consulted.

use crate::error::TableError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Inclusive range `[low, high]` with `1 <= low <= high`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Band {
    low: u32,
    high: u32,
}

impl Band {
    /// Create a band from its bounds
    ///
    /// # Errors
    /// Returns `TableError::MalformedBand` if either bound is zero or
    /// `low > high`.
    pub fn new(low: u32, high: u32) -> Result<Self, TableError> {
        let band = Self { low, high };
        if low == 0 {
            return Err(band.malformed("lower bound must be positive"));
        }
        if low > high {
            return Err(band.malformed("lower bound exceeds upper bound"));
        }
        Ok(band)
    }

    /// Bounds known valid at compile time (built-in table)
    pub(crate) const fn new_unchecked(low: u32, high: u32) -> Self {
        Self { low, high }
    }

    /// Parse a `"low-high"` key
    ///
    /// # Example
    /// ```
    /// use parcel_rate_core::Band;
    ///
    /// let band = Band::parse("11-20").unwrap();
    /// assert_eq!(band.low(), 11);
    /// assert_eq!(band.high(), 20);
    /// assert!(Band::parse("20-11").is_err());
    /// ```
    pub fn parse(key: &str) -> Result<Self, TableError> {
        let malformed = |reason: &str| TableError::MalformedBand {
            key: key.to_string(),
            reason: reason.to_string(),
        };

        let (low, high) = key
            .trim()
            .split_once('-')
            .ok_or_else(|| malformed("expected 'low-high'"))?;
        let low: u32 = low
            .trim()
            .parse()
            .map_err(|_| malformed("lower bound is not a positive integer"))?;
        let high: u32 = high
            .trim()
            .parse()
            .map_err(|_| malformed("upper bound is not a positive integer"))?;

        Band::new(low, high).map_err(|e| match e {
            TableError::MalformedBand { reason, .. } => malformed(&reason),
            other => other,
        })
    }

    pub fn low(&self) -> u32 {
        self.low
    }

    pub fn high(&self) -> u32 {
        self.high
    }

    /// Whether `value` lies within the band, bounds inclusive
    pub fn contains(&self, value: f64) -> bool {
        value >= f64::from(self.low) && value <= f64::from(self.high)
    }

    /// Centre of the band, used for nearest-band fallback
    pub fn midpoint(&self) -> f64 {
        (f64::from(self.low) + f64::from(self.high)) / 2.0
    }

    fn malformed(&self, reason: &str) -> TableError {
        TableError::MalformedBand {
            key: self.to_string(),
            reason: reason.to_string(),
        }
    }
}

impl fmt::Display for Band {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.low, self.high)
    }
}
