//! Route book
//!
//! Station-to-station distances that can be priced in bulk. The built-in
//! routes all start at DVG; custom routes added by the user are kept in a
//! small JSON file ([`RouteStore`]).

use crate::error::RouteError;
use crate::models::RateQuote;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;
use tracing::{info, warn};

/// One priced leg between two stations
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Route {
    pub from: String,
    pub to: String,
    pub distance_km: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub via: Option<String>,
}

impl Route {
    /// Build a route, normalising station codes to trimmed upper case
    ///
    /// # Errors
    /// Empty station codes or a zero distance.
    ///
    /// # Example
    /// ```
    /// use parcel_rate_core::Route;
    ///
    /// let route = Route::new(" dvg", "mys ", 328, Some("has")).unwrap();
    /// assert_eq!(route.from, "DVG");
    /// assert_eq!(route.via.as_deref(), Some("HAS"));
    /// assert!(Route::new("DVG", "MYS", 0, None).is_err());
    /// ```
    pub fn new(from: &str, to: &str, distance_km: u32, via: Option<&str>) -> Result<Self, RouteError> {
        let from = normalise_station(from);
        let to = normalise_station(to);
        if from.is_empty() {
            return Err(RouteError::EmptyStation { field: "from" });
        }
        if to.is_empty() {
            return Err(RouteError::EmptyStation { field: "to" });
        }
        if distance_km == 0 {
            return Err(RouteError::InvalidDistance);
        }

        let via = via.map(normalise_station).filter(|v| !v.is_empty());
        Ok(Self {
            from,
            to,
            distance_km,
            via,
        })
    }

    /// Same leg: `(from, to, distance)` match, `via` ignored
    pub fn same_leg(&self, other: &Route) -> bool {
        self.from == other.from && self.to == other.to && self.distance_km == other.distance_km
    }
}

fn normalise_station(code: &str) -> String {
    code.trim().to_ascii_uppercase()
}

const DEFAULT_ROUTES: [(&str, &str, u32, &str); 25] = [
    ("DVG", "MYS", 328, "HAS"),
    ("DVG", "MYA", 372, "HAS"),
    ("DVG", "MYS", 464, "SBC"),
    ("DVG", "MYA", 419, "SBC"),
    ("DVG", "HAS", 207, "ASK"),
    ("DVG", "BJP", 392, ""),
    ("DVG", "BGK", 295, ""),
    ("DVG", "GDG", 201, ""),
    ("DVG", "UBL", 144, ""),
    ("DVG", "HVR", 68, ""),
    ("DVG", "RNR", 36, ""),
    ("DVG", "HRR", 23, ""),
    ("DVG", "RRB", 115, ""),
    ("DVG", "ASK", 160, ""),
    ("DVG", "TK", 257, ""),
    ("DVG", "SBC", 326, ""),
    ("DVG", "BYD", 54, ""),
    ("DVG", "HPT", 286, "UBL"),
    ("DVG", "HPT", 144, "AVC"),
    ("DVG", "DWR", 164, ""),
    ("DVG", "BGM", 285, ""),
    ("DVG", "HAS", 207, ""),
    ("DVG", "SKLR", 249, ""),
    ("DVG", "BAY", 209, "AVC"),
    ("DVG", "BAY", 351, "UBL"),
];

/// Built-in routes
pub fn default_routes() -> Vec<Route> {
    DEFAULT_ROUTES
        .iter()
        .map(|(from, to, distance_km, via)| Route {
            from: from.to_string(),
            to: to.to_string(),
            distance_km: *distance_km,
            via: (!via.is_empty()).then(|| via.to_string()),
        })
        .collect()
}

/// Default routes followed by custom routes
#[derive(Debug, Clone, PartialEq)]
pub struct RouteBook {
    routes: Vec<Route>,
    defaults: usize,
}

impl RouteBook {
    pub fn with_defaults() -> Self {
        let routes = default_routes();
        let defaults = routes.len();
        Self { routes, defaults }
    }

    /// Defaults plus previously stored custom routes
    ///
    /// Stored routes duplicating an existing leg are skipped.
    pub fn with_custom(custom: Vec<Route>) -> Self {
        let mut book = Self::with_defaults();
        for route in custom {
            if let Err(e) = book.add_custom(route) {
                warn!(error = %e, "Skipping stored route");
            }
        }
        book
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// Add a user route
    ///
    /// # Errors
    /// `RouteError::Duplicate` when the leg already exists.
    pub fn add_custom(&mut self, route: Route) -> Result<(), RouteError> {
        if self.routes.iter().any(|r| r.same_leg(&route)) {
            return Err(RouteError::Duplicate {
                from: route.from,
                to: route.to,
                distance_km: route.distance_km,
            });
        }
        self.routes.push(route);
        Ok(())
    }

    /// Routes that are not built in
    pub fn custom_routes(&self) -> &[Route] {
        &self.routes[self.defaults..]
    }

    /// Drop every custom route
    pub fn clear_custom(&mut self) {
        self.routes.truncate(self.defaults);
    }

    /// Routes whose `from` / `to` codes contain the given fragments
    ///
    /// Matching is case-insensitive; `None` or blank matches everything.
    pub fn search(&self, from: Option<&str>, to: Option<&str>) -> Vec<Route> {
        let from = from.map(normalise_station).filter(|s| !s.is_empty());
        let to = to.map(normalise_station).filter(|s| !s.is_empty());

        self.routes
            .iter()
            .filter(|r| from.as_deref().map_or(true, |f| r.from.contains(f)))
            .filter(|r| to.as_deref().map_or(true, |t| r.to.contains(t)))
            .cloned()
            .collect()
    }
}

impl Default for RouteBook {
    fn default() -> Self {
        Self::with_defaults()
    }
}

/// All-scale quote for one route
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteRates {
    pub route: Route,
    pub quote: RateQuote,
}

// ============================================================================
// Route Store
// ============================================================================

/// JSON file holding the custom routes
#[derive(Debug, Clone)]
pub struct RouteStore {
    path: PathBuf,
}

impl RouteStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Stored custom routes; a missing file means none
    pub fn load(&self) -> Result<Vec<Route>, RouteError> {
        match fs::read_to_string(&self.path) {
            Ok(json) => Ok(serde_json::from_str(&json)?),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(e.into()),
        }
    }

    /// Route book from the store, falling back to the defaults on failure
    pub fn load_book(&self) -> RouteBook {
        match self.load() {
            Ok(custom) => RouteBook::with_custom(custom),
            Err(e) => {
                warn!(
                    path = %self.path.display(),
                    error = %e,
                    "Failed to load custom routes, using built-in routes"
                );
                RouteBook::with_defaults()
            }
        }
    }

    /// Add one custom route and persist the result
    ///
    /// Unlike [`RouteStore::load_book`] an unreadable store is an error, so
    /// existing routes are never overwritten by a defaults-only book.
    pub fn add_route(&self, route: Route) -> Result<RouteBook, RouteError> {
        let mut book = RouteBook::with_custom(self.load()?);
        book.add_custom(route)?;
        self.save(&book)?;
        Ok(book)
    }

    /// Persist the book's custom routes
    pub fn save(&self, book: &RouteBook) -> Result<(), RouteError> {
        let json = serde_json::to_string_pretty(book.custom_routes())?;
        fs::write(&self.path, json)?;
        info!(
            path = %self.path.display(),
            routes = book.custom_routes().len(),
            "Saved custom routes"
        );
        Ok(())
    }

    /// Remove the store file
    pub fn clear(&self) -> Result<(), RouteError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
