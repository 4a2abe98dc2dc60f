//! Station catalog and free-text lookup.

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;

use crate::domain::Crs;

/// Default number of suggestions returned to an autocomplete caller.
pub const DEFAULT_SUGGESTION_LIMIT: usize = 5;

/// Errors loading the station catalog.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// Catalog file could not be read
    #[error("failed to read station catalog: {0}")]
    Io(#[from] std::io::Error),

    /// Catalog contents could not be parsed
    #[error("failed to parse station catalog: {message}")]
    Json { message: String },
}

/// One station record from the static catalog.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Station {
    /// Human-readable station name.
    pub station_name: String,

    /// Canonical CRS code; the station's identity.
    pub crs_code: String,

    /// Latitude.
    pub lat: f64,

    /// Longitude.
    pub long: f64,

    /// Country the station is in.
    pub constituent_country: String,

    /// IATA code, for stations serving an airport.
    #[serde(default)]
    pub iata_airport_code: Option<String>,
}

/// In-memory lookup over the static station catalog.
///
/// Loaded once at startup and never mutated. `search` answers fuzzy
/// substring queries for autocomplete; `resolve` turns a code back into
/// a record.
#[derive(Debug, Clone)]
pub struct StationCatalog {
    /// All stations, in catalog order.
    stations: Vec<Station>,

    /// CRS -> index into `stations`.
    by_crs: HashMap<Crs, usize>,
}

impl StationCatalog {
    /// Build a catalog from already-loaded records.
    ///
    /// Records whose CRS code does not parse are kept for search (they
    /// still have a name) but cannot be resolved by code.
    pub fn from_stations(stations: Vec<Station>) -> Self {
        let by_crs = stations
            .iter()
            .enumerate()
            .filter_map(|(idx, s)| Crs::parse(&s.crs_code).ok().map(|crs| (crs, idx)))
            .collect();

        Self { stations, by_crs }
    }

    /// Parse a catalog from its JSON representation: an array of records.
    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        let stations: Vec<Station> =
            serde_json::from_str(json).map_err(|e| CatalogError::Json {
                message: e.to_string(),
            })?;

        Ok(Self::from_stations(stations))
    }

    /// Load a catalog from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    /// Number of stations in the catalog.
    pub fn len(&self) -> usize {
        self.stations.len()
    }

    /// Whether the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }

    /// Fuzzy station search for autocomplete.
    ///
    /// A station matches when the query is a case-insensitive substring
    /// of its name, CRS code, or IATA code. Matches come back in catalog
    /// order, capped at `limit`. Queries of one character or less return
    /// nothing - they match far too much to be useful suggestions.
    pub fn search(&self, query: &str, limit: usize) -> Vec<&Station> {
        if query.chars().count() <= 1 {
            return Vec::new();
        }

        let needle = query.to_lowercase();

        self.stations
            .iter()
            .filter(|station| {
                station.station_name.to_lowercase().contains(&needle)
                    || station.crs_code.to_lowercase().contains(&needle)
                    || station
                        .iata_airport_code
                        .as_ref()
                        .is_some_and(|iata| iata.to_lowercase().contains(&needle))
            })
            .take(limit)
            .collect()
    }

    /// Exact lookup by CRS code.
    pub fn resolve(&self, crs: &Crs) -> Option<&Station> {
        self.by_crs.get(crs).map(|&idx| &self.stations[idx])
    }

    /// Display name for a code, falling back to the raw code when the
    /// catalog doesn't know it, so callers never render a blank label.
    pub fn display_name(&self, crs: &Crs) -> String {
        self.resolve(crs)
            .map(|station| station.station_name.clone())
            .unwrap_or_else(|| crs.to_string())
    }
}
