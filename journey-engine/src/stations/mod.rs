//! Station catalog and lookup.
//!
//! Provides free-text station search and CRS code resolution over the
//! static station catalog, loaded once at startup.

mod catalog;

pub use catalog::{CatalogError, DEFAULT_SUGGESTION_LIMIT, Station, StationCatalog};
