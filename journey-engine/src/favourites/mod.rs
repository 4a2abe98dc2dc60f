//! Persisted favourite journeys.
//!
//! A deduplicated, order-preserving list of saved `(from, to)` journey
//! pairs with toggle-only mutation, backed by a single JSON file that
//! survives restarts.

mod file;
mod store;

use serde::{Deserialize, Serialize};

use crate::domain::Crs;

pub use file::{FavouritesError, FavouritesFile};
pub use store::{FavouritesStore, ToggleOutcome};

/// One saved journey.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FavouriteJourney {
    /// Origin station.
    pub from: Crs,

    /// Destination station.
    pub to: Crs,
}
