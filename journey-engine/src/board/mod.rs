//! Departures provider client.
//!
//! This module talks to the live departures endpoint, which answers one
//! GET per origin station with a JSON board of raw departure records.
//!
//! Key characteristics of the provider:
//! - The departure list is nested under the `departures.all` path; an
//!   absent path means an empty board, not an error
//! - Times are "HH:MM" strings (UK local time), and the estimate field
//!   doubles as a status carrying "On time"/"Delayed"/"Cancelled"
//! - A platform may be absent, empty, or the literal string "null",
//!   all meaning "not yet known"

mod classify;
mod client;
mod error;
mod mock;
mod types;

use std::future::Future;

use crate::domain::Crs;

pub use classify::classify;
pub use client::{BoardClient, BoardConfig};
pub use error::BoardError;
pub use mock::MockBoardClient;
pub use types::{BoardResponse, DepartureSet, PLATFORM_TBC, RawDeparture, RouteStop, StationDetail};

/// A source of departure boards.
///
/// The seam between the results assembler and whichever provider backs
/// it: the live HTTP client, the caching wrapper, or a mock.
pub trait DepartureSource: Send + Sync {
    /// Fetch the raw departure board for one origin station, in
    /// upstream order.
    fn fetch_board(
        &self,
        station: &Crs,
    ) -> impl Future<Output = Result<Vec<RawDeparture>, BoardError>> + Send;
}
