//! Departures provider response DTOs.
//!
//! These types map directly to the provider's JSON responses. They use
//! `Option` liberally because the upstream omits fields rather than
//! sending null values in many cases, and unknown fields are ignored so
//! new upstream additions cannot break deserialization.

use serde::Deserialize;

use crate::domain::Crs;

/// Platform label shown when no platform has been assigned yet.
pub const PLATFORM_TBC: &str = "TBC";

/// Top-level response for one origin station's board.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BoardResponse {
    /// The departures container. Absent means an empty board, not an error.
    pub departures: Option<DepartureSet>,
}

impl BoardResponse {
    /// All departure records, in upstream order. An absent `departures`
    /// path yields an empty list.
    pub fn into_departures(self) -> Vec<RawDeparture> {
        self.departures.map(|d| d.all).unwrap_or_default()
    }
}

/// The `departures` object; the provider nests the list under `all`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DepartureSet {
    #[serde(default)]
    pub all: Vec<RawDeparture>,
}

/// A single raw departure record for a train service at the origin station.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawDeparture {
    /// Timetabled departure time ("HH:MM"), if published.
    pub aimed_departure_time: Option<String>,

    /// Live estimate. Either "HH:MM" or one of the sentinel strings
    /// "On time", "Delayed", "Cancelled".
    pub expected_departure_time: Option<String>,

    /// Whether this service is cancelled.
    pub is_cancelled: Option<bool>,

    /// Platform number/letter. May be absent, empty, or the literal
    /// string "null" - all meaning "not yet known".
    pub platform: Option<String>,

    /// Train operating company name.
    pub operator_name: Option<String>,

    /// Human-readable final destination name.
    pub destination_name: Option<String>,

    /// Reason for delay (if delayed).
    pub delay_reason: Option<String>,

    /// Reason for cancellation (if cancelled).
    pub cancel_reason: Option<String>,

    /// Route detail: final stop and intermediate calling points.
    pub station_detail: Option<StationDetail>,
}

impl RawDeparture {
    /// True iff this service's final stop is `crs`.
    pub fn terminates_at(&self, crs: &Crs) -> bool {
        self.station_detail
            .as_ref()
            .and_then(|d| d.destination.as_ref())
            .and_then(|dest| dest.station_code.as_deref())
            .is_some_and(|code| code.eq_ignore_ascii_case(crs.as_str()))
    }

    /// True iff this service calls at `crs` as an intermediate stop.
    pub fn calls_at(&self, crs: &Crs) -> bool {
        self.station_detail
            .as_ref()
            .and_then(|d| d.calling_at.as_ref())
            .into_iter()
            .flatten()
            .filter_map(|stop| stop.station_code.as_deref())
            .any(|code| code.eq_ignore_ascii_case(crs.as_str()))
    }

    /// True iff this service reaches `crs` without a change of train,
    /// either as its final stop or as an intermediate calling point.
    pub fn reaches(&self, crs: &Crs) -> bool {
        self.terminates_at(crs) || self.calls_at(crs)
    }

    /// The platform label to display.
    ///
    /// A platform that is missing, empty, or the literal string "null"
    /// renders as "TBC"; the sentinel is never shown.
    pub fn platform_display(&self) -> &str {
        match self.platform.as_deref() {
            None | Some("") | Some("null") => PLATFORM_TBC,
            Some(platform) => platform,
        }
    }
}

/// Route detail for one departure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StationDetail {
    /// The service's final stop.
    pub destination: Option<RouteStop>,

    /// Intermediate calling points between the origin and the destination.
    /// Absent (or null) when the provider has no route detail.
    pub calling_at: Option<Vec<RouteStop>>,
}

/// One stop on a service's route.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RouteStop {
    /// CRS code of the station.
    pub station_code: Option<String>,

    /// Human-readable station name.
    pub station_name: Option<String>,
}
