//! Classification of raw departures into delay statuses.
//!
//! The provider's estimate field overloads one string with sentinel
//! values ("On time", "Delayed", "Cancelled") and literal "HH:MM"
//! timestamps. `classify` resolves that ambiguity once, producing the
//! `DepartureStatus` tagged union the rest of the crate works with.

use crate::domain::{BoardTime, DepartureStatus};

use super::types::RawDeparture;

/// Sentinel estimate: running to schedule.
const SENTINEL_ON_TIME: &str = "On time";

/// Sentinel estimate: late, no usable numeric estimate.
const SENTINEL_DELAYED: &str = "Delayed";

/// Sentinel estimate: cancelled.
const SENTINEL_CANCELLED: &str = "Cancelled";

/// Display reason when a cancellation carries no upstream reason.
const FALLBACK_CANCEL_REASON: &str = "Service cancelled";

/// Display reason when a delay carries no upstream reason.
const FALLBACK_DELAY_REASON: &str = "Service delayed";

/// Classify one raw departure record.
///
/// Total and deterministic: every record maps to exactly one status.
/// Rules are evaluated in precedence order, first match wins:
///
/// 1. cancellation flag, or a "Cancelled" estimate
/// 2. absent/empty estimate, or "On time"
/// 3. a bare "Delayed" estimate (minutes unknown)
/// 4. both times parse as "HH:MM": positive difference is a delay of
///    that many whole minutes; zero difference is on time
/// 5. anything else carries the raw estimate string as the display
///    reason, minutes unknown
pub fn classify(dep: &RawDeparture) -> DepartureStatus {
    let expected = dep.expected_departure_time.as_deref();

    if dep.is_cancelled == Some(true) || expected == Some(SENTINEL_CANCELLED) {
        let reason = dep
            .cancel_reason
            .clone()
            .unwrap_or_else(|| FALLBACK_CANCEL_REASON.to_string());
        return DepartureStatus::cancelled(reason);
    }

    let Some(expected) = expected else {
        return DepartureStatus::OnTime;
    };

    if expected.is_empty() || expected == SENTINEL_ON_TIME {
        return DepartureStatus::OnTime;
    }

    if expected == SENTINEL_DELAYED {
        let reason = dep
            .delay_reason
            .clone()
            .unwrap_or_else(|| FALLBACK_DELAY_REASON.to_string());
        return DepartureStatus::delayed(None, reason);
    }

    let aimed = dep
        .aimed_departure_time
        .as_deref()
        .and_then(|s| BoardTime::parse_hhmm(s).ok());

    if let (Some(aimed), Some(estimate)) = (aimed, BoardTime::parse_hhmm(expected).ok()) {
        let minutes_late = estimate.minutes_late_from(aimed);

        if minutes_late > 0 {
            let reason = dep
                .delay_reason
                .clone()
                .unwrap_or_else(|| format!("Expected {expected}"));
            return DepartureStatus::delayed(Some(minutes_late), reason);
        }

        // Equal times (and clamped rollover) read as on time.
        return DepartureStatus::OnTime;
    }

    // Unrecognised estimate format: surface the raw string rather than
    // guessing, minutes unknown.
    DepartureStatus::delayed(None, expected)
}
