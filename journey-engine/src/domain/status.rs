//! Departure status classification result.
//!
//! The provider overloads a single string field with both sentinel values
//! ("On time", "Delayed", "Cancelled") and literal timestamps. That string
//! is resolved into this tagged union exactly once, at classification time,
//! so call sites never re-test string equality.

use std::fmt;

/// Minimum known lateness, in minutes, at which delay compensation
/// information should be offered to the caller.
pub const COMPENSATION_THRESHOLD_MINS: u32 = 15;

/// The delay status of a single departure.
///
/// Exactly one variant applies to every raw departure record; see
/// `board::classify` for the derivation rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DepartureStatus {
    /// Running to schedule.
    OnTime,

    /// Running late, or flagged as delayed without a usable estimate.
    Delayed {
        /// Whole minutes late, when both times were parseable.
        minutes_late: Option<u32>,
        /// Human-readable reason or label for display.
        reason: String,
        /// True when the known lateness meets the compensation threshold.
        compensation_eligible: bool,
    },

    /// Cancelled outright.
    Cancelled {
        /// Human-readable reason for display.
        reason: String,
    },
}

impl DepartureStatus {
    /// Build a `Delayed` status, deriving the compensation flag from the
    /// known lateness.
    pub fn delayed(minutes_late: Option<u32>, reason: impl Into<String>) -> Self {
        let compensation_eligible =
            minutes_late.is_some_and(|mins| mins >= COMPENSATION_THRESHOLD_MINS);

        DepartureStatus::Delayed {
            minutes_late,
            reason: reason.into(),
            compensation_eligible,
        }
    }

    /// Build a `Cancelled` status.
    pub fn cancelled(reason: impl Into<String>) -> Self {
        DepartureStatus::Cancelled {
            reason: reason.into(),
        }
    }

    /// True for anything other than a normal on-time departure.
    pub fn is_disrupted(&self) -> bool {
        !matches!(self, DepartureStatus::OnTime)
    }

    /// Known lateness in minutes. On-time departures report zero;
    /// delays without a usable estimate and cancellations report `None`.
    pub fn minutes_late(&self) -> Option<u32> {
        match self {
            DepartureStatus::OnTime => Some(0),
            DepartureStatus::Delayed { minutes_late, .. } => *minutes_late,
            DepartureStatus::Cancelled { .. } => None,
        }
    }

    /// The display reason, where one applies.
    pub fn reason(&self) -> Option<&str> {
        match self {
            DepartureStatus::OnTime => None,
            DepartureStatus::Delayed { reason, .. } => Some(reason),
            DepartureStatus::Cancelled { reason } => Some(reason),
        }
    }

    /// True when compensation information should be offered.
    pub fn compensation_eligible(&self) -> bool {
        matches!(
            self,
            DepartureStatus::Delayed {
                compensation_eligible: true,
                ..
            }
        )
    }
}

impl fmt::Display for DepartureStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DepartureStatus::OnTime => f.write_str("On time"),
            DepartureStatus::Delayed {
                minutes_late: Some(mins),
                ..
            } => write!(f, "Delayed (+{mins}m)"),
            DepartureStatus::Delayed {
                minutes_late: None, ..
            } => f.write_str("Delayed"),
            DepartureStatus::Cancelled { .. } => f.write_str("Cancelled"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delayed_constructor_sets_compensation_flag() {
        assert!(!DepartureStatus::delayed(Some(14), "r").compensation_eligible());
        assert!(DepartureStatus::delayed(Some(15), "r").compensation_eligible());
        assert!(DepartureStatus::delayed(Some(90), "r").compensation_eligible());

        // Unknown lateness never qualifies
        assert!(!DepartureStatus::delayed(None, "r").compensation_eligible());
    }

    #[test]
    fn minutes_late_per_variant() {
        assert_eq!(DepartureStatus::OnTime.minutes_late(), Some(0));
        assert_eq!(DepartureStatus::delayed(Some(7), "r").minutes_late(), Some(7));
        assert_eq!(DepartureStatus::delayed(None, "r").minutes_late(), None);
        assert_eq!(DepartureStatus::cancelled("r").minutes_late(), None);
    }

    #[test]
    fn disruption_predicate() {
        assert!(!DepartureStatus::OnTime.is_disrupted());
        assert!(DepartureStatus::delayed(Some(1), "r").is_disrupted());
        assert!(DepartureStatus::cancelled("r").is_disrupted());
    }

    #[test]
    fn display_labels() {
        assert_eq!(DepartureStatus::OnTime.to_string(), "On time");
        assert_eq!(
            DepartureStatus::delayed(Some(12), "r").to_string(),
            "Delayed (+12m)"
        );
        assert_eq!(DepartureStatus::delayed(None, "r").to_string(), "Delayed");
        assert_eq!(DepartureStatus::cancelled("r").to_string(), "Cancelled");
    }

    #[test]
    fn reason_surface() {
        assert_eq!(DepartureStatus::OnTime.reason(), None);
        assert_eq!(
            DepartureStatus::delayed(None, "Awaiting a crew member").reason(),
            Some("Awaiting a crew member")
        );
        assert_eq!(
            DepartureStatus::cancelled("Service cancelled").reason(),
            Some("Service cancelled")
        );
    }
}
