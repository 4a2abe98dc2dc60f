//! Board time handling.
//!
//! The departures provider gives times as "HH:MM" strings with no date
//! attached. This module provides a clock-time type for comparing an aimed
//! departure against an expected one in whole minutes. Services crossing
//! midnight are not modelled: an expected time earlier than the aimed time
//! clamps to zero lateness.

use chrono::{NaiveTime, Timelike};
use std::cmp::Ordering;
use std::fmt;

/// Error returned when parsing an invalid time string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid time: {reason}")]
pub struct TimeError {
    reason: &'static str,
}

impl TimeError {
    fn new(reason: &'static str) -> Self {
        Self { reason }
    }
}

/// A clock time from a departure board.
///
/// Parsed from strict "HH:MM" format. Anything else — including the
/// provider's sentinel strings like "On time" — fails to parse and is
/// handled by the caller as an absent time.
///
/// # Examples
///
/// ```
/// use journey_engine::domain::BoardTime;
///
/// let time = BoardTime::parse_hhmm("14:30").unwrap();
/// assert_eq!(time.to_string(), "14:30");
/// assert_eq!(time.minutes_since_midnight(), 14 * 60 + 30);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct BoardTime(NaiveTime);

impl BoardTime {
    /// Parse a time from "HH:MM" format.
    ///
    /// # Examples
    ///
    /// ```
    /// use journey_engine::domain::BoardTime;
    ///
    /// // Valid times
    /// assert!(BoardTime::parse_hhmm("00:00").is_ok());
    /// assert!(BoardTime::parse_hhmm("23:59").is_ok());
    /// assert!(BoardTime::parse_hhmm("14:30").is_ok());
    ///
    /// // Invalid formats
    /// assert!(BoardTime::parse_hhmm("1430").is_err());
    /// assert!(BoardTime::parse_hhmm("14:3").is_err());
    /// assert!(BoardTime::parse_hhmm("25:00").is_err());
    /// assert!(BoardTime::parse_hhmm("On time").is_err());
    /// ```
    pub fn parse_hhmm(s: &str) -> Result<Self, TimeError> {
        // Must be exactly 5 characters: HH:MM
        if s.len() != 5 {
            return Err(TimeError::new("expected HH:MM format"));
        }

        let bytes = s.as_bytes();

        // Check colon position
        if bytes[2] != b':' {
            return Err(TimeError::new("expected colon at position 2"));
        }

        // Parse hours
        let hour =
            parse_two_digits(&bytes[0..2]).ok_or_else(|| TimeError::new("invalid hour digits"))?;
        if hour > 23 {
            return Err(TimeError::new("hour must be 0-23"));
        }

        // Parse minutes
        let minute = parse_two_digits(&bytes[3..5])
            .ok_or_else(|| TimeError::new("invalid minute digits"))?;
        if minute > 59 {
            return Err(TimeError::new("minute must be 0-59"));
        }

        let time = NaiveTime::from_hms_opt(hour, minute, 0)
            .ok_or_else(|| TimeError::new("invalid time"))?;

        Ok(Self(time))
    }

    /// Returns the hour (0-23).
    pub fn hour(&self) -> u32 {
        self.0.hour()
    }

    /// Returns the minute (0-59).
    pub fn minute(&self) -> u32 {
        self.0.minute()
    }

    /// Minutes since midnight (0-1439).
    pub fn minutes_since_midnight(&self) -> u32 {
        self.hour() * 60 + self.minute()
    }

    /// How many minutes later this time is than `aimed`, clamped at zero.
    ///
    /// Midnight rollover is not modelled, so an expected time that sorts
    /// before the aimed time reports zero lateness rather than a
    /// next-day delay.
    ///
    /// # Examples
    ///
    /// ```
    /// use journey_engine::domain::BoardTime;
    ///
    /// let aimed = BoardTime::parse_hhmm("10:00").unwrap();
    /// let expected = BoardTime::parse_hhmm("10:17").unwrap();
    /// assert_eq!(expected.minutes_late_from(aimed), 17);
    ///
    /// // Clamped: earlier-than-aimed is treated as not late
    /// assert_eq!(aimed.minutes_late_from(expected), 0);
    /// ```
    pub fn minutes_late_from(&self, aimed: BoardTime) -> u32 {
        self.minutes_since_midnight()
            .saturating_sub(aimed.minutes_since_midnight())
    }
}

impl Ord for BoardTime {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.cmp(&other.0)
    }
}

impl PartialOrd for BoardTime {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Debug for BoardTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BoardTime({:02}:{:02})", self.hour(), self.minute())
    }
}

impl fmt::Display for BoardTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

/// Parse two ASCII digit bytes into a u32.
fn parse_two_digits(bytes: &[u8]) -> Option<u32> {
    if bytes.len() != 2 {
        return None;
    }
    let d1 = (bytes[0] as char).to_digit(10)?;
    let d2 = (bytes[1] as char).to_digit(10)?;
    Some(d1 * 10 + d2)
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    /// Strategy for valid (hour, minute) pairs
    fn valid_hm() -> impl Strategy<Value = (u32, u32)> {
        (0u32..24, 0u32..60)
    }

    proptest! {
        /// Any valid HH:MM roundtrips through parse and Display
        #[test]
        fn roundtrip((h, m) in valid_hm()) {
            let s = format!("{:02}:{:02}", h, m);
            let t = BoardTime::parse_hhmm(&s).unwrap();
            prop_assert_eq!(t.to_string(), s);
            prop_assert_eq!(t.minutes_since_midnight(), h * 60 + m);
        }

        /// Lateness equals the minute difference when expected >= aimed
        #[test]
        fn lateness_matches_difference((ah, am) in valid_hm(), (eh, em) in valid_hm()) {
            let aimed = BoardTime::parse_hhmm(&format!("{:02}:{:02}", ah, am)).unwrap();
            let expected = BoardTime::parse_hhmm(&format!("{:02}:{:02}", eh, em)).unwrap();

            let a = ah * 60 + am;
            let e = eh * 60 + em;
            if e >= a {
                prop_assert_eq!(expected.minutes_late_from(aimed), e - a);
            } else {
                prop_assert_eq!(expected.minutes_late_from(aimed), 0);
            }
        }

        /// Strings without a colon at index 2 never parse
        #[test]
        fn malformed_rejected(s in "[0-9]{5}") {
            prop_assert!(BoardTime::parse_hhmm(&s).is_err());
        }
    }
}
