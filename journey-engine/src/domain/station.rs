//! Station code types.

use std::fmt;

/// Error returned when parsing an invalid CRS code.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid CRS code: {reason}")]
pub struct InvalidCrs {
    reason: &'static str,
}

/// A valid 3-letter CRS (Computer Reservation System) station code.
///
/// CRS codes are stored as 3 uppercase ASCII letters. This type guarantees
/// that any `Crs` value is valid by construction. Parsing accepts lowercase
/// input and normalises it, since codes arrive from free-text station
/// search and from hand-editable favourites files.
///
/// # Examples
///
/// ```
/// use journey_engine::domain::Crs;
///
/// let pad = Crs::parse("PAD").unwrap();
/// assert_eq!(pad.as_str(), "PAD");
///
/// // Lowercase is normalised
/// assert_eq!(Crs::parse("rdg").unwrap().as_str(), "RDG");
///
/// // Wrong length is rejected
/// assert!(Crs::parse("PA").is_err());
/// assert!(Crs::parse("PADD").is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Crs([u8; 3]);

impl Crs {
    /// Parse a CRS code from a string.
    ///
    /// The input must be exactly 3 ASCII letters; case is normalised to
    /// uppercase.
    pub fn parse(s: &str) -> Result<Self, InvalidCrs> {
        let bytes = s.as_bytes();

        if bytes.len() != 3 {
            return Err(InvalidCrs {
                reason: "must be exactly 3 characters",
            });
        }

        let mut code = [0u8; 3];
        for (i, &b) in bytes.iter().enumerate() {
            if !b.is_ascii_alphabetic() {
                return Err(InvalidCrs {
                    reason: "must be ASCII letters A-Z",
                });
            }
            code[i] = b.to_ascii_uppercase();
        }

        Ok(Crs(code))
    }

    /// Returns the CRS code as a string slice.
    pub fn as_str(&self) -> &str {
        // SAFETY: We only store valid ASCII uppercase letters
        std::str::from_utf8(&self.0).unwrap()
    }
}

impl fmt::Debug for Crs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Crs({})", self.as_str())
    }
}

impl fmt::Display for Crs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl serde::Serialize for Crs {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> serde::Deserialize<'de> for Crs {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = <String as serde::Deserialize>::deserialize(deserializer)?;
        Crs::parse(&s).map_err(serde::de::Error::custom)
    }
}
