//! Domain identifier types with validation
//!
//! Newtype wrappers for identifiers that travel through the export pipeline.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Dataset edition (publication year of the territorial division)
///
/// # Examples
///
/// ```
/// use geodatabr::domain::ids::Edition;
/// use std::str::FromStr;
///
/// let edition = Edition::from_str("2016").unwrap();
/// assert_eq!(edition.year(), 2016);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub struct Edition(u16);

impl Edition {
    /// Earliest edition the exporter accepts
    pub const MIN_YEAR: u16 = 1900;

    /// Creates a new Edition from a year
    ///
    /// Returns `Err` if the year is implausibly old.
    pub fn new(year: u16) -> Result<Self, String> {
        if year < Self::MIN_YEAR {
            return Err(format!(
                "Invalid edition {year}. Must be {} or later",
                Self::MIN_YEAR
            ));
        }
        Ok(Self(year))
    }

    /// Returns the edition year
    pub fn year(&self) -> u16 {
        self.0
    }
}

impl fmt::Display for Edition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Edition {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let year = s
            .trim()
            .parse::<u16>()
            .map_err(|_| format!("Invalid edition '{s}'. Expected a year such as 2016"))?;
        Self::new(year)
    }
}

impl TryFrom<u16> for Edition {
    type Error = String;

    fn try_from(year: u16) -> Result<Self, Self::Error> {
        Self::new(year)
    }
}

impl From<Edition> for u16 {
    fn from(edition: Edition) -> Self {
        edition.0
    }
}
