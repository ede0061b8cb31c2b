//! Payroll period value type.
//!
//! A payroll period is a single calendar month written as `YYYY-MM`.
//! Parsing is strict: the month part must be 01 through 12, so inputs
//! like "2025-13" are rejected instead of silently matching nothing.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{EngineError, EngineResult};

/// A calendar month used as the payroll aggregation window.
///
/// Periods serialize as their `YYYY-MM` string form, matching how they
/// are stored on payroll records and passed over the API.
///
/// # Example
///
/// ```
/// use hadirpay::models::Period;
///
/// let period: Period = "2025-07".parse().unwrap();
/// assert_eq!(period.year(), 2025);
/// assert_eq!(period.month(), 7);
/// assert_eq!(period.to_string(), "2025-07");
///
/// assert!("2025-13".parse::<Period>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Period {
    year: i32,
    month: u32,
}

impl Period {
    /// Creates a period from a year and a 1-based month.
    ///
    /// Returns [`EngineError::InvalidPeriod`] if the month is outside 1..=12.
    pub fn new(year: i32, month: u32) -> EngineResult<Self> {
        if !(1..=12).contains(&month) {
            return Err(EngineError::InvalidPeriod {
                input: format!("{:04}-{:02}", year, month),
            });
        }
        Ok(Self { year, month })
    }

    /// The calendar year of this period.
    pub fn year(&self) -> i32 {
        self.year
    }

    /// The 1-based month of this period.
    pub fn month(&self) -> u32 {
        self.month
    }

    /// Returns true when the given date falls inside this period.
    ///
    /// # Example
    ///
    /// ```
    /// use chrono::NaiveDate;
    /// use hadirpay::models::Period;
    ///
    /// let period: Period = "2025-07".parse().unwrap();
    /// assert!(period.contains(NaiveDate::from_ymd_opt(2025, 7, 31).unwrap()));
    /// assert!(!period.contains(NaiveDate::from_ymd_opt(2025, 8, 1).unwrap()));
    /// ```
    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }
}

impl FromStr for Period {
    type Err = EngineError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        parse_period(input).ok_or_else(|| EngineError::InvalidPeriod {
            input: input.to_string(),
        })
    }
}

fn parse_period(input: &str) -> Option<Period> {
    let (year_part, month_part) = input.split_once('-')?;
    if year_part.len() != 4 || !year_part.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if month_part.len() != 2 || !month_part.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let year = year_part.parse().ok()?;
    let month: u32 = month_part.parse().ok()?;
    if !(1..=12).contains(&month) {
        return None;
    }
    Some(Period { year, month })
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl Serialize for Period {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Period {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
