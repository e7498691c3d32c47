use crate::error::CoreError;
use chrono::NaiveDate;
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Largest year a `YYYY-MM` period can carry.
pub const MAX_YEAR: i32 = 9999;

/// A calendar month, written `YYYY-MM` on the wire.
///
/// Field order matters: the derived `Ord` compares the year first, so sorting a slice of
/// `YearMonth` values (or keying a `BTreeMap` with them) yields chronological order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    year: i32,
    month: u32,
}

impl YearMonth {
    /// Builds a month, rejecting months outside `1..=12` and years that do not fit in four
    /// digits.
    pub fn new(year: i32, month: u32) -> Result<Self, CoreError> {
        if !(0..=MAX_YEAR).contains(&year) {
            return Err(CoreError::InvalidInput(
                "year".to_string(),
                format!("{year} is not between 0 and {MAX_YEAR}"),
            ));
        }
        if !(1..=12).contains(&month) {
            return Err(CoreError::InvalidInput(
                "month".to_string(),
                format!("{month} is not between 1 and 12"),
            ));
        }
        Ok(Self { year, month })
    }

    /// The calendar month immediately following this one.
    pub fn next(&self) -> Self {
        if self.month == 12 {
            Self {
                year: self.year.saturating_add(1),
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    /// A short display label such as `Jan 2024`.
    pub fn label(&self) -> String {
        match NaiveDate::from_ymd_opt(self.year, self.month, 1) {
            Some(date) => date.format("%b %Y").to_string(),
            None => self.to_string(),
        }
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for YearMonth {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid =
            || CoreError::InvalidInput("period".to_string(), format!("'{s}' is not YYYY-MM"));

        let (year, month) = s.trim().split_once('-').ok_or_else(invalid)?;
        if year.len() != 4 || !year.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        let year: i32 = year.parse().map_err(|_| invalid())?;
        let month: u32 = month.parse().map_err(|_| invalid())?;
        Self::new(year, month)
    }
}

impl Serialize for YearMonth {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

struct YearMonthVisitor;

impl Visitor<'_> for YearMonthVisitor {
    type Value = YearMonth;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a period formatted as YYYY-MM")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        v.parse().map_err(E::custom)
    }
}

impl<'de> Deserialize<'de> for YearMonth {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_str(YearMonthVisitor)
    }
}
