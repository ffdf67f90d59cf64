//! Calendar-month period tokens (`yyyymm`) used to partition scrape requests.

use anyhow::{bail, Result};
use chrono::{Datelike, Utc};
use std::fmt;

/// One calendar month, formatted as a six-digit `yyyymm` token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Period {
    year: i32,
    month: u32,
}

impl Period {
    /// Build a period, validating the month.
    pub fn new(year: i32, month: u32) -> Result<Self> {
        if !(1..=12).contains(&month) {
            bail!("invalid month {month} in period {year}-{month}");
        }
        Ok(Self { year, month })
    }

    /// Parse a `yyyymm` token such as `"202301"`.
    pub fn parse(token: &str) -> Result<Self> {
        if token.len() != 6 || !token.bytes().all(|b| b.is_ascii_digit()) {
            bail!("period token must be six digits (yyyymm), got {token:?}");
        }
        let year: i32 = token[..4].parse()?;
        let month: u32 = token[4..].parse()?;
        Self::new(year, month)
    }

    /// The current calendar month (UTC).
    pub fn current() -> Self {
        let now = Utc::now();
        Self {
            year: now.year(),
            month: now.month(),
        }
    }

    /// The `yyyymm` token.
    pub fn token(&self) -> String {
        format!("{:04}{:02}", self.year, self.month)
    }

    /// The month immediately after this one.
    pub fn succ(&self) -> Self {
        if self.month == 12 {
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.token())
    }
}

/// All months from `start` to `end`, inclusive. Empty when `start > end`.
pub fn period_range(start: Period, end: Period) -> Vec<Period> {
    let mut months = Vec::new();
    let mut current = start;
    while current <= end {
        months.push(current);
        current = current.succ();
    }
    months
}
