//! Target periods and calendar-month keys
//!
//! A target amount is expressed per period; reports convert it either to an
//! exact number of elapsed days or to one calendar month.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::LedgerError;

/// Recurrence unit a target amount is expressed in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetPeriod {
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

impl TargetPeriod {
    /// Parse a period name, case-insensitively
    pub fn parse(s: &str) -> Result<Self, LedgerError> {
        match s.trim().to_lowercase().as_str() {
            "daily" => Ok(Self::Daily),
            "weekly" => Ok(Self::Weekly),
            "monthly" => Ok(Self::Monthly),
            "yearly" => Ok(Self::Yearly),
            _ => Err(LedgerError::InvalidPeriod(s.to_string())),
        }
    }

    /// Length of the period in days, using a 30-day month and 365-day year
    pub fn days(&self) -> f64 {
        match self {
            Self::Daily => 1.0,
            Self::Weekly => 7.0,
            Self::Monthly => 30.0,
            Self::Yearly => 365.0,
        }
    }

    /// Factor that converts one period's amount to `elapsed_days` worth
    pub fn factor_for_days(&self, elapsed_days: i64) -> f64 {
        elapsed_days as f64 / self.days()
    }

    /// Factor that converts one period's amount to a calendar month
    pub fn factor_for_month(&self) -> f64 {
        match self {
            Self::Daily => 30.0,
            Self::Weekly => 30.0 / 7.0,
            Self::Monthly => 1.0,
            Self::Yearly => 1.0 / 12.0,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
            Self::Yearly => "yearly",
        }
    }
}

impl FromStr for TargetPeriod {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for TargetPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Daily => write!(f, "Daily"),
            Self::Weekly => write!(f, "Weekly"),
            Self::Monthly => write!(f, "Monthly"),
            Self::Yearly => write!(f, "Yearly"),
        }
    }
}

/// A calendar month, ordered chronologically
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MonthKey {
    pub year: i32,
    pub month: u32,
}

impl MonthKey {
    pub fn new(year: i32, month: u32) -> Self {
        Self { year, month }
    }

    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn first_day(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.first_day() {
            Some(date) => write!(f, "{}", date.format("%B %Y")),
            None => write!(f, "{:04}-{:02}", self.year, self.month),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_period() {
        assert_eq!(TargetPeriod::parse("monthly").unwrap(), TargetPeriod::Monthly);
        assert_eq!(TargetPeriod::parse(" Weekly ").unwrap(), TargetPeriod::Weekly);
        assert_eq!("YEARLY".parse::<TargetPeriod>().unwrap(), TargetPeriod::Yearly);
        assert!(matches!(
            TargetPeriod::parse("fortnightly"),
            Err(LedgerError::InvalidPeriod(p)) if p == "fortnightly"
        ));
    }

    #[test]
    fn test_factor_for_days() {
        assert_eq!(TargetPeriod::Daily.factor_for_days(5), 5.0);
        assert_eq!(TargetPeriod::Weekly.factor_for_days(14), 2.0);
        assert_eq!(TargetPeriod::Monthly.factor_for_days(15), 0.5);
        assert_eq!(TargetPeriod::Yearly.factor_for_days(73), 0.2);
    }

    #[test]
    fn test_factor_for_month() {
        assert_eq!(TargetPeriod::Daily.factor_for_month(), 30.0);
        assert_eq!(TargetPeriod::Monthly.factor_for_month(), 1.0);
        assert!((TargetPeriod::Yearly.factor_for_month() - 1.0 / 12.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_month_key_display_and_order() {
        let jan = MonthKey::of(NaiveDate::from_ymd_opt(2024, 1, 31).unwrap());
        let feb = MonthKey::new(2024, 2);
        let dec = MonthKey::new(2023, 12);
        assert_eq!(jan.to_string(), "January 2024");
        assert!(dec < jan && jan < feb);
    }
}
