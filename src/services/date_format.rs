//! Date format resolution
//!
//! Bank exports write numeric dates in one of three orders. A single value
//! such as `03/04/2024` cannot say which, so the layout is inferred from a
//! sample of the column and accepted only when exactly one layout fits every
//! sampled value.

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

const MONTH: &str = "(?:0?[1-9]|1[0-2])";
const DAY: &str = "(?:0?[1-9]|[12][0-9]|3[01])";
const YEAR: &str = "[0-9]{4}";

/// Anchored pattern for three ASCII fields joined by one separator, `-` or `/`
fn layout(first: &str, second: &str, third: &str) -> Regex {
    let pattern = format!(
        "^(?:{first}-{second}-{third}|{first}/{second}/{third})$",
        first = first,
        second = second,
        third = third
    );
    Regex::new(&pattern).unwrap()
}

static YEAR_FIRST: Lazy<Regex> = Lazy::new(|| layout(YEAR, MONTH, DAY));
static MONTH_FIRST: Lazy<Regex> = Lazy::new(|| layout(MONTH, DAY, YEAR));
static DAY_FIRST: Lazy<Regex> = Lazy::new(|| layout(DAY, MONTH, YEAR));

/// Default number of rows sampled from the date column
pub const DEFAULT_SAMPLE_SIZE: usize = 30;

/// The three recognized numeric date layouts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DateFormat {
    /// `YYYY-MM-DD` or `YYYY/MM/DD`
    YearFirst,
    /// `MM-DD-YYYY` or `MM/DD/YYYY`
    MonthFirst,
    /// `DD-MM-YYYY` or `DD/MM/YYYY`
    DayFirst,
}

impl DateFormat {
    pub const ALL: [DateFormat; 3] = [Self::YearFirst, Self::MonthFirst, Self::DayFirst];

    pub fn name(&self) -> &'static str {
        match self {
            Self::YearFirst => "yearfirst",
            Self::MonthFirst => "monthfirst",
            Self::DayFirst => "dayfirst",
        }
    }

    fn pattern(&self) -> &'static Regex {
        match self {
            Self::YearFirst => &YEAR_FIRST,
            Self::MonthFirst => &MONTH_FIRST,
            Self::DayFirst => &DAY_FIRST,
        }
    }

    fn chrono_format(&self) -> &'static str {
        match self {
            Self::YearFirst => "%Y-%m-%d",
            Self::MonthFirst => "%m-%d-%Y",
            Self::DayFirst => "%d-%m-%Y",
        }
    }

    /// Whether a raw value has this layout
    pub fn matches(&self, raw: &str) -> bool {
        self.pattern().is_match(raw.trim())
    }

    /// Parse a raw value with this layout
    ///
    /// Returns `None` for values that have the layout but name no real day,
    /// such as `2024-02-30`.
    pub fn parse(&self, raw: &str) -> Option<NaiveDate> {
        let raw = raw.trim();
        if !self.matches(raw) {
            return None;
        }
        let normalized = raw.replace('/', "-");
        NaiveDate::parse_from_str(&normalized, self.chrono_format()).ok()
    }

    /// Infer the layout shared by every value in the sample
    pub fn resolve<S: AsRef<str>>(sample: &[S]) -> Result<DateFormat, FormatAmbiguous> {
        let candidates: Vec<DateFormat> = Self::ALL
            .into_iter()
            .filter(|format| sample.iter().all(|raw| format.matches(raw.as_ref())))
            .collect();

        match candidates.as_slice() {
            [single] => Ok(*single),
            _ => Err(FormatAmbiguous { candidates }),
        }
    }
}

impl fmt::Display for DateFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// The sample fits no layout, or more than one
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatAmbiguous {
    /// Layouts that fit every sampled value; empty when none did
    pub candidates: Vec<DateFormat>,
}

impl fmt::Display for FormatAmbiguous {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.candidates.is_empty() {
            write!(f, "no date format matches every sampled value")
        } else {
            let names: Vec<_> = self.candidates.iter().map(|c| c.name()).collect();
            write!(f, "sampled dates fit several formats: {}", names.join(", "))
        }
    }
}

impl std::error::Error for FormatAmbiguous {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_unanimous_formats() {
        let year_first = ["2024-01-01", "2024-01-02", "2024-01-03"];
        assert_eq!(DateFormat::resolve(&year_first), Ok(DateFormat::YearFirst));

        let month_first = ["01/01/2024", "02/01/2024", "03/30/2024"];
        assert_eq!(DateFormat::resolve(&month_first), Ok(DateFormat::MonthFirst));

        let day_first = ["01-01-2024", "28-01-2024", "03-01-2024"];
        assert_eq!(DateFormat::resolve(&day_first), Ok(DateFormat::DayFirst));
    }

    #[test]
    fn test_resolve_mixed_layouts_fails() {
        let mixed = ["01-01-2024", "28-01-2024", "03-01-2024", "2024-01-01"];
        let err = DateFormat::resolve(&mixed).unwrap_err();
        assert!(err.candidates.is_empty());
    }

    #[test]
    fn test_resolve_ambiguous_day_and_month() {
        let ambiguous = ["01-01-2024", "04-01-2024", "03-01-2024"];
        let err = DateFormat::resolve(&ambiguous).unwrap_err();
        assert_eq!(
            err.candidates,
            vec![DateFormat::MonthFirst, DateFormat::DayFirst]
        );
    }

    #[test]
    fn test_resolve_tolerates_whitespace_and_single_digits() {
        let sample = [" 2024/1/5 ", "2024-12-31"];
        assert_eq!(DateFormat::resolve(&sample), Ok(DateFormat::YearFirst));

        let sample = ["1/15/2024", "12/3/2024"];
        assert_eq!(DateFormat::resolve(&sample), Ok(DateFormat::MonthFirst));
    }

    #[test]
    fn test_resolve_rejects_out_of_range_fields() {
        let sample = ["13/13/2024"];
        assert!(DateFormat::resolve(&sample).unwrap_err().candidates.is_empty());
    }

    #[test]
    fn test_parse() {
        let d = |y, m, day| NaiveDate::from_ymd_opt(y, m, day);
        assert_eq!(DateFormat::YearFirst.parse("2024/02/05"), d(2024, 2, 5));
        assert_eq!(DateFormat::MonthFirst.parse("02-05-2024"), d(2024, 2, 5));
        assert_eq!(DateFormat::DayFirst.parse("05/02/2024"), d(2024, 2, 5));
        assert_eq!(DateFormat::YearFirst.parse("2024-02-30"), None);
        assert_eq!(DateFormat::YearFirst.parse("05/02/2024"), None);
    }

    #[test]
    fn test_non_ascii_digits_match_no_layout() {
        let sample = ["\u{0662}\u{0660}\u{0662}\u{0664}-01-05"];
        assert!(DateFormat::resolve(&sample).unwrap_err().candidates.is_empty());
        assert_eq!(DateFormat::DayFirst.parse("\u{0660}5/02/2024"), None);
    }

    #[test]
    fn test_mixed_separators_within_a_value_are_rejected() {
        assert!(!DateFormat::YearFirst.matches("2024/01-05"));
        assert_eq!(DateFormat::YearFirst.parse("2024/01-05"), None);
        assert_eq!(DateFormat::MonthFirst.parse("02-05/2024"), None);

        let sample = ["2024-01-05", "2024/01-06"];
        assert!(DateFormat::resolve(&sample).unwrap_err().candidates.is_empty());
    }
}
