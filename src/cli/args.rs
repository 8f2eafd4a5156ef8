//! Arguments shared by every ledger command

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::Args;
use tracing::info;

use crate::config::Settings;
use crate::error::{LedgerError, LedgerResult};
use crate::ledger::{DateRange, Ledger, LedgerFilter};
use crate::models::TransactionType;
use crate::services::{FieldNames, ImportService};

/// Ledger CSV file and header name overrides
#[derive(Args, Debug, Clone)]
pub struct LedgerArgs {
    /// Path to the ledger CSV file
    pub path: PathBuf,

    /// Header of the date column
    #[arg(long)]
    pub date_field: Option<String>,

    /// Header of the category column
    #[arg(long)]
    pub category_field: Option<String>,

    /// Header of the description column
    #[arg(long)]
    pub description_field: Option<String>,

    /// Header of the value column
    #[arg(long)]
    pub value_field: Option<String>,
}

impl LedgerArgs {
    /// Configured header names with command-line overrides applied
    pub fn field_names(&self, configured: &FieldNames) -> FieldNames {
        let pick = |arg: &Option<String>, default: &String| {
            arg.clone().unwrap_or_else(|| default.clone())
        };
        FieldNames {
            date: pick(&self.date_field, &configured.date),
            category: pick(&self.category_field, &configured.category),
            description: pick(&self.description_field, &configured.description),
            value: pick(&self.value_field, &configured.value),
        }
    }

    /// Import the CSV file into a new ledger
    pub fn load(&self, settings: &Settings) -> LedgerResult<Ledger> {
        let importer = ImportService::new(self.field_names(&settings.field_names))
            .with_sample_size(settings.date_sample_size);
        let reader = importer.read_path(&self.path)?;
        if let Some(format) = reader.date_format() {
            info!(%format, "date format detected");
        }

        let mut ledger = Ledger::new();
        let count = ledger.extend_from(reader)?;
        info!(count, path = %self.path.display(), "ledger loaded");
        Ok(ledger)
    }
}

/// Transaction filter flags
#[derive(Args, Debug, Clone, Default)]
pub struct FilterArgs {
    /// Earliest date to include (YYYY-MM-DD)
    #[arg(long)]
    pub from: Option<String>,

    /// Latest date to include (YYYY-MM-DD)
    #[arg(long)]
    pub to: Option<String>,

    /// Only this category; an empty value selects uncategorized transactions
    #[arg(long)]
    pub category: Option<String>,

    /// Only income or only expense
    #[arg(long = "type", value_name = "TYPE")]
    pub kind: Option<String>,
}

impl FilterArgs {
    pub fn to_filter(&self) -> LedgerResult<LedgerFilter> {
        let mut filter = LedgerFilter::new();

        if self.from.is_some() || self.to.is_some() {
            let start = match &self.from {
                Some(s) => parse_date(s)?,
                None => NaiveDate::MIN,
            };
            let end = match &self.to {
                Some(s) => parse_date(s)?,
                None => NaiveDate::MAX,
            };
            filter = filter.date_range(DateRange::new(start, end)?);
        }

        if let Some(category) = &self.category {
            filter = filter.category(category);
        }

        if let Some(kind) = &self.kind {
            let kind = TransactionType::parse(kind).ok_or_else(|| {
                LedgerError::Validation(format!(
                    "Invalid transaction type '{}': expected income or expense",
                    kind
                ))
            })?;
            filter = filter.kind(kind);
        }

        Ok(filter)
    }

    /// Apply the flags, returning the ledger itself when none were given
    pub fn apply(&self, ledger: Ledger) -> LedgerResult<Ledger> {
        let filter = self.to_filter()?;
        if filter.is_empty() {
            Ok(ledger)
        } else {
            Ok(ledger.filter(&filter))
        }
    }
}

/// Parse a date given on the command line
pub fn parse_date(s: &str) -> LedgerResult<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").map_err(|_| {
        LedgerError::Validation(format!("Invalid date '{}'. Use YYYY-MM-DD format.", s))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::tests::sample_ledger;

    #[test]
    fn test_field_name_overrides() {
        let args = LedgerArgs {
            path: PathBuf::from("ledger.csv"),
            date_field: Some("Posted".into()),
            category_field: None,
            description_field: None,
            value_field: Some("Amount".into()),
        };
        let names = args.field_names(&FieldNames::default());
        assert_eq!(names.date, "Posted");
        assert_eq!(names.category, "category");
        assert_eq!(names.value, "Amount");
    }

    #[test]
    fn test_no_flags_keeps_ledger() {
        let ledger = sample_ledger();
        let filtered = FilterArgs::default().apply(ledger).unwrap();
        assert_eq!(filtered.len(), 5);
    }

    #[test]
    fn test_open_ended_range() {
        let args = FilterArgs {
            from: Some("2024-02-05".into()),
            ..Default::default()
        };
        let filtered = args.apply(sample_ledger()).unwrap();
        assert_eq!(filtered.len(), 3);
    }

    #[test]
    fn test_type_and_category_flags() {
        let args = FilterArgs {
            category: Some(" food ".into()),
            kind: Some("Expense".into()),
            ..Default::default()
        };
        let filtered = args.apply(sample_ledger()).unwrap();
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered.transactions()[0].description, "Restaurant");
    }

    #[test]
    fn test_invalid_flags() {
        let args = FilterArgs {
            kind: Some("transfer".into()),
            ..Default::default()
        };
        assert!(matches!(args.to_filter(), Err(LedgerError::Validation(_))));

        let args = FilterArgs {
            from: Some("2024-03-01".into()),
            to: Some("2024-02-01".into()),
            ..Default::default()
        };
        assert!(matches!(
            args.to_filter(),
            Err(LedgerError::InvalidDateRange { .. })
        ));

        assert!(parse_date("02/01/2024").is_err());
    }
}
