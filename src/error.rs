//! Custom error types for the cash flow ledger
//!
//! Every failure the ledger core can surface is a distinct variant so the
//! caller can decide whether to re-prompt, retry with other input, or abort.

use thiserror::Error;

/// The main error type for ledger operations
#[derive(Error, Debug)]
pub enum LedgerError {
    /// A required CSV column could not be found in the header row
    #[error("'{header}' column not found in CSV file.{}", header_note(.field, .header))]
    MissingColumn {
        /// Which transaction field the column was meant to hold
        field: &'static str,
        /// Header name that was looked for
        header: String,
    },

    /// The sampled date column matches zero or several date layouts
    #[error("Could not determine the date format of column '{column}'")]
    DateFormatUnresolvable { column: String },

    /// A data row could not be converted into a transaction
    #[error("Malformed row {row}: {reason}")]
    MalformedRow { row: usize, reason: String },

    /// Period text is not one of daily, weekly, monthly, yearly
    #[error("Invalid period '{0}': expected daily, weekly, monthly or yearly")]
    InvalidPeriod(String),

    /// No transaction in the ledger carries this category
    #[error("Unknown category: '{0}'")]
    UnknownCategory(String),

    /// The category holds both income and expense transactions
    #[error("Category '{0}' has both income and expense transactions")]
    MixedCategory(String),

    /// A target report was requested but no budget or goal exists
    #[error("No budgets or goals have been set")]
    NoTargetsSet,

    /// Averages over a span of zero days are undefined
    #[error("All transactions fall on a single day; per-day figures are undefined")]
    ZeroDaySpan,

    /// The operation needs at least one transaction
    #[error("The ledger has no transactions")]
    EmptyLedger,

    /// Target amounts cannot be negative
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    /// Date range whose start lies after its end
    #[error("Invalid date range: {start} is after {end}")]
    InvalidDateRange {
        start: chrono::NaiveDate,
        end: chrono::NaiveDate,
    },

    /// Export file name contains characters outside [A-Za-z0-9_-]
    #[error("Invalid file name '{0}'. Please choose a name that contains only alphanumeric characters, underscores, or hyphens.")]
    InvalidFileName(String),

    /// Export extension does not fit the payload being written
    #[error("Unsupported export type '{0}'")]
    UnsupportedExportType(String),

    /// Validation errors for data models
    #[error("Validation error: {0}")]
    Validation(String),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// CSV reader/writer errors
    #[error("CSV error: {0}")]
    Csv(String),
}

impl LedgerError {
    /// Create a "not found" error for transactions
    pub fn transaction_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Transaction",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for targets
    pub fn target_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Target",
            identifier: identifier.into(),
        }
    }

    pub fn missing_column(field: &'static str, header: impl Into<String>) -> Self {
        Self::MissingColumn {
            field,
            header: header.into(),
        }
    }

    pub fn malformed_row(row: usize, reason: impl Into<String>) -> Self {
        Self::MalformedRow {
            row,
            reason: reason.into(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Input-shape errors the caller can fix by supplying different column
    /// names or a differently formatted file
    pub fn is_input_shape(&self) -> bool {
        matches!(
            self,
            Self::MissingColumn { .. } | Self::DateFormatUnresolvable { .. }
        )
    }
}

fn header_note(field: &str, header: &str) -> String {
    if field.eq_ignore_ascii_case(header.trim()) {
        String::new()
    } else {
        format!(" It should hold the {} field.", field)
    }
}

impl From<std::io::Error> for LedgerError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<csv::Error> for LedgerError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err.to_string())
    }
}

impl From<serde_json::Error> for LedgerError {
    fn from(err: serde_json::Error) -> Self {
        Self::Config(err.to_string())
    }
}

/// Result type alias for ledger operations
pub type LedgerResult<T> = Result<T, LedgerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_column_display() {
        let err = LedgerError::missing_column("date", "date");
        assert_eq!(err.to_string(), "'date' column not found in CSV file.");
        assert!(err.is_input_shape());

        let err = LedgerError::missing_column("value", "Amount");
        assert_eq!(
            err.to_string(),
            "'Amount' column not found in CSV file. It should hold the value field."
        );
    }

    #[test]
    fn test_not_found_error() {
        let err = LedgerError::transaction_not_found("txn-1234abcd");
        assert_eq!(err.to_string(), "Transaction not found: txn-1234abcd");
        assert!(err.is_not_found());
        assert!(!err.is_input_shape());
    }

    #[test]
    fn test_invalid_file_name_message() {
        let err = LedgerError::InvalidFileName("test@export".into());
        assert!(err
            .to_string()
            .contains("only alphanumeric characters, underscores, or hyphens"));
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: LedgerError = io_err.into();
        assert!(matches!(err, LedgerError::Io(_)));
    }
}
