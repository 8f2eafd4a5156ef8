//! CSV Import service
//!
//! Maps CSV headers to the four transaction fields, infers the date layout
//! from a sample of the date column, and yields transactions one row at a
//! time. The importer never touches a ledger; callers feed the resulting
//! sequence to [`Ledger::extend_from`](crate::ledger::Ledger::extend_from).

use std::collections::VecDeque;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use csv::{Reader, ReaderBuilder, StringRecord, StringRecordsIntoIter, Trim};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::date_format::{DateFormat, DEFAULT_SAMPLE_SIZE};
use crate::error::{LedgerError, LedgerResult};
use crate::models::{Money, Transaction};

/// Header names for the four transaction fields
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldNames {
    pub date: String,
    pub category: String,
    pub description: String,
    pub value: String,
}

impl Default for FieldNames {
    fn default() -> Self {
        Self {
            date: "date".to_string(),
            category: "category".to_string(),
            description: "description".to_string(),
            value: "value".to_string(),
        }
    }
}

/// Column indices resolved from a header row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnMapping {
    pub date_column: usize,
    /// `None` when the file has no category column
    pub category_column: Option<usize>,
    pub description_column: usize,
    pub value_column: usize,
}

impl ColumnMapping {
    /// Resolve each field to a column by case-insensitive exact header match
    pub fn from_headers(headers: &StringRecord, names: &FieldNames) -> LedgerResult<Self> {
        let find = |name: &str| {
            let wanted = name.trim().to_lowercase();
            headers
                .iter()
                .position(|h| h.trim().to_lowercase() == wanted)
        };

        let date_column =
            find(&names.date).ok_or_else(|| LedgerError::missing_column("date", &names.date))?;
        let value_column =
            find(&names.value).ok_or_else(|| LedgerError::missing_column("value", &names.value))?;
        let description_column = find(&names.description)
            .ok_or_else(|| LedgerError::missing_column("description", &names.description))?;
        let category_column = find(&names.category);

        Ok(Self {
            date_column,
            category_column,
            description_column,
            value_column,
        })
    }
}

/// Service for CSV import
#[derive(Debug, Clone)]
pub struct ImportService {
    field_names: FieldNames,
    sample_size: usize,
}

impl Default for ImportService {
    fn default() -> Self {
        Self::new(FieldNames::default())
    }
}

impl ImportService {
    /// Create a new import service
    pub fn new(field_names: FieldNames) -> Self {
        Self {
            field_names,
            sample_size: DEFAULT_SAMPLE_SIZE,
        }
    }

    /// Set how many rows are sampled to infer the date layout
    pub fn with_sample_size(mut self, sample_size: usize) -> Self {
        self.sample_size = sample_size.max(1);
        self
    }

    /// Open a CSV file and prepare to read its transactions
    ///
    /// The file handle is owned by the returned reader and closed when the
    /// reader is dropped, whether or not every row was consumed.
    pub fn read_path(&self, path: impl AsRef<Path>) -> LedgerResult<TransactionReader<BufReader<File>>> {
        let path = path.as_ref();
        let file = File::open(path)
            .map_err(|e| LedgerError::Io(format!("Failed to open {}: {}", path.display(), e)))?;
        info!(path = %path.display(), "importing transactions");
        self.read(BufReader::new(file))
    }

    /// Prepare to read transactions from any CSV source
    pub fn read<R: Read>(&self, source: R) -> LedgerResult<TransactionReader<R>> {
        let mut reader: Reader<R> = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(Trim::All)
            .from_reader(source);

        let headers = reader.headers()?.clone();
        let mapping = ColumnMapping::from_headers(&headers, &self.field_names)?;

        let mut records = reader.into_records();
        let mut sample = VecDeque::with_capacity(self.sample_size);
        while sample.len() < self.sample_size {
            match records.next() {
                Some(record) => sample.push_back(record?),
                None => break,
            }
        }

        let format = if sample.is_empty() {
            None
        } else {
            let dates: Vec<&str> = sample
                .iter()
                .map(|r| r.get(mapping.date_column).unwrap_or(""))
                .collect();
            let format = DateFormat::resolve(&dates).map_err(|e| {
                debug!(reason = %e, "date format unresolved");
                LedgerError::DateFormatUnresolvable {
                    column: self.field_names.date.clone(),
                }
            })?;
            debug!(%format, sampled = dates.len(), "date format resolved");
            Some(format)
        };

        Ok(TransactionReader {
            records,
            buffered: sample,
            mapping,
            format,
            row: 0,
            finished: false,
        })
    }
}

/// Lazy sequence of transactions read from one CSV source
///
/// Each row is converted when requested. The first error ends the sequence;
/// reading the file again needs a fresh reader.
pub struct TransactionReader<R> {
    records: StringRecordsIntoIter<R>,
    /// Rows already read while sampling the date column
    buffered: VecDeque<StringRecord>,
    mapping: ColumnMapping,
    format: Option<DateFormat>,
    /// 1-based index of the last data row handed out
    row: usize,
    finished: bool,
}

impl<R: Read> TransactionReader<R> {
    /// The inferred date layout, `None` for a file without data rows
    pub fn date_format(&self) -> Option<DateFormat> {
        self.format
    }

    fn next_record(&mut self) -> Option<LedgerResult<StringRecord>> {
        if let Some(record) = self.buffered.pop_front() {
            return Some(Ok(record));
        }
        self.records.next().map(|r| r.map_err(LedgerError::from))
    }

    fn convert(&self, record: &StringRecord) -> LedgerResult<Transaction> {
        let row = self.row;
        let format = self
            .format
            .ok_or_else(|| LedgerError::malformed_row(row, "date format was not resolved"))?;

        let field = move |index: usize, name: &str| {
            record
                .get(index)
                .ok_or_else(|| LedgerError::malformed_row(row, format!("missing {} field", name)))
        };

        let raw_date = field(self.mapping.date_column, "date")?;
        let date = format.parse(raw_date).ok_or_else(|| {
            LedgerError::malformed_row(row, format!("'{}' is not a valid {} date", raw_date, format))
        })?;

        let raw_value = field(self.mapping.value_column, "value")?;
        let value = Money::parse(raw_value).map_err(|e| LedgerError::malformed_row(row, e.to_string()))?;

        let description = field(self.mapping.description_column, "description")?;
        if description.is_empty() {
            return Err(LedgerError::malformed_row(row, "description is empty"));
        }

        let category = self
            .mapping
            .category_column
            .and_then(|index| record.get(index))
            .unwrap_or("");

        Ok(Transaction::new(date, category, description, value))
    }
}

impl<R: Read> Iterator for TransactionReader<R> {
    type Item = LedgerResult<Transaction>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        let record = match self.next_record()? {
            Ok(record) => record,
            Err(e) => {
                self.finished = true;
                return Some(Err(e));
            }
        };
        self.row += 1;

        let result = self.convert(&record);
        if result.is_err() {
            self.finished = true;
        }
        Some(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn import(csv_data: &str) -> LedgerResult<Vec<Transaction>> {
        ImportService::default()
            .read(csv_data.as_bytes())?
            .collect()
    }

    #[test]
    fn test_parse_simple_csv() {
        let csv_data = "Date,Category,Description,Value\n\
                        2024-01-05,,Salary,2500.00\n\
                        2024-01-06,Food,Restaurant,-50.00\n";
        let transactions = import(csv_data).unwrap();

        assert_eq!(transactions.len(), 2);
        assert_eq!(transactions[0].date, NaiveDate::from_ymd_opt(2024, 1, 5).unwrap());
        assert_eq!(transactions[0].value.cents(), 250000);
        assert_eq!(transactions[0].description, "Salary");
        assert!(transactions[0].is_uncategorized());
        assert_eq!(transactions[1].category, "Food");
    }

    #[test]
    fn test_headers_match_case_insensitively_in_any_order() {
        let csv_data = "VALUE , description,DATE\n-120.50,Walmart,02/14/2024\n";
        let transactions = import(csv_data).unwrap();
        assert_eq!(transactions.len(), 1);
        assert_eq!(transactions[0].value.cents(), -12050);
        assert_eq!(transactions[0].date, NaiveDate::from_ymd_opt(2024, 2, 14).unwrap());
    }

    #[test]
    fn test_missing_category_column_defaults_to_uncategorized() {
        let csv_data = "Date,Description,Value\n2024-01-01,Salary,2500\n";
        let transactions = import(csv_data).unwrap();
        assert_eq!(transactions[0].category, "");
    }

    #[test]
    fn test_missing_required_columns() {
        let err = import("Value,Description\n2500.00,Salary\n").unwrap_err();
        assert_eq!(err.to_string(), "'date' column not found in CSV file.");

        let err = import("Date,Description\n2024-01-01,Salary\n").unwrap_err();
        assert_eq!(err.to_string(), "'value' column not found in CSV file.");

        let err = import("Date,Value\n2024-01-01,2500.00\n").unwrap_err();
        assert_eq!(err.to_string(), "'description' column not found in CSV file.");
    }

    #[test]
    fn test_custom_field_names() {
        let names = FieldNames {
            date: "Posted".into(),
            category: "Type".into(),
            description: "Payee".into(),
            value: "Amount".into(),
        };
        let csv_data = "Posted,Payee,Amount,Type\n2024-03-01,Landlord,-1000,rent\n";
        let transactions: Vec<_> = ImportService::new(names)
            .read(csv_data.as_bytes())
            .unwrap()
            .collect::<LedgerResult<_>>()
            .unwrap();
        assert_eq!(transactions[0].category, "Rent");
        assert_eq!(transactions[0].description, "Landlord");
    }

    #[test]
    fn test_custom_header_missing_names_the_field() {
        let names = FieldNames {
            date: "Posted".into(),
            ..FieldNames::default()
        };
        let csv_data = "Date,Description,Value\n2024-03-01,Landlord,-1000\n";
        let err = ImportService::new(names)
            .read(csv_data.as_bytes())
            .err()
            .unwrap();
        match &err {
            LedgerError::MissingColumn { field, header } => {
                assert_eq!(*field, "date");
                assert_eq!(header, "Posted");
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(err.to_string().contains("'Posted'"));
        assert!(err.to_string().contains("date field"));
    }

    #[test]
    fn test_ambiguous_dates_are_rejected() {
        let csv_data = "Date,Description,Value\n01/02/2024,A,-1\n03/04/2024,B,-2\n";
        let err = import(csv_data).unwrap_err();
        assert!(matches!(err, LedgerError::DateFormatUnresolvable { .. }));
    }

    #[test]
    fn test_non_ascii_digit_dates_are_unresolvable() {
        let csv_data = "Date,Description,Value\n\u{0662}\u{0660}\u{0662}\u{0664}-01-05,A,-1\n";
        let err = import(csv_data).unwrap_err();
        assert!(matches!(err, LedgerError::DateFormatUnresolvable { .. }));
    }

    #[test]
    fn test_rows_beyond_the_sample_use_the_resolved_format() {
        let csv_data = "Date,Description,Value\n25/01/2024,A,-1\n02/03/2024,B,-2\n";
        let reader = ImportService::default()
            .with_sample_size(1)
            .read(csv_data.as_bytes())
            .unwrap();
        assert_eq!(reader.date_format(), Some(DateFormat::DayFirst));

        let transactions: Vec<_> = reader.collect::<LedgerResult<_>>().unwrap();
        assert_eq!(transactions[1].date, NaiveDate::from_ymd_opt(2024, 3, 2).unwrap());
    }

    #[test]
    fn test_malformed_value_fails_the_import() {
        let csv_data = "Date,Description,Value\n2024-01-01,Salary,2500\n2024-01-02,Walmart,twelve\n2024-01-03,Gym,-30\n";
        let mut reader = ImportService::default().read(csv_data.as_bytes()).unwrap();

        assert!(reader.next().unwrap().is_ok());
        let err = reader.next().unwrap().unwrap_err();
        assert!(matches!(err, LedgerError::MalformedRow { row: 2, .. }));
        assert!(reader.next().is_none());
    }

    #[test]
    fn test_invalid_calendar_date_is_malformed() {
        let csv_data = "Date,Description,Value\n2024-02-30,Salary,2500\n";
        let err = import(csv_data).unwrap_err();
        assert!(matches!(err, LedgerError::MalformedRow { row: 1, .. }));
    }

    #[test]
    fn test_empty_description_is_malformed() {
        let csv_data = "Date,Description,Value\n2024-02-01,,2500\n";
        let err = import(csv_data).unwrap_err();
        assert!(matches!(err, LedgerError::MalformedRow { .. }));
    }

    #[test]
    fn test_header_only_file_yields_nothing() {
        let transactions = import("Date,Description,Value\n").unwrap();
        assert!(transactions.is_empty());
    }

    #[test]
    fn test_read_path_missing_file() {
        let err = ImportService::default()
            .read_path("/definitely/not/here.csv")
            .err()
            .unwrap();
        assert!(matches!(err, LedgerError::Io(_)));
    }
}
