//! Service layer for the cash flow tracker
//!
//! Services sit between raw input and the ledger: they turn CSV files into
//! transactions without holding any ledger state themselves.

pub mod date_format;
pub mod import;

pub use date_format::{DateFormat, FormatAmbiguous, DEFAULT_SAMPLE_SIZE};
pub use import::{ColumnMapping, FieldNames, ImportService, TransactionReader};
