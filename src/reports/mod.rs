//! Reports module for the cash flow ledger
//!
//! Provides the period summary, the budget/goal report and the transaction
//! groupings used for bulk categorization.

pub mod grouping;
pub mod summary;
pub mod targets;

pub use summary::{CategoryTotal, LedgerSummary};
pub use targets::{ReportGrouping, TargetReport, TargetReportRow, MONTHLY_GROUPING_THRESHOLD_DAYS};
