//! Display formatting for terminal output
//!
//! Renders transactions and reports as tables; money is shown with the
//! configured currency symbol.

pub mod report;
pub mod transaction;

pub use report::{
    format_month_groups, format_summary, format_target_report, format_uncategorized_groups,
};
pub use transaction::{format_transaction_details, format_transaction_table};
