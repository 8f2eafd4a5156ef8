//! cashflow-tracker - income and expense tracking from CSV exports
//!
//! Imports bank-style CSV files into an in-memory ledger, then filters,
//! summarizes and compares it against per-category budgets and goals.
//!
//! # Architecture
//!
//! - `models`: Money, transactions, targets and periods
//! - `ledger`: the transaction store, filtered views and target rules
//! - `reports`: summaries, budget/goal reports and groupings
//! - `services`: date layout inference and CSV import
//! - `export`: CSV and text export
//! - `config`: paths and user settings
//! - `display` and `cli`: terminal output and command handlers
//!
//! # Example
//!
//! ```rust,no_run
//! use cashflow_tracker::ledger::Ledger;
//! use cashflow_tracker::services::ImportService;
//!
//! # fn main() -> Result<(), cashflow_tracker::LedgerError> {
//! let mut ledger = Ledger::new();
//! ledger.extend_from(ImportService::default().read_path("ledger.csv")?)?;
//! println!("{:?}", ledger.summary()?);
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod ledger;
pub mod logging;
pub mod models;
pub mod reports;
pub mod services;

pub use error::{LedgerError, LedgerResult};
