//! Core data models for the cash flow ledger
//!
//! This module contains the value types of the ledger domain: money,
//! transactions, target periods and budget/goal targets.

pub mod ids;
pub mod money;
pub mod period;
pub mod target;
pub mod transaction;

pub use ids::TransactionId;
pub use money::{Money, MoneyParseError};
pub use period::{MonthKey, TargetPeriod};
pub use target::{Target, TargetKind, TargetValidationError};
pub use transaction::{normalize_category, Transaction, TransactionType, TransactionValidationError};
