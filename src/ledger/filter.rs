//! Query/filter engine
//!
//! Filters compose optional predicates with AND semantics and produce a new
//! ledger view over the same transactions.

use chrono::NaiveDate;

use super::Ledger;
use crate::error::{LedgerError, LedgerResult};
use crate::models::{normalize_category, Transaction, TransactionType};

/// Inclusive date range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> LedgerResult<Self> {
        if start > end {
            return Err(LedgerError::InvalidDateRange { start, end });
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// Options for filtering a ledger
#[derive(Debug, Clone, Default)]
pub struct LedgerFilter {
    /// Keep transactions dated within this range
    pub date_range: Option<DateRange>,
    /// Keep transactions in this category; empty selects uncategorized
    pub category: Option<String>,
    /// Keep transactions of this derived type
    pub kind: Option<TransactionType>,
}

impl LedgerFilter {
    /// Create a new empty filter
    pub fn new() -> Self {
        Self::default()
    }

    pub fn date_range(mut self, range: DateRange) -> Self {
        self.date_range = Some(range);
        self
    }

    pub fn category(mut self, category: &str) -> Self {
        self.category = Some(normalize_category(category));
        self
    }

    pub fn kind(mut self, kind: TransactionType) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.date_range.is_none() && self.category.is_none() && self.kind.is_none()
    }

    /// Check if a transaction passes every provided predicate
    pub fn matches(&self, txn: &Transaction) -> bool {
        if let Some(range) = self.date_range {
            if !range.contains(txn.date) {
                return false;
            }
        }

        if let Some(ref category) = self.category {
            if txn.category != normalize_category(category) {
                return false;
            }
        }

        if let Some(kind) = self.kind {
            if txn.kind() != kind {
                return false;
            }
        }

        true
    }
}

impl Ledger {
    /// Build a view holding the transactions that match `filter`
    ///
    /// The view shares transaction identity with this ledger and starts with
    /// no targets.
    pub fn filter(&self, filter: &LedgerFilter) -> Ledger {
        let matching = {
            let table = self.table.borrow();
            self.members
                .iter()
                .filter(|id| table.get(*id).is_some_and(|t| filter.matches(t)))
                .copied()
                .collect()
        };
        self.view(matching)
    }
}
