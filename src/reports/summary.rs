//! Summary report
//!
//! Totals and daily averages over the span a ledger's transactions cover.

use chrono::NaiveDate;
use std::collections::BTreeMap;

use crate::error::{LedgerError, LedgerResult};
use crate::ledger::Ledger;
use crate::models::{Money, Transaction};

/// Totals for one category
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryTotal {
    /// Category name; empty for uncategorized transactions
    pub category: String,
    pub total: Money,
    pub transaction_count: usize,
}

/// Income, expense and balance over a ledger's active date span
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerSummary {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// Days between the first and last transaction
    pub span_days: i64,
    pub transaction_count: usize,
    /// Sum of positive values
    pub total_income: Money,
    /// Sum of negative values
    pub total_expense: Money,
    pub balance: Money,
    pub average_daily_income: Money,
    pub average_daily_expense: Money,
    /// Per-category totals ordered by name
    pub by_category: Vec<CategoryTotal>,
}

/// First and last transaction dates
pub(crate) fn date_span(transactions: &[Transaction]) -> Option<(NaiveDate, NaiveDate)> {
    let start = transactions.iter().map(|t| t.date).min()?;
    let end = transactions.iter().map(|t| t.date).max()?;
    Some((start, end))
}

impl LedgerSummary {
    /// Generate the summary of a ledger
    pub fn generate(ledger: &Ledger) -> LedgerResult<Self> {
        let transactions = ledger.transactions();
        let (start_date, end_date) = date_span(&transactions).ok_or(LedgerError::EmptyLedger)?;

        let span_days = (end_date - start_date).num_days();
        if span_days == 0 {
            return Err(LedgerError::ZeroDaySpan);
        }

        let total_income: Money = transactions
            .iter()
            .filter(|t| t.value.is_positive())
            .map(|t| t.value)
            .sum();
        let total_expense: Money = transactions
            .iter()
            .filter(|t| t.value.is_negative())
            .map(|t| t.value)
            .sum();

        let mut categories: BTreeMap<&str, (Money, usize)> = BTreeMap::new();
        for txn in &transactions {
            let entry = categories
                .entry(txn.category.as_str())
                .or_insert((Money::zero(), 0));
            entry.0 += txn.value;
            entry.1 += 1;
        }
        let by_category = categories
            .into_iter()
            .map(|(category, (total, transaction_count))| CategoryTotal {
                category: category.to_string(),
                total,
                transaction_count,
            })
            .collect();

        Ok(Self {
            start_date,
            end_date,
            span_days,
            transaction_count: transactions.len(),
            total_income,
            total_expense,
            balance: total_income + total_expense,
            average_daily_income: total_income.div_round(span_days),
            average_daily_expense: total_expense.div_round(span_days),
            by_category,
        })
    }
}

impl Ledger {
    /// Summarize income, expense and balance over the ledger's date span
    pub fn summary(&self) -> LedgerResult<LedgerSummary> {
        LedgerSummary::generate(self)
    }
}
