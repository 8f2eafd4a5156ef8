//! Budget and goal report
//!
//! Compares each target with what actually happened in its category. Short
//! windows prorate the target to the exact number of elapsed days; windows of
//! a month or more are broken down by calendar month.

use chrono::NaiveDate;
use std::collections::BTreeMap;
use tracing::debug;

use super::summary::date_span;
use crate::error::{LedgerError, LedgerResult};
use crate::ledger::Ledger;
use crate::models::{Money, MonthKey, Target, TargetKind, TargetPeriod, Transaction};

/// Spans of at least this many days are reported month by month
pub const MONTHLY_GROUPING_THRESHOLD_DAYS: i64 = 30;

/// How the report window was divided
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportGrouping {
    /// One row per target, scaled to the elapsed days
    Prorated { days: i64 },
    /// One row per target for every month that has transactions
    Monthly,
}

/// One target compared with actual activity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetReportRow {
    /// "January 2024" for monthly rows, "2024-02-01 to 2024-02-06" otherwise
    pub label: String,
    pub month: Option<MonthKey>,
    pub kind: TargetKind,
    pub category: String,
    pub period: TargetPeriod,
    /// Target amount scaled to the row's window
    pub target: Money,
    /// Sum of absolute transaction values in the category
    pub actual: Money,
    /// `target - actual`
    pub difference: Money,
    pub met: bool,
}

impl TargetReportRow {
    fn new(label: String, month: Option<MonthKey>, target: &Target, scaled: Money, actual: Money) -> Self {
        Self {
            label,
            month,
            kind: target.kind,
            category: target.category.clone(),
            period: target.period,
            target: scaled,
            actual,
            difference: scaled - actual,
            met: target.is_met(scaled, actual),
        }
    }
}

/// Budgets and goals against actual activity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetReport {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub span_days: i64,
    pub grouping: ReportGrouping,
    pub rows: Vec<TargetReportRow>,
}

impl TargetReport {
    /// Generate the report for every target on the ledger
    pub fn generate(ledger: &Ledger) -> LedgerResult<Self> {
        if !ledger.has_targets() {
            return Err(LedgerError::NoTargetsSet);
        }

        let transactions = ledger.transactions();
        let (start_date, end_date) = date_span(&transactions).ok_or(LedgerError::EmptyLedger)?;
        let span_days = (end_date - start_date).num_days();
        if span_days == 0 {
            return Err(LedgerError::ZeroDaySpan);
        }
        let targets: Vec<&Target> = ledger.targets().collect();

        let (grouping, rows) = if span_days < MONTHLY_GROUPING_THRESHOLD_DAYS {
            let label = format!(
                "{} to {}",
                start_date.format("%Y-%m-%d"),
                end_date.format("%Y-%m-%d")
            );
            let rows = targets
                .iter()
                .map(|target| {
                    let actual = actual_for(&transactions, &target.category);
                    TargetReportRow::new(
                        label.clone(),
                        None,
                        target,
                        target.prorated_for_days(span_days),
                        actual,
                    )
                })
                .collect();
            (ReportGrouping::Prorated { days: span_days }, rows)
        } else {
            let mut months: BTreeMap<MonthKey, Vec<Transaction>> = BTreeMap::new();
            for txn in &transactions {
                months.entry(MonthKey::of(txn.date)).or_default().push(txn.clone());
            }

            let mut rows = Vec::with_capacity(months.len() * targets.len());
            for (month, month_transactions) in &months {
                for target in &targets {
                    let actual = actual_for(month_transactions, &target.category);
                    rows.push(TargetReportRow::new(
                        month.to_string(),
                        Some(*month),
                        target,
                        target.per_month(),
                        actual,
                    ));
                }
            }
            (ReportGrouping::Monthly, rows)
        };

        debug!(span_days, ?grouping, rows = rows.len(), "target report generated");

        Ok(Self {
            start_date,
            end_date,
            span_days,
            grouping,
            rows,
        })
    }

    /// Rows for budgets only
    pub fn budgets(&self) -> impl Iterator<Item = &TargetReportRow> {
        self.rows.iter().filter(|r| r.kind == TargetKind::Budget)
    }

    /// Rows for goals only
    pub fn goals(&self) -> impl Iterator<Item = &TargetReportRow> {
        self.rows.iter().filter(|r| r.kind == TargetKind::Goal)
    }
}

fn actual_for(transactions: &[Transaction], category: &str) -> Money {
    transactions
        .iter()
        .filter(|t| t.category == category)
        .map(|t| t.value.abs())
        .sum()
}

impl Ledger {
    /// Compare every budget and goal with actual activity
    pub fn target_report(&self) -> LedgerResult<TargetReport> {
        TargetReport::generate(self)
    }
}
