//! Report display formatting
//!
//! Summaries, budget/goal reports and transaction groupings.

use std::collections::BTreeMap;

use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Style};
use tabled::{Table, Tabled};

use super::transaction::category_label;
use crate::models::{Money, MonthKey, Transaction};
use crate::reports::{LedgerSummary, ReportGrouping, TargetReport};

#[derive(Tabled)]
struct CategoryRow {
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Transactions")]
    count: usize,
    #[tabled(rename = "Total")]
    total: String,
}

#[derive(Tabled)]
struct TargetRow {
    #[tabled(rename = "Period")]
    label: String,
    #[tabled(rename = "Kind")]
    kind: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Target")]
    target: String,
    #[tabled(rename = "Actual")]
    actual: String,
    #[tabled(rename = "Difference")]
    difference: String,
    #[tabled(rename = "Status")]
    status: &'static str,
}

#[derive(Tabled)]
struct GroupRow {
    #[tabled(rename = "Group")]
    group: String,
    #[tabled(rename = "Transactions")]
    count: usize,
    #[tabled(rename = "Total")]
    total: String,
}

/// Format a ledger summary
pub fn format_summary(summary: &LedgerSummary, currency: &str) -> String {
    let money = |m: Money| m.format_with_symbol(currency);
    let mut output = String::new();

    output.push_str(&format!(
        "Summary: {} to {} ({} days, {} transactions)\n\n",
        summary.start_date.format("%Y-%m-%d"),
        summary.end_date.format("%Y-%m-%d"),
        summary.span_days,
        summary.transaction_count
    ));
    output.push_str(&format!("Total income:          {:>14}\n", money(summary.total_income)));
    output.push_str(&format!("Total expense:         {:>14}\n", money(summary.total_expense)));
    output.push_str(&format!("Balance:               {:>14}\n", money(summary.balance)));
    output.push_str(&format!(
        "Average daily income:  {:>14}\n",
        money(summary.average_daily_income)
    ));
    output.push_str(&format!(
        "Average daily expense: {:>14}\n",
        money(summary.average_daily_expense)
    ));

    if !summary.by_category.is_empty() {
        let rows = summary.by_category.iter().map(|c| CategoryRow {
            category: category_label(&c.category).to_string(),
            count: c.transaction_count,
            total: money(c.total),
        });
        let mut table = Table::new(rows);
        table
            .with(Style::rounded())
            .modify(Columns::single(2), Alignment::right());
        output.push('\n');
        output.push_str(&table.to_string());
        output.push('\n');
    }

    output
}

/// Format a budget/goal report
pub fn format_target_report(report: &TargetReport, currency: &str) -> String {
    let mut output = match report.grouping {
        ReportGrouping::Prorated { days } => format!(
            "Targets prorated over {} days ({} to {})\n",
            days,
            report.start_date.format("%Y-%m-%d"),
            report.end_date.format("%Y-%m-%d")
        ),
        ReportGrouping::Monthly => format!(
            "Targets by month ({} to {})\n",
            report.start_date.format("%Y-%m-%d"),
            report.end_date.format("%Y-%m-%d")
        ),
    };

    let rows = report.rows.iter().map(|r| TargetRow {
        label: r.label.clone(),
        kind: r.kind.to_string(),
        category: r.category.clone(),
        target: r.target.format_with_symbol(currency),
        actual: r.actual.format_with_symbol(currency),
        difference: r.difference.format_with_symbol(currency),
        status: if r.met { "met" } else { "missed" },
    });
    let mut table = Table::new(rows);
    table
        .with(Style::rounded())
        .modify(Columns::new(3..6), Alignment::right());

    output.push_str(&table.to_string());
    output.push('\n');
    output
}

fn format_groups<K, F>(groups: &BTreeMap<K, Vec<Transaction>>, label: F, currency: &str) -> String
where
    F: Fn(&K) -> String,
{
    let rows = groups.iter().map(|(key, transactions)| GroupRow {
        group: label(key),
        count: transactions.len(),
        total: transactions
            .iter()
            .map(|t| t.value)
            .sum::<Money>()
            .format_with_symbol(currency),
    });
    let mut table = Table::new(rows);
    table
        .with(Style::rounded())
        .modify(Columns::single(2), Alignment::right());
    table.to_string()
}

/// Format uncategorized transactions grouped by description
pub fn format_uncategorized_groups(
    groups: &BTreeMap<String, Vec<Transaction>>,
    currency: &str,
) -> String {
    if groups.is_empty() {
        return "No uncategorized transactions.".to_string();
    }
    format_groups(groups, |description| description.clone(), currency)
}

/// Format transactions grouped by calendar month
pub fn format_month_groups(groups: &BTreeMap<MonthKey, Vec<Transaction>>, currency: &str) -> String {
    if groups.is_empty() {
        return "No transactions found.".to_string();
    }
    format_groups(groups, |month| month.to_string(), currency)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::tests::sample_ledger;
    use crate::models::TargetPeriod;

    #[test]
    fn test_format_summary() {
        let summary = sample_ledger().summary().unwrap();
        let output = format_summary(&summary, "$");

        assert!(output.contains("60 days, 5 transactions"));
        assert!(output.contains("$2500.00"));
        assert!(output.contains("-$1270.50"));
        assert!(output.contains("$1229.50"));
        assert!(output.contains("(uncategorized)"));
    }

    #[test]
    fn test_format_target_report() {
        let mut ledger = sample_ledger();
        ledger
            .set_target("Food", Money::from_cents(20000), TargetPeriod::Monthly)
            .unwrap();
        let report = ledger.target_report().unwrap();
        let output = format_target_report(&report, "$");

        assert!(output.starts_with("Targets by month"));
        assert!(output.contains("February 2024"));
        assert!(output.contains("Budget"));
        assert!(output.contains("$200.00"));
        assert!(output.contains("met"));
    }

    #[test]
    fn test_format_groups() {
        let ledger = sample_ledger();

        let output = format_uncategorized_groups(&ledger.group_uncategorized(), "$");
        assert!(output.contains("Walmart"));
        assert!(output.contains("-$220.50"));
        assert!(!output.contains("Restaurant"));

        let output = format_month_groups(&ledger.group_by_month(), "$");
        assert!(output.contains("January 2024"));
        assert!(output.contains("March 2024"));
    }

    #[test]
    fn test_empty_groups() {
        assert_eq!(
            format_uncategorized_groups(&BTreeMap::new(), "$"),
            "No uncategorized transactions."
        );
    }
}
