//! Transaction display formatting

use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Style};
use tabled::{Table, Tabled};

use crate::models::Transaction;

#[derive(Tabled)]
struct TransactionRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Description")]
    description: String,
    #[tabled(rename = "Value")]
    value: String,
}

impl TransactionRow {
    fn new(txn: &Transaction, currency: &str) -> Self {
        Self {
            id: txn.id.to_string(),
            date: txn.date.format("%Y-%m-%d").to_string(),
            category: category_label(&txn.category).to_string(),
            description: txn.description.clone(),
            value: txn.value.format_with_symbol(currency),
        }
    }
}

/// Category text shown for a transaction
pub(crate) fn category_label(category: &str) -> &str {
    if category.is_empty() {
        "(uncategorized)"
    } else {
        category
    }
}

/// Format transactions as a table, one row each
pub fn format_transaction_table(transactions: &[Transaction], currency: &str) -> String {
    if transactions.is_empty() {
        return "No transactions found.".to_string();
    }

    let rows = transactions.iter().map(|t| TransactionRow::new(t, currency));
    let mut table = Table::new(rows);
    table
        .with(Style::rounded())
        .modify(Columns::single(4), Alignment::right());
    table.to_string()
}

/// Format transaction details for display
pub fn format_transaction_details(txn: &Transaction, currency: &str) -> String {
    let mut output = String::new();

    output.push_str(&format!("Transaction: {}\n", txn.id));
    output.push_str(&format!("Date:        {}\n", txn.date.format("%Y-%m-%d")));
    output.push_str(&format!("Description: {}\n", txn.description));
    output.push_str(&format!("Category:    {}\n", category_label(&txn.category)));
    output.push_str(&format!("Value:       {}\n", txn.value.format_with_symbol(currency)));
    output.push_str(&format!("Type:        {}\n", txn.kind()));

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::tests::sample_ledger;

    #[test]
    fn test_empty_table() {
        assert_eq!(format_transaction_table(&[], "$"), "No transactions found.");
    }

    #[test]
    fn test_table_contains_every_transaction() {
        let transactions = sample_ledger().transactions();
        let output = format_transaction_table(&transactions, "$");

        assert!(output.contains("Description"));
        assert!(output.contains("-$120.50"));
        assert!(output.contains("$2500.00"));
        assert!(output.contains("(uncategorized)"));
        assert!(output.contains("Restaurant"));
        assert!(output.contains(&transactions[0].id.to_string()));
    }

    #[test]
    fn test_details() {
        let transactions = sample_ledger().transactions();
        let output = format_transaction_details(&transactions[2], "€");

        assert!(output.contains("Category:    Food"));
        assert!(output.contains("Value:       -€50.00"));
        assert!(output.contains("Type:        Expense"));
    }
}
