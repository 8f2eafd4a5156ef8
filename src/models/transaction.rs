//! Transaction model
//!
//! A transaction is a dated, signed amount with a description and a
//! category. Everything but the category is fixed once created.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::TransactionId;
use super::money::Money;

/// Derived direction of a transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Income,
    Expense,
}

impl TransactionType {
    /// Classify an amount; zero counts as an expense
    pub fn of(value: Money) -> Self {
        if value.is_positive() {
            Self::Income
        } else {
            Self::Expense
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "income" => Some(Self::Income),
            "expense" => Some(Self::Expense),
            _ => None,
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Income => write!(f, "Income"),
            Self::Expense => write!(f, "Expense"),
        }
    }
}

/// Normalize a category name: trim, collapse inner whitespace and
/// title-case each word. The empty string stays empty (uncategorized).
///
/// ```
/// use cashflow_tracker::models::normalize_category;
/// assert_eq!(normalize_category("  dining   OUT "), "Dining Out");
/// ```
pub fn normalize_category(raw: &str) -> String {
    raw.split_whitespace()
        .map(title_case_word)
        .collect::<Vec<_>>()
        .join(" ")
}

fn title_case_word(word: &str) -> String {
    let mut out = String::with_capacity(word.len());
    let mut at_word_start = true;
    for c in word.chars() {
        if c.is_alphabetic() {
            if at_word_start {
                out.extend(c.to_uppercase());
            } else {
                out.extend(c.to_lowercase());
            }
            at_word_start = false;
        } else {
            out.push(c);
            at_word_start = !c.is_numeric();
        }
    }
    out
}

/// A financial transaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique handle shared by every ledger view containing this transaction
    pub id: TransactionId,

    pub date: NaiveDate,

    /// Normalized category name; empty when uncategorized
    pub category: String,

    pub description: String,

    /// Amount (positive for income, negative for expense)
    pub value: Money,
}

impl Transaction {
    /// Create a new transaction, normalizing its category
    pub fn new(
        date: NaiveDate,
        category: impl AsRef<str>,
        description: impl Into<String>,
        value: Money,
    ) -> Self {
        Self {
            id: TransactionId::new(),
            date,
            category: normalize_category(category.as_ref()),
            description: description.into().trim().to_string(),
            value,
        }
    }

    /// Derived income/expense type
    pub fn kind(&self) -> TransactionType {
        TransactionType::of(self.value)
    }

    pub fn is_income(&self) -> bool {
        self.kind() == TransactionType::Income
    }

    pub fn is_expense(&self) -> bool {
        self.kind() == TransactionType::Expense
    }

    pub fn is_uncategorized(&self) -> bool {
        self.category.is_empty()
    }

    /// Assign a category; the only mutation a transaction allows
    pub fn set_category(&mut self, category: &str) {
        self.category = normalize_category(category);
    }

    /// Validate the transaction
    pub fn validate(&self) -> Result<(), TransactionValidationError> {
        if self.description.trim().is_empty() {
            return Err(TransactionValidationError::EmptyDescription);
        }
        Ok(())
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} | {} | {} | {}",
            self.date.format("%Y-%m-%d"),
            self.category,
            self.description,
            self.value
        )
    }
}

/// Validation errors for transactions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionValidationError {
    EmptyDescription,
}

impl fmt::Display for TransactionValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyDescription => write!(f, "Transaction description cannot be empty"),
        }
    }
}

impl std::error::Error for TransactionValidationError {}
