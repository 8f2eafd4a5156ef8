//! Budget and goal targets
//!
//! A target attaches a per-period amount to one category. Expense-only
//! categories get a budget (a ceiling), income-only categories get a goal
//! (a floor). The kind is decided by the ledger when the target is set.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::money::Money;
use super::period::TargetPeriod;

/// Whether a target caps spending or sets an income objective
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TargetKind {
    Budget,
    Goal,
}

impl fmt::Display for TargetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Budget => write!(f, "Budget"),
            Self::Goal => write!(f, "Goal"),
        }
    }
}

/// A period-scoped monetary target for a category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Target {
    pub kind: TargetKind,
    pub category: String,
    pub amount: Money,
    pub period: TargetPeriod,
}

impl Target {
    pub fn budget(category: impl Into<String>, amount: Money, period: TargetPeriod) -> Self {
        Self {
            kind: TargetKind::Budget,
            category: category.into(),
            amount,
            period,
        }
    }

    pub fn goal(category: impl Into<String>, amount: Money, period: TargetPeriod) -> Self {
        Self {
            kind: TargetKind::Goal,
            category: category.into(),
            amount,
            period,
        }
    }

    /// Target amount scaled to an exact number of elapsed days
    pub fn prorated_for_days(&self, days: i64) -> Money {
        self.amount.scale(self.period.factor_for_days(days))
    }

    /// Target amount normalized to one calendar month
    pub fn per_month(&self) -> Money {
        self.amount.scale(self.period.factor_for_month())
    }

    /// Whether an actual amount satisfies this target
    ///
    /// Budgets are met while spending stays at or under the target; goals are
    /// met once income reaches it.
    pub fn is_met(&self, target: Money, actual: Money) -> bool {
        match self.kind {
            TargetKind::Budget => actual <= target,
            TargetKind::Goal => actual >= target,
        }
    }

    pub fn validate(&self) -> Result<(), TargetValidationError> {
        if self.amount.is_negative() {
            return Err(TargetValidationError::NegativeAmount);
        }
        Ok(())
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {} {}", self.kind, self.category, self.amount, self.period)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TargetValidationError {
    NegativeAmount,
}

impl fmt::Display for TargetValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NegativeAmount => write!(f, "Target amount cannot be negative"),
        }
    }
}

impl std::error::Error for TargetValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prorated_for_days() {
        let target = Target::budget("Food", Money::from_cents(20000), TargetPeriod::Monthly);
        assert_eq!(target.prorated_for_days(5).cents(), 3333);
        assert_eq!(target.prorated_for_days(30).cents(), 20000);

        let weekly = Target::budget("Food", Money::from_cents(7000), TargetPeriod::Weekly);
        assert_eq!(weekly.prorated_for_days(3).cents(), 3000);

        let yearly = Target::goal("Salary", Money::from_cents(3650000), TargetPeriod::Yearly);
        assert_eq!(yearly.prorated_for_days(10).cents(), 100000);
    }

    #[test]
    fn test_per_month() {
        let daily = Target::budget("Coffee", Money::from_cents(500), TargetPeriod::Daily);
        assert_eq!(daily.per_month().cents(), 15000);

        let yearly = Target::budget("Insurance", Money::from_cents(120000), TargetPeriod::Yearly);
        assert_eq!(yearly.per_month().cents(), 10000);

        let weekly = Target::budget("Food", Money::from_cents(7000), TargetPeriod::Weekly);
        assert_eq!(weekly.per_month().cents(), 30000);
    }

    #[test]
    fn test_is_met() {
        let budget = Target::budget("Food", Money::from_cents(20000), TargetPeriod::Monthly);
        assert!(budget.is_met(Money::from_cents(20000), Money::from_cents(15000)));
        assert!(!budget.is_met(Money::from_cents(20000), Money::from_cents(25000)));

        let goal = Target::goal("Salary", Money::from_cents(20000), TargetPeriod::Monthly);
        assert!(goal.is_met(Money::from_cents(20000), Money::from_cents(25000)));
        assert!(!goal.is_met(Money::from_cents(20000), Money::from_cents(15000)));
    }

    #[test]
    fn test_validate() {
        let negative = Target::budget("Food", Money::from_cents(-1), TargetPeriod::Monthly);
        assert_eq!(negative.validate(), Err(TargetValidationError::NegativeAmount));

        let zero = Target::budget("Food", Money::zero(), TargetPeriod::Monthly);
        assert!(zero.validate().is_ok());
    }
}
