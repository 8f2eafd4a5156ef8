//! Budget and goal assignment
//!
//! A target may only be set on a category that already has transactions in
//! the ledger, and only when those transactions all flow the same way.

use tracing::info;

use super::Ledger;
use crate::error::{LedgerError, LedgerResult};
use crate::models::{normalize_category, Money, Target, TargetKind, TargetPeriod};

/// Direction of the transactions recorded under one category
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryFlow {
    IncomeOnly,
    ExpenseOnly,
    Mixed,
}

impl Ledger {
    /// Classify the transactions in a category, or `None` if it has none
    pub fn category_flow(&self, category: &str) -> Option<CategoryFlow> {
        let category = normalize_category(category);
        let table = self.table.borrow();

        let (mut income, mut expense) = (0usize, 0usize);
        for txn in self.members.iter().filter_map(|id| table.get(id)) {
            if txn.category != category {
                continue;
            }
            if txn.is_income() {
                income += 1;
            } else {
                expense += 1;
            }
        }

        match (income, expense) {
            (0, 0) => None,
            (_, 0) => Some(CategoryFlow::IncomeOnly),
            (0, _) => Some(CategoryFlow::ExpenseOnly),
            _ => Some(CategoryFlow::Mixed),
        }
    }

    /// Set the budget or goal for a category, replacing any previous one
    ///
    /// Income-only categories get a goal and expense-only categories a
    /// budget. The ledger is unchanged on failure.
    pub fn set_target(
        &mut self,
        category: &str,
        amount: Money,
        period: TargetPeriod,
    ) -> LedgerResult<Target> {
        let name = normalize_category(category);
        let flow = if name.is_empty() {
            None
        } else {
            self.category_flow(&name)
        };

        let target = match flow {
            Some(CategoryFlow::IncomeOnly) => Target::goal(name.clone(), amount, period),
            _ => Target::budget(name.clone(), amount, period),
        };
        target
            .validate()
            .map_err(|e| LedgerError::InvalidAmount(format!("{} ({})", e, amount)))?;

        match flow {
            None if name.is_empty() => return Err(LedgerError::UnknownCategory(category.to_string())),
            None => return Err(LedgerError::UnknownCategory(name)),
            Some(CategoryFlow::Mixed) => return Err(LedgerError::MixedCategory(name)),
            Some(_) => {}
        }

        info!(category = %name, kind = %target.kind, %amount, %period, "target set");
        self.targets.insert(name, target.clone());
        Ok(target)
    }

    /// Remove the target on a category
    pub fn remove_target(&mut self, category: &str) -> LedgerResult<Target> {
        let name = normalize_category(category);
        self.targets
            .remove(&name)
            .ok_or_else(|| LedgerError::target_not_found(name))
    }

    pub fn target(&self, category: &str) -> Option<&Target> {
        self.targets.get(&normalize_category(category))
    }

    /// All targets, ordered by category name
    pub fn targets(&self) -> impl Iterator<Item = &Target> {
        self.targets.values()
    }

    pub fn budgets(&self) -> impl Iterator<Item = &Target> {
        self.targets().filter(|t| t.kind == TargetKind::Budget)
    }

    pub fn goals(&self) -> impl Iterator<Item = &Target> {
        self.targets().filter(|t| t.kind == TargetKind::Goal)
    }

    pub fn has_targets(&self) -> bool {
        !self.targets.is_empty()
    }
}
