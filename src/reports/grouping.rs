//! Transaction groupings used for bulk categorization and monthly views

use std::collections::BTreeMap;

use crate::ledger::Ledger;
use crate::models::{MonthKey, Transaction};

impl Ledger {
    /// Uncategorized transactions keyed by their exact description
    ///
    /// Each group keeps insertion order, so the caller can assign one
    /// category to every transaction sharing a description.
    pub fn group_uncategorized(&self) -> BTreeMap<String, Vec<Transaction>> {
        let mut groups: BTreeMap<String, Vec<Transaction>> = BTreeMap::new();
        for txn in self.transactions() {
            if txn.is_uncategorized() {
                groups.entry(txn.description.clone()).or_default().push(txn);
            }
        }
        groups
    }

    /// All transactions keyed by calendar month, chronologically
    pub fn group_by_month(&self) -> BTreeMap<MonthKey, Vec<Transaction>> {
        let mut groups: BTreeMap<MonthKey, Vec<Transaction>> = BTreeMap::new();
        for txn in self.transactions() {
            groups.entry(MonthKey::of(txn.date)).or_default().push(txn);
        }
        groups
    }
}
