//! Ledger store
//!
//! A [`Ledger`] is an ordered list of transaction handles plus a map of
//! category targets. The transactions themselves live in a table that is
//! shared by a ledger and every view filtered from it, so recategorizing a
//! transaction through a filtered view is visible in the source ledger.
//!
//! The table is reference counted with interior mutability; the ledger is
//! single-threaded and not `Send`. Each entry counts the ledgers holding its
//! handle and is dropped when the last one lets go.

pub mod filter;
pub mod targets;

use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fmt;
use std::rc::Rc;

use tracing::debug;

use crate::error::{LedgerError, LedgerResult};
use crate::models::{normalize_category, Target, Transaction, TransactionId};

pub use filter::{DateRange, LedgerFilter};

struct Entry {
    transaction: Transaction,
    /// Number of ledgers whose membership includes this handle
    holders: usize,
}

/// Transactions keyed by handle, shared by a ledger and its views
#[derive(Default)]
struct TransactionTable {
    entries: HashMap<TransactionId, Entry>,
}

impl TransactionTable {
    fn get(&self, id: &TransactionId) -> Option<&Transaction> {
        self.entries.get(id).map(|e| &e.transaction)
    }

    fn get_mut(&mut self, id: &TransactionId) -> Option<&mut Transaction> {
        self.entries.get_mut(id).map(|e| &mut e.transaction)
    }

    fn contains_key(&self, id: &TransactionId) -> bool {
        self.entries.contains_key(id)
    }

    /// Insert a transaction held by one ledger
    fn insert(&mut self, transaction: Transaction) {
        self.entries.insert(
            transaction.id,
            Entry {
                transaction,
                holders: 1,
            },
        );
    }

    fn retain(&mut self, id: &TransactionId) {
        if let Some(entry) = self.entries.get_mut(id) {
            entry.holders += 1;
        }
    }

    /// Drop one holder, removing the entry when none remain
    fn release(&mut self, id: &TransactionId) {
        if let Some(entry) = self.entries.get_mut(id) {
            entry.holders -= 1;
            if entry.holders == 0 {
                self.entries.remove(id);
            }
        }
    }
}

/// An ordered collection of transactions and the targets set on them
pub struct Ledger {
    /// Backing store shared with filtered views
    table: Rc<RefCell<TransactionTable>>,
    /// Handles owned by this ledger, in insertion order
    members: Vec<TransactionId>,
    /// Targets keyed by normalized category name
    targets: BTreeMap<String, Target>,
}

impl Ledger {
    /// Create an empty ledger with its own transaction table
    pub fn new() -> Self {
        Self {
            table: Rc::new(RefCell::new(TransactionTable::default())),
            members: Vec::new(),
            targets: BTreeMap::new(),
        }
    }

    /// Create a view over the same table holding the given handles
    fn view(&self, members: Vec<TransactionId>) -> Self {
        {
            let mut table = self.table.borrow_mut();
            for id in &members {
                table.retain(id);
            }
        }
        Self {
            table: Rc::clone(&self.table),
            members,
            targets: BTreeMap::new(),
        }
    }

    /// Number of transactions in this ledger
    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Whether the handle belongs to this ledger
    pub fn contains(&self, id: TransactionId) -> bool {
        self.members.contains(&id)
    }

    /// Handles in insertion order
    pub fn ids(&self) -> &[TransactionId] {
        &self.members
    }

    /// Whether two ledgers are backed by the same transaction table
    pub fn shares_table_with(&self, other: &Ledger) -> bool {
        Rc::ptr_eq(&self.table, &other.table)
    }

    /// Snapshot of one member transaction
    pub fn get(&self, id: TransactionId) -> Option<Transaction> {
        if !self.contains(id) {
            return None;
        }
        self.table.borrow().get(&id).cloned()
    }

    /// Snapshots of all member transactions, in insertion order
    pub fn transactions(&self) -> Vec<Transaction> {
        let table = self.table.borrow();
        self.members
            .iter()
            .filter_map(|id| table.get(id).cloned())
            .collect()
    }

    /// Distinct non-empty categories used by member transactions
    pub fn categories(&self) -> BTreeSet<String> {
        let table = self.table.borrow();
        self.members
            .iter()
            .filter_map(|id| table.get(id))
            .filter(|t| !t.is_uncategorized())
            .map(|t| t.category.clone())
            .collect()
    }

    /// Append a transaction and return its handle
    ///
    /// Identical transactions may coexist. A transaction whose handle is
    /// already in the table (a re-added snapshot) is given a fresh one.
    pub fn add(&mut self, mut transaction: Transaction) -> LedgerResult<TransactionId> {
        transaction
            .validate()
            .map_err(|e| LedgerError::Validation(e.to_string()))?;
        transaction.category = normalize_category(&transaction.category);

        let mut table = self.table.borrow_mut();
        if table.contains_key(&transaction.id) {
            transaction.id = TransactionId::new();
        }
        let id = transaction.id;
        table.insert(transaction);
        self.members.push(id);
        debug!(%id, "transaction added");
        Ok(id)
    }

    /// Add every transaction from an import, or none of them
    ///
    /// The whole sequence is drained before the ledger changes, so a
    /// malformed row leaves the ledger untouched.
    pub fn extend_from<I>(&mut self, transactions: I) -> LedgerResult<usize>
    where
        I: IntoIterator<Item = LedgerResult<Transaction>>,
    {
        let pending = transactions.into_iter().collect::<LedgerResult<Vec<_>>>()?;
        for txn in &pending {
            txn.validate()
                .map_err(|e| LedgerError::Validation(e.to_string()))?;
        }

        let count = pending.len();
        for txn in pending {
            self.add(txn)?;
        }
        Ok(count)
    }

    /// Remove a transaction from this ledger by identity
    ///
    /// Other views over the same table keep their own handles; the table
    /// entry goes away once no ledger holds it.
    pub fn delete(&mut self, id: TransactionId) -> LedgerResult<Transaction> {
        let position = self
            .members
            .iter()
            .position(|m| *m == id)
            .ok_or_else(|| LedgerError::transaction_not_found(id.to_string()))?;

        let snapshot = self
            .table
            .borrow()
            .get(&id)
            .cloned()
            .ok_or_else(|| LedgerError::transaction_not_found(id.to_string()))?;

        self.members.remove(position);
        self.table.borrow_mut().release(&id);
        debug!(%id, "transaction removed");
        Ok(snapshot)
    }

    /// Replace a transaction: delete `old`, then append `new`
    ///
    /// Both preconditions are checked first so a failure leaves the ledger
    /// as it was.
    pub fn edit(&mut self, old: TransactionId, new: Transaction) -> LedgerResult<TransactionId> {
        if !self.contains(old) {
            return Err(LedgerError::transaction_not_found(old.to_string()));
        }
        new.validate()
            .map_err(|e| LedgerError::Validation(e.to_string()))?;

        self.delete(old)?;
        self.add(new)
    }

    /// Assign a normalized category to a member transaction
    pub fn categorize(&mut self, id: TransactionId, category: &str) -> LedgerResult<()> {
        if !self.contains(id) {
            return Err(LedgerError::transaction_not_found(id.to_string()));
        }

        let mut table = self.table.borrow_mut();
        let txn = table
            .get_mut(&id)
            .ok_or_else(|| LedgerError::transaction_not_found(id.to_string()))?;
        txn.set_category(category);
        debug!(%id, category = %txn.category, "transaction categorized");
        Ok(())
    }

    /// Categorize every uncategorized transaction with the given description
    ///
    /// Returns the number of transactions updated.
    pub fn categorize_uncategorized(&mut self, description: &str, category: &str) -> usize {
        let mut table = self.table.borrow_mut();
        let mut updated = 0;
        for id in &self.members {
            if let Some(txn) = table.get_mut(id) {
                if txn.is_uncategorized() && txn.description == description {
                    txn.set_category(category);
                    updated += 1;
                }
            }
        }
        updated
    }
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Ledger {
    fn drop(&mut self) {
        let mut table = self.table.borrow_mut();
        for id in &self.members {
            table.release(id);
        }
    }
}

impl fmt::Debug for Ledger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Ledger")
            .field("transactions", &self.members.len())
            .field("targets", &self.targets.len())
            .finish()
    }
}
