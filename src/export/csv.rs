//! CSV Export functionality
//!
//! Writes a ledger back out in the same four-column layout the importer
//! reads, so an exported file can be imported again unchanged.

use std::io::Write;

use crate::error::LedgerResult;
use crate::ledger::Ledger;

/// Header row of every exported ledger
pub const LEDGER_CSV_HEADER: [&str; 4] = ["Date", "Category", "Description", "Value"];

/// Export every transaction of the ledger to CSV, in insertion order
pub fn write_ledger_csv<W: Write>(ledger: &Ledger, writer: W) -> LedgerResult<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(LEDGER_CSV_HEADER)?;

    for txn in ledger.transactions() {
        csv_writer.write_record([
            txn.date.format("%Y-%m-%d").to_string(),
            txn.category,
            txn.description,
            txn.value.to_decimal_string(),
        ])?;
    }

    csv_writer.flush()?;
    Ok(())
}
