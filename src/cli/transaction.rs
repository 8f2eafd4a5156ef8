//! Transaction CLI commands
//!
//! Listing, manual entry, bulk categorization and re-export.

use clap::Subcommand;

use super::args::{FilterArgs, LedgerArgs};
use super::CliContext;
use crate::display::{format_transaction_details, format_transaction_table};
use crate::error::{LedgerError, LedgerResult};
use crate::export::ExportPayload;
use crate::models::{Money, Transaction};
use crate::services::DateFormat;

/// Transaction subcommands
#[derive(Subcommand, Debug)]
pub enum TransactionCommands {
    /// List transactions
    List {
        #[command(flatten)]
        ledger: LedgerArgs,
        #[command(flatten)]
        filter: FilterArgs,
    },

    /// Add a transaction and export the updated ledger
    Add {
        #[command(flatten)]
        ledger: LedgerArgs,
        /// Transaction date, in any supported layout
        #[arg(long)]
        date: String,
        #[arg(long)]
        description: String,
        /// Amount (e.g., "-50.00" for an expense, "100.00" for income)
        #[arg(long, allow_hyphen_values = true)]
        value: String,
        #[arg(long)]
        category: Option<String>,
        /// Name of the exported file
        #[arg(long)]
        export: String,
    },

    /// Categorize every uncategorized transaction with a description
    Categorize {
        #[command(flatten)]
        ledger: LedgerArgs,
        /// Exact description to match
        #[arg(long)]
        description: String,
        #[arg(long)]
        category: String,
        /// Name of the exported file
        #[arg(long)]
        export: String,
    },

    /// Re-export the ledger with normalized categories and values
    Export {
        #[command(flatten)]
        ledger: LedgerArgs,
        #[command(flatten)]
        filter: FilterArgs,
        /// Name of the exported file
        #[arg(long)]
        name: String,
    },
}

/// Handle transaction commands
pub fn handle_transaction_command(ctx: &CliContext, cmd: TransactionCommands) -> LedgerResult<()> {
    match cmd {
        TransactionCommands::List { ledger, filter } => {
            let ledger = filter.apply(ledger.load(&ctx.settings)?)?;
            println!("{}", format_transaction_table(&ledger.transactions(), ctx.currency()));
            println!("{} transaction(s)", ledger.len());
        }

        TransactionCommands::Add {
            ledger,
            date,
            description,
            value,
            category,
            export,
        } => {
            let mut ledger = ledger.load(&ctx.settings)?;
            let transaction = parse_transaction(&date, category.as_deref(), &description, &value)?;
            let id = ledger.add(transaction)?;

            if let Some(added) = ledger.get(id) {
                println!("Added transaction:");
                print!("{}", format_transaction_details(&added, ctx.currency()));
            }
            ctx.export(&ExportPayload::Table(&ledger), &export)?;
        }

        TransactionCommands::Categorize {
            ledger,
            description,
            category,
            export,
        } => {
            let mut ledger = ledger.load(&ctx.settings)?;
            let description = description.trim();
            let updated = ledger.categorize_uncategorized(description, &category);
            if updated == 0 {
                return Err(LedgerError::Validation(format!(
                    "No uncategorized transactions with description '{}'",
                    description
                )));
            }

            println!("Categorized {} transaction(s) as '{}'", updated, category.trim());
            ctx.export(&ExportPayload::Table(&ledger), &export)?;
        }

        TransactionCommands::Export {
            ledger,
            filter,
            name,
        } => {
            let ledger = filter.apply(ledger.load(&ctx.settings)?)?;
            ctx.export(&ExportPayload::Table(&ledger), &name)?;
        }
    }

    Ok(())
}

/// Build a transaction from command-line text
fn parse_transaction(
    date: &str,
    category: Option<&str>,
    description: &str,
    value: &str,
) -> LedgerResult<Transaction> {
    let format = DateFormat::resolve(&[date]).map_err(|e| {
        LedgerError::Validation(format!("Cannot read date '{}': {}", date, e))
    })?;
    let date = format
        .parse(date)
        .ok_or_else(|| LedgerError::Validation(format!("'{}' is not a valid date", date)))?;

    let value = Money::parse(value)
        .map_err(|e| LedgerError::InvalidAmount(format!("'{}': {}", value, e)))?;

    Ok(Transaction::new(date, category.unwrap_or(""), description, value))
}
