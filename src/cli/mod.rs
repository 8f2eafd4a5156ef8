//! CLI command handlers
//!
//! Bridges clap argument parsing with the ledger. Every command imports its
//! ledger from a CSV file, so nothing is kept between invocations.

pub mod args;
pub mod report;
pub mod transaction;

use std::path::{Path, PathBuf};

use clap::Subcommand;
use tracing::info;

use crate::config::{AppPaths, Settings};
use crate::error::LedgerResult;
use crate::export::{export, ExportPayload};

pub use args::{FilterArgs, LedgerArgs};
pub use report::{handle_report_command, ReportCommands};
pub use transaction::{handle_transaction_command, TransactionCommands};

/// Paths and settings resolved once at startup
#[derive(Debug, Clone)]
pub struct CliContext {
    pub paths: AppPaths,
    pub settings: Settings,
}

impl CliContext {
    pub fn new(paths: AppPaths, settings: Settings) -> Self {
        Self { paths, settings }
    }

    pub fn currency(&self) -> &str {
        &self.settings.currency_symbol
    }

    pub fn export_dir(&self) -> PathBuf {
        self.settings.resolve_export_dir(&self.paths)
    }

    /// Export a payload into the export directory and report where it went
    pub fn export(&self, payload: &ExportPayload<'_>, name: &str) -> LedgerResult<PathBuf> {
        let path = export(payload, name, &self.export_dir())?;
        print_exported(&path);
        Ok(path)
    }
}

fn print_exported(path: &Path) {
    info!(path = %path.display(), "export written");
    println!("Exported to {}", path.display());
}

/// Every command that works on a ledger file
#[derive(Subcommand, Debug)]
pub enum LedgerCommands {
    #[command(flatten)]
    Transaction(TransactionCommands),

    #[command(flatten)]
    Report(ReportCommands),
}

/// Handle a ledger command
pub fn handle_ledger_command(ctx: &CliContext, cmd: LedgerCommands) -> LedgerResult<()> {
    match cmd {
        LedgerCommands::Transaction(cmd) => handle_transaction_command(ctx, cmd),
        LedgerCommands::Report(cmd) => handle_report_command(ctx, cmd),
    }
}
