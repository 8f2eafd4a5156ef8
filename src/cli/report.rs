//! CLI commands for reports
//!
//! Summaries, budget/goal reports and transaction groupings.

use clap::Subcommand;
use tracing::debug;

use super::args::{FilterArgs, LedgerArgs};
use super::CliContext;
use crate::display::{
    format_month_groups, format_summary, format_target_report, format_uncategorized_groups,
};
use crate::error::{LedgerError, LedgerResult};
use crate::export::ExportPayload;
use crate::ledger::Ledger;
use crate::models::{Money, TargetPeriod};

/// Report subcommands
#[derive(Subcommand, Debug)]
pub enum ReportCommands {
    /// Show income, expense and balance over the ledger's date span
    Summary {
        #[command(flatten)]
        ledger: LedgerArgs,
        #[command(flatten)]
        filter: FilterArgs,
        /// Also write the summary to a text file
        #[arg(long)]
        export: Option<String>,
    },

    /// Compare budgets and goals with actual activity
    Report {
        #[command(flatten)]
        ledger: LedgerArgs,
        #[command(flatten)]
        filter: FilterArgs,
        /// Target as CATEGORY=AMOUNT/PERIOD, e.g. "Food=200/monthly"
        #[arg(long = "target", value_name = "TARGET", required = true)]
        targets: Vec<String>,
        /// Also write the report to a text file
        #[arg(long)]
        export: Option<String>,
    },

    /// Group uncategorized transactions by description
    Uncategorized {
        #[command(flatten)]
        ledger: LedgerArgs,
    },

    /// Group transactions by calendar month
    Months {
        #[command(flatten)]
        ledger: LedgerArgs,
        #[command(flatten)]
        filter: FilterArgs,
    },
}

/// Handle report commands
pub fn handle_report_command(ctx: &CliContext, cmd: ReportCommands) -> LedgerResult<()> {
    match cmd {
        ReportCommands::Summary {
            ledger,
            filter,
            export,
        } => {
            let ledger = filter.apply(ledger.load(&ctx.settings)?)?;
            let output = format_summary(&ledger.summary()?, ctx.currency());
            print!("{}", output);
            if let Some(name) = export {
                ctx.export(&ExportPayload::Text(output), &name)?;
            }
        }

        ReportCommands::Report {
            ledger,
            filter,
            targets,
            export,
        } => {
            let mut ledger = filter.apply(ledger.load(&ctx.settings)?)?;
            apply_targets(&mut ledger, &targets)?;
            let output = format_target_report(&ledger.target_report()?, ctx.currency());
            print!("{}", output);
            if let Some(name) = export {
                ctx.export(&ExportPayload::Text(output), &name)?;
            }
        }

        ReportCommands::Uncategorized { ledger } => {
            let ledger = ledger.load(&ctx.settings)?;
            println!(
                "{}",
                format_uncategorized_groups(&ledger.group_uncategorized(), ctx.currency())
            );
        }

        ReportCommands::Months { ledger, filter } => {
            let ledger = filter.apply(ledger.load(&ctx.settings)?)?;
            println!("{}", format_month_groups(&ledger.group_by_month(), ctx.currency()));
        }
    }

    Ok(())
}

/// Parse `CATEGORY=AMOUNT/PERIOD`
pub fn parse_target_arg(arg: &str) -> LedgerResult<(String, Money, TargetPeriod)> {
    let invalid = || {
        LedgerError::Validation(format!(
            "Invalid target '{}'. Use CATEGORY=AMOUNT/PERIOD, e.g. Food=200/monthly",
            arg
        ))
    };

    let (category, rest) = arg.split_once('=').ok_or_else(invalid)?;
    let (amount, period) = rest.rsplit_once('/').ok_or_else(invalid)?;

    let amount = Money::parse(amount)
        .map_err(|e| LedgerError::InvalidAmount(format!("'{}': {}", amount.trim(), e)))?;
    let period = TargetPeriod::parse(period)?;

    Ok((category.trim().to_string(), amount, period))
}

fn apply_targets(ledger: &mut Ledger, targets: &[String]) -> LedgerResult<()> {
    for arg in targets {
        let (category, amount, period) = parse_target_arg(arg)?;
        let target = ledger.set_target(&category, amount, period)?;
        debug!(%target, "target applied");
    }
    Ok(())
}
