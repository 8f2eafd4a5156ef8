use anyhow::Result;
use clap::{Parser, Subcommand};

use cashflow_tracker::cli::{handle_ledger_command, CliContext, LedgerCommands};
use cashflow_tracker::config::{paths::DATA_DIR_ENV, AppPaths, Settings};
use cashflow_tracker::logging::init_tracing;
use cashflow_tracker::LedgerError;

#[derive(Parser)]
#[command(
    name = "cashflow",
    version,
    about = "Track income and expenses from bank CSV exports",
    long_about = "cashflow imports a CSV of transactions, summarizes income and \
                  expenses, checks spending against budgets and income against \
                  goals, and exports cleaned-up ledgers."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    #[command(flatten)]
    Ledger(LedgerCommands),

    /// Show current configuration and paths
    Config {
        /// Write the current settings to the settings file
        #[arg(long)]
        save: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let paths = AppPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;
    init_tracing(&settings.log_filter)?;

    match cli.command {
        Some(Commands::Ledger(cmd)) => {
            let ctx = CliContext::new(paths, settings);
            if let Err(err) = handle_ledger_command(&ctx, cmd) {
                print_hint(&err);
                return Err(err.into());
            }
        }
        Some(Commands::Config { save }) => {
            println!("cashflow Configuration");
            println!("======================");
            println!("Base directory:   {}", paths.base_dir().display());
            println!("Settings file:    {}", paths.settings_file().display());
            println!(
                "Export directory: {}",
                settings.resolve_export_dir(&paths).display()
            );
            println!("(override the base directory with {})", DATA_DIR_ENV);
            println!();
            println!("Settings:");
            println!("  Date column:        {}", settings.field_names.date);
            println!("  Category column:    {}", settings.field_names.category);
            println!("  Description column: {}", settings.field_names.description);
            println!("  Value column:       {}", settings.field_names.value);
            println!("  Date sample size:   {}", settings.date_sample_size);
            println!("  Currency symbol:    {}", settings.currency_symbol);
            println!("  Log filter:         {}", settings.log_filter);

            if save {
                settings.save(&paths)?;
                println!();
                println!("Settings saved.");
            }
        }
        None => {
            println!("cashflow - income and expense tracking from CSV files");
            println!();
            println!("Run 'cashflow --help' for usage information.");
        }
    }

    Ok(())
}

/// Point the user at the flag that fixes an input-shape error
fn print_hint(err: &LedgerError) {
    if !err.is_input_shape() {
        return;
    }
    match err {
        LedgerError::MissingColumn { field, header } => eprintln!(
            "hint: pass the header of the {} column with --{}-field (looked for '{}')",
            field, field, header
        ),
        _ => eprintln!("hint: dates must be YYYY-MM-DD, MM/DD/YYYY or DD/MM/YYYY, used consistently"),
    }
}
