mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;
use tracing_subscriber::EnvFilter;

use commands::deal::PayoutArgs;
use commands::fees::FeesArgs;
use commands::program::ProgramArgs;
use commands::scale::{PercentageArgs, ScaleArgs};
use commands::statement::StatementArgs;

/// Lease-buyout equity participation pricing
#[derive(Parser)]
#[command(
    name = "lbop",
    version,
    about = "Lease-buyout equity participation pricing",
    long_about = "A CLI for pricing lease-buyout equity participation deals with decimal \
                  precision. Aggregates program fees, resolves the sliding-scale \
                  participation percentage, splits the broker remainder, and prepares \
                  role-specific deal statements."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// Program definition file (YAML or JSON); defaults to the standard program
    #[arg(long, global = true)]
    program: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Aggregate program and ad hoc fees for a cost basis
    Fees(FeesArgs),
    /// Resolve the participation percentage for one scale value
    Percentage(PercentageArgs),
    /// Tabulate the sliding scale as a rate card
    Scale(ScaleArgs),
    /// Price a deal: net equity, client payout and remainder split
    Payout(PayoutArgs),
    /// Prepare a role-specific deal statement
    Statement(StatementArgs),
    /// Show the effective program definition
    Program(ProgramArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Compact,
    Table,
    Csv,
    Minimal,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("LBOP_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> Result<Option<serde_json::Value>, Box<dyn std::error::Error>> {
    let program = cli
        .program
        .as_deref()
        .map(input::file::read_program)
        .transpose()?;
    let program = program.as_ref();

    let value = match cli.command {
        Commands::Fees(args) => commands::fees::run_fees(args, program)?,
        Commands::Percentage(args) => commands::scale::run_percentage(args, program)?,
        Commands::Scale(args) => commands::scale::run_scale(args, program)?,
        Commands::Payout(args) => commands::deal::run_payout(args, program)?,
        Commands::Statement(args) => commands::statement::run_statement(args, program)?,
        Commands::Program(args) => return commands::program::run_program(args, program),
        Commands::Version => {
            println!("lbop {}", env!("CARGO_PKG_VERSION"));
            return Ok(None);
        }
    };
    Ok(Some(value))
}

fn main() {
    init_tracing();
    let cli = Cli::parse();
    let format = cli.output.clone();

    match run(cli) {
        Ok(Some(value)) => {
            output::format_output(&format, &value);
            process::exit(0);
        }
        Ok(None) => process::exit(0),
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
