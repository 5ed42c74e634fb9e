use chrono::NaiveDate;
use clap::Args;
use serde_json::Value;

use lbop_equity_core::config::ProgramConfig;
use lbop_equity_core::statements::{self, DealParticulars, StatementInput};

use super::deal::deal_from_flags;
use super::{BasisArgs, RoleArg};
use crate::input;

/// Arguments for a role-specific deal statement
#[derive(Args)]
pub struct StatementArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Whose summary to prepare
    #[arg(long, value_enum)]
    pub role: Option<RoleArg>,

    #[command(flatten)]
    pub basis: BasisArgs,

    #[arg(long, default_value = "")]
    pub client_name: String,

    /// Year / make / model
    #[arg(long, default_value = "")]
    pub vehicle: String,

    #[arg(long, default_value = "")]
    pub vin: String,

    /// Lender or credit union
    #[arg(long, default_value = "")]
    pub lender: String,

    #[arg(long, default_value = "")]
    pub dealer_name: String,

    /// Statement date (YYYY-MM-DD), defaults to today
    #[arg(long)]
    pub date: Option<NaiveDate>,
}

pub fn run_statement(
    args: StatementArgs,
    program: Option<&ProgramConfig>,
) -> Result<Value, Box<dyn std::error::Error>> {
    let mut stmt_input: StatementInput = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        data
    } else {
        let role = args.role.ok_or("--role is required (or provide --input)")?;
        StatementInput {
            role: role.into(),
            particulars: DealParticulars {
                client_name: args.client_name,
                vehicle: args.vehicle,
                vin: args.vin,
                lender: args.lender,
                dealer_name: args.dealer_name,
            },
            deal: deal_from_flags(&args.basis, Some(role))?,
            prepared_on: args.date,
        }
    };
    if let Some(p) = program {
        stmt_input.deal.program = p.clone();
    }

    let result = statements::build_statement(&stmt_input)?;
    Ok(serde_json::to_value(result)?)
}
