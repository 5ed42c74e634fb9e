use clap::Args;
use serde_json::Value;

use lbop_equity_core::config::ProgramConfig;
use lbop_equity_core::pricing::deal::{self, DealInput};

use super::{BasisArgs, RoleArg};
use crate::input;

/// Arguments for a full deal evaluation
#[derive(Args)]
pub struct PayoutArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    #[command(flatten)]
    pub basis: BasisArgs,

    /// Role entering the deal; ad hoc fees require dealer or admin
    #[arg(long, value_enum)]
    pub role: Option<RoleArg>,
}

/// Build a deal from the basis flags under the standard program.
pub fn deal_from_flags(
    basis: &BasisArgs,
    role: Option<RoleArg>,
) -> Result<DealInput, Box<dyn std::error::Error>> {
    Ok(DealInput {
        basis: basis.basis()?,
        program: ProgramConfig::default(),
        ad_hoc_fees: basis.fees.clone(),
        entered_by: role.map(Into::into),
    })
}

pub fn run_payout(
    args: PayoutArgs,
    program: Option<&ProgramConfig>,
) -> Result<Value, Box<dyn std::error::Error>> {
    let mut deal_input: DealInput = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        data
    } else {
        deal_from_flags(&args.basis, args.role)?
    };
    // An explicit --program replaces whatever program the input carries.
    if let Some(p) = program {
        deal_input.program = p.clone();
    }

    let result = deal::evaluate_deal(&deal_input)?;
    Ok(serde_json::to_value(result)?)
}
