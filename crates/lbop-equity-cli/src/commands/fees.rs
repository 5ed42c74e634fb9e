use clap::Args;
use serde_json::Value;

use lbop_equity_core::config::ProgramConfig;
use lbop_equity_core::fees::{self, FeeAggregationInput};

use super::{effective_program, BasisArgs};
use crate::input;

/// Arguments for fee aggregation
#[derive(Args)]
pub struct FeesArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    #[command(flatten)]
    pub basis: BasisArgs,
}

pub fn run_fees(
    args: FeesArgs,
    program: Option<&ProgramConfig>,
) -> Result<Value, Box<dyn std::error::Error>> {
    let fee_input: FeeAggregationInput = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        data
    } else {
        FeeAggregationInput {
            basis: args.basis.basis()?,
            definitions: effective_program(program).fees,
            ad_hoc_fees: args.basis.fees.clone(),
        }
    };

    let result = fees::aggregate_fees(&fee_input)?;
    Ok(serde_json::to_value(result)?)
}
