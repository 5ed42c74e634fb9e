use clap::Args;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::Value;

use lbop_equity_core::config::ProgramConfig;
use lbop_equity_core::pricing::scale::{self, ParticipationInput, ScaleSweepInput};

use super::effective_program;
use crate::input;

/// Arguments for a single participation percentage lookup
#[derive(Args)]
pub struct PercentageArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Value of the scale variable (buy now price or net equity)
    #[arg(long, allow_hyphen_values = true)]
    pub value: Option<Decimal>,
}

pub fn run_percentage(
    args: PercentageArgs,
    program: Option<&ProgramConfig>,
) -> Result<Value, Box<dyn std::error::Error>> {
    let pct_input: ParticipationInput = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        data
    } else {
        ParticipationInput {
            policy: effective_program(program).policy,
            x: args.value.ok_or("--value is required (or provide --input)")?,
        }
    };

    let result = scale::resolve_participation(&pct_input)?;
    Ok(serde_json::to_value(result)?)
}

/// Arguments for printing the sliding scale as a rate card
#[derive(Args)]
pub struct ScaleArgs {
    /// First value of the scale variable
    #[arg(long, default_value_t = dec!(0), allow_hyphen_values = true)]
    pub from: Decimal,

    /// Last value of the scale variable (inclusive)
    #[arg(long, default_value_t = dec!(25000))]
    pub to: Decimal,

    /// Increment between rows
    #[arg(long, default_value_t = dec!(1000))]
    pub step: Decimal,
}

pub fn run_scale(
    args: ScaleArgs,
    program: Option<&ProgramConfig>,
) -> Result<Value, Box<dyn std::error::Error>> {
    let sweep = ScaleSweepInput {
        policy: effective_program(program).policy,
        from: args.from,
        to: args.to,
        step: args.step,
    };
    let result = scale::sweep_scale(&sweep)?;
    Ok(serde_json::to_value(result)?)
}
