use clap::Args;
use serde_json::Value;

use lbop_equity_core::config::ProgramConfig;

use super::effective_program;

/// Arguments for showing the effective program definition
#[derive(Args)]
pub struct ProgramArgs {
    /// Print as YAML instead of going through --output
    #[arg(long)]
    pub yaml: bool,
}

/// Returns None when the program was already printed as YAML.
pub fn run_program(
    args: ProgramArgs,
    program: Option<&ProgramConfig>,
) -> Result<Option<Value>, Box<dyn std::error::Error>> {
    let program = effective_program(program);
    if args.yaml {
        print!("{}", serde_yaml::to_string(&program)?);
        return Ok(None);
    }
    Ok(Some(serde_json::to_value(program)?))
}
