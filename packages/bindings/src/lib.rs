use napi::Result as NapiResult;
use napi_derive::napi;
use rust_decimal::Decimal;

use lbop_equity_core::config::ProgramConfig;
use lbop_equity_core::fees::FeeAggregationInput;
use lbop_equity_core::pricing::{DealInput, ParticipationInput, ScaleSweepInput};
use lbop_equity_core::statements::StatementInput;

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

// ---------------------------------------------------------------------------
// Fees
// ---------------------------------------------------------------------------

#[napi]
pub fn aggregate_fees(input_json: String) -> NapiResult<String> {
    let input: FeeAggregationInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = lbop_equity_core::fees::aggregate_fees(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Pricing
// ---------------------------------------------------------------------------

#[napi]
pub fn resolve_participation(input_json: String) -> NapiResult<String> {
    let input: ParticipationInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output =
        lbop_equity_core::pricing::resolve_participation(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

/// Percentage under the standard program for a buy-now price given as a
/// decimal string.
#[napi]
pub fn standard_participation_pct(acquisition_price: String) -> NapiResult<String> {
    let x: Decimal = acquisition_price.trim().parse().map_err(to_napi_error)?;
    Ok(ProgramConfig::default().policy.resolve(x).to_string())
}

#[napi]
pub fn sweep_scale(input_json: String) -> NapiResult<String> {
    let input: ScaleSweepInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = lbop_equity_core::pricing::sweep_scale(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn evaluate_deal(input_json: String) -> NapiResult<String> {
    let input: DealInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = lbop_equity_core::pricing::evaluate_deal(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Statements & program
// ---------------------------------------------------------------------------

#[napi]
pub fn build_statement(input_json: String) -> NapiResult<String> {
    let input: StatementInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = lbop_equity_core::statements::build_statement(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn standard_program() -> NapiResult<String> {
    serde_json::to_string(&ProgramConfig::default()).map_err(to_napi_error)
}
