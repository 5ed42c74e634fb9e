use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::fees::schedule::{FeeDefinition, FeeRule, FeeSchedule, FeeSource};
use crate::types::*;
use crate::LbopResult;

/// Input for fee aggregation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeeAggregationInput {
    pub basis: CostBasis,
    /// Program fee rules, applied in order
    pub definitions: Vec<FeeDefinition>,
    /// Fees entered for this deal only; applied after the program fees and
    /// overwrite any entry of the same name
    #[serde(default)]
    pub ad_hoc_fees: Vec<FeeDefinition>,
}

/// Output for fee aggregation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeeAggregationOutput {
    pub schedule: FeeSchedule,
    pub total_fees: Money,
}

/// Evaluate fee rules against a cost basis into an ordered schedule.
///
/// Program definitions are applied first, ad hoc entries second. Negative
/// amounts are not rejected here; callers validate upstream.
pub fn build_fee_schedule(
    basis: &CostBasis,
    definitions: &[FeeDefinition],
    ad_hoc_fees: &[FeeDefinition],
) -> FeeSchedule {
    let mut schedule = FeeSchedule::new();

    for def in definitions {
        let source = match &def.rule {
            FeeRule::Fixed { .. } => FeeSource::Fixed,
            FeeRule::PercentOf { basis, rate } => FeeSource::Derived {
                basis: *basis,
                rate: *rate,
            },
        };
        schedule.insert(def.name.clone(), def.rule.evaluate(basis), source);
    }

    for fee in ad_hoc_fees {
        schedule.insert(fee.name.clone(), fee.rule.evaluate(basis), FeeSource::AdHoc);
    }

    schedule
}

/// Advisory messages for schedule lines below zero.
pub fn fee_warnings(schedule: &FeeSchedule) -> Vec<String> {
    schedule
        .iter()
        .filter(|l| l.amount < Decimal::ZERO)
        .map(|l| format!("Fee '{}' is negative ({})", l.name, l.amount))
        .collect()
}

/// Aggregate program and ad hoc fees into a schedule and total.
pub fn aggregate_fees(
    input: &FeeAggregationInput,
) -> LbopResult<ComputationOutput<FeeAggregationOutput>> {
    let start = Instant::now();

    let schedule = build_fee_schedule(&input.basis, &input.definitions, &input.ad_hoc_fees);
    let total_fees = schedule.total();
    let warnings = fee_warnings(&schedule);

    tracing::debug!(
        lines = schedule.len(),
        total = %total_fees,
        "fee schedule aggregated"
    );

    let output = FeeAggregationOutput {
        schedule,
        total_fees,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Fee Schedule Aggregation",
        &serde_json::json!({
            "reference_value": input.basis.reference_value.to_string(),
            "acquisition_price": input.basis.acquisition_price.to_string(),
            "definitions": input.definitions.len(),
            "ad_hoc_fees": input.ad_hoc_fees.len(),
        }),
        warnings,
        elapsed,
        output,
    ))
}
