use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::config::ProgramConfig;
use crate::error::LbopError;
use crate::fees::aggregator::{build_fee_schedule, fee_warnings};
use crate::fees::schedule::{FeeDefinition, FeeSchedule};
use crate::pricing::payout::{compute_payout, PayoutResult};
use crate::types::*;
use crate::LbopResult;

/// Input for a full deal evaluation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DealInput {
    pub basis: CostBasis,
    #[serde(default)]
    pub program: ProgramConfig,
    #[serde(default)]
    pub ad_hoc_fees: Vec<FeeDefinition>,
    /// Role entering the deal; when given, ad hoc fees are only accepted
    /// from roles allowed to add them
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entered_by: Option<Role>,
}

/// Output for a full deal evaluation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DealOutput {
    pub fee_schedule: FeeSchedule,
    pub payout: PayoutResult,
}

/// Aggregate fees and price the deal under its program.
pub fn evaluate_deal(input: &DealInput) -> LbopResult<ComputationOutput<DealOutput>> {
    let start = Instant::now();

    if let Some(role) = input.entered_by {
        if !input.ad_hoc_fees.is_empty() && !role.may_add_ad_hoc_fees() {
            return Err(LbopError::InvalidInput {
                field: "ad_hoc_fees".into(),
                reason: format!("Role '{role}' may not add ad hoc fees"),
            });
        }
    }

    let program = &input.program;
    let schedule = build_fee_schedule(&input.basis, &program.fees, &input.ad_hoc_fees);
    let payout = compute_payout(&input.basis, schedule.total(), &program.terms())?;

    let mut warnings = input.basis.sanity_warnings();
    warnings.extend(fee_warnings(&schedule));
    warnings.extend(payout_warnings(&payout, program.remainder_floor));

    tracing::debug!(
        program = %program.name,
        net_equity = %payout.net_equity,
        pct = %payout.participation_pct,
        payout = %payout.client_payout,
        "deal evaluated"
    );

    let output = DealOutput {
        fee_schedule: schedule,
        payout,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "LBOP Equity Participation",
        &serde_json::json!({
            "program": program.name,
            "equity_basis": program.equity_basis,
            "negative_equity": program.negative_equity,
            "pricing_variable": program.policy.variable(),
            "referral_share": crate::pricing::payout::REFERRAL_SHARE.to_string(),
        }),
        warnings,
        elapsed,
        output,
    ))
}

/// Business-sanity advisories; never block the computation.
fn payout_warnings(payout: &PayoutResult, remainder_floor: Option<Money>) -> Vec<String> {
    let mut warnings = Vec::new();
    if payout.gross_equity < Decimal::ZERO {
        warnings.push(format!(
            "Net equity is negative ({}): fees and acquisition cost exceed the reference value",
            payout.gross_equity
        ));
    }
    if payout.client_payout < Decimal::ZERO {
        warnings.push(format!(
            "Client payout is negative ({})",
            payout.client_payout
        ));
    }
    if let Some(floor) = remainder_floor {
        if payout.residual < floor {
            warnings.push(format!(
                "Broker remainder {} is below the program floor {}",
                payout.residual, floor
            ));
        }
    }
    warnings
}
