use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::LbopError;
use crate::pricing::scale::{ParticipationPolicy, ScaleVariable};
use crate::types::*;
use crate::LbopResult;

/// Share of the broker remainder paid to the referral recipient. The
/// marketing recipient receives the rest (40%).
pub const REFERRAL_SHARE: Rate = dec!(0.60);

/// What net equity is measured from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum EquityBasis {
    /// reference value − acquisition price − fees
    #[default]
    RetailLessAcquisition,
    /// equity reference − fees; the reference is already net of acquisition
    EquityReference,
}

/// Treatment of a net equity below zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum NegativeEquityTreatment {
    /// Carry the signed value through; payout may be negative
    #[default]
    Signed,
    /// Floor net equity at zero before pricing and payout
    FloorEquity,
    /// Keep net equity signed but floor the client payout at zero; the
    /// shortfall lands in the broker remainder
    FloorPayout,
}

/// Pricing terms shared by every deal under one program.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PayoutTerms {
    pub policy: ParticipationPolicy,
    #[serde(default)]
    pub equity_basis: EquityBasis,
    #[serde(default)]
    pub negative_equity: NegativeEquityTreatment,
}

/// Engine output for one deal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayoutResult {
    /// Net program equity after the negative-equity treatment
    pub net_equity: Money,
    /// Net equity before any flooring
    pub gross_equity: Money,
    pub total_fees: Money,
    pub pricing_variable: ScaleVariable,
    /// Value fed into the sliding scale
    pub pricing_value: Money,
    /// Clamped participation percentage (fraction)
    pub participation_pct: Rate,
    pub client_payout: Money,
    /// Broker remainder: net equity not paid to the client
    pub residual: Money,
    pub referral_share: Money,
    pub marketing_share: Money,
}

/// Compute net equity, participation percentage and the payout split.
///
/// `client_payout + residual == net_equity` and
/// `referral_share + marketing_share == residual` hold exactly.
pub fn compute_payout(
    basis: &CostBasis,
    total_fees: Money,
    terms: &PayoutTerms,
) -> LbopResult<PayoutResult> {
    let gross_equity = match terms.equity_basis {
        EquityBasis::RetailLessAcquisition => {
            basis.reference_value - basis.acquisition_price - total_fees
        }
        EquityBasis::EquityReference => {
            let reference = basis.equity_reference.ok_or_else(|| LbopError::InvalidInput {
                field: "equity_reference".into(),
                reason: "Equity reference basis selected but no equity reference supplied"
                    .into(),
            })?;
            reference - total_fees
        }
    };

    let net_equity = match terms.negative_equity {
        NegativeEquityTreatment::FloorEquity => gross_equity.max(Decimal::ZERO),
        NegativeEquityTreatment::Signed | NegativeEquityTreatment::FloorPayout => gross_equity,
    };

    let pricing_variable = terms.policy.variable();
    let pricing_value = match pricing_variable {
        ScaleVariable::AcquisitionPrice => basis.acquisition_price,
        ScaleVariable::NetEquity => net_equity,
    };
    let participation_pct = terms.policy.resolve(pricing_value);

    let mut client_payout = net_equity * participation_pct;
    if terms.negative_equity == NegativeEquityTreatment::FloorPayout {
        client_payout = client_payout.max(Decimal::ZERO);
    }
    let residual = net_equity - client_payout;

    // Marketing takes the remainder so the two shares sum to the residual.
    let referral_share = residual * REFERRAL_SHARE;
    let marketing_share = residual - referral_share;

    Ok(PayoutResult {
        net_equity,
        gross_equity,
        total_fees,
        pricing_variable,
        pricing_value,
        participation_pct,
        client_payout,
        residual,
        referral_share,
        marketing_share,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn terms(negative_equity: NegativeEquityTreatment) -> PayoutTerms {
        PayoutTerms {
            policy: ParticipationPolicy::standard(),
            equity_basis: EquityBasis::RetailLessAcquisition,
            negative_equity,
        }
    }

    #[test]
    fn test_standard_deal() {
        let basis = CostBasis::new(dec!(20000), dec!(5000));
        let out = compute_payout(&basis, dec!(7100), &PayoutTerms::default()).unwrap();

        assert_eq!(out.net_equity, dec!(7900));
        assert_eq!(out.participation_pct, dec!(0.578125));
        assert_eq!(out.client_payout, dec!(4567.1875));
        assert_eq!(out.residual, dec!(3332.8125));
        assert_eq!(out.referral_share, dec!(1999.6875));
        assert_eq!(out.marketing_share, dec!(1333.125));
    }

    #[test]
    fn test_signed_negative_equity() {
        let basis = CostBasis::new(dec!(8000), dec!(2000));
        let out = compute_payout(&basis, dec!(7000), &terms(NegativeEquityTreatment::Signed))
            .unwrap();
        assert_eq!(out.net_equity, dec!(-1000));
        assert_eq!(out.client_payout, dec!(-600));
        assert_eq!(out.residual, dec!(-400));
    }

    #[test]
    fn test_floor_equity() {
        let basis = CostBasis::new(dec!(8000), dec!(2000));
        let out = compute_payout(
            &basis,
            dec!(7000),
            &terms(NegativeEquityTreatment::FloorEquity),
        )
        .unwrap();
        assert_eq!(out.gross_equity, dec!(-1000));
        assert_eq!(out.net_equity, Decimal::ZERO);
        assert_eq!(out.client_payout, Decimal::ZERO);
        assert_eq!(out.residual, Decimal::ZERO);
    }

    #[test]
    fn test_floor_payout_moves_shortfall_to_remainder() {
        let basis = CostBasis::new(dec!(8000), dec!(2000));
        let out = compute_payout(
            &basis,
            dec!(7000),
            &terms(NegativeEquityTreatment::FloorPayout),
        )
        .unwrap();
        assert_eq!(out.net_equity, dec!(-1000));
        assert_eq!(out.client_payout, Decimal::ZERO);
        assert_eq!(out.residual, dec!(-1000));
        assert_eq!(out.referral_share, dec!(-600));
        assert_eq!(out.marketing_share, dec!(-400));
    }

    #[test]
    fn test_equity_reference_basis() {
        let basis = CostBasis::new(dec!(20000), dec!(5000)).with_equity_reference(dec!(12000));
        let t = PayoutTerms {
            equity_basis: EquityBasis::EquityReference,
            ..PayoutTerms::default()
        };
        let out = compute_payout(&basis, dec!(2000), &t).unwrap();
        assert_eq!(out.net_equity, dec!(10000));
    }

    #[test]
    fn test_equity_reference_missing() {
        let basis = CostBasis::new(dec!(20000), dec!(5000));
        let t = PayoutTerms {
            equity_basis: EquityBasis::EquityReference,
            ..PayoutTerms::default()
        };
        let err = compute_payout(&basis, dec!(0), &t).unwrap_err();
        assert!(matches!(err, LbopError::InvalidInput { .. }));
    }

    #[test]
    fn test_net_equity_as_pricing_variable() {
        let policy = ParticipationPolicy::standard().with_variable(ScaleVariable::NetEquity);
        let t = PayoutTerms {
            policy,
            ..PayoutTerms::default()
        };
        // net equity 11000 sits at the scale midpoint
        let basis = CostBasis::new(dec!(30000), dec!(15000));
        let out = compute_payout(&basis, dec!(4000), &t).unwrap();
        assert_eq!(out.pricing_value, dec!(11000));
        assert_eq!(out.participation_pct, dec!(0.5125));
        assert_eq!(out.client_payout, dec!(5637.5));
    }

    #[test]
    fn test_split_sums_exactly_for_awkward_residual() {
        let basis = CostBasis::new(dec!(17333.33), dec!(4111.11));
        let out = compute_payout(&basis, dec!(3217.77), &PayoutTerms::default()).unwrap();
        assert_eq!(out.referral_share + out.marketing_share, out.residual);
        assert_eq!(out.client_payout + out.residual, out.net_equity);
    }
}
