pub mod deal;
pub mod payout;
pub mod scale;

pub use deal::{evaluate_deal, DealInput, DealOutput};
pub use payout::{
    compute_payout, EquityBasis, NegativeEquityTreatment, PayoutResult, PayoutTerms,
    REFERRAL_SHARE,
};
pub use scale::{
    resolve_participation, sweep_scale, ParticipationInput, ParticipationOutput,
    ParticipationPolicy, PercentTruncation, RawParticipationPolicy, ScaleAnchor, ScalePoint,
    ScaleRegion, ScaleShape, ScaleSweepInput, ScaleSweepOutput, ScaleVariable,
};
