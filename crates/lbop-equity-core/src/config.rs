use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::fees::schedule::{BasisField, FeeDefinition};
use crate::pricing::payout::{EquityBasis, NegativeEquityTreatment, PayoutTerms};
use crate::pricing::scale::ParticipationPolicy;
use crate::types::*;

pub const DEALER_FEE: &str = "Dealer Fee";
pub const AUCTION_FEE: &str = "Auction Fee";
pub const REGISTRATION_FEE: &str = "Registration Fee";
pub const PARTNER_FEE: &str = "Partner / Floor Plan Fee";
pub const TRANSPORT_FEE: &str = "Transport Fee";
pub const STORAGE_FEE: &str = "Storage Fee";
pub const SALES_TAX: &str = "Sales Tax";
pub const ADDITIONAL_TAX: &str = "Additional Tax";

/// A lease-buyout program: its fee rules and pricing terms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgramConfig {
    pub name: String,
    pub fees: Vec<FeeDefinition>,
    #[serde(default)]
    pub policy: ParticipationPolicy,
    #[serde(default)]
    pub equity_basis: EquityBasis,
    #[serde(default)]
    pub negative_equity: NegativeEquityTreatment,
    /// Broker remainder below which an advisory warning is raised
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remainder_floor: Option<Money>,
}

impl ProgramConfig {
    pub fn terms(&self) -> PayoutTerms {
        PayoutTerms {
            policy: self.policy.clone(),
            equity_basis: self.equity_basis,
            negative_equity: self.negative_equity,
        }
    }
}

impl Default for ProgramConfig {
    fn default() -> Self {
        Self {
            name: "LBOP Equity Participation".into(),
            fees: standard_fee_definitions(),
            policy: ParticipationPolicy::standard(),
            equity_basis: EquityBasis::RetailLessAcquisition,
            negative_equity: NegativeEquityTreatment::Signed,
            remainder_floor: None,
        }
    }
}

/// The program's standard fee set. Taxes are charged on the reference value.
pub fn standard_fee_definitions() -> Vec<FeeDefinition> {
    vec![
        FeeDefinition::fixed(DEALER_FEE, dec!(2000)),
        FeeDefinition::fixed(AUCTION_FEE, dec!(1050)),
        FeeDefinition::fixed(REGISTRATION_FEE, dec!(250)),
        FeeDefinition::fixed(PARTNER_FEE, dec!(1100)),
        FeeDefinition::fixed(TRANSPORT_FEE, dec!(1000)),
        FeeDefinition::fixed(STORAGE_FEE, dec!(300)),
        FeeDefinition::percent_of(SALES_TAX, BasisField::ReferenceValue, dec!(0.07)),
        FeeDefinition::percent_of(ADDITIONAL_TAX, BasisField::ReferenceValue, dec!(0)),
    ]
}
