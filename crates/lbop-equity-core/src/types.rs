use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// All monetary values. Wraps Decimal to prevent accidental f64 usage.
pub type Money = Decimal;

/// Rates expressed as decimals (0.60 = 60%). Never as percentages.
pub type Rate = Decimal;

/// The independent numeric inputs of one deal evaluation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CostBasis {
    /// Retail or loan-approval value of the vehicle
    pub reference_value: Money,
    /// "Buy now" price to acquire the vehicle from the lessor
    pub acquisition_price: Money,
    /// Equity value already net of acquisition cost, used directly as the
    /// pricing basis when the program is configured for it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub equity_reference: Option<Money>,
}

impl CostBasis {
    pub fn new(reference_value: Money, acquisition_price: Money) -> Self {
        Self {
            reference_value,
            acquisition_price,
            equity_reference: None,
        }
    }

    pub fn with_equity_reference(mut self, equity_reference: Money) -> Self {
        self.equity_reference = Some(equity_reference);
        self
    }

    /// Advisory messages for inputs outside the non-negative convention.
    pub fn sanity_warnings(&self) -> Vec<String> {
        let mut warnings = Vec::new();
        if self.reference_value < Decimal::ZERO {
            warnings.push(format!(
                "Reference value {} is negative",
                self.reference_value
            ));
        } else if self.reference_value.is_zero() {
            warnings.push("Reference value is zero".into());
        }
        if self.acquisition_price < Decimal::ZERO {
            warnings.push(format!(
                "Acquisition price {} is negative",
                self.acquisition_price
            ));
        }
        if let Some(eq) = self.equity_reference {
            if eq < Decimal::ZERO {
                warnings.push(format!("Equity reference {eq} is negative"));
            }
        }
        warnings
    }
}

/// Program participant whose view of a deal is being prepared.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    #[default]
    Client,
    Sales,
    Dealer,
    Admin,
}

impl Role {
    /// Vehicle, VIN and lender details.
    pub fn sees_vehicle_details(self) -> bool {
        matches!(self, Role::Sales | Role::Dealer | Role::Admin)
    }

    /// Dealership name and the remittance owed back to the broker.
    pub fn sees_dealer_details(self) -> bool {
        matches!(self, Role::Dealer | Role::Admin)
    }

    pub fn may_add_ad_hoc_fees(self) -> bool {
        matches!(self, Role::Dealer | Role::Admin)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Role::Client => "client",
            Role::Sales => "sales",
            Role::Dealer => "dealer",
            Role::Admin => "admin",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Standard computation output envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationOutput<T: Serialize> {
    pub result: T,
    pub methodology: String,
    pub assumptions: serde_json::Value,
    pub warnings: Vec<String>,
    pub metadata: ComputationMetadata,
}

/// Metadata for every computation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationMetadata {
    pub version: String,
    pub computation_time_us: u64,
    pub precision: String,
}

/// Helper to wrap computation results with metadata
pub fn with_metadata<T: Serialize>(
    methodology: &str,
    assumptions: &impl Serialize,
    warnings: Vec<String>,
    elapsed_us: u64,
    result: T,
) -> ComputationOutput<T> {
    for w in &warnings {
        tracing::warn!(methodology, "{w}");
    }
    ComputationOutput {
        result,
        methodology: methodology.to_string(),
        assumptions: serde_json::to_value(assumptions).unwrap_or_default(),
        warnings,
        metadata: ComputationMetadata {
            version: env!("CARGO_PKG_VERSION").to_string(),
            computation_time_us: elapsed_us,
            precision: "rust_decimal_128bit".to_string(),
        },
    }
}
