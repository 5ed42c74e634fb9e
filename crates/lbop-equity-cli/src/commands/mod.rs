pub mod deal;
pub mod fees;
pub mod program;
pub mod scale;
pub mod statement;

use clap::{Args, ValueEnum};
use rust_decimal::Decimal;

use lbop_equity_core::config::ProgramConfig;
use lbop_equity_core::fees::{BasisField, FeeDefinition};
use lbop_equity_core::types::{CostBasis, Role};

/// Cost basis flags shared by the deal-level commands
#[derive(Args, Debug, Clone)]
pub struct BasisArgs {
    /// Retail vehicle value (loan amount reference)
    #[arg(long)]
    pub reference_value: Option<Decimal>,

    /// Buy now price (vehicle acquisition cost)
    #[arg(long)]
    pub acquisition_price: Option<Decimal>,

    /// Equity value already net of acquisition cost
    #[arg(long)]
    pub equity_reference: Option<Decimal>,

    /// Ad hoc fee, repeatable: "Name=150", "Name=2.5%ref" (of reference
    /// value) or "Name=10%buy" (of buy now price)
    #[arg(long = "fee", value_parser = parse_fee)]
    pub fees: Vec<FeeDefinition>,
}

impl BasisArgs {
    pub fn basis(&self) -> Result<CostBasis, Box<dyn std::error::Error>> {
        let reference = self
            .reference_value
            .ok_or("--reference-value is required (or provide --input)")?;
        let acquisition = self
            .acquisition_price
            .ok_or("--acquisition-price is required (or provide --input)")?;
        Ok(CostBasis {
            reference_value: reference,
            acquisition_price: acquisition,
            equity_reference: self.equity_reference,
        })
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum RoleArg {
    Client,
    Sales,
    Dealer,
    Admin,
}

impl From<RoleArg> for Role {
    fn from(r: RoleArg) -> Self {
        match r {
            RoleArg::Client => Role::Client,
            RoleArg::Sales => Role::Sales,
            RoleArg::Dealer => Role::Dealer,
            RoleArg::Admin => Role::Admin,
        }
    }
}

/// The program to price under: `--program` if given, else the standard one.
pub fn effective_program(program: Option<&ProgramConfig>) -> ProgramConfig {
    program.cloned().unwrap_or_default()
}

/// Parse `Name=Amount`, `Name=Rate%ref` or `Name=Rate%buy`.
pub fn parse_fee(s: &str) -> Result<FeeDefinition, String> {
    let (name, amount) = s
        .rsplit_once('=')
        .ok_or_else(|| format!("expected NAME=AMOUNT, got '{s}'"))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("fee name missing in '{s}'"));
    }
    let amount = amount.trim();

    let parse = |v: &str| {
        v.trim()
            .parse::<Decimal>()
            .map_err(|e| format!("invalid amount '{v}': {e}"))
    };

    if let Some((pct, basis)) = amount.split_once('%') {
        let field = match basis.trim().to_ascii_lowercase().as_str() {
            "ref" | "reference" | "loan" => BasisField::ReferenceValue,
            "buy" | "buynow" | "acquisition" => BasisField::AcquisitionPrice,
            "equity" => BasisField::EquityReference,
            other => return Err(format!("unknown fee basis '{other}' in '{s}'")),
        };
        let rate = parse(pct)? / Decimal::ONE_HUNDRED;
        return Ok(FeeDefinition::percent_of(name, field, rate));
    }

    Ok(FeeDefinition::fixed(name, parse(amount)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use lbop_equity_core::fees::FeeRule;
    use rust_decimal_macros::dec;

    #[test]
    fn test_parse_flat_fee() {
        let fee = parse_fee("Lien Release=150").unwrap();
        assert_eq!(fee.name, "Lien Release");
        assert_eq!(fee.rule, FeeRule::Fixed { amount: dec!(150) });
    }

    #[test]
    fn test_parse_percent_fees() {
        let fee = parse_fee("County Tax=2.5%ref").unwrap();
        assert_eq!(
            fee.rule,
            FeeRule::PercentOf {
                basis: BasisField::ReferenceValue,
                rate: dec!(0.025)
            }
        );
        let fee = parse_fee("Floor Plan=10%buy").unwrap();
        assert_eq!(
            fee.rule,
            FeeRule::PercentOf {
                basis: BasisField::AcquisitionPrice,
                rate: dec!(0.10)
            }
        );
    }

    #[test]
    fn test_parse_fee_errors() {
        assert!(parse_fee("no-amount").is_err());
        assert!(parse_fee("=100").is_err());
        assert!(parse_fee("Fee=abc").is_err());
        assert!(parse_fee("Fee=5%moon").is_err());
    }
}
