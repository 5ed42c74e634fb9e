use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::*;

// ---------------------------------------------------------------------------
// Fee rules
// ---------------------------------------------------------------------------

/// Which cost basis field a derived fee is charged against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BasisField {
    /// Retail / loan value (sales tax and similar)
    ReferenceValue,
    /// Buy-now price (floor-plan / partner fees)
    AcquisitionPrice,
    /// Explicit equity reference; contributes zero when absent
    EquityReference,
}

impl BasisField {
    pub fn value_of(self, basis: &CostBasis) -> Money {
        match self {
            BasisField::ReferenceValue => basis.reference_value,
            BasisField::AcquisitionPrice => basis.acquisition_price,
            BasisField::EquityReference => basis.equity_reference.unwrap_or(Decimal::ZERO),
        }
    }
}

/// How a single fee amount is determined.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FeeRule {
    /// Literal amount, independent of the basis
    Fixed { amount: Money },
    /// `rate × basis_value`
    PercentOf { basis: BasisField, rate: Rate },
}

impl FeeRule {
    pub fn evaluate(&self, basis: &CostBasis) -> Money {
        match self {
            FeeRule::Fixed { amount } => *amount,
            FeeRule::PercentOf { basis: field, rate } => *rate * field.value_of(basis),
        }
    }
}

/// A named fee rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeeDefinition {
    pub name: String,
    pub rule: FeeRule,
}

impl FeeDefinition {
    pub fn fixed(name: impl Into<String>, amount: Money) -> Self {
        Self {
            name: name.into(),
            rule: FeeRule::Fixed { amount },
        }
    }

    pub fn percent_of(name: impl Into<String>, basis: BasisField, rate: Rate) -> Self {
        Self {
            name: name.into(),
            rule: FeeRule::PercentOf { basis, rate },
        }
    }
}

// ---------------------------------------------------------------------------
// Schedule
// ---------------------------------------------------------------------------

/// Where a schedule line came from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FeeSource {
    Fixed,
    Derived { basis: BasisField, rate: Rate },
    AdHoc,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeeLine {
    pub name: String,
    pub amount: Money,
    pub source: FeeSource,
}

/// Ordered name → amount mapping. Names are unique; inserting an existing
/// name replaces its amount and source but keeps its position.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeeSchedule {
    lines: Vec<FeeLine>,
}

impl FeeSchedule {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, amount: Money, source: FeeSource) {
        let name = name.into();
        match self.lines.iter_mut().find(|l| l.name == name) {
            Some(line) => {
                line.amount = amount;
                line.source = source;
            }
            None => self.lines.push(FeeLine {
                name,
                amount,
                source,
            }),
        }
    }

    pub fn get(&self, name: &str) -> Option<Money> {
        self.lines.iter().find(|l| l.name == name).map(|l| l.amount)
    }

    pub fn total(&self) -> Money {
        self.lines.iter().map(|l| l.amount).sum()
    }

    pub fn lines(&self) -> &[FeeLine] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FeeLine> {
        self.lines.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_percent_of_reference_value() {
        let basis = CostBasis::new(dec!(20000), dec!(5000));
        let rule = FeeRule::PercentOf {
            basis: BasisField::ReferenceValue,
            rate: dec!(0.07),
        };
        assert_eq!(rule.evaluate(&basis), dec!(1400));
    }

    #[test]
    fn test_percent_of_acquisition_price() {
        let basis = CostBasis::new(dec!(20000), dec!(5000));
        let rule = FeeRule::PercentOf {
            basis: BasisField::AcquisitionPrice,
            rate: dec!(0.10),
        };
        assert_eq!(rule.evaluate(&basis), dec!(500));
    }

    #[test]
    fn test_missing_equity_reference_contributes_zero() {
        let basis = CostBasis::new(dec!(20000), dec!(5000));
        let rule = FeeRule::PercentOf {
            basis: BasisField::EquityReference,
            rate: dec!(0.05),
        };
        assert_eq!(rule.evaluate(&basis), Decimal::ZERO);
    }

    #[test]
    fn test_insert_last_write_wins_in_place() {
        let mut schedule = FeeSchedule::new();
        schedule.insert("Dealer Fee", dec!(2000), FeeSource::Fixed);
        schedule.insert("Storage Fee", dec!(300), FeeSource::Fixed);
        schedule.insert("Dealer Fee", dec!(1500), FeeSource::AdHoc);

        assert_eq!(schedule.len(), 2);
        assert_eq!(schedule.get("Dealer Fee"), Some(dec!(1500)));
        assert_eq!(schedule.lines()[0].name, "Dealer Fee");
        assert_eq!(schedule.lines()[0].source, FeeSource::AdHoc);
        assert_eq!(schedule.total(), dec!(1800));
    }

    #[test]
    fn test_empty_schedule_totals_zero() {
        let schedule = FeeSchedule::new();
        assert!(schedule.is_empty());
        assert_eq!(schedule.total(), Decimal::ZERO);
        assert_eq!(schedule.get("anything"), None);
    }
}
