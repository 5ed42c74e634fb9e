use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::pricing::deal::{evaluate_deal, DealInput};
use crate::pricing::payout::PayoutResult;
use crate::statements::format::{format_currency, format_long_date, format_percent};
use crate::types::*;
use crate::LbopResult;

/// Descriptive deal details printed on statements. Not used in pricing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DealParticulars {
    #[serde(default)]
    pub client_name: String,
    /// Year / make / model
    #[serde(default)]
    pub vehicle: String,
    #[serde(default)]
    pub vin: String,
    /// Lender or credit union
    #[serde(default)]
    pub lender: String,
    #[serde(default)]
    pub dealer_name: String,
}

impl DealParticulars {
    /// Copy with the fields the role may not see blanked out.
    pub fn visible_to(&self, role: Role) -> Self {
        let mut out = Self {
            client_name: self.client_name.clone(),
            ..Self::default()
        };
        if role.sees_vehicle_details() {
            out.vehicle = self.vehicle.clone();
            out.vin = self.vin.clone();
            out.lender = self.lender.clone();
        }
        if role.sees_dealer_details() {
            out.dealer_name = self.dealer_name.clone();
        }
        out
    }
}

/// Input for a role-specific statement
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatementInput {
    pub role: Role,
    #[serde(default)]
    pub particulars: DealParticulars,
    pub deal: DealInput,
    /// Defaults to today (UTC)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prepared_on: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatementLine {
    pub label: String,
    pub value: String,
}

/// Display-ready summary for one role. Typesetting is left to the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Statement {
    pub role: Role,
    pub title: String,
    pub lines: Vec<StatementLine>,
    pub footer: String,
    /// Suggested download name
    pub file_name: String,
    /// Particulars as visible to `role`
    pub particulars: DealParticulars,
    pub payout: PayoutResult,
}

fn line(label: &str, value: impl Into<String>) -> StatementLine {
    StatementLine {
        label: label.into(),
        value: value.into(),
    }
}

/// Lay out the summary a given role is entitled to see.
pub fn render_statement(
    role: Role,
    particulars: &DealParticulars,
    basis: &CostBasis,
    payout: &PayoutResult,
    prepared_on: NaiveDate,
) -> Statement {
    let today = format_long_date(prepared_on);
    let pct = format_percent(payout.participation_pct);
    let client_payout = format_currency(payout.client_payout);

    let (title, lines, footer, file_name) = match role {
        Role::Client => (
            "Equity Participation Estimate",
            vec![
                line("Client", particulars.client_name.as_str()),
                line("Retail Vehicle Value", format_currency(basis.reference_value)),
                line("Buy Now Price", format_currency(basis.acquisition_price)),
                line("Equity Percentage", pct),
                line("Estimated Payout", client_payout),
            ],
            "This document is an estimate only. Fees and payouts may vary.".to_string(),
            "client_estimate.pdf",
        ),
        Role::Sales => (
            "Client Participation Summary",
            vec![
                line("Client", particulars.client_name.as_str()),
                line("Vehicle", particulars.vehicle.as_str()),
                line("Lender", particulars.lender.as_str()),
                line("Equity Percentage", pct),
                line("Equity Payout", client_payout),
            ],
            format!("Prepared {today} – Broker One Finance"),
            "sales_summary.pdf",
        ),
        Role::Dealer => (
            "Dealer Service Payment Summary",
            vec![
                line("Client", particulars.client_name.as_str()),
                line("Dealer", particulars.dealer_name.as_str()),
                line("Equity Payout", client_payout),
                line("Referral Fee (60%)", format_currency(payout.referral_share)),
                line("Marketing Fee (40%)", format_currency(payout.marketing_share)),
            ],
            format!("Authorized by {}", particulars.dealer_name),
            "dealer_summary.pdf",
        ),
        Role::Admin => (
            "Equity Participation Fee Summary",
            vec![
                line("Client", particulars.client_name.as_str()),
                line("Gross Equity", format_currency(payout.net_equity)),
                line("Client Payout", client_payout),
                line("Broker One Remittance", format_currency(payout.residual)),
            ],
            format!("Approved by Broker One Finance – {today}"),
            "internal_summary.pdf",
        ),
    };

    Statement {
        role,
        title: title.to_string(),
        lines,
        footer,
        file_name: file_name.to_string(),
        particulars: particulars.visible_to(role),
        payout: payout.clone(),
    }
}

/// Evaluate the deal and build the statement for the requested role.
pub fn build_statement(input: &StatementInput) -> LbopResult<ComputationOutput<Statement>> {
    let start = Instant::now();

    let evaluated = evaluate_deal(&input.deal)?;
    let prepared_on = input
        .prepared_on
        .unwrap_or_else(|| chrono::Utc::now().date_naive());

    let statement = render_statement(
        input.role,
        &input.particulars,
        &input.deal.basis,
        &evaluated.result.payout,
        prepared_on,
    );

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Role Statement",
        &serde_json::json!({
            "role": input.role,
            "prepared_on": prepared_on.to_string(),
            "program": input.deal.program.name,
        }),
        evaluated.warnings,
        elapsed,
        statement,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ProgramConfig;
    use rust_decimal_macros::dec;

    fn input(role: Role) -> StatementInput {
        StatementInput {
            role,
            particulars: DealParticulars {
                client_name: "Dana Reyes".into(),
                vehicle: "2021 Honda Accord".into(),
                vin: String::new(),
                lender: "Summit Credit Union".into(),
                dealer_name: "Lakeside Motors".into(),
            },
            deal: DealInput {
                basis: CostBasis::new(dec!(20000), dec!(5000)),
                program: ProgramConfig::default(),
                ad_hoc_fees: vec![],
                entered_by: Some(role),
            },
            prepared_on: NaiveDate::from_ymd_opt(2026, 10, 16),
        }
    }

    fn value<'a>(s: &'a Statement, label: &str) -> &'a str {
        s.lines
            .iter()
            .find(|l| l.label == label)
            .map(|l| l.value.as_str())
            .unwrap()
    }

    #[test]
    fn test_client_estimate() {
        let out = build_statement(&input(Role::Client)).unwrap();
        let s = &out.result;
        assert_eq!(s.title, "Equity Participation Estimate");
        assert_eq!(value(s, "Retail Vehicle Value"), "$20,000.00");
        assert_eq!(value(s, "Equity Percentage"), "57.8%");
        assert_eq!(value(s, "Estimated Payout"), "$4,567.19");
        assert_eq!(s.file_name, "client_estimate.pdf");
        assert!(!s.lines.iter().any(|l| l.label.contains("Referral")));
    }

    #[test]
    fn test_sales_summary_footer_has_date() {
        let out = build_statement(&input(Role::Sales)).unwrap();
        assert_eq!(out.result.footer, "Prepared October 16, 2026 – Broker One Finance");
        assert_eq!(value(&out.result, "Lender"), "Summit Credit Union");
    }

    #[test]
    fn test_dealer_split_lines() {
        let out = build_statement(&input(Role::Dealer)).unwrap();
        let s = &out.result;
        assert_eq!(value(s, "Referral Fee (60%)"), "$1,999.69");
        assert_eq!(value(s, "Marketing Fee (40%)"), "$1,333.13");
        assert_eq!(s.footer, "Authorized by Lakeside Motors");
    }

    #[test]
    fn test_admin_remittance() {
        let out = build_statement(&input(Role::Admin)).unwrap();
        let s = &out.result;
        assert_eq!(value(s, "Gross Equity"), "$7,900.00");
        assert_eq!(value(s, "Broker One Remittance"), "$3,332.81");
        assert_eq!(s.lines.len(), 4);
    }

    #[test]
    fn test_particulars_redacted_by_role() {
        let client = build_statement(&input(Role::Client)).unwrap().result;
        assert_eq!(client.particulars.client_name, "Dana Reyes");
        assert!(client.particulars.vehicle.is_empty());
        assert!(client.particulars.dealer_name.is_empty());

        let sales = build_statement(&input(Role::Sales)).unwrap().result;
        assert_eq!(sales.particulars.lender, "Summit Credit Union");
        assert!(sales.particulars.dealer_name.is_empty());

        let dealer = build_statement(&input(Role::Dealer)).unwrap().result;
        assert_eq!(dealer.particulars.dealer_name, "Lakeside Motors");
    }

    #[test]
    fn test_statement_keeps_unrounded_payout() {
        let out = build_statement(&input(Role::Client)).unwrap();
        assert_eq!(out.result.payout.client_payout, dec!(4567.1875));
    }
}
