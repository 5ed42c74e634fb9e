use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::types::{Money, Rate};

/// `$1,234.56`, with a leading minus for negatives.
pub fn format_currency(amount: Money) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let text = format!("{:.2}", rounded.abs());
    let (int_part, frac_part) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if rounded < Decimal::ZERO { "-" } else { "" };
    format!("{sign}${grouped}.{frac_part}")
}

/// Fraction to percentage with one decimal: 0.578125 → `57.8%`.
pub fn format_percent(rate: Rate) -> String {
    let pct = (rate * Decimal::ONE_HUNDRED)
        .round_dp_with_strategy(1, RoundingStrategy::MidpointNearestEven);
    format!("{pct:.1}%")
}

/// `October 16, 2026`
pub fn format_long_date(date: NaiveDate) -> String {
    date.format("%B %d, %Y").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_currency_grouping() {
        assert_eq!(format_currency(dec!(0)), "$0.00");
        assert_eq!(format_currency(dec!(999.5)), "$999.50");
        assert_eq!(format_currency(dec!(4567.1875)), "$4,567.19");
        assert_eq!(format_currency(dec!(1234567.891)), "$1,234,567.89");
        assert_eq!(format_currency(dec!(100000)), "$100,000.00");
    }

    #[test]
    fn test_negative_currency() {
        assert_eq!(format_currency(dec!(-1000)), "-$1,000.00");
        assert_eq!(format_currency(dec!(-0.001)), "$0.00");
    }

    #[test]
    fn test_percent() {
        assert_eq!(format_percent(dec!(0.578125)), "57.8%");
        assert_eq!(format_percent(dec!(0.60)), "60.0%");
        assert_eq!(format_percent(dec!(0.425)), "42.5%");
    }

    #[test]
    fn test_long_date() {
        let d = NaiveDate::from_ymd_opt(2026, 10, 6).unwrap();
        assert_eq!(format_long_date(d), "October 06, 2026");
    }
}
