//! Currency rounding and formatting helpers shared by the calculators.

use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;

/// Round to the cent, halves away from zero.
pub fn round_cents(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Round to the whole euro, halves away from zero.
pub fn round_euros(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

/// `part / whole * 100` to two decimal places, or zero when `whole` is zero.
pub fn percentage(part: Decimal, whole: Decimal) -> Decimal {
    if whole.is_zero() {
        return Decimal::ZERO;
    }
    round_cents(part / whole * dec!(100))
}

/// Format as euros with thousands separators, e.g. `€12,450.00`.
pub fn format_eur(amount: Decimal) -> String {
    let sign = if amount.is_sign_negative() && !amount.is_zero() {
        "-"
    } else {
        ""
    };
    let fixed = format!("{:.2}", round_cents(amount.abs()));
    let (whole, fraction) = fixed.split_once('.').unwrap_or((&fixed, "00"));
    format!("{sign}€{}.{fraction}", group_thousands(whole))
}

/// Format as whole euros with thousands separators, e.g. `€600,000`.
pub fn format_eur_whole(amount: Decimal) -> String {
    let sign = if amount.is_sign_negative() && !amount.is_zero() {
        "-"
    } else {
        ""
    };
    let whole = round_euros(amount.abs()).trunc().to_string();
    format!("{sign}€{}", group_thousands(&whole))
}

/// Format a 0-100 percentage with two decimals, e.g. `37.25%`.
pub fn format_pct(pct: Decimal) -> String {
    format!("{:.2}%", pct)
}

/// Format a fractional rate as a percentage, e.g. `0.2360` -> `23.60%`.
pub fn format_rate(rate: Decimal) -> String {
    format_pct(rate * dec!(100))
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounding_halves_away_from_zero() {
        assert_eq!(round_cents(dec!(0.125)), dec!(0.13));
        assert_eq!(round_euros(dec!(2.5)), dec!(3));
        assert_eq!(round_euros(dec!(-2.5)), dec!(-3));
    }

    #[test]
    fn percentage_of_zero_is_zero() {
        assert_eq!(percentage(dec!(10), Decimal::ZERO), Decimal::ZERO);
        assert_eq!(percentage(dec!(1), dec!(3)), dec!(33.33));
    }

    #[test]
    fn formats_euros() {
        assert_eq!(format_eur(dec!(12450)), "€12,450.00");
        assert_eq!(format_eur(dec!(-1234567.891)), "-€1,234,567.89");
        assert_eq!(format_eur(dec!(0.5)), "€0.50");
        assert_eq!(format_eur_whole(dec!(600000)), "€600,000");
        assert_eq!(format_eur_whole(dec!(999.5)), "€1,000");
    }

    #[test]
    fn formats_rates() {
        assert_eq!(format_rate(dec!(0.2360)), "23.60%");
        assert_eq!(format_pct(dec!(37.5)), "37.50%");
    }
}
