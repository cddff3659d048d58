use rust_decimal::{Decimal, RoundingStrategy};

/// Formats an amount as `1,234,567.89`: comma thousands, two decimals.
pub fn format_money(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let negative = rounded.is_sign_negative() && !rounded.is_zero();
    let text = format!("{:.2}", rounded.abs());
    let (whole, fraction) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3 + 4);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    if negative {
        format!("-{grouped}.{fraction}")
    } else {
        format!("{grouped}.{fraction}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_pads_to_two_decimals() {
        assert_eq!(format_money(dec!(100.5)), "100.50");
        assert_eq!(format_money(dec!(5)), "5.00");
        assert_eq!(format_money(dec!(4.9)), "4.90");
        assert_eq!(format_money(dec!(0)), "0.00");
    }

    #[test]
    fn test_groups_thousands() {
        assert_eq!(format_money(dec!(1000)), "1,000.00");
        assert_eq!(format_money(dec!(250000)), "250,000.00");
        assert_eq!(format_money(dec!(1234567.891)), "1,234,567.89");
        assert_eq!(format_money(dec!(999.999)), "1,000.00");
    }

    #[test]
    fn test_rounds_half_away_from_zero() {
        assert_eq!(format_money(dec!(0.125)), "0.13");
        assert_eq!(format_money(dec!(-0.125)), "-0.13");
        assert_eq!(format_money(dec!(2.344)), "2.34");
    }

    #[test]
    fn test_negative_amounts() {
        assert_eq!(format_money(dec!(-1234.5)), "-1,234.50");
        assert_eq!(format_money(dec!(-0.001)), "0.00");
    }
}
