use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

/// Formats an amount as en-IN rupees, e.g. `₹1,23,456.00`.
///
/// The last three integer digits form one group and the rest are grouped in
/// pairs. Amounts are rounded half away from zero to two decimals.
pub fn format_inr(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let negative = rounded.is_sign_negative() && !rounded.is_zero();
    let text = format!("{:.2}", rounded.abs());
    let (int_part, frac_part) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    let mut out = String::with_capacity(text.len() + 8);
    if negative {
        out.push('-');
    }
    out.push('₹');
    out.push_str(&group_indian(int_part));
    out.push('.');
    out.push_str(frac_part);
    out
}

fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_owned();
    }
    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(2);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();
    format!("{},{}", groups.join(","), tail)
}

/// Whole-number saving shown on a discounted product card.
/// `None` unless `original` is above `price`.
pub fn discount_percent(price: Decimal, original: Decimal) -> Option<u32> {
    if original <= price || original.is_zero() {
        return None;
    }
    let pct = ((original - price) / original * Decimal::ONE_HUNDRED)
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    pct.to_u32()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn groups_like_en_in() {
        assert_eq!(format_inr(d("0")), "₹0.00");
        assert_eq!(format_inr(d("999")), "₹999.00");
        assert_eq!(format_inr(d("8999")), "₹8,999.00");
        assert_eq!(format_inr(d("35999.00")), "₹35,999.00");
        assert_eq!(format_inr(d("123456")), "₹1,23,456.00");
        assert_eq!(format_inr(d("12345678.9")), "₹1,23,45,678.90");
    }

    #[test]
    fn rounds_and_signs() {
        assert_eq!(format_inr(d("80997.005")), "₹80,997.01");
        assert_eq!(format_inr(d("-1500")), "-₹1,500.00");
        assert_eq!(format_inr(d("-0.001")), "₹0.00");
    }

    #[test]
    fn discount() {
        assert_eq!(discount_percent(d("35999"), d("42999")), Some(16));
        assert_eq!(discount_percent(d("75"), d("100")), Some(25));
        assert_eq!(discount_percent(d("100"), d("100")), None);
        assert_eq!(discount_percent(d("120"), d("100")), None);
    }
}
