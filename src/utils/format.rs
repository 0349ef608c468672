pub const CURRENCY_SYMBOL: &str = "₹";

/// Groups the digits of `value` in threes: `500000 -> "500,000"`.
pub fn group_thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);

    if value < 0 {
        grouped.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

/// Renders a predicted price, truncating any fraction toward zero.
pub fn format_price(price: f64) -> String {
    // `as` saturates on out-of-range values and maps NaN to 0.
    format!("{} {}", CURRENCY_SYMBOL, group_thousands(price.trunc() as i64))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1000), "1,000");
        assert_eq!(group_thousands(1234567), "1,234,567");
        assert_eq!(group_thousands(-1234), "-1,234");
    }

    #[test]
    fn test_format_price_truncates() {
        assert_eq!(format_price(500_000.0), "₹ 500,000");
        assert_eq!(format_price(499_999.99), "₹ 499,999");
        assert_eq!(format_price(-1234.7), "₹ -1,234");
    }
}
