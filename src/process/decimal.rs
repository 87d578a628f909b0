use bigdecimal::{BigDecimal, RoundingMode};
use std::str::FromStr;

use crate::schema::arrow::{DECIMAL_PRECISION, DECIMAL_SCALE};

/// Parse a decimal numeral, plain (`-12.50`) or scientific (`1.5e3`), keeping
/// every digit of the literal.
pub fn parse_decimal(s: &str) -> Option<BigDecimal> {
    let s = s.trim();
    if s.is_empty()
        || !s
            .bytes()
            .all(|b| b.is_ascii_digit() || matches!(b, b'+' | b'-' | b'.' | b'e' | b'E'))
    {
        return None;
    }
    BigDecimal::from_str(s).ok()
}

/// Quantize to exactly four fractional digits, ties rounding away from zero.
pub fn quantize(d: &BigDecimal) -> BigDecimal {
    d.with_scale_round(DECIMAL_SCALE as i64, RoundingMode::HalfUp)
}

/// Unscaled integer at scale 4, the Decimal128 storage value. `None` when the
/// quantized value has more than 38 digits.
pub fn to_decimal128(d: &BigDecimal) -> Option<i128> {
    let (digits, scale) = quantize(d).into_bigint_and_exponent();
    if scale != DECIMAL_SCALE as i64 {
        return None;
    }
    let unscaled = i128::try_from(&digits).ok()?;
    (unscaled.unsigned_abs() < 10u128.pow(DECIMAL_PRECISION as u32)).then_some(unscaled)
}

/// Parse then quantize; `None` when the literal is not a decimal numeral or
/// does not fit `Decimal128(38, 4)`.
pub fn parse_quantized(s: &str) -> Option<i128> {
    to_decimal128(&parse_decimal(s)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use arrow::datatypes::{Decimal128Type, DecimalType};

    fn q(s: &str) -> String {
        let unscaled = parse_quantized(s).unwrap_or_else(|| panic!("{s:?} did not quantize"));
        Decimal128Type::format_decimal(unscaled, DECIMAL_PRECISION, DECIMAL_SCALE)
    }

    #[test]
    fn rounds_half_up() {
        assert_eq!(q("1.00005"), "1.0001");
        assert_eq!(q("1.000049"), "1.0000");
        assert_eq!(q("0.00005"), "0.0001");
        assert_eq!(q("2.00015"), "2.0002");
        assert_eq!(q("2.00025"), "2.0003");
    }

    #[test]
    fn negative_ties_round_away_from_zero() {
        assert_eq!(q("-1.00005"), "-1.0001");
        assert_eq!(q("-2.00025"), "-2.0003");
    }

    #[test]
    fn already_scaled_values_are_unchanged() {
        for s in ["1.0001", "100.2500", "-7.1234", "0.0000"] {
            assert_eq!(q(s), s);
            assert_eq!(q(&q(s)), s);
        }
    }

    #[test]
    fn pads_short_fractions() {
        assert_eq!(q("12.5"), "12.5000");
        assert_eq!(q("42"), "42.0000");
        assert_eq!(parse_quantized("100.25"), Some(1_002_500));
        assert_eq!(parse_quantized("0.05"), Some(500));
    }

    #[test]
    fn scientific_notation() {
        assert_eq!(q("1.5e3"), "1500.0000");
        assert_eq!(q("2.5E-5"), "0.0000");
        assert_eq!(q("5E-5"), "0.0001");
    }

    #[test]
    fn wide_integer_parts_keep_four_places() {
        assert_eq!(
            q("10000000000000000000000000"),
            "10000000000000000000000000.0000"
        );
        assert_eq!(
            q("79228162514264337593543950335"),
            "79228162514264337593543950335.0000"
        );
        assert_eq!(
            q("123456789012345678901234567.5"),
            "123456789012345678901234567.5000"
        );
        assert_eq!(
            parse_quantized("10000000000000000000000000"),
            Some(100_000_000_000_000_000_000_000_000_000)
        );
    }

    #[test]
    fn long_fractions_round_once() {
        assert_eq!(q("0.00004999999999999999999999999999"), "0.0000");
        assert_eq!(q("-0.00004999999999999999999999999999"), "0.0000");
        assert_eq!(q("0.000050000000000000000000000000001"), "0.0001");
        assert_eq!(q("1.000149999999999999999999999999999999"), "1.0001");
    }

    #[test]
    fn values_wider_than_38_digits_are_rejected() {
        // 34 integer digits plus 4 places is the widest that fits
        let widest = "9".repeat(34);
        assert_eq!(q(&widest), format!("{widest}.0000"));
        assert!(parse_quantized(&format!("1{widest}")).is_none());
        assert!(parse_quantized(&format!("-1{widest}")).is_none());
        assert!(parse_quantized("1e40").is_none());
        // rounding up can carry past the limit
        assert!(parse_quantized(&format!("{widest}.99995")).is_none());
    }

    #[test]
    fn non_numerals_are_rejected() {
        for s in ["", "  ", "abc", "1.2.3", "NaN", "inf", "1,5", "1_000"] {
            assert!(parse_decimal(s).is_none(), "{s:?} should not parse");
        }
    }
}
