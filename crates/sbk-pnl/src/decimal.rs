//! Decimal arithmetic layer.
//!
//! # Motivation
//!
//! Every money and quantity value in the engine is a
//! [`rust_decimal::Decimal`] (96-bit mantissa, 28 significant digits).
//! Binary floating point is never used for PnL math: partial-lot matching
//! repeatedly slices a basis by `matched / remaining`, and over a history of
//! thousands of orders the representation error of `f64` becomes visible in
//! the cents column.
//!
//! # Operations
//!
//! - Add / subtract / multiply / min / comparison / abs come straight from
//!   `Decimal`.
//! - Division goes through [`ratio`] / [`pro_rata`]; a zero divisor yields
//!   `None` (or zero) instead of a panic.
//! - [`round_money`] converts to the presentation scale: 2 decimal places,
//!   half away from zero, never a negative zero.
//! - [`round_whole`] does the same at 0 decimal places for display strings.

use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};

/// Presentation scale for fiat amounts and spreads.
pub const MONEY_DP: u32 = 2;

/// Quantities at or below this magnitude are treated as a closed lot (1e-12).
pub const LOT_EPSILON: Decimal = Decimal::from_parts(1, 0, 0, false, 12);

// ---------------------------------------------------------------------------
// Rounding
// ---------------------------------------------------------------------------

/// Round to 2 decimal places, half away from zero.
///
/// `-0.001` rounds to `0.00`, not `-0.00`.
pub fn round_money(d: Decimal) -> Decimal {
    round_dp(d, MONEY_DP)
}

/// Round to an integer, half away from zero.
pub fn round_whole(d: Decimal) -> Decimal {
    round_dp(d, 0)
}

/// Integer display string (no cents), e.g. `"1235"` for `1234.5`.
pub fn fmt_whole(d: Decimal) -> String {
    round_whole(d).to_string()
}

fn round_dp(d: Decimal, dp: u32) -> Decimal {
    let r = d.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero);
    if r.is_zero() {
        Decimal::ZERO
    } else {
        r
    }
}

// ---------------------------------------------------------------------------
// Division
// ---------------------------------------------------------------------------

/// `num / den`, or `None` when `den` is zero or the quotient overflows.
pub fn ratio(num: Decimal, den: Decimal) -> Option<Decimal> {
    if den.is_zero() {
        return None;
    }
    num.checked_div(den)
}

/// Proportional slice of `total`: `total × (part / whole)`.
///
/// The ratio is taken first and then applied to `total`; keeping that order
/// is what makes repeated slicing of one basis sum back to the basis.
/// Returns zero when `whole` is zero.
pub fn pro_rata(total: Decimal, part: Decimal, whole: Decimal) -> Decimal {
    match ratio(part, whole) {
        Some(r) => total * r,
        None => Decimal::ZERO,
    }
}

/// `true` when `qty` is negligible (|qty| ≤ [`LOT_EPSILON`]).
pub fn is_dust(qty: Decimal) -> bool {
    qty.abs() <= LOT_EPSILON
}

// ---------------------------------------------------------------------------
// Parsing
// ---------------------------------------------------------------------------

/// Parse a decimal from text.
///
/// Accepts plain (`"1234.50"`) and scientific (`"1.2e3"`) notation.
/// Returns `None` for empty input, `NaN`, infinities and anything that does
/// not fit in a `Decimal`.
pub fn parse_decimal(raw: &str) -> Option<Decimal> {
    let t = raw.trim();
    if t.is_empty() {
        return None;
    }
    let lower = t.to_ascii_lowercase();
    if lower.contains("nan") || lower.contains("inf") {
        return None;
    }
    Decimal::from_str(t)
        .ok()
        .or_else(|| Decimal::from_scientific(t).ok())
}

/// Convert a binary float via its shortest round-trip text form.
///
/// `0.1_f64` becomes exactly `0.1`, not `0.1000000000000000055511151231`.
/// Non-finite input yields `None`.
pub fn from_f64(v: f64) -> Option<Decimal> {
    if !v.is_finite() {
        return None;
    }
    parse_decimal(&v.to_string())
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn round_money_is_half_away_from_zero() {
        assert_eq!(round_money(dec!(1.005)), dec!(1.01));
        assert_eq!(round_money(dec!(-1.005)), dec!(-1.01));
        assert_eq!(round_money(dec!(1.004)), dec!(1.00));
    }

    #[test]
    fn round_money_never_returns_negative_zero() {
        let r = round_money(dec!(-0.001));
        assert!(r.is_zero());
        assert!(!r.is_sign_negative());
        assert_eq!(r.to_string(), "0");
    }

    #[test]
    fn fmt_whole_drops_cents() {
        assert_eq!(fmt_whole(dec!(1234.5)), "1235");
        assert_eq!(fmt_whole(dec!(-0.4)), "0");
        assert_eq!(fmt_whole(dec!(99.49)), "99");
    }

    #[test]
    fn ratio_by_zero_is_none() {
        assert_eq!(ratio(dec!(1), Decimal::ZERO), None);
        assert_eq!(ratio(dec!(1), dec!(4)), Some(dec!(0.25)));
    }

    #[test]
    fn pro_rata_slices_sum_back_to_total() {
        let total = dec!(120);
        let first = pro_rata(total, dec!(5), dec!(7));
        let rest = total - first;
        // second slice is the whole remainder
        let second = pro_rata(rest, dec!(2), dec!(2));
        assert_eq!(first + second, total);
    }

    #[test]
    fn pro_rata_zero_whole_is_zero() {
        assert_eq!(pro_rata(dec!(10), dec!(1), Decimal::ZERO), Decimal::ZERO);
    }

    #[test]
    fn dust_threshold() {
        assert!(is_dust(Decimal::ZERO));
        assert!(is_dust(dec!(0.000000000001)));
        assert!(is_dust(dec!(-0.000000000001)));
        assert!(!is_dust(dec!(0.00000000001)));
    }

    #[test]
    fn parse_decimal_plain_and_scientific() {
        assert_eq!(parse_decimal(" 24960 "), Some(dec!(24960)));
        assert_eq!(parse_decimal("80.9"), Some(dec!(80.9)));
        assert_eq!(parse_decimal("1.5e3"), Some(dec!(1500)));
        assert_eq!(parse_decimal("2E-2"), Some(dec!(0.02)));
    }

    #[test]
    fn parse_decimal_rejects_non_finite_and_garbage() {
        assert_eq!(parse_decimal(""), None);
        assert_eq!(parse_decimal("NaN"), None);
        assert_eq!(parse_decimal("Infinity"), None);
        assert_eq!(parse_decimal("-inf"), None);
        assert_eq!(parse_decimal("12abc"), None);
    }

    #[test]
    fn from_f64_uses_shortest_repr() {
        assert_eq!(from_f64(0.1), Some(dec!(0.1)));
        assert_eq!(from_f64(308.529), Some(dec!(308.529)));
        assert_eq!(from_f64(f64::NAN), None);
        assert_eq!(from_f64(f64::INFINITY), None);
    }
}
