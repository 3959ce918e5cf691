//! Exact-precision numbers built directly from matched literals.

use core::fmt;

use num_bigint::BigInt;

/// An exact decimal: `digits × 10^exponent`.
///
/// Built from the matched number literal by string surgery, never by way of
/// a binary float, so no precision is lost. The representation is normalized
/// (the digits carry no trailing zeros; zero is `0 × 10^0`), which makes
/// equality structural: `1.50`, `15e-1`, and `0.15e1` all build the same
/// value.
///
/// # Examples
///
/// ```
/// use jsonlax::Decimal;
///
/// let d = Decimal::from_literal("1.50");
/// assert_eq!(d.digits().to_string(), "15");
/// assert_eq!(d.exponent(), -1);
/// assert_eq!(d, Decimal::from_literal("15e-1"));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Decimal {
    digits: BigInt,
    exponent: i64,
}

impl Decimal {
    /// Builds a decimal from a literal matching the JSON number grammar
    /// (sign, integer part, fraction, exponent).
    ///
    /// Input outside that grammar produces an unspecified value; the scanner
    /// validates literals before they reach this constructor.
    #[must_use]
    pub fn from_literal(literal: &str) -> Self {
        let (negative, rest) = match literal.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, literal),
        };
        let (mantissa, exp_part) = rest.split_once(['e', 'E']).unwrap_or((rest, "0"));
        let (int_part, frac_part) = mantissa.split_once('.').unwrap_or((mantissa, ""));

        let exp10: i64 = exp_part.parse().unwrap_or_else(|_| {
            // an exponent too large for i64 saturates; the magnitude is
            // already beyond anything representable downstream
            if exp_part.starts_with('-') { i64::MIN } else { i64::MAX }
        });

        let mut all_digits = String::with_capacity(int_part.len() + frac_part.len());
        all_digits.push_str(int_part);
        all_digits.push_str(frac_part);

        let trimmed = all_digits.trim_end_matches('0');
        if trimmed.is_empty() {
            return Self { digits: BigInt::default(), exponent: 0 };
        }

        let exponent = exp10
            .saturating_sub(frac_part.len() as i64)
            .saturating_add((all_digits.len() - trimmed.len()) as i64);

        let mut signed = String::with_capacity(trimmed.len() + 1);
        if negative {
            signed.push('-');
        }
        signed.push_str(trimmed);
        let digits = signed.parse::<BigInt>().unwrap_or_default();

        Self { digits, exponent }
    }

    /// The normalized significant digits, with sign.
    #[must_use]
    pub fn digits(&self) -> &BigInt {
        &self.digits
    }

    /// The power of ten scaling the digits.
    #[must_use]
    pub fn exponent(&self) -> i64 {
        self.exponent
    }

    /// The nearest double, for callers that accept the precision loss.
    #[must_use]
    pub fn to_f64(&self) -> f64 {
        format!("{}e{}", self.digits, self.exponent)
            .parse()
            .unwrap_or(f64::NAN)
    }
}

impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}e{}", self.digits, self.exponent)
    }
}
