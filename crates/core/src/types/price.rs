//! Currency values using decimal arithmetic.
//!
//! Catalog costs arrive either as display strings (`"$15.00"`) or as plain
//! numbers. [`Cost`] keeps whichever form it was given and parses on read.
//! Derived values are carried as [`Amount`], which can also be
//! not-a-number when a cost could not be parsed.

use core::fmt;
use core::iter::Sum;
use core::ops::Add;
use core::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Number of decimal places shown for every currency value.
pub const DISPLAY_DECIMAL_PLACES: u32 = 2;

/// Errors that can occur when reading a [`Cost`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PriceError {
    /// The text is not a decimal number once the currency symbol is removed.
    #[error("cost {0:?} is not a decimal amount")]
    Malformed(String),
}

/// A unit cost as supplied by the catalog.
///
/// Deserializes from either a JSON string or a JSON number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Cost {
    /// Display text such as `"$15.00"`.
    Text(String),
    /// A bare numeric amount.
    Number(Decimal),
}

impl Cost {
    /// Create a cost from display text.
    #[must_use]
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    /// Create a cost from a numeric amount.
    #[must_use]
    pub const fn number(value: Decimal) -> Self {
        Self::Number(value)
    }

    /// Parse the numeric amount of this cost.
    ///
    /// A single `$` at the very start of the text is stripped. The amount is
    /// then the longest decimal prefix after any leading whitespace, so
    /// `"$12.99 each"` reads as 12.99 and `"$1_000"` as 1. Text is not
    /// trimmed before the `$` is stripped: `" $15"` has no numeric prefix.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::Malformed`] if the text has no numeric prefix or
    /// the number is outside the decimal range.
    pub fn amount(&self) -> Result<Decimal, PriceError> {
        match self {
            Self::Number(value) => Ok(*value),
            Self::Text(text) => {
                let digits = text.strip_prefix('$').unwrap_or(text);
                parse_leading_decimal(digits).ok_or_else(|| PriceError::Malformed(text.clone()))
            }
        }
    }

    /// The cost as an [`Amount`], not-a-number when malformed.
    #[must_use]
    pub fn to_amount(&self) -> Amount {
        self.amount().map_or(Amount::NAN, Amount::new)
    }
}

/// Parse the longest prefix of `text` shaped like
/// `[ws][+|-]digits[.digits][(e|E)[+|-]digits]`.
///
/// At least one mantissa digit is required. An exponent marker without
/// digits ends the number before the marker.
fn parse_leading_decimal(text: &str) -> Option<Decimal> {
    let text = text.trim_start();
    let digit_run = |from: usize| {
        text.get(from..)
            .map_or(0, |rest| rest.bytes().take_while(u8::is_ascii_digit).count())
    };

    let mut end = usize::from(text.starts_with(['+', '-']));
    let int_digits = digit_run(end);
    end += int_digits;

    let mut frac_digits = 0;
    if text.get(end..)?.starts_with('.') {
        frac_digits = digit_run(end + 1);
        end += 1 + frac_digits;
    }
    if int_digits == 0 && frac_digits == 0 {
        return None;
    }
    let mantissa = text.get(..end)?;

    let mut exponent = None;
    if text.get(end..)?.starts_with(['e', 'E']) {
        let sign_len = usize::from(text.get(end + 1..)?.starts_with(['+', '-']));
        let exp_digits = digit_run(end + 1 + sign_len);
        if exp_digits > 0 {
            exponent = text.get(end + 1..end + 1 + sign_len + exp_digits);
        }
    }

    let (sign, unsigned) = match mantissa.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", mantissa.strip_prefix('+').unwrap_or(mantissa)),
    };
    let (int_part, frac_part) = unsigned.split_once('.').unwrap_or((unsigned, ""));
    let int_part = if int_part.is_empty() { "0" } else { int_part };

    let mut normalized = format!("{sign}{int_part}");
    if !frac_part.is_empty() {
        normalized.push('.');
        normalized.push_str(frac_part);
    }

    match exponent {
        Some(exp) => {
            let exp = exp.strip_prefix('+').unwrap_or(exp);
            Decimal::from_scientific(&format!("{normalized}e{exp}")).ok()
        }
        None => Decimal::from_str(&normalized).ok(),
    }
}

impl fmt::Display for Cost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text),
            Self::Number(value) => write!(f, "${}", Amount::new(*value)),
        }
    }
}

impl From<Decimal> for Cost {
    fn from(value: Decimal) -> Self {
        Self::Number(value)
    }
}

/// A derived currency value.
///
/// Arithmetic on a not-a-number amount stays not-a-number, and so does any
/// result that would overflow the decimal range.
///
/// `Display` renders exactly two decimal places without a currency symbol
/// (`"30.00"`), or `NaN`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Amount(Option<Decimal>);

impl Amount {
    /// Zero.
    pub const ZERO: Self = Self(Some(Decimal::ZERO));

    /// Not-a-number, produced by malformed costs.
    pub const NAN: Self = Self(None);

    /// Wrap an exact decimal value.
    #[must_use]
    pub const fn new(value: Decimal) -> Self {
        Self(Some(value))
    }

    /// The exact (unrounded) value, if any.
    #[must_use]
    pub const fn value(&self) -> Option<Decimal> {
        self.0
    }

    /// Whether this amount is not-a-number.
    #[must_use]
    pub const fn is_nan(&self) -> bool {
        self.0.is_none()
    }

    /// The value rounded half away from zero to two decimal places.
    #[must_use]
    pub fn rounded(&self) -> Option<Decimal> {
        self.0.map(|value| {
            value.round_dp_with_strategy(
                DISPLAY_DECIMAL_PLACES,
                RoundingStrategy::MidpointAwayFromZero,
            )
        })
    }

    /// This amount rounded to cents, as it is displayed.
    #[must_use]
    pub fn to_cents(self) -> Self {
        Self(self.rounded())
    }

    /// Multiply by a decimal factor.
    #[must_use]
    pub fn scale(self, factor: Decimal) -> Self {
        Self(self.0.and_then(|value| value.checked_mul(factor)))
    }

    /// Multiply by a line quantity.
    #[must_use]
    pub fn times(self, quantity: u32) -> Self {
        self.scale(Decimal::from(quantity))
    }

    /// Format with a leading dollar sign, e.g. `"$33.00"`.
    #[must_use]
    pub fn display(&self) -> String {
        format!("${self}")
    }
}

impl Default for Amount {
    fn default() -> Self {
        Self::ZERO
    }
}

impl Add for Amount {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        match (self.0, rhs.0) {
            (Some(a), Some(b)) => Self(a.checked_add(b)),
            _ => Self::NAN,
        }
    }
}

impl Sum for Amount {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.rounded() {
            Some(value) => write!(f, "{value:.2}"),
            None => f.write_str("NaN"),
        }
    }
}
