//! Amount representation and exact decimal conversion.
//!
//! Amounts are integer counts of a currency's minor unit, held in a `u128`
//! wide enough for every registered currency. All arithmetic goes through
//! checked operations; overflow is detected before it happens, never via
//! wraparound.
//!
//! XMR literals follow the stricter legacy grammar (at most one decimal
//! point, trailing fractional zeros beyond twelve digits tolerated, result
//! bounded by the 64-bit atomic-unit range); every other currency uses the
//! generic precision-checked conversion.

use crate::currency::{CurrencyRegistry, BASE_CURRENCY, BASE_DECIMALS};
use crate::{Result, UriError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A non-negative amount in minor units of some currency.
///
/// # Example
///
/// ```
/// use monero_uri::PaymentAmount;
///
/// let amount = PaymentAmount::from_base_units(1_000_000_000_000);
/// assert_eq!(amount.currency, "XMR");
/// assert!(!amount.is_zero());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentAmount {
    /// Count of the currency's smallest unit.
    pub minor: u128,
    /// Uppercase currency code.
    pub currency: String,
}

impl PaymentAmount {
    /// Creates a new amount from a minor-unit count.
    pub fn new(minor: u128, currency: impl Into<String>) -> Self {
        Self {
            minor,
            currency: currency.into(),
        }
    }

    /// Creates a zero amount in the given currency.
    pub fn zero(currency: impl Into<String>) -> Self {
        Self::new(0, currency)
    }

    /// Widens a native atomic-unit amount into a base-currency amount.
    pub fn from_base_units(atomic: u64) -> Self {
        Self::new(u128::from(atomic), BASE_CURRENCY)
    }

    /// Parses a minor-unit decimal literal, e.g. stored ledger values.
    pub fn from_minor_str(value: &str, currency: impl Into<String>) -> Result<Self> {
        Ok(Self::new(parse_u128(value)?, currency))
    }

    /// Returns true for a zero minor-unit count.
    pub fn is_zero(&self) -> bool {
        self.minor == 0
    }
}

impl fmt::Display for PaymentAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.minor, self.currency)
    }
}

/// Parses an unsigned 128-bit decimal literal.
///
/// Trims surrounding whitespace and accepts an optional leading `+`. Rejects
/// empty input, a sign with no digits, `-`, non-digit characters, and values
/// exceeding `u128::MAX`, checked digit by digit so no intermediate step can
/// wrap.
pub fn parse_u128(text: &str) -> Result<u128> {
    let s = text.trim();
    if s.is_empty() {
        return Err(UriError::InvalidInteger(text.to_string()));
    }
    let digits = match s.strip_prefix('+') {
        Some("") => return Err(UriError::InvalidInteger(text.to_string())),
        Some(rest) => rest,
        None => s,
    };
    if digits.starts_with('-') {
        return Err(UriError::InvalidInteger(text.to_string()));
    }
    let mut value: u128 = 0;
    for c in digits.chars() {
        let digit = c
            .to_digit(10)
            .ok_or_else(|| UriError::InvalidInteger(text.to_string()))?;
        value = value
            .checked_mul(10)
            .and_then(|v| v.checked_add(u128::from(digit)))
            .ok_or(UriError::Overflow("integer"))?;
    }
    Ok(value)
}

fn digits_to_u128(digits: &str, part: &'static str) -> Result<u128> {
    let mut value: u128 = 0;
    for b in digits.bytes() {
        if !b.is_ascii_digit() {
            return Err(UriError::InvalidAmountCharacters(part));
        }
        value = value
            .checked_mul(10)
            .and_then(|v| v.checked_add(u128::from(b - b'0')))
            .ok_or(UriError::Overflow(part))?;
    }
    Ok(value)
}

/// Converts a human-readable decimal string into minor units of `currency`.
///
/// The string is split at the first `.`; a missing integer part reads as
/// zero. Fails on empty input, non-digit characters, unknown currency, more
/// fractional digits than the currency allows, or 128-bit overflow.
pub fn decimal_to_minor(registry: &CurrencyRegistry, text: &str, currency: &str) -> Result<u128> {
    let s = text.trim();
    if s.is_empty() {
        return Err(UriError::EmptyAmount);
    }

    let (integer_part, fractional_part) = match s.split_once('.') {
        Some((i, f)) => (i, f),
        None => (s, ""),
    };
    let integer_part = if integer_part.is_empty() {
        "0"
    } else {
        integer_part
    };

    if !integer_part.bytes().all(|b| b.is_ascii_digit()) {
        return Err(UriError::InvalidAmountCharacters("integer"));
    }
    if !fractional_part.bytes().all(|b| b.is_ascii_digit()) {
        return Err(UriError::InvalidAmountCharacters("fractional"));
    }

    let info = registry
        .get(currency)
        .ok_or_else(|| UriError::UnsupportedCurrency(currency.to_string()))?;

    if fractional_part.len() > info.decimals as usize {
        return Err(UriError::TooManyFractionalDigits {
            currency: currency.to_string(),
            max: info.decimals,
        });
    }

    let integer = digits_to_u128(integer_part, "integer")?;
    let mut fraction = digits_to_u128(fractional_part, "fractional")?;
    for _ in fractional_part.len()..info.decimals as usize {
        fraction = fraction
            .checked_mul(10)
            .ok_or(UriError::Overflow("fractional"))?;
    }

    let total = integer
        .checked_mul(info.scale)
        .ok_or(UriError::Overflow("integer"))?;
    total
        .checked_add(fraction)
        .ok_or(UriError::Overflow("fractional"))
}

/// Formats an amount as `<integer>[.<fraction>]<CODE>`.
///
/// Trailing fractional zeros are stripped; the decimal point is omitted when
/// the fraction is zero or the currency has no decimal digits. An unknown
/// currency falls back to the raw minor-unit count followed by the code.
pub fn minor_to_decimal(registry: &CurrencyRegistry, amount: &PaymentAmount) -> String {
    let Some(info) = registry.get(&amount.currency) else {
        return format!("{}{}", amount.minor, amount.currency);
    };

    let integer = amount.minor / info.scale;
    let remainder = amount.minor % info.scale;
    if info.decimals == 0 || remainder == 0 {
        return format!("{}{}", integer, amount.currency);
    }

    let fraction = format!("{:0>width$}", remainder, width = info.decimals as usize);
    let fraction = fraction.trim_end_matches('0');
    format!("{}.{}{}", integer, fraction, amount.currency)
}

/// Splits a token like `"12.5ETH"` into a numeric literal and a unit suffix
/// and converts it into minor units.
///
/// An empty suffix means XMR; XMR literals go through the strict base
/// grammar, all other registered currencies through [`decimal_to_minor`].
/// Unknown suffixes are rejected.
pub fn parse_amount_with_unit(registry: &CurrencyRegistry, token: &str) -> Result<PaymentAmount> {
    let s = token.trim();
    if s.is_empty() {
        return Err(UriError::EmptyAmount);
    }

    let split = s
        .bytes()
        .rposition(|b| !b.is_ascii_alphabetic())
        .map(|i| i + 1)
        .unwrap_or(0);
    let number = &s[..split];
    let unit = &s[split..];

    let currency = if unit.is_empty() {
        BASE_CURRENCY.to_string()
    } else {
        registry
            .get_unit(unit)
            .ok_or_else(|| UriError::UnsupportedUnit(unit.to_uppercase()))?
            .code
            .clone()
    };

    if currency == BASE_CURRENCY {
        let atomic = parse_base_amount(number)
            .ok_or_else(|| UriError::InvalidBaseAmount(number.to_string()))?;
        return Ok(PaymentAmount::from_base_units(atomic));
    }

    let minor = decimal_to_minor(registry, number, &currency)?;
    Ok(PaymentAmount::new(minor, currency))
}

/// Parses an XMR decimal literal into atomic units (strict legacy grammar).
///
/// Trailing fractional zeros beyond twelve digits are tolerated and dropped;
/// anything else past twelve fractional digits, a sign, a second decimal
/// point, or a value outside the 64-bit range is rejected.
pub fn parse_base_amount(text: &str) -> Option<u64> {
    let mut s = text.trim().to_string();

    let mut fraction_size = 0usize;
    if let Some(point) = s.find('.') {
        fraction_size = s.len() - point - 1;
        while fraction_size > BASE_DECIMALS as usize && s.ends_with('0') {
            s.pop();
            fraction_size -= 1;
        }
        if fraction_size > BASE_DECIMALS as usize {
            return None;
        }
        s.remove(point);
    }

    if s.is_empty() {
        return None;
    }

    let mut value: u64 = 0;
    for b in s.bytes() {
        if !b.is_ascii_digit() {
            return None;
        }
        value = value
            .checked_mul(10)?
            .checked_add(u64::from(b - b'0'))?;
    }
    for _ in fraction_size..BASE_DECIMALS as usize {
        value = value.checked_mul(10)?;
    }
    Some(value)
}

/// Formats an atomic-unit XMR amount with all twelve fractional digits.
pub fn format_base_amount(atomic: u64) -> String {
    let digits = format!("{:0>width$}", atomic, width = BASE_DECIMALS as usize + 1);
    let (integer, fraction) = digits.split_at(digits.len() - BASE_DECIMALS as usize);
    format!("{integer}.{fraction}")
}

fn trim_trailing_fraction_zeros(s: &str) -> &str {
    let Some(point) = s.find('.') else { return s };
    let trimmed = s.trim_end_matches('0');
    if trimmed.len() <= point + 1 {
        &s[..point]
    } else {
        trimmed
    }
}

/// Renders an amount for a `amount=` query parameter.
///
/// Zero amounts render as the empty string (the encoder omits them). XMR
/// amounts must fit the 64-bit range and are printed with trailing
/// fractional zeros trimmed; other currencies go through
/// [`minor_to_decimal`].
pub(crate) fn format_amount_for_uri(
    registry: &CurrencyRegistry,
    amount: &PaymentAmount,
) -> Result<String> {
    if amount.is_zero() {
        return Ok(String::new());
    }

    if amount.currency == BASE_CURRENCY {
        let atomic = u64::try_from(amount.minor).map_err(|_| UriError::AmountTooLarge)?;
        let formatted = format_base_amount(atomic);
        return Ok(format!(
            "{}{}",
            trim_trailing_fraction_zeros(&formatted),
            BASE_CURRENCY
        ));
    }

    Ok(minor_to_decimal(registry, amount))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> CurrencyRegistry {
        CurrencyRegistry::with_defaults()
    }

    #[test]
    fn parse_u128_handles_sign_and_whitespace() {
        assert_eq!(parse_u128("0").unwrap(), 0);
        assert_eq!(parse_u128(" +42 ").unwrap(), 42);
        assert!(parse_u128("").is_err());
        assert!(parse_u128("+").is_err());
        assert!(parse_u128("-1").is_err());
        assert!(parse_u128("12a").is_err());
    }

    #[test]
    fn parse_u128_checks_the_boundary() {
        let max = u128::MAX.to_string();
        assert_eq!(parse_u128(&max).unwrap(), u128::MAX);

        // one past the maximum, same digit count
        let mut over = max.clone();
        over.replace_range(over.len() - 1.., "6");
        assert_eq!(parse_u128(&over), Err(UriError::Overflow("integer")));

        let longer = format!("{max}0");
        assert_eq!(parse_u128(&longer), Err(UriError::Overflow("integer")));
    }

    #[test]
    fn decimal_to_minor_whole_and_fractional() {
        let r = registry();
        assert_eq!(decimal_to_minor(&r, "1", "BTC").unwrap(), 100_000_000);
        assert_eq!(decimal_to_minor(&r, "0.5", "BTC").unwrap(), 50_000_000);
        assert_eq!(decimal_to_minor(&r, ".5", "BTC").unwrap(), 50_000_000);
        assert_eq!(decimal_to_minor(&r, "12.34", "EUR").unwrap(), 1234);
        assert_eq!(
            decimal_to_minor(&r, "12345.67890123456789", "ETH").unwrap(),
            12_345_678_901_234_567_890_000
        );
    }

    #[test]
    fn decimal_to_minor_rejects_bad_input() {
        let r = registry();
        assert_eq!(decimal_to_minor(&r, "  ", "BTC"), Err(UriError::EmptyAmount));
        assert_eq!(
            decimal_to_minor(&r, "1x", "BTC"),
            Err(UriError::InvalidAmountCharacters("integer"))
        );
        assert_eq!(
            decimal_to_minor(&r, "1.2x", "BTC"),
            Err(UriError::InvalidAmountCharacters("fractional"))
        );
        assert_eq!(
            decimal_to_minor(&r, "1.2.3", "BTC"),
            Err(UriError::InvalidAmountCharacters("fractional"))
        );
        assert_eq!(
            decimal_to_minor(&r, "1", "DOGE"),
            Err(UriError::UnsupportedCurrency("DOGE".into()))
        );
        assert_eq!(
            decimal_to_minor(&r, "1.123", "EUR"),
            Err(UriError::TooManyFractionalDigits {
                currency: "EUR".into(),
                max: 2
            })
        );
    }

    #[test]
    fn decimal_to_minor_detects_overflow_before_it_happens() {
        let r = registry();
        let nines = "9".repeat(38);
        assert_eq!(
            decimal_to_minor(&r, &nines, "XMR"),
            Err(UriError::Overflow("integer"))
        );
        // an integer part too wide even for the bare 128-bit value
        let wider = "9".repeat(50);
        assert_eq!(
            decimal_to_minor(&r, &wider, "XMR"),
            Err(UriError::Overflow("integer"))
        );
    }

    #[test]
    fn minor_to_decimal_round_trips_and_trims() {
        let r = registry();
        let amount = PaymentAmount::new(50_000_000, "BTC");
        assert_eq!(minor_to_decimal(&r, &amount), "0.5BTC");

        let amount = PaymentAmount::new(100_000_000, "BTC");
        assert_eq!(minor_to_decimal(&r, &amount), "1BTC");

        let amount = PaymentAmount::new(1234, "EUR");
        assert_eq!(minor_to_decimal(&r, &amount), "12.34EUR");
    }

    #[test]
    fn minor_to_decimal_zero_decimals_and_unknown_currency() {
        let mut r = registry();
        r.register("JPY", 0).unwrap();
        let amount = PaymentAmount::new(123, "JPY");
        assert_eq!(minor_to_decimal(&r, &amount), "123JPY");

        let amount = PaymentAmount::new(777, "DOGE");
        assert_eq!(minor_to_decimal(&r, &amount), "777DOGE");
    }

    #[test]
    fn unit_lexer_splits_suffix() {
        let r = registry();
        let amount = parse_amount_with_unit(&r, "0.5XMR").unwrap();
        assert_eq!(amount.minor, 500_000_000_000);
        assert_eq!(amount.currency, "XMR");

        let amount = parse_amount_with_unit(&r, "1btc").unwrap();
        assert_eq!(amount.minor, 100_000_000);
        assert_eq!(amount.currency, "BTC");

        let amount = parse_amount_with_unit(&r, "100").unwrap();
        assert_eq!(amount.currency, "XMR");
        assert_eq!(amount.minor, 100_000_000_000_000);
    }

    #[test]
    fn unit_lexer_rejects_unknown_units_and_bad_numbers() {
        let r = registry();
        assert_eq!(
            parse_amount_with_unit(&r, "1DOGE"),
            Err(UriError::UnsupportedUnit("DOGE".into()))
        );
        assert_eq!(parse_amount_with_unit(&r, "  "), Err(UriError::EmptyAmount));
        assert_eq!(
            parse_amount_with_unit(&r, "XMR"),
            Err(UriError::InvalidBaseAmount("".into()))
        );
        assert_eq!(
            parse_amount_with_unit(&r, "-1"),
            Err(UriError::InvalidBaseAmount("-1".into()))
        );
    }

    #[test]
    fn base_grammar_is_strict() {
        assert_eq!(parse_base_amount("1"), Some(1_000_000_000_000));
        assert_eq!(parse_base_amount("0.5"), Some(500_000_000_000));
        assert_eq!(parse_base_amount("0.000000000001"), Some(1));
        // trailing zeros beyond twelve digits are dropped
        assert_eq!(parse_base_amount("1.0000000000000"), Some(1_000_000_000_000));
        assert_eq!(parse_base_amount("0.0000000000001"), None);
        assert_eq!(parse_base_amount("1.2.3"), None);
        assert_eq!(parse_base_amount("+1"), None);
        assert_eq!(parse_base_amount("-1"), None);
        assert_eq!(parse_base_amount(""), None);
        assert_eq!(parse_base_amount("."), None);
        assert_eq!(parse_base_amount("alphanumeric"), None);
        // 2^64 atomic units is out of range
        assert_eq!(parse_base_amount("18446744.073709551616"), None);
    }

    #[test]
    fn base_formatting_pads_twelve_digits() {
        assert_eq!(format_base_amount(0), "0.000000000000");
        assert_eq!(format_base_amount(500_000_000_000), "0.500000000000");
        assert_eq!(format_base_amount(1_000_000_000_001), "1.000000000001");
    }

    #[test]
    fn uri_formatting_trims_base_zeros() {
        let r = registry();
        let amount = PaymentAmount::from_base_units(500_000_000_000);
        assert_eq!(format_amount_for_uri(&r, &amount).unwrap(), "0.5XMR");

        let amount = PaymentAmount::from_base_units(1_000_000_000_000);
        assert_eq!(format_amount_for_uri(&r, &amount).unwrap(), "1XMR");

        let amount = PaymentAmount::new(100_000_000, "BTC");
        assert_eq!(format_amount_for_uri(&r, &amount).unwrap(), "1BTC");

        let amount = PaymentAmount::zero("XMR");
        assert_eq!(format_amount_for_uri(&r, &amount).unwrap(), "");
    }

    #[test]
    fn uri_formatting_rejects_oversized_base_amounts() {
        let r = registry();
        let amount = PaymentAmount::new(u128::from(u64::MAX) + 1, BASE_CURRENCY);
        assert_eq!(
            format_amount_for_uri(&r, &amount),
            Err(UriError::AmountTooLarge)
        );
    }

    #[test]
    fn minor_str_constructor_uses_checked_parse() {
        let amount = PaymentAmount::from_minor_str("250000000000", "XMR").unwrap();
        assert_eq!(amount.minor, 250_000_000_000);
        assert!(PaymentAmount::from_minor_str("12.5", "XMR").is_err());
    }
}
