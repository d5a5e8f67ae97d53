//! Money type for representing monetary values.
//!
//! Amounts are integers in the currency's minor unit so that cart totals
//! never accumulate floating-point error.

use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// Supported currencies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Currency {
    /// Colombian peso. Prices are handled in whole pesos.
    #[default]
    COP,
    USD,
    EUR,
    MXN,
}

impl Currency {
    /// Get the currency code (e.g., "COP").
    pub fn code(&self) -> &'static str {
        match self {
            Currency::COP => "COP",
            Currency::USD => "USD",
            Currency::EUR => "EUR",
            Currency::MXN => "MXN",
        }
    }

    /// Get the currency symbol (e.g., "$").
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::COP => "$",
            Currency::USD => "US$",
            Currency::EUR => "\u{20ac}",
            Currency::MXN => "MX$",
        }
    }

    /// Get the number of decimal places stored for this currency.
    pub fn decimal_places(&self) -> u32 {
        match self {
            Currency::COP => 0,
            _ => 2,
        }
    }

    /// Thousands separator used when displaying amounts.
    fn group_separator(&self) -> char {
        match self {
            Currency::COP | Currency::EUR => '.',
            _ => ',',
        }
    }

    /// Decimal separator used when displaying amounts.
    fn decimal_separator(&self) -> char {
        match self {
            Currency::COP | Currency::EUR => ',',
            _ => '.',
        }
    }

    /// Parse a currency code string.
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_uppercase().as_str() {
            "COP" => Some(Currency::COP),
            "USD" => Some(Currency::USD),
            "EUR" => Some(Currency::EUR),
            "MXN" => Some(Currency::MXN),
            _ => None,
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A monetary value with currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct Money {
    /// Amount in the smallest stored unit of the currency.
    pub amount_minor: i64,
    /// The currency.
    pub currency: Currency,
}

impl Money {
    /// Create a new Money value from minor units.
    pub fn new(amount_minor: i64, currency: Currency) -> Self {
        Self {
            amount_minor,
            currency,
        }
    }

    /// Create a Money value from a decimal amount in major units.
    ///
    /// ```
    /// use pos_core::money::{Money, Currency};
    /// let price = Money::from_decimal(49.99, Currency::USD);
    /// assert_eq!(price.amount_minor, 4999);
    /// ```
    pub fn from_decimal(amount: f64, currency: Currency) -> Self {
        let multiplier = 10_i64.pow(currency.decimal_places());
        let amount_minor = (amount * multiplier as f64).round() as i64;
        Self::new(amount_minor, currency)
    }

    /// Like [`from_decimal`](Self::from_decimal), but `None` when the scaled
    /// amount is not finite or does not fit in `i64`.
    pub fn try_from_decimal(amount: f64, currency: Currency) -> Option<Self> {
        let multiplier = 10_i64.pow(currency.decimal_places());
        let scaled = (amount * multiplier as f64).round();
        // i64::MAX as f64 rounds up to 2^63, which is already out of range.
        if !scaled.is_finite() || scaled < i64::MIN as f64 || scaled >= i64::MAX as f64 {
            return None;
        }
        Some(Self::new(scaled as i64, currency))
    }

    /// Parse user input as a non-negative amount in major units.
    ///
    /// Returns `None` for anything that is not a finite number `>= 0` or
    /// that is too large to store.
    pub fn parse_non_negative(input: &str, currency: Currency) -> Option<Self> {
        let value: f64 = input.trim().parse().ok()?;
        if !value.is_finite() || value < 0.0 {
            return None;
        }
        Self::try_from_decimal(value, currency)
    }

    /// Create a zero amount in the given currency.
    pub fn zero(currency: Currency) -> Self {
        Self::new(0, currency)
    }

    /// Check if this is zero.
    pub fn is_zero(&self) -> bool {
        self.amount_minor == 0
    }

    /// Check if this is negative.
    pub fn is_negative(&self) -> bool {
        self.amount_minor < 0
    }

    /// Convert to a decimal value in major units.
    pub fn to_decimal(&self) -> f64 {
        let divisor = 10_i64.pow(self.currency.decimal_places());
        self.amount_minor as f64 / divisor as f64
    }

    /// Format as a display string (e.g., "$1.234").
    pub fn display(&self) -> String {
        let sign = if self.is_negative() { "-" } else { "" };
        format!("{}{}{}", sign, self.currency.symbol(), self.display_amount())
    }

    /// Format the absolute amount without symbol, with digit grouping.
    pub fn display_amount(&self) -> String {
        let places = self.currency.decimal_places();
        let divisor = 10_u64.pow(places);
        let abs = self.amount_minor.unsigned_abs();
        let whole = group_thousands(abs / divisor, self.currency.group_separator());
        if places == 0 {
            whole
        } else {
            format!(
                "{}{}{:0width$}",
                whole,
                self.currency.decimal_separator(),
                abs % divisor,
                width = places as usize
            )
        }
    }

    /// Plain decimal text suitable for an editable input field.
    pub fn input_text(&self) -> String {
        let places = self.currency.decimal_places() as usize;
        format!("{:.places$}", self.to_decimal())
    }

    /// Try to add another Money value, returning None on currency mismatch or overflow.
    pub fn try_add(&self, other: &Money) -> Option<Money> {
        if self.currency != other.currency {
            return None;
        }
        self.amount_minor
            .checked_add(other.amount_minor)
            .map(|amount| Money::new(amount, self.currency))
    }

    /// Multiply by a quantity, returning None on overflow.
    pub fn try_multiply(&self, factor: i64) -> Option<Money> {
        self.amount_minor
            .checked_mul(factor)
            .map(|amount| Money::new(amount, self.currency))
    }

    /// Calculate a percentage of this amount, rounded to the nearest minor unit.
    pub fn percentage(&self, percent: f64) -> Money {
        let amount = (self.amount_minor as f64 * percent / 100.0).round() as i64;
        Money::new(amount, self.currency)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}

/// Serialize a [`Money`] as a bare JSON number in major units.
///
/// Whole-unit currencies go out as integers, the rest as decimals.
pub fn serialize_major<S: Serializer>(money: &Money, serializer: S) -> Result<S::Ok, S::Error> {
    if money.currency.decimal_places() == 0 {
        serializer.serialize_i64(money.amount_minor)
    } else {
        serializer.serialize_f64(money.to_decimal())
    }
}

fn group_thousands(value: u64, separator: char) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(separator);
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_money_from_decimal() {
        let m = Money::from_decimal(49.99, Currency::USD);
        assert_eq!(m.amount_minor, 4999);

        let m = Money::from_decimal(100.0, Currency::COP);
        assert_eq!(m.amount_minor, 100);
    }

    #[test]
    fn test_parse_non_negative() {
        assert_eq!(
            Money::parse_non_negative("90", Currency::COP),
            Some(Money::new(90, Currency::COP))
        );
        assert_eq!(
            Money::parse_non_negative(" 12.50 ", Currency::USD),
            Some(Money::new(1250, Currency::USD))
        );
        assert_eq!(Money::parse_non_negative("-1", Currency::COP), None);
        assert_eq!(Money::parse_non_negative("abc", Currency::COP), None);
        assert_eq!(Money::parse_non_negative("NaN", Currency::COP), None);
        assert_eq!(Money::parse_non_negative("inf", Currency::COP), None);
        assert_eq!(Money::parse_non_negative("", Currency::COP), None);
    }

    #[test]
    fn test_parse_rejects_amounts_too_large_to_store() {
        assert_eq!(Money::parse_non_negative("1e30", Currency::COP), None);
        assert_eq!(Money::parse_non_negative("9223372036854775808", Currency::COP), None);
        assert_eq!(Money::parse_non_negative("1e17", Currency::USD), None);
        assert_eq!(
            Money::parse_non_negative("1000000000", Currency::COP),
            Some(Money::new(1_000_000_000, Currency::COP))
        );
    }

    #[test]
    fn test_money_display() {
        assert_eq!(Money::new(1_234_567, Currency::COP).display(), "$1.234.567");
        assert_eq!(Money::new(270, Currency::COP).display(), "$270");
        assert_eq!(Money::new(123_456, Currency::USD).display(), "US$1,234.56");
        assert_eq!(Money::new(-5, Currency::USD).display(), "-US$0.05");
    }

    #[test]
    fn test_input_text() {
        assert_eq!(Money::new(90, Currency::COP).input_text(), "90");
        assert_eq!(Money::new(905, Currency::USD).input_text(), "9.05");
    }

    #[test]
    fn test_try_add_rejects_mismatch() {
        let cop = Money::new(1000, Currency::COP);
        let usd = Money::new(1000, Currency::USD);
        assert!(cop.try_add(&usd).is_none());
        assert_eq!(cop.try_add(&cop).unwrap().amount_minor, 2000);
    }

    #[test]
    fn test_try_multiply_overflow() {
        let m = Money::new(i64::MAX, Currency::COP);
        assert!(m.try_multiply(2).is_none());
        assert_eq!(Money::new(90, Currency::COP).try_multiply(3).unwrap().amount_minor, 270);
    }

    #[test]
    fn test_money_percentage() {
        let m = Money::new(10000, Currency::USD);
        assert_eq!(m.percentage(19.0).amount_minor, 1900);
    }

    #[test]
    fn test_serialize_major() {
        #[derive(Serialize)]
        struct Wire {
            #[serde(serialize_with = "serialize_major")]
            price: Money,
        }

        let cop = serde_json::to_string(&Wire { price: Money::new(90, Currency::COP) }).unwrap();
        assert_eq!(cop, r#"{"price":90}"#);
        let usd = serde_json::to_string(&Wire { price: Money::new(1250, Currency::USD) }).unwrap();
        assert_eq!(usd, r#"{"price":12.5}"#);
    }

    #[test]
    fn test_currency_from_code() {
        assert_eq!(Currency::from_code("cop"), Some(Currency::COP));
        assert_eq!(Currency::from_code("USD"), Some(Currency::USD));
        assert_eq!(Currency::from_code("XXX"), None);
    }
}
