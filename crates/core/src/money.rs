//! Money and unit helpers.
//!
//! Balances, NAVs and unit counts arrive from the backend either as decimal
//! strings (`"300.00"`) or as JSON numbers; both decode into [`Money`].

use core::fmt;
use core::str::FromStr;

use bigdecimal::BigDecimal;
use serde::de::{self, Deserializer, Visitor};

/// Arbitrary-precision decimal used for every amount, NAV and unit count.
pub type Money = BigDecimal;

/// Parse user-entered amount text. Blank or malformed input yields `None`.
pub fn parse_amount(input: &str) -> Option<Money> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }
    BigDecimal::from_str(trimmed).ok()
}

/// Render an amount the way the portal displays it: rupee sign, two decimals.
pub fn format_inr(amount: &Money) -> String {
    format!("₹{}", amount.round(2).with_scale(2))
}

/// Truncate a unit count to the four decimals the backend stores.
///
/// Allotments are rounded down, never up.
pub fn truncate_units(units: &Money) -> Money {
    units.with_scale(4)
}

/// Decode an amount from a decimal string or a JSON number.
///
/// Floats go through their shortest decimal text, so `7.9397` decodes to
/// exactly `7.9397` rather than the nearest binary double.
/// Use with `#[serde(deserialize_with = "fundportal_core::money::deserialize_amount")]`.
pub fn deserialize_amount<'de, D>(deserializer: D) -> Result<Money, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_any(AmountVisitor)
}

struct AmountVisitor;

impl<'de> Visitor<'de> for AmountVisitor {
    type Value = Money;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a decimal amount as a string or number")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Money, E> {
        BigDecimal::from_str(v.trim()).map_err(|_| E::invalid_value(de::Unexpected::Str(v), &self))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Money, E> {
        Ok(BigDecimal::from(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Money, E> {
        Ok(BigDecimal::from(v))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Money, E> {
        if !v.is_finite() {
            return Err(E::invalid_value(de::Unexpected::Float(v), &self));
        }
        BigDecimal::from_str(&v.to_string())
            .map_err(|_| E::invalid_value(de::Unexpected::Float(v), &self))
    }
}
