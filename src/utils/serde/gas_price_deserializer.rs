//! Deserialization utilities for gas prices
//!
//! Relays report gas prices either as decimal strings, `0x` prefixed hex
//! strings or plain JSON integers.

use std::fmt;

use serde::{de, Deserializer};

#[derive(Debug)]
struct GasPriceVisitor;

impl de::Visitor<'_> for GasPriceVisitor {
    type Value = u128;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a decimal or hex string, or a non-negative integer")
    }

    fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        let value = value.trim();
        match value
            .strip_prefix("0x")
            .or_else(|| value.strip_prefix("0X"))
        {
            Some(hex) => u128::from_str_radix(hex, 16).map_err(de::Error::custom),
            None => value.parse::<u128>().map_err(de::Error::custom),
        }
    }

    fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(value as u128)
    }

    fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        u128::try_from(value)
            .map_err(|_| de::Error::custom("gas price cannot be negative"))
    }
}

pub fn deserialize_gas_price<'de, D>(deserializer: D) -> Result<u128, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_any(GasPriceVisitor)
}
