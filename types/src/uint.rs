//! uint256 values as they arrive over JSON.
//!
//! Ledger gateways encode uint256 either as a JSON number or as a string,
//! decimal or `0x`-prefixed hex. Numbers are read from their exact digits, so
//! tallies above `u64::MAX` survive. Values above `u128::MAX` and fractional
//! numbers are rejected.

use serde::de::{self, Unexpected};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use crate::error::TypesError;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Uint(pub u128);

impl Uint {
    pub fn parse(raw: &str) -> Result<Self, TypesError> {
        let trimmed = raw.trim();
        let parsed = match trimmed
            .strip_prefix("0x")
            .or_else(|| trimmed.strip_prefix("0X"))
        {
            Some(hex) => u128::from_str_radix(hex, 16),
            None => trimmed.parse::<u128>(),
        };
        parsed
            .map(Self)
            .map_err(|_| TypesError::InvalidUint(raw.to_string()))
    }

    /// Narrow to u64, e.g. for proposal ids and timestamps.
    pub fn to_u64(self) -> Result<u64, TypesError> {
        u64::try_from(self.0).map_err(|_| TypesError::InvalidUint(self.0.to_string()))
    }
}

impl<'de> Deserialize<'de> for Uint {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match Value::deserialize(deserializer)? {
            Value::Number(n) => Self::parse(&n.to_string()).map_err(de::Error::custom),
            Value::String(s) => Self::parse(&s).map_err(de::Error::custom),
            Value::Bool(b) => Err(de::Error::invalid_type(Unexpected::Bool(b), &"a uint256")),
            other => Err(de::Error::custom(format!("expected a uint256, got {other}"))),
        }
    }
}

impl Serialize for Uint {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match u64::try_from(self.0) {
            Ok(n) => serializer.serialize_u64(n),
            Err(_) => serializer.serialize_str(&self.0.to_string()),
        }
    }
}
