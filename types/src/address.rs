//! Account id type with `0x` prefix.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::TypesError;

/// A ledger account id: `0x` followed by 40 hex digits (20 bytes).
///
/// Stored lowercased so that ids returned by the contract (checksummed) and
/// ids returned by the wallet provider (lowercase) compare equal.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AccountId(String);

impl AccountId {
    /// The standard prefix for all account ids.
    pub const PREFIX: &'static str = "0x";

    /// Number of hex digits after the prefix.
    pub const HEX_LEN: usize = 40;

    /// Parse and normalize an account id.
    pub fn parse(raw: &str) -> Result<Self, TypesError> {
        let trimmed = raw.trim();
        let digits = trimmed
            .strip_prefix("0x")
            .or_else(|| trimmed.strip_prefix("0X"))
            .ok_or_else(|| TypesError::InvalidAccount(raw.to_string()))?;
        if digits.len() != Self::HEX_LEN {
            return Err(TypesError::InvalidAccount(raw.to_string()));
        }
        hex::decode(digits).map_err(|_| TypesError::InvalidAccount(raw.to_string()))?;
        Ok(Self(format!("{}{}", Self::PREFIX, digits.to_ascii_lowercase())))
    }

    /// The all-zero account, used by the contract for "no delegate".
    pub fn zero() -> Self {
        Self(format!("{}{}", Self::PREFIX, "0".repeat(Self::HEX_LEN)))
    }

    pub fn is_zero(&self) -> bool {
        self.0[Self::PREFIX.len()..].bytes().all(|b| b == b'0')
    }

    /// Return the normalized id string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Display form: `first6...last4`.
    pub fn short(&self) -> String {
        truncate_display(&self.0)
    }
}

/// Truncate an account-like string to `first6...last4`.
///
/// Strings no longer than the truncated form itself (13 chars) are returned
/// unchanged.
pub fn truncate_display(raw: &str) -> String {
    let chars: Vec<char> = raw.chars().collect();
    if chars.len() <= 13 {
        return raw.to_string();
    }
    let head: String = chars[..6].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{head}...{tail}")
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for AccountId {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for AccountId {
    type Error = TypesError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<AccountId> for String {
    fn from(id: AccountId) -> Self {
        id.0
    }
}
