//! Token amounts.
//!
//! Amounts are fixed-point integers (u128 base units) paired with the token's
//! decimal count. Formatting is done on digit strings so that any decimal
//! count the token reports is handled without floating point.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Decimals of the voting token; tallies are reported in its base units.
pub const VOTE_TOKEN_DECIMALS: u8 = 18;

/// A token amount in base units.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TokenAmount {
    raw: u128,
    decimals: u8,
}

impl TokenAmount {
    pub fn new(raw: u128, decimals: u8) -> Self {
        Self { raw, decimals }
    }

    /// An amount of the 18-decimal voting token.
    pub fn votes(raw: u128) -> Self {
        Self::new(raw, VOTE_TOKEN_DECIMALS)
    }

    pub fn raw(&self) -> u128 {
        self.raw
    }

    pub fn decimals(&self) -> u8 {
        self.decimals
    }

    /// Exact decimal form with trailing zeros trimmed: `1.5`, `0.0`, `12.0`.
    pub fn format_units(&self) -> String {
        let (int, frac) = split_digits(self.raw, self.decimals as usize);
        let frac = frac.trim_end_matches('0');
        if frac.is_empty() {
            format!("{int}.0")
        } else {
            format!("{int}.{frac}")
        }
    }

    /// Decimal form rounded half-up to exactly `places` fractional digits.
    pub fn format_fixed(&self, places: u8) -> String {
        let places = places as usize;
        let decimals = self.decimals as usize;
        let (int, frac) = if decimals <= places {
            let (int, mut frac) = split_digits(self.raw, decimals);
            frac.push_str(&"0".repeat(places - decimals));
            (int, frac)
        } else {
            let drop = (decimals - places) as u32;
            let scaled = match 10u128.checked_pow(drop) {
                Some(divisor) => {
                    let (q, r) = (self.raw / divisor, self.raw % divisor);
                    if r >= divisor - r {
                        q + 1
                    } else {
                        q
                    }
                }
                // Divisor exceeds u128::MAX, so the raw value rounds to zero.
                None => 0,
            };
            split_digits(scaled, places)
        };
        if places == 0 {
            int
        } else {
            format!("{int}.{frac}")
        }
    }
}

impl fmt::Display for TokenAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_units())
    }
}

/// Split `value` into its integer digits and exactly `decimals` fractional digits.
fn split_digits(value: u128, decimals: usize) -> (String, String) {
    let digits = value.to_string();
    if digits.len() > decimals {
        let (int, frac) = digits.split_at(digits.len() - decimals);
        (int.to_string(), frac.to_string())
    } else {
        let frac = format!("{}{}", "0".repeat(decimals - digits.len()), digits);
        ("0".to_string(), frac)
    }
}
