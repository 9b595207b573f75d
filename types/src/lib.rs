//! Fundamental types for the Agora governance client.
//!
//! This crate defines the core types shared across every other crate in the workspace:
//! account ids, timestamps, token amounts and the uint256 wire representation.

pub mod address;
pub mod amount;
pub mod error;
pub mod time;
pub mod uint;

pub use address::{truncate_display, AccountId};
pub use amount::{TokenAmount, VOTE_TOKEN_DECIMALS};
pub use error::TypesError;
pub use time::{Clock, SystemClock, Timestamp};
pub use uint::Uint;
