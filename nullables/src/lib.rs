//! Nullable infrastructure for deterministic testing.
//!
//! All external dependencies (clock, wallet provider, ledger) are abstracted
//! behind traits. This crate provides test-friendly implementations that:
//! - Return scripted values
//! - Record every call for later assertions
//! - Never touch the network
//!
//! Usage: swap the gateway client and system clock for nullables in tests.

pub mod clock;
pub mod ledger;
pub mod wallet;

pub use clock::NullClock;
pub use ledger::{LedgerCall, NullLedger};
pub use wallet::NullWallet;
