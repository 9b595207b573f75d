//! Ledger boundary for the Agora client.
//!
//! Provides everything the governance layer needs from the outside world:
//! - [`WalletProvider`]: authorized accounts and the active chain
//! - [`LedgerClient`]: contract reads and signed writes
//! - [`GatewayClient`]: the HTTP implementation of both
//! - [`VotingContract`] / [`TokenContract`]: typed bindings over a `LedgerClient`

pub mod call;
pub mod contracts;
pub mod error;
pub mod gateway;
pub mod provider;

pub use call::{ContractCall, TxReceipt};
pub use contracts::{ProposalRecord, TokenContract, VotingContract};
pub use error::LedgerError;
pub use gateway::GatewayClient;
pub use provider::{LedgerClient, WalletProvider};
