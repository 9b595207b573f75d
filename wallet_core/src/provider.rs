//! Traits at the ledger seam.
//!
//! Everything above this seam is written against these traits so the
//! nullable implementations can stand in during tests. Calls are issued from a
//! single logical thread, hence `?Send`.

use agora_types::AccountId;
use async_trait::async_trait;
use serde_json::Value;

use crate::call::{ContractCall, TxReceipt};
use crate::error::LedgerError;

/// The wallet side: which accounts the user has authorized, and on which chain.
#[async_trait(?Send)]
pub trait WalletProvider {
    /// Accounts already authorized. Never prompts the user.
    async fn accounts(&self) -> Result<Vec<AccountId>, LedgerError>;

    /// Ask the user to authorize accounts. May prompt.
    async fn request_accounts(&self) -> Result<Vec<AccountId>, LedgerError>;

    async fn chain_id(&self) -> Result<u64, LedgerError>;
}

/// The contract side: view calls and signed transactions.
#[async_trait(?Send)]
pub trait LedgerClient {
    async fn read(&self, call: &ContractCall) -> Result<Value, LedgerError>;

    /// Sign `call` as `from`, submit it, and wait for the receipt.
    async fn write(&self, from: &AccountId, call: &ContractCall)
        -> Result<TxReceipt, LedgerError>;
}
