//! Typed bindings for the voting contract and its token.
//!
//! Each binding owns the contract address and a shared handle to the ledger
//! client; methods build a [`ContractCall`] and decode the JSON result.

use agora_types::{AccountId, Uint};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};
use std::rc::Rc;
use tracing::debug;

use crate::call::{ContractCall, TxReceipt};
use crate::error::LedgerError;
use crate::provider::LedgerClient;

/// Voting contract method signatures.
pub mod voting {
    pub const CREATE_PROPOSAL: &str = "createProposal(string,string,uint256)";
    pub const VOTE: &str = "vote(uint256,bool)";
    pub const DELEGATE: &str = "delegate(address)";
    pub const GET_PROPOSAL_COUNT: &str = "getProposalCount()";
    pub const GET_PROPOSAL: &str = "getProposal(uint256)";
    pub const HAS_VOTED: &str = "hasVoted(uint256,address)";
    pub const DELEGATED_TO: &str = "delegatedTo(address)";
    pub const GET_VOTING_POWER: &str = "getVotingPower(address)";
}

/// Token contract method signatures.
pub mod token {
    pub const BALANCE_OF: &str = "balanceOf(address)";
    pub const DECIMALS: &str = "decimals()";
    pub const SYMBOL: &str = "symbol()";
}

/// A proposal as returned by `getProposal`.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProposalRecord {
    #[serde(default)]
    pub id: Option<Uint>,
    pub title: String,
    pub description: String,
    pub proposer: AccountId,
    pub start_time: Uint,
    pub end_time: Uint,
    pub for_votes: Uint,
    pub against_votes: Uint,
    pub executed: bool,
    pub active: bool,
}

fn decode<T: DeserializeOwned>(method: &str, value: Value) -> Result<T, LedgerError> {
    serde_json::from_value(value).map_err(|e| LedgerError::Decode {
        method: method.into(),
        reason: e.to_string(),
    })
}

async fn read_as<L, T>(ledger: &L, call: ContractCall) -> Result<T, LedgerError>
where
    L: LedgerClient + ?Sized,
    T: DeserializeOwned,
{
    debug!(contract = %call.contract, method = call.method, "ledger read");
    let value = ledger.read(&call).await?;
    decode(call.method, value)
}

/// Submit a write and turn a reverted receipt into an error.
async fn send<L>(ledger: &L, from: &AccountId, call: ContractCall) -> Result<TxReceipt, LedgerError>
where
    L: LedgerClient + ?Sized,
{
    debug!(contract = %call.contract, method = call.method, %from, "ledger write");
    let receipt = ledger.write(from, &call).await?;
    if !receipt.status {
        return Err(LedgerError::Reverted(format!(
            "transaction {} reverted",
            receipt.tx_hash
        )));
    }
    Ok(receipt)
}

/// Binding for the governance voting contract.
pub struct VotingContract<L: ?Sized> {
    ledger: Rc<L>,
    address: AccountId,
}

impl<L: ?Sized> Clone for VotingContract<L> {
    fn clone(&self) -> Self {
        Self {
            ledger: Rc::clone(&self.ledger),
            address: self.address.clone(),
        }
    }
}

impl<L: LedgerClient + ?Sized> VotingContract<L> {
    pub fn new(ledger: Rc<L>, address: AccountId) -> Self {
        Self { ledger, address }
    }

    pub fn address(&self) -> &AccountId {
        &self.address
    }

    fn call(&self, method: &'static str, args: Vec<Value>) -> ContractCall {
        ContractCall::new(&self.address, method, args)
    }

    pub async fn proposal_count(&self) -> Result<u64, LedgerError> {
        let count: Uint =
            read_as(&*self.ledger, self.call(voting::GET_PROPOSAL_COUNT, vec![])).await?;
        Ok(count.to_u64()?)
    }

    pub async fn proposal(&self, index: u64) -> Result<ProposalRecord, LedgerError> {
        read_as(
            &*self.ledger,
            self.call(voting::GET_PROPOSAL, vec![json!(index)]),
        )
        .await
    }

    pub async fn has_voted(&self, proposal_id: u64, voter: &AccountId) -> Result<bool, LedgerError> {
        read_as(
            &*self.ledger,
            self.call(voting::HAS_VOTED, vec![json!(proposal_id), json!(voter)]),
        )
        .await
    }

    pub async fn delegated_to(&self, account: &AccountId) -> Result<AccountId, LedgerError> {
        read_as(
            &*self.ledger,
            self.call(voting::DELEGATED_TO, vec![json!(account)]),
        )
        .await
    }

    pub async fn voting_power(&self, account: &AccountId) -> Result<u128, LedgerError> {
        let power: Uint = read_as(
            &*self.ledger,
            self.call(voting::GET_VOTING_POWER, vec![json!(account)]),
        )
        .await?;
        Ok(power.0)
    }

    pub async fn create_proposal(
        &self,
        from: &AccountId,
        title: &str,
        description: &str,
        voting_duration_secs: u64,
    ) -> Result<TxReceipt, LedgerError> {
        let call = self.call(
            voting::CREATE_PROPOSAL,
            vec![json!(title), json!(description), json!(voting_duration_secs)],
        );
        send(&*self.ledger, from, call).await
    }

    pub async fn vote(
        &self,
        from: &AccountId,
        proposal_id: u64,
        support: bool,
    ) -> Result<TxReceipt, LedgerError> {
        let call = self.call(voting::VOTE, vec![json!(proposal_id), json!(support)]);
        send(&*self.ledger, from, call).await
    }

    pub async fn delegate(
        &self,
        from: &AccountId,
        delegatee: &AccountId,
    ) -> Result<TxReceipt, LedgerError> {
        let call = self.call(voting::DELEGATE, vec![json!(delegatee)]);
        send(&*self.ledger, from, call).await
    }
}

/// Binding for the voting token (read-only).
pub struct TokenContract<L: ?Sized> {
    ledger: Rc<L>,
    address: AccountId,
}

impl<L: ?Sized> Clone for TokenContract<L> {
    fn clone(&self) -> Self {
        Self {
            ledger: Rc::clone(&self.ledger),
            address: self.address.clone(),
        }
    }
}

impl<L: LedgerClient + ?Sized> TokenContract<L> {
    pub fn new(ledger: Rc<L>, address: AccountId) -> Self {
        Self { ledger, address }
    }

    pub fn address(&self) -> &AccountId {
        &self.address
    }

    pub async fn balance_of(&self, account: &AccountId) -> Result<u128, LedgerError> {
        let call = ContractCall::new(&self.address, token::BALANCE_OF, vec![json!(account)]);
        let balance: Uint = read_as(&*self.ledger, call).await?;
        Ok(balance.0)
    }

    pub async fn decimals(&self) -> Result<u8, LedgerError> {
        let call = ContractCall::new(&self.address, token::DECIMALS, vec![]);
        let decimals: Uint = read_as(&*self.ledger, call).await?;
        u8::try_from(decimals.0).map_err(|_| LedgerError::Decode {
            method: token::DECIMALS.into(),
            reason: format!("{} does not fit in uint8", decimals.0),
        })
    }

    pub async fn symbol(&self) -> Result<String, LedgerError> {
        let call = ContractCall::new(&self.address, token::SYMBOL, vec![]);
        read_as(&*self.ledger, call).await
    }
}
