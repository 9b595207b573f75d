//! Nullable ledger: scripted contract reads, recorded writes.

use agora_types::AccountId;
use agora_wallet_core::contracts::voting;
use agora_wallet_core::{ContractCall, LedgerClient, LedgerError, TxReceipt};
use async_trait::async_trait;
use serde_json::{json, Value};
use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};

/// One call observed by the [`NullLedger`], in issue order.
#[derive(Clone, Debug, PartialEq)]
pub enum LedgerCall {
    Read(ContractCall),
    Write { from: AccountId, call: ContractCall },
}

impl LedgerCall {
    pub fn method(&self) -> &'static str {
        match self {
            Self::Read(call) => call.method,
            Self::Write { call, .. } => call.method,
        }
    }

    pub fn is_write(&self) -> bool {
        matches!(self, Self::Write { .. })
    }
}

type Scripted = Result<Value, LedgerError>;

/// A test ledger that answers reads from a script and records every call.
///
/// Reads are matched first on `(method, args)`, then on `method` alone.
/// Unscripted reads fail with a provider error. Writes succeed with a
/// confirmed receipt unless an outcome was queued with [`queue_write`].
///
/// [`queue_write`]: NullLedger::queue_write
pub struct NullLedger {
    exact: RefCell<HashMap<(&'static str, String), Scripted>>,
    by_method: RefCell<HashMap<&'static str, Scripted>>,
    write_outcomes: RefCell<VecDeque<Result<TxReceipt, LedgerError>>>,
    calls: RefCell<Vec<LedgerCall>>,
}

fn args_key(args: &[Value]) -> String {
    Value::Array(args.to_vec()).to_string()
}

impl NullLedger {
    pub fn new() -> Self {
        Self {
            exact: RefCell::new(HashMap::new()),
            by_method: RefCell::new(HashMap::new()),
            write_outcomes: RefCell::new(VecDeque::new()),
            calls: RefCell::new(Vec::new()),
        }
    }

    /// Answer `method(args)` with `value`.
    pub fn on_read(&self, method: &'static str, args: Vec<Value>, value: Value) {
        self.exact
            .borrow_mut()
            .insert((method, args_key(&args)), Ok(value));
    }

    /// Fail `method(args)` with `error`.
    pub fn fail_read(&self, method: &'static str, args: Vec<Value>, error: LedgerError) {
        self.exact
            .borrow_mut()
            .insert((method, args_key(&args)), Err(error));
    }

    /// Answer every call of `method` not matched exactly with `value`.
    pub fn on_any_read(&self, method: &'static str, value: Value) {
        self.by_method.borrow_mut().insert(method, Ok(value));
    }

    /// Fail every call of `method` not matched exactly.
    pub fn fail_any_read(&self, method: &'static str, error: LedgerError) {
        self.by_method.borrow_mut().insert(method, Err(error));
    }

    /// Script `getProposalCount` and `getProposal(i)` from a list of records.
    pub fn set_proposals(&self, records: Vec<Value>) {
        self.on_read(voting::GET_PROPOSAL_COUNT, vec![], json!(records.len()));
        for (index, record) in records.into_iter().enumerate() {
            self.on_read(voting::GET_PROPOSAL, vec![json!(index)], record);
        }
    }

    /// Queue the outcome of the next unanswered write.
    pub fn queue_write(&self, outcome: Result<TxReceipt, LedgerError>) {
        self.write_outcomes.borrow_mut().push_back(outcome);
    }

    /// Every call so far, in order.
    pub fn calls(&self) -> Vec<LedgerCall> {
        self.calls.borrow().clone()
    }

    /// Number of calls (read or write) of `method`.
    pub fn count(&self, method: &str) -> usize {
        self.calls
            .borrow()
            .iter()
            .filter(|c| c.method() == method)
            .count()
    }

    pub fn writes(&self) -> Vec<LedgerCall> {
        self.calls
            .borrow()
            .iter()
            .filter(|c| c.is_write())
            .cloned()
            .collect()
    }

    /// Forget recorded calls; the script stays.
    pub fn clear_calls(&self) {
        self.calls.borrow_mut().clear();
    }
}

impl Default for NullLedger {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait(?Send)]
impl LedgerClient for NullLedger {
    async fn read(&self, call: &ContractCall) -> Result<Value, LedgerError> {
        self.calls.borrow_mut().push(LedgerCall::Read(call.clone()));
        let key = (call.method, args_key(&call.args));
        if let Some(scripted) = self.exact.borrow().get(&key) {
            return scripted.clone();
        }
        if let Some(scripted) = self.by_method.borrow().get(call.method) {
            return scripted.clone();
        }
        Err(LedgerError::Provider(format!(
            "no scripted response for {}",
            call.method
        )))
    }

    async fn write(&self, from: &AccountId, call: &ContractCall) -> Result<TxReceipt, LedgerError> {
        self.calls.borrow_mut().push(LedgerCall::Write {
            from: from.clone(),
            call: call.clone(),
        });
        let tx_number = self.writes().len();
        self.write_outcomes
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| {
                Ok(TxReceipt {
                    tx_hash: format!("0x{tx_number:064x}"),
                    block_number: Some(tx_number as u64),
                    status: true,
                })
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contract() -> AccountId {
        AccountId::parse("0x1111111111111111111111111111111111111111").unwrap()
    }

    #[tokio::test]
    async fn exact_match_wins_over_method_match() {
        let ledger = NullLedger::new();
        ledger.on_any_read(voting::GET_PROPOSAL, json!("fallback"));
        ledger.on_read(voting::GET_PROPOSAL, vec![json!(1)], json!("exact"));

        let one = ContractCall::new(&contract(), voting::GET_PROPOSAL, vec![json!(1)]);
        let two = ContractCall::new(&contract(), voting::GET_PROPOSAL, vec![json!(2)]);
        assert_eq!(ledger.read(&one).await.unwrap(), json!("exact"));
        assert_eq!(ledger.read(&two).await.unwrap(), json!("fallback"));
        assert_eq!(ledger.count(voting::GET_PROPOSAL), 2);
    }

    #[tokio::test]
    async fn unscripted_read_fails() {
        let ledger = NullLedger::new();
        let call = ContractCall::new(&contract(), voting::GET_PROPOSAL_COUNT, vec![]);
        assert!(matches!(
            ledger.read(&call).await,
            Err(LedgerError::Provider(_))
        ));
    }

    #[tokio::test]
    async fn writes_are_recorded_and_queued_outcomes_used() {
        let ledger = NullLedger::new();
        ledger.queue_write(Err(LedgerError::Rejected("no".into())));
        let call = ContractCall::new(&contract(), voting::VOTE, vec![json!(0), json!(true)]);

        assert!(ledger.write(&contract(), &call).await.is_err());
        let receipt = ledger.write(&contract(), &call).await.unwrap();
        assert!(receipt.status);
        assert_eq!(ledger.writes().len(), 2);

        ledger.clear_calls();
        assert!(ledger.calls().is_empty());
    }
}
