//! Nullable wallet provider: scripted accounts and authorization outcome.

use agora_types::AccountId;
use agora_wallet_core::{LedgerError, WalletProvider};
use async_trait::async_trait;
use std::cell::{Cell, RefCell};

/// A wallet provider whose accounts and chain are set by the test.
///
/// `request_accounts` answers with the scripted authorization outcome; an
/// approval also becomes the set returned by `accounts`.
pub struct NullWallet {
    authorized: RefCell<Vec<AccountId>>,
    on_request: RefCell<Result<Vec<AccountId>, LedgerError>>,
    chain_id: Cell<u64>,
    requests: Cell<usize>,
}

impl NullWallet {
    /// A wallet with nothing authorized that approves `accounts` when asked.
    pub fn approving(accounts: Vec<AccountId>) -> Self {
        Self {
            authorized: RefCell::new(Vec::new()),
            on_request: RefCell::new(Ok(accounts)),
            chain_id: Cell::new(1),
            requests: Cell::new(0),
        }
    }

    /// A wallet that already has `accounts` authorized.
    pub fn connected(accounts: Vec<AccountId>) -> Self {
        let wallet = Self::approving(accounts.clone());
        wallet.set_accounts(accounts);
        wallet
    }

    /// A wallet where the user declines every authorization prompt.
    pub fn denying() -> Self {
        Self {
            authorized: RefCell::new(Vec::new()),
            on_request: RefCell::new(Err(LedgerError::Rejected(
                "User rejected the request.".into(),
            ))),
            chain_id: Cell::new(1),
            requests: Cell::new(0),
        }
    }

    /// Replace the authorized accounts (what an account switch looks like).
    pub fn set_accounts(&self, accounts: Vec<AccountId>) {
        *self.authorized.borrow_mut() = accounts;
    }

    pub fn set_chain_id(&self, chain_id: u64) {
        self.chain_id.set(chain_id);
    }

    /// Number of authorization prompts shown so far.
    pub fn request_count(&self) -> usize {
        self.requests.get()
    }
}

#[async_trait(?Send)]
impl WalletProvider for NullWallet {
    async fn accounts(&self) -> Result<Vec<AccountId>, LedgerError> {
        Ok(self.authorized.borrow().clone())
    }

    async fn request_accounts(&self) -> Result<Vec<AccountId>, LedgerError> {
        self.requests.set(self.requests.get() + 1);
        let outcome = self.on_request.borrow().clone();
        if let Ok(accounts) = &outcome {
            self.set_accounts(accounts.clone());
        }
        outcome
    }

    async fn chain_id(&self) -> Result<u64, LedgerError> {
        Ok(self.chain_id.get())
    }
}
