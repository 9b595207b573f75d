//! The session: which account is acting, and the contract handles it acts through.
//!
//! Two states, `Disconnected` and `Connected(session)`. A session is created on
//! successful authorization and dropped on disconnect; an account switch
//! replaces the account in place.

use agora_types::AccountId;
use agora_wallet_core::{LedgerClient, TokenContract, VotingContract};
use serde::{Deserialize, Serialize};
use std::rc::Rc;
use tracing::info;

/// Addresses of the contracts a session talks to.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractAddresses {
    pub voting: AccountId,
    pub token: AccountId,
}

/// An authorized account plus its contract bindings.
pub struct Session<L: ?Sized> {
    account: AccountId,
    voting: VotingContract<L>,
    token: TokenContract<L>,
}

impl<L: LedgerClient + ?Sized> Session<L> {
    pub fn new(account: AccountId, ledger: Rc<L>, contracts: &ContractAddresses) -> Self {
        Self {
            account,
            voting: VotingContract::new(Rc::clone(&ledger), contracts.voting.clone()),
            token: TokenContract::new(ledger, contracts.token.clone()),
        }
    }

    pub fn account(&self) -> &AccountId {
        &self.account
    }

    pub fn voting(&self) -> &VotingContract<L> {
        &self.voting
    }

    pub fn token(&self) -> &TokenContract<L> {
        &self.token
    }
}

/// What an accounts-changed notification did to the session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Transition {
    /// Nothing changed; no reload needed.
    Unchanged,
    /// The acting account changed; user data and proposals must reload.
    Switched { from: AccountId, to: AccountId },
    /// The provider reported zero accounts.
    Disconnected,
}

pub enum SessionState<L: ?Sized> {
    Disconnected,
    Connected(Session<L>),
}

impl<L: LedgerClient + ?Sized> SessionState<L> {
    pub fn session(&self) -> Option<&Session<L>> {
        match self {
            Self::Connected(session) => Some(session),
            Self::Disconnected => None,
        }
    }

    pub fn account(&self) -> Option<&AccountId> {
        self.session().map(Session::account)
    }

    pub fn is_connected(&self) -> bool {
        matches!(self, Self::Connected(_))
    }

    /// Disconnected → Connected on successful authorization.
    pub fn connect(&mut self, session: Session<L>) {
        info!(account = %session.account(), "session connected");
        *self = Self::Connected(session);
    }

    pub fn disconnect(&mut self) {
        if let Self::Connected(session) = self {
            info!(account = %session.account(), "session disconnected");
        }
        *self = Self::Disconnected;
    }

    /// Apply an accounts-changed notification.
    ///
    /// Zero accounts disconnects. A different first account switches the
    /// session in place. The same account, or any notification while
    /// disconnected, changes nothing.
    pub fn on_accounts_changed(&mut self, accounts: &[AccountId]) -> Transition {
        let Self::Connected(session) = self else {
            return Transition::Unchanged;
        };
        match accounts.first() {
            None => {
                self.disconnect();
                Transition::Disconnected
            }
            Some(next) if *next == session.account => Transition::Unchanged,
            Some(next) => {
                let from = std::mem::replace(&mut session.account, next.clone());
                info!(%from, to = %next, "session account switched");
                Transition::Switched {
                    from,
                    to: next.clone(),
                }
            }
        }
    }
}
