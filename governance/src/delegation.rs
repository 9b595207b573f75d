//! Delegation viewer and updater.

use agora_types::AccountId;
use agora_wallet_core::{LedgerClient, TxReceipt};
use tracing::{info, warn};

use crate::error::GovernanceError;
use crate::session::Session;

/// Where the session account's voting power currently goes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DelegateStatus {
    /// Delegated to itself, or never delegated (the zero address).
    SelfDelegated,
    Delegated(AccountId),
    /// The delegation read failed.
    Unavailable,
}

impl DelegateStatus {
    pub fn label(&self) -> String {
        match self {
            Self::SelfDelegated => "Self (You are voting with your own tokens)".to_string(),
            Self::Delegated(delegate) => delegate.short(),
            Self::Unavailable => "Unable to load".to_string(),
        }
    }
}

/// Read who the session account delegates to. Never fails; a failed read
/// becomes [`DelegateStatus::Unavailable`].
pub async fn load_delegate_status<L>(session: &Session<L>) -> DelegateStatus
where
    L: LedgerClient + ?Sized,
{
    match session.voting().delegated_to(session.account()).await {
        Ok(delegate) if delegate.is_zero() || &delegate == session.account() => {
            DelegateStatus::SelfDelegated
        }
        Ok(delegate) => DelegateStatus::Delegated(delegate),
        Err(e) => {
            warn!(account = %session.account(), error = %e, "failed to load delegation");
            DelegateStatus::Unavailable
        }
    }
}

/// Delegate the session account's voting power to `delegatee`.
///
/// The address is validated before anything is sent.
pub async fn update_delegation<L>(
    session: Option<&Session<L>>,
    delegatee: &str,
) -> Result<TxReceipt, GovernanceError>
where
    L: LedgerClient + ?Sized,
{
    let session = session.ok_or(GovernanceError::Unauthenticated)?;
    let delegatee = AccountId::parse(delegatee.trim())
        .map_err(|e| GovernanceError::InvalidInput(e.to_string()))?;
    let receipt = session
        .voting()
        .delegate(session.account(), &delegatee)
        .await
        .map_err(|e| {
            warn!(%delegatee, error = %e, "delegation failed");
            GovernanceError::write(e)
        })?;
    info!(from = %session.account(), to = %delegatee, tx = %receipt.tx_hash, "delegation updated");
    Ok(receipt)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::ContractAddresses;
    use agora_nullables::NullLedger;
    use agora_wallet_core::contracts::voting;
    use agora_wallet_core::LedgerError;
    use serde_json::json;
    use std::rc::Rc;

    fn account(byte: char) -> AccountId {
        AccountId::parse(&format!("0x{}", byte.to_string().repeat(40))).unwrap()
    }

    fn session(ledger: &Rc<NullLedger>) -> Session<NullLedger> {
        Session::new(
            account('a'),
            Rc::clone(ledger),
            &ContractAddresses {
                voting: account('1'),
                token: account('2'),
            },
        )
    }

    #[tokio::test]
    async fn zero_address_and_self_are_self_delegated() {
        let ledger = Rc::new(NullLedger::new());
        let session = session(&ledger);

        ledger.on_any_read(voting::DELEGATED_TO, json!(AccountId::zero()));
        assert_eq!(load_delegate_status(&session).await, DelegateStatus::SelfDelegated);

        ledger.on_any_read(voting::DELEGATED_TO, json!(account('a')));
        let status = load_delegate_status(&session).await;
        assert_eq!(status, DelegateStatus::SelfDelegated);
        assert_eq!(status.label(), "Self (You are voting with your own tokens)");
    }

    #[tokio::test]
    async fn other_delegate_is_shown_short() {
        let ledger = Rc::new(NullLedger::new());
        ledger.on_any_read(voting::DELEGATED_TO, json!(account('b')));
        let status = load_delegate_status(&session(&ledger)).await;
        assert_eq!(status, DelegateStatus::Delegated(account('b')));
        assert_eq!(status.label(), "0xbbbb...bbbb");
    }

    #[tokio::test]
    async fn failed_read_is_unavailable() {
        let ledger = Rc::new(NullLedger::new());
        ledger.fail_any_read(voting::DELEGATED_TO, LedgerError::Transport("down".into()));
        let status = load_delegate_status(&session(&ledger)).await;
        assert_eq!(status.label(), "Unable to load");
    }

    #[tokio::test]
    async fn malformed_delegatee_sends_nothing() {
        let ledger = Rc::new(NullLedger::new());
        let session = session(&ledger);
        let err = update_delegation(Some(&session), "0x1234").await.unwrap_err();
        assert!(matches!(err, GovernanceError::InvalidInput(_)));
        assert!(ledger.writes().is_empty());
    }

    #[tokio::test]
    async fn delegation_is_written_from_session_account() {
        let ledger = Rc::new(NullLedger::new());
        let session = session(&ledger);
        let delegatee = format!("  0x{}  ", "B".repeat(40));
        update_delegation(Some(&session), &delegatee).await.unwrap();

        let writes = ledger.writes();
        assert_eq!(writes.len(), 1);
        match &writes[0] {
            agora_nullables::LedgerCall::Write { from, call } => {
                assert_eq!(from, &account('a'));
                assert_eq!(call.method, voting::DELEGATE);
                assert_eq!(call.args, vec![json!(account('b'))]);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[tokio::test]
    async fn no_session_is_unauthenticated() {
        assert!(matches!(
            update_delegation::<NullLedger>(None, "0x0").await,
            Err(GovernanceError::Unauthenticated)
        ));
    }
}
