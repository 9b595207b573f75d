//! Vote submitter.

use agora_wallet_core::{LedgerClient, TxReceipt};
use std::collections::HashMap;
use tracing::{info, warn};

use crate::error::GovernanceError;
use crate::fetcher::{fetch_proposals, FetchReport};
use crate::proposal::Proposal;
use crate::session::Session;

/// A confirmed vote and the proposal list re-fetched after it.
#[derive(Debug)]
pub struct VoteOutcome {
    pub receipt: TxReceipt,
    /// The vote stands even if this re-fetch fails.
    pub refreshed: Result<FetchReport, GovernanceError>,
}

/// Cast a vote on `proposal_id` as the session's account.
///
/// Without a session nothing is sent. After a confirmed write the proposal
/// list is fetched exactly once; a failed write is reported with its reason
/// and never retried.
pub async fn submit_vote<L>(
    session: Option<&Session<L>>,
    proposal_id: u64,
    support: bool,
) -> Result<VoteOutcome, GovernanceError>
where
    L: LedgerClient + ?Sized,
{
    let session = session.ok_or(GovernanceError::Unauthenticated)?;
    let receipt = session
        .voting()
        .vote(session.account(), proposal_id, support)
        .await
        .map_err(|e| {
            warn!(proposal_id, support, error = %e, "vote failed");
            GovernanceError::write(e)
        })?;
    info!(proposal_id, support, tx = %receipt.tx_hash, "vote confirmed");

    let refreshed = fetch_proposals(session.voting()).await;
    Ok(VoteOutcome { receipt, refreshed })
}

/// Has-voted flags for the session's account on each active proposal.
///
/// Ended proposals are not queried. Failed lookups are logged and left out.
pub async fn load_vote_flags<L>(session: &Session<L>, proposals: &[Proposal]) -> HashMap<u64, bool>
where
    L: LedgerClient + ?Sized,
{
    let mut flags = HashMap::new();
    for proposal in proposals.iter().filter(|p| p.active) {
        match session
            .voting()
            .has_voted(proposal.id, session.account())
            .await
        {
            Ok(voted) => {
                flags.insert(proposal.id, voted);
            }
            Err(e) => warn!(proposal_id = proposal.id, error = %e, "has-voted lookup failed"),
        }
    }
    flags
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::ContractAddresses;
    use agora_nullables::{LedgerCall, NullLedger};
    use agora_types::AccountId;
    use agora_wallet_core::contracts::voting;
    use agora_wallet_core::LedgerError;
    use serde_json::{json, Value};
    use std::rc::Rc;

    fn account(byte: char) -> AccountId {
        AccountId::parse(&format!("0x{}", byte.to_string().repeat(40))).unwrap()
    }

    fn record(id: u64, active: bool) -> Value {
        json!({
            "id": id, "title": "t", "description": "d",
            "proposer": account('a'), "startTime": 0, "endTime": 100,
            "forVotes": 0, "againstVotes": 0, "executed": false, "active": active
        })
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
    async fn no_session_means_no_write() {
        let ledger = Rc::new(NullLedger::new());
        let result = submit_vote::<NullLedger>(None, 0, true).await;
        assert!(matches!(result, Err(GovernanceError::Unauthenticated)));
        assert!(ledger.calls().is_empty());
    }

    #[tokio::test]
    async fn success_refetches_once_after_write() {
        let ledger = Rc::new(NullLedger::new());
        ledger.set_proposals(vec![record(0, true)]);
        let session = session(&ledger);

        let outcome = submit_vote(Some(&session), 0, true).await.unwrap();
        assert!(outcome.receipt.status);
        assert_eq!(outcome.refreshed.unwrap().proposals.len(), 1);

        let calls = ledger.calls();
        assert_eq!(calls[0], LedgerCall::Write {
            from: account('a'),
            call: agora_wallet_core::ContractCall::new(
                &account('1'),
                voting::VOTE,
                vec![json!(0), json!(true)],
            ),
        });
        assert_eq!(ledger.count(voting::GET_PROPOSAL_COUNT), 1);
        assert_eq!(calls[1].method(), voting::GET_PROPOSAL_COUNT);
    }

    #[tokio::test]
    async fn rejected_write_reports_reason_without_refetch() {
        let ledger = Rc::new(NullLedger::new());
        ledger.set_proposals(vec![record(0, true)]);
        ledger.queue_write(Err(LedgerError::Rejected(
            "User denied transaction signature".into(),
        )));
        let session = session(&ledger);

        let err = submit_vote(Some(&session), 0, false).await.unwrap_err();
        match err {
            GovernanceError::WriteRejected { reason } => {
                assert!(reason.contains("User denied transaction signature"))
            }
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(ledger.writes().len(), 1);
        assert_eq!(ledger.count(voting::GET_PROPOSAL_COUNT), 0);
    }

    #[tokio::test]
    async fn refetch_failure_does_not_undo_vote() {
        let ledger = Rc::new(NullLedger::new());
        ledger.fail_any_read(
            voting::GET_PROPOSAL_COUNT,
            LedgerError::Transport("down".into()),
        );
        let session = session(&ledger);
        let outcome = submit_vote(Some(&session), 3, true).await.unwrap();
        assert!(outcome.refreshed.is_err());
    }

    #[tokio::test]
    async fn vote_flags_skip_ended_and_failed_lookups() {
        let ledger = Rc::new(NullLedger::new());
        let session = session(&ledger);
        ledger.on_read(voting::HAS_VOTED, vec![json!(0), json!(account('a'))], json!(true));
        ledger.fail_read(
            voting::HAS_VOTED,
            vec![json!(1), json!(account('a'))],
            LedgerError::Transport("timeout".into()),
        );
        let proposals: Vec<Proposal> = [record(0, true), record(1, true), record(2, false)]
            .into_iter()
            .enumerate()
            .map(|(i, r)| {
                Proposal::from_record(i as u64, serde_json::from_value(r).unwrap()).unwrap()
            })
            .collect();

        let flags = load_vote_flags(&session, &proposals).await;
        assert_eq!(flags, HashMap::from([(0, true)]));
        assert_eq!(ledger.count(voting::HAS_VOTED), 2);
    }
}
