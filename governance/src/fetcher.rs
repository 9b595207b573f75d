//! Proposal fetcher.
//!
//! Reads the proposal count, then each proposal by index, strictly in order.
//! A failing index is logged and skipped; only a failing count read fails the
//! whole fetch.

use agora_wallet_core::{LedgerClient, LedgerError, VotingContract};
use futures_util::stream::{self, Stream, StreamExt};
use tracing::{debug, warn};

use crate::error::GovernanceError;
use crate::proposal::Proposal;

/// A proposal index that could not be loaded.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FetchFailure {
    pub index: u64,
    pub error: LedgerError,
}

/// Best-effort result of a fetch: the proposals that loaded, in ascending
/// index order, plus the indices that did not.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FetchReport {
    pub proposals: Vec<Proposal>,
    pub failures: Vec<FetchFailure>,
}

impl FetchReport {
    /// Some indices failed while the fetch as a whole succeeded.
    pub fn is_partial(&self) -> bool {
        !self.failures.is_empty()
    }
}

/// Lazily read proposals `0..count`, one item per index, in order.
///
/// Each poll issues at most one ledger read. The stream can be recreated to
/// restart from index 0.
pub fn proposal_stream<L>(
    contract: &VotingContract<L>,
    count: u64,
) -> impl Stream<Item = Result<Proposal, FetchFailure>> + '_
where
    L: LedgerClient + ?Sized,
{
    stream::unfold(0u64, move |index| async move {
        if index >= count {
            return None;
        }
        let item = contract
            .proposal(index)
            .await
            .and_then(|record| Proposal::from_record(index, record))
            .map_err(|error| FetchFailure { index, error });
        Some((item, index + 1))
    })
}

/// Fetch every proposal the contract knows about.
pub async fn fetch_proposals<L>(contract: &VotingContract<L>) -> Result<FetchReport, GovernanceError>
where
    L: LedgerClient + ?Sized,
{
    let count = contract
        .proposal_count()
        .await
        .map_err(GovernanceError::Read)?;
    debug!(count, "fetching proposals");

    let mut report = FetchReport::default();
    let items = proposal_stream(contract, count);
    futures_util::pin_mut!(items);
    while let Some(item) = items.next().await {
        match item {
            Ok(proposal) => report.proposals.push(proposal),
            Err(failure) => {
                warn!(index = failure.index, error = %failure.error, "failed to load proposal, skipping");
                report.failures.push(failure);
            }
        }
    }
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use agora_nullables::NullLedger;
    use agora_types::AccountId;
    use agora_wallet_core::contracts::voting;
    use serde_json::{json, Value};
    use std::rc::Rc;

    fn record(id: u64, title: &str) -> Value {
        json!({
            "id": id,
            "title": title,
            "description": "",
            "proposer": "0xaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa",
            "startTime": 0,
            "endTime": 100,
            "forVotes": "0",
            "againstVotes": "0",
            "executed": false,
            "active": true
        })
    }

    fn contract(ledger: &Rc<NullLedger>) -> VotingContract<NullLedger> {
        VotingContract::new(
            Rc::clone(ledger),
            AccountId::parse("0x1111111111111111111111111111111111111111").unwrap(),
        )
    }

    #[tokio::test]
    async fn zero_count_reads_nothing_else() {
        let ledger = Rc::new(NullLedger::new());
        ledger.set_proposals(vec![]);
        let report = fetch_proposals(&contract(&ledger)).await.unwrap();
        assert!(report.proposals.is_empty());
        assert!(!report.is_partial());
        assert_eq!(ledger.count(voting::GET_PROPOSAL), 0);
    }

    #[tokio::test]
    async fn failing_index_is_skipped() {
        let ledger = Rc::new(NullLedger::new());
        ledger.set_proposals(vec![record(0, "a"), record(1, "b"), record(2, "c")]);
        ledger.fail_read(
            voting::GET_PROPOSAL,
            vec![json!(1)],
            LedgerError::Transport("timeout".into()),
        );

        let report = fetch_proposals(&contract(&ledger)).await.unwrap();
        let ids: Vec<u64> = report.proposals.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![0, 2]);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].index, 1);
        assert!(report.is_partial());
    }

    #[tokio::test]
    async fn undecodable_record_is_skipped() {
        let ledger = Rc::new(NullLedger::new());
        ledger.set_proposals(vec![json!({"title": 5}), record(1, "ok")]);
        let report = fetch_proposals(&contract(&ledger)).await.unwrap();
        assert_eq!(report.proposals.len(), 1);
        assert_eq!(report.failures[0].index, 0);
    }

    #[tokio::test]
    async fn large_numeric_tallies_are_kept() {
        let ledger = Rc::new(NullLedger::new());
        let record: Value = serde_json::from_str(
            r#"{
                "id": 0, "title": "big", "description": "",
                "proposer": "0xaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa",
                "startTime": 0, "endTime": 100,
                "forVotes": 70000000000000000000,
                "againstVotes": 30000000000000000000,
                "executed": false, "active": true
            }"#,
        )
        .unwrap();
        ledger.set_proposals(vec![record]);

        let report = fetch_proposals(&contract(&ledger)).await.unwrap();
        assert!(!report.is_partial());
        assert_eq!(report.proposals[0].for_votes, 70_000_000_000_000_000_000);
        assert_eq!(report.proposals[0].against_votes, 30_000_000_000_000_000_000);
    }

    #[tokio::test]
    async fn count_failure_is_overall_failure() {
        let ledger = Rc::new(NullLedger::new());
        ledger.fail_any_read(
            voting::GET_PROPOSAL_COUNT,
            LedgerError::Transport("down".into()),
        );
        assert!(matches!(
            fetch_proposals(&contract(&ledger)).await,
            Err(GovernanceError::Read(_))
        ));
    }

    #[tokio::test]
    async fn reads_are_issued_in_index_order() {
        let ledger = Rc::new(NullLedger::new());
        ledger.set_proposals(vec![record(0, "a"), record(1, "b"), record(2, "c")]);
        fetch_proposals(&contract(&ledger)).await.unwrap();

        let indices: Vec<Value> = ledger
            .calls()
            .into_iter()
            .filter(|c| c.method() == voting::GET_PROPOSAL)
            .map(|c| match c {
                agora_nullables::LedgerCall::Read(call) => call.args[0].clone(),
                other => panic!("unexpected {other:?}"),
            })
            .collect();
        assert_eq!(indices, vec![json!(0), json!(1), json!(2)]);
    }

    #[tokio::test]
    async fn stream_is_lazy() {
        let ledger = Rc::new(NullLedger::new());
        ledger.set_proposals(vec![record(0, "a"), record(1, "b")]);
        let contract = contract(&ledger);
        let items = proposal_stream(&contract, 2);
        futures_util::pin_mut!(items);

        assert_eq!(ledger.count(voting::GET_PROPOSAL), 0);
        let first = items.next().await.unwrap().unwrap();
        assert_eq!(first.title, "a");
        assert_eq!(ledger.count(voting::GET_PROPOSAL), 1);
    }
}
