//! Governance proposals as the client sees them.

use agora_types::{AccountId, Timestamp};
use agora_wallet_core::{LedgerError, ProposalRecord};
use serde::Serialize;

/// A read-only snapshot of one proposal.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Proposal {
    /// Ledger-assigned id.
    pub id: u64,
    pub title: String,
    pub description: String,
    pub proposer: AccountId,
    pub start_time: Timestamp,
    pub end_time: Timestamp,
    /// Weighted votes in token base units.
    pub for_votes: u128,
    pub against_votes: u128,
    pub executed: bool,
    pub active: bool,
}

impl Proposal {
    /// Convert a contract record fetched at `index`.
    ///
    /// Records that omit their id take the index they were fetched from.
    pub fn from_record(index: u64, record: ProposalRecord) -> Result<Self, LedgerError> {
        let id = match record.id {
            Some(id) => id.to_u64()?,
            None => index,
        };
        Ok(Self {
            id,
            title: record.title,
            description: record.description,
            proposer: record.proposer,
            start_time: Timestamp::new(record.start_time.to_u64()?),
            end_time: Timestamp::new(record.end_time.to_u64()?),
            for_votes: record.for_votes.0,
            against_votes: record.against_votes.0,
            executed: record.executed,
            active: record.active,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use agora_types::Uint;

    fn record(id: Option<u128>, end: u128) -> ProposalRecord {
        ProposalRecord {
            id: id.map(Uint),
            title: "t".into(),
            description: "d".into(),
            proposer: AccountId::zero(),
            start_time: Uint(10),
            end_time: Uint(end),
            for_votes: Uint(1),
            against_votes: Uint(2),
            executed: false,
            active: true,
        }
    }

    #[test]
    fn id_defaults_to_index() {
        assert_eq!(Proposal::from_record(7, record(None, 20)).unwrap().id, 7);
        assert_eq!(Proposal::from_record(7, record(Some(3), 20)).unwrap().id, 3);
    }

    #[test]
    fn oversized_timestamp_is_rejected() {
        assert!(Proposal::from_record(0, record(None, u128::MAX)).is_err());
    }
}
