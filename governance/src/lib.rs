//! Governance client core.
//!
//! Pipeline: fetch proposals from the voting contract → render them into
//! display models → vote, then re-fetch. Around it sit the session (which
//! account is acting), account data, delegation and proposal creation.
//!
//! Key principle: the client holds a read-only snapshot. Tallies and flags
//! are only ever changed by the ledger.

pub mod account;
pub mod compose;
pub mod delegation;
pub mod display;
pub mod error;
pub mod fetcher;
pub mod proposal;
pub mod session;
pub mod vote;

pub use account::{load_account_summary, AccountSummary};
pub use compose::{create_proposal, ProposalDraft};
pub use delegation::{load_delegate_status, update_delegation, DelegateStatus};
pub use display::{
    apply_vote_flags, escape_html, for_percentage, render_proposals, render_proposals_html,
    ProposalStatus, ProposalView,
};
pub use error::GovernanceError;
pub use fetcher::{fetch_proposals, proposal_stream, FetchFailure, FetchReport};
pub use proposal::Proposal;
pub use session::{ContractAddresses, Session, SessionState, Transition};
pub use vote::{load_vote_flags, submit_vote, VoteOutcome};
