//! New proposal submission.

use agora_wallet_core::{LedgerClient, TxReceipt};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::GovernanceError;
use crate::session::Session;

/// Form input for a new proposal.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProposalDraft {
    pub title: String,
    pub description: String,
    pub voting_duration_secs: u64,
}

impl ProposalDraft {
    /// Reject blank text and a zero voting period.
    pub fn validate(&self) -> Result<(), GovernanceError> {
        if self.title.trim().is_empty() {
            return Err(GovernanceError::InvalidInput("title is empty".into()));
        }
        if self.description.trim().is_empty() {
            return Err(GovernanceError::InvalidInput("description is empty".into()));
        }
        if self.voting_duration_secs == 0 {
            return Err(GovernanceError::InvalidInput(
                "voting duration must be positive".into(),
            ));
        }
        Ok(())
    }
}

pub async fn create_proposal<L>(
    session: Option<&Session<L>>,
    draft: &ProposalDraft,
) -> Result<TxReceipt, GovernanceError>
where
    L: LedgerClient + ?Sized,
{
    let session = session.ok_or(GovernanceError::Unauthenticated)?;
    draft.validate()?;
    let receipt = session
        .voting()
        .create_proposal(
            session.account(),
            draft.title.trim(),
            draft.description.trim(),
            draft.voting_duration_secs,
        )
        .await
        .map_err(|e| {
            warn!(title = %draft.title, error = %e, "proposal creation failed");
            GovernanceError::write(e)
        })?;
    info!(title = %draft.title, tx = %receipt.tx_hash, "proposal created");
    Ok(receipt)
}
