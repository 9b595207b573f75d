use agora_wallet_core::LedgerError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GovernanceError {
    #[error("no wallet provider available")]
    ProviderUnavailable,

    #[error("account authorization denied: {0}")]
    AuthorizationDenied(LedgerError),

    #[error("no accounts found")]
    EmptyAccounts,

    #[error("no connected account")]
    Unauthenticated,

    #[error("ledger read failed: {0}")]
    Read(LedgerError),

    #[error("transaction failed: {reason}")]
    WriteRejected { reason: String },

    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl GovernanceError {
    pub(crate) fn write(err: LedgerError) -> Self {
        Self::WriteRejected {
            reason: err.to_string(),
        }
    }
}
