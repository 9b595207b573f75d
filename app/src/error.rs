use agora_governance::GovernanceError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("governance error: {0}")]
    Governance(#[from] GovernanceError),

    #[error("config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
