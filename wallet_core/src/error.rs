use agora_types::TypesError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("provider error {code}: {message}")]
    Rpc { code: i64, message: String },

    #[error("provider error: {0}")]
    Provider(String),

    #[error("request rejected by user: {0}")]
    Rejected(String),

    #[error("account not authorized: {0}")]
    Unauthorized(String),

    #[error("transaction reverted: {0}")]
    Reverted(String),

    #[error("invalid response for {method}: {reason}")]
    Decode { method: String, reason: String },

    #[error(transparent)]
    Types(#[from] TypesError),
}

impl LedgerError {
    /// Map an EIP-1193 style provider error onto the taxonomy.
    ///
    /// 4001 is a user rejection, 4100 an unauthorized account; any message
    /// mentioning a revert is a contract revert regardless of code.
    pub fn from_provider(code: Option<i64>, message: impl Into<String>) -> Self {
        let message = message.into();
        if message.to_ascii_lowercase().contains("revert") {
            return Self::Reverted(message);
        }
        match code {
            Some(4001) => Self::Rejected(message),
            Some(4100) => Self::Unauthorized(message),
            Some(code) => Self::Rpc { code, message },
            None => Self::Provider(message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_codes_are_classified() {
        assert!(matches!(
            LedgerError::from_provider(Some(4001), "User denied transaction signature"),
            LedgerError::Rejected(_)
        ));
        assert!(matches!(
            LedgerError::from_provider(Some(4100), "not authorized"),
            LedgerError::Unauthorized(_)
        ));
        assert!(matches!(
            LedgerError::from_provider(Some(-32000), "execution reverted: already voted"),
            LedgerError::Reverted(_)
        ));
        assert_eq!(
            LedgerError::from_provider(Some(-32603), "internal"),
            LedgerError::Rpc {
                code: -32603,
                message: "internal".into()
            }
        );
        assert_eq!(
            LedgerError::from_provider(None, "boom"),
            LedgerError::Provider("boom".into())
        );
    }
}
