//! Contract call and transaction receipt shapes.

use agora_types::AccountId;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A single contract method invocation.
///
/// `method` is the human-readable signature, e.g. `vote(uint256,bool)`, so a
/// gateway can encode the call without a separate ABI.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ContractCall {
    pub contract: AccountId,
    pub method: &'static str,
    pub args: Vec<Value>,
}

impl ContractCall {
    pub fn new(contract: &AccountId, method: &'static str, args: Vec<Value>) -> Self {
        Self {
            contract: contract.clone(),
            method,
            args,
        }
    }
}

/// Outcome of a mined transaction.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxReceipt {
    pub tx_hash: String,
    #[serde(default)]
    pub block_number: Option<u64>,
    /// `false` when the transaction was mined but reverted.
    #[serde(default = "default_status")]
    pub status: bool,
}

fn default_status() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn receipt_status_defaults_to_success() {
        let receipt: TxReceipt = serde_json::from_str(r#"{"tx_hash":"0xabc"}"#).unwrap();
        assert!(receipt.status);
        assert_eq!(receipt.block_number, None);
    }
}
