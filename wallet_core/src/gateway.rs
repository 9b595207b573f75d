//! HTTP client for a wallet/contract gateway.
//!
//! Every operation is one JSON POST of the form `{"action": ..., ...params}`.
//! The gateway answers `{"result": ...}` on success, or `{"error": "..."}` /
//! `{"error": {"code": n, "message": "..."}}` on failure.

use agora_types::{AccountId, Uint};
use async_trait::async_trait;
use serde_json::{json, Value};
use std::time::Duration;
use tracing::debug;

use crate::call::{ContractCall, TxReceipt};
use crate::error::LedgerError;
use crate::provider::{LedgerClient, WalletProvider};

/// Gateway client wrapping `reqwest::Client` with the gateway URL.
#[derive(Clone)]
pub struct GatewayClient {
    http: reqwest::Client,
    url: String,
}

impl GatewayClient {
    /// Create a client targeting `url` (e.g. `http://127.0.0.1:8545/agora`).
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, LedgerError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .connect_timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| LedgerError::Transport(format!("failed to create HTTP client: {e}")))?;
        Ok(Self {
            http,
            url: url.into(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Send one gateway request and return its `result` field.
    async fn request(&self, action: &str, params: Value) -> Result<Value, LedgerError> {
        let mut body = params;
        body.as_object_mut()
            .ok_or_else(|| LedgerError::Transport("params must be a JSON object".into()))?
            .insert("action".to_string(), json!(action));

        debug!(action, "gateway request");
        let response = self
            .http
            .post(&self.url)
            .json(&body)
            .send()
            .await
            .map_err(|e| LedgerError::Transport(format!("request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(LedgerError::Transport(format!(
                "gateway returned HTTP {}",
                response.status()
            )));
        }

        let json: Value = response
            .json()
            .await
            .map_err(|e| LedgerError::Transport(format!("invalid JSON response: {e}")))?;

        parse_response(json)
    }
}

/// Extract the result of a gateway response, classifying errors.
pub fn parse_response(json: Value) -> Result<Value, LedgerError> {
    match json.get("error") {
        None | Some(Value::Null) => {}
        Some(Value::String(message)) => {
            return Err(LedgerError::from_provider(None, message.clone()));
        }
        Some(err) => {
            let code = err.get("code").and_then(Value::as_i64);
            let message = err
                .get("message")
                .and_then(Value::as_str)
                .map(str::to_string)
                .unwrap_or_else(|| err.to_string());
            return Err(LedgerError::from_provider(code, message));
        }
    }
    match json {
        Value::Object(mut map) => map.remove("result").ok_or_else(|| LedgerError::Decode {
            method: "gateway".into(),
            reason: "response has neither result nor error".into(),
        }),
        other => Err(LedgerError::Decode {
            method: "gateway".into(),
            reason: format!("expected JSON object, got {other}"),
        }),
    }
}

fn decode_accounts(method: &str, value: Value) -> Result<Vec<AccountId>, LedgerError> {
    serde_json::from_value(value).map_err(|e| LedgerError::Decode {
        method: method.into(),
        reason: e.to_string(),
    })
}

#[async_trait(?Send)]
impl WalletProvider for GatewayClient {
    async fn accounts(&self) -> Result<Vec<AccountId>, LedgerError> {
        let result = self.request("accounts", json!({})).await?;
        decode_accounts("accounts", result)
    }

    async fn request_accounts(&self) -> Result<Vec<AccountId>, LedgerError> {
        let result = self.request("request_accounts", json!({})).await?;
        decode_accounts("request_accounts", result)
    }

    async fn chain_id(&self) -> Result<u64, LedgerError> {
        let result = self.request("chain_id", json!({})).await?;
        let id: Uint = serde_json::from_value(result).map_err(|e| LedgerError::Decode {
            method: "chain_id".into(),
            reason: e.to_string(),
        })?;
        Ok(id.to_u64()?)
    }
}

#[async_trait(?Send)]
impl LedgerClient for GatewayClient {
    async fn read(&self, call: &ContractCall) -> Result<Value, LedgerError> {
        self.request(
            "call",
            json!({
                "contract": call.contract,
                "method": call.method,
                "args": call.args,
            }),
        )
        .await
    }

    async fn write(&self, from: &AccountId, call: &ContractCall) -> Result<TxReceipt, LedgerError> {
        let result = self
            .request(
                "send",
                json!({
                    "from": from,
                    "contract": call.contract,
                    "method": call.method,
                    "args": call.args,
                }),
            )
            .await?;
        serde_json::from_value(result).map_err(|e| LedgerError::Decode {
            method: call.method.into(),
            reason: e.to_string(),
        })
    }
}
