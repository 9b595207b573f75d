//! Client configuration with TOML file support.

use agora_governance::ContractAddresses;
use agora_types::AccountId;
use agora_utils::LogFormat;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::AppError;

/// Configuration for the Agora client.
///
/// Loaded from a TOML file via [`AppConfig::from_toml_file`], then
/// overridden by CLI flags and `AGORA_*` environment variables.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Wallet gateway endpoint. Absent means no wallet provider.
    #[serde(default)]
    pub gateway_url: Option<String>,

    /// Governance voting contract.
    #[serde(default = "AccountId::zero")]
    pub voting_contract: AccountId,

    /// Voting token contract.
    #[serde(default = "AccountId::zero")]
    pub token_contract: AccountId,

    /// Per-request timeout for gateway calls.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// How often `watch` polls the wallet for account and chain changes.
    #[serde(default = "default_poll_interval_secs")]
    pub poll_interval_secs: u64,

    /// Log level filter: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default = "default_log_format")]
    pub log_format: LogFormat,
}

// ── Serde default helpers ──────────────────────────────────────────────

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_poll_interval_secs() -> u64 {
    4
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> LogFormat {
    LogFormat::Human
}

// ── Impl ───────────────────────────────────────────────────────────────

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, AppError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| AppError::Config(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, AppError> {
        toml::from_str(s).map_err(|e| AppError::Config(e.to_string()))
    }

    /// Serialize the configuration to a TOML string.
    pub fn to_toml_string(&self) -> Result<String, AppError> {
        toml::to_string_pretty(self).map_err(|e| AppError::Config(e.to_string()))
    }

    /// Both contract addresses, or an error naming the one left unset.
    pub fn contract_addresses(&self) -> Result<ContractAddresses, AppError> {
        if self.voting_contract.is_zero() {
            return Err(AppError::Config("voting_contract is not configured".into()));
        }
        if self.token_contract.is_zero() {
            return Err(AppError::Config("token_contract is not configured".into()));
        }
        Ok(ContractAddresses {
            voting: self.voting_contract.clone(),
            token: self.token_contract.clone(),
        })
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Never shorter than one second.
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs.max(1))
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            gateway_url: None,
            voting_contract: AccountId::zero(),
            token_contract: AccountId::zero(),
            request_timeout_secs: default_request_timeout_secs(),
            poll_interval_secs: default_poll_interval_secs(),
            log_level: default_log_level(),
            log_format: default_log_format(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const VOTING: &str = "0x5FbDB2315678afecb367f032d93F642f64180aa3";
    const TOKEN: &str = "0xe7f1725E7734CE288F8367e1Bb143E90bb3F0512";

    #[test]
    fn default_config_round_trips_through_toml() {
        let config = AppConfig {
            gateway_url: Some("http://127.0.0.1:8545".into()),
            ..AppConfig::default()
        };
        let toml_str = config.to_toml_string().expect("should serialize");
        let parsed = AppConfig::from_toml_str(&toml_str).expect("should parse");
        assert_eq!(parsed, config);
    }

    #[test]
    fn minimal_toml_uses_defaults() {
        let config = AppConfig::from_toml_str("").expect("empty toml should use defaults");
        assert_eq!(config.gateway_url, None);
        assert_eq!(config.request_timeout_secs, 30);
        assert_eq!(config.poll_interval_secs, 4);
        assert_eq!(config.log_level, "info");
        assert_eq!(config.log_format, LogFormat::Human);
    }

    #[test]
    fn partial_toml_overrides() {
        let toml = format!(
            r#"
            gateway_url = "http://localhost:8545"
            voting_contract = "{VOTING}"
            token_contract = "{TOKEN}"
            log_format = "json"
        "#
        );
        let config = AppConfig::from_toml_str(&toml).expect("should parse");
        assert_eq!(config.gateway_url.as_deref(), Some("http://localhost:8545"));
        assert_eq!(config.log_format, LogFormat::Json);
        assert_eq!(config.poll_interval_secs, 4); // default

        let contracts = config.contract_addresses().expect("both set");
        assert_eq!(contracts.voting, AccountId::parse(VOTING).unwrap());
        assert_eq!(contracts.token, AccountId::parse(TOKEN).unwrap());
    }

    #[test]
    fn unset_contracts_are_config_errors() {
        let config = AppConfig::default();
        let err = config.contract_addresses().unwrap_err();
        assert!(err.to_string().contains("voting_contract"));
    }

    #[test]
    fn malformed_address_is_rejected() {
        let result = AppConfig::from_toml_str(r#"voting_contract = "0x1234""#);
        assert!(matches!(result, Err(AppError::Config(_))));
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "poll_interval_secs = 0").unwrap();
        let config = AppConfig::from_toml_file(file.path()).expect("should load");
        assert_eq!(config.poll_interval_secs, 0);
        assert_eq!(config.poll_interval(), Duration::from_secs(1));
    }

    #[test]
    fn missing_file_returns_config_error() {
        let result = AppConfig::from_toml_file("/nonexistent/agora.toml");
        assert!(matches!(result, Err(AppError::Config(_))));
    }
}
