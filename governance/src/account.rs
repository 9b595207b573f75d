//! Connected-account summary: token balance and voting power.

use agora_types::TokenAmount;
use agora_wallet_core::LedgerClient;
use serde::Serialize;
use tracing::{debug, warn};

use crate::error::GovernanceError;
use crate::session::Session;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct AccountSummary {
    pub balance: TokenAmount,
    pub symbol: String,
    /// `None` when the voting-power read failed.
    pub voting_power: Option<TokenAmount>,
}

impl AccountSummary {
    /// `12.34 GOV`
    pub fn balance_label(&self) -> String {
        format!("{} {}", self.balance.format_fixed(2), self.symbol)
    }

    pub fn voting_power_label(&self) -> String {
        match &self.voting_power {
            Some(power) => power.format_fixed(2),
            None => "Unable to load".to_string(),
        }
    }
}

/// Load balance, decimals and symbol from the token, plus voting power.
///
/// A failed token read fails the whole summary. Voting power is optional.
pub async fn load_account_summary<L>(session: &Session<L>) -> Result<AccountSummary, GovernanceError>
where
    L: LedgerClient + ?Sized,
{
    let account = session.account();
    let token = session.token();
    let raw = token
        .balance_of(account)
        .await
        .map_err(GovernanceError::Read)?;
    let decimals = token.decimals().await.map_err(GovernanceError::Read)?;
    let symbol = token.symbol().await.map_err(GovernanceError::Read)?;

    let voting_power = match session.voting().voting_power(account).await {
        Ok(power) => Some(TokenAmount::new(power, decimals)),
        Err(e) => {
            warn!(%account, error = %e, "failed to load voting power");
            None
        }
    };
    debug!(%account, balance = raw, %symbol, "account summary loaded");

    Ok(AccountSummary {
        balance: TokenAmount::new(raw, decimals),
        symbol,
        voting_power,
    })
}
