//! Wallet polling: turns differences between the wallet and the session into
//! the notifications a browser wallet would push.

use agora_wallet_core::{LedgerClient, WalletProvider};
use tracing::warn;

use crate::dispatcher::App;
use crate::event::AppEvent;

/// Compare the wallet against `app` and return the event to dispatch, if any.
///
/// A chain change wins over account changes. A disconnected app with
/// accounts available asks to connect; a connected app whose first account
/// differs (or vanished) gets the new account list.
pub async fn poll_wallet<W, L>(app: &App<W, L>) -> Option<AppEvent>
where
    W: WalletProvider,
    L: LedgerClient + ?Sized,
{
    let wallet = app.wallet()?;
    match wallet.chain_id().await {
        Ok(chain_id) if Some(chain_id) != app.chain_id() => {
            return Some(AppEvent::ChainChanged(chain_id));
        }
        Ok(_) => {}
        Err(e) => warn!(error = %e, "failed to poll chain id"),
    }
    let accounts = match wallet.accounts().await {
        Ok(accounts) => accounts,
        Err(e) => {
            warn!(error = %e, "failed to poll accounts");
            return None;
        }
    };
    let current = app.session().map(|s| s.account());
    match (current, accounts.first()) {
        (None, Some(_)) => Some(AppEvent::ConnectRequested),
        (Some(current), first) if first != Some(current) => {
            Some(AppEvent::AccountsChanged(accounts))
        }
        _ => None,
    }
}
