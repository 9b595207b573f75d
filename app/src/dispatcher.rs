//! Event dispatcher.
//!
//! Owns the session state and the view model. Each event is handled to
//! completion before the next one is accepted (`&mut self`), so there is
//! never more than one in-flight operation touching the session.

use agora_governance::{
    apply_vote_flags, create_proposal, fetch_proposals, load_account_summary,
    load_delegate_status, load_vote_flags, render_proposals, submit_vote, update_delegation,
    ContractAddresses, FetchReport, GovernanceError, ProposalDraft, Session, SessionState,
    Transition,
};
use agora_types::{AccountId, Clock};
use agora_wallet_core::{LedgerClient, WalletProvider};
use std::rc::Rc;
use tracing::{debug, info, warn};

use crate::event::{AppEvent, Form, Tab};
use crate::view::{Banner, ProposalsPanel, View, WalletPanel};

pub struct App<W, L: ?Sized> {
    wallet: Option<W>,
    ledger: Rc<L>,
    contracts: ContractAddresses,
    clock: Box<dyn Clock>,
    state: SessionState<L>,
    view: View,
    chain_id: Option<u64>,
}

impl<W, L> App<W, L>
where
    W: WalletProvider,
    L: LedgerClient + ?Sized,
{
    /// `wallet` is `None` when no provider is available at all.
    pub fn new(
        wallet: Option<W>,
        ledger: Rc<L>,
        contracts: ContractAddresses,
        clock: Box<dyn Clock>,
    ) -> Self {
        Self {
            wallet,
            ledger,
            contracts,
            clock,
            state: SessionState::Disconnected,
            view: View::default(),
            chain_id: None,
        }
    }

    pub fn view(&self) -> &View {
        &self.view
    }

    pub fn session(&self) -> Option<&Session<L>> {
        self.state.session()
    }

    pub fn wallet(&self) -> Option<&W> {
        self.wallet.as_ref()
    }

    /// Chain the wallet reported at initialization.
    pub fn chain_id(&self) -> Option<u64> {
        self.chain_id
    }

    /// Startup: connect without prompting if the wallet already exposes an
    /// account.
    pub async fn initialize(&mut self) {
        let Some(wallet) = self.wallet.as_ref() else {
            warn!("no wallet provider configured");
            self.fail(
                GovernanceError::ProviderUnavailable.to_string(),
                "Please install a Web3 wallet",
            );
            return;
        };
        let chain = wallet.chain_id().await;
        let accounts = wallet.accounts().await;

        match chain {
            Ok(id) => {
                info!(chain_id = id, "wallet provider found");
                self.chain_id = Some(id);
            }
            Err(e) => warn!(error = %e, "failed to read chain id"),
        }
        match accounts {
            Ok(accounts) => match accounts.into_iter().next() {
                Some(account) => self.establish(account).await,
                None => debug!("no authorized accounts, waiting for connect"),
            },
            Err(e) => self.fail(e.to_string(), "Failed to initialize application"),
        }
    }

    pub async fn dispatch(&mut self, event: AppEvent) {
        debug!(?event, "dispatch");
        match event {
            AppEvent::ConnectRequested => self.connect().await,
            AppEvent::AccountsChanged(accounts) => self.accounts_changed(&accounts).await,
            AppEvent::ChainChanged(chain_id) => {
                info!(chain_id, previous = ?self.chain_id, "chain changed, reinitializing");
                self.state.disconnect();
                self.view = View::default();
                self.chain_id = None;
                self.initialize().await;
            }
            AppEvent::TabSelected(tab) => {
                self.view.tab = tab;
                match tab {
                    Tab::Proposals => self.load_proposals().await,
                    Tab::Delegate => self.load_delegation().await,
                    Tab::Create => {}
                }
            }
            AppEvent::FormSubmitted(Form::CreateProposal(draft)) => self.create(&draft).await,
            AppEvent::FormSubmitted(Form::Delegate { delegatee }) => self.delegate(&delegatee).await,
            AppEvent::VoteChosen {
                proposal_id,
                support,
            } => self.vote(proposal_id, support).await,
            AppEvent::RefreshRequested => self.load_proposals().await,
        }
    }

    async fn connect(&mut self) {
        let requested = match self.wallet.as_ref() {
            Some(wallet) => wallet
                .request_accounts()
                .await
                .map_err(GovernanceError::AuthorizationDenied),
            None => Err(GovernanceError::ProviderUnavailable),
        };
        match requested {
            Ok(accounts) => match accounts.into_iter().next() {
                Some(account) => self.establish(account).await,
                None => self.fail(GovernanceError::EmptyAccounts.to_string(), "No accounts found"),
            },
            Err(e @ GovernanceError::ProviderUnavailable) => {
                self.fail(e.to_string(), "Please install a Web3 wallet")
            }
            Err(e) => self.fail(e.to_string(), "Failed to connect wallet"),
        }
    }

    async fn establish(&mut self, account: AccountId) {
        let session = Session::new(account.clone(), Rc::clone(&self.ledger), &self.contracts);
        self.state.connect(session);
        self.view.wallet = WalletPanel::Connected {
            account,
            summary: None,
        };
        self.reload().await;
        self.succeed("Wallet connected successfully!");
    }

    async fn accounts_changed(&mut self, accounts: &[AccountId]) {
        match self.state.on_accounts_changed(accounts) {
            Transition::Unchanged => {}
            Transition::Switched { to, .. } => {
                self.view.wallet = WalletPanel::Connected {
                    account: to,
                    summary: None,
                };
                self.view.delegate = None;
                self.reload().await;
            }
            Transition::Disconnected => {
                self.view.wallet = WalletPanel::Disconnected;
                self.view.proposals = ProposalsPanel::NotConnected;
                self.view.delegate = None;
            }
        }
    }

    /// User data, then proposals.
    async fn reload(&mut self) {
        self.load_user_data().await;
        self.load_proposals().await;
    }

    async fn load_user_data(&mut self) {
        let Some(session) = self.state.session() else {
            return;
        };
        let summary = load_account_summary(session).await;
        let delegate = load_delegate_status(session).await;

        match summary {
            Ok(loaded) => {
                if let WalletPanel::Connected { summary, .. } = &mut self.view.wallet {
                    *summary = Some(loaded);
                }
            }
            Err(e) => self.fail(e.to_string(), "Failed to load user data"),
        }
        self.view.delegate = Some(delegate);
    }

    async fn load_delegation(&mut self) {
        if let Some(session) = self.state.session() {
            self.view.delegate = Some(load_delegate_status(session).await);
        }
    }

    async fn load_proposals(&mut self) {
        let Some(session) = self.state.session() else {
            self.view.proposals = ProposalsPanel::NotConnected;
            return;
        };
        self.view.proposals = ProposalsPanel::Loading;
        let fetched = fetch_proposals(session.voting()).await;
        self.show_proposals(fetched).await;
    }

    async fn show_proposals(&mut self, fetched: Result<FetchReport, GovernanceError>) {
        let report = match fetched {
            Ok(report) => report,
            Err(e) => {
                self.view.proposals = ProposalsPanel::Failed;
                self.fail(e.to_string(), "Failed to load proposals");
                return;
            }
        };
        let Some(session) = self.state.session() else {
            self.view.proposals = ProposalsPanel::NotConnected;
            return;
        };
        let flags = load_vote_flags(session, &report.proposals).await;
        let mut views = render_proposals(&report.proposals, self.clock.now());
        apply_vote_flags(&mut views, &flags);

        self.view.proposals = if views.is_empty() && !report.is_partial() {
            ProposalsPanel::Empty
        } else {
            ProposalsPanel::Loaded {
                views,
                skipped: report.failures.len(),
            }
        };
    }

    async fn vote(&mut self, proposal_id: u64, support: bool) {
        match submit_vote(self.state.session(), proposal_id, support).await {
            Ok(outcome) => {
                self.show_proposals(outcome.refreshed).await;
                self.succeed("Vote cast successfully!");
            }
            Err(e) => self.fail_action("Failed to cast vote", e),
        }
    }

    async fn create(&mut self, draft: &ProposalDraft) {
        match create_proposal(self.state.session(), draft).await {
            Ok(_) => {
                self.view.tab = Tab::Proposals;
                self.load_proposals().await;
                self.succeed("Proposal created successfully!");
            }
            Err(e) => self.fail_action("Failed to create proposal", e),
        }
    }

    async fn delegate(&mut self, delegatee: &str) {
        match update_delegation(self.state.session(), delegatee).await {
            Ok(_) => {
                self.load_user_data().await;
                self.succeed("Delegation updated successfully!");
            }
            Err(e) => self.fail_action("Failed to update delegation", e),
        }
    }

    fn succeed(&mut self, message: &str) {
        self.view.banner = Some(Banner::Success(message.to_string()));
    }

    fn fail(&mut self, cause: String, message: &str) {
        warn!(%cause, "{message}");
        self.view.banner = Some(Banner::Error(message.to_string()));
    }

    fn fail_action(&mut self, action: &str, err: GovernanceError) {
        let message = match &err {
            GovernanceError::Unauthenticated => "Please connect your wallet first".to_string(),
            GovernanceError::InvalidInput(reason) | GovernanceError::WriteRejected { reason } => {
                format!("{action}: {reason}")
            }
            other => format!("{action}: {other}"),
        };
        self.fail(err.to_string(), &message);
    }
}
