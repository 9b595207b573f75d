//! The view model the dispatcher maintains, and its terminal rendering.

use agora_governance::{AccountSummary, DelegateStatus, ProposalView};
use agora_types::AccountId;
use std::fmt::Write;

use crate::event::Tab;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Banner {
    Success(String),
    Error(String),
}

impl Banner {
    pub fn message(&self) -> &str {
        match self {
            Self::Success(msg) | Self::Error(msg) => msg,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum WalletPanel {
    #[default]
    Disconnected,
    Connected {
        account: AccountId,
        /// `None` until user data loads, or when it failed to load.
        summary: Option<AccountSummary>,
    },
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum ProposalsPanel {
    #[default]
    NotConnected,
    Loading,
    Empty,
    Failed,
    Loaded {
        views: Vec<ProposalView>,
        /// Indices that failed to load and were left out.
        skipped: usize,
    },
}

impl ProposalsPanel {
    pub fn views(&self) -> &[ProposalView] {
        match self {
            Self::Loaded { views, .. } => views.as_slice(),
            _ => &[],
        }
    }

    /// Placeholder text shown instead of a list.
    pub fn placeholder(&self) -> Option<&'static str> {
        match self {
            Self::NotConnected => Some("Connect your wallet to view proposals"),
            Self::Loading => Some("Loading proposals..."),
            Self::Empty => Some("No proposals found"),
            Self::Failed => Some("Failed to load proposals"),
            Self::Loaded { .. } => None,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct View {
    pub tab: Tab,
    pub wallet: WalletPanel,
    pub proposals: ProposalsPanel,
    pub delegate: Option<DelegateStatus>,
    pub banner: Option<Banner>,
}

impl View {
    pub fn account(&self) -> Option<&AccountId> {
        match &self.wallet {
            WalletPanel::Connected { account, .. } => Some(account),
            WalletPanel::Disconnected => None,
        }
    }

    /// Plain-text rendering for a terminal.
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        // Writing to a String cannot fail.
        if let Some(banner) = &self.banner {
            let tag = if banner.is_error() { "error" } else { "ok" };
            let _ = writeln!(out, "[{tag}] {}", sanitize(banner.message()));
        }
        match &self.wallet {
            WalletPanel::Disconnected => out.push_str("Wallet: not connected\n"),
            WalletPanel::Connected { account, summary } => {
                let _ = writeln!(out, "Wallet: {}", account.short());
                if let Some(summary) = summary {
                    let _ = writeln!(out, "Balance: {}", sanitize(&summary.balance_label()));
                    let _ = writeln!(out, "Voting power: {}", summary.voting_power_label());
                }
            }
        }
        if let Some(delegate) = &self.delegate {
            let _ = writeln!(out, "Delegate: {}", delegate.label());
        }
        out.push('\n');
        match self.proposals.placeholder() {
            Some(text) => {
                out.push_str(text);
                out.push('\n');
            }
            None => {
                for view in self.proposals.views() {
                    render_proposal_text(&mut out, view);
                }
                if let ProposalsPanel::Loaded { skipped, .. } = &self.proposals {
                    if *skipped > 0 {
                        let _ = writeln!(out, "({skipped} proposal(s) could not be loaded)");
                    }
                }
            }
        }
        out
    }
}

fn render_proposal_text(out: &mut String, view: &ProposalView) {
    let _ = writeln!(
        out,
        "#{} {} [{}]",
        view.id,
        sanitize(&view.title),
        view.status.label()
    );
    let _ = writeln!(out, "  Proposed by: {}", view.proposer);
    let _ = writeln!(out, "  {}", sanitize(&view.description).replace('\n', "\n  "));
    let _ = writeln!(
        out,
        "  For: {} ({})  Against: {} ({})  {}",
        view.for_votes,
        view.percentage_label(),
        view.against_votes,
        view.against_label(),
        view.time_remaining
    );
    if view.has_voted == Some(true) {
        out.push_str("  You have voted\n");
    }
}

/// Drop control characters so ledger text cannot drive the terminal.
/// Newlines survive.
fn sanitize(text: &str) -> String {
    text.chars()
        .filter(|c| *c == '\n' || !c.is_control())
        .collect()
}
