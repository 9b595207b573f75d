//! Events the dispatcher consumes.
//!
//! User intents and wallet notifications share one enum so that they are
//! handled strictly one at a time by [`App::dispatch`](crate::App::dispatch).

use agora_governance::ProposalDraft;
use agora_types::AccountId;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tab {
    #[default]
    Proposals,
    Create,
    Delegate,
}

impl Tab {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Proposals => "proposals",
            Self::Create => "create",
            Self::Delegate => "delegate",
        }
    }
}

impl fmt::Display for Tab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Tab {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "proposals" => Ok(Self::Proposals),
            "create" => Ok(Self::Create),
            "delegate" => Ok(Self::Delegate),
            other => Err(format!("unknown tab {other:?}")),
        }
    }
}

/// A submitted form.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Form {
    CreateProposal(ProposalDraft),
    /// The delegatee exactly as typed; validated on submission.
    Delegate { delegatee: String },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AppEvent {
    /// The user asked to connect (may prompt the wallet).
    ConnectRequested,
    /// The wallet reported a new account list.
    AccountsChanged(Vec<AccountId>),
    /// The wallet switched networks.
    ChainChanged(u64),
    TabSelected(Tab),
    FormSubmitted(Form),
    VoteChosen { proposal_id: u64, support: bool },
    RefreshRequested,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tab_names_round_trip() {
        for tab in [Tab::Proposals, Tab::Create, Tab::Delegate] {
            assert_eq!(tab.to_string().parse::<Tab>(), Ok(tab));
        }
        assert!("Settings".parse::<Tab>().is_err());
        assert_eq!(Tab::default(), Tab::Proposals);
    }
}
