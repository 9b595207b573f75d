//! Proposal renderer.
//!
//! Pure transformation from fetched proposals to display models, plus the
//! markup form of the proposal list. Output order always equals input order.

use agora_types::{TokenAmount, Timestamp};
use agora_utils::format_remaining;
use serde::Serialize;
use std::collections::HashMap;
use std::fmt::Write;

use crate::proposal::Proposal;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum ProposalStatus {
    Active,
    Ended,
}

impl ProposalStatus {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Ended => "Ended",
        }
    }
}

/// Display model for one proposal.
///
/// Text fields hold the ledger's raw text; [`render_proposals_html`] escapes
/// them on the way into markup.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ProposalView {
    pub id: u64,
    pub title: String,
    pub description: String,
    /// Proposer as `first6...last4`.
    pub proposer: String,
    pub status: ProposalStatus,
    /// Share of for-votes, 0..=100.
    pub for_percentage: u8,
    /// Share of against-votes; 0 when nobody voted.
    pub against_percentage: u8,
    pub for_votes: String,
    pub against_votes: String,
    pub time_remaining: String,
    /// Whether the connected account already voted; `None` when unknown.
    pub has_voted: Option<bool>,
}

impl ProposalView {
    /// `70.0%`
    pub fn percentage_label(&self) -> String {
        format!("{:.1}%", f64::from(self.for_percentage))
    }

    pub fn against_label(&self) -> String {
        format!("{:.1}%", f64::from(self.against_percentage))
    }

    /// Active proposals accept votes unless the account is known to have voted.
    pub fn can_vote(&self) -> bool {
        self.status == ProposalStatus::Active && self.has_voted != Some(true)
    }
}

/// For-votes as a rounded percentage of all votes; 0 when nobody voted.
pub fn for_percentage(for_votes: u128, against_votes: u128) -> u8 {
    let exact = for_votes.checked_add(against_votes).and_then(|total| {
        if total == 0 {
            return Some(0);
        }
        for_votes
            .checked_mul(100)
            .and_then(|scaled| scaled.checked_add(total / 2))
            .map(|scaled| scaled / total)
    });
    let pct = exact.unwrap_or_else(|| {
        // Tallies too large for exact integer math.
        let f = for_votes as f64;
        let total = f + against_votes as f64;
        (f * 100.0 / total).round() as u128
    });
    pct.min(100) as u8
}

/// `Ended` for inactive proposals, otherwise the time left until `end_time`.
pub fn time_remaining(proposal: &Proposal, now: Timestamp) -> String {
    if !proposal.active {
        return ProposalStatus::Ended.label().to_string();
    }
    match proposal.end_time.remaining_from(now) {
        Some(secs) => format_remaining(secs),
        None => "Ending now".to_string(),
    }
}

pub fn render_proposal(proposal: &Proposal, now: Timestamp) -> ProposalView {
    let for_pct = for_percentage(proposal.for_votes, proposal.against_votes);
    let nobody_voted = proposal.for_votes == 0 && proposal.against_votes == 0;
    ProposalView {
        id: proposal.id,
        title: proposal.title.clone(),
        description: proposal.description.clone(),
        proposer: proposal.proposer.short(),
        status: if proposal.active {
            ProposalStatus::Active
        } else {
            ProposalStatus::Ended
        },
        for_percentage: for_pct,
        against_percentage: if nobody_voted { 0 } else { 100 - for_pct },
        for_votes: TokenAmount::votes(proposal.for_votes).format_units(),
        against_votes: TokenAmount::votes(proposal.against_votes).format_units(),
        time_remaining: time_remaining(proposal, now),
        has_voted: None,
    }
}

/// Render every proposal, preserving order.
pub fn render_proposals(proposals: &[Proposal], now: Timestamp) -> Vec<ProposalView> {
    proposals.iter().map(|p| render_proposal(p, now)).collect()
}

/// Attach has-voted flags by proposal id.
pub fn apply_vote_flags(views: &mut [ProposalView], flags: &HashMap<u64, bool>) {
    for view in views {
        view.has_voted = flags.get(&view.id).copied();
    }
}

/// Escape text for safe insertion into HTML element content or attribute values.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Markup for the proposal list. Every ledger-supplied string is escaped.
pub fn render_proposals_html(views: &[ProposalView]) -> String {
    if views.is_empty() {
        return "<div class=\"loading\">No proposals found</div>\n".to_string();
    }
    let mut html = String::new();
    for view in views {
        let status_class = match view.status {
            ProposalStatus::Active => "status-active",
            ProposalStatus::Ended => "status-ended",
        };
        let time_label = match view.status {
            ProposalStatus::Active => "Time Left",
            ProposalStatus::Ended => "Status",
        };
        // Writing to a String cannot fail.
        let _ = write!(
            html,
            r#"<div class="proposal-card" data-proposal-id="{id}">
  <div class="proposal-header">
    <div>
      <div class="proposal-title">{title}</div>
      <small>Proposed by: {proposer}</small>
    </div>
    <span class="proposal-status {status_class}">{status}</span>
  </div>
  <div class="proposal-description">{description}</div>
  <div class="proposal-stats">
    <div class="stat-item"><div class="stat-value">{for_votes}</div><div class="stat-label">For Votes</div></div>
    <div class="stat-item"><div class="stat-value">{against_votes}</div><div class="stat-label">Against Votes</div></div>
    <div class="stat-item"><div class="stat-value">{time}</div><div class="stat-label">{time_label}</div></div>
  </div>
  <div class="vote-progress">
    <div class="progress-bar"><div class="progress-fill" style="width: {pct}%"></div></div>
    <div class="vote-counts"><span>For: {pct_label}</span><span>Against: {against_label}</span></div>
  </div>
"#,
            id = view.id,
            title = escape_html(&view.title),
            proposer = escape_html(&view.proposer),
            status = view.status.label(),
            description = escape_html(&view.description),
            for_votes = escape_html(&view.for_votes),
            against_votes = escape_html(&view.against_votes),
            time = escape_html(&view.time_remaining),
            pct = view.for_percentage,
            pct_label = view.percentage_label(),
            against_label = view.against_label(),
        );
        if view.has_voted == Some(true) {
            html.push_str("  <div class=\"voted-badge\">You have voted</div>\n");
        } else if view.can_vote() {
            let _ = writeln!(
                html,
                "  <button class=\"btn btn-primary vote-btn\" data-proposal-id=\"{}\">Vote</button>",
                view.id
            );
        }
        html.push_str("</div>\n");
    }
    html
}
