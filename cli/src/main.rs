//! Agora CLI: entry point for the governance voting client.

use agora_app::{poll_wallet, App, AppConfig, AppEvent, Form, ProposalsPanel};
use agora_governance::{render_proposals_html, ProposalDraft};
use agora_types::{AccountId, SystemClock};
use agora_utils::{init_logging, LogFormat};
use agora_wallet_core::GatewayClient;
use clap::Parser;
use std::path::PathBuf;
use std::rc::Rc;

#[derive(Parser)]
#[command(name = "agora", about = "Governance voting client")]
struct Cli {
    /// Wallet gateway endpoint.
    #[arg(long, env = "AGORA_GATEWAY_URL")]
    gateway_url: Option<String>,

    /// Voting contract address.
    #[arg(long, env = "AGORA_VOTING_CONTRACT")]
    voting_contract: Option<AccountId>,

    /// Voting token contract address.
    #[arg(long, env = "AGORA_TOKEN_CONTRACT")]
    token_contract: Option<AccountId>,

    /// Gateway request timeout in seconds.
    #[arg(long, env = "AGORA_REQUEST_TIMEOUT_SECS")]
    request_timeout_secs: Option<u64>,

    /// Wallet polling interval for `watch`, in seconds.
    #[arg(long, env = "AGORA_POLL_INTERVAL_SECS")]
    poll_interval_secs: Option<u64>,

    /// Log level: "trace", "debug", "info", "warn", "error".
    #[arg(long, env = "AGORA_LOG_LEVEL")]
    log_level: Option<String>,

    /// Log format: "human" or "json".
    #[arg(long, env = "AGORA_LOG_FORMAT")]
    log_format: Option<LogFormat>,

    /// Path to a TOML configuration file. If provided, file settings
    /// are used as the base; CLI flags and env vars override them.
    #[arg(long, env = "AGORA_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand)]
enum Command {
    /// List proposals.
    Proposals {
        /// Write the proposal list as HTML to this file.
        #[arg(long, conflicts_with = "json")]
        html: Option<PathBuf>,

        /// Print the proposal list as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Vote on a proposal.
    Vote {
        proposal_id: u64,
        #[arg(value_enum)]
        choice: Choice,
    },
    /// Delegate voting power to another account.
    Delegate { delegatee: String },
    /// Create a new proposal.
    Propose {
        #[arg(long)]
        title: String,
        #[arg(long)]
        description: String,
        /// Voting period in seconds (default: 7 days).
        #[arg(long, default_value_t = 604_800)]
        duration_secs: u64,
    },
    /// Show balance, voting power and delegation.
    Account,
    /// Follow wallet account and chain changes until Ctrl-C.
    Watch,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum Choice {
    For,
    Against,
}

impl Cli {
    /// File settings (or defaults) overridden by flags and env vars.
    fn resolve_config(&self) -> anyhow::Result<AppConfig> {
        let base = match &self.config {
            Some(path) => AppConfig::from_toml_file(path)?,
            None => AppConfig::default(),
        };
        Ok(AppConfig {
            gateway_url: self.gateway_url.clone().or(base.gateway_url),
            voting_contract: self.voting_contract.clone().unwrap_or(base.voting_contract),
            token_contract: self.token_contract.clone().unwrap_or(base.token_contract),
            request_timeout_secs: self
                .request_timeout_secs
                .unwrap_or(base.request_timeout_secs),
            poll_interval_secs: self.poll_interval_secs.unwrap_or(base.poll_interval_secs),
            log_level: self.log_level.clone().unwrap_or(base.log_level),
            log_format: self.log_format.unwrap_or(base.log_format),
        })
    }
}

type GatewayApp = App<GatewayClient, GatewayClient>;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = cli.resolve_config()?;
    init_logging(config.log_format, &config.log_level);
    if let Some(path) = &cli.config {
        tracing::info!("Loaded config from {}", path.display());
    }

    let contracts = config.contract_addresses()?;
    let Some(url) = config.gateway_url.clone() else {
        anyhow::bail!("Please install a Web3 wallet (no gateway_url configured)");
    };
    let gateway = GatewayClient::new(url, config.request_timeout())?;
    let mut app: GatewayApp = App::new(
        Some(gateway.clone()),
        Rc::new(gateway),
        contracts,
        Box::new(SystemClock),
    );

    app.initialize().await;
    if app.session().is_none() {
        app.dispatch(AppEvent::ConnectRequested).await;
    }
    if app.session().is_none() {
        return finish(&app);
    }

    match cli.command {
        Command::Proposals { html, json } => {
            if app.view().proposals == ProposalsPanel::Failed {
                return finish(&app);
            }
            let views = app.view().proposals.views();
            if json {
                println!("{}", serde_json::to_string_pretty(views)?);
            } else if let Some(path) = html {
                std::fs::write(&path, render_proposals_html(views))?;
                tracing::info!(count = views.len(), "wrote proposals to {}", path.display());
            } else {
                return finish(&app);
            }
        }
        Command::Vote {
            proposal_id,
            choice,
        } => {
            app.dispatch(AppEvent::VoteChosen {
                proposal_id,
                support: matches!(choice, Choice::For),
            })
            .await;
            return finish(&app);
        }
        Command::Delegate { delegatee } => {
            app.dispatch(AppEvent::FormSubmitted(Form::Delegate { delegatee }))
                .await;
            return finish(&app);
        }
        Command::Propose {
            title,
            description,
            duration_secs,
        } => {
            let draft = ProposalDraft {
                title,
                description,
                voting_duration_secs: duration_secs,
            };
            app.dispatch(AppEvent::FormSubmitted(Form::CreateProposal(draft)))
                .await;
            return finish(&app);
        }
        Command::Account => return finish(&app),
        Command::Watch => watch(&mut app, config.poll_interval()).await,
    }

    Ok(())
}

/// Print the view; an error banner becomes the process error.
fn finish(app: &GatewayApp) -> anyhow::Result<()> {
    print!("{}", app.view().render_text());
    match &app.view().banner {
        Some(banner) if banner.is_error() => anyhow::bail!("{}", banner.message()),
        _ => Ok(()),
    }
}

/// Poll the wallet and turn differences into notifications.
async fn watch(app: &mut GatewayApp, interval: std::time::Duration) {
    print!("{}", app.view().render_text());
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            _ = &mut shutdown => {
                tracing::info!("Shutdown signal received, stopping watch");
                break;
            }
            _ = ticker.tick() => {
                let Some(event) = poll_wallet(app).await else {
                    continue;
                };
                app.dispatch(event).await;
                print!("{}", app.view().render_text());
            }
        }
    }
}
