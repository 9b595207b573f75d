//! Agora application layer.
//!
//! Glues the governance core to a front end: configuration, the event
//! dispatcher that owns the session, and the view model it keeps current.

pub mod config;
pub mod dispatcher;
pub mod error;
pub mod event;
pub mod view;
pub mod watch;

pub use config::AppConfig;
pub use dispatcher::App;
pub use error::AppError;
pub use event::{AppEvent, Form, Tab};
pub use view::{Banner, ProposalsPanel, View, WalletPanel};
pub use watch::poll_wallet;
