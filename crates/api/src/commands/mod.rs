//! Command-line surface
//!
//! Every command renders its result as text; `main` prints it. Notifications
//! raised by the core go to stderr through the console notifier.

pub mod args;
pub mod auth;
pub mod members;
pub mod report;
pub mod stats;
pub mod users;

use std::path::PathBuf;
use std::time::Instant;

use async_trait::async_trait;
use clap::{Parser, Subcommand};
use congregate_domain::Result;

pub use auth::{LoginCommand, LogoutCommand, WhoamiCommand};
pub use members::MembersCommand;
pub use report::ReportCommand;
pub use stats::StatsCommand;
pub use users::UsersCommand;

use crate::context::AppContext;
use crate::utils::logging::log_command_execution;

#[async_trait]
pub trait CliCommand {
    /// Stable identifier used in logs.
    fn name(&self) -> &'static str;

    async fn execute(&self, ctx: &AppContext) -> Result<String>;
}

#[derive(Parser, Debug, Clone)]
#[command(name = "congregate", version, about = "Registo de membros da congregação")]
pub struct Cli {
    /// Debug-level logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Config file; the environment and probed files are used otherwise
    #[arg(long, global = true, env = "CONGREGATE_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: RootCommand,
}

#[derive(Subcommand, Debug, Clone)]
pub enum RootCommand {
    /// Sign in with email and password
    Login(LoginCommand),
    /// Sign out and forget the stored session
    Logout(LogoutCommand),
    /// Show the signed-in user and what they may do
    Whoami(WhoamiCommand),
    #[command(subcommand)]
    Members(MembersCommand),
    /// Dashboard statistics for the filtered view
    Stats(StatsCommand),
    /// Export the filtered view as a PDF report
    Report(ReportCommand),
    #[command(subcommand)]
    Users(UsersCommand),
}

impl RootCommand {
    fn as_command(&self) -> &(dyn CliCommand + Send + Sync) {
        match self {
            Self::Login(cmd) => cmd,
            Self::Logout(cmd) => cmd,
            Self::Whoami(cmd) => cmd,
            Self::Members(cmd) => cmd,
            Self::Stats(cmd) => cmd,
            Self::Report(cmd) => cmd,
            Self::Users(cmd) => cmd,
        }
    }
}

impl Cli {
    /// Whether confirmations should be answered without asking.
    pub fn assume_yes(&self) -> bool {
        matches!(&self.command, RootCommand::Members(MembersCommand::Delete { yes: true, .. }))
    }

    /// Run the selected command and log its outcome.
    ///
    /// # Errors
    /// Whatever the command returns.
    pub async fn execute(&self, ctx: &AppContext) -> Result<String> {
        let command = self.command.as_command();
        let start = Instant::now();
        let result = command.execute(ctx).await;
        log_command_execution(command.name(), start.elapsed(), result.as_ref().err());
        result
    }
}
