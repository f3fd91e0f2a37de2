use async_trait::async_trait;
use clap::Args;
use congregate_core::AuthProvider;
use congregate_domain::{AuthStatus, Result};

use super::CliCommand;
use crate::context::AppContext;
use crate::utils::format;

#[derive(Args, Debug, Clone)]
pub struct LoginCommand {
    #[arg(long)]
    pub email: String,
    /// Read from `CONGREGATE_PASSWORD` when omitted
    #[arg(long, env = "CONGREGATE_PASSWORD", hide_env_values = true)]
    pub password: String,
}

#[async_trait]
impl CliCommand for LoginCommand {
    fn name(&self) -> &'static str {
        "auth::login"
    }

    async fn execute(&self, ctx: &AppContext) -> Result<String> {
        let session = ctx.gate.sign_in(&self.email, &self.password).await?;
        let email = session.user.email.as_deref().unwrap_or(self.email.trim());
        Ok(format!("Sessão iniciada como {email}\n"))
    }
}

#[derive(Args, Debug, Clone)]
pub struct LogoutCommand {}

#[async_trait]
impl CliCommand for LogoutCommand {
    fn name(&self) -> &'static str {
        "auth::logout"
    }

    async fn execute(&self, ctx: &AppContext) -> Result<String> {
        ctx.gate.sign_out().await?;
        Ok("Sessão encerrada\n".to_string())
    }
}

#[derive(Args, Debug, Clone)]
pub struct WhoamiCommand {}

#[async_trait]
impl CliCommand for WhoamiCommand {
    fn name(&self) -> &'static str {
        "auth::whoami"
    }

    async fn execute(&self, ctx: &AppContext) -> Result<String> {
        if ctx.gate.start().await != AuthStatus::Authenticated {
            return Ok("Nenhuma sessão ativa\n".to_string());
        }
        let user = ctx.auth.get_user().await?;
        let role = ctx.permissions.role().await;
        let caps = ctx.permissions.capabilities().await;
        Ok(format::identity(
            user.as_ref().and_then(|u| u.email.as_deref()),
            role.as_ref(),
            caps,
        ))
    }
}
