use async_trait::async_trait;
use clap::Subcommand;
use congregate_domain::{AssignableRole, Result};

use super::CliCommand;
use crate::context::AppContext;
use crate::utils::format;

/// Account administration (super_admin only)
#[derive(Subcommand, Debug, Clone)]
pub enum UsersCommand {
    /// Accounts, newest first
    List,
    /// Create an account
    Create {
        #[arg(long)]
        email: String,
        /// At least 6 characters
        #[arg(long, env = "CONGREGATE_NEW_USER_PASSWORD", hide_env_values = true)]
        password: String,
        /// `admin` or `user`
        #[arg(long, default_value = "user")]
        role: AssignableRole,
    },
}

#[async_trait]
impl CliCommand for UsersCommand {
    fn name(&self) -> &'static str {
        match self {
            Self::List => "users::list",
            Self::Create { .. } => "users::create",
        }
    }

    async fn execute(&self, ctx: &AppContext) -> Result<String> {
        ctx.require_session().await?;

        match self {
            Self::List => {
                let accounts = ctx.users.list_users().await?;
                Ok(format::users(&accounts))
            }
            Self::Create { email, password, role } => {
                let account = ctx.users.create_user(email, password, *role).await?;
                Ok(format!("Usuário {} criado com a função {}\n", account.email, account.role))
            }
        }
    }
}
