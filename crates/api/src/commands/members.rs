use async_trait::async_trait;
use chrono::Utc;
use clap::Subcommand;
use congregate_core::engine::paginate;
use congregate_domain::{CongregateError, Result};

use super::args::{FilterArgs, MemberFields};
use super::CliCommand;
use crate::context::AppContext;
use crate::utils::format;

/// Member registry
#[derive(Subcommand, Debug, Clone)]
pub enum MembersCommand {
    /// Filtered, sorted and paginated member list
    List {
        #[command(flatten)]
        filters: FilterArgs,
        /// 1-based page number
        #[arg(long, default_value_t = 1)]
        page: usize,
    },
    /// Full record of one member
    Show { id: String },
    /// Register a new member
    Add {
        #[command(flatten)]
        fields: MemberFields,
    },
    /// Change some fields of a member
    Edit {
        id: String,
        #[command(flatten)]
        fields: MemberFields,
    },
    /// Delete a member after confirmation
    Delete {
        id: String,
        /// Skip the confirmation prompt
        #[arg(long, short)]
        yes: bool,
    },
}

#[async_trait]
impl CliCommand for MembersCommand {
    fn name(&self) -> &'static str {
        match self {
            Self::List { .. } => "members::list",
            Self::Show { .. } => "members::show",
            Self::Add { .. } => "members::add",
            Self::Edit { .. } => "members::edit",
            Self::Delete { .. } => "members::delete",
        }
    }

    async fn execute(&self, ctx: &AppContext) -> Result<String> {
        ctx.require_session().await?;

        match self {
            Self::List { filters, page } => {
                ctx.permissions.check_member_access().await;
                filters.load_into(ctx).await?;
                let view = ctx.registry.view(Utc::now());
                let page = paginate(&view.members, *page, ctx.config.dashboard.page_size);
                Ok(format::member_page(&page))
            }
            Self::Show { id } => {
                let member = ctx.registry.load_member(id).await?;
                Ok(format::member_detail(&member))
            }
            Self::Add { fields } => {
                ctx.permissions.require_member_management().await?;
                let member = ctx.registry.add(fields.draft()).await?;
                Ok(format::member_detail(&member))
            }
            Self::Edit { id, fields } => {
                ctx.permissions.require_member_management().await?;
                let draft = fields.draft().normalized();
                if draft.is_empty() {
                    return Err(CongregateError::Validation(
                        "Nenhum campo para atualizar".to_string(),
                    ));
                }
                let member = ctx.registry.edit(id, draft).await?;
                Ok(format::member_detail(&member))
            }
            Self::Delete { id, .. } => {
                ctx.permissions.require_member_management().await?;
                ctx.registry.remove(id).await?;
                Ok(format!("Membro {id} excluído\n"))
            }
        }
    }
}
