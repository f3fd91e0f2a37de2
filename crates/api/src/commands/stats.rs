use async_trait::async_trait;
use chrono::Utc;
use clap::Args;
use congregate_domain::Result;

use super::args::FilterArgs;
use super::CliCommand;
use crate::context::AppContext;
use crate::utils::format;

#[derive(Args, Debug, Clone)]
pub struct StatsCommand {
    #[command(flatten)]
    pub filters: FilterArgs,
}

#[async_trait]
impl CliCommand for StatsCommand {
    fn name(&self) -> &'static str {
        "stats"
    }

    async fn execute(&self, ctx: &AppContext) -> Result<String> {
        ctx.require_session().await?;
        self.filters.load_into(ctx).await?;
        let view = ctx.registry.view(Utc::now());
        Ok(format::statistics(&view.statistics))
    }
}
