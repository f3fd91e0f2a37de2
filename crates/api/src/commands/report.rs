use std::path::PathBuf;

use async_trait::async_trait;
use chrono::Utc;
use clap::Args;
use congregate_core::MemberReport;
use congregate_domain::Result;
use tracing::info;

use super::args::FilterArgs;
use super::CliCommand;
use crate::context::AppContext;

#[derive(Args, Debug, Clone)]
pub struct ReportCommand {
    #[command(flatten)]
    pub filters: FilterArgs,
    /// Destination file; `report.file_name` from the config by default
    #[arg(long, short)]
    pub output: Option<PathBuf>,
}

#[async_trait]
impl CliCommand for ReportCommand {
    fn name(&self) -> &'static str {
        "report"
    }

    async fn execute(&self, ctx: &AppContext) -> Result<String> {
        ctx.require_session().await?;
        self.filters.load_into(ctx).await?;

        let now = Utc::now();
        let report = MemberReport::from_view(&ctx.registry.view(now), now.date_naive());
        let destination =
            self.output.clone().unwrap_or_else(|| PathBuf::from(&ctx.config.report.file_name));
        ctx.exporter.export(&report, &destination)?;

        info!(rows = report.rows.len(), path = %destination.display(), "report exported");
        Ok(format!(
            "Relatório com {} membros salvo em {}\n",
            report.rows.len(),
            destination.display()
        ))
    }
}
