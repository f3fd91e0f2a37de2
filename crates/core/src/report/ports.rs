//! Port interface for report rendering

use std::path::Path;

use congregate_domain::Result;

use super::model::MemberReport;

/// Renders a `MemberReport` into a document
pub trait ReportExporter: Send + Sync {
    /// Document bytes.
    fn render(&self, report: &MemberReport) -> Result<Vec<u8>>;

    /// Render and write to `destination`.
    fn export(&self, report: &MemberReport, destination: &Path) -> Result<()>;
}
