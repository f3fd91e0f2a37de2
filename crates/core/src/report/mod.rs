//! Member list report

pub mod model;
pub mod ports;

pub use model::{MemberReport, ReportRow, REPORT_COLUMNS};
pub use ports::ReportExporter;
