//! Report document renderers

pub mod pdf;

pub use pdf::PdfReportExporter;
