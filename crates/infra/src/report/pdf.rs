//! A4 portrait PDF rendering of a [`MemberReport`]
//!
//! Layout is expressed in millimetres from the top-left corner and flipped
//! into PDF user space when drawn. The table continues on new pages with a
//! repeated header.

use std::ops::Range;
use std::path::Path;

use congregate_core::{MemberReport, ReportExporter, REPORT_COLUMNS};
use congregate_domain::{CongregateError, Result};
use printpdf::{
    BuiltinFont, Color, IndirectFontRef, Mm, PdfDocument, PdfDocumentReference, PdfLayerReference,
    Rect, Rgb,
};
use tracing::{debug, info, instrument};

use crate::errors::InfraError;

const PAGE_WIDTH: f32 = 210.0;
const PAGE_HEIGHT: f32 = 297.0;
const MARGIN_LEFT: f32 = 14.0;

const TITLE_Y: f32 = 15.0;
const TITLE_SIZE: f32 = 16.0;
const SUMMARY_Y: [f32; 4] = [25.0, 35.0, 42.0, 49.0];
const SUMMARY_SIZE: f32 = 12.0;

const TABLE_START_Y: f32 = 60.0;
const CONTINUATION_START_Y: f32 = 20.0;
const TABLE_SIZE: f32 = 10.0;
const ROW_HEIGHT: f32 = 7.0;
const PAGE_BOTTOM: f32 = 285.0;
const COLUMN_WIDTHS: [f32; 5] = [60.0, 25.0, 35.0, 35.0, 27.0];
const HEADER_FILL: (u8, u8, u8) = (41, 128, 185);

// Rough Helvetica advance at 10pt.
const MM_PER_CHAR: f32 = 1.8;

fn rows_fitting(header_y: f32) -> usize {
    let first_row = header_y + ROW_HEIGHT;
    ((PAGE_BOTTOM - first_row) / ROW_HEIGHT).max(0.0) as usize
}

/// Row ranges per page. Always at least one page.
pub fn plan_pages(row_count: usize) -> Vec<Range<usize>> {
    let mut pages = Vec::new();
    let mut start = 0;
    let mut capacity = rows_fitting(TABLE_START_Y);
    loop {
        let end = (start + capacity).min(row_count);
        pages.push(start..end);
        if end >= row_count {
            return pages;
        }
        start = end;
        capacity = rows_fitting(CONTINUATION_START_Y);
    }
}

/// Clip `text` to what fits in a column of `width` millimetres.
pub fn fit_cell(text: &str, width: f32) -> String {
    let max_chars = ((width - 2.0) / MM_PER_CHAR).max(4.0) as usize;
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let kept: String = text.chars().take(max_chars.saturating_sub(3)).collect();
    format!("{kept}...")
}

fn rgb(color: (u8, u8, u8)) -> Color {
    Color::Rgb(Rgb::new(
        f32::from(color.0) / 255.0,
        f32::from(color.1) / 255.0,
        f32::from(color.2) / 255.0,
        None,
    ))
}

fn pdf_error(context: &str, err: impl std::fmt::Display) -> CongregateError {
    CongregateError::Internal(format!("{context}: {err}"))
}

struct Fonts {
    regular: IndirectFontRef,
    bold: IndirectFontRef,
}

struct Canvas<'a> {
    layer: PdfLayerReference,
    fonts: &'a Fonts,
}

impl Canvas<'_> {
    fn text(&self, text: &str, size: f32, x: f32, y: f32, bold: bool) {
        let font = if bold { &self.fonts.bold } else { &self.fonts.regular };
        self.layer.use_text(text, size, Mm(x), Mm(PAGE_HEIGHT - y), font);
    }

    fn header_row(&self, y: f32) {
        self.layer.set_fill_color(rgb(HEADER_FILL));
        let width: f32 = COLUMN_WIDTHS.iter().sum();
        self.layer.add_rect(Rect::new(
            Mm(MARGIN_LEFT),
            Mm(PAGE_HEIGHT - y - 2.0),
            Mm(MARGIN_LEFT + width),
            Mm(PAGE_HEIGHT - y + ROW_HEIGHT - 2.0),
        ));
        self.layer.set_fill_color(rgb((255, 255, 255)));
        self.cells(&REPORT_COLUMNS, y, true);
        self.layer.set_fill_color(rgb((0, 0, 0)));
    }

    fn cells(&self, cells: &[&str; 5], y: f32, bold: bool) {
        let mut x = MARGIN_LEFT + 1.0;
        for (cell, width) in cells.iter().zip(COLUMN_WIDTHS) {
            self.text(&fit_cell(cell, width), TABLE_SIZE, x, y, bold);
            x += width;
        }
    }
}

/// printpdf-backed report exporter
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfReportExporter;

impl PdfReportExporter {
    pub fn new() -> Self {
        Self
    }

    fn draw(&self, report: &MemberReport) -> Result<PdfDocumentReference> {
        let (doc, first_page, first_layer) =
            PdfDocument::new(&report.title, Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Relatório");
        let fonts = Fonts {
            regular: doc
                .add_builtin_font(BuiltinFont::Helvetica)
                .map_err(|e| pdf_error("cannot load font", e))?,
            bold: doc
                .add_builtin_font(BuiltinFont::HelveticaBold)
                .map_err(|e| pdf_error("cannot load font", e))?,
        };

        let pages = plan_pages(report.rows.len());
        for (index, range) in pages.iter().enumerate() {
            let layer = if index == 0 {
                doc.get_page(first_page).get_layer(first_layer)
            } else {
                let (page, layer) = doc.add_page(Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Relatório");
                doc.get_page(page).get_layer(layer)
            };
            let canvas = Canvas { layer, fonts: &fonts };

            let header_y = if index == 0 {
                canvas.text(&report.title, TITLE_SIZE, MARGIN_LEFT, TITLE_Y, true);
                for (line, y) in report.summary_lines().iter().zip(SUMMARY_Y) {
                    canvas.text(line, SUMMARY_SIZE, MARGIN_LEFT, y, false);
                }
                TABLE_START_Y
            } else {
                CONTINUATION_START_Y
            };

            canvas.header_row(header_y);
            let mut y = header_y + ROW_HEIGHT;
            for row in &report.rows[range.clone()] {
                canvas.cells(&row.cells(), y, false);
                y += ROW_HEIGHT;
            }
        }

        debug!(pages = pages.len(), rows = report.rows.len(), "report laid out");
        Ok(doc)
    }
}

impl ReportExporter for PdfReportExporter {
    #[instrument(skip(self, report), fields(rows = report.rows.len()))]
    fn render(&self, report: &MemberReport) -> Result<Vec<u8>> {
        self.draw(report)?.save_to_bytes().map_err(|e| pdf_error("cannot encode PDF", e))
    }

    #[instrument(skip(self, report), fields(destination = %destination.display()))]
    fn export(&self, report: &MemberReport, destination: &Path) -> Result<()> {
        let bytes = self.render(report)?;
        if let Some(parent) = destination.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(InfraError::from)?;
        }
        std::fs::write(destination, &bytes).map_err(InfraError::from)?;
        info!(bytes = bytes.len(), "report written");
        Ok(())
    }
}
