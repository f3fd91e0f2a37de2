//! Tabular member report mirroring the current view

use chrono::NaiveDate;
use congregate_domain::constants::REPORT_TITLE;
use serde::Serialize;

use crate::members::MemberView;

/// Table header, in column order
pub const REPORT_COLUMNS: [&str; 5] = ["Nome", "Região", "Paróquia", "Função", "Gênero"];

/// One table row
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportRow {
    pub name: String,
    pub region: String,
    pub parish: String,
    pub function: String,
    pub gender: String,
}

impl ReportRow {
    pub fn cells(&self) -> [&str; 5] {
        [&self.name, &self.region, &self.parish, &self.function, &self.gender]
    }
}

/// Report content, independent of layout
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MemberReport {
    pub title: String,
    pub generated_on: NaiveDate,
    pub total: usize,
    pub male: usize,
    pub female: usize,
    pub rows: Vec<ReportRow>,
}

impl MemberReport {
    /// Rows follow the view order; summary counts come from its statistics.
    pub fn from_view(view: &MemberView, generated_on: NaiveDate) -> Self {
        let rows = view
            .members
            .iter()
            .map(|m| ReportRow {
                name: m.full_name.clone(),
                region: m.region.label().to_string(),
                parish: m.parish.clone(),
                function: m.function.label().to_string(),
                gender: m.gender.label().to_string(),
            })
            .collect();
        Self {
            title: REPORT_TITLE.to_string(),
            generated_on,
            total: view.statistics.total,
            male: view.statistics.by_gender.male.count,
            female: view.statistics.by_gender.female.count,
            rows,
        }
    }

    /// Header lines printed above the table.
    pub fn summary_lines(&self) -> Vec<String> {
        vec![
            format!("Data: {}", self.generated_on.format("%d/%m/%Y")),
            format!("Total de Membros: {}", self.total),
            format!("Masculino: {}", self.male),
            format!("Feminino: {}", self.female),
        ]
    }
}
