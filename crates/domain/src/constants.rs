//! Application constants
//!
//! Centralized location for all domain-level constants used throughout the
//! application.

// Remote collections
pub const MEMBERS_TABLE: &str = "members";
pub const USERS_TABLE: &str = "users";

// Aggregation
pub const UNSPECIFIED_LABEL: &str = "Não especificado";
pub const GROWTH_WINDOW_DAYS: i64 = 30;

// Session handling
pub const TOKEN_REFRESH_THRESHOLD_SECS: i64 = 60;

// Dashboard
pub const DEFAULT_PAGE_SIZE: usize = 20;

// Report
pub const REPORT_TITLE: &str = "Relatório de Membros";
pub const DEFAULT_REPORT_FILE: &str = "relatorio-membros.pdf";

// Defaults
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;
