//! Configuration structures
//!
//! Loaded by the infra config loader from the environment or a config file.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_HTTP_TIMEOUT_SECS, DEFAULT_PAGE_SIZE, DEFAULT_REPORT_FILE};
use crate::errors::{CongregateError, Result};

/// Application configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    pub supabase: SupabaseConfig,
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub permissions: PermissionsConfig,
    #[serde(default)]
    pub dashboard: DashboardConfig,
    #[serde(default)]
    pub report: ReportConfig,
}

impl Config {
    /// Minimal configuration pointing at a project, everything else default.
    pub fn new(url: impl Into<String>, anon_key: impl Into<String>) -> Self {
        Self {
            supabase: SupabaseConfig {
                url: url.into(),
                anon_key: anon_key.into(),
                service_role_key: None,
                timeout_seconds: DEFAULT_HTTP_TIMEOUT_SECS,
            },
            session: SessionConfig::default(),
            permissions: PermissionsConfig::default(),
            dashboard: DashboardConfig::default(),
            report: ReportConfig::default(),
        }
    }

    /// Reject values that would make the client unusable.
    ///
    /// # Errors
    /// Returns `CongregateError::Config` describing the first bad value.
    pub fn validate(&self) -> Result<()> {
        let url = self.supabase.url.trim();
        if url.is_empty() {
            return Err(CongregateError::Config("supabase.url must not be empty".to_string()));
        }
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(CongregateError::Config(format!(
                "supabase.url must be an http(s) URL: {url}"
            )));
        }
        if self.supabase.anon_key.trim().is_empty() {
            return Err(CongregateError::Config("supabase.anon_key must not be empty".to_string()));
        }
        if self.supabase.timeout_seconds == 0 {
            return Err(CongregateError::Config(
                "supabase.timeout_seconds must be greater than zero".to_string(),
            ));
        }
        if self.dashboard.page_size == 0 {
            return Err(CongregateError::Config(
                "dashboard.page_size must be greater than zero".to_string(),
            ));
        }
        if self.report.file_name.trim().is_empty() {
            return Err(CongregateError::Config("report.file_name must not be empty".to_string()));
        }
        Ok(())
    }
}

/// Remote project settings
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupabaseConfig {
    pub url: String,
    pub anon_key: String,
    /// Needed only for account creation
    #[serde(default)]
    pub service_role_key: Option<String>,
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

impl std::fmt::Debug for SupabaseConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SupabaseConfig")
            .field("url", &self.url)
            .field("anon_key", &"[REDACTED]")
            .field("service_role_key", &self.service_role_key.as_ref().map(|_| "[REDACTED]"))
            .field("timeout_seconds", &self.timeout_seconds)
            .finish()
    }
}

fn default_timeout() -> u64 {
    DEFAULT_HTTP_TIMEOUT_SECS
}

/// Where the signed-in session is persisted between runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStoreKind {
    #[default]
    File,
    Keyring,
}

impl std::str::FromStr for SessionStoreKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "file" => Ok(Self::File),
            "keyring" | "keychain" => Ok(Self::Keyring),
            other => Err(format!("Invalid SessionStoreKind: {other}")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SessionConfig {
    #[serde(default)]
    pub store: SessionStoreKind,
    /// Session file location when `store = "file"`
    #[serde(default)]
    pub path: Option<PathBuf>,
}

/// Role used when the signed-in user carries no role metadata
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoleFallback {
    /// Treat the user as `user`
    #[default]
    User,
    /// Treat the user as having no role
    None,
}

impl std::str::FromStr for RoleFallback {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "user" => Ok(Self::User),
            "none" | "null" => Ok(Self::None),
            other => Err(format!("Invalid RoleFallback: {other}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PermissionsConfig {
    #[serde(default)]
    pub role_fallback: RoleFallback,
}

/// Which collection dashboard statistics are computed over
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatisticsScope {
    #[default]
    Filtered,
    Full,
}

impl std::str::FromStr for StatisticsScope {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "filtered" => Ok(Self::Filtered),
            "full" => Ok(Self::Full),
            other => Err(format!("Invalid StatisticsScope: {other}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardConfig {
    #[serde(default)]
    pub statistics_scope: StatisticsScope,
    #[serde(default = "default_page_size")]
    pub page_size: usize,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self { statistics_scope: StatisticsScope::default(), page_size: DEFAULT_PAGE_SIZE }
    }
}

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportConfig {
    #[serde(default = "default_report_file")]
    pub file_name: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self { file_name: DEFAULT_REPORT_FILE.to_string() }
    }
}

fn default_report_file() -> String {
    DEFAULT_REPORT_FILE.to_string()
}
