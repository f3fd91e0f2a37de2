//! Configuration loader
//!
//! Loads application configuration from environment variables or files.
//!
//! ## Loading Strategy
//! 1. First, attempts to load from environment variables
//! 2. If the required ones are missing, falls back to loading from file
//! 3. Probes multiple paths for config files
//! 4. Supports JSON and TOML formats
//!
//! Whatever the source, the result is checked with [`Config::validate`].
//!
//! ## Environment Variables
//! - `CONGREGATE_SUPABASE_URL` (required): project URL
//! - `CONGREGATE_SUPABASE_ANON_KEY` (required): public API key
//! - `CONGREGATE_SUPABASE_SERVICE_ROLE_KEY`: admin key for account creation
//! - `CONGREGATE_HTTP_TIMEOUT`: request timeout in seconds
//! - `CONGREGATE_SESSION_STORE`: `file` or `keyring`
//! - `CONGREGATE_SESSION_PATH`: session file location
//! - `CONGREGATE_ROLE_FALLBACK`: `user` or `none`
//! - `CONGREGATE_STATISTICS_SCOPE`: `filtered` or `full`
//! - `CONGREGATE_PAGE_SIZE`: members per page
//! - `CONGREGATE_REPORT_FILE`: default report file name
//!
//! ## File Locations
//! The loader probes the following paths (in order):
//! 1. `./congregate.{toml,json}` then `./config.{toml,json}`
//! 2. The same names in the parent directory
//! 3. The same names next to the executable

use std::path::{Path, PathBuf};
use std::str::FromStr;

use congregate_domain::{Config, CongregateError, Result};

const FILE_STEMS: [&str; 2] = ["congregate", "config"];
const FILE_EXTENSIONS: [&str; 2] = ["toml", "json"];

/// Load configuration with automatic fallback strategy
///
/// # Errors
/// Returns `CongregateError::Config` if no source yields a valid
/// configuration.
pub fn load() -> Result<Config> {
    let config = match load_from_env() {
        Ok(config) => {
            tracing::info!("Configuration loaded from environment variables");
            config
        }
        Err(e) => {
            tracing::debug!(error = %e, "Failed to load from environment, trying file");
            load_from_file(None)?
        }
    };
    config.validate()?;
    Ok(config)
}

/// Load configuration from environment variables
///
/// # Errors
/// Returns `CongregateError::Config` if a required variable is missing or a
/// value does not parse.
pub fn load_from_env() -> Result<Config> {
    let mut config =
        Config::new(env_var("CONGREGATE_SUPABASE_URL")?, env_var("CONGREGATE_SUPABASE_ANON_KEY")?);

    config.supabase.service_role_key = optional_env("CONGREGATE_SUPABASE_SERVICE_ROLE_KEY");
    if let Some(timeout) = env_parse::<u64>("CONGREGATE_HTTP_TIMEOUT")? {
        config.supabase.timeout_seconds = timeout;
    }
    if let Some(store) = env_parse("CONGREGATE_SESSION_STORE")? {
        config.session.store = store;
    }
    config.session.path = optional_env("CONGREGATE_SESSION_PATH").map(PathBuf::from);
    if let Some(fallback) = env_parse("CONGREGATE_ROLE_FALLBACK")? {
        config.permissions.role_fallback = fallback;
    }
    if let Some(scope) = env_parse("CONGREGATE_STATISTICS_SCOPE")? {
        config.dashboard.statistics_scope = scope;
    }
    if let Some(page_size) = env_parse::<usize>("CONGREGATE_PAGE_SIZE")? {
        config.dashboard.page_size = page_size;
    }
    if let Some(file_name) = optional_env("CONGREGATE_REPORT_FILE") {
        config.report.file_name = file_name;
    }

    Ok(config)
}

/// Load configuration from a file
///
/// If `path` is `None`, probes multiple locations for config files.
///
/// # Errors
/// Returns `CongregateError::Config` if the file is missing or invalid.
pub fn load_from_file(path: Option<PathBuf>) -> Result<Config> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(CongregateError::Config(format!(
                    "Config file not found: {}",
                    p.display()
                )));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            CongregateError::Config(
                "No config file found and CONGREGATE_SUPABASE_URL is not set".to_string(),
            )
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| CongregateError::Config(format!("Failed to read config file: {}", e)))?;

    parse_config(&contents, &config_path)
}

/// Parse configuration by file extension (`.json` or `.toml`).
fn parse_config(contents: &str, path: &Path) -> Result<Config> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("toml");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| CongregateError::Config(format!("Invalid TOML format: {}", e))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| CongregateError::Config(format!("Invalid JSON format: {}", e))),
        _ => Err(CongregateError::Config(format!("Unsupported config format: {}", extension))),
    }
}

fn candidates_in(dir: &Path) -> impl Iterator<Item = PathBuf> + '_ {
    FILE_STEMS.iter().flat_map(move |stem| {
        FILE_EXTENSIONS.iter().map(move |ext| dir.join(format!("{stem}.{ext}")))
    })
}

/// First existing config file among the standard locations.
pub fn probe_config_paths() -> Option<PathBuf> {
    let mut dirs = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        dirs.push(cwd.clone());
        if let Some(parent) = cwd.parent() {
            dirs.push(parent.to_path_buf());
        }
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            dirs.push(exe_dir.to_path_buf());
        }
    }

    dirs.iter().flat_map(|dir| candidates_in(dir).collect::<Vec<_>>()).find(|path| path.exists())
}

/// Get required environment variable
fn env_var(key: &str) -> Result<String> {
    optional_env(key).ok_or_else(|| {
        CongregateError::Config(format!("Missing required environment variable: {}", key))
    })
}

/// Non-blank value of an optional variable.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

/// Parse an optional variable, failing on a present but invalid value.
fn env_parse<T>(key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    optional_env(key)
        .map(|raw| {
            raw.parse::<T>()
                .map_err(|e| CongregateError::Config(format!("Invalid value for {key}: {e}")))
        })
        .transpose()
}
