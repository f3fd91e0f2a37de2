//! # Congregate App
//!
//! Command-line application layer.
//!
//! This crate contains:
//! - CLI commands (terminal → core services)
//! - Application context (dependency injection)
//! - Terminal adapters for notifications, confirmations and navigation
//! - Logging bootstrap
//!
//! ## Architecture
//! - Depends on `domain`, `core`, and `infra`
//! - Wires up the hexagonal architecture

pub mod adapters;
pub mod commands;
pub mod context;
pub mod utils;

// Re-export for convenience
pub use commands::{Cli, CliCommand, RootCommand};
pub use context::{AppContext, Feedback};
