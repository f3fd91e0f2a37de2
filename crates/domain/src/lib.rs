//! # Congregate Domain
//!
//! Business domain types for the Congregate member registry.
//!
//! This crate contains:
//! - Member records, closed label enums and the parish catalog
//! - Form drafts with input-time validation
//! - Filter criteria, sort keys and statistics records
//! - Session, role and feedback types
//! - Domain error types and Result definitions
//! - Configuration structures
//!
//! ## Architecture
//! - No dependencies on other Congregate crates
//! - No I/O

pub mod config;
pub mod constants;
pub mod errors;
pub mod macros;
pub mod types;
pub mod utils;

pub use config::*;
pub use errors::*;
pub use types::*;
