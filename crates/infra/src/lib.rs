//! # Congregate Infrastructure
//!
//! Infrastructure implementations of core domain ports.
//!
//! This crate contains:
//! - HTTP transport with timeout and retry
//! - Supabase adapters (PostgREST tables, GoTrue auth, admin accounts)
//! - Session persistence (JSON file, OS keychain)
//! - PDF report rendering
//! - Configuration loading
//!
//! ## Architecture
//! - Implements traits defined in `congregate-core`
//! - Contains all "impure" code (network, filesystem, keychain)

pub mod config;
pub mod errors;
pub mod http;
pub mod report;
pub mod session_store;
pub mod supabase;

// Re-export commonly used items
pub use errors::InfraError;
pub use http::{HttpClient, HttpClientBuilder};
pub use report::PdfReportExporter;
pub use session_store::{
    default_session_path, session_store_from_config, FileSessionStore, KeyringSessionStore,
};
pub use supabase::{
    AccessTokenProvider, SupabaseAuthProvider, SupabaseClient, SupabaseError,
    SupabaseMemberRepository, SupabaseUserDirectory,
};
