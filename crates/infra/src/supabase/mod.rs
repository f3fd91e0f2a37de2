//! Supabase adapters
//!
//! PostgREST for the `members` and `users` tables, GoTrue for auth.

pub mod auth;
pub mod client;
pub mod errors;
pub mod members;
pub mod users;

pub use auth::SupabaseAuthProvider;
pub use client::{AccessTokenProvider, SupabaseClient};
pub use errors::{SupabaseError, SupabaseErrorCategory};
pub use members::{map_rows, MemberRow, RowMappingError, SupabaseMemberRepository};
pub use users::SupabaseUserDirectory;
