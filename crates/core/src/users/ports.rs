//! Port interface for the `users` collection

use async_trait::async_trait;
use congregate_domain::{AssignableRole, Result, UserAccount};

/// Application user accounts
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Every account, newest first.
    async fn list_users(&self) -> Result<Vec<UserAccount>>;

    /// Create the auth account carrying `role` in its metadata, then record
    /// it in the `users` collection.
    async fn create_user(
        &self,
        email: &str,
        password: &str,
        role: AssignableRole,
    ) -> Result<UserAccount>;
}
