//! Port interfaces for the member store
//!
//! The store is the sole owner of member records. Implementations map
//! loosely typed remote rows into `Member` at this boundary.

use async_trait::async_trait;
use congregate_domain::{Member, MemberDraft, Result};

/// Remote `members` collection
#[async_trait]
pub trait MemberRepository: Send + Sync {
    /// Every member ordered by full name ascending.
    async fn list_all(&self) -> Result<Vec<Member>>;

    /// Single member by identifier; `NotFound` when absent.
    async fn get(&self, id: &str) -> Result<Member>;

    /// Insert a member. The store assigns `id` and `created_at`.
    async fn create(&self, draft: &MemberDraft) -> Result<Member>;

    /// Patch a member and stamp `updated_at`; `NotFound` when absent.
    async fn update(&self, id: &str, draft: &MemberDraft) -> Result<Member>;

    /// Irreversibly remove a member; `NotFound` when absent.
    async fn delete(&self, id: &str) -> Result<()>;
}
