//! Port interfaces for authentication

use async_trait::async_trait;
use congregate_domain::{AuthUser, Result, Session};

use super::events::AuthSubscription;

/// Hosted authentication provider
#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// Current session, refreshed first when close to expiry.
    async fn get_session(&self) -> Result<Option<Session>>;

    /// User behind the current session.
    async fn get_user(&self) -> Result<Option<AuthUser>>;

    /// Password grant. Publishes `SIGNED_IN` on success.
    async fn sign_in_with_password(&self, email: &str, password: &str) -> Result<Session>;

    /// End the session. Publishes `SIGNED_OUT`.
    async fn sign_out(&self) -> Result<()>;

    /// Subscribe to auth state changes. Dropping the handle unsubscribes.
    fn on_auth_state_change(&self) -> AuthSubscription;
}

/// Local persistence for the provider session
pub trait SessionStore: Send + Sync {
    fn load(&self) -> Result<Option<Session>>;
    fn save(&self, session: &Session) -> Result<()>;
    fn clear(&self) -> Result<()>;
}
