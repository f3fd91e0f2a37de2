//! Role-derived capabilities
//!
//! Every call re-reads the current user from the auth provider; nothing is
//! cached.

use std::sync::Arc;

use congregate_domain::{
    AuthUser, Capabilities, CongregateError, Result, Role, RoleFallback, Severity,
};
use tracing::warn;

use super::ports::AuthProvider;
use crate::feedback_ports::Notifier;

const LIMITED_ACCESS_MESSAGE: &str =
    "Acesso limitado - algumas funcionalidades podem estar restritas";

/// Effective role for a user under the configured fallback.
pub fn resolve_role(user: Option<&AuthUser>, fallback: RoleFallback) -> Option<Role> {
    let user = user?;
    match (&user.role, fallback) {
        (Some(role), _) => Some(role.clone()),
        (None, RoleFallback::User) => Some(Role::User),
        (None, RoleFallback::None) => None,
    }
}

/// Capabilities granted to a role. No role grants nothing.
pub fn capabilities_for(role: Option<&Role>) -> Capabilities {
    match role {
        Some(Role::SuperAdmin) => Capabilities { can_manage_members: true, can_manage_users: true },
        Some(Role::Admin | Role::User) => {
            Capabilities { can_manage_members: true, can_manage_users: false }
        }
        Some(Role::Other(_)) | None => Capabilities::NONE,
    }
}

/// Reads the current role and maps it to capabilities
pub struct PermissionResolver {
    provider: Arc<dyn AuthProvider>,
    fallback: RoleFallback,
    notifier: Option<Arc<dyn Notifier>>,
}

impl PermissionResolver {
    pub fn new(provider: Arc<dyn AuthProvider>, fallback: RoleFallback) -> Self {
        Self { provider, fallback, notifier: None }
    }

    /// Warn through `notifier` when access is limited.
    pub fn with_notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    pub fn fallback(&self) -> RoleFallback {
        self.fallback
    }

    /// Current role; provider failures count as no user.
    pub async fn role(&self) -> Option<Role> {
        match self.provider.get_user().await {
            Ok(user) => resolve_role(user.as_ref(), self.fallback),
            Err(err) => {
                warn!(error = %err, "failed to read current user, treating as signed out");
                None
            }
        }
    }

    pub async fn capabilities(&self) -> Capabilities {
        capabilities_for(self.role().await.as_ref())
    }

    pub async fn can_manage_members(&self) -> bool {
        self.capabilities().await.can_manage_members
    }

    pub async fn can_manage_users(&self) -> bool {
        self.capabilities().await.can_manage_users
    }

    /// Dashboard-entry check: returns whether members may be managed and
    /// shows a warning when they may not. Never blocks.
    pub async fn check_member_access(&self) -> bool {
        let permitted = self.can_manage_members().await;
        if !permitted {
            if let Some(notifier) = &self.notifier {
                notifier.notify(Severity::Warning, LIMITED_ACCESS_MESSAGE);
            }
        }
        permitted
    }

    /// # Errors
    /// `PermissionDenied` unless the current role may manage members.
    pub async fn require_member_management(&self) -> Result<()> {
        if self.can_manage_members().await {
            Ok(())
        } else {
            Err(CongregateError::PermissionDenied(
                "member management requires a signed-in role".to_string(),
            ))
        }
    }

    /// # Errors
    /// `PermissionDenied` unless the current role is `super_admin`.
    pub async fn require_user_management(&self) -> Result<()> {
        if self.can_manage_users().await {
            Ok(())
        } else {
            Err(CongregateError::PermissionDenied(
                "user management requires the super_admin role".to_string(),
            ))
        }
    }
}
