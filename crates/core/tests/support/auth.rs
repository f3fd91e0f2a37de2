//! Scriptable auth provider and user directory

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Duration, Utc};
use congregate_core::{AuthEventBus, AuthProvider, AuthSubscription, UserDirectory};
use congregate_domain::{
    AssignableRole, AuthEvent, AuthUser, CongregateError, Result as DomainResult, Role, Session,
    UserAccount,
};
use parking_lot::Mutex;

pub fn session_for(role: Option<&str>) -> Session {
    Session {
        access_token: "access".to_string(),
        refresh_token: "refresh".to_string(),
        expires_at: Utc::now() + Duration::hours(1),
        user: AuthUser {
            id: "user-1".to_string(),
            email: Some("ana@example.com".to_string()),
            role: role.map(Role::parse),
        },
    }
}

/// In-memory `AuthProvider` that publishes on its own bus.
#[derive(Clone, Default)]
pub struct MockAuthProvider {
    session: Arc<Mutex<Option<Session>>>,
    fail_lookup: Arc<Mutex<bool>>,
    password: Arc<Mutex<Option<String>>>,
    bus: AuthEventBus,
}

impl MockAuthProvider {
    pub fn signed_out() -> Self {
        Self::default()
    }

    pub fn signed_in(role: Option<&str>) -> Self {
        let provider = Self::default();
        *provider.session.lock() = Some(session_for(role));
        provider
    }

    /// Session and user lookups fail.
    pub fn failing() -> Self {
        let provider = Self::default();
        *provider.fail_lookup.lock() = true;
        provider
    }

    /// Accept this password on sign-in.
    pub fn with_password(self, password: &str) -> Self {
        *self.password.lock() = Some(password.to_string());
        self
    }

    pub fn bus(&self) -> &AuthEventBus {
        &self.bus
    }

    pub fn listener_count(&self) -> usize {
        self.bus.listener_count()
    }

    /// Simulate a provider-side event.
    pub fn emit(&self, event: AuthEvent) {
        *self.session.lock() = event.session.clone();
        self.bus.publish(event);
    }

    fn lookup_error() -> CongregateError {
        CongregateError::Remote("auth service unavailable".to_string())
    }
}

#[async_trait]
impl AuthProvider for MockAuthProvider {
    async fn get_session(&self) -> DomainResult<Option<Session>> {
        if *self.fail_lookup.lock() {
            return Err(Self::lookup_error());
        }
        Ok(self.session.lock().clone())
    }

    async fn get_user(&self) -> DomainResult<Option<AuthUser>> {
        if *self.fail_lookup.lock() {
            return Err(Self::lookup_error());
        }
        Ok(self.session.lock().as_ref().map(|s| s.user.clone()))
    }

    async fn sign_in_with_password(&self, email: &str, password: &str) -> DomainResult<Session> {
        let expected = self.password.lock().clone();
        if expected.as_deref() != Some(password) {
            return Err(CongregateError::Auth("Invalid login credentials".to_string()));
        }
        let mut session = session_for(Some("user"));
        session.user.email = Some(email.to_string());
        self.emit(AuthEvent::signed_in(session.clone()));
        Ok(session)
    }

    async fn sign_out(&self) -> DomainResult<()> {
        self.emit(AuthEvent::signed_out());
        Ok(())
    }

    fn on_auth_state_change(&self) -> AuthSubscription {
        self.bus.subscribe()
    }
}

/// In-memory `UserDirectory`.
#[derive(Clone, Default)]
pub struct InMemoryUserDirectory {
    accounts: Arc<Mutex<Vec<UserAccount>>>,
}

impl InMemoryUserDirectory {
    pub fn accounts(&self) -> Vec<UserAccount> {
        self.accounts.lock().clone()
    }
}

#[async_trait]
impl UserDirectory for InMemoryUserDirectory {
    async fn list_users(&self) -> DomainResult<Vec<UserAccount>> {
        let mut accounts = self.accounts.lock().clone();
        accounts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(accounts)
    }

    async fn create_user(
        &self,
        email: &str,
        _password: &str,
        role: AssignableRole,
    ) -> DomainResult<UserAccount> {
        let mut accounts = self.accounts.lock();
        let account = UserAccount {
            id: format!("user-{}", accounts.len() + 1),
            email: email.to_string(),
            role: role.as_role(),
            created_at: Utc::now() + Duration::seconds(accounts.len() as i64),
        };
        accounts.push(account.clone());
        Ok(account)
    }
}
