//! GoTrue-backed authentication provider
//!
//! Password sign-in, refresh-token rotation, user lookup and logout. The
//! session lives in memory and in a [`SessionStore`]; every state change is
//! published on the provider's [`AuthEventBus`].

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use congregate_core::{AuthEventBus, AuthProvider, AuthSubscription, SessionStore};
use congregate_domain::constants::TOKEN_REFRESH_THRESHOLD_SECS;
use congregate_domain::{AuthEvent, AuthUser, CongregateError, Result, Role, Session};
use parking_lot::RwLock;
use reqwest::Method;
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, info, instrument, warn};

use super::client::{AccessTokenProvider, SupabaseClient};
use super::errors::{SupabaseError, SupabaseErrorCategory};

const DEFAULT_TOKEN_LIFETIME_SECS: i64 = 3600;

/// User object returned by GoTrue
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct GoTrueUser {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub user_metadata: Option<serde_json::Value>,
}

impl GoTrueUser {
    fn role(&self) -> Option<Role> {
        self.user_metadata
            .as_ref()
            .and_then(|meta| meta.get("role"))
            .and_then(serde_json::Value::as_str)
            .filter(|raw| !raw.trim().is_empty())
            .map(Role::parse)
    }
}

impl From<GoTrueUser> for AuthUser {
    fn from(user: GoTrueUser) -> Self {
        let role = user.role();
        Self { id: user.id, email: user.email, role }
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    refresh_token: String,
    #[serde(default)]
    expires_in: Option<i64>,
    #[serde(default)]
    expires_at: Option<i64>,
    user: GoTrueUser,
}

impl TokenResponse {
    fn into_session(self, now: DateTime<Utc>) -> Session {
        let expires_at = self
            .expires_at
            .and_then(|secs| DateTime::from_timestamp(secs, 0))
            .unwrap_or_else(|| {
                now + Duration::seconds(self.expires_in.unwrap_or(DEFAULT_TOKEN_LIFETIME_SECS))
            });
        Session {
            access_token: self.access_token,
            refresh_token: self.refresh_token,
            expires_at,
            user: self.user.into(),
        }
    }
}

/// Supabase auth adapter
pub struct SupabaseAuthProvider {
    client: Arc<SupabaseClient>,
    store: Arc<dyn SessionStore>,
    bus: AuthEventBus,
    current: RwLock<Option<Session>>,
    loaded: RwLock<bool>,
    refresh_lock: tokio::sync::Mutex<()>,
}

impl SupabaseAuthProvider {
    pub fn new(client: Arc<SupabaseClient>, store: Arc<dyn SessionStore>) -> Self {
        Self {
            client,
            store,
            bus: AuthEventBus::default(),
            current: RwLock::new(None),
            loaded: RwLock::new(false),
            refresh_lock: tokio::sync::Mutex::new(()),
        }
    }

    pub fn bus(&self) -> &AuthEventBus {
        &self.bus
    }

    /// Cached session, reading the store on first use.
    fn cached_session(&self) -> Result<Option<Session>> {
        if !*self.loaded.read() {
            let stored = self.store.load()?;
            *self.current.write() = stored;
            *self.loaded.write() = true;
        }
        Ok(self.current.read().clone())
    }

    fn remember(&self, session: &Session) {
        if let Err(err) = self.store.save(session) {
            warn!(error = %err, "could not persist session");
        }
        *self.current.write() = Some(session.clone());
        *self.loaded.write() = true;
    }

    fn forget(&self) {
        if let Err(err) = self.store.clear() {
            warn!(error = %err, "could not clear stored session");
        }
        *self.current.write() = None;
        *self.loaded.write() = true;
    }

    async fn token_grant(
        &self,
        grant_type: &str,
        body: serde_json::Value,
    ) -> std::result::Result<Session, SupabaseError> {
        let url = self.client.auth_url("token", &[("grant_type", grant_type)])?;
        let response: TokenResponse =
            self.client.send_json(self.client.request(Method::POST, url, None).json(&body)).await?;
        Ok(response.into_session(Utc::now()))
    }

    /// Rotate the refresh token.
    ///
    /// A rejected refresh ends the session and publishes `SIGNED_OUT`. A
    /// transport failure keeps the stored session and is returned.
    #[instrument(skip(self, session), fields(user_id = %session.user.id))]
    async fn refresh(&self, session: &Session) -> Result<Option<Session>> {
        let _guard = self.refresh_lock.lock().await;

        // Another caller may have refreshed while we waited.
        let current = self.current.read().clone();
        if let Some(current) = current {
            if current.access_token != session.access_token
                && !current.expires_within(Utc::now(), TOKEN_REFRESH_THRESHOLD_SECS)
            {
                return Ok(Some(current));
            }
        }

        match self
            .token_grant("refresh_token", json!({ "refresh_token": session.refresh_token }))
            .await
        {
            Ok(fresh) => {
                self.remember(&fresh);
                self.bus.publish(AuthEvent::token_refreshed(fresh.clone()));
                info!("access token refreshed");
                Ok(Some(fresh))
            }
            Err(err) if err.is_transient() => {
                warn!(error = %err, "token refresh unavailable");
                Err(err.into())
            }
            Err(err) => {
                warn!(error = %err, "token refresh rejected, signing out");
                self.forget();
                self.bus.publish(AuthEvent::signed_out());
                Ok(None)
            }
        }
    }
}

#[async_trait]
impl AuthProvider for SupabaseAuthProvider {
    async fn get_session(&self) -> Result<Option<Session>> {
        let Some(session) = self.cached_session()? else {
            return Ok(None);
        };
        if session.expires_within(Utc::now(), TOKEN_REFRESH_THRESHOLD_SECS) {
            debug!("session near expiry, refreshing");
            return self.refresh(&session).await;
        }
        Ok(Some(session))
    }

    #[instrument(skip(self))]
    async fn get_user(&self) -> Result<Option<AuthUser>> {
        let Some(session) = self.get_session().await? else {
            return Ok(None);
        };

        let url = self.client.auth_url("user", &[]).map_err(CongregateError::from)?;
        let request = self.client.request(Method::GET, url, Some(&session.access_token));
        match self.client.send_json::<GoTrueUser>(request).await {
            Ok(user) => {
                let user = AuthUser::from(user);
                let mut updated = session;
                updated.user = user.clone();
                *self.current.write() = Some(updated);
                Ok(Some(user))
            }
            Err(err) if err.category() == SupabaseErrorCategory::Authentication => {
                warn!(error = %err, "access token rejected, signing out");
                self.forget();
                self.bus.publish(AuthEvent::signed_out());
                Ok(None)
            }
            Err(err) => Err(err.into()),
        }
    }

    #[instrument(skip(self, email, password))]
    async fn sign_in_with_password(&self, email: &str, password: &str) -> Result<Session> {
        let session = self
            .token_grant("password", json!({ "email": email, "password": password }))
            .await
            .map_err(|err| match err.category() {
                SupabaseErrorCategory::Client | SupabaseErrorCategory::Authentication => {
                    CongregateError::Auth(err.to_string())
                }
                _ => CongregateError::from(err),
            })?;

        self.remember(&session);
        self.bus.publish(AuthEvent::signed_in(session.clone()));
        info!(user_id = %session.user.id, "password sign-in accepted");
        Ok(session)
    }

    #[instrument(skip(self))]
    async fn sign_out(&self) -> Result<()> {
        let remote = match self.cached_session() {
            Ok(Some(session)) => {
                let result = match self.client.auth_url("logout", &[]) {
                    Ok(url) => {
                        self.client
                            .send_empty(self.client.request(
                                Method::POST,
                                url,
                                Some(&session.access_token),
                            ))
                            .await
                    }
                    Err(err) => Err(err),
                };
                result.map_err(CongregateError::from)
            }
            Ok(None) => Ok(()),
            Err(err) => {
                warn!(error = %err, "stored session unreadable during sign-out");
                Ok(())
            }
        };

        self.forget();
        self.bus.publish(AuthEvent::signed_out());
        remote
    }

    fn on_auth_state_change(&self) -> AuthSubscription {
        self.bus.subscribe()
    }
}

#[async_trait]
impl AccessTokenProvider for SupabaseAuthProvider {
    async fn access_token(&self) -> Result<Option<String>> {
        Ok(self.get_session().await?.map(|session| session.access_token))
    }
}
