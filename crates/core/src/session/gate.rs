//! Session gate
//!
//! Tracks whether a signed-in session exists and routes to the login screen
//! when it does not. Status moves `Loading` → `Authenticated` |
//! `Unauthenticated` and then follows provider events.
//!
//! The gate owns exactly one provider subscription, held by a background
//! task between [`SessionGate::start`] and [`SessionGate::shutdown`] (or
//! drop). Calling `start` again while listening is a no-op.

use std::sync::Arc;

use congregate_domain::{
    AuthEvent, AuthEventKind, AuthStatus, CongregateError, Result, Route, Session, Severity,
};
use parking_lot::Mutex;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info, instrument, warn};

use super::ports::AuthProvider;
use crate::feedback_ports::{Navigator, Notifier};

const MISSING_FIELDS_MESSAGE: &str = "Por favor, preencha todos os campos";
const INVALID_CREDENTIALS_MESSAGE: &str = "Email ou senha inválidos";
const SIGNED_IN_MESSAGE: &str = "Login realizado com sucesso!";

/// Authentication gate for every protected screen
pub struct SessionGate {
    provider: Arc<dyn AuthProvider>,
    navigator: Arc<dyn Navigator>,
    notifier: Arc<dyn Notifier>,
    status: Arc<watch::Sender<AuthStatus>>,
    listener: Mutex<Option<JoinHandle<()>>>,
}

impl SessionGate {
    pub fn new(
        provider: Arc<dyn AuthProvider>,
        navigator: Arc<dyn Navigator>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        let (status, _) = watch::channel(AuthStatus::Loading);
        Self { provider, navigator, notifier, status: Arc::new(status), listener: Mutex::new(None) }
    }

    /// Subscribe to provider events, then query the existing session once.
    ///
    /// Provider errors resolve to `Unauthenticated`.
    #[instrument(skip(self))]
    pub async fn start(&self) -> AuthStatus {
        self.ensure_listening();

        let initial = match self.provider.get_session().await {
            Ok(Some(_)) => AuthStatus::Authenticated,
            Ok(None) => AuthStatus::Unauthenticated,
            Err(err) => {
                warn!(error = %err, "session lookup failed, failing closed");
                AuthStatus::Unauthenticated
            }
        };

        // An event may have landed while the lookup was in flight; it wins.
        let applied = self.status.send_if_modified(|current| {
            if *current == AuthStatus::Loading {
                *current = initial;
                true
            } else {
                false
            }
        });
        let status = self.status();
        if applied && status == AuthStatus::Unauthenticated {
            self.navigator.navigate(Route::Login);
        }
        info!(?status, "session gate started");
        status
    }

    fn ensure_listening(&self) {
        let mut listener = self.listener.lock();
        if listener.as_ref().is_some_and(|handle| !handle.is_finished()) {
            return;
        }
        let mut subscription = self.provider.on_auth_state_change();
        let status = Arc::clone(&self.status);
        let navigator = Arc::clone(&self.navigator);
        *listener = Some(tokio::spawn(async move {
            while let Some(event) = subscription.recv().await {
                apply_event(&status, navigator.as_ref(), &event);
            }
            debug!("auth event stream closed");
        }));
    }

    /// Current status.
    pub fn status(&self) -> AuthStatus {
        *self.status.borrow()
    }

    /// Receiver for status changes.
    pub fn watch(&self) -> watch::Receiver<AuthStatus> {
        self.status.subscribe()
    }

    /// Wait until the status leaves `Loading`.
    pub async fn ready(&self) -> AuthStatus {
        let mut rx = self.watch();
        let status = match rx.wait_for(|s| *s != AuthStatus::Loading).await {
            Ok(status) => *status,
            Err(_) => AuthStatus::Unauthenticated,
        };
        status
    }

    pub fn is_listening(&self) -> bool {
        self.listener.lock().as_ref().is_some_and(|handle| !handle.is_finished())
    }

    /// Release the provider subscription.
    pub fn shutdown(&self) {
        if let Some(handle) = self.listener.lock().take() {
            handle.abort();
            debug!("session gate listener released");
        }
    }

    /// # Errors
    /// `Auth` unless the gate currently reports `Authenticated`.
    pub fn require_authenticated(&self) -> Result<()> {
        match self.status() {
            AuthStatus::Authenticated => Ok(()),
            AuthStatus::Loading | AuthStatus::Unauthenticated => {
                Err(CongregateError::Auth("not signed in".to_string()))
            }
        }
    }

    /// Password sign-in.
    ///
    /// # Errors
    /// `Validation` for blank fields, `Auth` when the provider rejects the
    /// credentials.
    #[instrument(skip(self, email, password))]
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<Session> {
        let email = email.trim();
        let password = password.trim();
        if email.is_empty() || password.is_empty() {
            self.notifier.notify(Severity::Error, MISSING_FIELDS_MESSAGE);
            return Err(CongregateError::Validation(MISSING_FIELDS_MESSAGE.to_string()));
        }

        match self.provider.sign_in_with_password(email, password).await {
            Ok(session) => {
                self.status.send_replace(AuthStatus::Authenticated);
                self.notifier.notify(Severity::Success, SIGNED_IN_MESSAGE);
                self.navigator.navigate(Route::Dashboard);
                info!(user_id = %session.user.id, "signed in");
                Ok(session)
            }
            Err(err) => {
                warn!(error = %err, "sign-in rejected");
                self.notifier.notify(Severity::Error, INVALID_CREDENTIALS_MESSAGE);
                Err(CongregateError::Auth(INVALID_CREDENTIALS_MESSAGE.to_string()))
            }
        }
    }

    /// Sign out and route to login. The gate ends `Unauthenticated` even if
    /// the provider call fails.
    ///
    /// # Errors
    /// Propagates the provider failure after the local state is cleared.
    #[instrument(skip(self))]
    pub async fn sign_out(&self) -> Result<()> {
        let result = self.provider.sign_out().await;
        self.status.send_replace(AuthStatus::Unauthenticated);
        self.navigator.navigate(Route::Login);
        if let Err(err) = &result {
            warn!(error = %err, "provider sign-out failed");
        } else {
            info!("signed out");
        }
        result
    }
}

impl Drop for SessionGate {
    fn drop(&mut self) {
        if let Some(handle) = self.listener.get_mut().take() {
            handle.abort();
        }
    }
}

fn apply_event(status: &watch::Sender<AuthStatus>, navigator: &dyn Navigator, event: &AuthEvent) {
    let next = match event.kind {
        AuthEventKind::SignedIn | AuthEventKind::TokenRefreshed => {
            if event.session.is_some() {
                AuthStatus::Authenticated
            } else {
                AuthStatus::Unauthenticated
            }
        }
        AuthEventKind::SignedOut => AuthStatus::Unauthenticated,
    };
    debug!(kind = ?event.kind, ?next, "auth event applied");
    status.send_replace(next);
    if next == AuthStatus::Unauthenticated {
        navigator.navigate(Route::Login);
    }
}
