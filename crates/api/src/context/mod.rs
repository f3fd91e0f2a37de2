//! Application context - dependency injection container

use std::sync::Arc;

use congregate_core::{
    AuthProvider, Confirmer, MemberRegistry, MemberRepository, Navigator, Notifier,
    PermissionResolver, ReportExporter, SessionGate, UserAdministration, UserDirectory,
};
use congregate_domain::{Config, Result};
use congregate_infra::{
    session_store_from_config, AccessTokenProvider, PdfReportExporter, SupabaseAuthProvider,
    SupabaseClient, SupabaseMemberRepository, SupabaseUserDirectory,
};
use tracing::debug;

use crate::adapters::{ConsoleConfirmer, ConsoleNavigator, ConsoleNotifier};

/// UI collaborators handed to the core services
#[derive(Clone)]
pub struct Feedback {
    pub notifier: Arc<dyn Notifier>,
    pub confirmer: Arc<dyn Confirmer>,
    pub navigator: Arc<dyn Navigator>,
}

impl Feedback {
    /// Terminal collaborators. `assume_yes` answers every confirmation.
    pub fn console(assume_yes: bool) -> Self {
        Self {
            notifier: Arc::new(ConsoleNotifier::new()),
            confirmer: Arc::new(ConsoleConfirmer::new(assume_yes)),
            navigator: Arc::new(ConsoleNavigator::new()),
        }
    }
}

/// Application context - holds all services and dependencies
pub struct AppContext {
    pub config: Config,
    pub auth: Arc<SupabaseAuthProvider>,
    pub gate: SessionGate,
    pub permissions: Arc<PermissionResolver>,
    pub registry: MemberRegistry,
    pub users: UserAdministration,
    pub exporter: Arc<dyn ReportExporter>,
}

impl AppContext {
    /// Context wired to terminal collaborators.
    ///
    /// # Errors
    /// `Config` when the configuration is invalid.
    pub fn new(config: Config, assume_yes: bool) -> Result<Self> {
        Self::with_feedback(config, Feedback::console(assume_yes))
    }

    /// Context with custom UI collaborators.
    ///
    /// # Errors
    /// `Config` when the configuration is invalid.
    pub fn with_feedback(config: Config, feedback: Feedback) -> Result<Self> {
        config.validate()?;

        let client = Arc::new(SupabaseClient::new(&config.supabase)?);
        let store = session_store_from_config(&config.session);
        let auth = Arc::new(SupabaseAuthProvider::new(Arc::clone(&client), store));

        let provider: Arc<dyn AuthProvider> = auth.clone();
        let tokens: Arc<dyn AccessTokenProvider> = auth.clone();

        let repository: Arc<dyn MemberRepository> =
            Arc::new(SupabaseMemberRepository::new(Arc::clone(&client), Arc::clone(&tokens)));
        let directory: Arc<dyn UserDirectory> =
            Arc::new(SupabaseUserDirectory::new(Arc::clone(&client), tokens));

        let Feedback { notifier, confirmer, navigator } = feedback;

        let permissions = Arc::new(
            PermissionResolver::new(Arc::clone(&provider), config.permissions.role_fallback)
                .with_notifier(Arc::clone(&notifier)),
        );
        let registry = MemberRegistry::new(
            repository,
            Arc::clone(&notifier),
            confirmer,
            Arc::clone(&navigator),
        )
        .with_statistics_scope(config.dashboard.statistics_scope);
        let users =
            UserAdministration::new(directory, Arc::clone(&permissions), Arc::clone(&notifier));
        let gate = SessionGate::new(provider, navigator, notifier);

        debug!(
            store = ?config.session.store,
            scope = ?config.dashboard.statistics_scope,
            service_role = client.has_service_role(),
            "application context assembled"
        );

        Ok(Self {
            config,
            auth,
            gate,
            permissions,
            registry,
            users,
            exporter: Arc::new(PdfReportExporter::new()),
        })
    }

    /// Start the session gate and fail unless a session exists.
    ///
    /// # Errors
    /// `Auth` when nobody is signed in.
    pub async fn require_session(&self) -> Result<()> {
        let status = self.gate.start().await;
        debug!(?status, "session checked");
        self.gate.require_authenticated()
    }
}
