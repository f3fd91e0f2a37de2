//! Shared harness for CLI integration tests.
//!
//! Each test gets a mock Supabase server, a private session file and
//! recording UI collaborators.

#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Duration, Utc};
use clap::Parser;
use congregate_core::{Confirmer, Navigator, Notifier, SessionStore};
use congregate_domain::{
    AuthUser, Config, ConfirmPrompt, Result, Role, Route, Session, SessionStoreKind, Severity,
};
use congregate_infra::FileSessionStore;
use congregate_lib::{AppContext, Cli, Feedback};
use parking_lot::Mutex;
use serde_json::{json, Value};
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[derive(Default)]
pub struct RecordingNotifier {
    pub messages: Mutex<Vec<(Severity, String)>>,
}

impl RecordingNotifier {
    pub fn contains(&self, severity: Severity, message: &str) -> bool {
        self.messages.lock().iter().any(|(s, m)| *s == severity && m == message)
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, severity: Severity, message: &str) {
        self.messages.lock().push((severity, message.to_string()));
    }
}

/// Answers every prompt with a fixed choice.
pub struct ScriptedConfirmer {
    answer: bool,
    pub asked: AtomicUsize,
}

impl ScriptedConfirmer {
    pub fn answering(answer: bool) -> Self {
        Self { answer, asked: AtomicUsize::new(0) }
    }

    pub fn times_asked(&self) -> usize {
        self.asked.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Confirmer for ScriptedConfirmer {
    async fn confirm(&self, _prompt: &ConfirmPrompt) -> bool {
        self.asked.fetch_add(1, Ordering::SeqCst);
        self.answer
    }
}

#[derive(Default)]
pub struct RecordingNavigator {
    pub routes: Mutex<Vec<Route>>,
}

impl RecordingNavigator {
    pub fn last(&self) -> Option<Route> {
        self.routes.lock().last().cloned()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, route: Route) {
        self.routes.lock().push(route);
    }

    fn go_back(&self) {
        self.routes.lock().pop();
    }
}

pub struct TestApp {
    pub server: MockServer,
    pub ctx: AppContext,
    pub notifier: Arc<RecordingNotifier>,
    pub confirmer: Arc<ScriptedConfirmer>,
    pub navigator: Arc<RecordingNavigator>,
    pub dir: TempDir,
}

impl TestApp {
    pub async fn start() -> Self {
        Self::start_with(true, |_| {}).await
    }

    /// Build with a fixed confirmation answer and config tweaks.
    pub async fn start_with(confirm: bool, tweak: impl FnOnce(&mut Config)) -> Self {
        let server = MockServer::start().await;
        let dir = TempDir::new().expect("temp dir");

        let mut config = Config::new(server.uri(), "anon-key");
        config.supabase.service_role_key = Some("service-key".to_string());
        config.session.store = SessionStoreKind::File;
        config.session.path = Some(dir.path().join("session.json"));
        tweak(&mut config);

        let notifier = Arc::new(RecordingNotifier::default());
        let confirmer = Arc::new(ScriptedConfirmer::answering(confirm));
        let navigator = Arc::new(RecordingNavigator::default());
        let feedback = Feedback {
            notifier: notifier.clone(),
            confirmer: confirmer.clone(),
            navigator: navigator.clone(),
        };
        let ctx = AppContext::with_feedback(config, feedback).expect("context");

        Self { server, ctx, notifier, confirmer, navigator, dir }
    }

    pub fn session_path(&self) -> PathBuf {
        self.dir.path().join("session.json")
    }

    /// Store a valid session for `role` and answer `/auth/v1/user` with it.
    pub async fn signed_in_as(&self, role: &str) {
        let session = Session {
            access_token: "user-token".to_string(),
            refresh_token: "user-refresh".to_string(),
            expires_at: Utc::now() + Duration::hours(1),
            user: AuthUser {
                id: "user-1".to_string(),
                email: Some("ana@example.com".to_string()),
                role: Some(Role::parse(role)),
            },
        };
        FileSessionStore::new(self.session_path()).save(&session).expect("seed session");

        Mock::given(method("GET"))
            .and(path("/auth/v1/user"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "user-1",
                "email": "ana@example.com",
                "user_metadata": { "role": role }
            })))
            .mount(&self.server)
            .await;
    }

    /// Parse `args` as a command line and run it.
    pub async fn run(&self, args: &[&str]) -> Result<String> {
        let cli = Cli::try_parse_from(std::iter::once("congregate").chain(args.iter().copied()))
            .expect("valid command line");
        cli.execute(&self.ctx).await
    }
}

pub fn member_row(id: &str, name: &str, gender: &str, region: &str, parish: &str) -> Value {
    json!({
        "id": id,
        "nome_completo": name,
        "data_nascimento": "1990-04-12",
        "genero": gender,
        "regiao": region,
        "paroquia": parish,
        "funcao": "Membro Normal",
        "estado": "Batizado",
        "sociedade": "Jovens",
        "telefone": null,
        "email": null,
        "endereco": null,
        "created_at": "2024-01-02T10:00:00+00:00",
        "updated_at": null
    })
}

pub fn registry_rows() -> Value {
    json!([
        member_row("1", "Ana Souza", "Feminino", "ESTE", "Munhava"),
        member_row("2", "Bruno Lima", "Masculino", "OESTE", "Tete"),
        member_row("3", "Álvaro Mendes", "Masculino", "ESTE", "Esturo"),
    ])
}
