//! Recording UI collaborators

use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;
use congregate_core::{Confirmer, Navigator, Notifier};
use congregate_domain::{ConfirmPrompt, Route, Severity};
use parking_lot::Mutex;

#[derive(Clone, Default)]
pub struct RecordingNotifier {
    messages: Arc<Mutex<Vec<(Severity, String)>>>,
}

impl RecordingNotifier {
    pub fn messages(&self) -> Vec<(Severity, String)> {
        self.messages.lock().clone()
    }

    pub fn last(&self) -> Option<(Severity, String)> {
        self.messages.lock().last().cloned()
    }

    pub fn contains(&self, severity: Severity, message: &str) -> bool {
        self.messages.lock().iter().any(|(s, m)| *s == severity && m == message)
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, severity: Severity, message: &str) {
        self.messages.lock().push((severity, message.to_string()));
    }
}

/// Answers prompts from a script; defaults to `default` when exhausted.
#[derive(Clone)]
pub struct ScriptedConfirmer {
    answers: Arc<Mutex<VecDeque<bool>>>,
    default: bool,
    prompts: Arc<Mutex<Vec<ConfirmPrompt>>>,
}

impl ScriptedConfirmer {
    pub fn always(answer: bool) -> Self {
        Self {
            answers: Arc::new(Mutex::new(VecDeque::new())),
            default: answer,
            prompts: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn prompts(&self) -> Vec<ConfirmPrompt> {
        self.prompts.lock().clone()
    }
}

#[async_trait]
impl Confirmer for ScriptedConfirmer {
    async fn confirm(&self, prompt: &ConfirmPrompt) -> bool {
        self.prompts.lock().push(prompt.clone());
        self.answers.lock().pop_front().unwrap_or(self.default)
    }
}

#[derive(Clone, Default)]
pub struct RecordingNavigator {
    routes: Arc<Mutex<Vec<Route>>>,
    backs: Arc<Mutex<usize>>,
}

impl RecordingNavigator {
    pub fn routes(&self) -> Vec<Route> {
        self.routes.lock().clone()
    }

    pub fn last(&self) -> Option<Route> {
        self.routes.lock().last().cloned()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, route: Route) {
        self.routes.lock().push(route);
    }

    fn go_back(&self) {
        *self.backs.lock() += 1;
    }
}
