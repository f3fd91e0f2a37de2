//! Terminal implementations of the UI collaborator ports.
//!
//! Toasts go to stderr so command output on stdout stays pipeable. The
//! navigator has no screens to switch; it remembers the last route so the
//! caller can react to redirects (for example, to the login screen).

#![allow(clippy::print_stderr)]

use std::io::{BufRead, Write};

use async_trait::async_trait;
use congregate_core::{Confirmer, Navigator, Notifier};
use congregate_domain::{ConfirmPrompt, Route, Severity};
use parking_lot::Mutex;
use tracing::{debug, warn};

/// Prints notifications to stderr.
#[derive(Debug, Default)]
pub struct ConsoleNotifier;

impl ConsoleNotifier {
    pub fn new() -> Self {
        Self
    }
}

fn severity_tag(severity: Severity) -> &'static str {
    match severity {
        Severity::Success => "ok",
        Severity::Error => "erro",
        Severity::Info => "info",
        Severity::Warning => "aviso",
    }
}

impl Notifier for ConsoleNotifier {
    fn notify(&self, severity: Severity, message: &str) {
        eprintln!("[{}] {message}", severity_tag(severity));
    }
}

/// Asks on stdin, or answers yes without asking when `assume_yes` is set.
#[derive(Debug, Default)]
pub struct ConsoleConfirmer {
    assume_yes: bool,
}

impl ConsoleConfirmer {
    pub fn new(assume_yes: bool) -> Self {
        Self { assume_yes }
    }
}

/// Accepts `s`, `sim`, `y` and `yes`, case-insensitively.
pub fn is_affirmative(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "s" | "sim" | "y" | "yes")
}

#[async_trait]
impl Confirmer for ConsoleConfirmer {
    async fn confirm(&self, prompt: &ConfirmPrompt) -> bool {
        if self.assume_yes {
            debug!(title = %prompt.title, "confirmation skipped");
            return true;
        }

        let question = format!(
            "{}\n{}\n[{} = s / {} = n]: ",
            prompt.title, prompt.message, prompt.confirm_label, prompt.cancel_label
        );
        let answer = tokio::task::spawn_blocking(move || {
            let mut stderr = std::io::stderr();
            let _ = stderr.write_all(question.as_bytes());
            let _ = stderr.flush();
            let mut line = String::new();
            std::io::stdin().lock().read_line(&mut line).map(|_| line)
        })
        .await;

        match answer {
            Ok(Ok(line)) => is_affirmative(&line),
            Ok(Err(err)) => {
                warn!(error = %err, "could not read confirmation, treating as cancel");
                false
            }
            Err(err) => {
                warn!(error = %err, "confirmation task failed, treating as cancel");
                false
            }
        }
    }
}

/// Records navigation requests.
#[derive(Debug, Default)]
pub struct ConsoleNavigator {
    history: Mutex<Vec<Route>>,
}

impl ConsoleNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Most recent route, if any.
    pub fn current(&self) -> Option<Route> {
        self.history.lock().last().cloned()
    }
}

impl Navigator for ConsoleNavigator {
    fn navigate(&self, route: Route) {
        debug!(route = %route, "navigate");
        self.history.lock().push(route);
    }

    fn go_back(&self) {
        let mut history = self.history.lock();
        history.pop();
        debug!(route = ?history.last(), "navigate back");
    }
}
