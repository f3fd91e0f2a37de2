//! UI collaborators injected into services
//!
//! Core code calls these to surface outcomes; it never renders anything.

use async_trait::async_trait;
use congregate_domain::{ConfirmPrompt, Route, Severity};

/// Transient toast/alert surface
pub trait Notifier: Send + Sync {
    fn notify(&self, severity: Severity, message: &str);
}

/// Confirm/cancel modal
#[async_trait]
pub trait Confirmer: Send + Sync {
    /// `true` when the user chose the confirm action.
    async fn confirm(&self, prompt: &ConfirmPrompt) -> bool;
}

/// Opaque navigation side effects
pub trait Navigator: Send + Sync {
    fn navigate(&self, route: Route);
    fn go_back(&self);
}
