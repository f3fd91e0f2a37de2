//! Notification, confirmation and navigation values handed to the UI layer

use std::fmt;

use serde::{Deserialize, Serialize};

/// Toast severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Success,
    Error,
    Info,
    Warning,
}

/// Destructive-action confirmation modal
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfirmPrompt {
    pub title: String,
    pub message: String,
    pub confirm_label: String,
    pub cancel_label: String,
}

impl ConfirmPrompt {
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            confirm_label: "Confirmar".to_string(),
            cancel_label: "Cancelar".to_string(),
        }
    }

    pub fn with_labels(mut self, confirm: impl Into<String>, cancel: impl Into<String>) -> Self {
        self.confirm_label = confirm.into();
        self.cancel_label = cancel.into();
        self
    }

    /// Prompt shown before a member is deleted.
    pub fn delete_member(name: &str) -> Self {
        Self::new(
            "Confirmar Exclusão",
            format!(
                "Deseja realmente excluir o membro \"{name}\"? Esta ação não pode ser desfeita."
            ),
        )
        .with_labels("Excluir", "Cancelar")
    }
}

/// Navigation targets
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Route {
    Login,
    Dashboard,
    Members,
    AddMember,
    EditMember(String),
    ViewMember(String),
    Users,
}

impl Route {
    pub fn path(&self) -> String {
        match self {
            Self::Login => "/login".to_string(),
            Self::Dashboard => "/app/home".to_string(),
            Self::Members => "/app/members".to_string(),
            Self::AddMember => "/app/add".to_string(),
            Self::EditMember(id) => format!("/app/edit/{id}"),
            Self::ViewMember(id) => format!("/app/view/{id}"),
            Self::Users => "/app/users".to_string(),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}
