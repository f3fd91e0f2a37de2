//! User administration service

use std::sync::Arc;

use congregate_domain::{AssignableRole, CongregateError, Result, Severity, UserAccount};
use tracing::{error, info, instrument};

use super::ports::UserDirectory;
use crate::feedback_ports::Notifier;
use crate::session::PermissionResolver;

const LIST_FAILED: &str = "Erro ao carregar usuários";
const CREATED: &str = "Usuário criado com sucesso!";
const CREATE_FAILED: &str = "Erro ao criar usuário";
const MISSING_FIELDS: &str = "Por favor, preencha todos os campos";
const MIN_PASSWORD_LEN: usize = 6;

/// Account management, restricted to `super_admin`
pub struct UserAdministration {
    directory: Arc<dyn UserDirectory>,
    permissions: Arc<PermissionResolver>,
    notifier: Arc<dyn Notifier>,
}

impl UserAdministration {
    pub fn new(
        directory: Arc<dyn UserDirectory>,
        permissions: Arc<PermissionResolver>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self { directory, permissions, notifier }
    }

    /// # Errors
    /// `PermissionDenied` or the directory error.
    #[instrument(skip(self))]
    pub async fn list_users(&self) -> Result<Vec<UserAccount>> {
        self.permissions.require_user_management().await?;
        self.directory.list_users().await.map_err(|err| {
            error!(error = %err, "failed to list users");
            self.notifier.notify(Severity::Error, LIST_FAILED);
            err
        })
    }

    /// # Errors
    /// `PermissionDenied`, `Validation` for blank email or a short password,
    /// or the directory error.
    #[instrument(skip(self, password))]
    pub async fn create_user(
        &self,
        email: &str,
        password: &str,
        role: AssignableRole,
    ) -> Result<UserAccount> {
        self.permissions.require_user_management().await?;

        let email = email.trim();
        if email.is_empty() || password.is_empty() {
            self.notifier.notify(Severity::Warning, MISSING_FIELDS);
            return Err(CongregateError::Validation(MISSING_FIELDS.to_string()));
        }
        if password.chars().count() < MIN_PASSWORD_LEN {
            let message = format!("A senha deve ter pelo menos {MIN_PASSWORD_LEN} caracteres");
            self.notifier.notify(Severity::Warning, &message);
            return Err(CongregateError::Validation(message));
        }

        match self.directory.create_user(email, password, role).await {
            Ok(account) => {
                info!(user_id = %account.id, role = %account.role, "user created");
                self.notifier.notify(Severity::Success, CREATED);
                Ok(account)
            }
            Err(err) => {
                error!(error = %err, "failed to create user");
                self.notifier.notify(Severity::Error, CREATE_FAILED);
                Err(err)
            }
        }
    }
}
