//! `users` table and GoTrue admin accounts

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use congregate_core::UserDirectory;
use congregate_domain::constants::USERS_TABLE;
use congregate_domain::utils::dates::parse_timestamp;
use congregate_domain::{AssignableRole, CongregateError, Result, Role, UserAccount};
use reqwest::Method;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{error, info, instrument, warn};

use super::auth::GoTrueUser;
use super::client::{AccessTokenProvider, SupabaseClient, RETURN_REPRESENTATION};

#[derive(Debug, Deserialize)]
struct UserRow {
    #[serde(default)]
    id: Option<Value>,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    role: Option<String>,
    #[serde(default)]
    created_at: Option<String>,
}

impl UserRow {
    fn into_account(self) -> Option<UserAccount> {
        let id = match self.id? {
            Value::String(s) if !s.is_empty() => s,
            Value::Number(n) => n.to_string(),
            _ => return None,
        };
        Some(UserAccount {
            id,
            email: self.email.unwrap_or_default(),
            role: self.role.as_deref().map_or(Role::User, Role::parse),
            created_at: parse_timestamp(self.created_at.as_deref()?)?,
        })
    }
}

fn map_accounts(values: Vec<Value>) -> Vec<UserAccount> {
    values
        .into_iter()
        .filter_map(|value| {
            let account = serde_json::from_value::<UserRow>(value)
                .ok()
                .and_then(UserRow::into_account);
            if account.is_none() {
                warn!("skipping unmappable user row");
            }
            account
        })
        .collect()
}

/// `UserDirectory` over Supabase
pub struct SupabaseUserDirectory {
    client: Arc<SupabaseClient>,
    tokens: Arc<dyn AccessTokenProvider>,
}

impl SupabaseUserDirectory {
    pub fn new(client: Arc<SupabaseClient>, tokens: Arc<dyn AccessTokenProvider>) -> Self {
        Self { client, tokens }
    }
}

#[async_trait]
impl UserDirectory for SupabaseUserDirectory {
    #[instrument(skip(self))]
    async fn list_users(&self) -> Result<Vec<UserAccount>> {
        let token = self.tokens.access_token().await?;
        let url = self
            .client
            .rest_url(USERS_TABLE, &[("select", "*"), ("order", "created_at.desc")])?;
        let rows: Vec<Value> = self
            .client
            .send_json(self.client.request(Method::GET, url, token.as_deref()))
            .await?;
        Ok(map_accounts(rows))
    }

    #[instrument(skip(self, password))]
    async fn create_user(
        &self,
        email: &str,
        password: &str,
        role: AssignableRole,
    ) -> Result<UserAccount> {
        let role = role.as_role();
        let url = self.client.auth_url("admin/users", &[])?;
        let request = self.client.service_request(Method::POST, url)?.json(&json!({
            "email": email,
            "password": password,
            "email_confirm": true,
            "user_metadata": { "role": role.as_str() },
        }));
        let created: GoTrueUser = self.client.send_json(request).await?;
        info!(user_id = %created.id, role = %role, "auth account created");

        let account = UserAccount {
            id: created.id,
            email: created.email.unwrap_or_else(|| email.to_string()),
            role,
            created_at: Utc::now(),
        };

        let token = self.tokens.access_token().await?;
        let url = self.client.rest_url(USERS_TABLE, &[("select", "*")])?;
        let request = self
            .client
            .request(Method::POST, url, token.as_deref())
            .header("Prefer", RETURN_REPRESENTATION)
            .json(&json!({
                "id": account.id,
                "email": account.email,
                "role": account.role.as_str(),
                "created_at": account.created_at.to_rfc3339(),
            }));
        let rows: Vec<Value> = match self.client.send_json(request).await {
            Ok(rows) => rows,
            Err(err) => {
                error!(user_id = %account.id, error = %err, "auth account created but users row insert failed");
                return Err(CongregateError::from(err));
            }
        };

        Ok(map_accounts(rows).into_iter().next().unwrap_or(account))
    }
}
