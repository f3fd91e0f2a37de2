//! Shared fixtures for adapter tests
#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Duration, Utc};
use congregate_core::SessionStore;
use congregate_domain::{AuthUser, Config, CongregateError, Result, Role, Session};
use congregate_infra::{AccessTokenProvider, SupabaseClient};
use parking_lot::Mutex;
use serde_json::{json, Value};

pub const ANON_KEY: &str = "anon-key";
pub const SERVICE_KEY: &str = "service-key";

pub fn config(server_uri: &str) -> Config {
    let mut config = Config::new(server_uri, ANON_KEY);
    config.supabase.service_role_key = Some(SERVICE_KEY.to_string());
    config
}

pub fn client(server_uri: &str) -> Arc<SupabaseClient> {
    Arc::new(SupabaseClient::new(&config(server_uri).supabase).expect("supabase client"))
}

/// Fixed bearer token.
pub struct StaticToken(pub Option<String>);

impl StaticToken {
    pub fn user() -> Arc<Self> {
        Arc::new(Self(Some("user-token".to_string())))
    }
}

#[async_trait]
impl AccessTokenProvider for StaticToken {
    async fn access_token(&self) -> std::result::Result<Option<String>, CongregateError> {
        Ok(self.0.clone())
    }
}

/// In-memory `SessionStore`.
#[derive(Clone, Default)]
pub struct MemoryStore {
    session: Arc<Mutex<Option<Session>>>,
}

impl MemoryStore {
    pub fn holding(session: Session) -> Self {
        let store = Self::default();
        *store.session.lock() = Some(session);
        store
    }

    pub fn current(&self) -> Option<Session> {
        self.session.lock().clone()
    }
}

impl SessionStore for MemoryStore {
    fn load(&self) -> Result<Option<Session>> {
        Ok(self.session.lock().clone())
    }

    fn save(&self, session: &Session) -> Result<()> {
        *self.session.lock() = Some(session.clone());
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        *self.session.lock() = None;
        Ok(())
    }
}

pub fn session_expiring_in(seconds: i64) -> Session {
    Session {
        access_token: "old-access".to_string(),
        refresh_token: "old-refresh".to_string(),
        expires_at: Utc::now() + Duration::seconds(seconds),
        user: AuthUser {
            id: "user-1".to_string(),
            email: Some("ana@example.com".to_string()),
            role: Some(Role::Admin),
        },
    }
}

pub fn token_body(access: &str, role: &str) -> Value {
    json!({
        "access_token": access,
        "token_type": "bearer",
        "expires_in": 3600,
        "refresh_token": format!("{access}-refresh"),
        "user": {
            "id": "user-1",
            "email": "ana@example.com",
            "user_metadata": { "role": role }
        }
    })
}

pub fn member_row(id: &str, name: &str, region: &str, parish: &str) -> Value {
    json!({
        "id": id,
        "nome_completo": name,
        "data_nascimento": "1990-04-12",
        "genero": "Feminino",
        "regiao": region,
        "paroquia": parish,
        "funcao": "Membro Normal",
        "estado": null,
        "sociedade": "Jovens",
        "telefone": "",
        "email": null,
        "endereco": null,
        "created_at": "2024-01-02T10:00:00+00:00",
        "updated_at": null
    })
}
