//! PostgREST adapter for the `members` table
//!
//! Rows arrive loosely typed. Each is checked on the way in; rows that do
//! not map (missing required column, value outside its enum) are skipped
//! with a warning instead of failing the whole listing.

use std::str::FromStr;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use congregate_core::MemberRepository;
use congregate_domain::constants::MEMBERS_TABLE;
use congregate_domain::utils::dates::{parse_birth_date, parse_timestamp};
use congregate_domain::{
    BaptismalState, ChurchFunction, CongregateError, Gender, Member, MemberDraft, Region, Result,
    Society,
};
use reqwest::Method;
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, info, instrument, warn};

use super::client::{AccessTokenProvider, SupabaseClient, RETURN_REPRESENTATION};

/// Why a remote row was rejected
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("column {column}: {reason}")]
pub struct RowMappingError {
    pub column: &'static str,
    pub reason: String,
}

impl RowMappingError {
    fn missing(column: &'static str) -> Self {
        Self { column, reason: "missing".to_string() }
    }

    fn invalid(column: &'static str, value: &str) -> Self {
        Self { column, reason: format!("unexpected value '{value}'") }
    }
}

/// `members` row exactly as the store returns it
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MemberRow {
    #[serde(default)]
    pub id: Option<Value>,
    #[serde(default)]
    pub nome_completo: Option<String>,
    #[serde(default)]
    pub data_nascimento: Option<String>,
    #[serde(default)]
    pub genero: Option<String>,
    #[serde(default)]
    pub regiao: Option<String>,
    #[serde(default)]
    pub paroquia: Option<String>,
    #[serde(default)]
    pub funcao: Option<String>,
    #[serde(default)]
    pub estado: Option<String>,
    #[serde(default)]
    pub sociedade: Option<String>,
    #[serde(default)]
    pub telefone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub endereco: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

fn present(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

fn required(column: &'static str, value: Option<String>) -> std::result::Result<String, RowMappingError> {
    present(value).ok_or_else(|| RowMappingError::missing(column))
}

fn label<T: FromStr>(column: &'static str, raw: &str) -> std::result::Result<T, RowMappingError> {
    raw.parse::<T>().map_err(|_| RowMappingError::invalid(column, raw))
}

fn optional_label<T: FromStr>(
    column: &'static str,
    value: Option<String>,
) -> std::result::Result<Option<T>, RowMappingError> {
    present(value).map(|raw| label(column, &raw)).transpose()
}

fn timestamp(column: &'static str, raw: &str) -> std::result::Result<DateTime<Utc>, RowMappingError> {
    parse_timestamp(raw).ok_or_else(|| RowMappingError::invalid(column, raw))
}

impl TryFrom<MemberRow> for Member {
    type Error = RowMappingError;

    fn try_from(row: MemberRow) -> std::result::Result<Self, Self::Error> {
        let id = match row.id {
            Some(Value::String(s)) if !s.trim().is_empty() => s,
            Some(Value::Number(n)) => n.to_string(),
            _ => return Err(RowMappingError::missing("id")),
        };
        let birth_raw = required("data_nascimento", row.data_nascimento)?;
        let birth_date = parse_birth_date(&birth_raw)
            .ok_or_else(|| RowMappingError::invalid("data_nascimento", &birth_raw))?;
        let created_raw = required("created_at", row.created_at)?;

        Ok(Member {
            id,
            full_name: required("nome_completo", row.nome_completo)?,
            birth_date,
            gender: label::<Gender>("genero", &required("genero", row.genero)?)?,
            region: label::<Region>("regiao", &required("regiao", row.regiao)?)?,
            parish: present(row.paroquia).unwrap_or_default(),
            function: label::<ChurchFunction>("funcao", &required("funcao", row.funcao)?)?,
            baptismal_state: optional_label::<BaptismalState>("estado", row.estado)?,
            society: optional_label::<Society>("sociedade", row.sociedade)?,
            phone: present(row.telefone),
            email: present(row.email),
            address: present(row.endereco),
            created_at: timestamp("created_at", &created_raw)?,
            updated_at: present(row.updated_at).and_then(|raw| parse_timestamp(&raw)),
        })
    }
}

/// Map one raw JSON row.
pub fn map_row(value: Value) -> std::result::Result<Member, RowMappingError> {
    let row: MemberRow = serde_json::from_value(value)
        .map_err(|e| RowMappingError { column: "*", reason: e.to_string() })?;
    Member::try_from(row)
}

/// Map every row, skipping the ones that do not fit.
pub fn map_rows(values: Vec<Value>) -> Vec<Member> {
    let total = values.len();
    let members: Vec<Member> = values
        .into_iter()
        .enumerate()
        .filter_map(|(index, value)| {
            let id = value.get("id").map(ToString::to_string);
            match map_row(value) {
                Ok(member) => Some(member),
                Err(err) => {
                    warn!(index, id = ?id, error = %err, "skipping unmappable member row");
                    None
                }
            }
        })
        .collect();
    if members.len() < total {
        warn!(skipped = total - members.len(), total, "member rows skipped");
    }
    members
}

fn single(values: Vec<Value>, id: &str) -> Result<Member> {
    let value = values
        .into_iter()
        .next()
        .ok_or_else(|| CongregateError::NotFound(format!("member {id} not found")))?;
    map_row(value)
        .map_err(|err| CongregateError::Remote(format!("member {id} has invalid data: {err}")))
}

fn payload(draft: &MemberDraft, stamp: &str, now: DateTime<Utc>) -> Result<Value> {
    let mut body = serde_json::to_value(draft)
        .map_err(|e| CongregateError::Internal(format!("cannot serialise member draft: {e}")))?;
    if let Value::Object(map) = &mut body {
        map.insert(stamp.to_string(), Value::String(now.to_rfc3339()));
    }
    Ok(body)
}

/// `MemberRepository` over Supabase
pub struct SupabaseMemberRepository {
    client: Arc<SupabaseClient>,
    tokens: Arc<dyn AccessTokenProvider>,
}

impl SupabaseMemberRepository {
    pub fn new(client: Arc<SupabaseClient>, tokens: Arc<dyn AccessTokenProvider>) -> Self {
        Self { client, tokens }
    }

    async fn fetch(
        &self,
        method: Method,
        query: &[(&str, &str)],
        body: Option<Value>,
    ) -> Result<Vec<Value>> {
        let token = self.tokens.access_token().await?;
        let url = self.client.rest_url(MEMBERS_TABLE, query)?;
        let writes = method != Method::GET;
        let mut request = self.client.request(method, url, token.as_deref());
        if writes {
            request = request.header("Prefer", RETURN_REPRESENTATION);
        }
        if let Some(body) = body {
            request = request.json(&body);
        }
        Ok(self.client.send_json::<Vec<Value>>(request).await?)
    }
}

#[async_trait]
impl MemberRepository for SupabaseMemberRepository {
    #[instrument(skip(self))]
    async fn list_all(&self) -> Result<Vec<Member>> {
        let rows = self
            .fetch(Method::GET, &[("select", "*"), ("order", "nome_completo.asc")], None)
            .await?;
        let members = map_rows(rows);
        debug!(count = members.len(), "members listed");
        Ok(members)
    }

    #[instrument(skip(self))]
    async fn get(&self, id: &str) -> Result<Member> {
        let filter = format!("eq.{id}");
        let rows = self.fetch(Method::GET, &[("select", "*"), ("id", &filter)], None).await?;
        single(rows, id)
    }

    #[instrument(skip(self, draft))]
    async fn create(&self, draft: &MemberDraft) -> Result<Member> {
        let body = payload(draft, "created_at", Utc::now())?;
        let rows = self.fetch(Method::POST, &[("select", "*")], Some(body)).await?;
        let member = rows
            .into_iter()
            .next()
            .ok_or_else(|| CongregateError::Remote("insert returned no row".to_string()))
            .and_then(|value| {
                map_row(value).map_err(|err| {
                    CongregateError::Remote(format!("inserted member has invalid data: {err}"))
                })
            })?;
        info!(member_id = %member.id, "member created");
        Ok(member)
    }

    #[instrument(skip(self, draft))]
    async fn update(&self, id: &str, draft: &MemberDraft) -> Result<Member> {
        let filter = format!("eq.{id}");
        let body = payload(draft, "updated_at", Utc::now())?;
        let rows = self.fetch(Method::PATCH, &[("id", &filter), ("select", "*")], Some(body)).await?;
        let member = single(rows, id)?;
        info!(member_id = %member.id, "member updated");
        Ok(member)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: &str) -> Result<()> {
        let filter = format!("eq.{id}");
        let rows = self.fetch(Method::DELETE, &[("id", &filter)], None).await?;
        if rows.is_empty() {
            return Err(CongregateError::NotFound(format!("member {id} not found")));
        }
        info!(member_id = %id, "member deleted");
        Ok(())
    }
}
