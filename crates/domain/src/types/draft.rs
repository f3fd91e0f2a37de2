//! Partial member payloads used by the add and edit flows
//!
//! A `MemberDraft` is what a form produces: every field optional. It is sent
//! as-is (absent fields omitted) for inserts and patches, after the
//! input-time checks below have passed.

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::member::{BaptismalState, ChurchFunction, Gender, Member, Region, Society};
use crate::errors::{CongregateError, Result};

/// User-facing label for a `members` column.
pub fn field_label(column: &str) -> Option<&'static str> {
    match column {
        "nome_completo" => Some("Nome Completo"),
        "data_nascimento" => Some("Data de Nascimento"),
        "genero" => Some("Gênero"),
        "regiao" => Some("Região"),
        "paroquia" => Some("Paróquia"),
        "funcao" => Some("Função"),
        "estado" => Some("Estado"),
        "sociedade" => Some("Sociedade"),
        "telefone" => Some("Telefone"),
        "email" => Some("Email"),
        "endereco" => Some("Endereço"),
        _ => None,
    }
}

/// Message used when a required column is missing.
pub fn required_field_message(column: &str) -> String {
    let label = field_label(column).unwrap_or(column);
    format!("Campo \"{label}\" é obrigatório")
}

/// Form payload for creating or editing a member
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberDraft {
    #[serde(rename = "nome_completo", skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(rename = "data_nascimento", skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<NaiveDate>,
    #[serde(rename = "genero", skip_serializing_if = "Option::is_none")]
    pub gender: Option<Gender>,
    #[serde(rename = "regiao", skip_serializing_if = "Option::is_none")]
    pub region: Option<Region>,
    #[serde(rename = "paroquia", skip_serializing_if = "Option::is_none")]
    pub parish: Option<String>,
    #[serde(rename = "funcao", skip_serializing_if = "Option::is_none")]
    pub function: Option<ChurchFunction>,
    #[serde(rename = "estado", skip_serializing_if = "Option::is_none")]
    pub baptismal_state: Option<BaptismalState>,
    #[serde(rename = "sociedade", skip_serializing_if = "Option::is_none")]
    pub society: Option<Society>,
    #[serde(rename = "telefone", skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(rename = "endereco", skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

impl MemberDraft {
    /// Draft pre-filled from an existing record (edit form initial state).
    pub fn from_member(member: &Member) -> Self {
        Self {
            full_name: Some(member.full_name.clone()),
            birth_date: Some(member.birth_date),
            gender: Some(member.gender),
            region: Some(member.region),
            parish: Some(member.parish.clone()),
            function: Some(member.function),
            baptismal_state: member.baptismal_state,
            society: member.society,
            phone: member.phone.clone(),
            email: member.email.clone(),
            address: member.address.clone(),
        }
    }

    /// Trim text fields and drop the ones left blank.
    #[must_use]
    pub fn normalized(mut self) -> Self {
        fn clean(value: Option<String>) -> Option<String> {
            value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
        }
        self.full_name = clean(self.full_name);
        self.parish = clean(self.parish);
        self.phone = clean(self.phone);
        self.email = clean(self.email);
        self.address = clean(self.address);
        self
    }

    /// True when no field is set.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Overlay the draft on an existing record.
    pub fn apply_to(&self, member: &Member) -> Member {
        let mut merged = member.clone();
        if let Some(name) = &self.full_name {
            merged.full_name.clone_from(name);
        }
        if let Some(date) = self.birth_date {
            merged.birth_date = date;
        }
        if let Some(gender) = self.gender {
            merged.gender = gender;
        }
        if let Some(region) = self.region {
            merged.region = region;
        }
        if let Some(parish) = &self.parish {
            merged.parish.clone_from(parish);
        }
        if let Some(function) = self.function {
            merged.function = function;
        }
        if self.baptismal_state.is_some() {
            merged.baptismal_state = self.baptismal_state;
        }
        if self.society.is_some() {
            merged.society = self.society;
        }
        if self.phone.is_some() {
            merged.phone.clone_from(&self.phone);
        }
        if self.email.is_some() {
            merged.email.clone_from(&self.email);
        }
        if self.address.is_some() {
            merged.address.clone_from(&self.address);
        }
        merged
    }

    /// Input-time checks for the add flow.
    ///
    /// # Errors
    /// Returns `CongregateError::Validation` naming the first offending field.
    pub fn validate_for_create(&self, today: NaiveDate) -> Result<()> {
        match &self.full_name {
            Some(name) if !name.trim().is_empty() => {}
            _ => return Err(CongregateError::Validation(required_field_message("nome_completo"))),
        }
        if self.birth_date.is_none() {
            return Err(CongregateError::Validation(
                "Por favor, preencha a Data de Nascimento".to_string(),
            ));
        }
        if self.gender.is_none() {
            return Err(CongregateError::Validation(required_field_message("genero")));
        }
        if self.region.is_none() {
            return Err(CongregateError::Validation(required_field_message("regiao")));
        }
        if self.function.is_none() {
            return Err(CongregateError::Validation(required_field_message("funcao")));
        }
        self.validate_common(self.region, self.parish.as_deref(), today)
    }

    /// Input-time checks for the edit flow, evaluated against the merged
    /// record so a region change without a matching parish is caught.
    ///
    /// # Errors
    /// Returns `CongregateError::Validation` naming the first offending field.
    pub fn validate_for_update(&self, existing: &Member, today: NaiveDate) -> Result<()> {
        if let Some(name) = &self.full_name {
            if name.trim().is_empty() {
                return Err(CongregateError::Validation(required_field_message("nome_completo")));
            }
        }
        if self.region.is_some() || self.parish.is_some() {
            let merged = self.apply_to(existing);
            return self.validate_common(Some(merged.region), Some(&merged.parish), today);
        }
        self.validate_common(None, None, today)
    }

    fn validate_common(
        &self,
        region: Option<Region>,
        parish: Option<&str>,
        today: NaiveDate,
    ) -> Result<()> {
        if let Some(date) = self.birth_date {
            if date > today {
                return Err(CongregateError::Validation(
                    "Data de Nascimento não pode estar no futuro".to_string(),
                ));
            }
        }
        if let (Some(region), Some(parish)) = (region, parish) {
            if !region.has_parish(parish) {
                return Err(CongregateError::Validation(format!(
                    "Paróquia \"{parish}\" não pertence à região {region}"
                )));
            }
        }
        if let Some(email) = &self.email {
            if !looks_like_email(email) {
                return Err(CongregateError::Validation("Email inválido".to_string()));
            }
        }
        Ok(())
    }

    /// Validate against today's date in UTC.
    ///
    /// # Errors
    /// See [`MemberDraft::validate_for_create`].
    pub fn validate_for_create_now(&self) -> Result<()> {
        self.validate_for_create(Utc::now().date_naive())
    }
}

fn looks_like_email(value: &str) -> bool {
    match value.split_once('@') {
        Some((local, domain)) => !local.is_empty() && domain.contains('.') && !domain.starts_with('.'),
        None => false,
    }
}
