//! Session, role and user-account types
//!
//! Roles are read from the authenticated user's metadata as free strings;
//! `Role` gives the three known values names and keeps anything else.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Coarse role derived from user metadata
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Role {
    SuperAdmin,
    Admin,
    User,
    Other(String),
}

impl Role {
    pub fn as_str(&self) -> &str {
        match self {
            Self::SuperAdmin => "super_admin",
            Self::Admin => "admin",
            Self::User => "user",
            Self::Other(raw) => raw,
        }
    }

    pub fn parse(raw: &str) -> Self {
        match raw.trim() {
            "super_admin" => Self::SuperAdmin,
            "admin" => Self::Admin,
            "user" => Self::User,
            other => Self::Other(other.to_string()),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Role {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Role {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::parse(&raw))
    }
}

/// Roles that may be assigned when creating an account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssignableRole {
    Admin,
    User,
}

impl AssignableRole {
    pub fn as_role(&self) -> Role {
        match self {
            Self::Admin => Role::Admin,
            Self::User => Role::User,
        }
    }
}

impl std::str::FromStr for AssignableRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "admin" => Ok(Self::Admin),
            "user" => Ok(Self::User),
            other => Err(format!("Invalid AssignableRole: {other}")),
        }
    }
}

/// Boolean capabilities derived from a role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Capabilities {
    pub can_manage_members: bool,
    pub can_manage_users: bool,
}

impl Capabilities {
    pub const NONE: Self = Self { can_manage_members: false, can_manage_users: false };
}

/// Authenticated user as reported by the auth provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
    /// `user_metadata.role`, if any
    #[serde(default)]
    pub role: Option<Role>,
}

/// Provider-issued session
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    pub refresh_token: String,
    pub expires_at: DateTime<Utc>,
    pub user: AuthUser,
}

impl Session {
    /// Whether the access token expires within `threshold_secs` of `now`.
    pub fn expires_within(&self, now: DateTime<Utc>, threshold_secs: i64) -> bool {
        (self.expires_at - now).num_seconds() <= threshold_secs
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("access_token", &"[REDACTED]")
            .field("refresh_token", &"[REDACTED]")
            .field("expires_at", &self.expires_at)
            .field("user", &self.user)
            .finish()
    }
}

/// Kind of a provider-pushed auth event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuthEventKind {
    SignedIn,
    SignedOut,
    TokenRefreshed,
}

/// Auth state change pushed to subscribers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthEvent {
    pub kind: AuthEventKind,
    pub session: Option<Session>,
}

impl AuthEvent {
    pub fn signed_in(session: Session) -> Self {
        Self { kind: AuthEventKind::SignedIn, session: Some(session) }
    }

    pub fn token_refreshed(session: Session) -> Self {
        Self { kind: AuthEventKind::TokenRefreshed, session: Some(session) }
    }

    pub fn signed_out() -> Self {
        Self { kind: AuthEventKind::SignedOut, session: None }
    }
}

/// Gate status exposed to views
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthStatus {
    Loading,
    Authenticated,
    Unauthenticated,
}

/// Row of the `users` collection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserAccount {
    pub id: String,
    pub email: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone};

    use super::*;

    fn session(expires_at: DateTime<Utc>) -> Session {
        Session {
            access_token: "secret-access".into(),
            refresh_token: "secret-refresh".into(),
            expires_at,
            user: AuthUser { id: "u1".into(), email: None, role: None },
        }
    }

    #[test]
    fn role_round_trips_unknown_values() {
        assert_eq!(Role::parse("super_admin"), Role::SuperAdmin);
        assert_eq!(Role::parse("editor"), Role::Other("editor".into()));
        let json = serde_json::to_string(&Role::Other("editor".into())).unwrap();
        assert_eq!(json, "\"editor\"");
        let parsed: Role = serde_json::from_str("\"admin\"").unwrap();
        assert_eq!(parsed, Role::Admin);
    }

    #[test]
    fn session_debug_redacts_tokens() {
        let now = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        let rendered = format!("{:?}", session(now));
        assert!(!rendered.contains("secret"));
        assert!(rendered.contains("[REDACTED]"));
    }

    #[test]
    fn expiry_threshold() {
        let now = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        assert!(session(now + Duration::seconds(30)).expires_within(now, 60));
        assert!(!session(now + Duration::seconds(3600)).expires_within(now, 60));
    }

    #[test]
    fn event_kind_uses_provider_names() {
        let json = serde_json::to_string(&AuthEventKind::TokenRefreshed).unwrap();
        assert_eq!(json, "\"TOKEN_REFRESHED\"");
    }

    #[test]
    fn assignable_roles_exclude_super_admin() {
        assert_eq!("Admin".parse::<AssignableRole>().unwrap(), AssignableRole::Admin);
        assert!("super_admin".parse::<AssignableRole>().is_err());
    }
}
