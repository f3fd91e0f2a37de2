//! Thin Supabase REST client
//!
//! Builds PostgREST (`/rest/v1`) and GoTrue (`/auth/v1`) requests with the
//! project key headers and turns responses into typed values or a
//! classified [`SupabaseError`].

use async_trait::async_trait;
use congregate_domain::{CongregateError, SupabaseConfig};
use reqwest::{Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use super::errors::SupabaseError;
use crate::http::HttpClient;

/// `Prefer` header asking PostgREST to echo affected rows.
pub const RETURN_REPRESENTATION: &str = "return=representation";

/// Source of the signed-in user's bearer token
///
/// Implementations refresh the token when needed. `None` means no session;
/// requests then fall back to the anon key.
#[async_trait]
pub trait AccessTokenProvider: Send + Sync {
    async fn access_token(&self) -> Result<Option<String>, CongregateError>;
}

/// Low-level client shared by every Supabase adapter
#[derive(Clone)]
pub struct SupabaseClient {
    http: HttpClient,
    base_url: Url,
    anon_key: String,
    service_role_key: Option<String>,
}

impl std::fmt::Debug for SupabaseClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SupabaseClient").field("base_url", &self.base_url.as_str()).finish()
    }
}

impl SupabaseClient {
    /// # Errors
    /// `Config` when the URL does not parse or the HTTP client cannot be built.
    pub fn new(config: &SupabaseConfig) -> Result<Self, CongregateError> {
        let http = HttpClient::from_config(config)?;
        Self::with_http(config, http)
    }

    /// Use a pre-built transport (custom retry policy, tests).
    pub fn with_http(config: &SupabaseConfig, http: HttpClient) -> Result<Self, CongregateError> {
        let mut raw = config.url.trim().to_string();
        if !raw.ends_with('/') {
            raw.push('/');
        }
        let base_url = Url::parse(&raw).map_err(|e| {
            CongregateError::Config(format!("invalid supabase url '{}': {e}", config.url))
        })?;

        Ok(Self {
            http,
            base_url,
            anon_key: config.anon_key.clone(),
            service_role_key: config.service_role_key.clone(),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn has_service_role(&self) -> bool {
        self.service_role_key.is_some()
    }

    /// `{base}/rest/v1/{table}` with the given query pairs.
    pub fn rest_url(&self, table: &str, query: &[(&str, &str)]) -> Result<Url, SupabaseError> {
        self.endpoint(&format!("rest/v1/{table}"), query)
    }

    /// `{base}/auth/v1/{path}` with the given query pairs.
    pub fn auth_url(&self, path: &str, query: &[(&str, &str)]) -> Result<Url, SupabaseError> {
        self.endpoint(&format!("auth/v1/{path}"), query)
    }

    fn endpoint(&self, path: &str, query: &[(&str, &str)]) -> Result<Url, SupabaseError> {
        let mut url = self
            .base_url
            .join(path)
            .map_err(|e| SupabaseError::Config(format!("cannot build url for {path}: {e}")))?;
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }
        Ok(url)
    }

    /// Request authorised as the signed-in user, or anonymously.
    pub fn request(&self, method: Method, url: Url, token: Option<&str>) -> RequestBuilder {
        let bearer = token.unwrap_or(&self.anon_key);
        self.http
            .request(method, url)
            .header("apikey", &self.anon_key)
            .header("Authorization", format!("Bearer {bearer}"))
    }

    /// Request authorised with the service-role key.
    ///
    /// # Errors
    /// `Config` when no service-role key is configured.
    pub fn service_request(&self, method: Method, url: Url) -> Result<RequestBuilder, SupabaseError> {
        let key = self.service_role_key.as_deref().ok_or_else(|| {
            SupabaseError::Config(
                "supabase.service_role_key is required to create accounts".to_string(),
            )
        })?;
        Ok(self
            .http
            .request(method, url)
            .header("apikey", key)
            .header("Authorization", format!("Bearer {key}")))
    }

    /// Send and decode a JSON body.
    pub async fn send_json<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
    ) -> Result<T, SupabaseError> {
        let response = self.send_checked(builder).await?;
        response
            .json::<T>()
            .await
            .map_err(|e| SupabaseError::Server(format!("unexpected response body: {e}")))
    }

    /// Send and discard the body.
    pub async fn send_empty(&self, builder: RequestBuilder) -> Result<(), SupabaseError> {
        self.send_checked(builder).await.map(|_| ())
    }

    async fn send_checked(&self, builder: RequestBuilder) -> Result<Response, SupabaseError> {
        let response = self.http.send(builder).await.map_err(transport_error)?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        debug!(%status, "supabase request rejected");
        Err(SupabaseError::from_response(status, &body))
    }
}

fn transport_error(err: CongregateError) -> SupabaseError {
    match err {
        CongregateError::Internal(message) | CongregateError::Config(message) => {
            SupabaseError::Config(message)
        }
        CongregateError::Auth(message) => SupabaseError::Auth(message),
        other => SupabaseError::Network(other.message().to_string()),
    }
}

#[cfg(test)]
mod tests {
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn config(url: &str) -> SupabaseConfig {
        congregate_domain::Config::new(url, "anon-key").supabase
    }

    #[test]
    fn builds_rest_and_auth_urls() {
        let client = SupabaseClient::new(&config("https://demo.supabase.co")).unwrap();

        let url = client.rest_url("members", &[("select", "*"), ("id", "eq.42")]).unwrap();
        assert_eq!(url.as_str(), "https://demo.supabase.co/rest/v1/members?select=*&id=eq.42");

        let url = client.auth_url("token", &[("grant_type", "password")]).unwrap();
        assert_eq!(url.as_str(), "https://demo.supabase.co/auth/v1/token?grant_type=password");
    }

    #[test]
    fn rejects_unparseable_url() {
        assert!(matches!(
            SupabaseClient::new(&config("not a url")),
            Err(CongregateError::Config(_))
        ));
    }

    #[test]
    fn service_request_requires_key() {
        let client = SupabaseClient::new(&config("https://demo.supabase.co")).unwrap();
        let url = client.auth_url("admin/users", &[]).unwrap();
        assert!(matches!(
            client.service_request(Method::POST, url),
            Err(SupabaseError::Config(_))
        ));
    }

    #[tokio::test]
    async fn sends_key_headers_and_decodes() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/rest/v1/members"))
            .and(query_param("select", "*"))
            .and(header("apikey", "anon-key"))
            .and(header("Authorization", "Bearer user-token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([{"id": 1}])))
            .expect(1)
            .mount(&server)
            .await;

        let client = SupabaseClient::new(&config(&server.uri())).unwrap();
        let url = client.rest_url("members", &[("select", "*")]).unwrap();
        let rows: Vec<serde_json::Value> = client
            .send_json(client.request(Method::GET, url, Some("user-token")))
            .await
            .unwrap();

        assert_eq!(rows.len(), 1);
    }

    #[tokio::test]
    async fn classifies_rejections() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(409)
                    .set_body_json(serde_json::json!({"code": "23505", "message": "duplicate"})),
            )
            .mount(&server)
            .await;

        let client = SupabaseClient::new(&config(&server.uri())).unwrap();
        let url = client.rest_url("members", &[]).unwrap();
        let err = client.send_empty(client.request(Method::GET, url, None)).await.unwrap_err();

        assert!(matches!(err, SupabaseError::Constraint { ref code, .. } if code == "23505"));
    }
}
