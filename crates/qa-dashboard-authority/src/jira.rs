// crates/qa-dashboard-authority/src/jira.rs
// ============================================================================
// Module: Jira Authority
// Description: HTTP client for Jira project-role and user-group lookups.
// Purpose: Implement RoleAuthority against the Jira REST API.
// Dependencies: qa-dashboard-{config,core}, reqwest, url
// ============================================================================

//! ## Overview
//! [`JiraAuthority`] issues GET requests against a configured base URL with
//! connect and request timeouts and an optional bearer token. Every call runs
//! under the configured [`RetryPolicy`]. Non-success statuses become
//! [`AccessError::Upstream`]; nothing is cached. Response bodies are read
//! under a byte cap ([`MAX_RESPONSE_BYTES`] by default) and an oversized
//! body is a decoding failure.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::time::Duration;

use async_trait::async_trait;
use qa_dashboard_config::AuthorityConfig;
use qa_dashboard_core::AccountId;
use qa_dashboard_core::ProjectKey;
use qa_dashboard_core::RoleId;
use reqwest::Client;
use reqwest::header::ACCEPT;
use reqwest::header::AUTHORIZATION;
use reqwest::header::HeaderMap;
use reqwest::header::HeaderValue;
use serde::de::DeserializeOwned;
use url::Url;

use crate::authority::GroupRef;
use crate::authority::ProjectRoles;
use crate::authority::RoleAuthority;
use crate::authority::RoleDetail;
use crate::authority::UserProfile;
use crate::error::AccessError;
use crate::retry::RetryPolicy;

// ============================================================================
// SECTION: Limits
// ============================================================================

/// Default maximum authority response body size.
pub const MAX_RESPONSE_BYTES: usize = 1024 * 1024;

// ============================================================================
// SECTION: Jira Authority
// ============================================================================

/// Jira-backed role authority.
///
/// # Invariants
/// - Base URL path never ends with an empty segment.
pub struct JiraAuthority {
    /// Jira site base URL.
    base_url: Url,
    /// Optional bearer token for outbound requests.
    auth_token: Option<String>,
    /// HTTP client configured with timeouts.
    client: Client,
    /// Retry policy for transient failures.
    retry: RetryPolicy,
    /// Maximum accepted response body size.
    max_response_bytes: usize,
}

impl JiraAuthority {
    /// Builds a new Jira authority.
    ///
    /// # Errors
    ///
    /// Returns [`AccessError::Client`] when the HTTP client cannot be built.
    pub fn new(
        base_url: Url,
        auth_token: Option<String>,
        connect_timeout: Duration,
        request_timeout: Duration,
        retry: RetryPolicy,
    ) -> Result<Self, AccessError> {
        let client = Client::builder()
            .connect_timeout(connect_timeout)
            .timeout(request_timeout)
            .build()
            .map_err(|err| AccessError::Client(err.to_string()))?;
        Ok(Self {
            base_url,
            auth_token,
            client,
            retry,
            max_response_bytes: MAX_RESPONSE_BYTES,
        })
    }

    /// Returns an authority that accepts bodies of at most `limit` bytes.
    #[must_use]
    pub const fn with_max_response_bytes(mut self, limit: usize) -> Self {
        self.max_response_bytes = limit;
        self
    }

    /// Builds a Jira authority from validated config.
    ///
    /// # Errors
    ///
    /// Returns [`AccessError::Client`] when the URL or token cannot be
    /// resolved or the client cannot be built.
    pub fn from_config(config: &AuthorityConfig) -> Result<Self, AccessError> {
        let base_url =
            config.parsed_base_url().map_err(|err| AccessError::Client(err.to_string()))?;
        let auth_token =
            config.resolve_auth_token().map_err(|err| AccessError::Client(err.to_string()))?;
        Self::new(
            base_url,
            auth_token,
            Duration::from_millis(config.connect_timeout_ms),
            Duration::from_millis(config.request_timeout_ms),
            RetryPolicy::from_config(&config.retry),
        )
    }

    /// Builds an endpoint URL from path segments and query pairs.
    fn endpoint(&self, segments: &[&str], query: &[(&str, &str)]) -> Result<Url, AccessError> {
        let mut url = self.base_url.clone();
        {
            let mut path = url
                .path_segments_mut()
                .map_err(|()| AccessError::Client("base url cannot carry a path".to_string()))?;
            path.pop_if_empty();
            path.extend(segments);
        }
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }
        Ok(url)
    }

    /// Builds headers for authority requests.
    fn build_headers(&self) -> Result<HeaderMap, AccessError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        if let Some(token) = &self.auth_token {
            let value = HeaderValue::from_str(&format!("Bearer {token}"))
                .map_err(|_| AccessError::Client("invalid auth token".to_string()))?;
            headers.insert(AUTHORIZATION, value);
        }
        Ok(headers)
    }

    /// Issues a GET under the retry policy and decodes the JSON body.
    async fn get_json<T>(&self, url: Url, endpoint: &'static str) -> Result<T, AccessError>
    where
        T: DeserializeOwned + Send,
    {
        let headers = self.build_headers()?;
        let limit = self.max_response_bytes;
        self.retry
            .run(|_attempt| {
                let request = self.client.get(url.clone()).headers(headers.clone());
                async move {
                    let mut response =
                        request.send().await.map_err(|err| AccessError::Network(err.to_string()))?;
                    let status = response.status();
                    if !status.is_success() {
                        return Err(AccessError::Upstream {
                            status: status.as_u16(),
                            endpoint: endpoint.to_string(),
                        });
                    }
                    let body = read_body_with_limit(&mut response, limit).await?;
                    serde_json::from_slice::<T>(&body)
                        .map_err(|err| AccessError::Parse(err.to_string()))
                }
            })
            .await
    }
}

/// Reads the response body while enforcing `limit`.
async fn read_body_with_limit(
    response: &mut reqwest::Response,
    limit: usize,
) -> Result<Vec<u8>, AccessError> {
    let declared = response.content_length().and_then(|length| usize::try_from(length).ok());
    if let Some(length) = declared
        && length > limit
    {
        return Err(AccessError::Parse(format!(
            "response body exceeds size limit ({length} > {limit})"
        )));
    }
    let mut body = Vec::new();
    while let Some(chunk) =
        response.chunk().await.map_err(|err| AccessError::Network(err.to_string()))?
    {
        if body.len().saturating_add(chunk.len()) > limit {
            return Err(AccessError::Parse("response body exceeds size limit".to_string()));
        }
        body.extend_from_slice(&chunk);
    }
    Ok(body)
}

#[async_trait]
impl RoleAuthority for JiraAuthority {
    async fn project_roles(&self, project: &ProjectKey) -> Result<ProjectRoles, AccessError> {
        let url = self.endpoint(&["rest", "api", "3", "project", project.as_str(), "role"], &[])?;
        self.get_json(url, "project roles").await
    }

    async fn role_detail(
        &self,
        project: &ProjectKey,
        role: RoleId,
    ) -> Result<RoleDetail, AccessError> {
        let role_id = role.get().to_string();
        let url = self.endpoint(
            &["rest", "api", "3", "project", project.as_str(), "role", role_id.as_str()],
            &[],
        )?;
        self.get_json(url, "role detail").await
    }

    async fn user_with_groups(&self, account: &AccountId) -> Result<UserProfile, AccessError> {
        let url = self.endpoint(
            &["rest", "api", "2", "user"],
            &[("accountId", account.as_str()), ("expand", "groups")],
        )?;
        self.get_json(url, "user").await
    }

    async fn user_groups(&self, account: &AccountId) -> Result<Vec<GroupRef>, AccessError> {
        let url = self
            .endpoint(&["rest", "api", "3", "user", "groups"], &[("accountId", account.as_str())])?;
        self.get_json(url, "user groups").await
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
