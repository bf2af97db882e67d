// crates/qa-dashboard-view/src/bridge.rs
// ============================================================================
// Module: Call Boundary Bridge
// Description: Client side of the named-operation call boundary.
// Purpose: Fetch and shape-check datasets for the presentation layer.
// Dependencies: qa-dashboard-core, async-trait, reqwest, serde, url
// ============================================================================

//! ## Overview
//! [`DashboardBridge`] is the seam between the presentation state machine and
//! whatever carries operations to the backend. [`HttpBridge`] posts the
//! invocation envelope to `POST {endpoint}/invoke/{operation}`, maps the
//! standard error body onto [`BridgeError`], and validates every dataset
//! against the declared record schema before decoding it.
//! Security posture: responses are untrusted; bodies are size-limited.

// ============================================================================
// SECTION: Imports
// ============================================================================

use async_trait::async_trait;
use qa_dashboard_core::AccountId;
use qa_dashboard_core::AgentDataset;
use qa_dashboard_core::DashboardKpis;
use qa_dashboard_core::ProjectKey;
use qa_dashboard_core::validate_agent_value;
use qa_dashboard_core::validate_dashboard_value;
use reqwest::Client;
use reqwest::header::AUTHORIZATION;
use reqwest::header::HeaderMap;
use reqwest::header::HeaderValue;
use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use url::Url;

// ============================================================================
// SECTION: Limits
// ============================================================================

/// Maximum accepted response body size.
pub const MAX_RESPONSE_BYTES: usize = 4 * 1024 * 1024;
/// Maximum body bytes quoted in an error.
const MAX_ERROR_PREVIEW_BYTES: usize = 256;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Bridge failures as seen by the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BridgeError {
    /// Backend refused the caller.
    #[error("{0}")]
    AccessDenied(String),
    /// Backend reported a transient failure.
    #[error("{0}")]
    ServiceUnavailable(String),
    /// Backend reported any other failure.
    #[error("{message}")]
    Failed {
        /// HTTP status.
        status: u16,
        /// Backend message.
        message: String,
    },
    /// Request could not be delivered.
    #[error("request failed: {0}")]
    Transport(String),
    /// Response did not match the expected shape.
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

impl BridgeError {
    /// Returns true for [`BridgeError::AccessDenied`].
    #[must_use]
    pub const fn is_access_denied(&self) -> bool {
        matches!(self, Self::AccessDenied(_))
    }
}

// ============================================================================
// SECTION: Bridge Interface
// ============================================================================

/// Carries dashboard operations to the backend.
#[async_trait]
pub trait DashboardBridge: Send + Sync {
    /// Invokes `getDashboardData`.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError`] when the operation fails.
    async fn dashboard_data(&self) -> Result<DashboardKpis, BridgeError>;

    /// Invokes `getAgentData`.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError`] when the operation fails.
    async fn agent_data(&self) -> Result<AgentDataset, BridgeError>;
}

// ============================================================================
// SECTION: Wire Types
// ============================================================================

/// Invocation envelope.
#[derive(Debug, Serialize)]
struct Envelope<'a> {
    /// Caller context.
    context: &'a WireContext,
    /// Operation payload.
    payload: Value,
}

/// Caller context as sent on the wire.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct WireContext {
    /// Caller account.
    account_id: AccountId,
    /// Extension context with the optional project.
    #[serde(skip_serializing_if = "Option::is_none")]
    extension: Option<WireExtension>,
}

/// Extension context.
#[derive(Debug, Clone, Serialize)]
struct WireExtension {
    /// Project reference.
    project: WireProject,
}

/// Project reference.
#[derive(Debug, Clone, Serialize)]
struct WireProject {
    /// Project key.
    key: ProjectKey,
}

/// Standard error body.
#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    /// Error detail.
    error: ErrorPayload,
}

/// Error detail.
#[derive(Debug, Deserialize)]
struct ErrorPayload {
    /// Error code.
    code: String,
    /// Caller-safe message.
    message: String,
}

// ============================================================================
// SECTION: HTTP Bridge
// ============================================================================

/// Bridge that posts operations to the HTTP call boundary.
#[derive(Debug, Clone)]
pub struct HttpBridge {
    /// Server base URL.
    endpoint: Url,
    /// Caller context sent with every operation.
    context: WireContext,
    /// Host bearer token.
    bearer_token: Option<String>,
    /// HTTP client.
    client: Client,
}

impl HttpBridge {
    /// Builds a bridge for `account` against `endpoint`.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::Transport`] when the endpoint is not an
    /// `http(s)` URL or the client cannot be built.
    pub fn new(
        endpoint: &str,
        account: AccountId,
        project: Option<ProjectKey>,
    ) -> Result<Self, BridgeError> {
        let endpoint = Url::parse(endpoint)
            .map_err(|err| BridgeError::Transport(format!("invalid endpoint: {err}")))?;
        if !matches!(endpoint.scheme(), "http" | "https") {
            return Err(BridgeError::Transport("endpoint must be http or https".to_string()));
        }
        let client = Client::builder()
            .build()
            .map_err(|err| BridgeError::Transport(format!("http client build failed: {err}")))?;
        Ok(Self {
            endpoint,
            context: WireContext {
                account_id: account,
                extension: project.map(|key| WireExtension {
                    project: WireProject {
                        key,
                    },
                }),
            },
            bearer_token: None,
            client,
        })
    }

    /// Returns a bridge that sends `token` as the host bearer token.
    #[must_use]
    pub fn with_bearer_token(mut self, token: impl Into<String>) -> Self {
        self.bearer_token = Some(token.into());
        self
    }

    /// Builds the URL for `operation`.
    fn operation_url(&self, operation: &str) -> Result<Url, BridgeError> {
        let mut url = self.endpoint.clone();
        url.path_segments_mut()
            .map_err(|()| BridgeError::Transport("endpoint cannot be a base".to_string()))?
            .pop_if_empty()
            .extend(["invoke", operation]);
        Ok(url)
    }

    /// Invokes `operation` and returns the success body.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError`] for transport failures, error bodies, and
    /// undecodable responses.
    pub async fn invoke(&self, operation: &str, payload: Value) -> Result<Value, BridgeError> {
        let url = self.operation_url(operation)?;
        let mut headers = HeaderMap::new();
        if let Some(token) = &self.bearer_token {
            let value = HeaderValue::from_str(&format!("Bearer {token}"))
                .map_err(|err| BridgeError::Transport(format!("invalid bearer token: {err}")))?;
            headers.insert(AUTHORIZATION, value);
        }
        let envelope = Envelope {
            context: &self.context,
            payload,
        };
        let mut response = self
            .client
            .post(url)
            .headers(headers)
            .json(&envelope)
            .send()
            .await
            .map_err(|err| BridgeError::Transport(err.to_string()))?;
        let status = response.status();
        let body = read_body_with_limit(&mut response).await?;
        if status.is_success() {
            return serde_json::from_slice(&body)
                .map_err(|err| BridgeError::InvalidResponse(err.to_string()));
        }
        Err(error_from_body(status.as_u16(), &body))
    }
}

#[async_trait]
impl DashboardBridge for HttpBridge {
    async fn dashboard_data(&self) -> Result<DashboardKpis, BridgeError> {
        let value = self.invoke("getDashboardData", Value::Null).await?;
        decode_dashboard(value)
    }

    async fn agent_data(&self) -> Result<AgentDataset, BridgeError> {
        let value = self.invoke("getAgentData", Value::Null).await?;
        decode_agents(value)
    }
}

// ============================================================================
// SECTION: Decoding
// ============================================================================

/// Validates and decodes a KPI payload.
///
/// # Errors
///
/// Returns [`BridgeError::InvalidResponse`] when the payload is malformed.
pub fn decode_dashboard(value: Value) -> Result<DashboardKpis, BridgeError> {
    validate_dashboard_value(&value).map_err(|err| BridgeError::InvalidResponse(err.to_string()))?;
    serde_json::from_value(value).map_err(|err| BridgeError::InvalidResponse(err.to_string()))
}

/// Validates and decodes an agent dataset.
///
/// # Errors
///
/// Returns [`BridgeError::InvalidResponse`] when a record is malformed or the
/// count disagrees with the roster.
pub fn decode_agents(value: Value) -> Result<AgentDataset, BridgeError> {
    let records = value
        .get("agents")
        .and_then(Value::as_array)
        .ok_or_else(|| BridgeError::InvalidResponse("agents array missing".to_string()))?;
    for record in records {
        validate_agent_value(record).map_err(|err| BridgeError::InvalidResponse(err.to_string()))?;
    }
    let dataset: AgentDataset = serde_json::from_value(value)
        .map_err(|err| BridgeError::InvalidResponse(err.to_string()))?;
    if dataset.total_count != dataset.agents.len() {
        return Err(BridgeError::InvalidResponse(format!(
            "totalCount {} does not match {} agents",
            dataset.total_count,
            dataset.agents.len()
        )));
    }
    Ok(dataset)
}

/// Maps a non-success response onto a bridge error.
fn error_from_body(status: u16, body: &[u8]) -> BridgeError {
    let Ok(envelope) = serde_json::from_slice::<ErrorEnvelope>(body) else {
        return BridgeError::Failed {
            status,
            message: format!("http status {status} with body {}", body_preview(body)),
        };
    };
    let ErrorPayload {
        code,
        message,
    } = envelope.error;
    // Only a 403 role denial drives the access-denied view; host token
    // failures (401, `UNAUTHENTICATED`) surface as ordinary failures.
    match code.as_str() {
        "ACCESS_DENIED" if status == 403 => BridgeError::AccessDenied(message),
        "SERVICE_UNAVAILABLE" => BridgeError::ServiceUnavailable(message),
        _ => BridgeError::Failed {
            status,
            message,
        },
    }
}

/// Reads the response body while enforcing [`MAX_RESPONSE_BYTES`].
async fn read_body_with_limit(response: &mut reqwest::Response) -> Result<Vec<u8>, BridgeError> {
    let limit = u64::try_from(MAX_RESPONSE_BYTES)
        .map_err(|_| BridgeError::InvalidResponse("response limit out of range".to_string()))?;
    if let Some(length) = response.content_length()
        && length > limit
    {
        return Err(BridgeError::InvalidResponse(format!(
            "response body exceeds size limit ({length} > {limit})"
        )));
    }
    let mut body = Vec::new();
    while let Some(chunk) =
        response.chunk().await.map_err(|err| BridgeError::Transport(err.to_string()))?
    {
        if body.len().saturating_add(chunk.len()) > MAX_RESPONSE_BYTES {
            return Err(BridgeError::InvalidResponse(
                "response body exceeds size limit".to_string(),
            ));
        }
        body.extend_from_slice(&chunk);
    }
    Ok(body)
}

/// Bounded UTF-8 preview of a body for error messages.
fn body_preview(bytes: &[u8]) -> String {
    let end = bytes.len().min(MAX_ERROR_PREVIEW_BYTES);
    String::from_utf8_lossy(&bytes[.. end]).into_owned()
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, reason = "Test-only assertions.")]

    use qa_dashboard_core::AccountId;
    use qa_dashboard_core::ProjectKey;
    use serde_json::json;

    use super::BridgeError;
    use super::HttpBridge;
    use super::decode_agents;
    use super::error_from_body;

    #[test]
    fn operation_url_appends_segments() {
        let bridge =
            HttpBridge::new("http://127.0.0.1:9000/", AccountId::new("acc-1"), None).unwrap();
        assert_eq!(
            bridge.operation_url("getAgentData").unwrap().as_str(),
            "http://127.0.0.1:9000/invoke/getAgentData"
        );
    }

    #[test]
    fn rejects_non_http_endpoint() {
        let result = HttpBridge::new("ftp://host", AccountId::new("acc-1"), None);
        assert!(matches!(result, Err(BridgeError::Transport(_))));
    }

    #[test]
    fn context_serializes_project_key() {
        let bridge = HttpBridge::new(
            "http://127.0.0.1:9000",
            AccountId::new("acc-1"),
            Some(ProjectKey::new("QA")),
        )
        .unwrap();
        let value = serde_json::to_value(&bridge.context).unwrap();
        assert_eq!(value, json!({"accountId": "acc-1", "extension": {"project": {"key": "QA"}}}));
    }

    #[test]
    fn error_codes_map_to_variants() {
        let denied = br#"{"error":{"code":"ACCESS_DENIED","message":"no","timestamp":"t"}}"#;
        assert!(error_from_body(403, denied).is_access_denied());
        let busy = br#"{"error":{"code":"SERVICE_UNAVAILABLE","message":"later","timestamp":"t"}}"#;
        assert_eq!(
            error_from_body(503, busy),
            BridgeError::ServiceUnavailable("later".to_string())
        );
        assert!(matches!(error_from_body(502, b"<html>"), BridgeError::Failed { status: 502, .. }));
    }

    #[test]
    fn agent_count_must_match_roster() {
        let result = decode_agents(json!({"agents": [], "totalCount": 3, "lastUpdated": "t"}));
        assert!(matches!(result, Err(BridgeError::InvalidResponse(_))));
    }
}
