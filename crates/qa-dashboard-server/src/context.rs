// crates/qa-dashboard-server/src/context.rs
// ============================================================================
// Module: Invocation Context
// Description: Request envelope and caller context for invocations.
// Purpose: Decode the host-supplied caller identity and project.
// Dependencies: qa-dashboard-core, serde
// ============================================================================

//! Invocation envelope: `{"context": {...}, "payload": {...}}`.

use qa_dashboard_core::AccountId;
use qa_dashboard_core::ProjectKey;
use serde::Deserialize;
use serde_json::Value;

/// Request body for `POST /invoke/{operation}`.
#[derive(Debug, Clone, Deserialize)]
pub struct InvocationRequest {
    /// Caller context supplied by the host.
    pub context: CallerContext,
    /// Operation-specific payload.
    #[serde(default)]
    pub payload: Value,
}

/// Caller identity and host extension data.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallerContext {
    /// Authenticated caller account.
    pub account_id: AccountId,
    /// Host extension context.
    #[serde(default)]
    pub extension: Option<ExtensionContext>,
}

impl CallerContext {
    /// Builds a context with an optional project key.
    #[must_use]
    pub fn new(account_id: AccountId, project: Option<ProjectKey>) -> Self {
        Self {
            account_id,
            extension: project.map(|key| ExtensionContext {
                project: Some(ProjectRef {
                    key,
                }),
            }),
        }
    }

    /// Returns the project key from `extension.project.key`.
    #[must_use]
    pub fn project_key(&self) -> Option<&ProjectKey> {
        self.extension.as_ref()?.project.as_ref().map(|project| &project.key)
    }
}

/// Host extension context.
#[derive(Debug, Clone, Deserialize)]
pub struct ExtensionContext {
    /// Project the extension is rendered in.
    #[serde(default)]
    pub project: Option<ProjectRef>,
}

/// Project reference.
#[derive(Debug, Clone, Deserialize)]
pub struct ProjectRef {
    /// Project key.
    pub key: ProjectKey,
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, reason = "Test-only assertions.")]

    use super::InvocationRequest;

    #[test]
    fn decodes_full_envelope() {
        let request: InvocationRequest = serde_json::from_str(
            r#"{"context":{"accountId":"acc-1","extension":{"project":{"key":"QA"}}},
                "payload":{"agentId":3}}"#,
        )
        .unwrap();
        assert_eq!(request.context.account_id.as_str(), "acc-1");
        assert_eq!(request.context.project_key().unwrap().as_str(), "QA");
        assert_eq!(request.payload["agentId"], 3);
    }

    #[test]
    fn project_and_payload_are_optional() {
        let request: InvocationRequest =
            serde_json::from_str(r#"{"context":{"accountId":"acc-1","extension":{}}}"#).unwrap();
        assert!(request.context.project_key().is_none());
        assert!(request.payload.is_null());
    }
}
