// crates/qa-dashboard-authority/tests/common/mod.rs
// =============================================================================
// Module: Authority Test Helpers
// Description: Stub HTTP authority and in-memory authority for gate tests.
// Purpose: Share fixtures across the authority integration suites.
// =============================================================================

#![allow(dead_code, reason = "Test helpers are selectively used across suites.")]
#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "Test-only helpers use unwrap/expect for clarity."
)]

use std::collections::BTreeMap;
use std::sync::Mutex;
use std::thread;
use std::thread::JoinHandle;
use std::time::Duration;

use async_trait::async_trait;
use qa_dashboard_authority::AccessError;
use qa_dashboard_authority::ActorUser;
use qa_dashboard_authority::GroupRef;
use qa_dashboard_authority::JiraAuthority;
use qa_dashboard_authority::ProjectRoles;
use qa_dashboard_authority::RetryPolicy;
use qa_dashboard_authority::RoleActor;
use qa_dashboard_authority::RoleAuthority;
use qa_dashboard_authority::RoleDetail;
use qa_dashboard_authority::UserProfile;
use qa_dashboard_core::AccountId;
use qa_dashboard_core::ProjectKey;
use qa_dashboard_core::RoleId;
use tiny_http::Header;
use tiny_http::Response;
use tiny_http::Server;
use url::Url;

// ============================================================================
// SECTION: Stub HTTP Server
// ============================================================================

/// Request observed by the stub server.
#[derive(Debug, Clone)]
pub struct CapturedRequest {
    /// Request path and query.
    pub url: String,
    /// Authorization header value, if any.
    pub authorization: Option<String>,
}

/// Serves `responses` in order, one per request, then stops.
pub fn spawn_stub(responses: Vec<(u16, String)>) -> (String, JoinHandle<Vec<CapturedRequest>>) {
    let server = Server::http("127.0.0.1:0").expect("http server");
    let addr = server.server_addr();
    let handle = thread::spawn(move || {
        let mut captured = Vec::new();
        for (status, body) in responses {
            let Ok(request) = server.recv() else {
                break;
            };
            let authorization = request
                .headers()
                .iter()
                .find(|header| header.field.equiv("Authorization"))
                .map(|header| header.value.as_str().to_string());
            captured.push(CapturedRequest {
                url: request.url().to_string(),
                authorization,
            });
            let response = Response::from_string(body).with_status_code(status).with_header(
                Header::from_bytes("Content-Type", "application/json").expect("header"),
            );
            request.respond(response).expect("respond");
        }
        captured
    });
    (format!("http://{addr}"), handle)
}

/// Builds a Jira authority against a stub base URL with fast retries.
pub fn stub_authority(base_url: &str, token: Option<&str>, attempts: u32) -> JiraAuthority {
    JiraAuthority::new(
        Url::parse(base_url).expect("base url"),
        token.map(str::to_string),
        Duration::from_millis(500),
        Duration::from_millis(2_000),
        RetryPolicy::new(attempts, Duration::from_millis(5)),
    )
    .expect("authority")
}

// ============================================================================
// SECTION: In-Memory Authority
// ============================================================================

/// Scripted authority answering from fixed data.
#[derive(Default)]
pub struct ScriptedAuthority {
    /// Roles per project key.
    pub roles: BTreeMap<String, ProjectRoles>,
    /// Role members per role id.
    pub members: BTreeMap<u64, Vec<String>>,
    /// Expanded user profile returned for every account.
    pub profile: Option<UserProfile>,
    /// Direct group list.
    pub direct_groups: Vec<GroupRef>,
    /// Failure returned by every call when set.
    pub failure: Option<AccessError>,
    /// Log of calls made.
    pub calls: Mutex<Vec<String>>,
}

impl ScriptedAuthority {
    /// Authority with a `QA` project whose "QA Manager" role (id 10002) has `members`.
    pub fn with_qa_role(members: &[&str]) -> Self {
        let mut roles = ProjectRoles::new();
        roles.insert(
            "QA Manager".to_string(),
            "https://example.atlassian.net/rest/api/3/project/QA/role/10002".to_string(),
        );
        roles.insert(
            "Developers".to_string(),
            "https://example.atlassian.net/rest/api/3/project/QA/role/10001".to_string(),
        );
        let mut authority = Self::default();
        authority.roles.insert("QA".to_string(), roles);
        authority.members.insert(10_002, members.iter().map(ToString::to_string).collect());
        authority
    }

    /// Authority that fails every call with `error`.
    pub fn failing(error: AccessError) -> Self {
        Self {
            failure: Some(error),
            ..Self::default()
        }
    }

    /// Returns the recorded call names.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: &str) -> Result<(), AccessError> {
        self.calls.lock().unwrap().push(call.to_string());
        self.failure.clone().map_or(Ok(()), Err)
    }
}

#[async_trait]
impl RoleAuthority for ScriptedAuthority {
    async fn project_roles(&self, project: &ProjectKey) -> Result<ProjectRoles, AccessError> {
        self.record("project_roles")?;
        self.roles.get(project.as_str()).cloned().ok_or_else(|| AccessError::Upstream {
            status: 404,
            endpoint: "project roles".to_string(),
        })
    }

    async fn role_detail(
        &self,
        _project: &ProjectKey,
        role: RoleId,
    ) -> Result<RoleDetail, AccessError> {
        self.record("role_detail")?;
        let members = self.members.get(&role.get()).cloned().unwrap_or_default();
        let actors = members
            .into_iter()
            .map(|account_id| RoleActor {
                display_name: None,
                actor_user: Some(ActorUser {
                    account_id,
                }),
            })
            .collect();
        Ok(RoleDetail {
            name: None,
            actors,
        })
    }

    async fn user_with_groups(&self, account: &AccountId) -> Result<UserProfile, AccessError> {
        self.record("user_with_groups")?;
        Ok(self.profile.clone().unwrap_or_else(|| UserProfile {
            account_id: account.as_str().to_string(),
            display_name: None,
            email_address: None,
            groups: None,
        }))
    }

    async fn user_groups(&self, _account: &AccountId) -> Result<Vec<GroupRef>, AccessError> {
        self.record("user_groups")?;
        Ok(self.direct_groups.clone())
    }
}
