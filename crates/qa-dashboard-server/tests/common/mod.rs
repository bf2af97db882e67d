// crates/qa-dashboard-server/tests/common/mod.rs
// =============================================================================
// Module: Server Test Helpers
// Description: In-memory authority, fixed clock, and loopback server.
// Purpose: Drive the HTTP boundary end to end without a real authority.
// =============================================================================

#![allow(dead_code, reason = "Test helpers are selectively used across suites.")]
#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "Test-only helpers use unwrap/expect for clarity."
)]

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use qa_dashboard_authority::AccessError;
use qa_dashboard_authority::AccessGate;
use qa_dashboard_authority::ActorUser;
use qa_dashboard_authority::GroupList;
use qa_dashboard_authority::GroupRef;
use qa_dashboard_authority::ProjectRoles;
use qa_dashboard_authority::RoleActor;
use qa_dashboard_authority::RoleAuthority;
use qa_dashboard_authority::RoleDetail;
use qa_dashboard_authority::RoleResolution;
use qa_dashboard_authority::UserProfile;
use qa_dashboard_config::FailurePolicy;
use qa_dashboard_config::ServerConfig;
use qa_dashboard_core::AccountId;
use qa_dashboard_core::FixtureDataSource;
use qa_dashboard_core::ProjectKey;
use qa_dashboard_core::RoleId;
use qa_dashboard_server::Clock;
use qa_dashboard_server::MemoryAuditSink;
use qa_dashboard_server::Resolver;
use qa_dashboard_server::router;
use qa_dashboard_server::serve_listener;
use serde_json::Value;
use serde_json::json;
use time::OffsetDateTime;
use time::macros::datetime;
use tokio::net::TcpListener;

/// Account that holds the QA Manager role and group.
pub const MANAGER: &str = "acc-manager";
/// Account with neither role nor group.
pub const DEVELOPER: &str = "acc-dev";
/// Frozen test time.
pub const NOW: OffsetDateTime = datetime!(2026-10-18 09:30:00 UTC);

// ============================================================================
// SECTION: Fakes
// ============================================================================

/// Clock pinned to [`NOW`].
pub struct FixedClock;

impl Clock for FixedClock {
    fn now(&self) -> OffsetDateTime {
        NOW
    }
}

/// In-memory authority: `MANAGER` is a role member and in `qa-managers`.
pub struct StubAuthority {
    /// Failure returned from every call, when set.
    failure: Option<AccessError>,
}

impl StubAuthority {
    /// Healthy authority.
    pub const fn healthy() -> Self {
        Self {
            failure: None,
        }
    }

    /// Authority that fails every call.
    pub const fn failing(error: AccessError) -> Self {
        Self {
            failure: Some(error),
        }
    }

    fn check(&self) -> Result<(), AccessError> {
        self.failure.clone().map_or(Ok(()), Err)
    }
}

#[async_trait]
impl RoleAuthority for StubAuthority {
    async fn project_roles(&self, _project: &ProjectKey) -> Result<ProjectRoles, AccessError> {
        self.check()?;
        let mut roles = BTreeMap::new();
        roles.insert(
            "QA Manager".to_string(),
            "https://tracker.example/rest/api/3/project/QA/role/10002".to_string(),
        );
        Ok(roles)
    }

    async fn role_detail(
        &self,
        _project: &ProjectKey,
        _role: RoleId,
    ) -> Result<RoleDetail, AccessError> {
        self.check()?;
        Ok(RoleDetail {
            name: Some("QA Manager".to_string()),
            actors: vec![RoleActor {
                display_name: Some("Manager".to_string()),
                actor_user: Some(ActorUser {
                    account_id: MANAGER.to_string(),
                }),
            }],
        })
    }

    async fn user_with_groups(&self, account: &AccountId) -> Result<UserProfile, AccessError> {
        self.check()?;
        let groups = if account.as_str() == MANAGER {
            vec![group("qa-managers"), group("jira-users")]
        } else {
            vec![group("jira-users")]
        };
        Ok(UserProfile {
            account_id: account.as_str().to_string(),
            display_name: Some("Test User".to_string()),
            email_address: None,
            groups: Some(GroupList {
                items: groups,
            }),
        })
    }

    async fn user_groups(&self, _account: &AccountId) -> Result<Vec<GroupRef>, AccessError> {
        self.check()?;
        Ok(Vec::new())
    }
}

fn group(name: &str) -> GroupRef {
    GroupRef {
        name: name.to_string(),
        group_id: None,
    }
}

// ============================================================================
// SECTION: Harness
// ============================================================================

/// Running loopback server.
pub struct TestServer {
    /// Base URL, for example `http://127.0.0.1:40123`.
    pub base_url: String,
    /// Audit events captured from the resolver and transport.
    pub audit: Arc<MemoryAuditSink>,
    /// HTTP client.
    pub client: reqwest::Client,
}

impl TestServer {
    /// Posts `body` to `/invoke/{operation}` and returns status and JSON.
    pub async fn invoke(&self, operation: &str, body: &Value) -> (u16, Value) {
        self.invoke_with(operation, body, None).await
    }

    /// Posts with an optional bearer token.
    pub async fn invoke_with(
        &self,
        operation: &str,
        body: &Value,
        token: Option<&str>,
    ) -> (u16, Value) {
        let mut request =
            self.client.post(format!("{}/invoke/{operation}", self.base_url)).json(body);
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }
        let response = request.send().await.expect("send");
        let status = response.status().as_u16();
        let value = response.json::<Value>().await.expect("json body");
        (status, value)
    }

    /// Posts raw bytes to `/invoke/{operation}`.
    pub async fn invoke_raw(&self, operation: &str, body: Vec<u8>) -> (u16, Value) {
        let response = self
            .client
            .post(format!("{}/invoke/{operation}", self.base_url))
            .header("content-type", "application/json")
            .body(body)
            .send()
            .await
            .expect("send");
        let status = response.status().as_u16();
        let value = response.json::<Value>().await.expect("json body");
        (status, value)
    }
}

/// Options for [`spawn_server`].
pub struct Harness {
    /// Authority backing the gate.
    pub authority: StubAuthority,
    /// Failure policy.
    pub policy: FailurePolicy,
    /// Host bearer tokens.
    pub bearer_tokens: Vec<String>,
    /// Body limit.
    pub max_body_bytes: usize,
    /// Project used when the caller context names none.
    pub default_project: Option<ProjectKey>,
}

impl Default for Harness {
    fn default() -> Self {
        Self {
            authority: StubAuthority::healthy(),
            policy: FailurePolicy::FailClosed,
            bearer_tokens: Vec::new(),
            max_body_bytes: 64 * 1024,
            default_project: Some(ProjectKey::new("QA")),
        }
    }
}

/// Starts a loopback server for `harness`.
pub async fn spawn_server(harness: Harness) -> TestServer {
    let gate = AccessGate::new(
        Arc::new(harness.authority),
        RoleResolution::Lookup {
            role_name: "QA Manager".to_string(),
        },
        harness.default_project,
        "qa manager",
        harness.policy,
    );
    let audit = Arc::new(MemoryAuditSink::new());
    let resolver = Resolver::new(
        Arc::new(gate),
        Arc::new(FixtureDataSource::new()),
        audit.clone(),
        Arc::new(FixedClock),
    );
    let server = ServerConfig {
        bind: "127.0.0.1:0".to_string(),
        max_body_bytes: harness.max_body_bytes,
        bearer_tokens: harness.bearer_tokens,
    };
    let app = router(Arc::new(resolver), &server);
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    tokio::spawn(async move {
        let _ = serve_listener(listener, app).await;
    });
    TestServer {
        base_url: format!("http://{addr}"),
        audit,
        client: reqwest::Client::new(),
    }
}

/// Envelope for `account` in project `QA`.
pub fn envelope(account: &str, payload: Value) -> Value {
    json!({
        "context": {"accountId": account, "extension": {"project": {"key": "QA"}}},
        "payload": payload,
    })
}
