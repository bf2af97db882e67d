// crates/qa-dashboard-server/tests/call_boundary.rs
// ============================================================================
// Module: Call Boundary Tests
// Description: Host auth, routing, envelope decoding, and access reports.
// Purpose: Ensure boundary failures use the standard error body.
// Dependencies: qa-dashboard-server, reqwest
// ============================================================================

//! Call boundary tests.

#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "Test-only panic-based assertions are permitted."
)]

mod common;

use common::DEVELOPER;
use common::Harness;
use common::MANAGER;
use common::StubAuthority;
use common::envelope;
use common::spawn_server;
use qa_dashboard_authority::AccessError;
use qa_dashboard_config::FailurePolicy;
use qa_dashboard_server::token_fingerprint;
use serde_json::Value;
use serde_json::json;

// ============================================================================
// SECTION: Boundary Failures
// ============================================================================

#[tokio::test(flavor = "multi_thread")]
async fn unknown_operation_is_not_found() {
    let server = spawn_server(Harness::default()).await;
    let (status, body) = server.invoke("getText", &envelope(MANAGER, Value::Null)).await;
    assert_eq!(status, 404);
    assert_eq!(body["error"]["code"], "UNKNOWN");
    assert_eq!(body["error"]["message"], "Unknown operation: getText");
}

#[tokio::test(flavor = "multi_thread")]
async fn malformed_envelope_is_bad_request() {
    let server = spawn_server(Harness::default()).await;
    let (status, body) = server.invoke_raw("getAgentData", b"{not json".to_vec()).await;
    assert_eq!(status, 400);
    assert_eq!(body["error"]["code"], "UNKNOWN");

    let (status, _) = server.invoke("getAgentData", &json!({"payload": {}})).await;
    assert_eq!(status, 400);
}

#[tokio::test(flavor = "multi_thread")]
async fn blank_account_is_bad_request() {
    let server = spawn_server(Harness::default()).await;
    let (status, body) = server.invoke("getAgentData", &envelope("  ", Value::Null)).await;
    assert_eq!(status, 400);
    assert_eq!(body["error"]["message"], "Invalid request: accountId is required");
}

#[tokio::test(flavor = "multi_thread")]
async fn oversized_body_is_rejected() {
    let server = spawn_server(Harness {
        max_body_bytes: 256,
        ..Harness::default()
    })
    .await;
    let padding = "x".repeat(1024);
    let (status, body) = server
        .invoke("searchAgents", &envelope(MANAGER, json!({"searchTerm": padding})))
        .await;
    assert_eq!(status, 413);
    assert_eq!(body["error"]["code"], "UNKNOWN");
}

#[tokio::test(flavor = "multi_thread")]
async fn host_token_is_required_when_configured() {
    let server = spawn_server(Harness {
        bearer_tokens: vec!["host-secret".to_string()],
        ..Harness::default()
    })
    .await;
    let request = envelope(MANAGER, Value::Null);

    let (status, body) = server.invoke("getDashboardData", &request).await;
    assert_eq!(status, 401);
    assert_eq!(body["error"]["code"], "UNAUTHENTICATED");

    let (status, _) = server.invoke_with("getDashboardData", &request, Some("wrong")).await;
    assert_eq!(status, 401);

    let (status, _) = server.invoke_with("getDashboardData", &request, Some("host-secret")).await;
    assert_eq!(status, 200);

    let invoked = server.audit.events_named("operation_invoked");
    assert_eq!(invoked.len(), 3);
    assert_eq!(invoked[2]["token_fingerprint"], token_fingerprint("host-secret"));
    let serialized = serde_json::to_string(&server.audit.events()).unwrap();
    assert!(!serialized.contains("host-secret"));
}

// ============================================================================
// SECTION: Access Reports
// ============================================================================

#[tokio::test(flavor = "multi_thread")]
async fn access_report_reflects_group_membership() {
    let server = spawn_server(Harness::default()).await;

    let (status, report) = server.invoke("checkUserAccess", &envelope(MANAGER, Value::Null)).await;
    assert_eq!(status, 200);
    assert_eq!(report["hasAccess"], true);
    assert_eq!(report["accountId"], MANAGER);
    assert_eq!(report["user"]["displayName"], "Test User");
    assert_eq!(report["groups"].as_array().unwrap().len(), 2);
    assert!(report.get("error").is_none());

    let (status, report) =
        server.invoke("checkUserAccess", &envelope(DEVELOPER, Value::Null)).await;
    assert_eq!(status, 200);
    assert_eq!(report["hasAccess"], false);
}

#[tokio::test(flavor = "multi_thread")]
async fn access_report_never_fails_under_either_policy() {
    let cases = [(FailurePolicy::FailClosed, false), (FailurePolicy::FailOpen, true)];
    for (policy, expected) in cases {
        let server = spawn_server(Harness {
            authority: StubAuthority::failing(AccessError::Upstream {
                status: 502,
                endpoint: "user".to_string(),
            }),
            policy,
            ..Harness::default()
        })
        .await;
        let (status, report) =
            server.invoke("checkUserAccess", &envelope(MANAGER, Value::Null)).await;
        assert_eq!(status, 200);
        assert_eq!(report["hasAccess"], expected);
        assert!(report["user"].is_null());
        assert!(report["error"].as_str().unwrap().contains("502"));
    }
}
