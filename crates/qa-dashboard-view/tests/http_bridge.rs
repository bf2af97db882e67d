// crates/qa-dashboard-view/tests/http_bridge.rs
// ============================================================================
// Module: HTTP Bridge Tests
// Description: Envelope encoding, error mapping, and response validation.
// Purpose: Ensure the bridge only hands validated datasets to the view.
// Dependencies: qa-dashboard-view, tiny_http
// ============================================================================

//! HTTP bridge tests.

#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "Test-only panic-based assertions are permitted."
)]

mod common;

use common::dataset;
use common::kpis;
use common::spawn_stub;
use qa_dashboard_core::AccountId;
use qa_dashboard_core::ProjectKey;
use qa_dashboard_view::BridgeError;
use qa_dashboard_view::Dashboard;
use qa_dashboard_view::DashboardBridge;
use qa_dashboard_view::HttpBridge;
use qa_dashboard_view::Phase;
use qa_dashboard_view::Tab;
use serde_json::json;

fn bridge(base: &str) -> HttpBridge {
    HttpBridge::new(base, AccountId::new("acc-1"), Some(ProjectKey::new("QA"))).unwrap()
}

#[tokio::test(flavor = "multi_thread")]
async fn posts_envelope_with_bearer_token() {
    let body = serde_json::to_string(&kpis()).unwrap();
    let (base, handle) = spawn_stub(vec![(200, body)]);
    let bridge = bridge(&base).with_bearer_token("host-secret");

    let data = bridge.dashboard_data().await.unwrap();
    assert_eq!(data, kpis());

    let captured = handle.join().unwrap();
    assert_eq!(captured[0].url, "/invoke/getDashboardData");
    assert_eq!(captured[0].authorization.as_deref(), Some("Bearer host-secret"));
    assert_eq!(
        captured[0].body["context"],
        json!({"accountId": "acc-1", "extension": {"project": {"key": "QA"}}})
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn decodes_agent_dataset() {
    let body = serde_json::to_string(&dataset()).unwrap();
    let (base, handle) = spawn_stub(vec![(200, body)]);
    let roster = bridge(&base).agent_data().await.unwrap();
    assert_eq!(roster.total_count, 11);
    assert_eq!(handle.join().unwrap()[0].url, "/invoke/getAgentData");
}

#[tokio::test(flavor = "multi_thread")]
async fn maps_error_bodies() {
    let denied = json!({"error": {
        "code": "ACCESS_DENIED",
        "message": "ACCESS_DENIED: You are not a QA Manager. No access to dashboard.",
        "timestamp": "2026-10-18T09:30:00Z"
    }});
    let (base, _handle) = spawn_stub(vec![(403, denied.to_string())]);
    let error = bridge(&base).dashboard_data().await.unwrap_err();
    assert!(error.is_access_denied());
    assert_eq!(
        error.to_string(),
        "ACCESS_DENIED: You are not a QA Manager. No access to dashboard."
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn host_token_rejection_is_a_generic_failure() {
    let rejected = json!({"error": {
        "code": "UNAUTHENTICATED",
        "message": "unauthenticated: missing authorization",
        "timestamp": "2026-10-18T09:30:00Z"
    }});
    let responses = vec![(401, rejected.to_string()), (401, rejected.to_string())];
    let (base, _handle) = spawn_stub(responses);
    let error = bridge(&base).dashboard_data().await.unwrap_err();
    assert!(!error.is_access_denied());
    assert!(matches!(error, BridgeError::Failed { status: 401, .. }));

    let mut dashboard = Dashboard::new(bridge(&base));
    dashboard.mount().await;
    assert!(matches!(dashboard.state().phase(), Phase::Error(_)));
}

#[tokio::test(flavor = "multi_thread")]
async fn rejects_records_missing_metrics() {
    let mut value = serde_json::to_value(dataset()).unwrap();
    value["agents"][0]["metrics"].as_object_mut().unwrap().remove("fcr");
    let (base, _handle) = spawn_stub(vec![(200, value.to_string())]);
    let error = bridge(&base).agent_data().await.unwrap_err();
    assert!(matches!(error, BridgeError::InvalidResponse(message) if message.contains("fcr")));
}

#[tokio::test(flavor = "multi_thread")]
async fn rejects_incomplete_kpi_set() {
    let mut value = serde_json::to_value(kpis()).unwrap();
    value.as_object_mut().unwrap().remove("kpi5");
    let (base, _handle) = spawn_stub(vec![(200, value.to_string())]);
    let error = bridge(&base).dashboard_data().await.unwrap_err();
    assert!(matches!(error, BridgeError::InvalidResponse(_)));
}

#[tokio::test(flavor = "multi_thread")]
async fn driver_renders_denial_from_http() {
    let denied = json!({"error": {"code": "ACCESS_DENIED", "message": "denied", "timestamp": "t"}});
    let (base, _handle) = spawn_stub(vec![(403, denied.to_string())]);
    let mut dashboard = Dashboard::new(bridge(&base));
    dashboard.mount().await;
    assert_eq!(dashboard.state().phase(), &Phase::AccessDenied("denied".to_string()));
    dashboard.open_tab(Tab::Agents).await;
    assert!(dashboard.state().agents().is_none());
}
