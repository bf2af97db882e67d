// crates/qa-dashboard-view/tests/common/mod.rs
// =============================================================================
// Module: View Test Helpers
// Description: Scripted bridge and fixture roster builders.
// Purpose: Share fixtures across the view integration suites.
// =============================================================================

#![allow(dead_code, reason = "Test helpers are selectively used across suites.")]
#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "Test-only helpers use unwrap/expect for clarity."
)]

use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering;
use std::thread;
use std::thread::JoinHandle;

use async_trait::async_trait;
use qa_dashboard_core::AgentDataset;
use qa_dashboard_core::AgentId;
use qa_dashboard_core::AgentRecord;
use qa_dashboard_core::AgentSource;
use qa_dashboard_core::DashboardKpis;
use qa_dashboard_core::FixtureDataSource;
use qa_dashboard_core::KpiSource;
use qa_dashboard_view::BridgeError;
use qa_dashboard_view::DashboardBridge;
use serde_json::Value;
use tiny_http::Header;
use tiny_http::Response;
use tiny_http::Server;

/// Fixture roster (11 agents).
pub fn roster() -> Vec<AgentRecord> {
    FixtureDataSource::new().list_agents().expect("fixture roster")
}

/// Fixture KPI set.
pub fn kpis() -> DashboardKpis {
    FixtureDataSource::new().get_kpis().expect("fixture kpis")
}

/// Fixture roster wrapped as a dataset.
pub fn dataset() -> AgentDataset {
    let agents = roster();
    AgentDataset {
        total_count: agents.len(),
        agents,
        last_updated: "2026-10-18T09:30:00Z".to_string(),
    }
}

/// Builds agents from the fixture template, one per `(name, score)` row.
pub fn synthetic_roster(rows: &[(String, f64)]) -> Vec<AgentRecord> {
    let template = roster().remove(0);
    rows.iter()
        .enumerate()
        .map(|(index, (name, score))| {
            let mut agent = template.clone();
            agent.id = AgentId::new(u64::try_from(index).expect("index") + 1);
            agent.name = name.clone();
            agent.overall_score = *score;
            agent.metrics.error_rate = 20.0 - *score;
            agent.metrics.fcr = *score * 10.0;
            agent
        })
        .collect()
}

/// Bridge returning scripted results and counting calls.
pub struct ScriptedBridge {
    /// Dashboard result.
    pub dashboard: Result<DashboardKpis, BridgeError>,
    /// Agent result.
    pub agents: Result<AgentDataset, BridgeError>,
    /// Dashboard calls observed.
    pub dashboard_calls: AtomicUsize,
    /// Agent calls observed.
    pub agent_calls: AtomicUsize,
}

impl ScriptedBridge {
    /// Bridge serving the fixture datasets.
    pub fn healthy() -> Self {
        Self {
            dashboard: Ok(kpis()),
            agents: Ok(dataset()),
            dashboard_calls: AtomicUsize::new(0),
            agent_calls: AtomicUsize::new(0),
        }
    }

    /// Number of agent fetches issued.
    pub fn agent_fetches(&self) -> usize {
        self.agent_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DashboardBridge for ScriptedBridge {
    async fn dashboard_data(&self) -> Result<DashboardKpis, BridgeError> {
        self.dashboard_calls.fetch_add(1, Ordering::SeqCst);
        self.dashboard.clone()
    }

    async fn agent_data(&self) -> Result<AgentDataset, BridgeError> {
        self.agent_calls.fetch_add(1, Ordering::SeqCst);
        self.agents.clone()
    }
}

/// Request observed by the stub server.
#[derive(Debug, Clone)]
pub struct CapturedRequest {
    /// Request path.
    pub url: String,
    /// Authorization header value, if any.
    pub authorization: Option<String>,
    /// Decoded JSON body.
    pub body: Value,
}

/// Serves `responses` in order, one per request, then stops.
pub fn spawn_stub(responses: Vec<(u16, String)>) -> (String, JoinHandle<Vec<CapturedRequest>>) {
    let server = Server::http("127.0.0.1:0").expect("http server");
    let addr = server.server_addr();
    let handle = thread::spawn(move || {
        let mut captured = Vec::new();
        for (status, body) in responses {
            let Ok(mut request) = server.recv() else {
                break;
            };
            let authorization = request
                .headers()
                .iter()
                .find(|header| header.field.equiv("Authorization"))
                .map(|header| header.value.as_str().to_string());
            let mut raw = String::new();
            request.as_reader().read_to_string(&mut raw).expect("read body");
            captured.push(CapturedRequest {
                url: request.url().to_string(),
                authorization,
                body: serde_json::from_str(&raw).unwrap_or(Value::Null),
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
