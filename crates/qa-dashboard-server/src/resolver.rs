// crates/qa-dashboard-server/src/resolver.rs
// ============================================================================
// Module: Operation Resolver
// Description: Protected dispatch of call-boundary operations.
// Purpose: Gate, run, audit, and normalize every invocation.
// Dependencies: qa-dashboard-{authority,core}, serde, serde_json
// ============================================================================

//! ## Overview
//! Every protected operation asks the access gate first. A deny fails with
//! `ACCESS_DENIED` naming the resource. A gate failure fails the operation
//! under `fail_closed`; under `fail_open` it is audited and the operation
//! proceeds. `checkUserAccess` uses the group path and always returns a
//! report, applying the same failure policy to its `hasAccess` field.
//!
//! The resolver holds no mutable state; all collaborators are shared.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Arc;
use std::time::Instant;

use qa_dashboard_authority::AccessDecision;
use qa_dashboard_authority::AccessError;
use qa_dashboard_authority::AccessGate;
use qa_dashboard_authority::DenialReason;
use qa_dashboard_authority::GroupRef;
use qa_dashboard_authority::UserProfile;
use qa_dashboard_config::FailurePolicy;
use qa_dashboard_core::AgentId;
use qa_dashboard_core::DataSource;
use qa_dashboard_core::PerformanceBucket;
use qa_dashboard_core::agent_by_id;
use qa_dashboard_core::agent_dataset;
use qa_dashboard_core::agents_by_performance;
use qa_dashboard_core::dashboard_data;
use qa_dashboard_core::dashboard_summary;
use qa_dashboard_core::format_timestamp;
use qa_dashboard_core::performance_stats;
use qa_dashboard_core::search_agents;
use serde::Deserialize;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::audit::AccessAuditEvent;
use crate::audit::AuditSink;
use crate::audit::FailureAuditEvent;
use crate::audit::OperationAuditEvent;
use crate::clock::Clock;
use crate::context::CallerContext;
use crate::context::InvocationRequest;
use crate::error::NormalizedError;
use crate::error::OperationError;
use crate::operation::Operation;

// ============================================================================
// SECTION: Payloads
// ============================================================================

/// `getAgentById` payload.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AgentByIdPayload {
    /// Agent identifier.
    agent_id: u64,
}

/// `getAgentsByPerformance` payload.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PerformancePayload {
    /// Bucket label: `all`, `high`, `medium`, or `low`.
    performance_level: String,
}

/// `searchAgents` payload.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchPayload {
    /// Name substring; blank returns everyone.
    #[serde(default)]
    search_term: String,
}

/// `checkUserAccess` result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserAccessReport {
    /// Whether the caller may use the dashboard.
    pub has_access: bool,
    /// Caller profile; absent when the authority failed.
    pub user: Option<UserProfile>,
    /// Groups considered.
    pub groups: Vec<GroupRef>,
    /// Caller account.
    pub account_id: String,
    /// Authority failure message, when the decision came from the policy.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

// ============================================================================
// SECTION: Resolver
// ============================================================================

/// Operation resolver.
pub struct Resolver {
    /// Access gate.
    gate: Arc<AccessGate>,
    /// Dashboard data source.
    data: Arc<dyn DataSource>,
    /// Audit sink.
    audit: Arc<dyn AuditSink>,
    /// Time source.
    clock: Arc<dyn Clock>,
}

impl Resolver {
    /// Builds a resolver from shared collaborators.
    #[must_use]
    pub fn new(
        gate: Arc<AccessGate>,
        data: Arc<dyn DataSource>,
        audit: Arc<dyn AuditSink>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            gate,
            data,
            audit,
            clock,
        }
    }

    /// Returns the audit sink.
    #[must_use]
    pub fn audit(&self) -> &Arc<dyn AuditSink> {
        &self.audit
    }

    /// Returns the current time formatted for the wire.
    #[must_use]
    pub fn timestamp(&self) -> String {
        format_timestamp(self.clock.now()).unwrap_or_default()
    }

    /// Runs `operation` for `request` and records an invocation event.
    ///
    /// # Errors
    ///
    /// Returns [`NormalizedError`] when the operation fails.
    pub async fn invoke(
        &self,
        operation: Operation,
        request: &InvocationRequest,
        token_fingerprint: Option<String>,
    ) -> Result<Value, NormalizedError> {
        let started = Instant::now();
        let result = if operation.is_protected() {
            self.run_protected(operation, request).await
        } else {
            let report = self.check_user_access(&request.context).await;
            to_json(&report)
        };
        let result = result.map_err(|error| {
            self.audit.record_failure(&FailureAuditEvent {
                event: "operation_failure",
                timestamp: self.timestamp(),
                operation: operation.as_str(),
                account_id: request.context.account_id.as_str().to_string(),
                project_key: request.context.project_key().map(|key| key.as_str().to_string()),
                error: error.to_string(),
            });
            NormalizedError::from_operation(&error, operation)
        });
        let (outcome, error_code, status) = match &result {
            Ok(_) => ("ok", None, 200),
            Err(error) => ("error", Some(error.kind.code()), error.status.as_u16()),
        };
        self.audit.record_operation(&OperationAuditEvent {
            event: "operation_invoked",
            timestamp: self.timestamp(),
            operation: operation.as_str().to_string(),
            account_id: Some(request.context.account_id.as_str().to_string()),
            outcome,
            error_code,
            status,
            duration_ms: started.elapsed().as_millis(),
            token_fingerprint,
        });
        result
    }

    /// Group-path access report. Never fails.
    pub async fn check_user_access(&self, context: &CallerContext) -> UserAccessReport {
        let account_id = context.account_id.as_str().to_string();
        match self.gate.check_groups(&context.account_id).await {
            Ok(check) => {
                let decision = if check.has_access {
                    AccessDecision::Granted
                } else {
                    AccessDecision::Denied(DenialReason::NoMatchingGroup)
                };
                self.record_access(context, "group", decision.label(), None);
                UserAccessReport {
                    has_access: check.has_access,
                    user: Some(check.user),
                    groups: check.groups,
                    account_id,
                    error: None,
                }
            }
            Err(error) => {
                let granted = grants_on_failure(self.gate.failure_policy(), &error);
                let label = failure_label(granted);
                self.record_access(context, "group", label, Some(error.to_string()));
                UserAccessReport {
                    has_access: granted,
                    user: None,
                    groups: Vec::new(),
                    account_id,
                    error: Some(error.to_string()),
                }
            }
        }
    }

    /// Gates then dispatches a protected operation.
    async fn run_protected(
        &self,
        operation: Operation,
        request: &InvocationRequest,
    ) -> Result<Value, OperationError> {
        self.authorize(operation, &request.context).await?;
        self.dispatch(operation, &request.payload)
    }

    /// Role-path gate with the configured failure policy.
    async fn authorize(
        &self,
        operation: Operation,
        context: &CallerContext,
    ) -> Result<(), OperationError> {
        match self.gate.check_access(&context.account_id, context.project_key()).await {
            Ok(decision) => {
                self.record_access(context, "role", decision.label(), None);
                if decision.is_granted() {
                    Ok(())
                } else {
                    Err(OperationError::AccessDenied {
                        resource: operation.resource(),
                    })
                }
            }
            Err(error) => {
                let granted = grants_on_failure(self.gate.failure_policy(), &error);
                let label = failure_label(granted);
                self.record_access(context, "role", label, Some(error.to_string()));
                if granted {
                    Ok(())
                } else {
                    Err(OperationError::Access(error))
                }
            }
        }
    }

    /// Runs the data accessor for `operation`.
    fn dispatch(&self, operation: Operation, payload: &Value) -> Result<Value, OperationError> {
        let source = &*self.data;
        match operation {
            Operation::GetDashboardData => {
                let kpis = dashboard_data(source)?;
                kpis.validate()?;
                to_json(&kpis)
            }
            Operation::GetAgentData => {
                let dataset = agent_dataset(source, self.clock.now())?;
                for agent in &dataset.agents {
                    agent.validate()?;
                }
                to_json(&dataset)
            }
            Operation::GetAgentById => {
                let request: AgentByIdPayload = parse_payload(payload)?;
                to_json(&agent_by_id(source, AgentId::new(request.agent_id))?)
            }
            Operation::GetAgentsByPerformance => {
                let request: PerformancePayload = parse_payload(payload)?;
                let bucket = PerformanceBucket::parse(&request.performance_level).ok_or_else(|| {
                    OperationError::Payload(format!(
                        "unknown performanceLevel: {}",
                        request.performance_level
                    ))
                })?;
                to_json(&agents_by_performance(source, bucket)?)
            }
            Operation::SearchAgents => {
                let request: SearchPayload = if payload.is_null() {
                    SearchPayload::default()
                } else {
                    parse_payload(payload)?
                };
                to_json(&search_agents(source, &request.search_term)?)
            }
            Operation::GetPerformanceStats => to_json(&performance_stats(source)?),
            Operation::GetDashboardSummary => {
                to_json(&dashboard_summary(source, self.clock.now())?)
            }
            Operation::CheckUserAccess => Err(OperationError::Payload(
                "checkUserAccess is not a data operation".to_string(),
            )),
        }
    }

    /// Records an access decision event.
    fn record_access(
        &self,
        context: &CallerContext,
        path: &'static str,
        decision: &'static str,
        reason: Option<String>,
    ) {
        self.audit.record_access(&AccessAuditEvent {
            event: "access_decision",
            timestamp: self.timestamp(),
            account_id: context.account_id.as_str().to_string(),
            project_key: context.project_key().map(|key| key.as_str().to_string()),
            path,
            decision,
            reason,
        });
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Returns true when `policy` lets `error` through.
///
/// Fail-open covers authority outages only; caller and configuration faults
/// are denied under either policy.
const fn grants_on_failure(policy: FailurePolicy, error: &AccessError) -> bool {
    policy.grants_on_failure() && error.is_authority_outage()
}

/// Audit label for a decision taken on a failed access check.
const fn failure_label(granted: bool) -> &'static str {
    if granted { "granted_on_failure" } else { "denied_on_failure" }
}

/// Decodes an operation payload.
fn parse_payload<T: DeserializeOwned>(payload: &Value) -> Result<T, OperationError> {
    T::deserialize(payload).map_err(|err| OperationError::Payload(err.to_string()))
}

/// Serializes an operation result.
fn to_json<T: Serialize>(value: &T) -> Result<Value, OperationError> {
    serde_json::to_value(value).map_err(|err| OperationError::Serialization(err.to_string()))
}
