// crates/qa-dashboard-core/src/core/mod.rs
// ============================================================================
// Module: QA Dashboard Core Types
// Description: Canonical agent, KPI, and performance bucket records.
// Purpose: Provide stable, serializable types for dashboard datasets.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! Core types define the records that cross the call boundary. Field names
//! serialize in camelCase so the wire form matches the host-facing contract.

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod agent;
pub mod identifiers;
pub mod kpi;
pub(crate) mod number;
pub mod performance;
pub mod validation;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use agent::AgentMetrics;
pub use agent::CUSTOMER_SUPPORT_DEPARTMENT;
pub use agent::AgentRecord;
pub use agent::RecentPerformance;
pub use agent::TECHNICAL_SUPPORT_DEPARTMENT;
pub use agent::Trend;
pub use identifiers::AccountId;
pub use identifiers::AgentId;
pub use identifiers::ProjectKey;
pub use identifiers::RoleId;
pub use kpi::DashboardKpis;
pub use kpi::KPI_KEYS;
pub use kpi::Kpi;
pub use kpi::PILLAR_KPI_KEY;
pub use kpi::PillarScores;
pub use performance::HIGH_PERFORMANCE_THRESHOLD;
pub use performance::MEDIUM_PERFORMANCE_THRESHOLD;
pub use performance::PerformanceBucket;
pub use performance::matches_search;
pub use validation::AGENT_METRIC_KEYS;
pub use validation::REQUIRED_AGENT_FIELDS;
pub use validation::ValidationError;
pub use validation::validate_agent_value;
pub use validation::validate_dashboard_value;
