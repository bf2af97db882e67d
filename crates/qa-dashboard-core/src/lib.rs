// crates/qa-dashboard-core/src/lib.rs
// ============================================================================
// Module: QA Dashboard Core Library
// Description: Public API surface for the QA dashboard data model.
// Purpose: Expose record types, data-source interfaces, and read accessors.
// Dependencies: crate::{core, interfaces, runtime, fixtures}
// ============================================================================

//! ## Overview
//! QA dashboard core defines the agent roster and KPI records, the narrow read
//! interfaces a data source must implement, and the accessor operations that
//! project those records into the datasets served across the call boundary.
//! Records are read-only; accessors never mutate a source.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod core;
pub mod fixtures;
pub mod interfaces;
pub mod runtime;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use core::*;

pub use fixtures::FixtureDataSource;
pub use interfaces::AgentSource;
pub use interfaces::DataSource;
pub use interfaces::KpiSource;
pub use interfaces::SourceError;
pub use runtime::AccessorError;
pub use runtime::AgentDataset;
pub use runtime::DashboardSummary;
pub use runtime::DepartmentCounts;
pub use runtime::PerformanceStats;
pub use runtime::SummaryValues;
pub use runtime::agent_by_id;
pub use runtime::agent_dataset;
pub use runtime::agents_by_performance;
pub use runtime::dashboard_data;
pub use runtime::dashboard_summary;
pub use runtime::format_timestamp;
pub use runtime::performance_stats;
pub use runtime::search_agents;
