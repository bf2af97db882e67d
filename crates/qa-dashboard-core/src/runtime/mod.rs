// crates/qa-dashboard-core/src/runtime/mod.rs
// ============================================================================
// Module: QA Dashboard Runtime
// Description: Read accessors over dashboard data sources.
// Purpose: Group accessor operations and their projections.
// Dependencies: crate::{core, interfaces}
// ============================================================================

//! ## Overview
//! Runtime accessors read from a [`crate::DataSource`] and shape the result
//! for the call boundary. They never filter, sort, or paginate the primary
//! datasets; the presentation layer owns that pipeline.

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod accessors;
pub mod stats;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use accessors::AccessorError;
pub use accessors::AgentDataset;
pub use accessors::DashboardSummary;
pub use accessors::SummaryValues;
pub use accessors::agent_by_id;
pub use accessors::agent_dataset;
pub use accessors::agents_by_performance;
pub use accessors::dashboard_data;
pub use accessors::dashboard_summary;
pub use accessors::format_timestamp;
pub use accessors::search_agents;
pub use stats::DepartmentCounts;
pub use stats::PerformanceStats;
pub use stats::performance_stats;
