// crates/qa-dashboard-core/src/interfaces/mod.rs
// ============================================================================
// Module: QA Dashboard Interfaces
// Description: Narrow read interfaces for agent and KPI data sources.
// Purpose: Let a real data source replace the fixtures without touching callers.
// Dependencies: crate::core, thiserror
// ============================================================================

//! ## Overview
//! Data sources expose read-only listings. The access gate and presentation
//! pipeline depend only on these traits, so swapping the compiled-in fixture
//! data for an external source is a single constructor change.

// ============================================================================
// SECTION: Imports
// ============================================================================

use thiserror::Error;

use crate::core::AgentRecord;
use crate::core::DashboardKpis;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Data source failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SourceError {
    /// Source could not be reached.
    #[error("data source unavailable: {0}")]
    Unavailable(String),
    /// Source returned a record that failed validation.
    #[error("invalid source record: {0}")]
    Invalid(String),
}

// ============================================================================
// SECTION: Source Traits
// ============================================================================

/// Read interface for the agent roster.
pub trait AgentSource: Send + Sync {
    /// Lists every agent in roster order.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError`] when the roster cannot be read.
    fn list_agents(&self) -> Result<Vec<AgentRecord>, SourceError>;
}

/// Read interface for the dashboard KPI set.
pub trait KpiSource: Send + Sync {
    /// Returns the complete KPI set.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError`] when the KPIs cannot be read.
    fn get_kpis(&self) -> Result<DashboardKpis, SourceError>;
}

/// Combined source serving both datasets.
pub trait DataSource: AgentSource + KpiSource {}

impl<T: AgentSource + KpiSource> DataSource for T {}
