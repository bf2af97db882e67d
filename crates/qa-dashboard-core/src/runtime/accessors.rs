// crates/qa-dashboard-core/src/runtime/accessors.rs
// ============================================================================
// Module: Data Accessors
// Description: Dataset projections for the dashboard and agent views.
// Purpose: Serve full datasets and the supplementary roster lookups.
// Dependencies: crate::{core, interfaces}, serde, time
// ============================================================================

//! ## Overview
//! Accessors are pure reads. `lastUpdated` is stamped from the caller's clock
//! at call time, so it changes on every call rather than when the underlying
//! data changes. The core never reads wall-clock time itself.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

use crate::core::AgentId;
use crate::core::AgentRecord;
use crate::core::DashboardKpis;
use crate::core::KPI_KEYS;
use crate::core::PerformanceBucket;
use crate::core::matches_search;
use crate::interfaces::AgentSource;
use crate::interfaces::KpiSource;
use crate::interfaces::SourceError;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Accessor failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccessorError {
    /// Underlying source failed.
    #[error(transparent)]
    Source(#[from] SourceError),
    /// Timestamp could not be formatted.
    #[error("timestamp formatting failed: {0}")]
    Timestamp(String),
    /// KPI required for a projection is absent.
    #[error("missing kpi: {0}")]
    MissingKpi(String),
}

// ============================================================================
// SECTION: Dataset Types
// ============================================================================

/// Full agent roster with metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentDataset {
    /// Every agent in roster order.
    pub agents: Vec<AgentRecord>,
    /// Number of agents (always `agents.len()`).
    pub total_count: usize,
    /// RFC 3339 time the dataset was produced.
    pub last_updated: String,
}

/// Headline dashboard summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    /// Number of KPIs in the set.
    pub total_kpis: usize,
    /// RFC 3339 time the summary was produced.
    pub last_updated: String,
    /// Headline values.
    pub summary: SummaryValues,
}

/// Headline KPI values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryValues {
    /// Average QA score.
    pub average_qa_score: String,
    /// Error rate.
    pub error_rate: String,
    /// First-contact resolution.
    pub fcr: String,
    /// Average handling time.
    pub avg_handling_time: String,
}

// ============================================================================
// SECTION: Primary Accessors
// ============================================================================

/// Returns the full KPI set.
///
/// # Errors
///
/// Returns [`AccessorError`] when the source fails.
pub fn dashboard_data(source: &dyn KpiSource) -> Result<DashboardKpis, AccessorError> {
    Ok(source.get_kpis()?)
}

/// Returns the full roster stamped with `now`.
///
/// # Errors
///
/// Returns [`AccessorError`] when the source fails or `now` cannot be formatted.
pub fn agent_dataset(
    source: &dyn AgentSource,
    now: OffsetDateTime,
) -> Result<AgentDataset, AccessorError> {
    let agents = source.list_agents()?;
    Ok(AgentDataset {
        total_count: agents.len(),
        agents,
        last_updated: format_timestamp(now)?,
    })
}

// ============================================================================
// SECTION: Supplementary Accessors
// ============================================================================

/// Looks up a single agent by id.
///
/// # Errors
///
/// Returns [`AccessorError`] when the source fails.
pub fn agent_by_id(
    source: &dyn AgentSource,
    id: AgentId,
) -> Result<Option<AgentRecord>, AccessorError> {
    Ok(source.list_agents()?.into_iter().find(|agent| agent.id == id))
}

/// Returns agents whose overall score falls in `bucket`.
///
/// # Errors
///
/// Returns [`AccessorError`] when the source fails.
pub fn agents_by_performance(
    source: &dyn AgentSource,
    bucket: PerformanceBucket,
) -> Result<Vec<AgentRecord>, AccessorError> {
    let mut agents = source.list_agents()?;
    agents.retain(|agent| bucket.contains(agent.overall_score));
    Ok(agents)
}

/// Returns agents whose name contains `term`, ignoring case.
///
/// # Errors
///
/// Returns [`AccessorError`] when the source fails.
pub fn search_agents(
    source: &dyn AgentSource,
    term: &str,
) -> Result<Vec<AgentRecord>, AccessorError> {
    let mut agents = source.list_agents()?;
    agents.retain(|agent| matches_search(&agent.name, term));
    Ok(agents)
}

/// Builds the headline summary from the KPI set.
///
/// # Errors
///
/// Returns [`AccessorError`] when the source fails or a headline KPI is absent.
pub fn dashboard_summary(
    source: &dyn KpiSource,
    now: OffsetDateTime,
) -> Result<DashboardSummary, AccessorError> {
    let kpis = source.get_kpis()?;
    let value = |key: &str| {
        kpis.get(key)
            .map(|kpi| kpi.value.clone())
            .ok_or_else(|| AccessorError::MissingKpi(key.to_string()))
    };
    Ok(DashboardSummary {
        total_kpis: KPI_KEYS.len(),
        last_updated: format_timestamp(now)?,
        summary: SummaryValues {
            average_qa_score: value("kpi1")?,
            error_rate: value("kpi2")?,
            fcr: value("kpi4")?,
            avg_handling_time: value("kpi6")?,
        },
    })
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Formats a timestamp as RFC 3339.
///
/// # Errors
///
/// Returns [`AccessorError::Timestamp`] when the value cannot be formatted.
pub fn format_timestamp(now: OffsetDateTime) -> Result<String, AccessorError> {
    now.format(&Rfc3339).map_err(|err| AccessorError::Timestamp(err.to_string()))
}
