// crates/qa-dashboard-core/src/runtime/stats.rs
// ============================================================================
// Module: Performance Statistics
// Description: Aggregate counts and mean score over the agent roster.
// Purpose: Summarize roster distribution by bucket and department.
// Dependencies: crate::{core, interfaces}, serde
// ============================================================================

//! Aggregate roster statistics.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

use crate::core::AgentRecord;
use crate::core::CUSTOMER_SUPPORT_DEPARTMENT;
use crate::core::PerformanceBucket;
use crate::core::TECHNICAL_SUPPORT_DEPARTMENT;
use crate::interfaces::AgentSource;
use crate::runtime::accessors::AccessorError;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Roster distribution statistics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceStats {
    /// Number of agents.
    pub total: usize,
    /// Agents in the `high` bucket.
    pub high_performers: usize,
    /// Agents in the `medium` bucket.
    pub medium_performers: usize,
    /// Agents in the `low` bucket.
    pub low_performers: usize,
    /// Mean overall score (0.0 for an empty roster).
    #[serde(serialize_with = "crate::core::number::serialize_score")]
    pub average_score: f64,
    /// Agent count per department.
    pub departments: DepartmentCounts,
}

/// Agent count per known department.
///
/// Agents in any other department are counted in the totals only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepartmentCounts {
    /// Agents in customer support.
    pub customer_support: usize,
    /// Agents in technical support.
    pub technical_support: usize,
}

impl PerformanceStats {
    /// Computes statistics over a slice of records.
    #[must_use]
    pub fn from_agents(agents: &[AgentRecord]) -> Self {
        let mut stats = Self {
            total: agents.len(),
            high_performers: 0,
            medium_performers: 0,
            low_performers: 0,
            average_score: 0.0,
            departments: DepartmentCounts::default(),
        };
        let mut score_sum = 0.0;
        for agent in agents {
            match PerformanceBucket::classify(agent.overall_score) {
                PerformanceBucket::High => stats.high_performers += 1,
                PerformanceBucket::Medium => stats.medium_performers += 1,
                PerformanceBucket::Low | PerformanceBucket::All => stats.low_performers += 1,
            }
            match agent.department.as_str() {
                CUSTOMER_SUPPORT_DEPARTMENT => stats.departments.customer_support += 1,
                TECHNICAL_SUPPORT_DEPARTMENT => stats.departments.technical_support += 1,
                _ => {}
            }
            score_sum += agent.overall_score;
        }
        if let Ok(count) = u32::try_from(agents.len())
            && count > 0
        {
            stats.average_score = score_sum / f64::from(count);
        }
        stats
    }
}

// ============================================================================
// SECTION: Accessor
// ============================================================================

/// Computes roster statistics from the source.
///
/// # Errors
///
/// Returns [`AccessorError`] when the source fails.
pub fn performance_stats(source: &dyn AgentSource) -> Result<PerformanceStats, AccessorError> {
    let agents = source.list_agents()?;
    Ok(PerformanceStats::from_agents(&agents))
}
