// crates/qa-dashboard-core/src/core/agent.rs
// ============================================================================
// Module: Agent Records
// Description: Agent roster records with quality metrics and recent trend.
// Purpose: Define the read-only agent record served by the agent accessor.
// Dependencies: serde, time
// ============================================================================

//! ## Overview
//! An [`AgentRecord`] couples identity fields with twelve named numeric
//! metrics and a two-snapshot performance trend. Seven of the metrics are
//! quality pillars scored out of ten; the remaining five are operational
//! figures (percentages, minutes, CSAT out of five).

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;
use time::Date;
use time::macros::format_description;

use crate::core::identifiers::AgentId;
use crate::core::validation::ValidationError;

// ============================================================================
// SECTION: Departments
// ============================================================================

/// Customer support department label.
pub const CUSTOMER_SUPPORT_DEPARTMENT: &str = "Customer Support";
/// Technical support department label.
pub const TECHNICAL_SUPPORT_DEPARTMENT: &str = "Technical Support";

// ============================================================================
// SECTION: Agent Record
// ============================================================================

/// Read-only agent roster entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentRecord {
    /// Numeric agent identifier.
    pub id: AgentId,
    /// Display name.
    pub name: String,
    /// Contact email.
    pub email: String,
    /// Department label.
    pub department: String,
    /// Hire date (`YYYY-MM-DD`).
    pub hire_date: String,
    /// Overall quality score out of ten.
    #[serde(serialize_with = "crate::core::number::serialize_score")]
    pub overall_score: f64,
    /// Named metric scores.
    pub metrics: AgentMetrics,
    /// Month-over-month performance snapshot.
    pub recent_performance: RecentPerformance,
}

impl AgentRecord {
    /// Checks identity fields and scores for structural validity.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] when a required field is empty, the hire
    /// date is malformed, or any score is not a finite number.
    pub fn validate(&self) -> Result<(), ValidationError> {
        for (field, value) in
            [("name", &self.name), ("email", &self.email), ("department", &self.department)]
        {
            if value.trim().is_empty() {
                return Err(ValidationError::MissingField(field.to_string()));
            }
        }
        Date::parse(&self.hire_date, format_description!("[year]-[month]-[day]"))
            .map_err(|_| ValidationError::InvalidField("hireDate".to_string()))?;
        if !self.overall_score.is_finite() {
            return Err(ValidationError::InvalidField("overallScore".to_string()));
        }
        for (key, value) in self.metrics.entries() {
            if !value.is_finite() {
                return Err(ValidationError::InvalidMetric(key.to_string()));
            }
        }
        Ok(())
    }
}

// ============================================================================
// SECTION: Metrics
// ============================================================================

/// Named metric scores for an agent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentMetrics {
    /// Empathy pillar score.
    #[serde(serialize_with = "crate::core::number::serialize_score")]
    pub empathy: f64,
    /// Clarity pillar score.
    #[serde(serialize_with = "crate::core::number::serialize_score")]
    pub clarity: f64,
    /// Completeness pillar score.
    #[serde(serialize_with = "crate::core::number::serialize_score")]
    pub completeness: f64,
    /// Professionalism pillar score.
    #[serde(serialize_with = "crate::core::number::serialize_score")]
    pub professionalism: f64,
    /// Ticket management pillar score.
    #[serde(serialize_with = "crate::core::number::serialize_score")]
    pub ticket_management: f64,
    /// SLA-to-first-response pillar score.
    #[serde(serialize_with = "crate::core::number::serialize_score")]
    pub sla_first_response: f64,
    /// SLA-to-resolution pillar score.
    #[serde(serialize_with = "crate::core::number::serialize_score")]
    pub sla_resolution: f64,
    /// Error rate percentage.
    #[serde(serialize_with = "crate::core::number::serialize_score")]
    pub error_rate: f64,
    /// First-contact resolution percentage.
    #[serde(serialize_with = "crate::core::number::serialize_score")]
    pub fcr: f64,
    /// Average ticket handling time in minutes.
    #[serde(serialize_with = "crate::core::number::serialize_score")]
    pub avg_ticket_time: f64,
    /// Improvement after coaching, percent.
    #[serde(serialize_with = "crate::core::number::serialize_score")]
    pub post_coaching_improvement: f64,
    /// Customer satisfaction score out of five.
    #[serde(serialize_with = "crate::core::number::serialize_score")]
    pub customer_satisfaction_score: f64,
}

impl AgentMetrics {
    /// Returns the seven quality pillars as `(label, score)` pairs.
    #[must_use]
    pub const fn pillars(&self) -> [(&'static str, f64); 7] {
        [
            ("Empathy", self.empathy),
            ("Clarity", self.clarity),
            ("Completeness", self.completeness),
            ("Professionalism", self.professionalism),
            ("Ticket Management", self.ticket_management),
            ("SLA to first response", self.sla_first_response),
            ("SLA to resolution", self.sla_resolution),
        ]
    }

    /// Returns the operational metrics as `(label, value)` pairs.
    #[must_use]
    pub const fn operational(&self) -> [(&'static str, f64); 5] {
        [
            ("Error Rate", self.error_rate),
            ("FCR", self.fcr),
            ("Avg Ticket Time", self.avg_ticket_time),
            ("Post Coaching Improvement", self.post_coaching_improvement),
            ("CSAT", self.customer_satisfaction_score),
        ]
    }

    /// Returns every metric keyed by its wire name.
    #[must_use]
    pub const fn entries(&self) -> [(&'static str, f64); 12] {
        [
            ("empathy", self.empathy),
            ("clarity", self.clarity),
            ("completeness", self.completeness),
            ("professionalism", self.professionalism),
            ("ticketManagement", self.ticket_management),
            ("slaFirstResponse", self.sla_first_response),
            ("slaResolution", self.sla_resolution),
            ("errorRate", self.error_rate),
            ("fcr", self.fcr),
            ("avgTicketTime", self.avg_ticket_time),
            ("postCoachingImprovement", self.post_coaching_improvement),
            ("customerSatisfactionScore", self.customer_satisfaction_score),
        ]
    }
}

// ============================================================================
// SECTION: Recent Performance
// ============================================================================

/// Month-over-month performance snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentPerformance {
    /// Score for the current month.
    #[serde(serialize_with = "crate::core::number::serialize_score")]
    pub this_month: f64,
    /// Score for the previous month.
    #[serde(serialize_with = "crate::core::number::serialize_score")]
    pub last_month: f64,
    /// Trend label.
    pub trend: Trend,
}

/// Performance trend label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    /// Scores are rising.
    Improving,
    /// Scores are flat.
    Stable,
    /// Scores are falling.
    Declining,
}

impl Trend {
    /// Returns the wire label for the trend.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Improving => "improving",
            Self::Stable => "stable",
            Self::Declining => "declining",
        }
    }
}
