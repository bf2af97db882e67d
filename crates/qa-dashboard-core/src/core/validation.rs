// crates/qa-dashboard-core/src/core/validation.rs
// ============================================================================
// Module: Record Validation
// Description: Advisory schema checks for agent and KPI payloads.
// Purpose: Screen raw records from external sources before they are trusted.
// Dependencies: serde_json, thiserror
// ============================================================================

//! ## Overview
//! Validation operates on raw JSON so that a future external data source can
//! be screened before deserialization. An agent record must carry every
//! required identity field and a metrics object holding exactly the declared
//! numeric keys. The fixture data always passes these checks.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde_json::Map;
use serde_json::Value;
use thiserror::Error;

use crate::core::kpi::KPI_KEYS;
use crate::core::kpi::PILLAR_KPI_KEY;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Identity fields every agent record must carry.
pub const REQUIRED_AGENT_FIELDS: [&str; 6] =
    ["id", "name", "email", "department", "overallScore", "metrics"];

/// Metric keys every agent record must carry as numbers.
pub const AGENT_METRIC_KEYS: [&str; 12] = [
    "empathy",
    "clarity",
    "completeness",
    "professionalism",
    "ticketManagement",
    "slaFirstResponse",
    "slaResolution",
    "errorRate",
    "fcr",
    "avgTicketTime",
    "postCoachingImprovement",
    "customerSatisfactionScore",
];

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Record validation failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Record is not a JSON object.
    #[error("invalid record: {0}")]
    NotAnObject(String),
    /// Required field is missing or empty.
    #[error("missing field: {0}")]
    MissingField(String),
    /// Field is present but has the wrong shape.
    #[error("invalid field: {0}")]
    InvalidField(String),
    /// Metric is missing or not numeric.
    #[error("missing or invalid metric: {0}")]
    InvalidMetric(String),
    /// Metric key is not part of the declared schema.
    #[error("unexpected metric: {0}")]
    UnexpectedMetric(String),
}

// ============================================================================
// SECTION: Agent Validation
// ============================================================================

/// Validates a raw agent record against the declared schema.
///
/// # Errors
///
/// Returns [`ValidationError`] describing the first violation found.
pub fn validate_agent_value(value: &Value) -> Result<(), ValidationError> {
    let record = as_object(value, "agent record")?;
    for field in REQUIRED_AGENT_FIELDS {
        match record.get(field) {
            None | Some(Value::Null) => {
                return Err(ValidationError::MissingField(field.to_string()));
            }
            Some(Value::String(text)) if text.trim().is_empty() => {
                return Err(ValidationError::MissingField(field.to_string()));
            }
            Some(_) => {}
        }
    }
    for field in ["id", "overallScore"] {
        if !record.get(field).is_some_and(Value::is_number) {
            return Err(ValidationError::InvalidField(field.to_string()));
        }
    }
    for field in ["name", "email", "department"] {
        if !record.get(field).is_some_and(Value::is_string) {
            return Err(ValidationError::InvalidField(field.to_string()));
        }
    }
    let metrics = record
        .get("metrics")
        .and_then(Value::as_object)
        .ok_or_else(|| ValidationError::InvalidField("metrics".to_string()))?;
    for key in AGENT_METRIC_KEYS {
        if !metrics.get(key).is_some_and(Value::is_number) {
            return Err(ValidationError::InvalidMetric(key.to_string()));
        }
    }
    if let Some(extra) = metrics.keys().find(|key| !AGENT_METRIC_KEYS.contains(&key.as_str())) {
        return Err(ValidationError::UnexpectedMetric(extra.clone()));
    }
    Ok(())
}

// ============================================================================
// SECTION: Dashboard Validation
// ============================================================================

/// Validates a raw dashboard KPI payload.
///
/// # Errors
///
/// Returns [`ValidationError`] when a KPI is missing or incomplete, or the
/// pillar KPI lacks its breakdown object.
pub fn validate_dashboard_value(value: &Value) -> Result<(), ValidationError> {
    let kpis = as_object(value, "dashboard data")?;
    for key in KPI_KEYS {
        let kpi = kpis
            .get(key)
            .and_then(Value::as_object)
            .ok_or_else(|| ValidationError::MissingField(key.to_string()))?;
        for field in ["name", "value"] {
            let present = kpi.get(field).and_then(Value::as_str).is_some_and(|s| !s.is_empty());
            if !present {
                return Err(ValidationError::InvalidField(format!("{key}.{field}")));
            }
        }
    }
    let has_pillars = kpis
        .get(PILLAR_KPI_KEY)
        .and_then(|kpi| kpi.get("pillars"))
        .is_some_and(Value::is_object);
    if !has_pillars {
        return Err(ValidationError::MissingField(format!("{PILLAR_KPI_KEY}.pillars")));
    }
    Ok(())
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Borrows a value as an object or reports the label in the error.
fn as_object<'a>(value: &'a Value, label: &str) -> Result<&'a Map<String, Value>, ValidationError> {
    value
        .as_object()
        .ok_or_else(|| ValidationError::NotAnObject(format!("{label} must be an object")))
}

// ============================================================================
// SECTION: Tests
// ============================================================================
