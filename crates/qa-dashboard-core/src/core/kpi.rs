// crates/qa-dashboard-core/src/core/kpi.rs
// ============================================================================
// Module: Dashboard KPIs
// Description: Aggregate quality KPI set with pillar breakdown.
// Purpose: Define the ordered KPI mapping served by the dashboard accessor.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! The dashboard KPI set is an ordered mapping of `kpiN` keys to display
//! records. Values are already display-formatted strings (`"15%"`,
//! `"11 min"`); only the pillar breakdown carries raw numbers.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use serde::Deserialize;
use serde::Serialize;

use crate::core::validation::ValidationError;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// KPI keys expected in a complete dashboard set.
pub const KPI_KEYS: [&str; 7] = ["kpi1", "kpi2", "kpi3", "kpi4", "kpi5", "kpi6", "kpi7"];

/// KPI key that carries the pillar breakdown.
pub const PILLAR_KPI_KEY: &str = "kpi3";

// ============================================================================
// SECTION: Types
// ============================================================================

/// Single dashboard KPI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Kpi {
    /// Display name.
    pub name: String,
    /// Display-formatted value.
    pub value: String,
    /// Optional pillar breakdown.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pillars: Option<PillarScores>,
}

impl Kpi {
    /// Builds a KPI without a breakdown.
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            pillars: None,
        }
    }

    /// Returns a copy carrying the given pillar breakdown.
    #[must_use]
    pub const fn with_pillars(mut self, pillars: PillarScores) -> Self {
        self.pillars = Some(pillars);
        self
    }
}

/// Team-wide pillar scores out of ten.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PillarScores {
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
}

impl PillarScores {
    /// Returns the pillars as `(label, score)` pairs in display order.
    #[must_use]
    pub const fn entries(&self) -> [(&'static str, f64); 7] {
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
}

/// Ordered KPI mapping keyed by `kpiN`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DashboardKpis(BTreeMap<String, Kpi>);

impl DashboardKpis {
    /// Creates an empty KPI set.
    #[must_use]
    pub const fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Inserts or replaces a KPI entry.
    pub fn insert(&mut self, key: impl Into<String>, kpi: Kpi) {
        self.0.insert(key.into(), kpi);
    }

    /// Returns a KPI by key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Kpi> {
        self.0.get(key)
    }

    /// Returns the number of KPIs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true when the set holds no KPIs.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates KPIs in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Kpi)> {
        self.0.iter().map(|(key, kpi)| (key.as_str(), kpi))
    }

    /// Checks that every expected KPI is present and complete.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] when a KPI is missing, has an empty name
    /// or value, or the pillar KPI lacks its breakdown.
    pub fn validate(&self) -> Result<(), ValidationError> {
        for key in KPI_KEYS {
            let kpi = self.get(key).ok_or_else(|| ValidationError::MissingField(key.to_string()))?;
            if kpi.name.trim().is_empty() || kpi.value.trim().is_empty() {
                return Err(ValidationError::InvalidField(key.to_string()));
            }
        }
        let has_pillars = self.get(PILLAR_KPI_KEY).is_some_and(|kpi| kpi.pillars.is_some());
        if !has_pillars {
            return Err(ValidationError::MissingField(format!("{PILLAR_KPI_KEY}.pillars")));
        }
        Ok(())
    }
}
