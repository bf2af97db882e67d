// crates/qa-dashboard-core/src/core/performance.rs
// ============================================================================
// Module: Performance Buckets
// Description: Score-threshold buckets and name search matching.
// Purpose: Share roster filtering rules between accessors and the view layer.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! Agents fall into one of three buckets by overall score: `high` (>= 8.5),
//! `medium` ([7.0, 8.5)), and `low` (< 7.0). The `all` bucket matches every
//! record. Bucket boundaries are half-open so each score lands in exactly one
//! concrete bucket.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Minimum overall score for the `high` bucket.
pub const HIGH_PERFORMANCE_THRESHOLD: f64 = 8.5;

/// Minimum overall score for the `medium` bucket.
pub const MEDIUM_PERFORMANCE_THRESHOLD: f64 = 7.0;

// ============================================================================
// SECTION: Buckets
// ============================================================================

/// Performance bucket filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PerformanceBucket {
    /// Every record.
    #[default]
    All,
    /// Overall score >= 8.5.
    High,
    /// Overall score in [7.0, 8.5).
    Medium,
    /// Overall score < 7.0.
    Low,
}

impl PerformanceBucket {
    /// Parses a bucket from its wire label.
    #[must_use]
    pub fn parse(label: &str) -> Option<Self> {
        match label {
            "all" => Some(Self::All),
            "high" => Some(Self::High),
            "medium" => Some(Self::Medium),
            "low" => Some(Self::Low),
            _ => None,
        }
    }

    /// Returns the wire label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }

    /// Classifies a score into its concrete bucket (never `All`).
    #[must_use]
    pub fn classify(score: f64) -> Self {
        if score >= HIGH_PERFORMANCE_THRESHOLD {
            Self::High
        } else if score >= MEDIUM_PERFORMANCE_THRESHOLD {
            Self::Medium
        } else {
            Self::Low
        }
    }

    /// Returns true when the score belongs to this bucket.
    #[must_use]
    pub fn contains(self, score: f64) -> bool {
        match self {
            Self::All => true,
            bucket => Self::classify(score) == bucket,
        }
    }
}

impl fmt::Display for PerformanceBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// SECTION: Search
// ============================================================================

/// Returns true when `name` contains `term`, ignoring case.
///
/// The term is matched as typed, whitespace included; an empty term matches
/// every name.
#[must_use]
pub fn matches_search(name: &str, term: &str) -> bool {
    name.to_lowercase().contains(&term.to_lowercase())
}
