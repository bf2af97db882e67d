// crates/qa-dashboard-authority/src/error.rs
// ============================================================================
// Module: Access Errors
// Description: Failures raised while consulting the external authority.
// Purpose: Keep transport, status, and decoding failures distinct.
// Dependencies: thiserror
// ============================================================================

//! Access gate failure types.
//!
//! A deny is not an error: see [`crate::AccessDecision`]. Every variant here
//! means the gate could not reach a decision.

use thiserror::Error;

/// Access gate failures.
///
/// # Invariants
/// - Variants are stable for error classification at the call boundary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccessError {
    /// Authority answered with a non-success status.
    #[error("authority returned status {status} for {endpoint}")]
    Upstream {
        /// HTTP status code.
        status: u16,
        /// Endpoint label (no identifiers).
        endpoint: String,
    },
    /// Authority could not be reached.
    #[error("network failure contacting authority: {0}")]
    Network(String),
    /// Authority response body could not be decoded.
    #[error("authority response invalid: {0}")]
    Parse(String),
    /// No project key in the caller context and no configured default.
    #[error("project key not available in caller context")]
    MissingProject,
    /// Authority client could not be constructed or a request could not be built.
    #[error("authority client error: {0}")]
    Client(String),
}

impl AccessError {
    /// Returns true when a retry may succeed: transport errors and 5xx.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        match self {
            Self::Network(_) => true,
            Self::Upstream {
                status, ..
            } => *status >= 500,
            Self::Parse(_) | Self::MissingProject | Self::Client(_) => false,
        }
    }

    /// Returns true when the authority itself failed to answer usably.
    ///
    /// Only these failures are eligible for the fail-open policy; a missing
    /// project or a client build error is a caller or configuration fault.
    #[must_use]
    pub const fn is_authority_outage(&self) -> bool {
        match self {
            Self::Upstream {
                ..
            }
            | Self::Network(_)
            | Self::Parse(_) => true,
            Self::MissingProject | Self::Client(_) => false,
        }
    }
}
