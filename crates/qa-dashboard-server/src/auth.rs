// crates/qa-dashboard-server/src/auth.rs
// ============================================================================
// Module: Host Authentication
// Description: Optional bearer-token check for the call boundary.
// Purpose: Ensure only the configured host may invoke operations.
// Dependencies: thiserror
// ============================================================================

//! Host bearer-token check.
//!
//! With no tokens configured the check is disabled. Only token fingerprints
//! leave this module.

use std::collections::BTreeSet;

use thiserror::Error;

use crate::audit::token_fingerprint;

/// Maximum accepted authorization header size.
const MAX_AUTH_HEADER_BYTES: usize = 8 * 1024;

/// Host authentication failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HostAuthError {
    /// Missing or malformed authorization header.
    #[error("unauthenticated: {0}")]
    Unauthenticated(String),
}

/// Host bearer-token policy.
#[derive(Debug, Clone, Default)]
pub struct HostAuth {
    /// Accepted tokens; empty disables the check.
    tokens: BTreeSet<String>,
}

impl HostAuth {
    /// Builds a policy from configured tokens.
    #[must_use]
    pub fn new(tokens: &[String]) -> Self {
        Self {
            tokens: tokens.iter().cloned().collect(),
        }
    }

    /// Returns true when a token is required.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        !self.tokens.is_empty()
    }

    /// Checks the authorization header and returns the token fingerprint.
    ///
    /// # Errors
    ///
    /// Returns [`HostAuthError`] when a token is required and the header is
    /// missing, malformed, or carries an unknown token.
    pub fn authorize(&self, header: Option<&str>) -> Result<Option<String>, HostAuthError> {
        if !self.is_enabled() {
            return Ok(None);
        }
        let token = parse_bearer_token(header)?;
        if !self.tokens.contains(&token) {
            return Err(HostAuthError::Unauthenticated("invalid bearer token".to_string()));
        }
        Ok(Some(token_fingerprint(&token)))
    }
}

/// Extracts the token from a `Bearer <token>` header.
fn parse_bearer_token(header: Option<&str>) -> Result<String, HostAuthError> {
    let header =
        header.ok_or_else(|| HostAuthError::Unauthenticated("missing authorization".to_string()))?;
    if header.len() > MAX_AUTH_HEADER_BYTES {
        return Err(HostAuthError::Unauthenticated("authorization header too large".to_string()));
    }
    let mut parts = header.trim().splitn(2, ' ');
    let scheme = parts.next().unwrap_or_default();
    let token = parts.next().unwrap_or_default().trim();
    if !scheme.eq_ignore_ascii_case("bearer") || token.is_empty() {
        return Err(HostAuthError::Unauthenticated("invalid authorization header".to_string()));
    }
    Ok(token.to_string())
}
