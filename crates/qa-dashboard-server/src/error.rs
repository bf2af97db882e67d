// crates/qa-dashboard-server/src/error.rs
// ============================================================================
// Module: Error Normalization
// Description: Internal operation failures and their boundary form.
// Purpose: Collapse internal errors into three caller-facing kinds.
// Dependencies: qa-dashboard-{authority,core}, axum, serde
// ============================================================================

//! ## Overview
//! [`OperationError`] carries the full internal cause and is only ever
//! audited. [`NormalizedError`] is what crosses the boundary: a kind, a
//! caller-safe message, and an HTTP status. Classification matches on
//! variants, never on message text.

// ============================================================================
// SECTION: Imports
// ============================================================================

use axum::http::StatusCode;
use qa_dashboard_authority::AccessError;
use qa_dashboard_core::AccessorError;
use qa_dashboard_core::ValidationError;
use serde::Serialize;
use thiserror::Error;

use crate::operation::Operation;

// ============================================================================
// SECTION: Messages
// ============================================================================

/// Message for upstream authority status failures.
pub const SERVICE_UNAVAILABLE_MESSAGE: &str =
    "Service temporarily unavailable. Please try again later.";
/// Message for authority connectivity failures.
pub const NETWORK_ERROR_MESSAGE: &str =
    "Network error. Please check your connection and try again.";

// ============================================================================
// SECTION: Internal Errors
// ============================================================================

/// Internal operation failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OperationError {
    /// Caller is not a QA manager.
    #[error("ACCESS_DENIED: You are not a QA Manager. No access to {resource}.")]
    AccessDenied {
        /// Resource label of the denied operation.
        resource: &'static str,
    },
    /// Access gate could not reach a decision.
    #[error("access check failed: {0}")]
    Access(#[from] AccessError),
    /// Data accessor failed.
    #[error("data access failed: {0}")]
    Accessor(#[from] AccessorError),
    /// Dataset failed validation.
    #[error("dataset invalid: {0}")]
    Invalid(#[from] ValidationError),
    /// Payload did not match the operation's shape.
    #[error("invalid payload: {0}")]
    Payload(String),
    /// Result could not be serialized.
    #[error("serialization failed: {0}")]
    Serialization(String),
}

// ============================================================================
// SECTION: Normalized Errors
// ============================================================================

/// Caller-facing error kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorKind {
    /// Caller lacks the required role; terminal for the operation.
    AccessDenied,
    /// Host bearer token missing or unknown.
    Unauthenticated,
    /// Transient failure; retry may succeed.
    ServiceUnavailable,
    /// Anything else.
    Unknown,
}

impl ErrorKind {
    /// Returns the wire code.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::AccessDenied => "ACCESS_DENIED",
            Self::Unauthenticated => "UNAUTHENTICATED",
            Self::ServiceUnavailable => "SERVICE_UNAVAILABLE",
            Self::Unknown => "UNKNOWN",
        }
    }
}

/// Boundary form of a failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedError {
    /// Error kind.
    pub kind: ErrorKind,
    /// Caller-safe message.
    pub message: String,
    /// HTTP status for the response.
    pub status: StatusCode,
}

impl NormalizedError {
    /// Normalizes an internal failure for `operation`.
    #[must_use]
    pub fn from_operation(error: &OperationError, operation: Operation) -> Self {
        match error {
            OperationError::AccessDenied {
                ..
            } => Self {
                kind: ErrorKind::AccessDenied,
                message: error.to_string(),
                status: StatusCode::FORBIDDEN,
            },
            OperationError::Access(AccessError::Upstream {
                ..
            }) => Self {
                kind: ErrorKind::ServiceUnavailable,
                message: SERVICE_UNAVAILABLE_MESSAGE.to_string(),
                status: StatusCode::SERVICE_UNAVAILABLE,
            },
            OperationError::Access(AccessError::Network(_)) => Self {
                kind: ErrorKind::ServiceUnavailable,
                message: NETWORK_ERROR_MESSAGE.to_string(),
                status: StatusCode::SERVICE_UNAVAILABLE,
            },
            OperationError::Payload(detail) => Self {
                kind: ErrorKind::Unknown,
                message: format!("Invalid request: {detail}"),
                status: StatusCode::BAD_REQUEST,
            },
            OperationError::Access(_)
            | OperationError::Accessor(_)
            | OperationError::Invalid(_)
            | OperationError::Serialization(_) => Self::unknown(operation.resource()),
        }
    }

    /// Generic failure naming the resource.
    #[must_use]
    pub fn unknown(resource: &str) -> Self {
        Self {
            kind: ErrorKind::Unknown,
            message: format!("Unable to load {resource} data. Please try again."),
            status: StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Boundary-level failure that never reached an operation.
    #[must_use]
    pub fn boundary(status: StatusCode, message: impl Into<String>) -> Self {
        let kind = if status == StatusCode::UNAUTHORIZED {
            ErrorKind::Unauthenticated
        } else {
            ErrorKind::Unknown
        };
        Self {
            kind,
            message: message.into(),
            status,
        }
    }

    /// Builds the response body stamped with `timestamp`.
    #[must_use]
    pub fn body(&self, timestamp: String) -> ErrorBody {
        ErrorBody {
            error: ErrorDetail {
                code: self.kind.code(),
                message: self.message.clone(),
                timestamp,
            },
        }
    }
}

/// Standard error response body.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorBody {
    /// Error detail.
    pub error: ErrorDetail,
}

/// Error detail inside [`ErrorBody`].
#[derive(Debug, Clone, Serialize)]
pub struct ErrorDetail {
    /// Wire code.
    pub code: &'static str,
    /// Caller-safe message.
    pub message: String,
    /// RFC 3339 time the error was produced.
    pub timestamp: String,
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, reason = "Test-only assertions.")]

    use axum::http::StatusCode;
    use qa_dashboard_authority::AccessError;
    use qa_dashboard_core::AccessorError;
    use qa_dashboard_core::SourceError;

    use super::ErrorKind;
    use super::NETWORK_ERROR_MESSAGE;
    use super::NormalizedError;
    use super::OperationError;
    use super::SERVICE_UNAVAILABLE_MESSAGE;
    use crate::operation::Operation;

    #[test]
    fn denial_keeps_resource_message() {
        let error = OperationError::AccessDenied {
            resource: "dashboard",
        };
        let normalized = NormalizedError::from_operation(&error, Operation::GetDashboardData);
        assert_eq!(normalized.kind, ErrorKind::AccessDenied);
        assert_eq!(
            normalized.message,
            "ACCESS_DENIED: You are not a QA Manager. No access to dashboard."
        );
        assert_eq!(normalized.status, StatusCode::FORBIDDEN);
    }

    #[test]
    fn upstream_and_network_are_service_unavailable() {
        let upstream = OperationError::Access(AccessError::Upstream {
            status: 500,
            endpoint: "role detail".to_string(),
        });
        let normalized = NormalizedError::from_operation(&upstream, Operation::GetAgentData);
        assert_eq!(normalized.kind, ErrorKind::ServiceUnavailable);
        assert_eq!(normalized.message, SERVICE_UNAVAILABLE_MESSAGE);

        let network = OperationError::Access(AccessError::Network("reset".to_string()));
        let normalized = NormalizedError::from_operation(&network, Operation::GetAgentData);
        assert_eq!(normalized.kind, ErrorKind::ServiceUnavailable);
        assert_eq!(normalized.message, NETWORK_ERROR_MESSAGE);
        assert_eq!(normalized.status, StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn everything_else_is_unknown_with_resource() {
        let cases = [
            OperationError::Access(AccessError::MissingProject),
            OperationError::Access(AccessError::Parse("eof".to_string())),
            OperationError::Accessor(AccessorError::Source(SourceError::Unavailable(
                "offline".to_string(),
            ))),
            OperationError::Serialization("nan".to_string()),
        ];
        for error in cases {
            let normalized = NormalizedError::from_operation(&error, Operation::GetAgentData);
            assert_eq!(normalized.kind, ErrorKind::Unknown);
            assert_eq!(normalized.message, "Unable to load agents data. Please try again.");
            assert_eq!(normalized.status, StatusCode::INTERNAL_SERVER_ERROR);
        }
    }

    #[test]
    fn host_auth_failure_is_not_a_role_denial() {
        let normalized = NormalizedError::boundary(StatusCode::UNAUTHORIZED, "missing token");
        assert_eq!(normalized.kind, ErrorKind::Unauthenticated);
        assert_ne!(normalized.kind.code(), ErrorKind::AccessDenied.code());
        let value = serde_json::to_value(normalized.body(String::new())).unwrap();
        assert_eq!(value["error"]["code"], "UNAUTHENTICATED");

        let missing = NormalizedError::boundary(StatusCode::NOT_FOUND, "Unknown operation: x");
        assert_eq!(missing.kind, ErrorKind::Unknown);
    }

    #[test]
    fn body_carries_code_and_timestamp() {
        let body = NormalizedError::unknown("dashboard").body("2026-10-18T09:30:00Z".to_string());
        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value["error"]["code"], "UNKNOWN");
        assert_eq!(value["error"]["timestamp"], "2026-10-18T09:30:00Z");
    }
}
