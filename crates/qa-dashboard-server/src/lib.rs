// crates/qa-dashboard-server/src/lib.rs
// ============================================================================
// Module: QA Dashboard Server Library
// Description: HTTP call boundary for dashboard operations.
// Purpose: Gate, dispatch, normalize, and audit every invocation.
// Dependencies: qa-dashboard-{authority,config,core}, axum, tokio
// ============================================================================

//! ## Overview
//! The server exposes `POST /invoke/{operation}`. Every data-returning
//! operation passes through the access gate before it touches the data
//! source; `checkUserAccess` reports the group-path decision and never fails.
//! Internal failures are audited with caller context, then normalized into
//! one of three error kinds before crossing the boundary.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod audit;
pub mod auth;
pub mod clock;
pub mod context;
pub mod error;
pub mod operation;
pub mod resolver;
pub mod server;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use audit::AccessAuditEvent;
pub use audit::AuditSink;
pub use audit::FailureAuditEvent;
pub use audit::FileAuditSink;
pub use audit::LifecycleAuditEvent;
pub use audit::MemoryAuditSink;
pub use audit::NoopAuditSink;
pub use audit::OperationAuditEvent;
pub use audit::StderrAuditSink;
pub use audit::token_fingerprint;
pub use auth::HostAuth;
pub use auth::HostAuthError;
pub use clock::Clock;
pub use clock::SystemClock;
pub use context::CallerContext;
pub use context::InvocationRequest;
pub use error::ErrorBody;
pub use error::ErrorKind;
pub use error::NormalizedError;
pub use error::OperationError;
pub use operation::Operation;
pub use resolver::Resolver;
pub use resolver::UserAccessReport;
pub use server::DashboardServer;
pub use server::ServerError;
pub use server::router;
pub use server::serve_listener;
