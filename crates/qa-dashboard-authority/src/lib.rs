// crates/qa-dashboard-authority/src/lib.rs
// ============================================================================
// Module: QA Dashboard Authority Library
// Description: Access gate over an external role and group authority.
// Purpose: Decide whether a caller may read dashboard data.
// Dependencies: qa-dashboard-{config,core}, reqwest, tokio, url
// ============================================================================

//! ## Overview
//! The access gate answers one question: is this caller a QA manager? The
//! role path checks membership of a named project role; the group path checks
//! group names for a keyword. Both talk to the external authority through
//! [`RoleAuthority`], implemented over HTTP by [`JiraAuthority`].
//!
//! Authority failures are never converted into a deny here. Callers decide
//! how to treat them using the configured [`qa_dashboard_config::FailurePolicy`].

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod authority;
pub mod error;
pub mod gate;
pub mod jira;
pub mod retry;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use authority::ActorUser;
pub use authority::GroupList;
pub use authority::GroupRef;
pub use authority::ProjectRoles;
pub use authority::RoleActor;
pub use authority::RoleAuthority;
pub use authority::RoleDetail;
pub use authority::UserProfile;
pub use error::AccessError;
pub use gate::AccessDecision;
pub use gate::AccessGate;
pub use gate::DenialReason;
pub use gate::GroupCheck;
pub use gate::RoleResolution;
pub use gate::role_id_from_url;
pub use jira::JiraAuthority;
pub use jira::MAX_RESPONSE_BYTES;
pub use retry::RetryPolicy;
