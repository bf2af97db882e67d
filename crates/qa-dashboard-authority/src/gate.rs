// crates/qa-dashboard-authority/src/gate.rs
// ============================================================================
// Module: Access Gate
// Description: Role-membership and group-keyword access decisions.
// Purpose: Decide whether a caller may read dashboard data.
// Dependencies: qa-dashboard-{config,core}
// ============================================================================

//! ## Overview
//! The role path resolves a role id for the caller's project (by name lookup
//! or from config), fetches the role, and grants iff the caller is one of its
//! user actors. A role that is absent, or whose URL carries no numeric id, is
//! a deny. The group path grants iff any of the caller's group names contains
//! the configured keyword.
//!
//! The gate holds no mutable state and performs no caching.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Arc;

use qa_dashboard_config::AccessConfig;
use qa_dashboard_config::FailurePolicy;
use qa_dashboard_config::RoleSource;
use qa_dashboard_core::AccountId;
use qa_dashboard_core::ProjectKey;
use qa_dashboard_core::RoleId;

use crate::authority::GroupRef;
use crate::authority::RoleAuthority;
use crate::authority::UserProfile;
use crate::error::AccessError;

// ============================================================================
// SECTION: Decisions
// ============================================================================

/// Outcome of an access check that reached a decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessDecision {
    /// Caller may read dashboard data.
    Granted,
    /// Caller may not read dashboard data.
    Denied(DenialReason),
}

impl AccessDecision {
    /// Returns true for [`AccessDecision::Granted`].
    #[must_use]
    pub const fn is_granted(self) -> bool {
        matches!(self, Self::Granted)
    }

    /// Returns a stable label for audit output.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Granted => "granted",
            Self::Denied(reason) => reason.as_str(),
        }
    }
}

/// Why access was denied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DenialReason {
    /// The project defines no role with the configured name.
    RoleNotFound,
    /// The role URL carries no numeric id.
    RoleIdUnavailable,
    /// The caller is not a user actor of the role.
    NotARoleMember,
    /// No group name contains the keyword.
    NoMatchingGroup,
}

impl DenialReason {
    /// Returns a stable label for audit output.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::RoleNotFound => "role_not_found",
            Self::RoleIdUnavailable => "role_id_unavailable",
            Self::NotARoleMember => "not_a_role_member",
            Self::NoMatchingGroup => "no_matching_group",
        }
    }
}

/// Result of the group-membership check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupCheck {
    /// Whether any group matched the keyword.
    pub has_access: bool,
    /// Caller profile as reported by the authority.
    pub user: UserProfile,
    /// Groups considered.
    pub groups: Vec<GroupRef>,
}

// ============================================================================
// SECTION: Role Resolution
// ============================================================================

/// How the gate obtains the role id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoleResolution {
    /// List the project's roles and match `role_name` case-insensitively.
    Lookup {
        /// Lowercased role name.
        role_name: String,
    },
    /// Use a fixed project and role.
    Fixed {
        /// Project the role belongs to.
        project: ProjectKey,
        /// Role identifier.
        role: RoleId,
    },
}

/// Extracts the numeric id from a role URL ending in `/role/{id}`.
#[must_use]
pub fn role_id_from_url(url: &str) -> Option<RoleId> {
    let (_, tail) = url.rsplit_once("/role/")?;
    if tail.is_empty() || !tail.bytes().all(|byte| byte.is_ascii_digit()) {
        return None;
    }
    tail.parse().ok().map(RoleId::new)
}

// ============================================================================
// SECTION: Access Gate
// ============================================================================

/// Access gate over a [`RoleAuthority`].
pub struct AccessGate {
    /// External authority.
    authority: Arc<dyn RoleAuthority>,
    /// Role id resolution mode.
    resolution: RoleResolution,
    /// Project used when the caller context has none.
    default_project: Option<ProjectKey>,
    /// Lowercased group keyword.
    group_keyword: String,
    /// Failure policy shared by both paths.
    failure_policy: FailurePolicy,
}

impl AccessGate {
    /// Builds a gate from its parts.
    #[must_use]
    pub fn new(
        authority: Arc<dyn RoleAuthority>,
        resolution: RoleResolution,
        default_project: Option<ProjectKey>,
        group_keyword: &str,
        failure_policy: FailurePolicy,
    ) -> Self {
        let resolution = match resolution {
            RoleResolution::Lookup {
                role_name,
            } => RoleResolution::Lookup {
                role_name: role_name.trim().to_lowercase(),
            },
            fixed @ RoleResolution::Fixed {
                ..
            } => fixed,
        };
        Self {
            authority,
            resolution,
            default_project,
            group_keyword: group_keyword.trim().to_lowercase(),
            failure_policy,
        }
    }

    /// Builds a gate from validated access config.
    ///
    /// # Errors
    ///
    /// Returns [`AccessError::Client`] when fixed mode is missing its pair.
    pub fn from_config(
        authority: Arc<dyn RoleAuthority>,
        config: &AccessConfig,
    ) -> Result<Self, AccessError> {
        let resolution = match config.role_source {
            RoleSource::Lookup => RoleResolution::Lookup {
                role_name: config.role_name.clone(),
            },
            RoleSource::Fixed => match (&config.fixed_project_key, config.fixed_role_id) {
                (Some(project), Some(role)) => RoleResolution::Fixed {
                    project: ProjectKey::new(project.clone()),
                    role: RoleId::new(role),
                },
                _ => {
                    return Err(AccessError::Client(
                        "fixed role source requires project key and role id".to_string(),
                    ));
                }
            },
        };
        Ok(Self::new(
            authority,
            resolution,
            config.default_project_key.clone().map(ProjectKey::new),
            &config.group_keyword,
            config.failure_policy,
        ))
    }

    /// Returns the configured failure policy.
    #[must_use]
    pub const fn failure_policy(&self) -> FailurePolicy {
        self.failure_policy
    }

    /// Resolves the project for a check: caller context, then configured default.
    ///
    /// # Errors
    ///
    /// Returns [`AccessError::MissingProject`] when neither is available.
    pub fn resolve_project(
        &self,
        requested: Option<&ProjectKey>,
    ) -> Result<ProjectKey, AccessError> {
        requested
            .filter(|key| !key.as_str().trim().is_empty())
            .or(self.default_project.as_ref())
            .cloned()
            .ok_or(AccessError::MissingProject)
    }

    /// Role path: decides whether `account` holds the configured project role.
    ///
    /// # Errors
    ///
    /// Returns [`AccessError`] when the authority cannot answer or no project
    /// key is available. Never converts a failure into a deny.
    pub async fn check_access(
        &self,
        account: &AccountId,
        project: Option<&ProjectKey>,
    ) -> Result<AccessDecision, AccessError> {
        let (project, role) = match &self.resolution {
            RoleResolution::Fixed {
                project,
                role,
            } => (project.clone(), *role),
            RoleResolution::Lookup {
                role_name,
            } => {
                let project = self.resolve_project(project)?;
                let roles = self.authority.project_roles(&project).await?;
                let Some((_, url)) =
                    roles.iter().find(|(name, _)| name.to_lowercase() == *role_name)
                else {
                    return Ok(AccessDecision::Denied(DenialReason::RoleNotFound));
                };
                let Some(role) = role_id_from_url(url) else {
                    return Ok(AccessDecision::Denied(DenialReason::RoleIdUnavailable));
                };
                (project, role)
            }
        };
        let detail = self.authority.role_detail(&project, role).await?;
        if detail.has_user(account) {
            Ok(AccessDecision::Granted)
        } else {
            Ok(AccessDecision::Denied(DenialReason::NotARoleMember))
        }
    }

    /// Group path: decides access from the caller's group names.
    ///
    /// Uses the expanded user lookup; when the profile carries no group list
    /// the direct membership lookup is used instead.
    ///
    /// # Errors
    ///
    /// Returns [`AccessError`] when the authority cannot answer.
    pub async fn check_groups(&self, account: &AccountId) -> Result<GroupCheck, AccessError> {
        let mut user = self.authority.user_with_groups(account).await?;
        let groups = match user.groups.take() {
            Some(list) => list.items,
            None => self.authority.user_groups(account).await?,
        };
        let has_access =
            groups.iter().any(|group| group.name.to_lowercase().contains(&self.group_keyword));
        Ok(GroupCheck {
            has_access,
            user,
            groups,
        })
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
