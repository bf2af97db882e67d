// crates/qa-dashboard-authority/src/authority.rs
// ============================================================================
// Module: Role Authority
// Description: Interface to the external role and group authority.
// Purpose: Abstract the four lookups the access gate depends on.
// Dependencies: async-trait, qa-dashboard-core, serde
// ============================================================================

//! ## Overview
//! [`RoleAuthority`] maps one method to each outbound lookup. Wire types
//! mirror the authority's JSON and tolerate fields the gate does not read.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use async_trait::async_trait;
use qa_dashboard_core::AccountId;
use qa_dashboard_core::ProjectKey;
use qa_dashboard_core::RoleId;
use serde::Deserialize;
use serde::Serialize;

use crate::error::AccessError;

// ============================================================================
// SECTION: Wire Types
// ============================================================================

/// Project roles keyed by role name; values are role URLs ending in `/role/{id}`.
pub type ProjectRoles = BTreeMap<String, String>;

/// Role detail with its actors.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RoleDetail {
    /// Role name as reported by the authority.
    #[serde(default)]
    pub name: Option<String>,
    /// Users and groups attached to the role.
    #[serde(default)]
    pub actors: Vec<RoleActor>,
}

impl RoleDetail {
    /// Returns true when `account` is a user-type actor of this role.
    #[must_use]
    pub fn has_user(&self, account: &AccountId) -> bool {
        self.actors.iter().any(|actor| {
            actor.actor_user.as_ref().is_some_and(|user| user.account_id == account.as_str())
        })
    }
}

/// Single role actor. Group actors carry no `actorUser`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleActor {
    /// Display name of the actor.
    #[serde(default)]
    pub display_name: Option<String>,
    /// Present for user-type actors.
    #[serde(default)]
    pub actor_user: Option<ActorUser>,
}

/// User reference inside a role actor.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActorUser {
    /// Account identifier.
    pub account_id: String,
}

/// User profile returned by the expanded user lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    /// Account identifier.
    pub account_id: String,
    /// Display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    /// Email address, when visible to the caller.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email_address: Option<String>,
    /// Expanded group list; absent when the authority omits the expansion.
    #[serde(default, skip_serializing)]
    pub groups: Option<GroupList>,
}

/// Expanded group list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct GroupList {
    /// Group entries.
    #[serde(default)]
    pub items: Vec<GroupRef>,
}

/// Group reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupRef {
    /// Group name.
    pub name: String,
    /// Group identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_id: Option<String>,
}

// ============================================================================
// SECTION: Authority Interface
// ============================================================================

/// External role and group authority.
#[async_trait]
pub trait RoleAuthority: Send + Sync {
    /// Lists the roles defined for `project`.
    ///
    /// # Errors
    ///
    /// Returns [`AccessError`] when the authority cannot answer.
    async fn project_roles(&self, project: &ProjectKey) -> Result<ProjectRoles, AccessError>;

    /// Fetches one role with its actors.
    ///
    /// # Errors
    ///
    /// Returns [`AccessError`] when the authority cannot answer.
    async fn role_detail(
        &self,
        project: &ProjectKey,
        role: RoleId,
    ) -> Result<RoleDetail, AccessError>;

    /// Fetches the user with group expansion.
    ///
    /// # Errors
    ///
    /// Returns [`AccessError`] when the authority cannot answer.
    async fn user_with_groups(&self, account: &AccountId) -> Result<UserProfile, AccessError>;

    /// Lists the user's groups directly.
    ///
    /// # Errors
    ///
    /// Returns [`AccessError`] when the authority cannot answer.
    async fn user_groups(&self, account: &AccountId) -> Result<Vec<GroupRef>, AccessError>;
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, reason = "Test-only assertions.")]

    use qa_dashboard_core::AccountId;

    use super::RoleDetail;
    use super::UserProfile;

    #[test]
    fn role_detail_matches_user_actors_only() {
        let detail: RoleDetail = serde_json::from_str(
            r#"{"name":"QA Manager","id":10002,"actors":[
                {"displayName":"QA Managers","type":"atlassian-group-role-actor",
                 "actorGroup":{"name":"qa-managers"}},
                {"displayName":"Dana","type":"atlassian-user-role-actor",
                 "actorUser":{"accountId":"acc-1"}}
            ]}"#,
        )
        .unwrap();
        assert!(detail.has_user(&AccountId::new("acc-1")));
        assert!(!detail.has_user(&AccountId::new("qa-managers")));
    }

    #[test]
    fn user_profile_serializes_without_groups() {
        let profile: UserProfile = serde_json::from_str(
            r#"{"accountId":"acc-1","displayName":"Dana","groups":{"size":1,"items":[{"name":"QA Managers"}]}}"#,
        )
        .unwrap();
        assert_eq!(profile.groups.as_ref().unwrap().items.len(), 1);
        let value = serde_json::to_value(&profile).unwrap();
        assert!(value.get("groups").is_none());
        assert_eq!(value["displayName"], "Dana");
    }
}
