// crates/qa-dashboard-server/src/operation.rs
// ============================================================================
// Module: Operations
// Description: Named operations exposed at the call boundary.
// Purpose: Map wire names to operations and their resource labels.
// ============================================================================

//! Operation names accepted by `POST /invoke/{operation}`.

use std::fmt;

/// Call-boundary operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// Full KPI set.
    GetDashboardData,
    /// Full agent roster with metadata.
    GetAgentData,
    /// Group-path access report; never fails.
    CheckUserAccess,
    /// Single agent lookup.
    GetAgentById,
    /// Agents in a performance bucket.
    GetAgentsByPerformance,
    /// Agents whose name contains a term.
    SearchAgents,
    /// Roster statistics.
    GetPerformanceStats,
    /// Headline KPI summary.
    GetDashboardSummary,
}

impl Operation {
    /// Every operation, in wire order.
    pub const ALL: [Self; 8] = [
        Self::GetDashboardData,
        Self::GetAgentData,
        Self::CheckUserAccess,
        Self::GetAgentById,
        Self::GetAgentsByPerformance,
        Self::SearchAgents,
        Self::GetPerformanceStats,
        Self::GetDashboardSummary,
    ];

    /// Parses a wire name. Names are case-sensitive.
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|operation| operation.as_str() == name)
    }

    /// Returns the wire name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::GetDashboardData => "getDashboardData",
            Self::GetAgentData => "getAgentData",
            Self::CheckUserAccess => "checkUserAccess",
            Self::GetAgentById => "getAgentById",
            Self::GetAgentsByPerformance => "getAgentsByPerformance",
            Self::SearchAgents => "searchAgents",
            Self::GetPerformanceStats => "getPerformanceStats",
            Self::GetDashboardSummary => "getDashboardSummary",
        }
    }

    /// Returns the resource label used in denial and failure messages.
    #[must_use]
    pub const fn resource(self) -> &'static str {
        match self {
            Self::GetDashboardData => "dashboard",
            Self::GetAgentData | Self::GetAgentsByPerformance | Self::SearchAgents => "agents",
            Self::CheckUserAccess => "access",
            Self::GetAgentById => "agent",
            Self::GetPerformanceStats => "performance stats",
            Self::GetDashboardSummary => "dashboard summary",
        }
    }

    /// Returns true when the operation passes through the access gate.
    #[must_use]
    pub const fn is_protected(self) -> bool {
        !matches!(self, Self::CheckUserAccess)
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::Operation;

    #[test]
    fn wire_names_round_trip() {
        for operation in Operation::ALL {
            assert_eq!(Operation::parse(operation.as_str()), Some(operation));
        }
        assert_eq!(Operation::parse("getdashboarddata"), None);
        assert_eq!(Operation::parse("getText"), None);
    }

    #[test]
    fn only_access_report_is_unprotected() {
        let unprotected: Vec<_> =
            Operation::ALL.into_iter().filter(|operation| !operation.is_protected()).collect();
        assert_eq!(unprotected, vec![Operation::CheckUserAccess]);
    }
}
