// crates/qa-dashboard-core/src/fixtures.rs
// ============================================================================
// Module: Fixture Data Source
// Description: Compiled-in agent roster and KPI set.
// Purpose: Serve seed data through the source interfaces until a live feed exists.
// Dependencies: crate::core, crate::interfaces
// ============================================================================

//! ## Overview
//! [`FixtureDataSource`] returns a fixed roster of eleven agents across two
//! departments and a seven-entry KPI set. The data is immutable; every read
//! builds fresh owned records.

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::core::AgentId;
use crate::core::AgentMetrics;
use crate::core::AgentRecord;
use crate::core::CUSTOMER_SUPPORT_DEPARTMENT;
use crate::core::DashboardKpis;
use crate::core::Kpi;
use crate::core::PillarScores;
use crate::core::RecentPerformance;
use crate::core::TECHNICAL_SUPPORT_DEPARTMENT;
use crate::core::Trend;
use crate::interfaces::AgentSource;
use crate::interfaces::KpiSource;
use crate::interfaces::SourceError;

// ============================================================================
// SECTION: Fixture Source
// ============================================================================

/// Data source backed by compiled-in seed records.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixtureDataSource;

impl FixtureDataSource {
    /// Creates the fixture source.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl AgentSource for FixtureDataSource {
    fn list_agents(&self) -> Result<Vec<AgentRecord>, SourceError> {
        Ok(roster())
    }
}

impl KpiSource for FixtureDataSource {
    fn get_kpis(&self) -> Result<DashboardKpis, SourceError> {
        Ok(kpis())
    }
}

// ============================================================================
// SECTION: KPI Fixtures
// ============================================================================

/// Builds the seed KPI set.
fn kpis() -> DashboardKpis {
    let mut set = DashboardKpis::new();
    set.insert("kpi1", Kpi::new("Average QA scores", "8.6"));
    set.insert("kpi2", Kpi::new("Error rates", "15%"));
    set.insert(
        "kpi3",
        Kpi::new("Pillar wise performance", "Good").with_pillars(PillarScores {
            empathy: 8.2,
            clarity: 7.8,
            completeness: 8.5,
            professionalism: 9.1,
            ticket_management: 8.3,
            sla_first_response: 7.9,
            sla_resolution: 8.1,
        }),
    );
    set.insert("kpi4", Kpi::new("FCR", "70%"));
    set.insert("kpi5", Kpi::new("Performance after coaching", "+50%"));
    set.insert("kpi6", Kpi::new("Average ticket handling time", "11 min"));
    set.insert("kpi7", Kpi::new("CSAT", "3.8/5"));
    set
}

// ============================================================================
// SECTION: Agent Fixtures
// ============================================================================

/// Identity columns for a seed agent.
struct SeedIdentity {
    /// Agent id.
    id: u64,
    /// Display name.
    name: &'static str,
    /// Department label.
    department: &'static str,
    /// Hire date.
    hire_date: &'static str,
    /// Overall score.
    overall: f64,
}

/// Builds the seed roster.
fn roster() -> Vec<AgentRecord> {
    vec![
        seed(
            SeedIdentity {
                id: 1,
                name: "Sarah Johnson",
                department: CUSTOMER_SUPPORT_DEPARTMENT,
                hire_date: "2022-03-15",
                overall: 8.4,
            },
            [8.2, 7.8, 8.5, 9.1, 8.3, 7.9, 8.1, 12.0, 75.0, 9.0, 45.0, 4.2],
            (8.6, 8.2, Trend::Improving),
        ),
        seed(
            SeedIdentity {
                id: 2,
                name: "Michael Chen",
                department: TECHNICAL_SUPPORT_DEPARTMENT,
                hire_date: "2021-11-20",
                overall: 7.9,
            },
            [7.5, 8.2, 7.9, 8.8, 8.0, 8.1, 7.8, 18.0, 68.0, 12.0, 38.0, 3.8],
            (8.1, 7.7, Trend::Improving),
        ),
        seed(
            SeedIdentity {
                id: 3,
                name: "Emily Rodriguez",
                department: CUSTOMER_SUPPORT_DEPARTMENT,
                hire_date: "2020-08-10",
                overall: 9.1,
            },
            [9.3, 8.9, 9.0, 9.5, 9.2, 8.8, 9.1, 8.0, 82.0, 8.0, 62.0, 4.6],
            (9.3, 8.9, Trend::Improving),
        ),
        seed(
            SeedIdentity {
                id: 4,
                name: "David Thompson",
                department: TECHNICAL_SUPPORT_DEPARTMENT,
                hire_date: "2023-01-05",
                overall: 8.7,
            },
            [8.0, 8.5, 8.8, 9.0, 8.4, 8.2, 8.6, 14.0, 72.0, 10.0, 52.0, 4.1],
            (8.9, 8.5, Trend::Improving),
        ),
        seed(
            SeedIdentity {
                id: 5,
                name: "Lisa Wang",
                department: CUSTOMER_SUPPORT_DEPARTMENT,
                hire_date: "2022-09-12",
                overall: 8.2,
            },
            [8.7, 7.9, 8.1, 8.6, 8.0, 7.8, 8.3, 16.0, 69.0, 13.0, 41.0, 3.9],
            (8.4, 8.0, Trend::Improving),
        ),
        seed(
            SeedIdentity {
                id: 6,
                name: "James Mitchell",
                department: TECHNICAL_SUPPORT_DEPARTMENT,
                hire_date: "2021-07-18",
                overall: 7.3,
            },
            [7.0, 7.5, 7.1, 8.2, 7.3, 6.9, 7.4, 22.0, 62.0, 15.0, 28.0, 3.4],
            (7.5, 7.1, Trend::Improving),
        ),
        seed(
            SeedIdentity {
                id: 7,
                name: "Amanda Foster",
                department: CUSTOMER_SUPPORT_DEPARTMENT,
                hire_date: "2023-04-22",
                overall: 8.9,
            },
            [9.1, 8.7, 8.8, 9.2, 8.9, 8.6, 9.0, 10.0, 78.0, 9.0, 55.0, 4.4],
            (9.1, 8.7, Trend::Improving),
        ),
        seed(
            SeedIdentity {
                id: 8,
                name: "Robert Kim",
                department: TECHNICAL_SUPPORT_DEPARTMENT,
                hire_date: "2020-12-03",
                overall: 6.8,
            },
            [6.5, 7.1, 6.9, 7.8, 6.8, 6.2, 6.7, 28.0, 55.0, 18.0, 22.0, 3.1],
            (6.9, 6.7, Trend::Stable),
        ),
        seed(
            SeedIdentity {
                id: 9,
                name: "Jessica Martinez",
                department: CUSTOMER_SUPPORT_DEPARTMENT,
                hire_date: "2022-01-10",
                overall: 8.6,
            },
            [8.8, 8.4, 8.7, 8.9, 8.5, 8.2, 8.6, 13.0, 74.0, 11.0, 48.0, 4.3],
            (8.8, 8.4, Trend::Improving),
        ),
        seed(
            SeedIdentity {
                id: 10,
                name: "Christopher Lee",
                department: TECHNICAL_SUPPORT_DEPARTMENT,
                hire_date: "2021-05-14",
                overall: 7.7,
            },
            [7.4, 7.9, 7.6, 8.1, 7.5, 7.3, 7.7, 19.0, 65.0, 14.0, 35.0, 3.7],
            (7.9, 7.5, Trend::Improving),
        ),
        seed(
            SeedIdentity {
                id: 11,
                name: "Alex Johnson",
                department: CUSTOMER_SUPPORT_DEPARTMENT,
                hire_date: "2023-08-15",
                overall: 8.5,
            },
            [8.4, 8.6, 8.3, 8.8, 8.5, 8.2, 8.7, 11.0, 76.0, 10.0, 50.0, 4.3],
            (8.7, 8.3, Trend::Improving),
        ),
    ]
}

/// Builds one seed record; metrics follow the declared metric key order.
fn seed(identity: SeedIdentity, metrics: [f64; 12], recent: (f64, f64, Trend)) -> AgentRecord {
    let [
        empathy,
        clarity,
        completeness,
        professionalism,
        ticket_management,
        sla_first_response,
        sla_resolution,
        error_rate,
        fcr,
        avg_ticket_time,
        post_coaching_improvement,
        customer_satisfaction_score,
    ] = metrics;
    let (this_month, last_month, trend) = recent;
    AgentRecord {
        id: AgentId::new(identity.id),
        name: identity.name.to_string(),
        email: email_for(identity.name),
        department: identity.department.to_string(),
        hire_date: identity.hire_date.to_string(),
        overall_score: identity.overall,
        metrics: AgentMetrics {
            empathy,
            clarity,
            completeness,
            professionalism,
            ticket_management,
            sla_first_response,
            sla_resolution,
            error_rate,
            fcr,
            avg_ticket_time,
            post_coaching_improvement,
            customer_satisfaction_score,
        },
        recent_performance: RecentPerformance {
            this_month,
            last_month,
            trend,
        },
    }
}

/// Derives the company email address from a display name.
fn email_for(name: &str) -> String {
    let local = name.to_lowercase().split_whitespace().collect::<Vec<_>>().join(".");
    format!("{local}@company.com")
}

// ============================================================================
// SECTION: Tests
// ============================================================================
