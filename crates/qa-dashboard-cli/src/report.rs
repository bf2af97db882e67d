// crates/qa-dashboard-cli/src/report.rs
// ============================================================================
// Module: Plain-Text Reports
// Description: Renders the KPI overview and the visible roster page.
// Purpose: Turn presentation state into terminal output.
// Dependencies: qa-dashboard-core, qa-dashboard-view
// ============================================================================

//! ## Overview
//! Renderers read a [`PresentationState`] and return the full report as a
//! string; writing it out is left to the caller. Nothing here mutates state.

// ============================================================================
// SECTION: Imports
// ============================================================================

use qa_dashboard_core::AgentRecord;
use qa_dashboard_core::Kpi;
use qa_dashboard_core::PerformanceBucket;
use qa_dashboard_view::PageView;
use qa_dashboard_view::PresentationState;

// ============================================================================
// SECTION: Overview
// ============================================================================

/// Renders the KPI overview, with pillar breakdowns when expanded.
pub fn render_overview(state: &PresentationState) -> String {
    let Some(kpis) = state.dashboard() else {
        return "Loading dashboard...".to_string();
    };
    let mut lines = vec!["QA Dashboard Overview".to_string(), String::new()];
    for (_, kpi) in kpis.iter() {
        lines.push(format!("  {}: {}", kpi.name, kpi.value));
        lines.extend(pillar_lines(kpi, state.pillars_expanded()));
    }
    lines.join("\n")
}

/// Pillar lines under a KPI card.
fn pillar_lines(kpi: &Kpi, expanded: bool) -> Vec<String> {
    let Some(pillars) = &kpi.pillars else {
        return Vec::new();
    };
    if !expanded {
        return vec![format!("    [+] {} quality pillars", pillars.entries().len())];
    }
    pillars.entries().iter().map(|(label, score)| format!("    - {label}: {score:.1}")).collect()
}

// ============================================================================
// SECTION: Agents
// ============================================================================

/// Renders the active roster page with its controls and pagination lines.
pub fn render_agents(state: &PresentationState) -> String {
    if state.agents_loading() {
        return "Loading agents...".to_string();
    }
    let Some(view) = state.current_page() else {
        return "No agent data loaded.".to_string();
    };
    let search = if state.search().is_empty() { "-" } else { state.search() };
    let mut lines = vec![
        format!("Search: {search} | Sort: {} | Filter: {}", state.sort(), state.filter()),
        String::new(),
    ];
    if view.rows.is_empty() {
        lines.push("No agents match the current filters.".to_string());
    } else {
        lines.push(format!(
            "{:>4}  {:<22} {:>6}  {:<7} {:>6} {:>6}",
            "ID", "Name", "Score", "Level", "Error", "FCR"
        ));
        for agent in &view.rows {
            lines.push(agent_row(agent));
            if state.is_agent_expanded(agent.id) {
                lines.extend(agent_detail(agent));
            }
        }
    }
    lines.push(String::new());
    lines.extend(pagination_lines(&view));
    lines.join("\n")
}

/// One roster row.
fn agent_row(agent: &AgentRecord) -> String {
    format!(
        "{:>4}  {:<22} {:>6.1}  {:<7} {:>6.1} {:>6.1}",
        agent.id.get(),
        agent.name,
        agent.overall_score,
        PerformanceBucket::classify(agent.overall_score).as_str(),
        agent.metrics.error_rate,
        agent.metrics.fcr,
    )
}

/// Expanded metric breakdown for one agent.
fn agent_detail(agent: &AgentRecord) -> Vec<String> {
    let join = |entries: &[(&str, f64)]| {
        entries
            .iter()
            .map(|(label, value)| format!("{label} {value:.1}"))
            .collect::<Vec<_>>()
            .join(", ")
    };
    let recent = &agent.recent_performance;
    vec![
        format!("        {} | {} | hired {}", agent.email, agent.department, agent.hire_date),
        format!("        Pillars: {}", join(&agent.metrics.pillars())),
        format!("        Operational: {}", join(&agent.metrics.operational())),
        format!(
            "        Recent: this month {:.1}, last month {:.1} ({})",
            recent.this_month,
            recent.last_month,
            recent.trend.as_str()
        ),
    ]
}

/// Range summary and page indicator.
fn pagination_lines(view: &PageView<'_>) -> Vec<String> {
    if view.filtered == 0 {
        return vec![format!("Showing 0 of {} agents", view.total)];
    }
    vec![view.summary(), format!("Page {} of {}", view.page, view.total_pages)]
}
