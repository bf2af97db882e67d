// crates/qa-dashboard-view/src/state.rs
// ============================================================================
// Module: Presentation State
// Description: View phases, tabs, expansion flags, and pipeline inputs.
// Purpose: Own every piece of UI state behind ticket-guarded transitions.
// Dependencies: qa-dashboard-core
// ============================================================================

//! ## Overview
//! [`PresentationState`] starts in [`Phase::Loading`] on mount and moves to
//! exactly one of `AccessDenied`, `Error`, or `Ready` when the dashboard
//! fetch resolves. The agents tab loads its roster lazily on first
//! activation, with its own loading flag and error so the overview stays
//! usable.
//!
//! Every fetch is issued with a [`FetchTicket`]. Results are applied only
//! while the state is mounted and the ticket's generation is current, so a
//! late response never lands in a remounted or unmounted view.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeSet;

use qa_dashboard_core::AgentDataset;
use qa_dashboard_core::AgentId;
use qa_dashboard_core::DashboardKpis;
use qa_dashboard_core::PerformanceBucket;

use crate::bridge::BridgeError;
use crate::pipeline::PageView;
use crate::pipeline::SortKey;
use crate::pipeline::build_page;
use crate::pipeline::clamp_page;
use crate::pipeline::filter_agents;
use crate::pipeline::page_count;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Top-level view phase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase {
    /// Dashboard fetch outstanding.
    Loading,
    /// Caller is not allowed to see the dashboard.
    AccessDenied(String),
    /// Dashboard fetch failed for any other reason.
    Error(String),
    /// Dashboard loaded.
    Ready,
}

/// Ready-state tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    /// KPI overview.
    #[default]
    Overview,
    /// Agent roster.
    Agents,
}

/// Sub-view failure for the agents tab.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewError {
    /// Caller is not allowed to see agent data.
    AccessDenied(String),
    /// Agent fetch failed for any other reason.
    Failed(String),
}

impl From<BridgeError> for ViewError {
    fn from(error: BridgeError) -> Self {
        if error.is_access_denied() {
            Self::AccessDenied(error.to_string())
        } else {
            Self::Failed(error.to_string())
        }
    }
}

/// Which dataset a ticket was issued for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchKind {
    /// `getDashboardData`.
    Dashboard,
    /// `getAgentData`.
    Agents,
}

/// Token binding a fetch result to the mount that issued it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    /// Mount generation at issue time.
    generation: u64,
    /// Dataset requested.
    kind: FetchKind,
}

impl FetchTicket {
    /// Returns the dataset this ticket was issued for.
    #[must_use]
    pub const fn kind(self) -> FetchKind {
        self.kind
    }
}

// ============================================================================
// SECTION: Presentation State
// ============================================================================

/// Presentation state for one dashboard session.
#[derive(Debug, Clone)]
pub struct PresentationState {
    /// Incremented on every mount.
    generation: u64,
    /// False before the first mount and after unmount.
    mounted: bool,
    /// Top-level phase.
    phase: Phase,
    /// Loaded KPI set.
    dashboard: Option<DashboardKpis>,
    /// Loaded roster.
    agents: Option<AgentDataset>,
    /// Agent fetch outstanding.
    agents_loading: bool,
    /// Agent fetch failure.
    agents_error: Option<ViewError>,
    /// Active tab.
    tab: Tab,
    /// Pillar breakdown card expanded.
    pillars_expanded: bool,
    /// Expanded agent rows.
    expanded_agents: BTreeSet<AgentId>,
    /// Name search term.
    search: String,
    /// Sort key.
    sort: SortKey,
    /// Bucket filter.
    filter: PerformanceBucket,
    /// One-based page.
    page: usize,
}

impl Default for PresentationState {
    fn default() -> Self {
        Self::new()
    }
}

impl PresentationState {
    /// Creates unmounted state.
    #[must_use]
    pub fn new() -> Self {
        Self {
            generation: 0,
            mounted: false,
            phase: Phase::Loading,
            dashboard: None,
            agents: None,
            agents_loading: false,
            agents_error: None,
            tab: Tab::Overview,
            pillars_expanded: false,
            expanded_agents: BTreeSet::new(),
            search: String::new(),
            sort: SortKey::Name,
            filter: PerformanceBucket::All,
            page: 1,
        }
    }

    // ------------------------------------------------------------------------
    // Lifecycle
    // ------------------------------------------------------------------------

    /// Resets to `Loading` and returns the ticket for the dashboard fetch.
    pub fn mount(&mut self) -> FetchTicket {
        let generation = self.generation.wrapping_add(1);
        *self = Self {
            generation,
            mounted: true,
            ..Self::new()
        };
        self.ticket(FetchKind::Dashboard)
    }

    /// Discards the session; outstanding results are ignored.
    pub const fn unmount(&mut self) {
        self.mounted = false;
    }

    /// Returns true when results for `ticket` would still be applied.
    #[must_use]
    pub const fn accepts(&self, ticket: FetchTicket) -> bool {
        self.mounted && ticket.generation == self.generation
    }

    /// Applies the dashboard fetch result. Returns false when discarded.
    pub fn apply_dashboard(
        &mut self,
        ticket: FetchTicket,
        result: Result<DashboardKpis, BridgeError>,
    ) -> bool {
        if !self.accepts(ticket) || ticket.kind != FetchKind::Dashboard {
            return false;
        }
        match result {
            Ok(kpis) => {
                self.dashboard = Some(kpis);
                self.phase = Phase::Ready;
            }
            Err(error) if error.is_access_denied() => {
                self.phase = Phase::AccessDenied(error.to_string());
            }
            Err(error) => self.phase = Phase::Error(error.to_string()),
        }
        true
    }

    /// Switches tab; returns a ticket when the roster must be fetched.
    ///
    /// Tabs only exist once the dashboard is ready. The roster is requested
    /// when it is neither loaded nor already loading.
    pub fn activate_tab(&mut self, tab: Tab) -> Option<FetchTicket> {
        if self.phase != Phase::Ready {
            return None;
        }
        self.tab = tab;
        if tab != Tab::Agents || self.agents.is_some() || self.agents_loading {
            return None;
        }
        self.agents_loading = true;
        self.agents_error = None;
        Some(self.ticket(FetchKind::Agents))
    }

    /// Applies the agent fetch result. Returns false when discarded.
    pub fn apply_agents(
        &mut self,
        ticket: FetchTicket,
        result: Result<AgentDataset, BridgeError>,
    ) -> bool {
        if !self.accepts(ticket) || ticket.kind != FetchKind::Agents {
            return false;
        }
        self.agents_loading = false;
        match result {
            Ok(dataset) => {
                self.agents = Some(dataset);
                self.agents_error = None;
            }
            Err(error) => self.agents_error = Some(ViewError::from(error)),
        }
        true
    }

    // ------------------------------------------------------------------------
    // Pipeline Inputs
    // ------------------------------------------------------------------------

    /// Sets the search term and returns to page 1.
    pub fn set_search(&mut self, term: impl Into<String>) {
        self.search = term.into();
        self.page = 1;
    }

    /// Sets the sort key and returns to page 1.
    pub const fn set_sort(&mut self, key: SortKey) {
        self.sort = key;
        self.page = 1;
    }

    /// Sets the bucket filter and returns to page 1.
    pub const fn set_filter(&mut self, bucket: PerformanceBucket) {
        self.filter = bucket;
        self.page = 1;
    }

    /// Moves to `page`, clamped to the filtered page range.
    pub fn set_page(&mut self, page: usize) {
        self.page = clamp_page(page, self.filtered_pages());
    }

    /// Advances one page when possible.
    pub fn next_page(&mut self) {
        self.set_page(self.page.saturating_add(1));
    }

    /// Goes back one page when possible.
    pub fn previous_page(&mut self) {
        self.set_page(self.page.saturating_sub(1));
    }

    /// Pages for the current search and filter.
    fn filtered_pages(&self) -> usize {
        self.agents.as_ref().map_or(0, |dataset| {
            page_count(filter_agents(&dataset.agents, &self.search, self.filter).len())
        })
    }

    // ------------------------------------------------------------------------
    // Expansion
    // ------------------------------------------------------------------------

    /// Toggles the pillar breakdown card.
    pub const fn toggle_pillars(&mut self) {
        self.pillars_expanded = !self.pillars_expanded;
    }

    /// Toggles one agent row; other rows are untouched.
    pub fn toggle_agent(&mut self, id: AgentId) {
        if !self.expanded_agents.remove(&id) {
            self.expanded_agents.insert(id);
        }
    }

    /// Returns true when the agent row is expanded.
    #[must_use]
    pub fn is_agent_expanded(&self, id: AgentId) -> bool {
        self.expanded_agents.contains(&id)
    }

    // ------------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------------

    /// Current phase.
    #[must_use]
    pub const fn phase(&self) -> &Phase {
        &self.phase
    }

    /// Active tab.
    #[must_use]
    pub const fn tab(&self) -> Tab {
        self.tab
    }

    /// Loaded KPI set.
    #[must_use]
    pub const fn dashboard(&self) -> Option<&DashboardKpis> {
        self.dashboard.as_ref()
    }

    /// Loaded roster.
    #[must_use]
    pub const fn agents(&self) -> Option<&AgentDataset> {
        self.agents.as_ref()
    }

    /// True while the roster fetch is outstanding.
    #[must_use]
    pub const fn agents_loading(&self) -> bool {
        self.agents_loading
    }

    /// Agents tab failure.
    #[must_use]
    pub const fn agents_error(&self) -> Option<&ViewError> {
        self.agents_error.as_ref()
    }

    /// True when the pillar card is expanded.
    #[must_use]
    pub const fn pillars_expanded(&self) -> bool {
        self.pillars_expanded
    }

    /// Search term.
    #[must_use]
    pub fn search(&self) -> &str {
        &self.search
    }

    /// Sort key.
    #[must_use]
    pub const fn sort(&self) -> SortKey {
        self.sort
    }

    /// Bucket filter.
    #[must_use]
    pub const fn filter(&self) -> PerformanceBucket {
        self.filter
    }

    /// One-based page.
    #[must_use]
    pub const fn page(&self) -> usize {
        self.page
    }

    /// Visible page of the roster, once loaded.
    #[must_use]
    pub fn current_page(&self) -> Option<PageView<'_>> {
        self.agents.as_ref().map(|dataset| {
            build_page(&dataset.agents, &self.search, self.filter, self.sort, self.page)
        })
    }

    /// Issues a ticket for the current generation.
    const fn ticket(&self, kind: FetchKind) -> FetchTicket {
        FetchTicket {
            generation: self.generation,
            kind,
        }
    }
}
