// crates/qa-dashboard-view/src/driver.rs
// ============================================================================
// Module: Dashboard Driver
// Description: Runs bridge fetches against the presentation state.
// Purpose: Pair every fetch with its ticket so stale results are dropped.
// Dependencies: qa-dashboard-core, crate::{bridge, state}
// ============================================================================

//! Async driver over a [`DashboardBridge`] and a [`PresentationState`].
//!
//! The roster fetch is detached from the session: [`Dashboard::select_tab`]
//! switches tab at once and hands back an [`AgentsFetch`] that owns its
//! bridge handle. The host keeps driving the session while the fetch runs,
//! then returns the result through [`Dashboard::complete_agents`].

use std::sync::Arc;

use qa_dashboard_core::AgentDataset;

use crate::bridge::BridgeError;
use crate::bridge::DashboardBridge;
use crate::state::FetchTicket;
use crate::state::PresentationState;
use crate::state::Tab;

/// Dashboard session driven through a bridge.
pub struct Dashboard<B> {
    /// Operation bridge, shared with outstanding fetches.
    bridge: Arc<B>,
    /// Session state.
    state: PresentationState,
}

impl<B: DashboardBridge> Dashboard<B> {
    /// Creates an unmounted session.
    #[must_use]
    pub fn new(bridge: B) -> Self {
        Self {
            bridge: Arc::new(bridge),
            state: PresentationState::new(),
        }
    }

    /// Mounts the view and loads the dashboard.
    pub async fn mount(&mut self) {
        let ticket = self.state.mount();
        let result = self.bridge.dashboard_data().await;
        self.state.apply_dashboard(ticket, result);
    }

    /// Switches to `tab` and returns the roster fetch when one is due.
    ///
    /// The session is free for interaction until the fetch completes.
    #[must_use = "a returned fetch must be run and completed to load the roster"]
    pub fn select_tab(&mut self, tab: Tab) -> Option<AgentsFetch<B>> {
        let ticket = self.state.activate_tab(tab)?;
        Some(AgentsFetch {
            bridge: Arc::clone(&self.bridge),
            ticket,
        })
    }

    /// Applies a finished roster fetch. Returns false when it was stale.
    pub fn complete_agents(&mut self, fetched: FetchedAgents) -> bool {
        self.state.apply_agents(fetched.ticket, fetched.result)
    }

    /// Switches to `tab` and waits for any roster fetch it starts.
    pub async fn open_tab(&mut self, tab: Tab) {
        if let Some(fetch) = self.select_tab(tab) {
            let fetched = fetch.run().await;
            self.complete_agents(fetched);
        }
    }

    /// Discards the session.
    pub const fn unmount(&mut self) {
        self.state.unmount();
    }

    /// Operation bridge.
    #[must_use]
    pub fn bridge(&self) -> &B {
        &self.bridge
    }

    /// Session state.
    #[must_use]
    pub const fn state(&self) -> &PresentationState {
        &self.state
    }

    /// Mutable session state for user interaction.
    pub const fn state_mut(&mut self) -> &mut PresentationState {
        &mut self.state
    }
}

/// Roster fetch issued by [`Dashboard::select_tab`].
pub struct AgentsFetch<B> {
    /// Bridge handle owned by the fetch.
    bridge: Arc<B>,
    /// Ticket the result is applied under.
    ticket: FetchTicket,
}

impl<B: DashboardBridge> AgentsFetch<B> {
    /// Ticket the result will be applied under.
    #[must_use]
    pub const fn ticket(&self) -> FetchTicket {
        self.ticket
    }

    /// Calls the roster operation.
    pub async fn run(self) -> FetchedAgents {
        let result = self.bridge.agent_data().await;
        FetchedAgents {
            ticket: self.ticket,
            result,
        }
    }
}

/// Roster result waiting to be applied to its session.
#[derive(Debug)]
pub struct FetchedAgents {
    /// Ticket issued with the fetch.
    ticket: FetchTicket,
    /// Bridge outcome.
    result: Result<AgentDataset, BridgeError>,
}

impl FetchedAgents {
    /// Ticket issued with the fetch.
    #[must_use]
    pub const fn ticket(&self) -> FetchTicket {
        self.ticket
    }
}
