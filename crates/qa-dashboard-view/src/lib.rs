// crates/qa-dashboard-view/src/lib.rs
// ============================================================================
// Module: QA Dashboard View Library
// Description: Host-agnostic presentation layer for the QA dashboard.
// Purpose: Drive fetches, view phases, and the agent pipeline.
// Dependencies: qa-dashboard-core, async-trait, reqwest
// ============================================================================

//! ## Overview
//! The view layer fetches datasets through a [`DashboardBridge`], tracks the
//! loading, access-denied, error, and ready phases in a
//! [`PresentationState`], and projects the roster through the search,
//! filter, sort, and page pipeline. It renders nothing itself; callers read
//! the state and [`PageView`] and draw them however they like.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod bridge;
pub mod driver;
pub mod pipeline;
pub mod state;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use bridge::BridgeError;
pub use bridge::DashboardBridge;
pub use bridge::HttpBridge;
pub use bridge::MAX_RESPONSE_BYTES;
pub use bridge::decode_agents;
pub use bridge::decode_dashboard;
pub use driver::AgentsFetch;
pub use driver::Dashboard;
pub use driver::FetchedAgents;
pub use pipeline::PAGE_SIZE;
pub use pipeline::PageView;
pub use pipeline::SortKey;
pub use pipeline::build_page;
pub use pipeline::clamp_page;
pub use pipeline::filter_agents;
pub use pipeline::page_count;
pub use pipeline::sort_agents;
pub use state::FetchKind;
pub use state::FetchTicket;
pub use state::Phase;
pub use state::PresentationState;
pub use state::Tab;
pub use state::ViewError;
