// crates/qa-dashboard-config/src/lib.rs
// ============================================================================
// Module: QA Dashboard Config Library
// Description: Canonical config model and validation.
// Purpose: Single source of truth for qa-dashboard.toml semantics.
// Dependencies: serde, toml, url
// ============================================================================

//! ## Overview
//! `qa-dashboard-config` defines the configuration model for the QA dashboard
//! service and its access gate. Validation is strict and fails closed: a
//! config that loads is safe to hand to the server and authority client.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod config;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use config::*;
