// crates/qa-dashboard-config/tests/common/mod.rs
// =============================================================================
// Module: Config Test Helpers
// Description: Shared helpers for config validation tests.
// Purpose: Reduce duplication across integration tests for qa-dashboard-config.
// =============================================================================

#![allow(dead_code, reason = "Test helpers are selectively used across suites.")]

use qa_dashboard_config::AuthorityConfig;
use qa_dashboard_config::DashboardConfig;

/// Parses a TOML string into a `DashboardConfig` for tests.
pub fn config_from_toml(toml_str: &str) -> Result<DashboardConfig, toml::de::Error> {
    toml::from_str(toml_str)
}

/// Returns a minimal config with all defaults applied.
pub fn minimal_config() -> Result<DashboardConfig, toml::de::Error> {
    config_from_toml("")
}

/// Returns a minimal config with an authority section at `base_url`.
pub fn config_with_authority(base_url: &str) -> Result<DashboardConfig, toml::de::Error> {
    let authority: AuthorityConfig = toml::from_str(&format!("base_url = \"{base_url}\""))?;
    let mut config = minimal_config()?;
    config.authority = Some(authority);
    Ok(config)
}
