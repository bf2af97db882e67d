//! Config file loading tests for qa-dashboard-config.
// crates/qa-dashboard-config/tests/config_loading.rs
// =============================================================================
// Module: Config Loading Tests
// Description: Load configs from temporary files.
// Purpose: Ensure size, encoding, and parse failures map to ConfigError.
// =============================================================================

use std::fs;

use qa_dashboard_config::ConfigError;
use qa_dashboard_config::DashboardConfig;
use qa_dashboard_config::RoleSource;

type TestResult = Result<(), String>;

const FULL_CONFIG: &str = r#"
[server]
bind = "127.0.0.1:9090"
bearer_tokens = ["host-token"]

[authority]
base_url = "https://example.atlassian.net"
auth_token = "api-token"

[authority.retry]
max_attempts = 2
base_delay_ms = 50

[access]
role_source = "fixed"
fixed_project_key = "QA"
fixed_role_id = 10002

[audit]
sink = "none"
"#;

#[test]
fn load_reads_full_config() -> TestResult {
    let dir = tempfile::tempdir().map_err(|err| err.to_string())?;
    let path = dir.path().join("qa-dashboard.toml");
    fs::write(&path, FULL_CONFIG).map_err(|err| err.to_string())?;
    let config = DashboardConfig::load(Some(&path)).map_err(|err| err.to_string())?;
    if config.access.role_source != RoleSource::Fixed {
        return Err("expected fixed role source".to_string());
    }
    let authority = config.require_authority().map_err(|err| err.to_string())?;
    if authority.retry.max_attempts != 2 {
        return Err("expected two retry attempts".to_string());
    }
    if config.server.bind_addr().map_err(|err| err.to_string())?.port() != 9090 {
        return Err("expected port 9090".to_string());
    }
    Ok(())
}

#[test]
fn load_reports_missing_file_as_io() -> TestResult {
    let dir = tempfile::tempdir().map_err(|err| err.to_string())?;
    let path = dir.path().join("absent.toml");
    match DashboardConfig::load(Some(&path)) {
        Err(ConfigError::Io(_)) => Ok(()),
        other => Err(format!("expected io error, got {other:?}")),
    }
}

#[test]
fn load_reports_bad_toml_as_parse() -> TestResult {
    let dir = tempfile::tempdir().map_err(|err| err.to_string())?;
    let path = dir.path().join("bad.toml");
    fs::write(&path, "[server\nbind = ").map_err(|err| err.to_string())?;
    match DashboardConfig::load(Some(&path)) {
        Err(ConfigError::Parse(_)) => Ok(()),
        other => Err(format!("expected parse error, got {other:?}")),
    }
}

#[test]
fn load_rejects_non_utf8() -> TestResult {
    let dir = tempfile::tempdir().map_err(|err| err.to_string())?;
    let path = dir.path().join("binary.toml");
    fs::write(&path, [0xff, 0xfe, 0x00]).map_err(|err| err.to_string())?;
    match DashboardConfig::load(Some(&path)) {
        Err(ConfigError::Invalid(message)) if message.contains("utf-8") => Ok(()),
        other => Err(format!("expected utf-8 error, got {other:?}")),
    }
}

#[test]
fn load_rejects_oversized_file() -> TestResult {
    let dir = tempfile::tempdir().map_err(|err| err.to_string())?;
    let path = dir.path().join("huge.toml");
    let padding = format!("# {}\n", "x".repeat(1024 * 1024));
    fs::write(&path, padding).map_err(|err| err.to_string())?;
    match DashboardConfig::load(Some(&path)) {
        Err(ConfigError::Invalid(message)) if message.contains("size limit") => Ok(()),
        other => Err(format!("expected size error, got {other:?}")),
    }
}

#[test]
fn load_validates_after_parse() -> TestResult {
    let dir = tempfile::tempdir().map_err(|err| err.to_string())?;
    let path = dir.path().join("invalid.toml");
    fs::write(&path, "[access]\nrole_source = \"fixed\"\n").map_err(|err| err.to_string())?;
    match DashboardConfig::load(Some(&path)) {
        Err(ConfigError::Invalid(message)) if message.contains("fixed_project_key") => Ok(()),
        other => Err(format!("expected validation error, got {other:?}")),
    }
}
