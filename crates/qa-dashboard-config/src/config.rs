// crates/qa-dashboard-config/src/config.rs
// ============================================================================
// Module: QA Dashboard Configuration
// Description: Configuration loading and validation for the QA dashboard.
// Purpose: Provide strict, fail-closed config parsing with hard limits.
// Dependencies: serde, toml, url
// ============================================================================

//! ## Overview
//! Configuration is loaded from a TOML file with strict size and path limits.
//! Every section has defaults, so an empty file is a valid local config; the
//! `[authority]` section is only required by commands that reach the external
//! authorization service.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::env;
use std::fs;
use std::net::SocketAddr;
use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;
use url::Url;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default configuration filename when no path is specified.
const DEFAULT_CONFIG_NAME: &str = "qa-dashboard.toml";
/// Environment variable used to override the config path.
pub const CONFIG_ENV_VAR: &str = "QA_DASHBOARD_CONFIG";
/// Maximum configuration file size in bytes.
pub(crate) const MAX_CONFIG_FILE_SIZE: usize = 1024 * 1024;
/// Maximum length of a single path component.
pub(crate) const MAX_PATH_COMPONENT_LENGTH: usize = 255;
/// Maximum total path length.
pub(crate) const MAX_TOTAL_PATH_LENGTH: usize = 4096;
/// Maximum number of host bearer tokens.
pub(crate) const MAX_AUTH_TOKENS: usize = 64;
/// Maximum length of a host bearer token.
pub(crate) const MAX_AUTH_TOKEN_LENGTH: usize = 256;
/// Maximum request body size accepted by the call boundary.
pub(crate) const MAX_BODY_BYTES_LIMIT: usize = 16 * 1024 * 1024;
/// Default role name and group keyword granting dashboard access.
pub const DEFAULT_ROLE_NAME: &str = "qa manager";
/// Minimum connect timeout for the authority client.
pub(crate) const MIN_CONNECT_TIMEOUT_MS: u64 = 100;
/// Maximum connect timeout for the authority client.
pub(crate) const MAX_CONNECT_TIMEOUT_MS: u64 = 10_000;
/// Minimum request timeout for the authority client.
pub(crate) const MIN_REQUEST_TIMEOUT_MS: u64 = 500;
/// Maximum request timeout for the authority client.
pub(crate) const MAX_REQUEST_TIMEOUT_MS: u64 = 60_000;
/// Minimum retry attempts (1 means no retry).
pub const MIN_RETRY_ATTEMPTS: u32 = 1;
/// Maximum retry attempts.
pub const MAX_RETRY_ATTEMPTS: u32 = 5;
/// Maximum base delay between retries.
pub(crate) const MAX_RETRY_BASE_DELAY_MS: u64 = 10_000;
/// Maximum length of role names and group keywords.
pub(crate) const MAX_ROLE_NAME_LENGTH: usize = 128;
/// Maximum length of a project key.
pub(crate) const MAX_PROJECT_KEY_LENGTH: usize = 64;

// ============================================================================
// SECTION: Configuration Types
// ============================================================================

/// QA dashboard configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DashboardConfig {
    /// Call-boundary server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// External authorization service configuration.
    #[serde(default)]
    pub authority: Option<AuthorityConfig>,
    /// Access gate configuration.
    #[serde(default)]
    pub access: AccessConfig,
    /// Audit sink configuration.
    #[serde(default)]
    pub audit: AuditConfig,
}

impl DashboardConfig {
    /// Loads configuration from disk using the default resolution rules.
    ///
    /// Resolution order: explicit path, then `QA_DASHBOARD_CONFIG`, then
    /// `./qa-dashboard.toml`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when loading or validation fails.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let resolved = resolve_path(path)?;
        validate_path(&resolved)?;
        let bytes = fs::read(&resolved).map_err(|err| ConfigError::Io(err.to_string()))?;
        if bytes.len() > MAX_CONFIG_FILE_SIZE {
            return Err(ConfigError::Invalid("config file exceeds size limit".to_string()));
        }
        let content = std::str::from_utf8(&bytes)
            .map_err(|_| ConfigError::Invalid("config file must be utf-8".to_string()))?;
        let config: Self =
            toml::from_str(content).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration for internal consistency.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when configuration is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.server.validate()?;
        if let Some(authority) = &self.authority {
            authority.validate()?;
        }
        self.access.validate()?;
        self.audit.validate()?;
        Ok(())
    }

    /// Returns the authority section or an error naming it as required.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when `[authority]` is absent.
    pub fn require_authority(&self) -> Result<&AuthorityConfig, ConfigError> {
        self.authority
            .as_ref()
            .ok_or_else(|| ConfigError::Invalid("authority section is required".to_string()))
    }
}

// ============================================================================
// SECTION: Server
// ============================================================================

/// Call-boundary server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Bind address for the HTTP listener.
    #[serde(default = "default_bind")]
    pub bind: String,
    /// Maximum request body size in bytes.
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
    /// Bearer tokens the host must present; empty disables the check.
    #[serde(default)]
    pub bearer_tokens: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            max_body_bytes: default_max_body_bytes(),
            bearer_tokens: Vec::new(),
        }
    }
}

impl ServerConfig {
    /// Parses the bind address.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when the bind address is malformed.
    pub fn bind_addr(&self) -> Result<SocketAddr, ConfigError> {
        self.bind
            .trim()
            .parse()
            .map_err(|_| {
                ConfigError::Invalid(format!("invalid server.bind address: {}", self.bind))
            })
    }

    /// Validates server configuration.
    fn validate(&self) -> Result<(), ConfigError> {
        self.bind_addr()?;
        if self.max_body_bytes == 0 || self.max_body_bytes > MAX_BODY_BYTES_LIMIT {
            return Err(ConfigError::Invalid("server.max_body_bytes out of range".to_string()));
        }
        if self.bearer_tokens.len() > MAX_AUTH_TOKENS {
            return Err(ConfigError::Invalid("too many server.bearer_tokens".to_string()));
        }
        for token in &self.bearer_tokens {
            if token.trim().is_empty() {
                return Err(ConfigError::Invalid("bearer token must be non-empty".to_string()));
            }
            if token.len() > MAX_AUTH_TOKEN_LENGTH {
                return Err(ConfigError::Invalid("bearer token too long".to_string()));
            }
            if token.chars().any(char::is_whitespace) {
                return Err(ConfigError::Invalid(
                    "bearer token must not contain whitespace".to_string(),
                ));
            }
        }
        Ok(())
    }
}

// ============================================================================
// SECTION: Authority
// ============================================================================

/// External authorization service configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthorityConfig {
    /// Base URL of the authorization service (e.g. the Jira site).
    pub base_url: String,
    /// Inline bearer token for outbound calls.
    #[serde(default)]
    pub auth_token: Option<String>,
    /// Environment variable holding the bearer token.
    #[serde(default)]
    pub auth_token_env: Option<String>,
    /// Allow a cleartext `http://` base URL.
    #[serde(default)]
    pub allow_http: bool,
    /// Connect timeout in milliseconds.
    #[serde(default = "default_connect_timeout_ms")]
    pub connect_timeout_ms: u64,
    /// Request timeout in milliseconds.
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,
    /// Retry policy for transient failures.
    #[serde(default)]
    pub retry: RetryConfig,
}

impl AuthorityConfig {
    /// Parses the base URL.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when the URL is malformed or uses a
    /// disallowed scheme.
    pub fn parsed_base_url(&self) -> Result<Url, ConfigError> {
        let url = Url::parse(self.base_url.trim())
            .map_err(|err| ConfigError::Invalid(format!("authority.base_url invalid: {err}")))?;
        match url.scheme() {
            "https" => Ok(url),
            "http" if self.allow_http => Ok(url),
            "http" => Err(ConfigError::Invalid(
                "authority.base_url uses http without authority.allow_http".to_string(),
            )),
            other => {
                Err(ConfigError::Invalid(format!("authority.base_url scheme not allowed: {other}")))
            }
        }
    }

    /// Resolves the outbound token from the inline value or environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when the named environment variable
    /// is unset or empty.
    pub fn resolve_auth_token(&self) -> Result<Option<String>, ConfigError> {
        if let Some(token) = &self.auth_token {
            return Ok(Some(token.clone()));
        }
        let Some(name) = &self.auth_token_env else {
            return Ok(None);
        };
        match env::var(name) {
            Ok(value) if !value.trim().is_empty() => Ok(Some(value)),
            _ => Err(ConfigError::Invalid(format!("authority.auth_token_env {name} is not set"))),
        }
    }

    /// Validates authority configuration.
    fn validate(&self) -> Result<(), ConfigError> {
        if self.base_url.trim().is_empty() {
            return Err(ConfigError::Invalid("authority.base_url is required".to_string()));
        }
        self.parsed_base_url()?;
        if self.auth_token.is_some() && self.auth_token_env.is_some() {
            return Err(ConfigError::Invalid(
                "authority.auth_token and authority.auth_token_env are mutually exclusive"
                    .to_string(),
            ));
        }
        if let Some(token) = &self.auth_token
            && token.trim().is_empty()
        {
            return Err(ConfigError::Invalid("authority.auth_token must be non-empty".to_string()));
        }
        if let Some(name) = &self.auth_token_env
            && name.trim().is_empty()
        {
            return Err(ConfigError::Invalid(
                "authority.auth_token_env must be non-empty".to_string(),
            ));
        }
        validate_timeout_range(
            "authority.connect_timeout_ms",
            self.connect_timeout_ms,
            MIN_CONNECT_TIMEOUT_MS,
            MAX_CONNECT_TIMEOUT_MS,
        )?;
        validate_timeout_range(
            "authority.request_timeout_ms",
            self.request_timeout_ms,
            MIN_REQUEST_TIMEOUT_MS,
            MAX_REQUEST_TIMEOUT_MS,
        )?;
        self.retry.validate()
    }
}

/// Retry policy for the authority client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct RetryConfig {
    /// Total attempts including the first.
    #[serde(default = "default_retry_attempts")]
    pub max_attempts: u32,
    /// Base delay; attempt `n` waits `base_delay_ms * n` before retrying.
    #[serde(default = "default_retry_base_delay_ms")]
    pub base_delay_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_retry_attempts(),
            base_delay_ms: default_retry_base_delay_ms(),
        }
    }
}

impl RetryConfig {
    /// Validates retry bounds.
    fn validate(&self) -> Result<(), ConfigError> {
        if !(MIN_RETRY_ATTEMPTS..=MAX_RETRY_ATTEMPTS).contains(&self.max_attempts) {
            return Err(ConfigError::Invalid(format!(
                "authority.retry.max_attempts must be between {MIN_RETRY_ATTEMPTS} and \
                 {MAX_RETRY_ATTEMPTS}"
            )));
        }
        if self.base_delay_ms > MAX_RETRY_BASE_DELAY_MS {
            return Err(ConfigError::Invalid(
                "authority.retry.base_delay_ms out of range".to_string(),
            ));
        }
        Ok(())
    }
}

// ============================================================================
// SECTION: Access
// ============================================================================

/// How the role identifier is resolved for a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum RoleSource {
    /// List project roles and match by name.
    #[default]
    Lookup,
    /// Use a configured (project key, role id) pair.
    Fixed,
}

/// Behavior when the authorization service cannot be reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum FailurePolicy {
    /// Treat authority failures as failures (no access).
    #[default]
    FailClosed,
    /// Grant access on authority failure and audit the failure.
    FailOpen,
}

impl FailurePolicy {
    /// Returns the access value reported when the authority fails.
    #[must_use]
    pub const fn grants_on_failure(self) -> bool {
        matches!(self, Self::FailOpen)
    }

    /// Returns the stable label for audit output.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::FailClosed => "fail_closed",
            Self::FailOpen => "fail_open",
        }
    }
}

/// Access gate configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AccessConfig {
    /// Role identifier resolution mode.
    #[serde(default)]
    pub role_source: RoleSource,
    /// Role name matched case-insensitively in lookup mode.
    #[serde(default = "default_role_name")]
    pub role_name: String,
    /// Project key used in fixed mode.
    #[serde(default)]
    pub fixed_project_key: Option<String>,
    /// Role id used in fixed mode.
    #[serde(default)]
    pub fixed_role_id: Option<u64>,
    /// Project key used when the caller context carries none.
    #[serde(default)]
    pub default_project_key: Option<String>,
    /// Group-name keyword for the group-membership check.
    #[serde(default = "default_role_name")]
    pub group_keyword: String,
    /// Failure policy for both access paths.
    #[serde(default)]
    pub failure_policy: FailurePolicy,
}

impl Default for AccessConfig {
    fn default() -> Self {
        Self {
            role_source: RoleSource::Lookup,
            role_name: default_role_name(),
            fixed_project_key: None,
            fixed_role_id: None,
            default_project_key: None,
            group_keyword: default_role_name(),
            failure_policy: FailurePolicy::FailClosed,
        }
    }
}

impl AccessConfig {
    /// Validates access configuration.
    fn validate(&self) -> Result<(), ConfigError> {
        validate_label("access.role_name", &self.role_name, MAX_ROLE_NAME_LENGTH)?;
        validate_label("access.group_keyword", &self.group_keyword, MAX_ROLE_NAME_LENGTH)?;
        if let Some(key) = &self.default_project_key {
            validate_project_key("access.default_project_key", key)?;
        }
        match self.role_source {
            RoleSource::Fixed => {
                let Some(key) = &self.fixed_project_key else {
                    return Err(ConfigError::Invalid(
                        "access.role_source=fixed requires access.fixed_project_key".to_string(),
                    ));
                };
                validate_project_key("access.fixed_project_key", key)?;
                if self.fixed_role_id.is_none() {
                    return Err(ConfigError::Invalid(
                        "access.role_source=fixed requires access.fixed_role_id".to_string(),
                    ));
                }
            }
            RoleSource::Lookup => {
                if self.fixed_project_key.is_some() || self.fixed_role_id.is_some() {
                    return Err(ConfigError::Invalid(
                        "access.fixed_* only allowed when role_source=fixed".to_string(),
                    ));
                }
            }
        }
        Ok(())
    }
}

// ============================================================================
// SECTION: Audit
// ============================================================================

/// Audit sink selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AuditSinkKind {
    /// JSON lines on stderr.
    #[default]
    Stderr,
    /// JSON lines appended to a file.
    File,
    /// Discard audit events.
    None,
}

/// Audit configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuditConfig {
    /// Sink selection.
    #[serde(default)]
    pub sink: AuditSinkKind,
    /// File path for the `file` sink.
    #[serde(default)]
    pub path: Option<String>,
}

impl AuditConfig {
    /// Validates audit configuration.
    fn validate(&self) -> Result<(), ConfigError> {
        match (self.sink, &self.path) {
            (AuditSinkKind::File, Some(path)) => validate_path_string("audit.path", path),
            (AuditSinkKind::File, None) => {
                Err(ConfigError::Invalid("audit.sink=file requires audit.path".to_string()))
            }
            (_, Some(_)) => {
                Err(ConfigError::Invalid("audit.path only allowed when sink=file".to_string()))
            }
            (_, None) => Ok(()),
        }
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Configuration errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// I/O error while reading configuration.
    #[error("config io error: {0}")]
    Io(String),
    /// Parsing error for configuration contents.
    #[error("config parse error: {0}")]
    Parse(String),
    /// Invalid configuration data.
    #[error("invalid config: {0}")]
    Invalid(String),
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Resolves the config path using CLI and environment overrides.
fn resolve_path(path: Option<&Path>) -> Result<PathBuf, ConfigError> {
    if let Some(path) = path {
        return Ok(path.to_path_buf());
    }
    if let Ok(env_path) = env::var(CONFIG_ENV_VAR) {
        if env_path.len() > MAX_TOTAL_PATH_LENGTH {
            return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
        }
        return Ok(PathBuf::from(env_path));
    }
    Ok(PathBuf::from(DEFAULT_CONFIG_NAME))
}

/// Validates the resolved path against security limits.
fn validate_path(path: &Path) -> Result<(), ConfigError> {
    let text = path.to_string_lossy();
    if text.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
    }
    for component in path.components() {
        let value = component.as_os_str().to_string_lossy();
        if value.len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(ConfigError::Invalid("config path component too long".to_string()));
        }
    }
    Ok(())
}

/// Validates a path string against length constraints.
fn validate_path_string(field: &str, value: &str) -> Result<(), ConfigError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ConfigError::Invalid(format!("{field} must be non-empty")));
    }
    if trimmed.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(ConfigError::Invalid(format!("{field} exceeds max length")));
    }
    for component in Path::new(trimmed).components() {
        if component.as_os_str().len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(ConfigError::Invalid(format!("{field} path component too long")));
        }
    }
    Ok(())
}

/// Validates a non-empty, bounded label.
fn validate_label(field: &str, value: &str, max_len: usize) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::Invalid(format!("{field} must be non-empty")));
    }
    if value.len() > max_len {
        return Err(ConfigError::Invalid(format!("{field} exceeds max length")));
    }
    Ok(())
}

/// Validates a project key: ASCII alphanumerics and underscores.
fn validate_project_key(field: &str, value: &str) -> Result<(), ConfigError> {
    validate_label(field, value, MAX_PROJECT_KEY_LENGTH)?;
    if !value.chars().all(|ch| ch.is_ascii_alphanumeric() || ch == '_') {
        return Err(ConfigError::Invalid(format!("{field} contains invalid characters")));
    }
    Ok(())
}

/// Validates a timeout value against an inclusive range.
fn validate_timeout_range(field: &str, value: u64, min: u64, max: u64) -> Result<(), ConfigError> {
    if value < min || value > max {
        return Err(ConfigError::Invalid(format!("{field} must be between {min} and {max}")));
    }
    Ok(())
}

/// Default bind address.
fn default_bind() -> String {
    "127.0.0.1:8080".to_string()
}

/// Default maximum request body size.
pub(crate) const fn default_max_body_bytes() -> usize {
    64 * 1024
}

/// Default connect timeout.
pub(crate) const fn default_connect_timeout_ms() -> u64 {
    2_000
}

/// Default request timeout.
pub(crate) const fn default_request_timeout_ms() -> u64 {
    10_000
}

/// Default retry attempts.
pub(crate) const fn default_retry_attempts() -> u32 {
    3
}

/// Default retry base delay.
pub(crate) const fn default_retry_base_delay_ms() -> u64 {
    1_000
}

/// Default role name and group keyword.
fn default_role_name() -> String {
    DEFAULT_ROLE_NAME.to_string()
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, reason = "Test-only assertions.")]

    use super::*;

    #[test]
    fn validate_path_string_rejects_blank() {
        let result = validate_path_string("audit.path", "   ");
        assert!(result.unwrap_err().to_string().contains("non-empty"));
    }

    #[test]
    fn validate_path_string_rejects_long_component() {
        let long = "a".repeat(MAX_PATH_COMPONENT_LENGTH + 1);
        let result = validate_path_string("audit.path", &format!("logs/{long}"));
        assert!(result.unwrap_err().to_string().contains("component too long"));
    }

    #[test]
    fn validate_project_key_rejects_punctuation() {
        assert!(validate_project_key("key", "QA-1").is_err());
        assert!(validate_project_key("key", "QA_1").is_ok());
    }

    #[test]
    fn resolve_path_prefers_explicit_path() {
        let resolved = resolve_path(Some(Path::new("custom.toml"))).unwrap();
        assert_eq!(resolved, PathBuf::from("custom.toml"));
    }

    #[test]
    fn failure_policy_labels() {
        assert!(!FailurePolicy::FailClosed.grants_on_failure());
        assert!(FailurePolicy::FailOpen.grants_on_failure());
        assert_eq!(FailurePolicy::FailOpen.as_str(), "fail_open");
    }
}
