// crates/qa-dashboard-server/src/server.rs
// ============================================================================
// Module: Dashboard Server
// Description: HTTP transport for the operation resolver.
// Purpose: Wire configuration into a resolver and serve `POST /invoke/{op}`.
// Dependencies: qa-dashboard-{authority,config,core}, axum, tokio
// ============================================================================

//! ## Overview
//! [`DashboardServer`] builds the authority client, access gate, audit sink,
//! and data source from a validated [`DashboardConfig`]. The HTTP handler
//! checks the host bearer token, resolves the operation name, enforces the
//! body limit, decodes the envelope, and hands off to the [`Resolver`].
//! Every response that is not a success carries the standard error body.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::net::SocketAddr;
use std::path::Path as FsPath;
use std::sync::Arc;
use std::time::Instant;

use axum::Json;
use axum::Router;
use axum::body::Bytes;
use axum::extract::DefaultBodyLimit;
use axum::extract::Path;
use axum::extract::State;
use axum::extract::rejection::BytesRejection;
use axum::http::HeaderMap;
use axum::http::StatusCode;
use axum::http::header::AUTHORIZATION;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::routing::post;
use qa_dashboard_authority::AccessGate;
use qa_dashboard_authority::JiraAuthority;
use qa_dashboard_config::AuditConfig;
use qa_dashboard_config::AuditSinkKind;
use qa_dashboard_config::DashboardConfig;
use qa_dashboard_config::ServerConfig;
use qa_dashboard_core::FixtureDataSource;
use tokio::net::TcpListener;

use crate::audit::AuditSink;
use crate::audit::FileAuditSink;
use crate::audit::LifecycleAuditEvent;
use crate::audit::NoopAuditSink;
use crate::audit::OperationAuditEvent;
use crate::audit::StderrAuditSink;
use crate::auth::HostAuth;
use crate::clock::SystemClock;
use crate::context::InvocationRequest;
use crate::error::NormalizedError;
use crate::operation::Operation;
use crate::resolver::Resolver;

// ============================================================================
// SECTION: Dashboard Server
// ============================================================================

/// Dashboard server instance.
pub struct DashboardServer {
    /// Validated configuration.
    config: DashboardConfig,
    /// Operation resolver.
    resolver: Arc<Resolver>,
}

impl DashboardServer {
    /// Builds a server from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ServerError`] when configuration is invalid or a component
    /// fails to initialize.
    pub fn from_config(config: DashboardConfig) -> Result<Self, ServerError> {
        config.validate().map_err(|err| ServerError::Config(err.to_string()))?;
        let authority_config =
            config.require_authority().map_err(|err| ServerError::Config(err.to_string()))?;
        let authority = JiraAuthority::from_config(authority_config)
            .map_err(|err| ServerError::Init(err.to_string()))?;
        let gate = AccessGate::from_config(Arc::new(authority), &config.access)
            .map_err(|err| ServerError::Init(err.to_string()))?;
        let audit = build_audit_sink(&config.audit)?;
        let resolver = Resolver::new(
            Arc::new(gate),
            Arc::new(FixtureDataSource::new()),
            audit,
            Arc::new(SystemClock),
        );
        Ok(Self {
            config,
            resolver: Arc::new(resolver),
        })
    }

    /// Returns the resolver.
    #[must_use]
    pub fn resolver(&self) -> &Arc<Resolver> {
        &self.resolver
    }

    /// Binds the configured address and serves until the transport fails.
    ///
    /// # Errors
    ///
    /// Returns [`ServerError`] when binding or serving fails.
    pub async fn serve(self) -> Result<(), ServerError> {
        let addr =
            self.config.server.bind_addr().map_err(|err| ServerError::Config(err.to_string()))?;
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|_| ServerError::Transport("http bind failed".to_string()))?;
        emit_startup(&self.resolver, &self.config.server, addr);
        let app = router(Arc::clone(&self.resolver), &self.config.server);
        serve_listener(listener, app).await
    }
}

/// Builds the audit sink selected by configuration.
fn build_audit_sink(config: &AuditConfig) -> Result<Arc<dyn AuditSink>, ServerError> {
    match config.sink {
        AuditSinkKind::Stderr => Ok(Arc::new(StderrAuditSink)),
        AuditSinkKind::None => Ok(Arc::new(NoopAuditSink)),
        AuditSinkKind::File => {
            let path = config
                .path
                .as_deref()
                .ok_or_else(|| ServerError::Config("audit.path required".to_string()))?;
            let sink = FileAuditSink::new(FsPath::new(path))
                .map_err(|err| ServerError::Init(format!("audit log open failed: {err}")))?;
            Ok(Arc::new(sink))
        }
    }
}

/// Records the startup notice and the exposure warning.
fn emit_startup(resolver: &Resolver, server: &ServerConfig, addr: SocketAddr) {
    let audit = resolver.audit();
    audit.record_lifecycle(&LifecycleAuditEvent {
        event: "startup",
        timestamp: resolver.timestamp(),
        message: format!("listening on {addr}"),
    });
    if !addr.ip().is_loopback() && server.bearer_tokens.is_empty() {
        audit.record_lifecycle(&LifecycleAuditEvent {
            event: "startup",
            timestamp: resolver.timestamp(),
            message: "non-loopback bind without server.bearer_tokens; any caller can invoke \
                      operations"
                .to_string(),
        });
    }
}

// ============================================================================
// SECTION: Transport
// ============================================================================

/// Shared handler state.
struct ServerState {
    /// Operation resolver.
    resolver: Arc<Resolver>,
    /// Host bearer-token policy.
    host_auth: HostAuth,
    /// Maximum request body size.
    max_body_bytes: usize,
}

/// Builds the HTTP router for `resolver`.
#[must_use]
pub fn router(resolver: Arc<Resolver>, server: &ServerConfig) -> Router {
    let state = Arc::new(ServerState {
        resolver,
        host_auth: HostAuth::new(&server.bearer_tokens),
        max_body_bytes: server.max_body_bytes,
    });
    Router::new()
        .route("/invoke/{operation}", post(handle_invoke))
        .layer(DefaultBodyLimit::max(server.max_body_bytes))
        .with_state(state)
}

/// Serves `app` on an already bound listener.
///
/// # Errors
///
/// Returns [`ServerError::Transport`] when the server fails.
pub async fn serve_listener(listener: TcpListener, app: Router) -> Result<(), ServerError> {
    axum::serve(listener, app)
        .await
        .map_err(|_| ServerError::Transport("http server failed".to_string()))
}

/// Handles `POST /invoke/{operation}`.
async fn handle_invoke(
    State(state): State<Arc<ServerState>>,
    Path(name): Path<String>,
    headers: HeaderMap,
    body: Result<Bytes, BytesRejection>,
) -> Response {
    let started = Instant::now();
    let header = headers.get(AUTHORIZATION).and_then(|value| value.to_str().ok());
    let fingerprint = match state.host_auth.authorize(header) {
        Ok(fingerprint) => fingerprint,
        Err(err) => {
            let error = NormalizedError::boundary(StatusCode::UNAUTHORIZED, err.to_string());
            return boundary_failure(&state, &name, None, &error, started);
        }
    };
    let Some(operation) = Operation::parse(&name) else {
        let error = NormalizedError::boundary(
            StatusCode::NOT_FOUND,
            format!("Unknown operation: {name}"),
        );
        return boundary_failure(&state, &name, fingerprint, &error, started);
    };
    let request = match decode_request(&state, body) {
        Ok(request) => request,
        Err(error) => return boundary_failure(&state, &name, fingerprint, &error, started),
    };
    match state.resolver.invoke(operation, &request, fingerprint).await {
        Ok(value) => (StatusCode::OK, Json(value)).into_response(),
        Err(error) => error_response(&state.resolver, &error),
    }
}

/// Enforces the body limit and decodes the invocation envelope.
fn decode_request(
    state: &ServerState,
    body: Result<Bytes, BytesRejection>,
) -> Result<InvocationRequest, NormalizedError> {
    let bytes = body.map_err(|rejection| {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            too_large()
        } else {
            invalid_request("unreadable body")
        }
    })?;
    if bytes.len() > state.max_body_bytes {
        return Err(too_large());
    }
    let request: InvocationRequest =
        serde_json::from_slice(&bytes).map_err(|_| invalid_request("malformed JSON envelope"))?;
    if request.context.account_id.as_str().trim().is_empty() {
        return Err(invalid_request("accountId is required"));
    }
    Ok(request)
}

/// Error for a body over the configured limit.
fn too_large() -> NormalizedError {
    NormalizedError::boundary(StatusCode::PAYLOAD_TOO_LARGE, "Invalid request: body too large")
}

/// Error for an undecodable request.
fn invalid_request(detail: &str) -> NormalizedError {
    NormalizedError::boundary(StatusCode::BAD_REQUEST, format!("Invalid request: {detail}"))
}

/// Audits and renders a failure that never reached the resolver.
fn boundary_failure(
    state: &ServerState,
    name: &str,
    fingerprint: Option<String>,
    error: &NormalizedError,
    started: Instant,
) -> Response {
    let resolver = &state.resolver;
    resolver.audit().record_operation(&OperationAuditEvent {
        event: "operation_invoked",
        timestamp: resolver.timestamp(),
        operation: name.to_string(),
        account_id: None,
        outcome: "error",
        error_code: Some(error.kind.code()),
        status: error.status.as_u16(),
        duration_ms: started.elapsed().as_millis(),
        token_fingerprint: fingerprint,
    });
    error_response(resolver, error)
}

/// Renders the standard error body.
fn error_response(resolver: &Resolver, error: &NormalizedError) -> Response {
    (error.status, Json(error.body(resolver.timestamp()))).into_response()
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Dashboard server errors.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// Configuration errors.
    #[error("config error: {0}")]
    Config(String),
    /// Initialization errors.
    #[error("init error: {0}")]
    Init(String),
    /// Transport errors.
    #[error("transport error: {0}")]
    Transport(String),
}

// ============================================================================
// SECTION: Tests
// ============================================================================
