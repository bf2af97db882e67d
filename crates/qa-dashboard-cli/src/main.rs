// crates/qa-dashboard-cli/src/main.rs
// ============================================================================
// Module: QA Dashboard CLI Entry Point
// Description: Command dispatcher for the QA dashboard server and reports.
// Purpose: Run the call boundary and drive the view layer from a terminal.
// Dependencies: clap, qa-dashboard-config, qa-dashboard-server, qa-dashboard-view, tokio.
// ============================================================================

//! ## Overview
//! `qa-dashboard serve` runs the HTTP call boundary from a TOML config.
//! `overview` and `agents` act as a terminal host for the view layer: they
//! mount a dashboard session over the HTTP bridge, apply the requested
//! search, sort, filter, and page, and print the result as plain text.

// ============================================================================
// SECTION: Modules
// ============================================================================

mod report;

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Args;
use clap::Parser;
use clap::Subcommand;
use qa_dashboard_config::DashboardConfig;
use qa_dashboard_core::AccountId;
use qa_dashboard_core::AgentId;
use qa_dashboard_core::PerformanceBucket;
use qa_dashboard_core::ProjectKey;
use qa_dashboard_server::DashboardServer;
use qa_dashboard_view::Dashboard;
use qa_dashboard_view::HttpBridge;
use qa_dashboard_view::Phase;
use qa_dashboard_view::SortKey;
use qa_dashboard_view::Tab;
use qa_dashboard_view::ViewError;
use thiserror::Error;

use crate::report::render_agents;
use crate::report::render_overview;

// ============================================================================
// SECTION: CLI Types
// ============================================================================

/// Top-level CLI arguments.
#[derive(Parser, Debug)]
#[command(name = "qa-dashboard", version, disable_help_subcommand = true)]
struct Cli {
    /// Selected subcommand.
    #[command(subcommand)]
    command: Commands,
}

/// Supported subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP call boundary.
    Serve(ServeCommand),
    /// Configuration utilities.
    Config {
        /// Selected config subcommand.
        #[command(subcommand)]
        command: ConfigCommand,
    },
    /// Print the KPI overview.
    Overview(OverviewCommand),
    /// Print one page of the agent roster.
    Agents(AgentsCommand),
}

/// Configuration for the `serve` command.
#[derive(Args, Debug)]
struct ServeCommand {
    /// Optional config file path (defaults to qa-dashboard.toml or env override).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

/// Config subcommands.
#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Load and validate a config file.
    Validate(ConfigValidateCommand),
}

/// Arguments for `config validate`.
#[derive(Args, Debug)]
struct ConfigValidateCommand {
    /// Optional config file path (defaults to qa-dashboard.toml or env override).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

/// Connection arguments shared by the report commands.
#[derive(Args, Debug)]
struct BridgeArgs {
    /// Base URL of the call boundary, for example `http://127.0.0.1:8080`.
    #[arg(long, value_name = "URL")]
    endpoint: String,
    /// Caller account id sent in the invocation context.
    #[arg(long, value_name = "ID")]
    account_id: String,
    /// Project key sent in the invocation context.
    #[arg(long, value_name = "KEY")]
    project: Option<String>,
    /// Host bearer token.
    #[arg(long, value_name = "TOKEN")]
    token: Option<String>,
}

/// Arguments for `overview`.
#[derive(Args, Debug)]
struct OverviewCommand {
    /// Connection settings.
    #[command(flatten)]
    bridge: BridgeArgs,
    /// Expand the quality pillar breakdown.
    #[arg(long)]
    pillars: bool,
}

/// Arguments for `agents`.
#[derive(Args, Debug)]
struct AgentsCommand {
    /// Connection settings.
    #[command(flatten)]
    bridge: BridgeArgs,
    /// Case-insensitive name search.
    #[arg(long, value_name = "TERM", default_value = "")]
    search: String,
    /// Sort key: name, overallScore, errorRate, or fcr.
    #[arg(long, value_name = "KEY", default_value = "name", value_parser = parse_sort_key)]
    sort: SortKey,
    /// Performance filter: all, high, medium, or low.
    #[arg(long, value_name = "LEVEL", default_value = "all", value_parser = parse_bucket)]
    filter: PerformanceBucket,
    /// One-based page number (clamped to the available pages).
    #[arg(long, value_name = "N", default_value_t = 1)]
    page: usize,
    /// Agent ids to show with their full metric breakdown.
    #[arg(long = "expand", value_name = "ID")]
    expand: Vec<u64>,
}

/// Parses a sort key from its wire label.
fn parse_sort_key(label: &str) -> Result<SortKey, String> {
    SortKey::parse(label).ok_or_else(|| {
        let options: Vec<_> = SortKey::ALL.iter().map(|key| key.as_str()).collect();
        format!("expected one of: {}", options.join(", "))
    })
}

/// Parses a performance filter from its wire label.
fn parse_bucket(label: &str) -> Result<PerformanceBucket, String> {
    PerformanceBucket::parse(label).ok_or_else(|| "expected one of: all, high, medium, low".into())
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// CLI error wrapper.
#[derive(Debug, Error)]
#[error("{message}")]
struct CliError {
    /// Human-readable error message.
    message: String,
}

impl CliError {
    /// Constructs a new [`CliError`].
    const fn new(message: String) -> Self {
        Self {
            message,
        }
    }
}

/// CLI result alias for fallible operations.
type CliResult<T> = Result<T, CliError>;

// ============================================================================
// SECTION: Entry Point
// ============================================================================

/// CLI entry point returning an exit code.
#[tokio::main(flavor = "multi_thread")]
async fn main() -> ExitCode {
    match run().await {
        Ok(code) => code,
        Err(err) => emit_error(&err.to_string()),
    }
}

/// Executes the CLI command dispatcher.
async fn run() -> CliResult<ExitCode> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Serve(command) => command_serve(command).await,
        Commands::Config {
            command,
        } => command_config(&command),
        Commands::Overview(command) => command_overview(command).await,
        Commands::Agents(command) => command_agents(command).await,
    }
}

// ============================================================================
// SECTION: Serve Command
// ============================================================================

/// Executes the `serve` command.
async fn command_serve(command: ServeCommand) -> CliResult<ExitCode> {
    let config = DashboardConfig::load(command.config.as_deref())
        .map_err(|err| CliError::new(format!("failed to load config: {err}")))?;
    let server = DashboardServer::from_config(config)
        .map_err(|err| CliError::new(format!("failed to initialize server: {err}")))?;
    server.serve().await.map_err(|err| CliError::new(format!("server failed: {err}")))?;
    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// SECTION: Config Commands
// ============================================================================

/// Dispatches config subcommands.
fn command_config(command: &ConfigCommand) -> CliResult<ExitCode> {
    match command {
        ConfigCommand::Validate(command) => command_config_validate(command),
    }
}

/// Executes the config validation command.
fn command_config_validate(command: &ConfigValidateCommand) -> CliResult<ExitCode> {
    let _config = DashboardConfig::load(command.config.as_deref())
        .map_err(|err| CliError::new(format!("failed to load config: {err}")))?;
    write_stdout_line("config ok")?;
    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// SECTION: Report Commands
// ============================================================================

/// Executes the `overview` command.
async fn command_overview(command: OverviewCommand) -> CliResult<ExitCode> {
    let mut dashboard = mount_dashboard(&command.bridge).await?;
    if command.pillars {
        dashboard.state_mut().toggle_pillars();
    }
    write_stdout_line(&render_overview(dashboard.state()))?;
    Ok(ExitCode::SUCCESS)
}

/// Executes the `agents` command.
async fn command_agents(command: AgentsCommand) -> CliResult<ExitCode> {
    let mut dashboard = mount_dashboard(&command.bridge).await?;
    dashboard.open_tab(Tab::Agents).await;
    match dashboard.state().agents_error() {
        Some(ViewError::AccessDenied(message)) => {
            return Err(CliError::new(format!("access denied: {message}")));
        }
        Some(ViewError::Failed(message)) => {
            return Err(CliError::new(format!("failed to load agents: {message}")));
        }
        None => {}
    }
    let state = dashboard.state_mut();
    state.set_search(command.search);
    state.set_sort(command.sort);
    state.set_filter(command.filter);
    state.set_page(command.page);
    for id in command.expand {
        state.toggle_agent(AgentId::new(id));
    }
    write_stdout_line(&render_agents(dashboard.state()))?;
    Ok(ExitCode::SUCCESS)
}

/// Builds the bridge, mounts a session, and requires the ready phase.
async fn mount_dashboard(args: &BridgeArgs) -> CliResult<Dashboard<HttpBridge>> {
    let project = args.project.as_deref().map(ProjectKey::new);
    let mut bridge = HttpBridge::new(&args.endpoint, AccountId::new(&args.account_id), project)
        .map_err(|err| CliError::new(err.to_string()))?;
    if let Some(token) = &args.token {
        bridge = bridge.with_bearer_token(token.clone());
    }
    let mut dashboard = Dashboard::new(bridge);
    dashboard.mount().await;
    match dashboard.state().phase() {
        Phase::Ready => Ok(dashboard),
        Phase::AccessDenied(message) => Err(CliError::new(format!("access denied: {message}"))),
        Phase::Error(message) => Err(CliError::new(format!("failed to load dashboard: {message}"))),
        Phase::Loading => Err(CliError::new("dashboard did not load".to_string())),
    }
}

// ============================================================================
// SECTION: Output Helpers
// ============================================================================

/// Writes a line to stdout.
fn write_stdout_line(message: &str) -> CliResult<()> {
    let mut stdout = std::io::stdout();
    writeln!(&mut stdout, "{message}")
        .map_err(|err| CliError::new(format!("failed to write stdout: {err}")))
}

/// Writes a line to stderr.
fn write_stderr_line(message: &str) -> std::io::Result<()> {
    let mut stderr = std::io::stderr();
    writeln!(&mut stderr, "{message}")
}

/// Emits an error message and returns a failure exit code.
fn emit_error(message: &str) -> ExitCode {
    let _ = write_stderr_line(message);
    ExitCode::FAILURE
}
