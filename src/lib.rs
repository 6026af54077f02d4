pub mod client;
pub mod config;
pub mod intake;
pub mod models;
pub mod report;
pub mod session;
pub mod workflow;

pub use client::{AnalysisClient, ClientError, HttpAnalysisClient};
pub use config::AnalysisConfig;
pub use models::{AnalysisRequest, AnalysisResult, DoseInput, Issue, RiskLevel, Severity};
pub use report::{build_report, ReportView};
pub use workflow::{AnalysisWorkflow, View, WorkflowError, WorkflowState};

use tracing_subscriber::EnvFilter;

/// Install the global tracing subscriber.
///
/// `RUST_LOG` wins when set; otherwise `config::default_log_filter()` is
/// used. Safe to call more than once: later calls are no-ops.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .try_init();
}

/// Resolve configuration from the environment and build a workflow backed
/// by the HTTP client. Call once at startup.
pub fn connect_from_env() -> Result<AnalysisWorkflow<HttpAnalysisClient>, StartupError> {
    init_tracing();
    tracing::info!("{} starting v{}", config::APP_NAME, config::APP_VERSION);

    let config = AnalysisConfig::from_env()?;
    tracing::info!(base_url = %config.base_url(), "Analysis service configured");
    let client = HttpAnalysisClient::new(config)?;
    Ok(AnalysisWorkflow::new(client))
}

#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Client setup error: {0}")]
    Client(#[from] ClientError),
}
