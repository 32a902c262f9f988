use crate::config::TelemetryConfig;
use tracing_subscriber::filter::ParseError;
use tracing_subscriber::EnvFilter;

/// Environment variable that overrides the configured log filter.
pub const LOG_FILTER_ENV: &str = EnvFilter::DEFAULT_ENV;

#[derive(Debug, thiserror::Error)]
pub enum TelemetryError {
    #[error("log filter `{directives}` does not parse")]
    Filter {
        directives: String,
        #[source]
        source: ParseError,
    },
    #[error("a global log subscriber is already installed")]
    AlreadyInstalled(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Install the global subscriber. Log lines go to stderr so they never interleave
/// with the operator console on stdout.
pub fn init(config: &TelemetryConfig) -> Result<(), TelemetryError> {
    let override_directives = std::env::var(LOG_FILTER_ENV).ok();
    let filter = log_filter(override_directives.as_deref(), &config.log_level)?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .with_ansi(false)
        .try_init()
        .map_err(TelemetryError::AlreadyInstalled)
}

/// A parseable override wins; otherwise the configured level must parse.
fn log_filter(
    override_directives: Option<&str>,
    configured: &str,
) -> Result<EnvFilter, TelemetryError> {
    if let Some(filter) = override_directives.and_then(|raw| EnvFilter::try_new(raw).ok()) {
        return Ok(filter);
    }
    EnvFilter::try_new(configured).map_err(|source| TelemetryError::Filter {
        directives: configured.to_string(),
        source,
    })
}
