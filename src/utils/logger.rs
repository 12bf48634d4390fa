use crate::utils::error::{Result, SkiAreaError};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Compact,
    Json,
}

/// Filter used when neither `RUST_LOG` nor the configuration sets one.
pub fn default_directive(verbose: bool) -> &'static str {
    if verbose {
        "ski_area=debug,info"
    } else {
        "ski_area=info"
    }
}

/// `RUST_LOG` wins over `directive`.
pub fn build_filter(directive: &str) -> Result<EnvFilter> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }
    EnvFilter::try_new(directive).map_err(|e| SkiAreaError::InvalidConfigValueError {
        field: "logging.filter".to_string(),
        value: directive.to_string(),
        reason: e.to_string(),
    })
}

/// Installs the global subscriber. Fails if one is already installed.
pub fn init_logger(format: LogFormat, directive: &str) -> Result<()> {
    let filter = build_filter(directive)?;
    let registry = tracing_subscriber::registry().with(filter);

    let installed = match format {
        LogFormat::Compact => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_thread_ids(false)
                    .compact(),
            )
            .try_init(),
        LogFormat::Json => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_thread_ids(false)
                    .json(),
            )
            .try_init(),
    };

    installed.map_err(|e| SkiAreaError::ConfigError {
        message: format!("Logger already initialised: {}", e),
    })
}
