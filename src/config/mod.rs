pub mod toml_config;

pub use toml_config::SkiAreaConfig;

use crate::utils::error::Result;
use crate::utils::logger;

/// Installs the tracing subscriber selected by the `[logging]` section.
pub fn init_logging(config: &SkiAreaConfig) -> Result<()> {
    logger::init_logger(config.log_format(), config.log_directive())
}
