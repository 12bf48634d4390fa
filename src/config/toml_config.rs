use crate::adapters::storage::LocalStorage;
use crate::core::importer::Importer;
use crate::core::ski_area::{SkiArea, DEFAULT_MAX_SLOTS_PER_SEAT};
use crate::utils::error::{Result, SkiAreaError};
use crate::utils::logger::{self, LogFormat};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkiAreaConfig {
    pub area: AreaConfig,
    pub import: Option<ImportConfig>,
    pub parking: Option<ParkingConfig>,
    pub logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AreaConfig {
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportConfig {
    pub path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParkingConfig {
    pub max_slots_per_seat: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub verbose: Option<bool>,
    pub json: Option<bool>,
    pub filter: Option<String>,
}

impl SkiAreaConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| SkiAreaError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value; unset variables stay as written.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| SkiAreaError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn max_slots_per_seat(&self) -> i64 {
        self.parking
            .as_ref()
            .and_then(|p| p.max_slots_per_seat)
            .unwrap_or(DEFAULT_MAX_SLOTS_PER_SEAT)
    }

    pub fn import_path(&self) -> Option<&str> {
        self.import.as_ref().map(|i| i.path.as_str())
    }

    pub fn verbose_logging(&self) -> bool {
        self.logging.as_ref().and_then(|l| l.verbose).unwrap_or(false)
    }

    pub fn json_logging(&self) -> bool {
        self.logging.as_ref().and_then(|l| l.json).unwrap_or(false)
    }

    pub fn log_format(&self) -> LogFormat {
        if self.json_logging() {
            LogFormat::Json
        } else {
            LogFormat::Compact
        }
    }

    /// Explicit `[logging] filter`, else the verbosity default.
    pub fn log_directive(&self) -> &str {
        self.logging
            .as_ref()
            .and_then(|l| l.filter.as_deref())
            .unwrap_or_else(|| logger::default_directive(self.verbose_logging()))
    }

    /// Creates the configured ski area and runs the import, if one is set.
    pub fn build_area(&self) -> Result<SkiArea> {
        self.validate()?;

        let mut area =
            SkiArea::new(self.area.name.clone()).with_parking_ratio(self.max_slots_per_seat());
        if let Some(path) = self.import_path() {
            Importer::new(LocalStorage::default()).import(&mut area, path)?;
        }

        tracing::info!(
            "Ski area {} ready: {} lift types, {} lifts",
            area.name(),
            area.lift_type_codes().len(),
            area.lift_names().len()
        );
        Ok(area)
    }
}

impl Validate for SkiAreaConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_non_empty_string("area.name", &self.area.name)?;

        if let Some(path) = self.import_path() {
            validation::validate_path("import.path", path)?;
        }

        validation::validate_positive_number(
            "parking.max_slots_per_seat",
            self.max_slots_per_seat(),
            1,
        )?;

        if let Some(filter) = self.logging.as_ref().and_then(|l| l.filter.as_deref()) {
            validation::validate_non_empty_string("logging.filter", filter)?;
        }

        Ok(())
    }
}
