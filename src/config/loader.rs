//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the scheme
//! constants from a YAML file and checking them for consistency.

use chrono::Datelike;
use rust_decimal::Decimal;
use std::fs;
use std::path::Path;
use tracing::debug;

use crate::error::{EngineError, EngineResult};

use super::types::{SchemeConfig, SchemeConstants, SchemeMetadata};

/// Name of the scheme file inside a configuration directory.
pub const SCHEME_FILE_NAME: &str = "scheme.yaml";

/// Loads and provides access to the scheme configuration.
///
/// # Directory Structure
///
/// ```text
/// config/interessement_2024/
/// └── scheme.yaml   # Reference year, workforce, pool, net factor
/// ```
///
/// # Example
///
/// ```no_run
/// use interessement_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/interessement_2024").unwrap();
/// println!("Loaded scheme: {}", loader.scheme().name);
/// println!("Bonus pool: {}", loader.constants().bonus_pool);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: SchemeConfig,
    constants: SchemeConstants,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// Returns an error if `scheme.yaml` is missing, is not valid YAML, or
    /// holds inconsistent values (see [`ConfigLoader::from_yaml_str`]).
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let scheme_path = path.as_ref().join(SCHEME_FILE_NAME);
        let path_str = scheme_path.display().to_string();

        let content =
            fs::read_to_string(&scheme_path).map_err(|_| EngineError::ConfigNotFound {
                path: path_str.clone(),
            })?;

        let loader = Self::parse(&content, &path_str)?;
        debug!(
            path = %path_str,
            scheme = %loader.config.scheme.code,
            "Scheme configuration loaded"
        );
        Ok(loader)
    }

    /// Parses a scheme from YAML text.
    ///
    /// The values are checked for consistency:
    /// - the reference year starts and ends in the same calendar year
    /// - the late-entry cutoff falls inside the reference year
    /// - counts and amounts are strictly positive
    /// - the presence and salary rates add up to one
    pub fn from_yaml_str(content: &str) -> EngineResult<Self> {
        Self::parse(content, "<inline>")
    }

    fn parse(content: &str, path: &str) -> EngineResult<Self> {
        let config: SchemeConfig =
            serde_yaml::from_str(content).map_err(|e| EngineError::ConfigParseError {
                path: path.to_string(),
                message: e.to_string(),
            })?;

        let constants = SchemeConstants::from(&config);
        Self::validate(&constants)?;

        Ok(Self { config, constants })
    }

    fn validate(constants: &SchemeConstants) -> EngineResult<()> {
        if constants.year_end < constants.year_start {
            return Err(invalid("reference_year.end", "must not be before the start"));
        }
        if constants.year_end.year() != constants.year_start.year() {
            return Err(invalid(
                "reference_year.end",
                "must be in the same calendar year as the start",
            ));
        }
        if constants.late_entry_cutoff < constants.year_start
            || constants.late_entry_cutoff > constants.year_end
        {
            return Err(invalid(
                "reference_year.late_entry_cutoff",
                "must fall inside the reference year",
            ));
        }
        if constants.total_working_days == 0 {
            return Err(invalid(
                "reference_year.total_working_days",
                "must be greater than zero",
            ));
        }
        if constants.beneficiary_count == 0 {
            return Err(invalid(
                "workforce.beneficiary_count",
                "must be greater than zero",
            ));
        }

        let positive_amounts = [
            ("workforce.total_payroll_mass", constants.total_payroll_mass),
            ("pool.bonus_pool", constants.bonus_pool),
            ("net_factor", constants.net_factor),
        ];
        for (field, value) in positive_amounts {
            if value <= Decimal::ZERO {
                return Err(invalid(field, "must be greater than zero"));
            }
        }

        let negative_rate = constants.presence_pool_rate < Decimal::ZERO
            || constants.salary_pool_rate < Decimal::ZERO;
        if negative_rate {
            return Err(invalid("pool", "rates must not be negative"));
        }
        if constants.presence_pool_rate + constants.salary_pool_rate != Decimal::ONE {
            return Err(invalid(
                "pool",
                format!(
                    "presence_pool_rate + salary_pool_rate must equal 1, got {}",
                    constants.presence_pool_rate + constants.salary_pool_rate
                ),
            ));
        }

        Ok(())
    }

    /// Returns the scheme metadata.
    pub fn scheme(&self) -> &SchemeMetadata {
        &self.config.scheme
    }

    /// Returns the constants used by the estimator.
    pub fn constants(&self) -> &SchemeConstants {
        &self.constants
    }

    /// Consumes the loader, keeping only the constants.
    pub fn into_constants(self) -> SchemeConstants {
        self.constants
    }
}

fn invalid(field: &str, message: impl Into<String>) -> EngineError {
    EngineError::InvalidConfig {
        field: field.to_string(),
        message: message.into(),
    }
}
