//! Application state for the intéressement API.

use std::sync::Arc;

use crate::config::{ConfigLoader, SchemeConstants};

/// Shared application state.
///
/// Holds the scheme constants behind an `Arc`; every request reads them,
/// none writes them.
#[derive(Clone)]
pub struct AppState {
    constants: Arc<SchemeConstants>,
    scheme_name: Arc<str>,
}

impl AppState {
    /// Creates a new application state from a loaded configuration.
    pub fn new(config: ConfigLoader) -> Self {
        let scheme_name: Arc<str> = Arc::from(config.scheme().name.as_str());
        Self {
            constants: Arc::new(config.into_constants()),
            scheme_name,
        }
    }

    /// Creates a state from bare constants.
    pub fn from_constants(constants: SchemeConstants, scheme_name: &str) -> Self {
        Self {
            constants: Arc::new(constants),
            scheme_name: Arc::from(scheme_name),
        }
    }

    /// Returns the scheme constants.
    pub fn constants(&self) -> &SchemeConstants {
        &self.constants
    }

    /// Returns the human-readable scheme name, shown in page titles.
    pub fn scheme_name(&self) -> &str {
        &self.scheme_name
    }
}
