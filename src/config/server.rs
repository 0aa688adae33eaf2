//! Server settings read from the environment.

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

use crate::error::{EngineError, EngineResult};

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0";
const DEFAULT_SCHEME_CONFIG_DIR: &str = "./config/interessement_2024";
const DEFAULT_LOG_FILTER: &str = "info";

/// Settings for the HTTP server binary.
///
/// Every value has a default, so the server starts with an empty environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerSettings {
    /// Address the listener binds to (`BIND_ADDRESS`).
    pub bind_address: String,
    /// TCP port (`PORT`).
    pub port: u16,
    /// Directory holding `scheme.yaml` (`SCHEME_CONFIG_DIR`).
    pub scheme_config_dir: PathBuf,
    /// Default tracing filter when `RUST_LOG` is unset.
    pub log_filter: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind_address: DEFAULT_BIND_ADDRESS.to_string(),
            port: DEFAULT_PORT,
            scheme_config_dir: PathBuf::from(DEFAULT_SCHEME_CONFIG_DIR),
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl ServerSettings {
    /// Reads settings from the process environment, loading `.env` first if
    /// one is present.
    pub fn from_env() -> EngineResult<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds settings from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> EngineResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let port = match lookup("PORT") {
            Some(raw) => raw.trim().parse::<u16>().map_err(|_| EngineError::InvalidConfig {
                field: "PORT".to_string(),
                message: format!("'{}' is not a valid port number", raw),
            })?,
            None => defaults.port,
        };

        Ok(Self {
            bind_address: lookup("BIND_ADDRESS").unwrap_or(defaults.bind_address),
            port,
            scheme_config_dir: lookup("SCHEME_CONFIG_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.scheme_config_dir),
            log_filter: lookup("RUST_LOG").unwrap_or(defaults.log_filter),
        })
    }

    /// The socket address to listen on.
    pub fn socket_addr(&self) -> EngineResult<SocketAddr> {
        format!("{}:{}", self.bind_address, self.port)
            .parse()
            .map_err(|_| EngineError::InvalidConfig {
                field: "BIND_ADDRESS".to_string(),
                message: format!("'{}' is not a valid IP address", self.bind_address),
            })
    }
}
