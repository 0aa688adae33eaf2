//! Scheme configuration for the intéressement engine.
//!
//! The constants of a reference year (working days, headcount, payroll mass,
//! bonus pool, cutoff, net factor) are either built in
//! ([`SchemeConstants::reference_2024`]) or loaded from a YAML file. They are
//! loaded once at start-up and never mutated.
//!
//! # Example
//!
//! ```no_run
//! use interessement_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/interessement_2024").unwrap();
//! println!("Loaded scheme: {}", config.scheme().name);
//! ```

mod loader;
mod server;
mod types;

pub use loader::{ConfigLoader, SCHEME_FILE_NAME};
pub use server::ServerSettings;
pub use types::{
    PoolConfig, ReferenceYearConfig, SchemeConfig, SchemeConstants, SchemeMetadata,
    WorkforceConfig,
};
