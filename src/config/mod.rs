//! Configuration loading and management for the statutory deduction engine.
//!
//! This module loads per-country statutory configuration from YAML files:
//! tax settings, deduction types with their rate band schedules, and relief
//! rules/schemes. The loaded data backs an in-memory reference repository.
//!
//! # Example
//!
//! ```no_run
//! use statutory_engine::config::ConfigLoader;
//!
//! let loader = ConfigLoader::load("./config/countries").unwrap();
//! println!("Loaded countries: {:?}", loader.countries());
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{BandEntry, CountryConfigFile, ReliefEntry, SettingsEntry, StatutoryTypeEntry};
