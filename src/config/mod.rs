//! Configuration loading for fly-resource.
//!
//! - Schema definitions in [`schema`]
//! - File discovery and loading in [`loader`]
//!
//! # Example
//!
//! ```
//! use fly_resource::config::{load_config, ConfigOverrides};
//! use tempfile::TempDir;
//! use std::fs;
//!
//! let temp = TempDir::new().unwrap();
//! fs::write(temp.path().join("fly-resource.yml"), "target: https://ci.example.com").unwrap();
//!
//! let mut config = load_config(None, temp.path()).unwrap();
//! config.apply_overrides(&ConfigOverrides {
//!     team: Some("ops".to_string()),
//!     ..Default::default()
//! });
//! config.validate().unwrap();
//! assert_eq!(config.team, "ops");
//! ```
//!
//! # Configuration File Locations
//!
//! With no `--config` flag, the working directory is searched for
//! `.fly-resource.yml`, then `fly-resource.yml`.

pub mod loader;
pub mod schema;

pub use loader::{find_config, load_config, load_config_file, CONFIG_FILE_NAMES};
pub use schema::{ConfigOverrides, ResourceConfig};
