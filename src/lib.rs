//! fly-resource - Drive Concourse pipelines through the fly CLI.
//!
//! Before logging in, the fly binary's version is reconciled with the
//! target's: an incompatible binary is replaced with one downloaded from
//! the target itself.
//!
//! # Modules
//!
//! - [`api`] - Direct access to the target's pipelines API
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Configuration loading and validation
//! - [`error`] - Error types and result aliases
//! - [`fake`] - Recording test doubles
//! - [`fly`] - fly argument building, process execution and the [`fly::FlyCommand`] interface
//! - [`http`] - HTTP fetching shared by version checks and the API client
//! - [`secrets`] - Masking of secrets in logged arguments
//! - [`version`] - Version comparison, platform selection and binary replacement
//!
//! # Example
//!
//! ```
//! use fly_resource::fly::{FakeFlyCommand, FlyCommand};
//!
//! let fly = FakeFlyCommand::new();
//! fly.pipelines.returns(vec!["web".to_string()]);
//!
//! assert_eq!(fly.pipelines().unwrap(), vec!["web"]);
//! assert_eq!(fly.pipelines.call_count(), 1);
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod fake;
pub mod fly;
pub mod http;
pub mod secrets;
pub mod version;

pub use error::{FlyError, Result};
