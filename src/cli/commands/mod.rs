//! CLI command implementations.
//!
//! Each command implements the [`Command`] trait and writes its output to
//! the writer it is given. Commands are routed by [`CommandDispatcher`],
//! which builds the fly wrapper and API client from the resolved config.

pub mod check_version;
pub mod dispatcher;
pub mod pipelines;
pub mod team_pipelines;

pub use dispatcher::{Command, CommandDispatcher};
