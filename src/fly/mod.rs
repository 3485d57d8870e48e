//! Driving the fly CLI.
//!
//! - [`args`] - Flag sequences for each fly subcommand
//! - [`runner`] - Process execution with separate stdout/stderr capture
//! - [`command`] - The [`FlyCommand`] interface and [`Fly`] implementation
//! - [`fake`] - Recording [`FakeFlyCommand`] for tests

pub mod args;
pub mod command;
pub mod fake;
pub mod runner;

pub use args::LoginParams;
pub use command::{Fly, FlyCommand};
pub use fake::{FakeFlyCommand, SetPipelineCall};
pub use runner::{run, RunOutput};
