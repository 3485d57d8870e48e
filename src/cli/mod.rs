//! Command-line interface for fly-resource.
//!
//! # Architecture
//!
//! - [`args`] - Argument definitions using clap derive macros
//! - [`commands`] - Command implementations

pub mod args;
pub mod commands;

pub use args::{Cli, Commands, PipelineArgs, PipelinesArgs, SetPipelineArgs};
pub use commands::{Command, CommandDispatcher};
