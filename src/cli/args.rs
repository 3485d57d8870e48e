//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use crate::config::ConfigOverrides;
use clap::{Parser, Subcommand};
use serde_json::Value;
use std::path::PathBuf;

/// fly-resource - Manage Concourse pipelines through fly.
#[derive(Debug, Parser)]
#[command(name = "fly-resource")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to config file (defaults to ./.fly-resource.yml or ./fly-resource.yml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Concourse target URL
    #[arg(short, long, global = true, env = "FLY_TARGET")]
    pub target: Option<String>,

    /// Team to log in to
    #[arg(long, global = true, env = "FLY_TEAM")]
    pub team: Option<String>,

    /// Basic-auth username
    #[arg(short, long, global = true, env = "FLY_USERNAME")]
    pub username: Option<String>,

    /// Basic-auth password
    #[arg(long, global = true, env = "FLY_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Skip TLS certificate verification
    #[arg(short = 'k', long, global = true)]
    pub insecure: bool,

    /// Path to the fly binary
    #[arg(long, global = true, env = "FLY_BINARY")]
    pub fly_binary: Option<PathBuf>,

    /// Architecture to download fly for (e.g. amd64)
    #[arg(long, global = true)]
    pub arch: Option<String>,

    /// Operating system to download fly for (e.g. linux)
    #[arg(long, global = true)]
    pub os: Option<String>,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Config values given on the command line or through the environment.
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            target: self.target.clone(),
            team: self.team.clone(),
            username: self.username.clone(),
            password: self.password.clone(),
            insecure: self.insecure.then_some(true),
            fly_binary: self.fly_binary.clone(),
            arch: self.arch.clone(),
            os: self.os.clone(),
        }
    }
}

/// Available subcommands.
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Log in to the target (reconciling the fly version first) and sync
    Login,

    /// List pipeline names
    Pipelines(PipelinesArgs),

    /// Print a pipeline's configuration
    GetPipeline(PipelineArgs),

    /// Create or update a pipeline
    SetPipeline(SetPipelineArgs),

    /// Remove a pipeline
    DestroyPipeline(PipelineArgs),

    /// Unpause a pipeline
    UnpausePipeline(PipelineArgs),

    /// Make a pipeline publicly visible
    ExposePipeline(PipelineArgs),

    /// Compare the fly version with the target, replacing fly if needed
    CheckVersion,

    /// List the team's pipelines through the API, without fly
    TeamPipelines,
}

/// Arguments for the `pipelines` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct PipelinesArgs {
    /// Print names as a JSON array
    #[arg(long)]
    pub json: bool,
}

/// Arguments naming a single pipeline.
#[derive(Debug, Clone, clap::Args)]
pub struct PipelineArgs {
    /// Pipeline name
    #[arg(short, long)]
    pub pipeline: String,
}

/// Arguments for the `set-pipeline` command.
#[derive(Debug, Clone, clap::Args)]
pub struct SetPipelineArgs {
    /// Pipeline name
    #[arg(short, long)]
    pub pipeline: String,

    /// Pipeline configuration file
    #[arg(short = 'c', long = "config-file")]
    pub config_file: PathBuf,

    /// Vars files (repeatable)
    #[arg(short = 'l', long = "load-vars-from")]
    pub vars_files: Vec<PathBuf>,

    /// Var as name=value; value is parsed as JSON, falling back to a string (repeatable)
    #[arg(short = 'y', long = "var", value_parser = parse_var)]
    pub vars: Vec<(String, Value)>,
}

/// Parse a `name=value` var.
///
/// The value is JSON when it parses as JSON, otherwise a plain string.
pub fn parse_var(input: &str) -> Result<(String, Value), String> {
    let (name, raw) = input
        .split_once('=')
        .ok_or_else(|| format!("expected name=value, got '{}'", input))?;
    if name.is_empty() {
        return Err(format!("missing var name in '{}'", input));
    }
    let value = serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()));
    Ok((name.to_string(), value))
}
