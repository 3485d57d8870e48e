//! Command dispatching.
//!
//! This module provides the core command infrastructure:
//! - [`Command`] trait for implementing commands
//! - [`CommandDispatcher`] for routing CLI subcommands

use std::io::Write;

use super::check_version::CheckVersionCommand;
use super::pipelines::{
    GetPipelineCommand, LoginCommand, PipelineAction, PipelineActionCommand, PipelinesCommand,
    SetPipelineCommand,
};
use super::team_pipelines::TeamPipelinesCommand;
use crate::api::Client;
use crate::cli::args::Commands;
use crate::config::ResourceConfig;
use crate::error::Result;
use crate::fly::FlyCommand;

/// Trait for command implementations.
///
/// Each CLI subcommand implements this trait to provide its execution logic.
pub trait Command {
    /// Execute the command, writing its output to `out`.
    fn execute(&self, out: &mut dyn Write) -> Result<()>;
}

/// Dispatches CLI commands to their implementations.
pub struct CommandDispatcher {
    config: ResourceConfig,
}

impl CommandDispatcher {
    /// Create a new dispatcher for a validated config.
    pub fn new(config: ResourceConfig) -> Self {
        Self { config }
    }

    /// The config commands run against.
    pub fn config(&self) -> &ResourceConfig {
        &self.config
    }

    /// Dispatch and execute a command against the configured fly and target.
    pub fn dispatch(&self, command: &Commands, out: &mut dyn Write) -> Result<()> {
        let fly = self.config.fly();
        let client = self.config.api_client();
        self.dispatch_with(command, &fly, &client, out)
    }

    /// Dispatch using the given fly and API implementations.
    pub fn dispatch_with(
        &self,
        command: &Commands,
        fly: &dyn FlyCommand,
        client: &dyn Client,
        out: &mut dyn Write,
    ) -> Result<()> {
        match command {
            Commands::Login => LoginCommand::new(fly, self.config.login_params()).execute(out),
            Commands::Pipelines(args) => PipelinesCommand::new(fly, args.clone()).execute(out),
            Commands::GetPipeline(args) => {
                GetPipelineCommand::new(fly, args.pipeline.clone()).execute(out)
            }
            Commands::SetPipeline(args) => SetPipelineCommand::new(fly, args.clone()).execute(out),
            Commands::DestroyPipeline(args) => {
                PipelineActionCommand::new(fly, PipelineAction::Destroy, args.pipeline.clone())
                    .execute(out)
            }
            Commands::UnpausePipeline(args) => {
                PipelineActionCommand::new(fly, PipelineAction::Unpause, args.pipeline.clone())
                    .execute(out)
            }
            Commands::ExposePipeline(args) => {
                PipelineActionCommand::new(fly, PipelineAction::Expose, args.pipeline.clone())
                    .execute(out)
            }
            Commands::CheckVersion => {
                CheckVersionCommand::new(self.config.fly().reconciler(self.config.insecure))
                    .execute(out)
            }
            Commands::TeamPipelines => {
                TeamPipelinesCommand::new(client, self.config.team.clone()).execute(out)
            }
        }
    }
}
