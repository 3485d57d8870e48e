//! Commands that go through fly.

use std::collections::HashMap;
use std::io::Write;

use super::dispatcher::Command;
use crate::cli::args::{PipelinesArgs, SetPipelineArgs};
use crate::error::Result;
use crate::fly::{FlyCommand, LoginParams};

/// `login`: reconcile the fly version, log in, and sync.
pub struct LoginCommand<'a> {
    fly: &'a dyn FlyCommand,
    params: LoginParams,
}

impl<'a> LoginCommand<'a> {
    /// Create a new login command.
    pub fn new(fly: &'a dyn FlyCommand, params: LoginParams) -> Self {
        Self { fly, params }
    }
}

impl Command for LoginCommand<'_> {
    fn execute(&self, out: &mut dyn Write) -> Result<()> {
        let output = self.fly.login(&self.params)?;
        out.write_all(&output)?;
        Ok(())
    }
}

/// `pipelines`: list pipeline names, one per line or as JSON.
pub struct PipelinesCommand<'a> {
    fly: &'a dyn FlyCommand,
    args: PipelinesArgs,
}

impl<'a> PipelinesCommand<'a> {
    /// Create a new pipelines command.
    pub fn new(fly: &'a dyn FlyCommand, args: PipelinesArgs) -> Self {
        Self { fly, args }
    }
}

impl Command for PipelinesCommand<'_> {
    fn execute(&self, out: &mut dyn Write) -> Result<()> {
        let names = self.fly.pipelines()?;
        if self.args.json {
            serde_json::to_writer(&mut *out, &names).map_err(anyhow::Error::from)?;
            writeln!(out)?;
        } else {
            for name in names {
                writeln!(out, "{}", name)?;
            }
        }
        Ok(())
    }
}

/// `get-pipeline`: print a pipeline's config verbatim.
pub struct GetPipelineCommand<'a> {
    fly: &'a dyn FlyCommand,
    name: String,
}

impl<'a> GetPipelineCommand<'a> {
    /// Create a new get-pipeline command.
    pub fn new(fly: &'a dyn FlyCommand, name: String) -> Self {
        Self { fly, name }
    }
}

impl Command for GetPipelineCommand<'_> {
    fn execute(&self, out: &mut dyn Write) -> Result<()> {
        out.write_all(&self.fly.get_pipeline(&self.name)?)?;
        Ok(())
    }
}

/// `set-pipeline`: create or update a pipeline.
pub struct SetPipelineCommand<'a> {
    fly: &'a dyn FlyCommand,
    args: SetPipelineArgs,
}

impl<'a> SetPipelineCommand<'a> {
    /// Create a new set-pipeline command.
    pub fn new(fly: &'a dyn FlyCommand, args: SetPipelineArgs) -> Self {
        Self { fly, args }
    }
}

impl Command for SetPipelineCommand<'_> {
    fn execute(&self, out: &mut dyn Write) -> Result<()> {
        // Later -y flags for the same name win.
        let vars: HashMap<_, _> = self.args.vars.iter().cloned().collect();
        let output = self.fly.set_pipeline(
            &self.args.pipeline,
            &self.args.config_file,
            &self.args.vars_files,
            &vars,
        )?;
        out.write_all(&output)?;
        Ok(())
    }
}

/// Single-pipeline operations that only take a name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineAction {
    Destroy,
    Unpause,
    Expose,
}

/// `destroy-pipeline`, `unpause-pipeline` and `expose-pipeline`.
pub struct PipelineActionCommand<'a> {
    fly: &'a dyn FlyCommand,
    action: PipelineAction,
    name: String,
}

impl<'a> PipelineActionCommand<'a> {
    /// Create a new pipeline action command.
    pub fn new(fly: &'a dyn FlyCommand, action: PipelineAction, name: String) -> Self {
        Self { fly, action, name }
    }
}

impl Command for PipelineActionCommand<'_> {
    fn execute(&self, out: &mut dyn Write) -> Result<()> {
        let output = match self.action {
            PipelineAction::Destroy => self.fly.destroy_pipeline(&self.name)?,
            PipelineAction::Unpause => self.fly.unpause_pipeline(&self.name)?,
            PipelineAction::Expose => self.fly.expose_pipeline(&self.name)?,
        };
        out.write_all(&output)?;
        Ok(())
    }
}
