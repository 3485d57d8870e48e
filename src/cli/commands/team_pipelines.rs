//! `team-pipelines` command.

use std::io::Write;

use super::dispatcher::Command;
use crate::api::Client;
use crate::error::Result;

/// List a team's pipelines straight from the API.
pub struct TeamPipelinesCommand<'a> {
    client: &'a dyn Client,
    team: String,
}

impl<'a> TeamPipelinesCommand<'a> {
    /// Create a new team-pipelines command.
    pub fn new(client: &'a dyn Client, team: String) -> Self {
        Self { client, team }
    }
}

impl Command for TeamPipelinesCommand<'_> {
    fn execute(&self, out: &mut dyn Write) -> Result<()> {
        for pipeline in self.client.pipelines(&self.team)? {
            let mut flags = Vec::new();
            if pipeline.paused {
                flags.push("paused");
            }
            if pipeline.public {
                flags.push("public");
            }
            if flags.is_empty() {
                writeln!(out, "{}", pipeline.name)?;
            } else {
                writeln!(out, "{} ({})", pipeline.name, flags.join(", "))?;
            }
        }
        Ok(())
    }
}
