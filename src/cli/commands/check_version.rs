//! `check-version` command.

use std::io::Write;

use super::dispatcher::Command;
use crate::error::Result;
use crate::version::Reconciler;

/// Reconcile the fly binary with the target and report the outcome.
pub struct CheckVersionCommand {
    reconciler: Reconciler,
}

impl CheckVersionCommand {
    /// Create a new check-version command.
    pub fn new(reconciler: Reconciler) -> Self {
        Self { reconciler }
    }
}

impl Command for CheckVersionCommand {
    fn execute(&self, out: &mut dyn Write) -> Result<()> {
        let outcome = self.reconciler.check()?;
        if outcome.replaced {
            writeln!(
                out,
                "fly {} replaced to match target {}",
                outcome.baked_version, outcome.target.version
            )?;
        } else {
            writeln!(
                out,
                "fly {} is compatible with target {}",
                outcome.baked_version, outcome.target.version
            )?;
        }
        Ok(())
    }
}
