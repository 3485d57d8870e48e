//! In-memory [`FlyCommand`] for testing.
//!
//! `FakeFlyCommand` records every call and returns whatever each method's
//! [`Recorder`] is configured with, so code that drives fly can be tested
//! without a binary or a target.
//!
//! # Example
//!
//! ```
//! use fly_resource::fly::{FakeFlyCommand, FlyCommand};
//!
//! let fake = FakeFlyCommand::new();
//! fake.pipelines.returns(vec!["web".to_string()]);
//! fake.get_pipeline.returns(b"jobs: []".to_vec());
//!
//! assert_eq!(fake.pipelines().unwrap(), vec!["web"]);
//! assert_eq!(fake.get_pipeline("web").unwrap(), b"jobs: []");
//! assert_eq!(fake.get_pipeline.args_for_call(0), Some("web".to_string()));
//! ```

use super::args::LoginParams;
use super::command::FlyCommand;
use crate::error::Result;
use crate::fake::{Invocations, Recorder};
use serde_json::Value;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Arguments captured from a `set_pipeline` call.
#[derive(Debug, Clone, PartialEq)]
pub struct SetPipelineCall {
    /// Pipeline name.
    pub name: String,
    /// Pipeline configuration file.
    pub config_file: PathBuf,
    /// Vars files, in the order given.
    pub vars_files: Vec<PathBuf>,
    /// Vars by name.
    pub vars: HashMap<String, Value>,
}

/// Recording fake of [`FlyCommand`].
///
/// Each public field configures and inspects one method.
#[derive(Debug, Default)]
pub struct FakeFlyCommand {
    /// Login parameters, including the password.
    pub login: Recorder<LoginParams, Vec<u8>>,
    /// Pipeline listing; takes no arguments.
    pub pipelines: Recorder<(), Vec<String>>,
    /// Names passed to `get_pipeline`.
    pub get_pipeline: Recorder<String, Vec<u8>>,
    /// Everything passed to `set_pipeline`.
    pub set_pipeline: Recorder<SetPipelineCall, Vec<u8>>,
    /// Names passed to `destroy_pipeline`.
    pub destroy_pipeline: Recorder<String, Vec<u8>>,
    /// Names passed to `unpause_pipeline`.
    pub unpause_pipeline: Recorder<String, Vec<u8>>,
    /// Names passed to `expose_pipeline`.
    pub expose_pipeline: Recorder<String, Vec<u8>>,
    invocations: Invocations,
}

impl FakeFlyCommand {
    /// Create a fake whose methods all succeed with empty output.
    pub fn new() -> Self {
        Self::default()
    }

    /// Every call made so far, keyed by method name.
    pub fn invocations(&self) -> HashMap<String, Vec<String>> {
        self.invocations.all()
    }
}

impl FlyCommand for FakeFlyCommand {
    fn login(&self, params: &LoginParams) -> Result<Vec<u8>> {
        // The password never reaches the invocation log.
        self.invocations
            .record("login", &(&params.url, &params.team, &params.username));
        self.login.record(params.clone())
    }

    fn pipelines(&self) -> Result<Vec<String>> {
        self.invocations.record("pipelines", &());
        self.pipelines.record(())
    }

    fn get_pipeline(&self, name: &str) -> Result<Vec<u8>> {
        self.invocations.record("get_pipeline", &name);
        self.get_pipeline.record(name.to_string())
    }

    fn set_pipeline(
        &self,
        name: &str,
        config_file: &Path,
        vars_files: &[PathBuf],
        vars: &HashMap<String, Value>,
    ) -> Result<Vec<u8>> {
        let call = SetPipelineCall {
            name: name.to_string(),
            config_file: config_file.to_path_buf(),
            vars_files: vars_files.to_vec(),
            vars: vars.clone(),
        };
        self.invocations.record("set_pipeline", &call);
        self.set_pipeline.record(call)
    }

    fn destroy_pipeline(&self, name: &str) -> Result<Vec<u8>> {
        self.invocations.record("destroy_pipeline", &name);
        self.destroy_pipeline.record(name.to_string())
    }

    fn unpause_pipeline(&self, name: &str) -> Result<Vec<u8>> {
        self.invocations.record("unpause_pipeline", &name);
        self.unpause_pipeline.record(name.to_string())
    }

    fn expose_pipeline(&self, name: &str) -> Result<Vec<u8>> {
        self.invocations.record("expose_pipeline", &name);
        self.expose_pipeline.record(name.to_string())
    }
}
