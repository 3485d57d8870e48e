//! The [`FlyCommand`] interface and its process-backed implementation.

use super::args::{self, LoginParams};
use super::runner;
use crate::error::{FlyError, Result};
use crate::secrets::ArgMasker;
use crate::version::{Platform, Reconciler};
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// High-level pipeline operations backed by fly.
///
/// Implemented by [`Fly`] for real use and by
/// [`FakeFlyCommand`](super::fake::FakeFlyCommand) in tests.
pub trait FlyCommand {
    /// Log in to the target, then sync the fly binary.
    ///
    /// Returns the concatenated stdout of `login` and `sync`.
    fn login(&self, params: &LoginParams) -> Result<Vec<u8>>;

    /// Names of all pipelines, in the order fly lists them.
    fn pipelines(&self) -> Result<Vec<String>>;

    /// Current configuration of a pipeline.
    fn get_pipeline(&self, name: &str) -> Result<Vec<u8>>;

    /// Create or update a pipeline from a config file.
    fn set_pipeline(
        &self,
        name: &str,
        config_file: &Path,
        vars_files: &[PathBuf],
        vars: &HashMap<String, Value>,
    ) -> Result<Vec<u8>>;

    /// Remove a pipeline.
    fn destroy_pipeline(&self, name: &str) -> Result<Vec<u8>>;

    /// Unpause a pipeline.
    fn unpause_pipeline(&self, name: &str) -> Result<Vec<u8>>;

    /// Make a pipeline publicly visible.
    fn expose_pipeline(&self, name: &str) -> Result<Vec<u8>>;
}

#[derive(Debug, Deserialize)]
struct ListedPipeline {
    name: String,
}

/// Runs fly against a single target.
///
/// # Example
///
/// ```no_run
/// use fly_resource::fly::{Fly, FlyCommand};
///
/// let fly = Fly::new("ci", "/usr/local/bin/fly");
/// for name in fly.pipelines().unwrap() {
///     println!("{}", name);
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Fly {
    target: String,
    binary: PathBuf,
    platform: Platform,
}

impl Fly {
    /// Create a wrapper running `binary` against `target`.
    pub fn new(target: impl Into<String>, binary: impl Into<PathBuf>) -> Self {
        Self {
            target: target.into(),
            binary: binary.into(),
            platform: Platform::host(),
        }
    }

    /// Platform to download when the binary has to be replaced.
    pub fn with_platform(mut self, platform: Platform) -> Self {
        self.platform = platform;
        self
    }

    /// The configured target.
    pub fn target(&self) -> &str {
        &self.target
    }

    /// Path of the fly binary.
    pub fn binary(&self) -> &Path {
        &self.binary
    }

    /// Version reconciler for this target and binary.
    pub fn reconciler(&self, insecure: bool) -> Reconciler {
        Reconciler::new(self.target.clone(), self.binary.clone())
            .platform(self.platform.clone())
            .insecure(insecure)
    }

    fn run(&self, args: Vec<String>) -> Result<Vec<u8>> {
        self.run_masked(args, &ArgMasker::new())
    }

    fn run_masked(&self, args: Vec<String>, masker: &ArgMasker) -> Result<Vec<u8>> {
        let all = args::with_target(&self.target, args)?;
        let output = runner::run(&self.binary, &all, masker)?;
        if !output.stderr.trim().is_empty() {
            tracing::debug!("fly stderr: {}", masker.mask(output.stderr.trim_end()));
        }
        tracing::debug!("fly command finished in {:?}", output.duration);
        Ok(output.stdout)
    }
}

impl FlyCommand for Fly {
    fn login(&self, params: &LoginParams) -> Result<Vec<u8>> {
        if self.target.is_empty() {
            return Err(FlyError::EmptyTarget);
        }

        let version = self.reconciler(params.insecure).reconcile()?;
        tracing::debug!("Fly Version: {}", version);

        let mut masker = ArgMasker::new();
        masker.add_secret_flag("-p");
        masker.add_secret(params.password.as_str());

        let mut output = self.run_masked(args::login(params), &masker)?;
        let synced = self.run(args::sync())?;
        output.extend(synced);
        Ok(output)
    }

    fn pipelines(&self) -> Result<Vec<String>> {
        let output = self.run(args::pipelines())?;
        let listed: Vec<ListedPipeline> =
            serde_json::from_slice(&output).map_err(|source| FlyError::Decode {
                what: "fly pipelines output".to_string(),
                source,
            })?;
        Ok(listed.into_iter().map(|p| p.name).collect())
    }

    fn get_pipeline(&self, name: &str) -> Result<Vec<u8>> {
        self.run(args::get_pipeline(name))
    }

    fn set_pipeline(
        &self,
        name: &str,
        config_file: &Path,
        vars_files: &[PathBuf],
        vars: &HashMap<String, Value>,
    ) -> Result<Vec<u8>> {
        self.run(args::set_pipeline(name, config_file, vars_files, vars)?)
    }

    fn destroy_pipeline(&self, name: &str) -> Result<Vec<u8>> {
        self.run(args::destroy_pipeline(name))
    }

    fn unpause_pipeline(&self, name: &str) -> Result<Vec<u8>> {
        self.run(args::unpause_pipeline(name))
    }

    fn expose_pipeline(&self, name: &str) -> Result<Vec<u8>> {
        self.run(args::expose_pipeline(name))
    }
}
