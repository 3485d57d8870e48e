//! Reconciling the local fly binary with its target.
//!
//! Before logging in, the cached fly binary is asked for its version and the
//! target for its own. When the major versions disagree, a fresh binary is
//! downloaded from the target and swapped in over the old one.

use crate::error::{FlyError, Result};
use crate::fly::{args, runner};
use crate::http::{endpoint, HttpFetcher};
use crate::secrets::ArgMasker;
use crate::version::{versions_compatible, Platform};
use serde::{Deserialize, Serialize};
use std::io;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Path of the target's self-description endpoint.
pub const INFO_PATH: &str = "/api/v1/info";

/// Path of the target's fly download endpoint.
pub const CLI_PATH: &str = "/api/v1/cli";

/// Body of `GET /api/v1/info`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetInfo {
    /// Version of the target's web node.
    pub version: String,
    /// Version of the worker protocol the target speaks.
    #[serde(default)]
    pub worker_version: String,
}

/// Outcome of a version check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reconciliation {
    /// Version the local binary reported before any replacement.
    pub baked_version: String,
    /// What the target reported about itself.
    pub target: TargetInfo,
    /// Whether the local binary was replaced.
    pub replaced: bool,
}

impl Reconciliation {
    /// The version now in effect, which is always the target's.
    pub fn version(&self) -> &str {
        &self.target.version
    }
}

/// Keeps a local fly binary in step with a target.
#[derive(Debug, Clone)]
pub struct Reconciler {
    target: String,
    binary: PathBuf,
    platform: Platform,
    insecure: bool,
}

impl Reconciler {
    /// Create a reconciler for `binary` against `target`, downloading for the
    /// host platform.
    pub fn new(target: impl Into<String>, binary: impl Into<PathBuf>) -> Self {
        Self {
            target: target.into(),
            binary: binary.into(),
            platform: Platform::host(),
            insecure: false,
        }
    }

    /// Skip TLS certificate verification for calls to the target.
    pub fn insecure(mut self, insecure: bool) -> Self {
        self.insecure = insecure;
        self
    }

    /// Download replacement binaries for `platform`.
    pub fn platform(mut self, platform: Platform) -> Self {
        self.platform = platform;
        self
    }

    /// Path of the managed fly binary.
    pub fn binary(&self) -> &Path {
        &self.binary
    }

    /// File the binary actually runs from.
    ///
    /// A bare name such as `fly` is looked up on PATH, the same way it is
    /// found when launched. Paths with a directory part are used as given.
    pub fn installed_path(&self) -> Result<PathBuf> {
        let bare = self
            .binary
            .parent()
            .is_none_or(|parent| parent.as_os_str().is_empty());
        if !bare {
            return Ok(self.binary.clone());
        }
        which::which(&self.binary).map_err(|source| FlyError::BinaryNotFound {
            binary: self.binary.clone(),
            source,
        })
    }

    /// URL the replacement binary is downloaded from.
    pub fn download_url(&self) -> String {
        format!(
            "{}?{}",
            endpoint(&self.target, CLI_PATH),
            self.platform.query()
        )
    }

    /// Ensure the local binary is compatible with the target.
    ///
    /// Returns the target's version.
    pub fn reconcile(&self) -> Result<String> {
        self.check().map(|outcome| outcome.target.version)
    }

    /// Compare versions and replace the binary if needed.
    pub fn check(&self) -> Result<Reconciliation> {
        if self.target.is_empty() {
            return Err(FlyError::EmptyTarget);
        }

        let baked_version = self.baked_version()?;
        let target = self.fetch_target_info()?;

        if versions_compatible(&baked_version, &target.version) {
            tracing::debug!(
                "fly {} is compatible with target version {}",
                baked_version,
                target.version
            );
            return Ok(Reconciliation {
                baked_version,
                target,
                replaced: false,
            });
        }

        tracing::warn!(
            "fly {} does not match target version {}; downloading {} binary",
            baked_version,
            target.version,
            self.platform
        );
        self.download_binary()?;

        Ok(Reconciliation {
            baked_version,
            target,
            replaced: true,
        })
    }

    /// Version reported by `fly --version`, without trailing whitespace.
    pub fn baked_version(&self) -> Result<String> {
        let output = runner::run(&self.binary, &args::version(), &ArgMasker::new())?;
        Ok(String::from_utf8_lossy(&output.stdout).trim_end().to_string())
    }

    /// Fetch `/api/v1/info` from the target.
    pub fn fetch_target_info(&self) -> Result<TargetInfo> {
        if self.target.is_empty() {
            return Err(FlyError::EmptyTarget);
        }
        let fetcher = HttpFetcher::with_insecure(self.insecure)?;
        fetcher.get_json(&endpoint(&self.target, INFO_PATH), "target info")
    }

    /// Download fly from the target and install it over the local binary.
    ///
    /// The download is staged in a temporary file beside the binary and
    /// renamed into place, so the binary is never observed half-written.
    pub fn download_binary(&self) -> Result<()> {
        if self.target.is_empty() {
            return Err(FlyError::EmptyTarget);
        }

        let installed = self.installed_path()?;
        let dir = match installed.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let mut staged = NamedTempFile::new_in(dir).map_err(|source| FlyError::BinaryOpen {
            path: installed.clone(),
            source,
        })?;

        let fetcher = HttpFetcher::with_insecure(self.insecure)?;
        let mut response = fetcher.get(&self.download_url())?;

        let write_err = |source: io::Error| FlyError::BinaryWrite {
            path: installed.clone(),
            source,
        };

        let written = io::copy(&mut response, staged.as_file_mut()).map_err(write_err)?;
        staged.as_file().sync_all().map_err(write_err)?;
        make_executable(staged.as_file()).map_err(write_err)?;
        staged
            .persist(&installed)
            .map_err(|err| write_err(err.error))?;

        tracing::info!(
            "Replaced fly binary at {} ({} bytes)",
            installed.display(),
            written
        );
        Ok(())
    }
}

#[cfg(unix)]
fn make_executable(file: &std::fs::File) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    file.set_permissions(std::fs::Permissions::from_mode(0o755))
}

#[cfg(not(unix))]
fn make_executable(_file: &std::fs::File) -> io::Result<()> {
    Ok(())
}
