//! Configuration schema for fly-resource.
//!
//! Maps to the YAML resource config file.

use crate::api::HttpClient;
use crate::error::{FlyError, Result};
use crate::fly::{Fly, LoginParams};
use crate::version::Platform;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResourceConfig {
    /// URL of the Concourse target
    pub target: String,

    /// Team to log in to
    pub team: String,

    /// Basic-auth username
    #[serde(skip_serializing_if = "String::is_empty")]
    pub username: String,

    /// Basic-auth password
    #[serde(skip_serializing_if = "String::is_empty")]
    pub password: String,

    /// Skip TLS certificate verification
    #[serde(skip_serializing_if = "is_false")]
    pub insecure: bool,

    /// Bearer token for direct API calls
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,

    /// Path to the fly binary
    pub fly_binary: PathBuf,

    /// Platform to download fly for when it has to be replaced
    pub platform: Platform,
}

fn is_false(b: &bool) -> bool {
    !*b
}

impl Default for ResourceConfig {
    fn default() -> Self {
        Self {
            target: String::new(),
            team: "main".to_string(),
            username: String::new(),
            password: String::new(),
            insecure: false,
            token: None,
            fly_binary: PathBuf::from("fly"),
            platform: Platform::host(),
        }
    }
}

/// Values supplied on the command line or through the environment.
///
/// `Some` fields replace the corresponding config value.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub target: Option<String>,
    pub team: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub insecure: Option<bool>,
    pub fly_binary: Option<PathBuf>,
    pub arch: Option<String>,
    pub os: Option<String>,
}

impl ResourceConfig {
    /// Apply command-line overrides on top of file values.
    pub fn apply_overrides(&mut self, overrides: &ConfigOverrides) {
        if let Some(target) = &overrides.target {
            self.target = target.clone();
        }
        if let Some(team) = &overrides.team {
            self.team = team.clone();
        }
        if let Some(username) = &overrides.username {
            self.username = username.clone();
        }
        if let Some(password) = &overrides.password {
            self.password = password.clone();
        }
        if let Some(insecure) = overrides.insecure {
            self.insecure = insecure;
        }
        if let Some(fly_binary) = &overrides.fly_binary {
            self.fly_binary = fly_binary.clone();
        }
        if let Some(arch) = &overrides.arch {
            self.platform.arch = arch.clone();
        }
        if let Some(os) = &overrides.os {
            self.platform.os = os.clone();
        }
    }

    /// Check that the config can drive fly.
    pub fn validate(&self) -> Result<()> {
        if self.target.trim().is_empty() {
            return Err(FlyError::ConfigValidation {
                message: "target is required".to_string(),
            });
        }
        if self.team.trim().is_empty() {
            return Err(FlyError::ConfigValidation {
                message: "team cannot be empty".to_string(),
            });
        }
        if self.fly_binary.as_os_str().is_empty() {
            return Err(FlyError::ConfigValidation {
                message: "fly_binary cannot be empty".to_string(),
            });
        }
        if self.platform.arch.is_empty() || self.platform.os.is_empty() {
            return Err(FlyError::ConfigValidation {
                message: format!("incomplete platform '{}'", self.platform),
            });
        }
        if self.username.is_empty() != self.password.is_empty() {
            tracing::warn!("username and password must both be set; logging in without them");
        }
        Ok(())
    }

    /// Login parameters for this target.
    pub fn login_params(&self) -> LoginParams {
        LoginParams {
            url: self.target.clone(),
            team: self.team.clone(),
            username: self.username.clone(),
            password: self.password.clone(),
            insecure: self.insecure,
        }
    }

    /// fly wrapper for this target.
    pub fn fly(&self) -> Fly {
        Fly::new(self.target.clone(), self.fly_binary.clone()).with_platform(self.platform.clone())
    }

    /// Pipelines API client for this target.
    pub fn api_client(&self) -> HttpClient {
        let client = HttpClient::new(self.target.clone()).insecure(self.insecure);
        match &self.token {
            Some(token) => client.token(token.clone()),
            None => client,
        }
    }
}
