//! Download coordinates for the fly binary.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Architecture and operating system a replacement fly binary is built for.
///
/// These are the values the target's `/api/v1/cli` endpoint understands
/// (`amd64`/`arm64`, `linux`/`darwin`/`windows`), not Rust target names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Platform {
    /// CPU architecture, e.g. `amd64`.
    pub arch: String,
    /// Operating system, e.g. `linux`.
    #[serde(alias = "platform")]
    pub os: String,
}

impl Platform {
    /// Create a platform from explicit values.
    pub fn new(arch: impl Into<String>, os: impl Into<String>) -> Self {
        Self {
            arch: arch.into(),
            os: os.into(),
        }
    }

    /// The platform this process is running on.
    pub fn host() -> Self {
        Self::new(
            map_arch(std::env::consts::ARCH),
            map_os(std::env::consts::OS),
        )
    }

    /// Query string for the `/api/v1/cli` download endpoint.
    pub fn query(&self) -> String {
        format!("arch={}&platform={}", self.arch, self.os)
    }
}

impl Default for Platform {
    fn default() -> Self {
        Self::host()
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.os, self.arch)
    }
}

fn map_arch(arch: &str) -> &str {
    match arch {
        "x86_64" => "amd64",
        "aarch64" => "arm64",
        "x86" => "386",
        other => other,
    }
}

fn map_os(os: &str) -> &str {
    match os {
        "macos" => "darwin",
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_uses_arch_and_platform_keys() {
        let platform = Platform::new("amd64", "linux");
        assert_eq!(platform.query(), "arch=amd64&platform=linux");
    }

    #[test]
    fn maps_rust_arch_names() {
        assert_eq!(map_arch("x86_64"), "amd64");
        assert_eq!(map_arch("aarch64"), "arm64");
        assert_eq!(map_arch("riscv64"), "riscv64");
    }

    #[test]
    fn maps_rust_os_names() {
        assert_eq!(map_os("macos"), "darwin");
        assert_eq!(map_os("linux"), "linux");
        assert_eq!(map_os("windows"), "windows");
    }

    #[test]
    fn default_is_host() {
        assert_eq!(Platform::default(), Platform::host());
        assert!(!Platform::host().arch.is_empty());
    }

    #[test]
    fn display_is_os_slash_arch() {
        assert_eq!(Platform::new("arm64", "darwin").to_string(), "darwin/arm64");
    }

    #[test]
    fn deserializes_platform_alias() {
        let platform: Platform =
            serde_json::from_str(r#"{"arch":"arm64","platform":"linux"}"#).unwrap();
        assert_eq!(platform, Platform::new("arm64", "linux"));
    }
}
