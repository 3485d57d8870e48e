//! Configuration file discovery and loading.

use crate::config::schema::ResourceConfig;
use crate::error::{FlyError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// File names searched for in a directory, in priority order.
pub const CONFIG_FILE_NAMES: &[&str] = &[".fly-resource.yml", "fly-resource.yml"];

/// Find a config file in `dir`.
pub fn find_config(dir: &Path) -> Option<PathBuf> {
    CONFIG_FILE_NAMES
        .iter()
        .map(|name| dir.join(name))
        .find(|path| path.is_file())
}

/// Load and parse a config file.
pub fn load_config_file(path: &Path) -> Result<ResourceConfig> {
    if !path.exists() {
        return Err(FlyError::ConfigNotFound {
            path: path.to_path_buf(),
        });
    }

    let content = fs::read_to_string(path)?;
    if content.trim().is_empty() {
        return Ok(ResourceConfig::default());
    }

    serde_yaml::from_str(&content).map_err(|e| FlyError::ConfigParse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Load the config for a run.
///
/// An explicit path must exist. Without one, `dir` is searched and a missing
/// file yields the defaults.
pub fn load_config(explicit: Option<&Path>, dir: &Path) -> Result<ResourceConfig> {
    match explicit {
        Some(path) => load_config_file(path),
        None => match find_config(dir) {
            Some(path) => {
                tracing::debug!("Using config file {}", path.display());
                load_config_file(&path)
            }
            None => Ok(ResourceConfig::default()),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_explicit_file_is_not_found() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("missing.yml");

        let err = load_config(Some(&path), temp.path()).unwrap_err();

        assert!(matches!(err, FlyError::ConfigNotFound { .. }));
    }

    #[test]
    fn no_file_in_dir_yields_defaults() {
        let temp = TempDir::new().unwrap();

        let config = load_config(None, temp.path()).unwrap();

        assert_eq!(config, ResourceConfig::default());
    }

    #[test]
    fn discovers_hidden_file_first() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("fly-resource.yml"), "target: visible").unwrap();
        fs::write(temp.path().join(".fly-resource.yml"), "target: hidden").unwrap();

        let config = load_config(None, temp.path()).unwrap();

        assert_eq!(config.target, "hidden");
    }

    #[test]
    fn invalid_yaml_is_parse_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("bad.yml");
        fs::write(&path, "target: [unclosed").unwrap();

        let err = load_config_file(&path).unwrap_err();

        match err {
            FlyError::ConfigParse { path: p, .. } => assert_eq!(p, path),
            other => panic!("expected parse error, got {:?}", other),
        }
    }

    #[test]
    fn empty_file_yields_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("empty.yml");
        fs::write(&path, "\n").unwrap();

        assert_eq!(load_config_file(&path).unwrap(), ResourceConfig::default());
    }
}
