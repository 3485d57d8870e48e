//! Argument lists for fly subcommands.
//!
//! Pure functions: nothing here touches the filesystem or spawns a process,
//! so flag construction can be tested on its own.

use crate::error::{FlyError, Result};
use serde::Serialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Parameters for `fly login`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginParams {
    /// URL of the Concourse web node (`-c`).
    pub url: String,
    /// Team to log in to (`-n`).
    pub team: String,
    /// Basic-auth username; only sent together with a password.
    pub username: String,
    /// Basic-auth password; only sent together with a username.
    pub password: String,
    /// Skip TLS verification (`-k`).
    pub insecure: bool,
}

impl LoginParams {
    /// Whether both halves of the basic-auth pair are present.
    pub fn has_credentials(&self) -> bool {
        !self.username.is_empty() && !self.password.is_empty()
    }
}

/// Prefix `args` with `-t <target>`.
///
/// Fails with [`FlyError::EmptyTarget`] when no target is configured.
pub fn with_target(target: &str, args: Vec<String>) -> Result<Vec<String>> {
    if target.is_empty() {
        return Err(FlyError::EmptyTarget);
    }
    let mut all = Vec::with_capacity(args.len() + 2);
    all.push("-t".to_string());
    all.push(target.to_string());
    all.extend(args);
    Ok(all)
}

/// `login -c <url> -n <team> [-u <user> -p <pass>] [-k]`
pub fn login(params: &LoginParams) -> Vec<String> {
    let mut args = owned(&["login", "-c", &params.url, "-n", &params.team]);
    if params.has_credentials() {
        args.extend(owned(&["-u", &params.username, "-p", &params.password]));
    }
    if params.insecure {
        args.push("-k".to_string());
    }
    args
}

/// `sync`
pub fn sync() -> Vec<String> {
    owned(&["sync"])
}

/// `--version`
pub fn version() -> Vec<String> {
    owned(&["--version"])
}

/// `pipelines --json`
pub fn pipelines() -> Vec<String> {
    owned(&["pipelines", "--json"])
}

/// `get-pipeline -p <name>`
pub fn get_pipeline(name: &str) -> Vec<String> {
    owned(&["get-pipeline", "-p", name])
}

/// `set-pipeline -n -p <name> -c <file> [-l <varsfile>]* [-y name=value]*`
///
/// Each var is encoded to JSON on its own. Var order follows the map's
/// iteration order.
pub fn set_pipeline<V: Serialize>(
    name: &str,
    config_file: &Path,
    vars_files: &[PathBuf],
    vars: &HashMap<String, V>,
) -> Result<Vec<String>> {
    let mut args = owned(&["set-pipeline", "-n", "-p", name, "-c"]);
    args.push(config_file.to_string_lossy().to_string());

    for file in vars_files {
        args.push("-l".to_string());
        args.push(file.to_string_lossy().to_string());
    }

    for (key, value) in vars {
        let payload = serde_json::to_string(value).map_err(|source| FlyError::VarEncode {
            name: key.clone(),
            source,
        })?;
        args.push("-y".to_string());
        args.push(format!("{}={}", key, payload));
    }

    Ok(args)
}

/// `destroy-pipeline -n -p <name>`
pub fn destroy_pipeline(name: &str) -> Vec<String> {
    owned(&["destroy-pipeline", "-n", "-p", name])
}

/// `unpause-pipeline -p <name>`
pub fn unpause_pipeline(name: &str) -> Vec<String> {
    owned(&["unpause-pipeline", "-p", name])
}

/// `expose-pipeline -p <name>`
pub fn expose_pipeline(name: &str) -> Vec<String> {
    owned(&["expose-pipeline", "-p", name])
}

fn owned(args: &[&str]) -> Vec<String> {
    args.iter().map(|s| s.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn login_params(username: &str, password: &str, insecure: bool) -> LoginParams {
        LoginParams {
            url: "https://ci.example.com".into(),
            team: "main".into(),
            username: username.into(),
            password: password.into(),
            insecure,
        }
    }

    #[test]
    fn with_target_prefixes_args() {
        let args = with_target("ci", pipelines()).unwrap();
        assert_eq!(args, vec!["-t", "ci", "pipelines", "--json"]);
    }

    #[test]
    fn with_target_rejects_empty_target() {
        let err = with_target("", sync()).unwrap_err();
        assert!(matches!(err, FlyError::EmptyTarget));
    }

    #[test]
    fn every_operation_starts_with_target() {
        let ops = vec![
            sync(),
            pipelines(),
            get_pipeline("p"),
            destroy_pipeline("p"),
            unpause_pipeline("p"),
            expose_pipeline("p"),
            login(&login_params("", "", false)),
        ];
        for op in ops {
            let args = with_target("my-target", op.clone()).unwrap();
            assert_eq!(args[..2], ["-t", "my-target"]);
            assert_eq!(&args[2..], op.as_slice());
        }
    }

    #[test]
    fn login_with_credentials() {
        let args = login(&login_params("admin", "s3cret", false));
        assert_eq!(
            args,
            vec![
                "login",
                "-c",
                "https://ci.example.com",
                "-n",
                "main",
                "-u",
                "admin",
                "-p",
                "s3cret"
            ]
        );
    }

    #[test]
    fn login_omits_credentials_when_username_empty() {
        let args = login(&login_params("", "s3cret", false));
        assert!(!args.contains(&"-u".to_string()));
        assert!(!args.contains(&"-p".to_string()));
        assert!(!args.contains(&"s3cret".to_string()));
    }

    #[test]
    fn login_omits_credentials_when_password_empty() {
        let args = login(&login_params("admin", "", false));
        assert_eq!(args, vec!["login", "-c", "https://ci.example.com", "-n", "main"]);
    }

    #[test]
    fn login_insecure_adds_k() {
        let args = login(&login_params("", "", true));
        assert_eq!(args.last().map(String::as_str), Some("-k"));
    }

    #[test]
    fn fixed_operations() {
        assert_eq!(get_pipeline("web"), vec!["get-pipeline", "-p", "web"]);
        assert_eq!(
            destroy_pipeline("web"),
            vec!["destroy-pipeline", "-n", "-p", "web"]
        );
        assert_eq!(unpause_pipeline("web"), vec!["unpause-pipeline", "-p", "web"]);
        assert_eq!(expose_pipeline("web"), vec!["expose-pipeline", "-p", "web"]);
        assert_eq!(version(), vec!["--version"]);
    }

    #[test]
    fn set_pipeline_without_vars() {
        let args = set_pipeline::<serde_json::Value>(
            "web",
            Path::new("ci/pipeline.yml"),
            &[],
            &HashMap::new(),
        )
        .unwrap();

        assert_eq!(
            args,
            vec!["set-pipeline", "-n", "-p", "web", "-c", "ci/pipeline.yml"]
        );
    }

    #[test]
    fn set_pipeline_passes_each_vars_file() {
        let files = vec![PathBuf::from("a.yml"), PathBuf::from("b.yml")];
        let args =
            set_pipeline::<serde_json::Value>("web", Path::new("p.yml"), &files, &HashMap::new())
                .unwrap();

        assert_eq!(args[6..], ["-l", "a.yml", "-l", "b.yml"]);
    }

    #[test]
    fn set_pipeline_encodes_vars_as_json() {
        let mut vars = HashMap::new();
        vars.insert("replicas".to_string(), json!(3));
        vars.insert("branch".to_string(), json!("main"));
        vars.insert("tags".to_string(), json!(["a", "b"]));

        let args = set_pipeline("web", Path::new("p.yml"), &[], &vars).unwrap();

        let ys: Vec<&String> = args
            .iter()
            .enumerate()
            .filter(|(i, _)| *i > 0 && args[i - 1] == "-y")
            .map(|(_, a)| a)
            .collect();
        assert_eq!(ys.len(), 3);
        assert!(ys.contains(&&"replicas=3".to_string()));
        assert!(ys.contains(&&"branch=\"main\"".to_string()));
        assert!(ys.contains(&&"tags=[\"a\",\"b\"]".to_string()));
    }

    #[test]
    fn set_pipeline_reports_unencodable_var() {
        let mut inner = HashMap::new();
        inner.insert((1, 2), "tuple keys are not valid JSON object keys");
        let mut vars = HashMap::new();
        vars.insert("bad".to_string(), inner);

        let err = set_pipeline("web", Path::new("p.yml"), &[], &vars).unwrap_err();

        match err {
            FlyError::VarEncode { name, .. } => assert_eq!(name, "bad"),
            other => panic!("expected encode error, got {:?}", other),
        }
    }

    #[test]
    fn has_credentials_requires_both() {
        assert!(login_params("u", "p", false).has_credentials());
        assert!(!login_params("u", "", false).has_credentials());
        assert!(!login_params("", "p", false).has_credentials());
    }
}
