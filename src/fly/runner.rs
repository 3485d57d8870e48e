//! Running the fly binary.
//!
//! Every fly invocation goes through [`run`]: stdout and stderr are captured
//! separately, a failed launch and a non-zero exit are reported as distinct
//! errors, and stderr text is attached to exit errors.

use crate::error::{FlyError, Result};
use crate::secrets::ArgMasker;
use std::path::Path;
use std::process::{Command, Stdio};
use std::time::{Duration, Instant};

/// Captured output of a successful fly invocation.
#[derive(Debug, Clone)]
pub struct RunOutput {
    /// Standard output bytes.
    pub stdout: Vec<u8>,

    /// Standard error, lossily decoded.
    pub stderr: String,

    /// Execution duration.
    pub duration: Duration,
}

/// Run `binary` with `args`, blocking until it exits.
///
/// Arguments are logged at debug level after passing through `masker`.
pub fn run(binary: &Path, args: &[String], masker: &ArgMasker) -> Result<RunOutput> {
    let start = Instant::now();
    let logged = masker.mask_args(args);

    let mut cmd = Command::new(binary);
    cmd.args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());

    tracing::debug!("Starting fly command: {:?}", logged);
    let child = cmd.spawn().map_err(|source| FlyError::Launch {
        binary: binary.to_path_buf(),
        source,
    })?;

    tracing::debug!("Waiting for fly command: {:?}", logged);
    let output = child.wait_with_output().map_err(|source| FlyError::Launch {
        binary: binary.to_path_buf(),
        source,
    })?;

    let duration = start.elapsed();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();

    if !output.status.success() {
        tracing::debug!(
            "fly command {:?} failed with {} after {:?}",
            logged,
            output.status,
            duration
        );
        return Err(FlyError::CommandFailed {
            command: subcommand_name(&logged),
            code: output.status.code(),
            stdout: output.stdout,
            stderr,
        });
    }

    Ok(RunOutput {
        stdout: output.stdout,
        stderr,
        duration,
    })
}

/// First argument that is not the `-t <target>` prefix, for error messages.
fn subcommand_name(args: &[String]) -> String {
    let rest = match args {
        [flag, _target, rest @ ..] if flag == "-t" => rest,
        all => all,
    };
    rest.first().cloned().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(args: &[&str]) -> Vec<String> {
        args.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn subcommand_skips_target_prefix() {
        let args = strings(&["-t", "ci", "get-pipeline", "-p", "main"]);
        assert_eq!(subcommand_name(&args), "get-pipeline");
    }

    #[test]
    fn subcommand_without_target() {
        assert_eq!(subcommand_name(&strings(&["--version"])), "--version");
        assert_eq!(subcommand_name(&[]), "");
    }

    #[test]
    fn missing_binary_is_launch_error() {
        let result = run(
            Path::new("/nonexistent/path/to/fly"),
            &strings(&["--version"]),
            &ArgMasker::new(),
        );

        match result {
            Err(FlyError::Launch { binary, .. }) => {
                assert_eq!(binary, Path::new("/nonexistent/path/to/fly"));
            }
            other => panic!("expected launch error, got {:?}", other),
        }
    }

    #[cfg(unix)]
    #[test]
    fn captures_stdout_and_stderr_separately() {
        let result = run(
            Path::new("/bin/sh"),
            &strings(&["-c", "echo out; echo err >&2"]),
            &ArgMasker::new(),
        )
        .unwrap();

        assert_eq!(result.stdout, b"out\n");
        assert_eq!(result.stderr, "err\n");
    }

    #[cfg(unix)]
    #[test]
    fn nonzero_exit_carries_stderr_and_partial_stdout() {
        let err = run(
            Path::new("/bin/sh"),
            &strings(&["-c", "printf partial; echo 'pipeline not found' >&2; exit 3"]),
            &ArgMasker::new(),
        )
        .unwrap_err();

        assert!(err.to_string().contains("pipeline not found"));
        match err {
            FlyError::CommandFailed { code, stdout, .. } => {
                assert_eq!(code, Some(3));
                assert_eq!(stdout, b"partial");
            }
            other => panic!("expected command failure, got {:?}", other),
        }
    }

    #[cfg(unix)]
    #[test]
    fn nonzero_exit_without_stderr_has_plain_message() {
        let err = run(
            Path::new("/bin/sh"),
            &strings(&["-c", "exit 1"]),
            &ArgMasker::new(),
        )
        .unwrap_err();

        assert!(!err.to_string().contains(" - "));
    }
}
