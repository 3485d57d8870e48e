//! Masking of secret values in logged fly argument lists.
//!
//! Login passes the password on the command line, and every invocation is
//! echoed at debug level, so secrets are replaced before the argument list
//! reaches a log line.

use std::collections::HashSet;

/// Replaces secret values with a mask string.
///
/// Argument lists are masked by position: the value following a registered
/// flag is hidden. Free text such as fly's stderr is masked by value.
///
/// # Example
///
/// ```
/// use fly_resource::secrets::ArgMasker;
///
/// let mut masker = ArgMasker::new();
/// masker.add_secret_flag("-p");
/// masker.add_secret("hunter2");
///
/// let args = vec!["login".to_string(), "-p".to_string(), "hunter2".to_string()];
/// assert_eq!(masker.mask_args(&args), vec!["login", "-p", "[REDACTED]"]);
/// assert_eq!(masker.mask("bad password hunter2"), "bad password [REDACTED]");
/// ```
#[derive(Debug, Clone)]
pub struct ArgMasker {
    secrets: HashSet<String>,
    flags: HashSet<String>,
    mask: String,
}

impl ArgMasker {
    /// Create a masker with the default `[REDACTED]` mask.
    pub fn new() -> Self {
        Self::with_mask("[REDACTED]")
    }

    /// Create a masker with a custom mask string.
    pub fn with_mask(mask: impl Into<String>) -> Self {
        Self {
            secrets: HashSet::new(),
            flags: HashSet::new(),
            mask: mask.into(),
        }
    }

    /// Register a secret value to be masked in free text.
    ///
    /// Empty strings are ignored.
    pub fn add_secret(&mut self, value: impl Into<String>) {
        let value = value.into();
        if !value.is_empty() {
            self.secrets.insert(value);
        }
    }

    /// Register a flag whose following argument is a secret.
    pub fn add_secret_flag(&mut self, flag: impl Into<String>) {
        self.flags.insert(flag.into());
    }

    /// Mask any secret values appearing in free text.
    pub fn mask(&self, input: &str) -> String {
        let mut result = input.to_string();
        for secret in &self.secrets {
            result = result.replace(secret.as_str(), &self.mask);
        }
        result
    }

    /// Mask the argument following each secret flag.
    ///
    /// Every other argument is kept as is, so a short password never hides
    /// the target or pipeline names.
    pub fn mask_args(&self, args: &[String]) -> Vec<String> {
        let mut masked = Vec::with_capacity(args.len());
        let mut hide_next = false;
        for arg in args {
            if hide_next {
                masked.push(self.mask.clone());
                hide_next = false;
            } else {
                hide_next = self.flags.contains(arg);
                masked.push(arg.clone());
            }
        }
        masked
    }
}

impl Default for ArgMasker {
    fn default() -> Self {
        Self::new()
    }
}
