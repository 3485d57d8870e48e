//! Version compatibility between a local fly binary and its target.

/// Leading component of a version string (everything before the first `.`).
pub fn major_component(version: &str) -> &str {
    version.split('.').next().unwrap_or(version)
}

/// Whether a fly binary reporting `baked` can talk to a target at `remote`.
///
/// Identical strings are compatible; otherwise only the major components are
/// compared.
pub fn versions_compatible(baked: &str, remote: &str) -> bool {
    if baked == remote {
        return true;
    }
    major_component(baked) == major_component(remote)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_versions_are_compatible() {
        assert!(versions_compatible("6.1.0", "6.1.0"));
        assert!(versions_compatible("", ""));
    }

    #[test]
    fn same_major_is_compatible() {
        assert!(versions_compatible("6.1.0", "6.2.3"));
        assert!(versions_compatible("7.0.0", "7.11.2"));
    }

    #[test]
    fn different_major_is_incompatible() {
        assert!(!versions_compatible("6.1.0", "7.0.0"));
        assert!(!versions_compatible("10.0.0", "1.0.0"));
    }

    #[test]
    fn empty_baked_version_is_incompatible() {
        assert!(!versions_compatible("", "7.0.0"));
    }

    #[test]
    fn major_component_without_separator() {
        assert_eq!(major_component("7"), "7");
        assert_eq!(major_component("7.4.1"), "7");
        assert_eq!(major_component(""), "");
    }

    #[test]
    fn major_component_is_textual() {
        // "v7" and "7" are different leading components
        assert!(!versions_compatible("v7.0.0", "7.0.0"));
    }
}
