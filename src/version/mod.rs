//! Version reconciliation between the local fly binary and a target.
//!
//! This module provides:
//! - Version comparison (exact match, then major component)
//! - Target info fetching from `/api/v1/info`
//! - Replacement binary download from `/api/v1/cli`

pub mod compare;
pub mod platform;
pub mod reconcile;

pub use compare::{major_component, versions_compatible};
pub use platform::Platform;
pub use reconcile::{Reconciler, Reconciliation, TargetInfo, CLI_PATH, INFO_PATH};
