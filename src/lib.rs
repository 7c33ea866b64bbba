//! recipe-bump
//!
//! Keeps a package-definition file in step with an upstream vendor's
//! release manifest: reads the recorded version and hash, fetches the
//! latest release, rewrites both fields, and verifies that the package
//! still builds before keeping the change.

pub use recipe_bump_core::{format_error_with_help, BumpError, BumpResult, ErrorHelp};

/// Core module re-exported from recipe-bump-core.
pub mod core {
    pub use recipe_bump_core::core::*;
    pub use recipe_bump_core::*;
}

/// Configuration management.
pub mod config;

/// Per-run paths and preconditions.
pub mod context;

/// Digest encoding conversion.
pub mod hash;

/// Upstream release manifest.
pub mod manifest;

/// Package-definition file reading and rewriting.
pub mod package;

/// External build verification.
pub mod build;

/// Version check and update sequencing.
pub mod workflow;
