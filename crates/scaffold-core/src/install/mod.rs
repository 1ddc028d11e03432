//! Project materialization
//!
//! This module provides:
//! - Archive installation with the core overlay (template first, core second)
//! - The custom installer script runner and its engine harness

pub mod script;
pub mod sources;

pub use script::{execute_project_installer, InstallerContext};
pub use sources::install_project_sources;
