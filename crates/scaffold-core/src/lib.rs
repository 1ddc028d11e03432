//! Scaffold Core - library behind the `yuno` scaffolding CLI
//!
//! This library implements project creation from remote templates and module
//! scaffolding inside an existing project. The `yuno-tools` binary is a thin
//! clap wrapper around it.
//!
//! # Architecture
//!
//! - **Transport** - `Downloader` fetches catalog documents, single files and
//!   project archives over HTTP, from a git checkout, or from a local
//!   directory (development mode).
//! - **Catalog** - the remote `projects.yaml` listing available templates.
//! - **Install** - archive materialization with the core overlay, and the
//!   custom installer script runner.
//! - **Modules** - idempotent module scaffolding and workspace registration.
//! - **TUI** - optional cliclack-based template menu (feature-gated).
//!
//! # Feature Flags
//!
//! - `tui` (default): Enables the cliclack-based interactive menu

pub mod archive;
pub mod catalog;
pub mod config;
pub mod init;
pub mod install;
pub mod modules;
pub mod runtime;
pub mod transport;

#[cfg(feature = "tui")]
pub mod tui;

// Re-export main types for convenience
pub use catalog::{ProjectItem, ProjectList};
pub use init::{run_init, InitOptions, OptionValue, SelectedTemplate};
pub use install::{execute_project_installer, install_project_sources};
pub use modules::run_mod_new;
pub use runtime::Engine;
pub use transport::Downloader;
