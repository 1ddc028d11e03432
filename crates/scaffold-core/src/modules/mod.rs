//! Module scaffolding inside an existing project
//!
//! A module is a directory under `<root>/src` whose name carries the module
//! prefix. This module provides:
//! - Name normalization and canonicalization rules
//! - Listing of the modules already present in a project
//! - Workspace reconciliation of the root `package.json`
//! - The `module new` command itself

pub mod listing;
pub mod names;
pub mod scaffold;
pub mod workspace;

pub use listing::{get_modules_list, ModuleDescriptor};
pub use names::{normalize_module_name, to_mod_dir_name, to_npm_module_name};
pub use scaffold::run_mod_new;
pub use workspace::update_workspaces;
