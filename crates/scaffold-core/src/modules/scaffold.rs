//! The `module new` command
//!
//! Scaffolding is idempotent per file: directories and stub files are only
//! created when absent, and an existing file is left untouched even when its
//! content differs from the stub. Invalid and duplicate names are soft
//! failures, the command reports and returns without an error.

use super::listing::get_modules_list;
use super::names::{normalize_module_name, to_npm_module_name};
use super::workspace::update_workspaces;
use anyhow::{Context, Result};
use colored::Colorize;
use std::path::{Path, PathBuf};
use tokio::fs;

const UI_INIT_STUB: &str = r#"import {YunoUiApplication} from "yunojs/ui";

export default function (uiApp: YunoUiApplication) {
}
"#;

const SERVER_INIT_STUB: &str = r#"import {YunoSiteBuilder} from "yunojs/core";

export default async function (site: YunoSiteBuilder) {
}
"#;

fn manifest_stub(npm_name: &str) -> String {
    format!(
        r#"{{
  "name": "{}",
  "version": "0.0.1",
  "description": "",
  "dependencies": {{}},
  "devDependencies": {{}},
  "yuno": {{ "modDependencies": [] }}
}}
"#,
        npm_name
    )
}

fn readme_stub(mod_name: &str) -> String {
    format!("# {}\n\nDescribe the module here.\n", mod_name)
}

/// Run the `module new` command against the project at `dir` (current
/// working directory when absent).
pub async fn run_mod_new(dir: Option<PathBuf>, module_name: &str) -> Result<()> {
    let root = match dir {
        Some(dir) if dir.is_absolute() => dir,
        Some(dir) => std::env::current_dir()?.join(dir),
        None => std::env::current_dir().context("Failed to resolve current directory")?,
    };

    let Some(mod_name) = normalize_module_name(module_name) else {
        println!(
            "{} Invalid module name {}. Exiting.",
            "Warning:".yellow(),
            module_name.red()
        );
        return Ok(());
    };

    let all_modules = get_modules_list(&root).await?;
    if all_modules.contains_key(&mod_name) {
        println!(
            "{} Module {} already exists. Exiting.",
            "Warning:".yellow(),
            mod_name.red()
        );
        return Ok(());
    }

    let mod_dir = root.join("src").join(&mod_name);
    try_add_dir(&mod_dir.join("@routes")).await?;
    try_add_dir(&mod_dir.join("@alias")).await?;

    let npm_name = to_npm_module_name(&mod_name);
    try_add_file(&mod_dir.join("package.json"), &manifest_stub(&npm_name)).await?;
    try_add_file(&mod_dir.join("uiInit.tsx"), UI_INIT_STUB).await?;
    try_add_file(&mod_dir.join("serverInit.ts"), SERVER_INIT_STUB).await?;
    try_add_file(&mod_dir.join("README.md"), &readme_stub(&mod_name)).await?;

    println!(
        "\n{} Module {} created.",
        "✔".green(),
        mod_name.green()
    );

    update_workspaces(&root).await
}

async fn try_add_dir(path: &Path) -> Result<()> {
    if !path.is_dir() {
        fs::create_dir_all(path)
            .await
            .with_context(|| format!("Failed to create directory: {}", path.display()))?;
    }
    Ok(())
}

async fn try_add_file(path: &Path, content: &str) -> Result<()> {
    if !path.is_file() {
        fs::write(path, content)
            .await
            .with_context(|| format!("Failed to write file: {}", path.display()))?;
    }
    Ok(())
}
