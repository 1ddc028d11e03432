//! Custom installer script execution
//!
//! A template may ship an installer at `<template>/install/index.js`. The
//! script is downloaded into a fixed scratch location and run by a JS engine
//! through a small ES-module harness. The harness is the only contract with
//! third-party installer code: it imports the file, treats a missing default
//! export as a no-op, calls the export with the installer context, and
//! awaits a returned promise so synchronous and asynchronous installers
//! complete uniformly.

use crate::catalog::ProjectItem;
use crate::init::SelectedTemplate;
use crate::runtime::Engine;
use crate::transport::Downloader;
use anyhow::{Context, Result};
use colored::Colorize;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tokio::fs;

/// Downloaded installer file name inside the scratch directory.
const INSTALLER_FILE: &str = "install.js";

/// Environment variable carrying the installer file path into the harness.
const PATH_ENV: &str = "YUNO_INSTALLER_PATH";

/// Environment variable carrying the JSON installer context into the harness.
const CONTEXT_ENV: &str = "YUNO_INSTALLER_CONTEXT";

const HARNESS: &str = r#"
import { pathToFileURL } from "node:url";
const mod = await import(pathToFileURL(process.env.YUNO_INSTALLER_PATH).href);
const installer = mod.default;
if (installer) {
    const res = installer(JSON.parse(process.env.YUNO_INSTALLER_CONTEXT));
    if (res instanceof Promise) await res;
}
"#;

/// The sole contract between the orchestrator and third-party installer
/// code. Delivered to the harness as JSON; no other state is shared.
#[derive(Debug, Clone, Serialize)]
pub struct InstallerContext {
    pub selected: SelectedTemplate,
    pub project: ProjectItem,
}

fn scratch_dir() -> PathBuf {
    std::env::temp_dir().join("yuno-installer")
}

/// Ensure the scratch directory exists and remove a stale installer left
/// from a previous run. Removal is best-effort, the fresh download
/// overwrites the path anyway, but the unlink is always attempted first.
async fn prepare_scratch() -> Result<PathBuf> {
    let dir = scratch_dir();
    fs::create_dir_all(&dir)
        .await
        .context("Failed to create installer scratch directory")?;

    let script_path = dir.join(INSTALLER_FILE);
    let _ = fs::remove_file(&script_path).await;

    Ok(script_path)
}

/// Download and run a template's installer script.
///
/// Invoked only for catalog entries with `hasInstaller`. An installer
/// failure is always fatal, never retried, never silently swallowed.
pub async fn execute_project_installer(
    downloader: &mut Downloader,
    project: &ProjectItem,
    selection: &SelectedTemplate,
    engine: Engine,
) -> Result<()> {
    let script_path = prepare_scratch().await?;

    let key = format!("{}/install/index.js", project.template);
    downloader.download_file(&key, &script_path).await?;

    // The stale file was unlinked above. Confirming the download landed
    // guarantees a prior installer can never run in its place.
    if !script_path.is_file() {
        anyhow::bail!(
            "Installer download could not be confirmed at {}",
            script_path.display()
        );
    }

    let context = InstallerContext {
        selected: selection.clone(),
        project: project.clone(),
    };
    let payload = serde_json::to_string(&context).context("Failed to encode installer context")?;

    if let Err(e) = run_harness(engine, &script_path, &payload).await {
        eprintln!(
            "{} {:#}",
            "Error when executing the custom install script:".red(),
            e
        );
        anyhow::bail!("Custom install script failed");
    }

    Ok(())
}

async fn run_harness(engine: Engine, script_path: &Path, payload: &str) -> Result<()> {
    let (program, args) = engine.harness_command();

    let status = tokio::process::Command::new(program)
        .args(args)
        .arg(HARNESS)
        .env(PATH_ENV, script_path)
        .env(CONTEXT_ENV, payload)
        .status()
        .await
        .with_context(|| format!("Failed to launch {}", engine.display_name()))?;

    if !status.success() {
        anyhow::bail!(
            "Installer exited with status {}",
            status.code().unwrap_or(-1)
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use std::path::PathBuf;

    #[tokio::test]
    async fn test_prepare_scratch_removes_stale_installer() {
        let dir = scratch_dir();
        tokio::fs::create_dir_all(&dir).await.unwrap();
        let stale = dir.join(INSTALLER_FILE);
        tokio::fs::write(&stale, "stale").await.unwrap();

        let script_path = prepare_scratch().await.unwrap();

        assert_eq!(script_path, stale);
        assert!(dir.is_dir());
        assert!(!script_path.exists());
    }

    #[test]
    fn test_context_payload_shape() {
        let context = InstallerContext {
            selected: SelectedTemplate {
                template: "blog".to_string(),
                install_dir: Some(PathBuf::from("/tmp/x")),
                options: BTreeMap::new(),
            },
            project: ProjectItem {
                template: "blog".to_string(),
                has_installer: true,
                description: None,
                version: None,
                options: Vec::new(),
            },
        };

        let value = serde_json::to_value(&context).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "selected": {
                    "template": "blog",
                    "installDir": "/tmp/x",
                    "options": {}
                },
                "project": {
                    "template": "blog",
                    "hasInstaller": true
                }
            })
        );
    }
}
