//! Workspace reconciliation after module changes
//!
//! The root `package.json` carries a `workspaces` array that must list every
//! module directory for the rest of the project tooling to see it.

use super::listing::get_modules_list;
use anyhow::{Context, Result};
use serde_json::{json, Value};
use std::path::Path;
use tokio::fs;

/// Reconcile the root manifest's `workspaces` array with the modules found
/// on disk. Existing entries are kept, module entries are added, the result
/// is sorted and deduplicated. A missing manifest is created minimal.
pub async fn update_workspaces(root: &Path) -> Result<()> {
    let manifest_path = root.join("package.json");

    let mut manifest: Value = if manifest_path.is_file() {
        let content = fs::read_to_string(&manifest_path)
            .await
            .with_context(|| format!("Failed to read {}", manifest_path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse {}", manifest_path.display()))?
    } else {
        let name = root
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "project".to_string());
        json!({ "name": name, "private": true })
    };

    let mut entries: Vec<String> = manifest
        .get("workspaces")
        .and_then(Value::as_array)
        .map(|values| {
            values
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();

    for name in get_modules_list(root).await?.keys() {
        entries.push(format!("src/{}", name));
    }

    entries.sort();
    entries.dedup();

    let Some(fields) = manifest.as_object_mut() else {
        anyhow::bail!("{} is not a JSON object", manifest_path.display());
    };
    fields.insert("workspaces".to_string(), json!(entries));

    let mut content =
        serde_json::to_string_pretty(&manifest).context("Failed to serialize package.json")?;
    content.push('\n');

    fs::write(&manifest_path, content)
        .await
        .with_context(|| format!("Failed to write {}", manifest_path.display()))
}
