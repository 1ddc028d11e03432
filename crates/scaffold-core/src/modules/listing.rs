//! Listing of the modules present in a project

use super::names::{EXTERNAL_MOD_MARKER, MOD_PREFIX};
use anyhow::{Context, Result};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tokio::fs;

/// A module found under `<root>/src`.
#[derive(Debug, Clone)]
pub struct ModuleDescriptor {
    pub name: String,
    pub dir: PathBuf,
}

/// Scan the project for modules. A module is a prefixed directory under
/// `<root>/src` carrying a `package.json` manifest; a directory without a
/// manifest is an incomplete scaffold, not a module. A project without a
/// `src` directory simply has no modules.
pub async fn get_modules_list(root: &Path) -> Result<BTreeMap<String, ModuleDescriptor>> {
    let src_dir = root.join("src");
    let mut modules = BTreeMap::new();

    if !src_dir.is_dir() {
        return Ok(modules);
    }

    let mut entries = fs::read_dir(&src_dir)
        .await
        .with_context(|| format!("Failed to read {}", src_dir.display()))?;

    while let Some(entry) = entries.next_entry().await? {
        if !entry.file_type().await?.is_dir() {
            continue;
        }

        let name = entry.file_name().to_string_lossy().to_string();
        let is_module_name = name.starts_with(MOD_PREFIX) || name.contains(EXTERNAL_MOD_MARKER);
        if is_module_name && entry.path().join("package.json").is_file() {
            modules.insert(
                name.clone(),
                ModuleDescriptor {
                    name,
                    dir: entry.path(),
                },
            );
        }
    }

    Ok(modules)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_src_dir_is_empty() {
        let root = tempfile::tempdir().unwrap();
        let modules = get_modules_list(root.path()).await.unwrap();
        assert!(modules.is_empty());
    }

    #[tokio::test]
    async fn test_only_module_dirs_are_listed() {
        let root = tempfile::tempdir().unwrap();
        let src = root.path().join("src");
        for name in ["mod_billing", "yunomod_auth", "components"] {
            std::fs::create_dir_all(src.join(name)).unwrap();
            std::fs::write(src.join(name).join("package.json"), "{}").unwrap();
        }
        std::fs::write(src.join("mod_notadir"), "file").unwrap();

        let modules = get_modules_list(root.path()).await.unwrap();
        let names: Vec<&str> = modules.keys().map(String::as_str).collect();
        assert_eq!(names, ["mod_billing", "yunomod_auth"]);
    }

    #[tokio::test]
    async fn test_dir_without_manifest_is_not_a_module() {
        let root = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(root.path().join("src/mod_partial")).unwrap();

        let modules = get_modules_list(root.path()).await.unwrap();
        assert!(modules.is_empty());
    }
}
