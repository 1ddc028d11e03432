//! Zip extraction and template packing
//!
//! Project archives contain paths relative to the project root. Extraction
//! overwrites existing files, which is what makes the core overlay the
//! winning layer when it is applied second.

use anyhow::{Context, Result};
use colored::Colorize;
use std::io::{Cursor, Read, Write};
use std::path::{Component, Path};
use walkdir::WalkDir;
use zip::write::SimpleFileOptions;
use zip::{ZipArchive, ZipWriter};

/// Archive file name inside each template directory of the registry.
pub const PROJECT_ARCHIVE: &str = "project.zip";

/// Installer subtree, served as plain files and never packed.
const INSTALL_DIR: &str = "install";

/// Extract a zip into `dest_dir`, overwriting existing files.
pub fn extract_zip(bytes: &[u8], dest_dir: &Path) -> Result<()> {
    let cursor = Cursor::new(bytes);
    let mut archive = ZipArchive::new(cursor).context("Failed to read zip archive")?;

    std::fs::create_dir_all(dest_dir)
        .with_context(|| format!("Failed to create directory: {}", dest_dir.display()))?;

    for i in 0..archive.len() {
        let mut file = archive.by_index(i)?;
        let name = file.name().to_string();

        // Reject entries that would escape the destination
        let relative = Path::new(&name);
        if relative.is_absolute()
            || relative
                .components()
                .any(|c| matches!(c, Component::ParentDir))
        {
            continue;
        }

        let target = dest_dir.join(relative);

        if file.is_dir() {
            std::fs::create_dir_all(&target)
                .with_context(|| format!("Failed to create directory: {}", target.display()))?;
            continue;
        }

        if let Some(parent) = target.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        let mut contents = Vec::new();
        file.read_to_end(&mut contents)?;
        std::fs::write(&target, &contents)
            .with_context(|| format!("Failed to write file: {}", target.display()))?;
    }

    Ok(())
}

/// Build the project archive for one template directory.
///
/// The `install/` subtree and any previously packed archive are excluded.
pub fn build_template_zip(template_dir: &Path) -> Result<Vec<u8>> {
    let mut zip_buffer = Vec::new();
    {
        let mut zip = ZipWriter::new(Cursor::new(&mut zip_buffer));
        let options =
            SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);

        for entry in WalkDir::new(template_dir)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
        {
            if !entry.file_type().is_file() {
                continue;
            }

            let Ok(relative) = entry.path().strip_prefix(template_dir) else {
                continue;
            };

            if is_excluded(relative) {
                continue;
            }

            let zip_path = zip_entry_name(relative);
            let content = std::fs::read(entry.path())
                .with_context(|| format!("Failed to read {}", entry.path().display()))?;
            zip.start_file(&zip_path, options)?;
            zip.write_all(&content)?;
        }

        zip.finish()?;
    }

    Ok(zip_buffer)
}

/// Pack every template subdirectory of `dir` into `<name>/project.zip`.
///
/// The packed directory is directly usable as a local template source or as
/// the content of the template git repository.
pub async fn pack_templates(dir: &Path) -> Result<()> {
    if !dir.exists() {
        anyhow::bail!("Template directory not found: {}", dir.display());
    }

    println!("{}", "Packing template archives...".cyan().bold());
    println!();

    let mut built = 0;
    let mut entries = tokio::fs::read_dir(dir)
        .await
        .with_context(|| format!("Failed to read {}", dir.display()))?;

    while let Some(entry) = entries.next_entry().await? {
        if !entry.file_type().await?.is_dir() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().to_string();

        print!("  {} {}...", "->".blue(), name);

        match build_template_zip(&entry.path()) {
            Ok(zip_bytes) => {
                let zip_path = entry.path().join(PROJECT_ARCHIVE);
                std::fs::write(&zip_path, &zip_bytes)
                    .with_context(|| format!("Failed to write {}", zip_path.display()))?;
                println!(" {} ({} bytes)", "done".green(), zip_bytes.len());
                built += 1;
            }
            Err(e) => {
                println!(" {}", "failed".red());
                eprintln!("    Error: {}", e);
            }
        }
    }

    println!();
    println!(
        "{} {} template archive(s) in {}",
        "Packed".green().bold(),
        built,
        dir.display()
    );

    Ok(())
}

fn is_excluded(relative: &Path) -> bool {
    if relative == Path::new(PROJECT_ARCHIVE) {
        return true;
    }
    matches!(relative.components().next(),
        Some(Component::Normal(first)) if first == std::ffi::OsStr::new(INSTALL_DIR))
}

/// Zip entry names always use forward slashes.
fn zip_entry_name(relative: &Path) -> String {
    let parts: Vec<String> = relative
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy().to_string()),
            _ => None,
        })
        .collect();
    parts.join("/")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seed_template(dir: &Path) {
        std::fs::create_dir_all(dir.join("src")).unwrap();
        std::fs::create_dir_all(dir.join("install")).unwrap();
        std::fs::write(dir.join("app.txt"), "app\n").unwrap();
        std::fs::write(dir.join("src/index.ts"), "export {};\n").unwrap();
        std::fs::write(dir.join("install/index.js"), "export default null;\n").unwrap();
    }

    #[test]
    fn test_pack_excludes_installer_subtree() {
        let tmp = tempfile::tempdir().unwrap();
        seed_template(tmp.path());

        let bytes = build_template_zip(tmp.path()).unwrap();

        let dest = tempfile::tempdir().unwrap();
        extract_zip(&bytes, dest.path()).unwrap();

        assert!(dest.path().join("app.txt").is_file());
        assert!(dest.path().join("src/index.ts").is_file());
        assert!(!dest.path().join("install").exists());
    }

    #[test]
    fn test_pack_excludes_previous_archive() {
        let tmp = tempfile::tempdir().unwrap();
        seed_template(tmp.path());
        std::fs::write(tmp.path().join(PROJECT_ARCHIVE), b"stale").unwrap();

        let bytes = build_template_zip(tmp.path()).unwrap();

        let dest = tempfile::tempdir().unwrap();
        extract_zip(&bytes, dest.path()).unwrap();
        assert!(!dest.path().join(PROJECT_ARCHIVE).exists());
    }

    #[test]
    fn test_extract_overwrites_existing_files() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(tmp.path().join("shared.txt"), "template\n").unwrap();

        let src = tempfile::tempdir().unwrap();
        std::fs::write(src.path().join("shared.txt"), "core\n").unwrap();
        let bytes = build_template_zip(src.path()).unwrap();

        extract_zip(&bytes, tmp.path()).unwrap();
        let content = std::fs::read_to_string(tmp.path().join("shared.txt")).unwrap();
        assert_eq!(content, "core\n");
    }
}
