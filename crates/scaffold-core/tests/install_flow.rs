//! End-to-end install flow against a packed local template source

use scaffold_core::archive::pack_templates;
use scaffold_core::catalog::ProjectList;
use scaffold_core::init::{run_init, InitOptions};
use scaffold_core::install::install_project_sources;
use scaffold_core::transport::Downloader;
use std::path::{Path, PathBuf};

const CATALOG: &str = "\
projects:
  - template: core
  - template: blog
    hasInstaller: true
    description: Blog starter
  - template: starter
    description: Minimal starter
";

fn write(path: PathBuf, content: &str) {
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, content).unwrap();
}

/// Build a registry directory: template sources, packed archives, catalog.
async fn seed_registry(dir: &Path) {
    write(dir.join("core/shared.txt"), "core\n");
    write(dir.join("core/core-only.txt"), "core\n");

    write(dir.join("blog/shared.txt"), "blog\n");
    write(dir.join("blog/blog-only.txt"), "blog\n");
    write(dir.join("blog/install/index.js"), "export default null;\n");

    write(dir.join("starter/app.txt"), "starter\n");

    pack_templates(dir).await.unwrap();

    write(dir.join("projects.yaml"), CATALOG);
}

fn read(path: PathBuf) -> String {
    std::fs::read_to_string(path).unwrap()
}

#[tokio::test]
async fn test_core_overlay_wins_on_conflicts() {
    let registry = tempfile::tempdir().unwrap();
    seed_registry(registry.path()).await;

    let dest = tempfile::tempdir().unwrap();
    let mut downloader = Downloader::from_local(registry.path().to_path_buf());

    install_project_sources(&mut downloader, "blog", dest.path())
        .await
        .unwrap();

    // Template and core files are both present, core wins where both exist
    assert_eq!(read(dest.path().join("blog-only.txt")), "blog\n");
    assert_eq!(read(dest.path().join("core-only.txt")), "core\n");
    assert_eq!(read(dest.path().join("shared.txt")), "core\n");
}

#[tokio::test]
async fn test_installing_core_has_no_self_overlay() {
    let registry = tempfile::tempdir().unwrap();
    seed_registry(registry.path()).await;

    let dest = tempfile::tempdir().unwrap();
    let mut downloader = Downloader::from_local(registry.path().to_path_buf());

    install_project_sources(&mut downloader, "core", dest.path())
        .await
        .unwrap();

    // Only the core archive was extracted, no other template leaked in
    assert_eq!(read(dest.path().join("shared.txt")), "core\n");
    assert_eq!(read(dest.path().join("core-only.txt")), "core\n");
    assert!(!dest.path().join("blog-only.txt").exists());
    assert!(!dest.path().join("app.txt").exists());
}

#[tokio::test]
async fn test_catalog_lookup_is_exact() {
    let registry = tempfile::tempdir().unwrap();
    seed_registry(registry.path()).await;

    let mut downloader = Downloader::from_local(registry.path().to_path_buf());
    let list = ProjectList::fetch(&mut downloader).await.unwrap();

    assert!(list.find("blog").is_some());
    assert!(list.find("Blog").is_none());
    assert!(list.find("unknown").is_none());
}

#[tokio::test]
async fn test_init_unknown_template_fails_before_any_download() {
    let registry = tempfile::tempdir().unwrap();
    seed_registry(registry.path()).await;

    let dest = tempfile::tempdir().unwrap();
    let args = InitOptions {
        template: Some("unknown".to_string()),
        dir: Some(dest.path().to_path_buf()),
        template_dir: Some(registry.path().to_path_buf()),
        ..Default::default()
    };

    let err = run_init(args, "0.1.0").await.unwrap_err();
    assert!(err.to_string().contains("'unknown' not found"));

    // No archive was extracted into the target directory
    assert_eq!(std::fs::read_dir(dest.path()).unwrap().count(), 0);
}

#[tokio::test]
async fn test_init_materializes_template_with_overlay() {
    let registry = tempfile::tempdir().unwrap();
    seed_registry(registry.path()).await;

    let dest = tempfile::tempdir().unwrap();
    let args = InitOptions {
        template: Some("starter".to_string()),
        dir: Some(dest.path().to_path_buf()),
        template_dir: Some(registry.path().to_path_buf()),
        ..Default::default()
    };

    run_init(args, "0.1.0").await.unwrap();

    assert_eq!(read(dest.path().join("app.txt")), "starter\n");
    assert_eq!(read(dest.path().join("shared.txt")), "core\n");
    assert_eq!(read(dest.path().join("core-only.txt")), "core\n");
}

/// The starter entry has no installer, and the registry serves no
/// `starter/install/index.js`. A successful run proves the installer
/// download step never fires for templates without `hasInstaller`.
#[tokio::test]
async fn test_init_without_installer_never_fetches_installer() {
    let registry = tempfile::tempdir().unwrap();
    seed_registry(registry.path()).await;

    assert!(!registry.path().join("starter/install/index.js").exists());

    let dest = tempfile::tempdir().unwrap();
    let args = InitOptions {
        template: Some("starter".to_string()),
        dir: Some(dest.path().to_path_buf()),
        template_dir: Some(registry.path().to_path_buf()),
        ..Default::default()
    };

    run_init(args, "0.1.0").await.unwrap();
}
