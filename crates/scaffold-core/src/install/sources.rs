//! Archive installation with the core overlay

use crate::archive::PROJECT_ARCHIVE;
use crate::config::CORE_TEMPLATE;
use crate::transport::Downloader;
use anyhow::Result;
use colored::Colorize;
use std::path::Path;

/// Materialize a template into `install_dir`.
///
/// The template archive is extracted first, then the `core` archive is
/// extracted into the same directory. Core is always the final layer, so
/// shared files stay current in every template without per-template
/// patching. Any path present in both archives ends up with the core
/// version on disk.
pub async fn install_project_sources(
    downloader: &mut Downloader,
    template: &str,
    install_dir: &Path,
) -> Result<()> {
    downloader
        .download_project(&archive_key(template), install_dir)
        .await?;

    if template != CORE_TEMPLATE {
        println!("{}", "Overriding core config files...".dimmed());
        downloader
            .download_project(&archive_key(CORE_TEMPLATE), install_dir)
            .await?;
    }

    Ok(())
}

fn archive_key(template: &str) -> String {
    format!("{}/{}", template, PROJECT_ARCHIVE)
}
