//! Template downloads over HTTP, git, or a local directory
//!
//! Every template asset is addressed by a slash-joined key relative to the
//! registry root, e.g. `blog/project.zip` or `blog/install/index.js`. The
//! same keys resolve against all three transports, so the registry content,
//! a git checkout of it, and a local development directory are
//! interchangeable.

use crate::archive;
use crate::config;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::fs;
use url::Url;

/// Template source - either remote registry or local directory
#[derive(Debug, Clone)]
pub enum TemplateSource {
    Remote(Url),
    Local(PathBuf),
}

/// How remote keys are fetched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportMode {
    Http,
    Git,
}

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("HTTP {status} fetching {url}")]
    HttpStatus {
        status: reqwest::StatusCode,
        url: Url,
    },
    #[error("'{0}' not found in template source")]
    Missing(String),
    #[error("git clone of {0} failed")]
    GitClone(String),
}

/// Fetch-and-place primitives for template assets.
pub struct Downloader {
    source: TemplateSource,
    mode: TransportMode,
    client: reqwest::Client,
    /// Checkout populated lazily on the first git-mode fetch.
    git_checkout: Option<PathBuf>,
}

impl Downloader {
    pub fn new(source: TemplateSource) -> Self {
        Self {
            source,
            mode: TransportMode::Http,
            client: reqwest::Client::builder()
                .user_agent(config::USER_AGENT)
                .build()
                .unwrap_or_else(|_| reqwest::Client::new()),
            git_checkout: None,
        }
    }

    /// Create a downloader for the configured remote registry.
    pub fn from_env() -> Result<Self> {
        let url_str = config::template_url();
        let url =
            Url::parse(&url_str).with_context(|| format!("Invalid template URL: {}", url_str))?;
        Ok(Self::new(TemplateSource::Remote(url)))
    }

    /// Create a downloader for a local template directory.
    pub fn from_local(path: PathBuf) -> Self {
        Self::new(TemplateSource::Local(path))
    }

    /// Switch to the git transport. Must be called before any download in
    /// the same invocation.
    pub fn force_git(&mut self) {
        self.mode = TransportMode::Git;
    }

    pub fn mode(&self) -> TransportMode {
        self.mode
    }

    /// Build a URL by appending the key's segments, preserving query parameters
    fn build_url(base: &Url, key: &str) -> Result<Url> {
        let mut url = base.clone();
        url.path_segments_mut()
            .map_err(|_| anyhow::anyhow!("URL cannot have path segments: {}", base))?
            .pop_if_empty()
            .extend(key.split('/'));
        Ok(url)
    }

    async fn http_fetch(&self, key: &str) -> Result<Vec<u8>> {
        let base = match &self.source {
            TemplateSource::Remote(url) => url,
            TemplateSource::Local(_) => unreachable!("http fetch on local source"),
        };
        let url = Self::build_url(base, key)?;
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .with_context(|| format!("Failed to fetch {}", url))?;

        if !response.status().is_success() {
            return Err(TransportError::HttpStatus {
                status: response.status(),
                url,
            }
            .into());
        }

        Ok(response.bytes().await?.to_vec())
    }

    /// Clone the template repository into a fresh temp checkout. The
    /// checkout is re-created on every invocation so the content is always
    /// the latest.
    async fn ensure_git_checkout(&mut self) -> Result<PathBuf> {
        if let Some(dir) = &self.git_checkout {
            return Ok(dir.clone());
        }

        let dest = std::env::temp_dir().join("yuno-templates");
        if dest.exists() {
            fs::remove_dir_all(&dest)
                .await
                .with_context(|| format!("Failed to clear {}", dest.display()))?;
        }

        let remote = config::template_git();
        let status = tokio::process::Command::new("git")
            .args(["clone", "--depth", "1", "--quiet", &remote])
            .arg(&dest)
            .status()
            .await
            .context("Failed to run git")?;

        if !status.success() {
            return Err(TransportError::GitClone(remote).into());
        }

        self.git_checkout = Some(dest.clone());
        Ok(dest)
    }

    async fn read_from_dir(dir: &Path, key: &str) -> Result<Vec<u8>> {
        let path = dir.join(key);
        fs::read(&path)
            .await
            .map_err(|_| TransportError::Missing(key.to_string()).into())
    }

    /// Fetch the raw bytes behind a key through the active transport.
    async fn fetch_bytes(&mut self, key: &str) -> Result<Vec<u8>> {
        if let TemplateSource::Local(dir) = &self.source {
            let dir = dir.clone();
            return Self::read_from_dir(&dir, key).await;
        }

        match self.mode {
            TransportMode::Http => self.http_fetch(key).await,
            TransportMode::Git => {
                let checkout = self.ensure_git_checkout().await?;
                Self::read_from_dir(&checkout, key).await
            }
        }
    }

    /// Fetch a key as UTF-8 text (catalog documents).
    pub async fn fetch_text(&mut self, key: &str) -> Result<String> {
        let bytes = self.fetch_bytes(key).await?;
        String::from_utf8(bytes).with_context(|| format!("'{}' is not valid UTF-8", key))
    }

    /// Download a single file and place it at `dest`.
    pub async fn download_file(&mut self, key: &str, dest: &Path) -> Result<()> {
        let bytes = self.fetch_bytes(key).await?;
        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent)
                .await
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }
        fs::write(dest, &bytes)
            .await
            .with_context(|| format!("Failed to write file: {}", dest.display()))
    }

    /// Download a project archive and extract it into `dest_dir`. Entries
    /// overwrite existing files.
    pub async fn download_project(&mut self, key: &str, dest_dir: &Path) -> Result<()> {
        let bytes = self.fetch_bytes(key).await?;
        archive::extract_zip(&bytes, dest_dir)
            .with_context(|| format!("Failed to extract archive '{}'", key))
    }
}
