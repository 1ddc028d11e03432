//! Remote template catalog
//!
//! The registry serves a `projects.yaml` document listing the available
//! templates. Field names are camelCase because the document and the
//! installer context are shared with the JavaScript side of the tooling.

use crate::config;
use crate::transport::Downloader;
use anyhow::{Context, Result};
use semver::Version;
use serde::{Deserialize, Serialize};

/// One catalog entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectItem {
    /// Catalog key, unique across the registry.
    pub template: String,

    /// Whether the template ships a custom installer script.
    #[serde(default)]
    pub has_installer: bool,

    /// Short description shown in the template menu.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Minimum CLI version this template was designed for.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    /// Option prompts offered by the interactive menu.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<TemplateOptionSpec>,
}

impl ProjectItem {
    /// Warn when the running CLI is older than the template expects.
    /// Unparseable versions are skipped rather than failing the command.
    pub fn version_warning(&self, cli_version: &str) -> Option<String> {
        let wanted = Version::parse(self.version.as_deref()?).ok()?;
        let running = Version::parse(cli_version).ok()?;

        if running < wanted {
            Some(format!(
                "Template '{}' was designed for CLI version {} or newer (running {}). \
                 Consider updating: {}",
                self.template,
                wanted,
                running,
                config::UPGRADE_COMMAND
            ))
        } else {
            None
        }
    }
}

/// Menu prompt metadata for one template option.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateOptionSpec {
    /// Flag name, as passed on the command line (`--<name>`).
    pub name: String,

    /// Prompt label shown in the menu.
    pub label: String,

    #[serde(default)]
    pub kind: OptionKind,

    /// Initial value offered by the prompt.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptionKind {
    /// Yes/no prompt, recorded as a boolean option.
    #[default]
    Flag,
    /// Free text prompt, recorded as a string option.
    Text,
}

/// The fetched catalog snapshot. Re-fetched on every invocation, never
/// cached across runs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectList {
    pub projects: Vec<ProjectItem>,
}

impl ProjectList {
    /// Fetch and parse the catalog through the active transport.
    pub async fn fetch(downloader: &mut Downloader) -> Result<Self> {
        let content = downloader.fetch_text(config::PROJECT_LIST_KEY).await?;
        serde_yaml::from_str(&content).context("Failed to parse project catalog")
    }

    /// Exact-match linear lookup. No fuzzy matching, no case folding.
    pub fn find(&self, template: &str) -> Option<&ProjectItem> {
        self.projects.iter().find(|p| p.template == template)
    }
}
