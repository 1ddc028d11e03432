//! The `init` command: catalog resolution, archive install, installer run
//!
//! Steps are strictly sequential. No step begins before the previous one
//! settled successfully, and every failure surfaces through the command's
//! result, so the process exits non-zero.

use crate::catalog::ProjectList;
use crate::install;
use crate::runtime::{self, Engine};
use crate::transport::Downloader;
use anyhow::{Context, Result};
use colored::Colorize;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

/// The user's resolved template choice. Built once per invocation from the
/// interactive menu or from CLI flags, read-only afterward. Serialized
/// camelCase as part of the installer contract.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectedTemplate {
    pub template: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub install_dir: Option<PathBuf>,

    pub options: BTreeMap<String, OptionValue>,
}

/// A template option value: bare flags are booleans, valued flags strings.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum OptionValue {
    Flag(bool),
    Text(String),
}

impl fmt::Display for OptionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionValue::Flag(value) => write!(f, "{}", value),
            OptionValue::Text(value) => write!(f, "{}", value),
        }
    }
}

/// Inputs of the `init` command, already parsed by the CLI layer.
#[derive(Debug, Clone, Default)]
pub struct InitOptions {
    /// Template name. When absent the interactive menu runs.
    pub template: Option<String>,

    /// Engine used for the installer script. Detected when absent.
    pub engine: Option<Engine>,

    /// Target directory. Defaults to the current working directory.
    pub dir: Option<PathBuf>,

    /// Switch the downloader to the git transport before any network
    /// activity.
    pub force_git: bool,

    /// Local directory to use as the template source instead of the remote
    /// registry (for development use).
    pub template_dir: Option<PathBuf>,

    /// Passthrough flags forwarded as template options.
    pub passthrough: Vec<String>,
}

/// Parse passthrough tokens into the options map.
///
/// `--key value` and `--key=value` become string options, a bare `--key`
/// becomes a boolean flag. Tokens that are not flags are skipped.
pub fn parse_option_flags(tokens: &[String]) -> BTreeMap<String, OptionValue> {
    let mut options = BTreeMap::new();
    let mut i = 0;

    while i < tokens.len() {
        let token = &tokens[i];
        i += 1;

        let Some(flag) = token.strip_prefix("--") else {
            continue;
        };
        if flag.is_empty() {
            continue;
        }

        if let Some((name, value)) = flag.split_once('=') {
            options.insert(name.to_string(), OptionValue::Text(value.to_string()));
        } else if i < tokens.len() && !tokens[i].starts_with("--") {
            options.insert(flag.to_string(), OptionValue::Text(tokens[i].clone()));
            i += 1;
        } else {
            options.insert(flag.to_string(), OptionValue::Flag(true));
        }
    }

    options
}

/// Render options back into command-line form: `--flag` for boolean-true
/// values, `--flag value` otherwise, space-joined and trimmed. Purely
/// informational, nothing else keys off this rendering.
pub fn render_option_list(options: &BTreeMap<String, OptionValue>) -> String {
    let mut out = String::new();

    for (name, value) in options {
        match value {
            OptionValue::Flag(true) => {
                out.push_str(&format!(" --{}", name));
            }
            other => {
                out.push_str(&format!(" --{} {}", name, other));
            }
        }
    }

    out.trim().to_string()
}

#[cfg(feature = "tui")]
async fn select_from_menu(downloader: &mut Downloader) -> Result<SelectedTemplate> {
    crate::tui::show_menu_select_template(downloader).await
}

/// Without the menu feature a template must be named explicitly.
#[cfg(not(feature = "tui"))]
async fn select_from_menu(_downloader: &mut Downloader) -> Result<SelectedTemplate> {
    anyhow::bail!("No template specified. Pass --template <name>.")
}

/// The single-line non-interactive equivalent of a menu selection.
fn equivalent_command(selection: &SelectedTemplate) -> String {
    let option_list = render_option_list(&selection.options);
    if option_list.is_empty() {
        format!("yuno init --template {}", selection.template)
    } else {
        format!("yuno init --template {} {}", selection.template, option_list)
    }
}

/// Run the `init` command.
pub async fn run_init(args: InitOptions, cli_version: &str) -> Result<()> {
    let mut downloader = match &args.template_dir {
        Some(path) => {
            println!(
                "{}",
                format!("Using local templates from {}", path.display()).dimmed()
            );
            Downloader::from_local(path.clone())
        }
        None => Downloader::from_env()?,
    };

    if args.force_git {
        println!("{}", "Forcing git transport".dimmed());
        downloader.force_git();
    }

    // Template name and options, from flags or from the menu
    let mut from_menu = false;
    let mut selection = if let Some(template) = args.template {
        SelectedTemplate {
            template,
            install_dir: None,
            options: parse_option_flags(&args.passthrough),
        }
    } else {
        from_menu = true;
        select_from_menu(&mut downloader).await?
    };

    if from_menu {
        println!(
            "You can directly invoke: {}",
            equivalent_command(&selection).blue()
        );
    }

    let install_dir = match args.dir {
        Some(dir) if dir.is_absolute() => dir,
        Some(dir) => std::env::current_dir()?.join(dir),
        None => std::env::current_dir().context("Failed to resolve current directory")?,
    };
    selection.install_dir = Some(install_dir.clone());

    // Catalog snapshot, looked up exactly once per invocation
    let list = ProjectList::fetch(&mut downloader).await?;
    let Some(project) = list.find(&selection.template).cloned() else {
        let available: Vec<&str> = list.projects.iter().map(|p| p.template.as_str()).collect();
        anyhow::bail!(
            "Template '{}' not found. Available templates: {}",
            selection.template,
            available.join(", ")
        );
    };

    if let Some(warning) = project.version_warning(cli_version) {
        println!("{} {}", "Warning:".yellow(), warning);
    }

    install::install_project_sources(&mut downloader, &project.template, &install_dir).await?;

    if project.has_installer {
        let engine = args.engine.unwrap_or_else(runtime::default_engine);
        install::execute_project_installer(&mut downloader, &project, &selection, engine).await?;
    }

    println!(
        "{} Project '{}' ready in {}",
        "✔".green(),
        selection.template.green(),
        install_dir.display()
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_bare_flag() {
        let options = parse_option_flags(&tokens(&["--ssr"]));
        assert_eq!(options.get("ssr"), Some(&OptionValue::Flag(true)));
    }

    #[test]
    fn test_parse_valued_flags() {
        let options = parse_option_flags(&tokens(&["--port", "3000", "--name=demo"]));
        assert_eq!(
            options.get("port"),
            Some(&OptionValue::Text("3000".to_string()))
        );
        assert_eq!(
            options.get("name"),
            Some(&OptionValue::Text("demo".to_string()))
        );
    }

    #[test]
    fn test_parse_skips_stray_tokens() {
        let options = parse_option_flags(&tokens(&["stray", "--ssr", "--"]));
        assert_eq!(options.len(), 1);
        assert_eq!(options.get("ssr"), Some(&OptionValue::Flag(true)));
    }

    #[test]
    fn test_render_boolean_true_is_bare() {
        let mut options = BTreeMap::new();
        options.insert("ssr".to_string(), OptionValue::Flag(true));
        options.insert("port".to_string(), OptionValue::Text("3000".to_string()));
        assert_eq!(render_option_list(&options), "--port 3000 --ssr");
    }

    #[test]
    fn test_render_boolean_false_keeps_value() {
        let mut options = BTreeMap::new();
        options.insert("ssr".to_string(), OptionValue::Flag(false));
        assert_eq!(render_option_list(&options), "--ssr false");
    }

    #[test]
    fn test_render_empty_options() {
        assert_eq!(render_option_list(&BTreeMap::new()), "");
    }

    #[test]
    fn test_equivalent_command_round_trip() {
        let selection = SelectedTemplate {
            template: "blog".to_string(),
            install_dir: None,
            options: parse_option_flags(&tokens(&["--ssr", "--port", "3000"])),
        };
        assert_eq!(
            equivalent_command(&selection),
            "yuno init --template blog --port 3000 --ssr"
        );
    }
}
