//! Template selection prompts

use crate::catalog::{OptionKind, ProjectList};
use crate::init::{OptionValue, SelectedTemplate};
use crate::transport::Downloader;
use anyhow::Result;
use std::collections::BTreeMap;

/// Show the template menu and collect the template's options.
///
/// Prompt errors, including user cancellation, propagate to the caller so a
/// cancelled menu ends the command with a non-zero exit.
pub async fn show_menu_select_template(downloader: &mut Downloader) -> Result<SelectedTemplate> {
    cliclack::intro("yuno")?;

    let spinner = cliclack::spinner();
    spinner.start("Loading templates...");

    let list = match ProjectList::fetch(downloader).await {
        Ok(list) => list,
        Err(e) => {
            spinner.stop("Failed to load templates");
            return Err(e);
        }
    };

    spinner.stop("Templates loaded");

    if list.projects.is_empty() {
        anyhow::bail!("No templates found.");
    }

    // Use indices to avoid borrow issues
    let mut select = cliclack::select("Select a template");
    for (idx, item) in list.projects.iter().enumerate() {
        select = select.item(idx, &item.template, item.description.as_deref().unwrap_or(""));
    }

    let selected_idx: usize = select.interact()?;
    let item = &list.projects[selected_idx];

    let mut options = BTreeMap::new();
    for spec in &item.options {
        match spec.kind {
            OptionKind::Flag => {
                let enabled: bool = cliclack::confirm(&spec.label)
                    .initial_value(spec.default.as_deref() == Some("true"))
                    .interact()?;
                // Only affirmative flags are recorded, which keeps the
                // echoed command minimal
                if enabled {
                    options.insert(spec.name.clone(), OptionValue::Flag(true));
                }
            }
            OptionKind::Text => {
                let value: String = cliclack::input(&spec.label)
                    .default_input(spec.default.as_deref().unwrap_or(""))
                    .interact()?;
                if !value.is_empty() {
                    options.insert(spec.name.clone(), OptionValue::Text(value));
                }
            }
        }
    }

    Ok(SelectedTemplate {
        template: item.template.clone(),
        install_dir: None,
        options,
    })
}
