//! Product identity and template source configuration

/// Template whose archive is overlaid on top of every other template.
pub const CORE_TEMPLATE: &str = "core";

/// Catalog document listing the available templates.
pub const PROJECT_LIST_KEY: &str = "projects.yaml";

/// Default URL for fetching templates over HTTP.
pub const DEFAULT_TEMPLATE_URL: &str = "https://templates.yunojs.dev/registry";

/// Environment variable overriding the template URL.
pub const TEMPLATE_URL_ENV: &str = "YUNO_TEMPLATE_URL";

/// Default git remote holding the template registry content.
pub const DEFAULT_TEMPLATE_GIT: &str = "https://github.com/yunojs/templates.git";

/// Environment variable overriding the template git remote.
pub const TEMPLATE_GIT_ENV: &str = "YUNO_TEMPLATE_GIT";

/// User agent string for HTTP requests.
pub const USER_AGENT: &str = "yuno-tools";

/// Upgrade command shown in version warnings.
pub const UPGRADE_COMMAND: &str = "cargo install yuno-tools --force";

/// Resolve the template base URL, honoring the env override.
pub fn template_url() -> String {
    std::env::var(TEMPLATE_URL_ENV).unwrap_or_else(|_| DEFAULT_TEMPLATE_URL.to_string())
}

/// Resolve the template git remote, honoring the env override.
pub fn template_git() -> String {
    std::env::var(TEMPLATE_GIT_ENV).unwrap_or_else(|_| DEFAULT_TEMPLATE_GIT.to_string())
}
