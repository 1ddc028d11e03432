//! Module naming rules

/// Prefix of first-party module directories.
pub const MOD_PREFIX: &str = "mod_";

/// Marker carried by external module packages installed into a project.
pub const EXTERNAL_MOD_MARKER: &str = "yunomod_";

/// npm scope used for generated module manifests.
const NPM_SCOPE: &str = "@yuno";

/// Auto-prefix a raw name, then canonicalize it. Returns `None` when the
/// name cannot be canonicalized.
pub fn normalize_module_name(raw: &str) -> Option<String> {
    let name = if !raw.starts_with(MOD_PREFIX) && !raw.contains(EXTERNAL_MOD_MARKER) {
        format!("{}{}", MOD_PREFIX, raw)
    } else {
        raw.to_string()
    };

    to_mod_dir_name(&name)
}

/// Canonicalize a prefixed name into a module directory name.
///
/// Lowercases the name and rejects anything that is not `[a-z0-9_]`, as
/// well as names with no body beyond the prefix.
pub fn to_mod_dir_name(raw: &str) -> Option<String> {
    let name = raw.trim().to_ascii_lowercase();

    if name.is_empty() || name == MOD_PREFIX {
        return None;
    }

    let valid = name
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_');
    if !valid {
        return None;
    }

    Some(name)
}

/// Derive the npm package name embedded in a module's manifest.
pub fn to_npm_module_name(mod_name: &str) -> String {
    format!("{}/{}", NPM_SCOPE, mod_name.replace('_', "-"))
}
