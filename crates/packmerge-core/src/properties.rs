use std::collections::BTreeMap;
use std::path::Path;

use packmerge_util::errors::PackmergeError;

/// Loads a `.packmerge.env` file (shell-style `KEY=value` lines).
///
/// The file holds signing passwords and other secrets that should stay out
/// of `Packmerge.toml`. A missing file yields an empty map. Surrounding
/// double quotes around a value are removed.
pub fn load_env_file(path: &Path) -> miette::Result<BTreeMap<String, String>> {
    let mut map = BTreeMap::new();
    if !path.is_file() {
        return Ok(map);
    }
    let content = std::fs::read_to_string(path).map_err(PackmergeError::Io)?;
    for line in content.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let trimmed = trimmed.strip_prefix("export ").unwrap_or(trimmed);
        match trimmed.split_once('=') {
            Some((key, value)) => {
                let value = value.trim();
                let value = value
                    .strip_prefix('"')
                    .and_then(|v| v.strip_suffix('"'))
                    .unwrap_or(value);
                map.insert(key.trim().to_string(), value.to_string());
            }
            None => tracing::warn!("Ignoring malformed line in {}: {trimmed}", path.display()),
        }
    }
    Ok(map)
}

/// Interpolate `${env:VAR}` and `${env:VAR:-fallback}` references.
///
/// Values come from `env_overrides` first (the `.packmerge.env` contents),
/// then the process environment, then the fallback. An unset variable
/// without a fallback becomes the empty string. An unterminated reference
/// is left as-is.
pub fn interpolate(input: &str, env_overrides: &BTreeMap<String, String>) -> String {
    const OPEN: &str = "${env:";
    let mut out = String::with_capacity(input.len());
    let mut rest = input;
    while let Some(start) = rest.find(OPEN) {
        let after = &rest[start + OPEN.len()..];
        let Some(end) = after.find('}') else {
            break;
        };
        out.push_str(&rest[..start]);
        let reference = &after[..end];
        let (key, fallback) = match reference.split_once(":-") {
            Some((key, fallback)) => (key, Some(fallback)),
            None => (reference, None),
        };
        let value = env_overrides
            .get(key)
            .cloned()
            .or_else(|| std::env::var(key).ok())
            .or_else(|| fallback.map(str::to_string))
            .unwrap_or_default();
        out.push_str(&value);
        rest = &after[end + 1..];
    }
    out.push_str(rest);
    out
}

/// Interpolate every string inside a parsed TOML value, in place.
///
/// Substituted values are never re-parsed as TOML, so quotes and
/// backslashes in secrets are kept verbatim. Table keys are left untouched.
pub fn interpolate_value(value: &mut toml::Value, env_overrides: &BTreeMap<String, String>) {
    match value {
        toml::Value::String(s) => *s = interpolate(s, env_overrides),
        toml::Value::Array(items) => {
            for item in items {
                interpolate_value(item, env_overrides);
            }
        }
        toml::Value::Table(table) => {
            for (_, item) in table.iter_mut() {
                interpolate_value(item, env_overrides);
            }
        }
        _ => {}
    }
}
