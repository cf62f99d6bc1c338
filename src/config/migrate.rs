//! Configuration file upgrades: detect keys missing from an older
//! `nutriauth.conf` and fill them with their defaults.

use serde_yaml::{Mapping, Value};
use std::fs;
use std::path::Path;

use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{info, success};

/// Expected keys with the default value written when they are absent.
fn default_entries() -> AppResult<Mapping> {
    match serde_yaml::to_value(Config::default())? {
        Value::Mapping(map) => Ok(map),
        _ => Err(AppError::Config("default configuration is not a mapping".into())),
    }
}

fn read_mapping(path: &Path) -> AppResult<Mapping> {
    let content = fs::read_to_string(path)?;
    match serde_yaml::from_str::<Value>(&content)? {
        Value::Mapping(map) => Ok(map),
        Value::Null => Ok(Mapping::new()),
        _ => Err(AppError::Config(format!(
            "{} does not contain a YAML mapping",
            path.display()
        ))),
    }
}

/// Return the names of the keys missing from the config file.
pub fn missing_fields(path: &Path) -> AppResult<Vec<String>> {
    let current = read_mapping(path)?;
    let mut missing = Vec::new();

    for key in default_entries()?.keys() {
        if !current.contains_key(key)
            && let Some(name) = key.as_str()
        {
            missing.push(name.to_string());
        }
    }

    Ok(missing)
}

/// Add every missing key with its default value.
///
/// Returns:
///   Ok(true)  → config file rewritten
///   Ok(false) → nothing to do
pub fn migrate_config(path: &Path) -> AppResult<bool> {
    let mut current = read_mapping(path)?;
    let mut changed = false;

    for (key, value) in default_entries()? {
        if !current.contains_key(&key) {
            info(format!(
                "Adding missing config key '{}'",
                key.as_str().unwrap_or_default()
            ));
            current.insert(key, value);
            changed = true;
        }
    }

    if changed {
        let yaml = serde_yaml::to_string(&Value::Mapping(current))?;
        fs::write(path, yaml)?;
        success(format!("Configuration updated: {}", path.display()));
    }

    Ok(changed)
}
