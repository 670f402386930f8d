//! Keep an existing config file in step with the current `Config` fields.
//! Older files miss keys added later; serde fills them at load time, these
//! helpers report them and write them back to disk.

use super::Config;
use crate::errors::{AppError, AppResult};
use serde_yaml::{Mapping, Value};
use std::fs;
use std::path::Path;

fn read_mapping(path: &Path) -> AppResult<Mapping> {
    let content = fs::read_to_string(path).map_err(|_| AppError::ConfigLoad)?;
    let yaml: Value = serde_yaml::from_str(&content)
        .map_err(|e| AppError::Config(format!("{}: {}", path.display(), e)))?;

    match yaml {
        Value::Mapping(map) => Ok(map),
        Value::Null => Ok(Mapping::new()),
        _ => Err(AppError::Config(format!(
            "{}: top level is not a mapping",
            path.display()
        ))),
    }
}

fn reference_mapping() -> AppResult<Mapping> {
    match serde_yaml::to_value(Config::default()).map_err(|e| AppError::Config(e.to_string()))? {
        Value::Mapping(map) => Ok(map),
        _ => Err(AppError::Other("default config is not a mapping".into())),
    }
}

/// Keys present in the current `Config` but absent from the file.
pub fn missing_keys(path: &Path) -> AppResult<Vec<String>> {
    let on_disk = read_mapping(path)?;
    let reference = reference_mapping()?;

    Ok(reference
        .keys()
        .filter(|k| !on_disk.contains_key(*k))
        .filter_map(|k| k.as_str().map(str::to_string))
        .collect())
}

/// Add every missing key with its default value, leaving existing values
/// untouched. Returns the keys that were added.
pub fn fill_missing(path: &Path) -> AppResult<Vec<String>> {
    let mut on_disk = read_mapping(path)?;
    let reference = reference_mapping()?;
    let mut added = Vec::new();

    for (k, v) in reference {
        if !on_disk.contains_key(&k) {
            if let Some(name) = k.as_str() {
                added.push(name.to_string());
            }
            on_disk.insert(k, v);
        }
    }

    if !added.is_empty() {
        let serialized = serde_yaml::to_string(&Value::Mapping(on_disk))
            .map_err(|e| AppError::Config(e.to_string()))?;
        fs::write(path, serialized).map_err(|_| AppError::ConfigSave)?;
    }

    Ok(added)
}
