//! Config file upgrades: detect and add keys missing from older files.

use super::{Config, EXPECTED_KEYS};
use crate::errors::{AppError, AppResult};
use serde_yaml::{Mapping, Value};
use std::fs;
use std::path::Path;

fn read_mapping(path: &Path) -> AppResult<Mapping> {
    let content = fs::read_to_string(path).map_err(|_| AppError::ConfigLoad)?;
    match serde_yaml::from_str::<Value>(&content)? {
        Value::Mapping(map) => Ok(map),
        Value::Null => Ok(Mapping::new()),
        _ => Err(AppError::Config(format!(
            "{} is not a YAML mapping",
            path.display()
        ))),
    }
}

/// Expected keys absent from the file.
pub fn missing_keys(path: &Path) -> AppResult<Vec<&'static str>> {
    let map = read_mapping(path)?;
    Ok(EXPECTED_KEYS
        .into_iter()
        .filter(|k| !map.contains_key(Value::String((*k).to_string())))
        .collect())
}

/// Add every missing key with its default value. Existing values are never
/// touched. Returns the keys that were added.
pub fn fill_missing_keys(path: &Path) -> AppResult<Vec<&'static str>> {
    let mut map = read_mapping(path)?;
    let defaults = match serde_yaml::to_value(Config::default())? {
        Value::Mapping(m) => m,
        _ => Mapping::new(),
    };

    let mut added = Vec::new();
    for key in EXPECTED_KEYS {
        let k = Value::String(key.to_string());
        if map.contains_key(&k) {
            continue;
        }
        let value = if key == "user_id" {
            Value::String(uuid::Uuid::new_v4().to_string())
        } else {
            defaults.get(&k).cloned().unwrap_or(Value::Null)
        };
        map.insert(k, value);
        added.push(key);
    }

    if added.is_empty() {
        return Ok(added);
    }

    let serialized = serde_yaml::to_string(&Value::Mapping(map))?;

    // document the backend switch right after its line
    let mut content = String::new();
    for line in serialized.lines() {
        content.push_str(line);
        content.push('\n');
        if line.starts_with("backend:") && added.contains(&"backend") {
            content.push_str(
                "# backend options:\n\
                 #   local  → SQLite file at `database`\n\
                 #   remote → Supabase REST API (supabase_url, supabase_anon_key)\n",
            );
        }
    }
    fs::write(path, content).map_err(|_| AppError::ConfigSave)?;
    Ok(added)
}
