//! RON definition loading shared by every data-driven module.

use std::fs;
use std::path::Path;

use bevy::prelude::*;
use serde::de::DeserializeOwned;

use super::error::DataLoadError;

/// Root of the definition files.
pub const DATA_ROOT: &str = "assets/data";

/// A RON-authored definition that can check its own values.
pub trait Definition: DeserializeOwned {
    fn validate(&self) -> Result<(), DataLoadError>;
}

/// Parse and validate a definition from RON text. `origin` names it in errors.
pub fn parse_definition<T: Definition>(origin: &str, contents: &str) -> Result<T, DataLoadError> {
    let definition: T = ron::from_str(contents).map_err(|e| DataLoadError::ParseError {
        path: origin.to_string(),
        details: e.to_string(),
    })?;
    definition.validate()?;
    Ok(definition)
}

/// Read, parse and validate one definition file.
pub fn read_definition<T: Definition>(path: &Path) -> Result<T, DataLoadError> {
    if !path.exists() {
        return Err(DataLoadError::FileNotFound(path.display().to_string()));
    }

    let contents = fs::read_to_string(path).map_err(|e| DataLoadError::ReadError {
        path: path.display().to_string(),
        details: e.to_string(),
    })?;

    parse_definition(&path.display().to_string(), &contents)
}

/// Load every `.ron` definition in `dir`, keyed by file stem.
///
/// Files that fail to load are logged and skipped.
pub fn read_definition_dir<T: Definition>(dir: &Path) -> Vec<(String, T)> {
    let Ok(entries) = fs::read_dir(dir) else {
        warn!("Definitions directory not found: {:?}", dir);
        return Vec::new();
    };

    let mut definitions = Vec::new();
    for entry in entries.flatten() {
        let path = entry.path();
        if !path.extension().is_some_and(|ext| ext == "ron") {
            continue;
        }

        let key = path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .unwrap_or("unknown")
            .to_string();

        match read_definition::<T>(&path) {
            Ok(definition) => definitions.push((key, definition)),
            Err(e) => error!("Failed to load definition {:?}: {}", path, e),
        }
    }

    definitions.sort_by(|(a, _), (b, _)| a.cmp(b));
    definitions
}
