use std::fs;
use std::path::{Path, PathBuf};

use crate::model::catalog::TomlCatalog;
use crate::model::config::GreeterConfig;

/// Name of the config file looked up in the working directory.
pub const CONFIG_FILE: &str = "greeter.toml";

/// Error type for config and catalog I/O
#[derive(Debug, thiserror::Error)]
pub enum GreeterError {
    #[error("could not read {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not write {path}: {source}")]
    WriteError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("could not parse {path}: {source}")]
    EditError {
        path: PathBuf,
        source: toml_edit::TomlError,
    },
    #[error("unknown config key: {0}")]
    UnknownKey(String),
    #[error("invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },
}

/// Config file to use: the explicit path if given, otherwise greeter.toml
/// in `dir` when it exists.
pub fn locate_config(explicit: Option<&Path>, dir: &Path) -> Option<PathBuf> {
    match explicit {
        Some(path) => Some(path.to_path_buf()),
        None => {
            let candidate = dir.join(CONFIG_FILE);
            candidate.is_file().then_some(candidate)
        }
    }
}

fn read_text(path: &Path) -> Result<String, GreeterError> {
    fs::read_to_string(path).map_err(|e| GreeterError::ReadError {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Read the config, returning both the parsed config and the raw
/// toml_edit document for round-trip-safe editing.
pub fn read_config(path: &Path) -> Result<(GreeterConfig, toml_edit::DocumentMut), GreeterError> {
    let text = read_text(path)?;
    let config: GreeterConfig = toml::from_str(&text).map_err(|e| GreeterError::ParseError {
        path: path.to_path_buf(),
        source: e,
    })?;
    let doc: toml_edit::DocumentMut = text.parse().map_err(|e| GreeterError::EditError {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok((config, doc))
}

/// Load the config at `path`, or defaults when there is none.
pub fn load_config(path: Option<&Path>) -> Result<GreeterConfig, GreeterError> {
    match path {
        Some(path) => Ok(read_config(path)?.0),
        None => Ok(GreeterConfig::default()),
    }
}

/// Write the config document back to disk, preserving formatting.
pub fn write_config(path: &Path, doc: &toml_edit::DocumentMut) -> Result<(), GreeterError> {
    fs::write(path, doc.to_string()).map_err(|e| GreeterError::WriteError {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Set `section.key` in the config document. The value is checked against
/// the key's type before anything is written.
pub fn set_value(doc: &mut toml_edit::DocumentMut, key: &str, value: &str) -> Result<(), GreeterError> {
    let invalid = || GreeterError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
    };
    let (section, field) = key
        .split_once('.')
        .ok_or_else(|| GreeterError::UnknownKey(key.to_string()))?;

    let item = match (section, field) {
        ("greeting", "language" | "default_language") | ("catalog", "path") => {
            toml_edit::value(value)
        }
        ("greeting", "max_recent" | "max_attempts" | "interval_secs") => {
            let n: i64 = value.parse().map_err(|_| invalid())?;
            if n < 0 {
                return Err(invalid());
            }
            toml_edit::value(n)
        }
        _ => return Err(GreeterError::UnknownKey(key.to_string())),
    };

    if !doc.contains_key(section) {
        doc[section] = toml_edit::Item::Table(toml_edit::Table::new());
    }
    doc[section][field] = item;
    Ok(())
}

/// Load the greeting catalog at `path`, or the built-in catalog.
pub fn load_catalog(path: Option<&Path>) -> Result<TomlCatalog, GreeterError> {
    let Some(path) = path else {
        return Ok(TomlCatalog::builtin());
    };
    let text = read_text(path)?;
    toml::from_str(&text).map_err(|e| GreeterError::ParseError {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Catalog path named by the config, relative to the config's directory.
pub fn configured_catalog_path(config: &GreeterConfig, config_path: Option<&Path>) -> Option<PathBuf> {
    let rel = config.catalog.path.as_deref()?;
    let base = config_path.and_then(Path::parent).unwrap_or(Path::new("."));
    Some(base.join(rel))
}
