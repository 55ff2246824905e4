// Settings file loaders

use crate::{ConfigError, Result};
use serde_json::Value;
use std::fs;
use std::path::Path;

/// Supported settings file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Json,
    Toml,
    Env,
}

impl FileFormat {
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "json" => Some(FileFormat::Json),
            "toml" => Some(FileFormat::Toml),
            "env" => Some(FileFormat::Env),
            _ => None,
        }
    }
}

/// Reads a settings file into a JSON object.
pub struct ConfigLoader {
    format: FileFormat,
}

impl ConfigLoader {
    pub fn new(format: FileFormat) -> Self {
        Self { format }
    }

    /// Pick the format from the file extension.
    pub fn auto(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let ext = path
            .extension()
            .and_then(|s| s.to_str())
            .ok_or_else(|| ConfigError::LoadError(format!("No file extension: {}", path.display())))?;

        let format = FileFormat::from_extension(ext)
            .ok_or_else(|| ConfigError::LoadError(format!("Unsupported format: {}", ext)))?;

        Ok(Self::new(format))
    }

    pub fn load_file(&self, path: impl AsRef<Path>) -> Result<Value> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            ConfigError::LoadError(format!("Failed to read {}: {}", path.display(), e))
        })?;

        self.parse(&content)
    }

    pub fn parse(&self, content: &str) -> Result<Value> {
        match self.format {
            FileFormat::Json => parse_json(content),
            FileFormat::Toml => parse_toml(content),
            FileFormat::Env => parse_env(content),
        }
    }
}

fn parse_json(content: &str) -> Result<Value> {
    serde_json::from_str(content)
        .map_err(|e| ConfigError::ParseError(format!("JSON parse error: {}", e)))
}

fn parse_toml(content: &str) -> Result<Value> {
    let table: toml::Table = toml::from_str(content)
        .map_err(|e| ConfigError::ParseError(format!("TOML parse error: {}", e)))?;

    serde_json::to_value(table)
        .map_err(|e| ConfigError::ParseError(format!("TOML to JSON conversion error: {}", e)))
}

/// `.env` syntax via dotenvy; keys are lower-cased and a `FORMRULE_` prefix is dropped.
fn parse_env(content: &str) -> Result<Value> {
    let mut map = serde_json::Map::new();

    for item in dotenvy::from_read_iter(content.as_bytes()) {
        let (key, value) =
            item.map_err(|e| ConfigError::ParseError(format!("env parse error: {}", e)))?;
        let key = key.strip_prefix("FORMRULE_").unwrap_or(&key).to_lowercase();
        map.insert(key, Value::String(value));
    }

    Ok(Value::Object(map))
}
