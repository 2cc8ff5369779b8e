// Editor configuration, persisted as TOML in the platform config directory.

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    io::{self, ErrorKind},
    path::{Path, PathBuf},
};

use crate::document::ListType;
use crate::schema::DEFAULT_MAX_INDENT;

const QUALIFIER: &str = "org";
const ORGANIZATION: &str = "Blockedit";
const APPLICATION: &str = "blockedit";
const CONFIG_FILE_NAME: &str = "config.toml";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EditorConfig {
    /// List type used when a toggle command is created without an explicit one
    #[serde(default = "default_list_type")]
    pub default_list_type: ListType,
    /// Maximum nesting depth the schema accepts
    #[serde(default = "default_max_indent")]
    pub max_indent: u32,
}

fn default_list_type() -> ListType {
    ListType::Bulleted
}

fn default_max_indent() -> u32 {
    DEFAULT_MAX_INDENT
}

impl Default for EditorConfig {
    fn default() -> Self {
        EditorConfig {
            default_list_type: default_list_type(),
            max_indent: default_max_indent(),
        }
    }
}

impl EditorConfig {
    /// Load from the default location, falling back to defaults
    pub fn load() -> Self {
        config_file_path()
            .filter(|path| path.exists())
            .and_then(|path| load_config(&path))
            .unwrap_or_default()
    }
}

pub fn config_file_path() -> Option<PathBuf> {
    ProjectDirs::from(QUALIFIER, ORGANIZATION, APPLICATION)
        .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
}

pub fn load_config(path: &Path) -> Option<EditorConfig> {
    let contents = fs::read_to_string(path).ok()?;
    match toml::from_str::<EditorConfig>(&contents) {
        Ok(config) => Some(config),
        Err(err) => {
            eprintln!("Failed to parse config file {}: {err}", path.display());
            None
        }
    }
}

pub fn save_config(path: &Path, config: &EditorConfig) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let toml = toml::to_string_pretty(config).map_err(|err| {
        io::Error::new(ErrorKind::Other, format!("toml serialization error: {err}"))
    })?;

    fs::write(path, toml)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_config() {
        let config: EditorConfig =
            toml::from_str("default_list_type = \"numbered\"\nmax_indent = 4\n").unwrap();
        assert_eq!(config.default_list_type, ListType::Numbered);
        assert_eq!(config.max_indent, 4);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let config: EditorConfig = toml::from_str("").unwrap();
        assert_eq!(config, EditorConfig::default());
    }

    #[test]
    fn test_roundtrip() {
        let config = EditorConfig {
            default_list_type: ListType::Numbered,
            max_indent: 3,
        };
        let toml = toml::to_string_pretty(&config).unwrap();
        let parsed: EditorConfig = toml::from_str(&toml).unwrap();
        assert_eq!(parsed, config);
    }
}
