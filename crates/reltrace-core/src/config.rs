use serde::{Deserialize, Serialize};
use std::path::Path;

use chrono::{DateTime, Local};

use crate::database::DatabaseType;
use crate::error::{ReltraceError, ReltraceResult};

/// Top-level settings file structure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_directory")]
    pub directory: String,
    #[serde(default = "default_format")]
    pub format: String,
    /// Append a timestamp to suggested file names.
    #[serde(default = "default_true")]
    pub timestamp: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: default_directory(),
            format: default_format(),
            timestamp: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UiConfig {
    #[serde(default = "default_theme")]
    pub theme: String,
    #[serde(default = "default_true")]
    pub animate_progress: bool,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            theme: default_theme(),
            animate_progress: true,
        }
    }
}

fn default_directory() -> String {
    ".".to_string()
}

fn default_format() -> String {
    "sql".to_string()
}

fn default_theme() -> String {
    "default".to_string()
}

fn default_true() -> bool {
    true
}

impl AppConfig {
    pub fn from_file(path: &Path) -> ReltraceResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ReltraceError::Config(format!("Cannot read {}: {e}", path.display())))?;
        serde_yaml::from_str(&content)
            .map_err(|e| ReltraceError::Config(format!("Invalid YAML: {e}")))
    }

    /// Load `path` when given, otherwise fall back to defaults.
    pub fn load(path: Option<&Path>) -> ReltraceResult<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }
}

impl OutputConfig {
    /// File name offered when the user leaves the output path empty.
    pub fn suggested_path(&self, db_type: DatabaseType, now: DateTime<Local>) -> String {
        let stem = if self.timestamp {
            format!("{}_{}", db_type, now.format("%Y%m%d_%H%M%S"))
        } else {
            db_type.to_string()
        };
        let dir = self.directory.trim_end_matches('/');
        let dir = if dir.is_empty() { "." } else { dir };
        format!("{dir}/{stem}.{}", self.format)
    }
}
