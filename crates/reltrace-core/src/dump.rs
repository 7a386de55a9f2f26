use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::database::DatabaseConfig;
use crate::error::{ReltraceError, ReltraceResult};

/// Which rows go into the dump alongside the schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DumpMode {
    StructureOnly,
    #[default]
    StructureAndData,
    /// All rows except the ones related to the root record.
    StructureAndDataExcluding,
    /// Only the rows related to the root record.
    StructureAndDataIncludingOnly,
}

impl DumpMode {
    pub const ALL: [DumpMode; 4] = [
        Self::StructureOnly,
        Self::StructureAndData,
        Self::StructureAndDataExcluding,
        Self::StructureAndDataIncludingOnly,
    ];

    /// Look up a mode by its 1-based menu number.
    pub fn from_ordinal(n: u32) -> Option<Self> {
        Self::ALL.get((n as usize).checked_sub(1)?).copied()
    }

    pub fn ordinal(&self) -> u32 {
        match self {
            Self::StructureOnly => 1,
            Self::StructureAndData => 2,
            Self::StructureAndDataExcluding => 3,
            Self::StructureAndDataIncludingOnly => 4,
        }
    }

    pub fn requires_root(&self) -> bool {
        matches!(
            self,
            Self::StructureAndDataExcluding | Self::StructureAndDataIncludingOnly
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::StructureOnly => "structure-only",
            Self::StructureAndData => "structure-and-data",
            Self::StructureAndDataExcluding => "structure-and-data-excluding",
            Self::StructureAndDataIncludingOnly => "structure-and-data-including-only",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::StructureOnly => "Structure Only",
            Self::StructureAndData => "Structure + All Data",
            Self::StructureAndDataExcluding => "Structure + Data (Excluding)",
            Self::StructureAndDataIncludingOnly => "Structure + Data (Including Only)",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::StructureOnly => "Export database structure without data",
            Self::StructureAndData => "Export complete database structure and all data",
            Self::StructureAndDataExcluding => {
                "Export all data except records related to specified root"
            }
            Self::StructureAndDataIncludingOnly => "Export only records related to specified root",
        }
    }
}

impl fmt::Display for DumpMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DumpTarget {
    #[default]
    #[serde(rename = "file")]
    ToFile,
    #[serde(rename = "database")]
    ToDatabase,
}

impl DumpTarget {
    pub const ALL: [DumpTarget; 2] = [Self::ToFile, Self::ToDatabase];

    /// Look up a target by its 1-based menu number.
    pub fn from_ordinal(n: u32) -> Option<Self> {
        Self::ALL.get((n as usize).checked_sub(1)?).copied()
    }

    pub fn ordinal(&self) -> u32 {
        match self {
            Self::ToFile => 1,
            Self::ToDatabase => 2,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ToFile => "file",
            Self::ToDatabase => "database",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::ToFile => "Export to File",
            Self::ToDatabase => "Export to Database",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::ToFile => "Save dump to SQL file",
            Self::ToDatabase => "Import directly to another database",
        }
    }
}

impl fmt::Display for DumpTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything the export engine needs to run one dump.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DumpConfig {
    pub source_config: DatabaseConfig,
    pub mode: DumpMode,
    pub target: DumpTarget,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_config: Option<DatabaseConfig>,
    /// Empty means the engine picks the file name.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub output_path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub root_table: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub root_primary_key: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub include_tables: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub exclude_tables: Vec<String>,
}

impl DumpConfig {
    pub fn new(source_config: DatabaseConfig, mode: DumpMode, target: DumpTarget) -> Self {
        Self {
            source_config,
            mode,
            target,
            target_config: None,
            output_path: String::new(),
            root_table: None,
            root_primary_key: None,
            include_tables: Vec::new(),
            exclude_tables: Vec::new(),
        }
    }

    pub fn from_file(path: &Path) -> ReltraceResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ReltraceError::Config(format!("Cannot read {}: {e}", path.display())))?;
        // JSON documents parse as YAML too.
        serde_yaml::from_str(&content)
            .map_err(|e| ReltraceError::Config(format!("Invalid dump config: {e}")))
    }

    pub fn validate(&self) -> ReltraceResult<()> {
        match self.violations().into_iter().next() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    /// Every broken invariant, in a stable order.
    pub fn violations(&self) -> Vec<ReltraceError> {
        let mut errors = Vec::new();

        if let Err(e) = self.source_config.validate() {
            errors.push(prefixed("source", e));
        }

        let root_table = self.root_table.as_deref().map(str::trim);
        let root_key = self.root_primary_key.as_deref().map(str::trim);
        if self.mode.requires_root() {
            if root_table.map_or(true, str::is_empty) {
                errors.push(ReltraceError::validation(
                    "root_table",
                    format!("required for mode {}", self.mode),
                ));
            }
            if root_key.map_or(true, str::is_empty) {
                errors.push(ReltraceError::validation(
                    "root_primary_key",
                    format!("required for mode {}", self.mode),
                ));
            }
        } else if self.root_table.is_some() || self.root_primary_key.is_some() {
            errors.push(ReltraceError::validation(
                "root_table",
                format!("not used by mode {}", self.mode),
            ));
        }

        match (self.target, &self.target_config) {
            (DumpTarget::ToDatabase, None) => errors.push(ReltraceError::validation(
                "target_config",
                "required when exporting to a database",
            )),
            (DumpTarget::ToDatabase, Some(target)) => {
                if let Err(e) = target.validate() {
                    errors.push(prefixed("target", e));
                }
            }
            (DumpTarget::ToFile, Some(_)) => errors.push(ReltraceError::validation(
                "target_config",
                "not used when exporting to a file",
            )),
            (DumpTarget::ToFile, None) => {}
        }

        if !self.include_tables.is_empty() && !self.exclude_tables.is_empty() {
            errors.push(ReltraceError::validation(
                "include_tables",
                "cannot be combined with exclude_tables",
            ));
        }

        errors
    }
}

fn prefixed(scope: &str, err: ReltraceError) -> ReltraceError {
    match err {
        ReltraceError::Validation { field, reason } => {
            ReltraceError::validation(format!("{scope}.{field}"), reason)
        }
        other => other,
    }
}
