// Run configuration: where to read from, where to write, which tables

use crate::error::ExportError;
use chrono::{DateTime, Local};
use std::fmt;
use std::path::{Path, PathBuf};

/// Location of Clear's database inside the user's home directory
const CLEAR_DB_RELATIVE_PATH: &str = "Library/Containers/com.realmacsoftware.clear.mac/Data/Library/Application Support/com.realmacsoftware.clear.mac/LocalTasks.sqlite";

const BACKUP_SUFFIX: &str = "LocalTasks.backup.sqlite";

/// Which record shape a table decodes into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableKind {
    Task,
    List,
}

/// A table to export and the shape of its rows
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSpec {
    pub name: String,
    pub kind: TableKind,
}

impl TableSpec {
    pub fn new(name: impl Into<String>, kind: TableKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }

    /// The tables Clear keeps: open tasks, completed tasks and lists
    pub fn defaults() -> Vec<TableSpec> {
        vec![
            TableSpec::new("tasks", TableKind::Task),
            TableSpec::new("completed_tasks", TableKind::Task),
            TableSpec::new("lists", TableKind::List),
        ]
    }
}

#[derive(Debug, Clone)]
pub struct ExportConfig {
    /// Clear database to back up
    pub source: PathBuf,
    /// Directory that receives the backup copy
    pub backup_dir: PathBuf,
    /// Directory that receives the CSV files
    pub output_dir: PathBuf,
    pub tables: Vec<TableSpec>,
}

impl ExportConfig {
    /// Export `source` into `backups/` and the working directory
    pub fn new(source: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            backup_dir: PathBuf::from("backups"),
            output_dir: PathBuf::from("."),
            tables: TableSpec::defaults(),
        }
    }

    /// Configuration for the current user's Clear installation
    pub fn for_current_user() -> Result<Self, ExportError> {
        Ok(Self::new(default_source_path()?))
    }
}

/// `$HOME/Library/Containers/.../LocalTasks.sqlite`
pub fn default_source_path() -> Result<PathBuf, ExportError> {
    let home = dirs::home_dir().ok_or(ExportError::HomeDirUnavailable)?;
    Ok(home.join(CLEAR_DB_RELATIVE_PATH))
}

/// Time-derived prefix shared by every file a single run writes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunStamp(String);

impl RunStamp {
    /// Format a point in time, e.g. `2026Oct14T153000`
    pub fn from_time(time: DateTime<Local>) -> Self {
        Self(time.format("%Y%b%dT%H%M%S").to_string())
    }

    /// Stamp for `time` that no earlier run has used in `backup_dir`
    ///
    /// Appends `-1`, `-2`, ... when a backup with the plain stamp already exists.
    pub fn allocate(time: DateTime<Local>, backup_dir: &Path) -> Self {
        let base = Self::from_time(time);
        if !base.backup_path(backup_dir).exists() {
            return base;
        }

        let mut n = 1;
        loop {
            let candidate = Self(format!("{}-{}", base.0, n));
            if !candidate.backup_path(backup_dir).exists() {
                return candidate;
            }
            n += 1;
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn backup_path(&self, backup_dir: &Path) -> PathBuf {
        backup_dir.join(format!("{}{}", self.0, BACKUP_SUFFIX))
    }

    pub fn csv_path(&self, output_dir: &Path, table: &str) -> PathBuf {
        output_dir.join(format!("{}_{}.csv", self.0, table))
    }
}

impl fmt::Display for RunStamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
