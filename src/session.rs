// Export session: backup, open, export each table

use crate::config::{ExportConfig, RunStamp, TableKind, TableSpec};
use crate::copy::copy_file;
use crate::error::ExportError;
use crate::export::{TableExport, export_table};
use crate::models::{List, Task};
use chrono::{DateTime, Local};
use rusqlite::{Connection, OpenFlags};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info};

/// Everything a table export needs from the current run
pub struct ExportSession {
    db: Connection,
    stamp: RunStamp,
    output_dir: PathBuf,
}

impl ExportSession {
    /// Open a backup copy read-only and confirm it is a readable database
    pub fn open(backup: &Path, stamp: RunStamp, output_dir: impl Into<PathBuf>) -> Result<Self, ExportError> {
        let db = Connection::open_with_flags(backup, OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX)
            .map_err(|e| ExportError::DbOpen {
                path: backup.to_path_buf(),
                source: e,
            })?;

        // Reading the schema forces SQLite to parse the file header
        db.query_row("SELECT count(*) FROM sqlite_master", [], |row| row.get::<_, i64>(0))
            .map_err(|e| ExportError::DbPing {
                path: backup.to_path_buf(),
                source: e,
            })?;

        Ok(Self {
            db,
            stamp,
            output_dir: output_dir.into(),
        })
    }

    /// Export one table to `<output_dir>/<stamp>_<table>.csv`
    pub fn export(&self, spec: &TableSpec) -> Result<TableExport, ExportError> {
        let output = self.stamp.csv_path(&self.output_dir, &spec.name);
        debug!(table = %spec.name, path = ?output, "export: starting");

        match spec.kind {
            TableKind::Task => export_table::<Task>(&self.db, &spec.name, &output),
            TableKind::List => export_table::<List>(&self.db, &spec.name, &output),
        }
    }
}

/// Result of a per-table export within a run
#[derive(Debug)]
pub struct TableOutcome {
    pub table: String,
    pub result: Result<TableExport, ExportError>,
}

/// Per-table outcomes of a completed run
#[derive(Debug)]
pub struct RunReport {
    pub stamp: RunStamp,
    pub backup: PathBuf,
    pub outcomes: Vec<TableOutcome>,
}

impl RunReport {
    pub fn failed(&self) -> impl Iterator<Item = &TableOutcome> {
        self.outcomes.iter().filter(|o| o.result.is_err())
    }

    pub fn has_failures(&self) -> bool {
        self.failed().next().is_some()
    }

    /// Process exit status: 0 when every table exported, 1 on partial success
    pub fn exit_code(&self) -> i32 {
        if self.has_failures() { 1 } else { 0 }
    }

    /// Log one line per table
    pub fn log_summary(&self) {
        for outcome in &self.outcomes {
            match &outcome.result {
                Ok(export) => info!(
                    table = %outcome.table,
                    rows_written = export.rows_written,
                    rows_skipped = export.rows_skipped,
                    "Table exported"
                ),
                Err(e) => error!(table = %outcome.table, error = %e, "Table failed"),
            }
        }
    }
}

/// Create `dir` unless it already exists
fn ensure_backup_dir(dir: &Path) -> Result<(), ExportError> {
    match fs::create_dir(dir) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists => Ok(()),
        Err(e) => Err(ExportError::BackupDirUnavailable {
            path: dir.to_path_buf(),
            source: e,
        }),
    }
}

/// Back up the Clear database and export every configured table from the backup
///
/// Errors before the backup is open are returned; table failures are logged and
/// recorded in the report so the remaining tables still run.
pub fn run(config: &ExportConfig) -> Result<RunReport, ExportError> {
    run_at(config, Local::now())
}

/// `run` with the run stamp taken from `started`
pub fn run_at(config: &ExportConfig, started: DateTime<Local>) -> Result<RunReport, ExportError> {
    let stamp = RunStamp::allocate(started, &config.backup_dir);
    ensure_backup_dir(&config.backup_dir)?;

    let backup = stamp.backup_path(&config.backup_dir);

    let bytes = copy_file(&config.source, &backup)?;
    info!(path = ?backup, bytes, "Created backup of Clear database");

    let session = ExportSession::open(&backup, stamp.clone(), &config.output_dir)?;

    let mut outcomes = Vec::with_capacity(config.tables.len());
    for spec in &config.tables {
        let result = session.export(spec);
        if let Err(e) = &result {
            error!(table = %spec.name, error = %e, "Export failed, continuing with next table");
        }
        outcomes.push(TableOutcome {
            table: spec.name.clone(),
            result,
        });
    }

    Ok(RunReport {
        stamp,
        backup,
        outcomes,
    })
}
