// Error kinds for the backup and export pipeline

use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExportError {
    /// Source database could not be opened for reading
    #[error("Could not open Clear database at {}: {source}", .path.display())]
    SourceUnreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Backup destination could not be created
    #[error("Could not create backup file {}: {source}", .path.display())]
    DestinationUnwritable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Byte transfer into the backup was interrupted
    #[error("Backup of Clear database to {} did not complete: {source}", .path.display())]
    CopyIncomplete {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Could not create backup directory {}: {source}", .path.display())]
    BackupDirUnavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Could not open backup database {}: {source}", .path.display())]
    DbOpen {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    #[error("Backup database {} did not respond: {source}", .path.display())]
    DbPing {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    #[error("Failed to read table {table}: {source}")]
    TableAccess {
        table: String,
        #[source]
        source: rusqlite::Error,
    },

    #[error("Invalid table name: {0} (must be alphanumeric with _)")]
    InvalidTableName(String),

    /// Live columns differ from the columns the record shape declares
    #[error("Table {table} does not match its record shape (missing: {missing:?}, unexpected: {unexpected:?})")]
    SchemaMismatch {
        table: String,
        missing: Vec<String>,
        unexpected: Vec<String>,
    },

    #[error("Failed to open and write to {}: {source}", .path.display())]
    OutputCreate {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// `row` is 1-based; 0 means the header line or the final flush
    #[error("Failed to write record {row} of {table} to destination csv: {source}")]
    RecordWrite {
        table: String,
        row: usize,
        #[source]
        source: csv::Error,
    },

    #[error("Failed to decode row {row} of {table}: {source}")]
    RowDecode {
        table: String,
        row: usize,
        #[source]
        source: rusqlite::Error,
    },

    #[error("Could not determine home directory")]
    HomeDirUnavailable,
}

impl ExportError {
    /// Whether this error ends the run rather than a single table's export
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            ExportError::SourceUnreadable { .. }
                | ExportError::DestinationUnwritable { .. }
                | ExportError::CopyIncomplete { .. }
                | ExportError::BackupDirUnavailable { .. }
                | ExportError::DbOpen { .. }
                | ExportError::DbPing { .. }
                | ExportError::HomeDirUnavailable
        )
    }

    /// Process exit status for a run that ended with this error
    pub fn exit_code(&self) -> i32 {
        if self.is_fatal() { 2 } else { 1 }
    }
}
