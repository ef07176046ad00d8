// Table to CSV export

use crate::error::ExportError;
use crate::record::{ColumnMapping, Record};
use rusqlite::Connection;
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, warn};

/// Outcome of a single table export
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableExport {
    pub table: String,
    pub path: PathBuf,
    pub header_written: bool,
    pub rows_written: usize,
    pub rows_skipped: usize,
}

pub(crate) fn validate_table_name(name: &str) -> Result<(), ExportError> {
    if name.is_empty() || name.len() > 64 || !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err(ExportError::InvalidTableName(name.to_string()));
    }
    Ok(())
}

/// Read a table's column names in declared order
///
/// Uses a `LIMIT 1` probe so no table data is transferred.
pub fn column_headers(conn: &Connection, table: &str) -> Result<Vec<String>, ExportError> {
    validate_table_name(table)?;

    let stmt = conn
        .prepare(&format!("SELECT * FROM \"{}\" LIMIT 1", table))
        .map_err(|e| ExportError::TableAccess {
            table: table.to_string(),
            source: e,
        })?;

    Ok(stmt.column_names().into_iter().map(String::from).collect())
}

/// Export every row of `table` to a CSV file at `output`
///
/// Rows that fail to decode are logged and skipped. A failed write ends the export.
/// When the table can't be read or doesn't match `R`, the output file is removed.
pub fn export_table<R: Record>(conn: &Connection, table: &str, output: &Path) -> Result<TableExport, ExportError> {
    validate_table_name(table)?;

    let result = write_table::<R>(conn, table, output);
    if let Err(ExportError::TableAccess { .. } | ExportError::SchemaMismatch { .. }) = &result {
        if let Err(e) = fs::remove_file(output) {
            debug!(table, path = ?output, error = %e, "export_table: could not remove output");
        }
    }
    result
}

fn write_table<R: Record>(conn: &Connection, table: &str, output: &Path) -> Result<TableExport, ExportError> {
    let file = File::create(output).map_err(|e| ExportError::OutputCreate {
        path: output.to_path_buf(),
        source: e,
    })?;
    let mut writer = csv::Writer::from_writer(file);

    let write_err = |row: usize, e: csv::Error| ExportError::RecordWrite {
        table: table.to_string(),
        row,
        source: e,
    };

    let (mapping, header_written) = match column_headers(conn, table) {
        Ok(headers) => {
            let mapping = ColumnMapping::resolve(R::COLUMNS, &headers).map_err(|m| ExportError::SchemaMismatch {
                table: table.to_string(),
                missing: m.missing,
                unexpected: m.unexpected,
            })?;
            writer.write_record(&headers).map_err(|e| write_err(0, e))?;
            (mapping, true)
        }
        Err(e @ ExportError::InvalidTableName(_)) => return Err(e),
        Err(e) => {
            error!(table, error = %e, "Failed to write column headings");
            (ColumnMapping::identity(R::COLUMNS), false)
        }
    };

    let access_err = |e: rusqlite::Error| ExportError::TableAccess {
        table: table.to_string(),
        source: e,
    };

    let mut stmt = conn
        .prepare(&format!("SELECT * FROM \"{}\"", table))
        .map_err(access_err)?;
    let mut rows = stmt.query([]).map_err(access_err)?;

    let mut row_num = 0;
    let mut rows_written = 0;
    let mut rows_skipped = 0;

    while let Some(row) = rows.next().map_err(access_err)? {
        row_num += 1;

        let record = match R::from_row(row) {
            Ok(r) => r,
            Err(e) => {
                let id = row.get::<_, i64>("id").ok();
                let err = ExportError::RowDecode {
                    table: table.to_string(),
                    row: row_num,
                    source: e,
                };
                warn!(table, kind = R::KIND, row = row_num, ?id, error = %err, "Skipping row that doesn't decode");
                rows_skipped += 1;
                continue;
            }
        };

        writer
            .write_record(mapping.project(record.fields()))
            .map_err(|e| write_err(row_num, e))?;
        rows_written += 1;
    }

    writer.flush().map_err(|e| write_err(0, e.into()))?;

    debug!(table, width = mapping.width(), "export_table: flushed");
    info!(table, path = ?output, rows_written, rows_skipped, "Exported table");

    Ok(TableExport {
        table: table.to_string(),
        path: output.to_path_buf(),
        header_written,
        rows_written,
        rows_skipped,
    })
}
