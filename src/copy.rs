// Byte-exact file copy used to snapshot the Clear database

use crate::error::ExportError;
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::Path;
use tracing::debug;

/// Copy `source` to `dest`, creating or truncating `dest`
///
/// The source is opened read-only and never locked. Returns the number of bytes copied.
pub fn copy_file(source: &Path, dest: &Path) -> Result<u64, ExportError> {
    let origin = File::open(source).map_err(|e| ExportError::SourceUnreadable {
        path: source.to_path_buf(),
        source: e,
    })?;

    let target = File::create(dest).map_err(|e| ExportError::DestinationUnwritable {
        path: dest.to_path_buf(),
        source: e,
    })?;

    let incomplete = |e: io::Error| ExportError::CopyIncomplete {
        path: dest.to_path_buf(),
        source: e,
    };

    let mut reader = BufReader::new(origin);
    let mut writer = BufWriter::new(target);
    let bytes = io::copy(&mut reader, &mut writer).map_err(incomplete)?;
    writer.flush().map_err(incomplete)?;
    writer.get_ref().sync_all().map_err(incomplete)?;

    debug!(source = ?source, dest = ?dest, bytes, "copy_file: done");
    Ok(bytes)
}
