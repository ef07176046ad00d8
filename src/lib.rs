// ClearExport - Back up the Clear task database and export its tables to CSV

pub mod config;
pub mod copy;
pub mod error;
pub mod export;
pub mod logging;
pub mod models;
pub mod record;
pub mod session;

// Re-export main types for convenience
pub use config::{ExportConfig, RunStamp, TableKind, TableSpec};
pub use error::ExportError;
pub use export::{TableExport, column_headers, export_table};
pub use models::{List, Task};
pub use record::{ColumnMapping, Record};
pub use session::{ExportSession, RunReport, run};
