// Exit codes:
//   0 = every table exported
//   1 = run completed, at least one table failed
//   2 = fatal error, no tables exported

use clap::Parser;
use clearexport::{ExportConfig, ExportError, TableKind, logging, session};
use eyre::{Context, Result};
use std::path::PathBuf;
use std::process;

#[derive(Parser)]
#[command(name = "clearexport")]
#[command(about = "Back up the Clear task database and export tasks and lists to CSV")]
#[command(version)]
struct Cli {
    /// Clear database to back up (default: Clear's location under $HOME)
    #[arg(short, long)]
    source: Option<PathBuf>,

    /// Directory for the database backup
    #[arg(short, long, default_value = "backups")]
    backup_dir: PathBuf,

    /// Directory for the CSV files
    #[arg(short, long, default_value = ".")]
    output_dir: PathBuf,

    /// Don't export the lists table
    #[arg(long)]
    skip_lists: bool,
}

fn main() {
    // Setup tracing
    logging::init();

    let cli = Cli::parse();

    match run(cli) {
        Ok(0) => {}
        Ok(code) => process::exit(code),
        Err(e) => {
            tracing::error!("{:#}", e);
            let code = e.downcast_ref::<ExportError>().map_or(2, ExportError::exit_code);
            process::exit(code);
        }
    }
}

fn run(cli: Cli) -> Result<i32> {
    let mut config = match cli.source {
        Some(source) => ExportConfig::new(source),
        None => ExportConfig::for_current_user().context("Failed to locate the Clear database")?,
    };
    config.backup_dir = cli.backup_dir;
    config.output_dir = cli.output_dir;
    if cli.skip_lists {
        config.tables.retain(|t| t.kind != TableKind::List);
    }

    let report = session::run(&config)?;
    report.log_summary();

    Ok(report.exit_code())
}
