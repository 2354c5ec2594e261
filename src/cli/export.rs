//! CLI commands for data export
//!
//! Provides commands for exporting data in various formats.

use chrono::Local;
use clap::{Subcommand, ValueEnum};
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use crate::error::{PocketbookError, PocketbookResult};
use crate::export::{
    export_budgets_csv, export_full_json, export_full_yaml, export_transactions_csv,
    import_from_json, import_from_yaml, FullExport,
};
use crate::storage::Storage;

/// Record set for CSV export
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum CsvData {
    /// One row per transaction
    Transactions,
    /// One row per monthly budget
    Budgets,
}

/// Export subcommands
#[derive(Subcommand, Debug)]
pub enum ExportCommands {
    /// Export transactions or budgets to CSV
    Csv {
        /// Which records to export
        #[arg(value_enum, default_value = "transactions")]
        data: CsvData,

        /// Output file path, defaults to the export directory
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Export all data to JSON
    Json {
        /// Output file path, defaults to the export directory
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Pretty-print JSON output
        #[arg(long)]
        pretty: bool,
    },

    /// Export all data to YAML
    Yaml {
        /// Output file path, defaults to the export directory
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Check that a JSON or YAML export file can be read back
    Verify {
        /// Export file (.json, .yaml or .yml)
        file: PathBuf,
    },

    /// Show export information without writing files
    Info,
}

/// Handle export commands
pub fn handle_export_command(storage: &Storage, cmd: ExportCommands) -> PocketbookResult<()> {
    match cmd {
        ExportCommands::Csv { data, output } => {
            let (stem, count) = match data {
                CsvData::Transactions => ("transactions", storage.transactions.count()?),
                CsvData::Budgets => ("budgets", storage.budgets.count()?),
            };
            let path = output_path(storage, output, stem, "csv")?;
            let writer = create_output(&path)?;
            match data {
                CsvData::Transactions => export_transactions_csv(storage, writer)?,
                CsvData::Budgets => export_budgets_csv(storage, writer)?,
            }
            println!("Exported {} {} to: {}", count, stem, path.display());
        }

        ExportCommands::Json { output, pretty } => {
            let path = output_path(storage, output, "pocketbook", "json")?;
            export_full_json(storage, create_output(&path)?, pretty)?;
            println!("Full data set exported to: {}", path.display());
        }

        ExportCommands::Yaml { output } => {
            let path = output_path(storage, output, "pocketbook", "yaml")?;
            export_full_yaml(storage, create_output(&path)?)?;
            println!("Full data set exported to: {}", path.display());
        }

        ExportCommands::Verify { file } => {
            let contents = fs::read_to_string(&file).map_err(|e| {
                PocketbookError::Io(format!("Failed to read {}: {}", file.display(), e))
            })?;
            let export = match file.extension().and_then(|e| e.to_str()) {
                Some("yaml") | Some("yml") => import_from_yaml(&contents)?,
                _ => import_from_json(&contents)?,
            };
            println!("Export file is valid: {}", file.display());
            print_summary(&export);
        }

        ExportCommands::Info => {
            let export = FullExport::from_storage(storage)?;
            println!("Export Information");
            println!("==================\n");
            print_summary(&export);
            println!(
                "\nExport directory: {}",
                storage.paths().export_dir().display()
            );
        }
    }

    Ok(())
}

fn print_summary(export: &FullExport) {
    println!("Schema Version: {}", export.schema_version);
    println!("App Version:    {}", export.app_version);
    println!("Transactions:   {}", export.metadata.transaction_count);
    println!("Budgets:        {}", export.metadata.budget_count);
    if let (Some(earliest), Some(latest)) = (
        &export.metadata.earliest_transaction,
        &export.metadata.latest_transaction,
    ) {
        println!("Date Range:     {} to {}", earliest, latest);
    }
}

/// Use the given path, or a timestamped file in the export directory
fn output_path(
    storage: &Storage,
    output: Option<PathBuf>,
    stem: &str,
    extension: &str,
) -> PocketbookResult<PathBuf> {
    if let Some(path) = output {
        return Ok(path);
    }

    let dir = storage.paths().export_dir();
    fs::create_dir_all(&dir).map_err(|e| {
        PocketbookError::Io(format!(
            "Failed to create export directory {}: {}",
            dir.display(),
            e
        ))
    })?;
    let timestamp = Local::now().format("%Y%m%d-%H%M%S");
    Ok(dir.join(format!("{}-{}.{}", stem, timestamp, extension)))
}

fn create_output(path: &Path) -> PocketbookResult<BufWriter<File>> {
    let file = File::create(path).map_err(|e| {
        PocketbookError::Export(format!(
            "Failed to create file {}: {}",
            path.display(),
            e
        ))
    })?;
    Ok(BufWriter::new(file))
}
