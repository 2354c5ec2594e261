//! Audit log CLI command

use clap::Args;

use crate::audit::EntityType;
use crate::error::{PocketbookError, PocketbookResult};
use crate::storage::Storage;

/// Arguments for `pocketbook log`
#[derive(Args, Debug)]
pub struct LogArgs {
    /// Number of entries to show
    #[arg(short = 'n', long, default_value = "20")]
    pub count: usize,

    /// Only show entries for "transaction" or "budget"
    #[arg(short, long)]
    pub entity: Option<String>,
}

/// Print the most recent audit entries, oldest first
pub fn handle_log_command(storage: &Storage, args: LogArgs) -> PocketbookResult<()> {
    let entity = args
        .entity
        .as_deref()
        .map(str::parse::<EntityType>)
        .transpose()
        .map_err(PocketbookError::Validation)?;

    let entries = storage.audit().read_recent(args.count, entity)?;
    if entries.is_empty() {
        println!("No audit entries found.");
        return Ok(());
    }

    for entry in &entries {
        println!("{}", entry.format_human_readable());
    }
    println!(
        "\nShowing {} entries from {}",
        entries.len(),
        storage.audit().path().display()
    );

    Ok(())
}
