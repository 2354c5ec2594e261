//! Storage initialization
//!
//! First-run setup: directories plus empty record files.

use crate::config::paths::PocketbookPaths;
use crate::error::PocketbookError;

use super::file_io::write_json_atomic;

/// Prepare a fresh data directory
///
/// Existing record files are left untouched. Returns true if anything was
/// created.
pub fn initialize_storage(paths: &PocketbookPaths) -> Result<bool, PocketbookError> {
    paths.ensure_directories()?;

    let mut created = false;
    for (file, key) in [
        (paths.transactions_file(), "transactions"),
        (paths.budgets_file(), "budgets"),
    ] {
        if !file.exists() {
            write_json_atomic(&file, &serde_json::json!({ key: [] }))?;
            created = true;
        }
    }

    Ok(created)
}
