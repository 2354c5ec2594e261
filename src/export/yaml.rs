//! YAML export of the complete data set

use std::io::Write;

use crate::error::{PocketbookError, PocketbookResult};
use crate::export::json::FullExport;
use crate::storage::Storage;

fn export_err(e: impl std::fmt::Display) -> PocketbookError {
    PocketbookError::Export(e.to_string())
}

/// Export the full data set to YAML, with a commented header
pub fn export_full_yaml<W: Write>(storage: &Storage, mut writer: W) -> PocketbookResult<()> {
    let export = FullExport::from_storage(storage)?;

    writeln!(writer, "# Pocketbook Full Export").map_err(export_err)?;
    writeln!(writer, "# Generated: {}", export.exported_at).map_err(export_err)?;
    writeln!(writer, "# App Version: {}", export.app_version).map_err(export_err)?;
    writeln!(writer).map_err(export_err)?;

    serde_yaml::to_writer(writer, &export).map_err(export_err)?;

    Ok(())
}

/// Parse and validate a YAML export
pub fn import_from_yaml(yaml_str: &str) -> PocketbookResult<FullExport> {
    let export: FullExport = serde_yaml::from_str(yaml_str).map_err(export_err)?;
    export.validate().map_err(PocketbookError::Export)?;
    Ok(export)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::PocketbookPaths;
    use crate::models::Category;
    use crate::test_fixtures::expense;
    use tempfile::TempDir;

    #[test]
    fn test_yaml_export() {
        let temp_dir = TempDir::new().unwrap();
        let paths = PocketbookPaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        storage
            .transactions
            .upsert(expense(10, Category::BillsAndUtilities, "2024-01-05"))
            .unwrap();

        let mut buf = Vec::new();
        export_full_yaml(&storage, &mut buf).unwrap();
        let yaml = String::from_utf8(buf).unwrap();

        assert!(yaml.starts_with("# Pocketbook Full Export"));
        assert!(yaml.contains("Bills & Utilities"));

        let imported = import_from_yaml(&yaml).unwrap();
        assert_eq!(imported.transactions.len(), 1);
        assert_eq!(imported.transactions[0].category, Category::BillsAndUtilities);
    }
}
