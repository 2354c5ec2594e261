//! Transaction repository for JSON storage
//!
//! Manages loading and saving transactions to transactions.json

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{PoisonError, RwLock};

use crate::error::PocketbookError;
use crate::models::{Category, TransactionId, TransactionRecord};

use super::file_io::{read_json, write_json_atomic};

/// Serializable transaction data structure
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct TransactionData {
    transactions: Vec<TransactionRecord>,
}

fn lock_err<T>(e: PoisonError<T>) -> PocketbookError {
    PocketbookError::Storage(format!("Failed to acquire lock: {}", e))
}

/// Newest first: date descending, then creation time descending
fn newest_first(a: &TransactionRecord, b: &TransactionRecord) -> std::cmp::Ordering {
    b.date
        .cmp(&a.date)
        .then_with(|| b.created_at.cmp(&a.created_at))
}

/// Repository for transaction persistence with a category index
pub struct TransactionRepository {
    path: PathBuf,
    data: RwLock<HashMap<TransactionId, TransactionRecord>>,
    by_category: RwLock<HashMap<Category, Vec<TransactionId>>>,
}

impl TransactionRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
            by_category: RwLock::new(HashMap::new()),
        }
    }

    /// Load transactions from disk and build the index
    pub fn load(&self) -> Result<(), PocketbookError> {
        let file_data: TransactionData = read_json(&self.path)?;

        let mut data = self.data.write().map_err(lock_err)?;
        let mut by_category = self.by_category.write().map_err(lock_err)?;

        data.clear();
        by_category.clear();

        for txn in file_data.transactions {
            by_category.entry(txn.category).or_default().push(txn.id);
            data.insert(txn.id, txn);
        }

        Ok(())
    }

    /// Save transactions to disk, newest first
    pub fn save(&self) -> Result<(), PocketbookError> {
        let data = self.data.read().map_err(lock_err)?;

        let mut transactions: Vec<_> = data.values().cloned().collect();
        transactions.sort_by(newest_first);

        write_json_atomic(&self.path, &TransactionData { transactions })
    }

    pub fn get(&self, id: TransactionId) -> Result<Option<TransactionRecord>, PocketbookError> {
        let data = self.data.read().map_err(lock_err)?;
        Ok(data.get(&id).cloned())
    }

    /// All transactions, newest first
    pub fn get_all(&self) -> Result<Vec<TransactionRecord>, PocketbookError> {
        let data = self.data.read().map_err(lock_err)?;

        let mut transactions: Vec<_> = data.values().cloned().collect();
        transactions.sort_by(newest_first);
        Ok(transactions)
    }

    /// Transactions in one category, newest first
    pub fn get_by_category(
        &self,
        category: Category,
    ) -> Result<Vec<TransactionRecord>, PocketbookError> {
        let data = self.data.read().map_err(lock_err)?;
        let by_category = self.by_category.read().map_err(lock_err)?;

        let ids = by_category.get(&category).map(Vec::as_slice).unwrap_or(&[]);
        let mut transactions: Vec<_> = ids.iter().filter_map(|id| data.get(id).cloned()).collect();
        transactions.sort_by(newest_first);
        Ok(transactions)
    }

    /// Resolve a full or short identifier to a stored transaction
    pub fn find(&self, identifier: &str) -> Result<Option<TransactionRecord>, PocketbookError> {
        let data = self.data.read().map_err(lock_err)?;

        let mut matches = data.values().filter(|t| t.id.matches(identifier));
        let first = matches.next().cloned();
        if matches.next().is_some() {
            return Err(PocketbookError::Validation(format!(
                "Identifier '{}' matches more than one transaction",
                identifier
            )));
        }
        Ok(first)
    }

    /// Insert or replace a transaction
    pub fn upsert(&self, txn: TransactionRecord) -> Result<(), PocketbookError> {
        let mut data = self.data.write().map_err(lock_err)?;
        let mut by_category = self.by_category.write().map_err(lock_err)?;

        if let Some(old) = data.get(&txn.id) {
            if let Some(ids) = by_category.get_mut(&old.category) {
                ids.retain(|&id| id != txn.id);
            }
        }

        by_category.entry(txn.category).or_default().push(txn.id);
        data.insert(txn.id, txn);
        Ok(())
    }

    /// Remove a transaction, returning it if it existed
    pub fn delete(&self, id: TransactionId) -> Result<Option<TransactionRecord>, PocketbookError> {
        let mut data = self.data.write().map_err(lock_err)?;
        let mut by_category = self.by_category.write().map_err(lock_err)?;

        let removed = data.remove(&id);
        if let Some(txn) = &removed {
            if let Some(ids) = by_category.get_mut(&txn.category) {
                ids.retain(|&tid| tid != id);
            }
        }
        Ok(removed)
    }

    pub fn count(&self) -> Result<usize, PocketbookError> {
        let data = self.data.read().map_err(lock_err)?;
        Ok(data.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_fixtures::{expense, income};
    use tempfile::TempDir;

    fn create_test_repo() -> (TempDir, TransactionRepository) {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("transactions.json");
        let repo = TransactionRepository::new(path);
        (temp_dir, repo)
    }

    #[test]
    fn test_empty_load() {
        let (_temp_dir, repo) = create_test_repo();
        repo.load().unwrap();
        assert_eq!(repo.count().unwrap(), 0);
    }

    #[test]
    fn test_upsert_and_get() {
        let (_temp_dir, repo) = create_test_repo();
        let txn = expense(100, Category::Groceries, "2024-03-05");
        let id = txn.id;

        repo.upsert(txn.clone()).unwrap();
        assert_eq!(repo.get(id).unwrap(), Some(txn));
    }

    #[test]
    fn test_save_and_reload() {
        let (temp_dir, repo) = create_test_repo();
        repo.upsert(expense(100, Category::Groceries, "2024-03-05")).unwrap();
        repo.upsert(income(900, Category::Other, "2024-03-01")).unwrap();
        repo.save().unwrap();

        let reloaded = TransactionRepository::new(temp_dir.path().join("transactions.json"));
        reloaded.load().unwrap();
        assert_eq!(reloaded.count().unwrap(), 2);
        assert_eq!(reloaded.get_by_category(Category::Groceries).unwrap().len(), 1);
    }

    #[test]
    fn test_get_all_newest_first() {
        let (_temp_dir, repo) = create_test_repo();
        repo.upsert(expense(1, Category::Other, "2024-01-01")).unwrap();
        repo.upsert(expense(2, Category::Other, "2024-03-01")).unwrap();
        repo.upsert(expense(3, Category::Other, "2024-02-01")).unwrap();

        let dates: Vec<String> = repo
            .get_all()
            .unwrap()
            .iter()
            .map(|t| t.date.to_string())
            .collect();
        assert_eq!(dates, vec!["2024-03-01", "2024-02-01", "2024-01-01"]);
    }

    #[test]
    fn test_category_index_follows_updates() {
        let (_temp_dir, repo) = create_test_repo();
        let mut txn = expense(100, Category::Groceries, "2024-03-05");
        repo.upsert(txn.clone()).unwrap();

        txn.category = Category::Travel;
        repo.upsert(txn).unwrap();

        assert!(repo.get_by_category(Category::Groceries).unwrap().is_empty());
        assert_eq!(repo.get_by_category(Category::Travel).unwrap().len(), 1);
    }

    #[test]
    fn test_find_by_short_id() {
        let (_temp_dir, repo) = create_test_repo();
        let txn = expense(100, Category::Groceries, "2024-03-05");
        repo.upsert(txn.clone()).unwrap();

        let short = txn.id.to_string();
        assert_eq!(repo.find(&short).unwrap().map(|t| t.id), Some(txn.id));
        assert!(repo.find("txn-zzzzzzzz").unwrap().is_none());
    }

    #[test]
    fn test_delete() {
        let (_temp_dir, repo) = create_test_repo();
        let txn = expense(100, Category::Groceries, "2024-03-05");
        let id = txn.id;
        repo.upsert(txn).unwrap();

        assert!(repo.delete(id).unwrap().is_some());
        assert!(repo.delete(id).unwrap().is_none());
        assert!(repo.get_by_category(Category::Groceries).unwrap().is_empty());
    }
}
