//! Ordered record collection.

use super::record::VaultRecord;
use crate::error::{Result, VaultError};

/// Name given to a vault created without one.
pub const DEFAULT_VAULT_NAME: &str = "My Vault";

/// A named, ordered collection of records.
///
/// Indices are stable between mutations, except that removal shifts every
/// later record down by one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VaultStore {
    name: String,
    records: Vec<VaultRecord>,
}

impl Default for VaultStore {
    fn default() -> Self {
        Self::new(DEFAULT_VAULT_NAME)
    }
}

impl VaultStore {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            records: Vec::new(),
        }
    }

    pub fn with_records(name: impl Into<String>, records: Vec<VaultRecord>) -> Self {
        Self {
            name: name.into(),
            records,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Append a record at the end of the store.
    pub fn add_record(&mut self, record: VaultRecord) {
        self.records.push(record);
    }

    /// Remove the record at `index`, shifting later records down by one.
    ///
    /// # Errors
    ///
    /// Returns `VaultError::IndexOutOfRange` unless `index < size()`.
    pub fn remove_record(&mut self, index: usize) -> Result<VaultRecord> {
        self.check_index(index)?;
        Ok(self.records.remove(index))
    }

    /// Borrow the record at `index`.
    ///
    /// # Errors
    ///
    /// Returns `VaultError::IndexOutOfRange` unless `index < size()`.
    pub fn record_at(&self, index: usize) -> Result<&VaultRecord> {
        self.check_index(index)?;
        Ok(&self.records[index])
    }

    /// Swap the record at `index` for an edited one, returning the old record.
    ///
    /// # Errors
    ///
    /// Returns `VaultError::IndexOutOfRange` unless `index < size()`.
    pub fn replace_record(&mut self, index: usize, record: VaultRecord) -> Result<VaultRecord> {
        self.check_index(index)?;
        Ok(std::mem::replace(&mut self.records[index], record))
    }

    pub fn size(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[VaultRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, VaultRecord> {
        self.records.iter()
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index >= self.records.len() {
            return Err(VaultError::IndexOutOfRange {
                index,
                size: self.records.len(),
            });
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a VaultStore {
    type Item = &'a VaultRecord;
    type IntoIter = std::slice::Iter<'a, VaultRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bing() -> VaultRecord {
        VaultRecord::new(
            "Bing",
            "a@outlook.com",
            "helloworld123",
            "www.bing.ca",
            "none",
        )
        .unwrap()
    }

    fn adobe() -> VaultRecord {
        VaultRecord::new(
            "Adobe",
            "a@outlook.com",
            "goodpassword",
            "www.adobe.ca",
            "none",
        )
        .unwrap()
    }

    #[test]
    fn test_empty_store() {
        let store = VaultStore::default();
        assert_eq!(store.size(), 0);
        assert!(store.is_empty());
        assert_eq!(store.name(), DEFAULT_VAULT_NAME);
    }

    #[test]
    fn test_with_records_preserves_order() {
        let store = VaultStore::with_records("Personal", vec![bing(), adobe()]);
        assert_eq!(store.size(), 2);
        assert_eq!(store.record_at(0).unwrap(), &bing());
        assert_eq!(store.record_at(1).unwrap(), &adobe());
    }

    #[test]
    fn test_add_record() {
        let mut store = VaultStore::new("Personal");
        store.add_record(bing());

        assert_eq!(store.size(), 1);
        assert_eq!(store.record_at(0).unwrap(), &bing());
    }

    #[test]
    fn test_duplicates_allowed() {
        let mut store = VaultStore::new("Personal");
        store.add_record(bing());
        store.add_record(bing());
        assert_eq!(store.size(), 2);
    }

    #[test]
    fn test_empty_store_bounds() {
        let mut store = VaultStore::new("Personal");
        for index in [0, 1, usize::MAX] {
            assert!(matches!(
                store.record_at(index),
                Err(VaultError::IndexOutOfRange { size: 0, .. })
            ));
            assert!(matches!(
                store.remove_record(index),
                Err(VaultError::IndexOutOfRange { size: 0, .. })
            ));
        }
    }

    #[test]
    fn test_add_then_remove_returns_to_empty() {
        let mut store = VaultStore::new("Personal");
        store.add_record(bing());
        let removed = store.remove_record(0).unwrap();
        assert_eq!(removed, bing());
        assert_eq!(store.size(), 0);
    }

    #[test]
    fn test_remove_shifts_later_indices() {
        let mut store = VaultStore::with_records("Personal", vec![bing(), adobe(), bing()]);
        store.remove_record(0).unwrap();

        assert_eq!(store.size(), 2);
        assert_eq!(store.record_at(0).unwrap(), &adobe());
        assert_eq!(store.record_at(1).unwrap(), &bing());
        assert!(store.record_at(2).is_err());
    }

    #[test]
    fn test_replace_record() {
        let mut store = VaultStore::with_records("Personal", vec![bing()]);
        let old = store.replace_record(0, adobe()).unwrap();

        assert_eq!(old, bing());
        assert_eq!(store.record_at(0).unwrap(), &adobe());
        assert!(matches!(
            store.replace_record(1, bing()),
            Err(VaultError::IndexOutOfRange { index: 1, size: 1 })
        ));
    }

    #[test]
    fn test_iteration_order() {
        let store = VaultStore::with_records("Personal", vec![bing(), adobe()]);
        let names: Vec<&str> = store.iter().map(|r| r.name()).collect();
        assert_eq!(names, vec!["Bing", "Adobe"]);
        assert_eq!((&store).into_iter().count(), 2);
    }
}
