//! In-memory RecordRepository implementation for tests and local runs.

use std::collections::HashMap;
use std::sync::RwLock;

use size_core::{PersonRecord, RecordId};

use super::{RecordRepository, RepositoryError, Result};

/// In-memory implementation of RecordRepository.
pub struct InMemoryRecordRepo {
    records: RwLock<HashMap<RecordId, PersonRecord>>,
}

impl InMemoryRecordRepo {
    pub fn new() -> Self {
        Self {
            records: RwLock::new(HashMap::new()),
        }
    }

    /// Create pre-populated with records; records without an id are skipped.
    pub fn with_records(records: impl IntoIterator<Item = PersonRecord>) -> Self {
        let records = records
            .into_iter()
            .filter_map(|record| record.id().map(|id| (id, record)))
            .collect();
        Self {
            records: RwLock::new(records),
        }
    }
}

impl Default for InMemoryRecordRepo {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordRepository for InMemoryRecordRepo {
    fn load(&self, id: RecordId) -> Result<PersonRecord> {
        let records = self
            .records
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        records
            .get(&id)
            .cloned()
            .ok_or(RepositoryError::NotFound(id))
    }

    fn save(&self, record: &PersonRecord) -> Result<()> {
        let id = record.id().ok_or(RepositoryError::MissingId)?;
        let mut records = self
            .records
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        records.insert(id, record.clone());
        Ok(())
    }

    fn delete(&self, id: RecordId) -> Result<()> {
        let mut records = self
            .records
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        records.remove(&id);
        Ok(())
    }

    fn exists(&self, id: RecordId) -> bool {
        self.records
            .read()
            .map(|records| records.contains_key(&id))
            .unwrap_or(false)
    }

    fn count(&self) -> Result<usize> {
        let records = self
            .records
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(records.len())
    }
}
