//! Repository contract for person records.

use size_core::{PersonRecord, RecordId};

use super::Result;

/// Storage for person records, keyed by id.
///
/// Records are replaced whole on every save; the engine never mutates a
/// stored record in place.
pub trait RecordRepository: Send + Sync {
    /// Load a record, failing with `NotFound` when the id is unknown.
    fn load(&self, id: RecordId) -> Result<PersonRecord>;

    /// Insert or replace a record. Records without an id are rejected.
    fn save(&self, record: &PersonRecord) -> Result<()>;

    /// Remove a record. Deleting an unknown id is not an error.
    fn delete(&self, id: RecordId) -> Result<()>;

    fn exists(&self, id: RecordId) -> bool;

    /// Number of stored records.
    fn count(&self) -> Result<usize>;

    /// Load a record as its JSON document.
    fn export_json(&self, id: RecordId) -> Result<String> {
        let record = self.load(id)?;
        Ok(serde_json::to_string(&record)?)
    }

    /// Save a record given as a JSON document, returning it.
    fn import_json(&self, json: &str) -> Result<PersonRecord> {
        let record: PersonRecord = serde_json::from_str(json)?;
        self.save(&record)?;
        Ok(record)
    }
}
