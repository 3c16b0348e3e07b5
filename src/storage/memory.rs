//! In-memory persistence backend for tests and ephemeral sessions.

use crate::Result;
use crate::models::Record;
use crate::storage::RecordPersistence;

/// Persistence backend that keeps the document in memory.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    records: Vec<Record>,
}

impl MemoryBackend {
    /// Creates an empty in-memory backend.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a backend pre-seeded with a collection.
    #[must_use]
    pub fn with_records(records: Vec<Record>) -> Self {
        Self { records }
    }
}

impl RecordPersistence for MemoryBackend {
    fn load(&self) -> Result<Vec<Record>> {
        Ok(self.records.clone())
    }

    fn save(&mut self, records: &[Record]) -> Result<()> {
        self.records = records.to_vec();
        Ok(())
    }
}
