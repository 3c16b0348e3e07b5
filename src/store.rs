//! The record store.
//!
//! Owns the canonical ordered collection, most-recent-first: every create
//! prepends. Each mutation persists the whole collection in one write through
//! [`RecordPersistence`].
//!
//! Mutation entry points take `&mut self`, so a single logical actor is
//! enforced at compile time; concurrent callers must wrap the store in their
//! own mutual-exclusion guard (`Mutex<RecordStore>`), otherwise the
//! read-modify-write cycle would be last-write-wins.

use crate::models::{Record, RecordId, RecordPatch};
use crate::photos::PhotoStore;
use crate::storage::RecordPersistence;
use crate::Result;

/// Canonical collection of inventory records.
pub struct RecordStore {
    records: Vec<Record>,
    persistence: Box<dyn RecordPersistence>,
    photos: Box<dyn PhotoStore>,
}

impl RecordStore {
    /// Opens the store, loading the persisted collection.
    ///
    /// # Errors
    ///
    /// Returns an error if the durable document cannot be read or parsed.
    pub fn open(
        persistence: Box<dyn RecordPersistence>,
        photos: Box<dyn PhotoStore>,
    ) -> Result<Self> {
        let records = persistence.load()?;
        tracing::debug!(count = records.len(), "record store opened");
        Ok(Self {
            records,
            persistence,
            photos,
        })
    }

    /// Returns the records, newest first.
    #[must_use]
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Returns the number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns whether the store is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Looks up a record by ID.
    #[must_use]
    pub fn get(&self, id: &RecordId) -> Option<&Record> {
        self.records.iter().find(|r| &r.id == id)
    }

    /// Prepends a new record and persists the collection.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails; the in-memory collection is
    /// rolled back so store state matches durable state.
    pub fn create(&mut self, record: Record) -> Result<()> {
        tracing::info!(id = %record.id, "creating record");
        self.records.insert(0, record);
        if let Err(e) = self.persist() {
            self.records.remove(0);
            return Err(e);
        }
        Ok(())
    }

    /// Shallow-merges the patch over the record with the given ID and
    /// persists. A missing ID is a silent no-op: edits are only offered on
    /// existing items, so absence means the caller raced a deletion.
    ///
    /// The store recomputes nothing; callers supply any pre-derived `area`.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    pub fn update(&mut self, id: &RecordId, patch: RecordPatch) -> Result<()> {
        let Some(pos) = self.records.iter().position(|r| &r.id == id) else {
            tracing::warn!(id = %id, "update ignored, no record with this id");
            return Ok(());
        };
        let previous = self.records[pos].clone();
        patch.apply(&mut self.records[pos]);
        if let Err(e) = self.persist() {
            self.records[pos] = previous;
            return Err(e);
        }
        Ok(())
    }

    /// Removes the record with the given ID, releases its photo resource and
    /// persists the remainder. Relative order of the others is preserved.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails. A missing photo resource is not
    /// an error.
    pub fn delete(&mut self, id: &RecordId) -> Result<()> {
        let Some(pos) = self.records.iter().position(|r| &r.id == id) else {
            return Ok(());
        };
        let record = self.records.remove(pos);
        if let Err(e) = self.persist() {
            self.records.insert(pos, record);
            return Err(e);
        }
        if !record.photo_uri.is_empty() {
            self.photos.remove(&record.photo_uri)?;
        }
        tracing::info!(id = %id, "record deleted");
        Ok(())
    }

    /// Prepends imported records ahead of the existing collection, preserving
    /// relative order within each side, and persists the concatenation.
    ///
    /// Does not deduplicate by ID: merged data commonly originates from a
    /// different source with independently generated IDs, so duplicates are
    /// accepted.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    pub fn merge_from(&mut self, new_records: Vec<Record>) -> Result<()> {
        let added = new_records.len();
        let previous_len = self.records.len();
        let mut merged = new_records;
        merged.append(&mut self.records);
        self.records = merged;
        if let Err(e) = self.persist() {
            self.records.drain(..self.records.len() - previous_len);
            return Err(e);
        }
        tracing::info!(added, total = self.records.len(), "merge import applied");
        Ok(())
    }

    /// Discards the existing collection entirely and persists the given set
    /// as the new canonical state. Irreversible; callers gate this behind an
    /// explicit confirmation.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    pub fn replace_all(&mut self, records: Vec<Record>) -> Result<()> {
        let previous = std::mem::replace(&mut self.records, records);
        if let Err(e) = self.persist() {
            self.records = previous;
            return Err(e);
        }
        tracing::info!(
            discarded = previous.len(),
            total = self.records.len(),
            "replace import applied"
        );
        Ok(())
    }

    fn persist(&mut self) -> Result<()> {
        self.persistence.save(&self.records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Coordinates;
    use crate::photos::NullPhotoStore;
    use crate::storage::MemoryBackend;

    fn record(id: &str) -> Record {
        Record {
            id: RecordId::new(id),
            photo_uri: String::new(),
            coordinates: Coordinates {
                latitude: 1.0,
                longitude: 2.0,
            },
            map_url: String::new(),
            saved_at: String::new(),
            cuenta: String::new(),
            field_id: String::new(),
            structure_type: String::new(),
            technology: String::new(),
            faces: String::new(),
            status: String::new(),
            dim_width: String::new(),
            dim_height: String::new(),
            area: None,
        }
    }

    fn open_empty() -> RecordStore {
        RecordStore::open(Box::new(MemoryBackend::new()), Box::new(NullPhotoStore))
            .unwrap()
    }

    fn ids(store: &RecordStore) -> Vec<&str> {
        store.records().iter().map(|r| r.id.as_str()).collect()
    }

    #[test]
    fn test_create_prepends_newest_first() {
        let mut store = open_empty();
        store.create(record("A")).unwrap();
        store.create(record("B")).unwrap();
        store.create(record("C")).unwrap();
        assert_eq!(ids(&store), ["C", "B", "A"]);
    }

    #[test]
    fn test_merge_prepends_without_dedup() {
        let mut store = open_empty();
        store.create(record("Z")).unwrap();
        store
            .merge_from(vec![record("X"), record("Y")])
            .unwrap();
        assert_eq!(ids(&store), ["X", "Y", "Z"]);

        // Same id can coexist after a merge.
        store.merge_from(vec![record("Z")]).unwrap();
        assert_eq!(ids(&store), ["Z", "X", "Y", "Z"]);
    }

    #[test]
    fn test_replace_all_discards_previous() {
        let mut store = open_empty();
        store.create(record("Z")).unwrap();
        store.replace_all(vec![record("X")]).unwrap();
        assert_eq!(ids(&store), ["X"]);
    }

    #[test]
    fn test_delete_removes_exactly_one_preserving_order() {
        let mut store = open_empty();
        store.create(record("A")).unwrap();
        store.create(record("B")).unwrap();
        store.create(record("C")).unwrap();
        store.delete(&RecordId::new("B")).unwrap();
        assert_eq!(ids(&store), ["C", "A"]);
    }

    #[test]
    fn test_delete_missing_id_is_noop() {
        let mut store = open_empty();
        store.create(record("A")).unwrap();
        store.delete(&RecordId::new("nope")).unwrap();
        assert_eq!(ids(&store), ["A"]);
    }

    #[test]
    fn test_update_merges_fields_and_ignores_missing_id() {
        let mut store = open_empty();
        store.create(record("A")).unwrap();

        store
            .update(
                &RecordId::new("A"),
                RecordPatch {
                    cuenta: Some("1234-5678".to_string()),
                    area: Some(Some("12.00".to_string())),
                    ..RecordPatch::default()
                },
            )
            .unwrap();
        assert_eq!(store.records()[0].cuenta, "1234-5678");
        assert_eq!(store.records()[0].area.as_deref(), Some("12.00"));

        // No-op, no panic, nothing changed.
        store
            .update(&RecordId::new("ghost"), RecordPatch::default())
            .unwrap();
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_mutations_are_persisted() {
        let mut store = open_empty();
        store.create(record("A")).unwrap();
        store.create(record("B")).unwrap();

        // Reload through the persistence boundary.
        let saved = store.persistence.load().unwrap();
        assert_eq!(saved.len(), 2);
        assert_eq!(saved[0].id.as_str(), "B");
    }
}
