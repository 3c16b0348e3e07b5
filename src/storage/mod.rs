//! Durable persistence for the record collection.
//!
//! The entire collection lives under one durable key as a single JSON array
//! document. Backends expose only get-whole-value / set-whole-value; there is
//! no partial or incremental persistence.

mod json_file;
mod memory;

pub use json_file::JsonFileBackend;
pub use memory::MemoryBackend;

use crate::Result;
use crate::models::Record;

/// Whole-collection persistence boundary.
///
/// Implementations are the authoritative durable copy of the collection.
/// Every mutation in the store is a read-modify-write of the full document;
/// a failed `save` must leave the previously persisted state intact.
pub trait RecordPersistence: Send {
    /// Loads the full collection. An absent document is an empty collection.
    fn load(&self) -> Result<Vec<Record>>;

    /// Replaces the full collection in one write.
    fn save(&mut self, records: &[Record]) -> Result<()>;
}
